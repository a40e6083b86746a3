//! Global input hook
//!
//! The OS hook runs on its own thread and forwards events into a bounded
//! channel. Commands block on the receiving end: either until one event
//! matches a filter, or streaming until a count is reached or a stop flag is
//! raised. A hook that fails to start sends its error down the same channel.

use crate::error::{Error, Result};
use crate::keys::{KeyCode, MouseButton};
use chrono::{DateTime, Utc};
pub use crossbeam_channel::{Receiver, Sender};
use crossbeam_channel::{bounded, RecvTimeoutError, TrySendError};
use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, error, warn};

const CHANNEL_CAPACITY: usize = 1024;
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// What the hook thread sends: an event, or the error that ended the hook
pub type HookMessage = Result<HookEvent>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HookEvent {
    pub time: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: EventKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    KeyDown { key: String },
    KeyUp { key: String },
    MouseDown { button: String },
    MouseUp { button: String },
    MouseMove { x: f64, y: f64 },
    Wheel { dx: i64, dy: i64 },
}

impl HookEvent {
    pub fn now(kind: EventKind) -> Self {
        Self { time: Utc::now(), kind }
    }

    pub fn is_move(&self) -> bool {
        matches!(self.kind, EventKind::MouseMove { .. })
    }
}

impl fmt::Display for HookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            EventKind::KeyDown { key } => write!(f, "key_down {}", key),
            EventKind::KeyUp { key } => write!(f, "key_up {}", key),
            EventKind::MouseDown { button } => write!(f, "mouse_down {}", button),
            EventKind::MouseUp { button } => write!(f, "mouse_up {}", button),
            EventKind::MouseMove { x, y } => write!(f, "mouse_move {} {}", x, y),
            EventKind::Wheel { dx, dy } => write!(f, "wheel {} {}", dx, dy),
        }
    }
}

/// What a blocking wait is looking for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookFilter {
    Key(KeyCode),
    Button(MouseButton),
}

impl HookFilter {
    pub fn matches(&self, event: &HookEvent) -> bool {
        match (self, &event.kind) {
            // hooks report physical keys, so `A` and `a` are the same press
            (Self::Key(want), EventKind::KeyDown { key }) => key.eq_ignore_ascii_case(&want.to_string()),
            (Self::Button(want), EventKind::MouseDown { button }) => *button == want.to_string(),
            (Self::Button(want), EventKind::Wheel { dx, dy }) => match want {
                MouseButton::WheelUp => *dy > 0,
                MouseButton::WheelDown => *dy < 0,
                MouseButton::WheelRight => *dx > 0,
                MouseButton::WheelLeft => *dx < 0,
                _ => false,
            },
            _ => false,
        }
    }
}

impl fmt::Display for HookFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => write!(f, "key {}", key),
            Self::Button(button) => write!(f, "mouse button {}", button),
        }
    }
}

fn hook_error(reason: impl fmt::Display) -> Error {
    Error::hook_failed(reason).with_suggestions(vec![
        "Linux: an X11 session is required".to_string(),
        "macOS: grant Input Monitoring and Accessibility permissions".to_string(),
    ])
}

fn hook_stopped() -> Error {
    hook_error("the global input hook stopped")
}

/// Block until an event matching `filter` arrives.
pub fn wait_for(rx: &Receiver<HookMessage>, filter: &HookFilter, timeout: Option<Duration>) -> Result<HookEvent> {
    let deadline = timeout.map(|t| Instant::now() + t);
    loop {
        let message = match deadline {
            Some(deadline) => {
                let remaining = deadline.saturating_duration_since(Instant::now());
                match rx.recv_timeout(remaining) {
                    Ok(message) => message,
                    Err(RecvTimeoutError::Timeout) => {
                        let ms = timeout.map(|t| t.as_millis() as u64).unwrap_or_default();
                        return Err(Error::timeout(&filter.to_string(), ms));
                    }
                    Err(RecvTimeoutError::Disconnected) => return Err(hook_stopped()),
                }
            }
            None => rx.recv().map_err(|_| hook_stopped())?,
        };
        let event = message?;
        if filter.matches(&event) {
            debug!(%event, "hook matched");
            return Ok(event);
        }
    }
}

/// Options for [`stream`]
#[derive(Debug, Clone, Copy, Default)]
pub struct StreamOptions {
    /// Stop after this many delivered events
    pub count: Option<usize>,
    /// Deliver mouse-move events too
    pub include_moves: bool,
}

/// Deliver events to `on_event` until `count` is reached or `stop` is set.
/// Returns how many events were delivered.
pub fn stream<F>(rx: &Receiver<HookMessage>, stop: &AtomicBool, options: StreamOptions, mut on_event: F) -> Result<usize>
where
    F: FnMut(&HookEvent) -> Result<()>,
{
    let mut delivered = 0;
    while !stop.load(Ordering::SeqCst) {
        if options.count.is_some_and(|n| delivered >= n) {
            break;
        }
        let event = match rx.recv_timeout(POLL_INTERVAL) {
            Ok(message) => message?,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => return Err(hook_stopped()),
        };
        if event.is_move() && !options.include_moves {
            continue;
        }
        on_event(&event)?;
        delivered += 1;
    }
    Ok(delivered)
}

/// Running OS-level hook; events arrive on [`EventHook::receiver`].
///
/// The hook thread cannot be stopped from outside and lives until the process
/// exits.
pub struct EventHook {
    rx: Receiver<HookMessage>,
}

impl EventHook {
    pub fn start() -> Result<Self> {
        let (tx, rx) = bounded::<HookMessage>(CHANNEL_CAPACITY);
        thread::Builder::new()
            .name("deskctl-hook".to_string())
            .spawn(move || run_listener(tx, rdev::listen::<Callback>))
            .map_err(Error::hook_failed)?;
        Ok(Self { rx })
    }

    pub fn receiver(&self) -> &Receiver<HookMessage> {
        &self.rx
    }
}

type Callback = Box<dyn FnMut(rdev::Event)>;

/// Run `listen` with a callback that forwards converted events to `tx`.
///
/// `listen` only returns on failure. rdev keeps the callback (and the sender
/// inside it) in a global after a failed start, so the channel never
/// disconnects on its own and the error has to be sent.
fn run_listener<L, E>(tx: Sender<HookMessage>, listen: L)
where
    L: FnOnce(Callback) -> std::result::Result<(), E>,
    E: fmt::Debug,
{
    debug!("starting global input hook");
    let events = tx.clone();
    let callback: Callback = Box::new(move |event: rdev::Event| {
        let Some(event) = convert(event) else { return };
        match events.try_send(Ok(event)) {
            Ok(()) | Err(TrySendError::Disconnected(_)) => {}
            Err(TrySendError::Full(_)) => warn!("hook channel full, dropping event"),
        }
    });
    if let Err(e) = listen(callback) {
        error!(error = ?e, "global input hook failed");
        let _ = tx.send(Err(hook_error(format!("could not start: {:?}", e))));
    }
}

fn convert(event: rdev::Event) -> Option<HookEvent> {
    let kind = match event.event_type {
        rdev::EventType::KeyPress(key) => EventKind::KeyDown { key: key_name(key) },
        rdev::EventType::KeyRelease(key) => EventKind::KeyUp { key: key_name(key) },
        rdev::EventType::ButtonPress(button) => EventKind::MouseDown { button: button_name(button)? },
        rdev::EventType::ButtonRelease(button) => EventKind::MouseUp { button: button_name(button)? },
        rdev::EventType::MouseMove { x, y } => EventKind::MouseMove { x, y },
        rdev::EventType::Wheel { delta_x, delta_y } => EventKind::Wheel { dx: delta_x, dy: delta_y },
    };
    Some(HookEvent {
        time: DateTime::<Utc>::from(event.time),
        kind,
    })
}

fn button_name(button: rdev::Button) -> Option<String> {
    match button {
        rdev::Button::Left => Some(MouseButton::Left.to_string()),
        rdev::Button::Right => Some(MouseButton::Right.to_string()),
        rdev::Button::Middle => Some(MouseButton::Middle.to_string()),
        // X11 reports wheel notches as buttons 4-7 alongside Wheel events
        rdev::Button::Unknown(4..=7) => None,
        rdev::Button::Unknown(n) => Some(format!("button{}", n)),
    }
}

/// Canonical key name, matching what [`KeyCode`] prints
fn key_name(key: rdev::Key) -> String {
    use rdev::Key as K;

    let code = match key {
        K::Return | K::KpReturn => KeyCode::Enter,
        K::Escape => KeyCode::Escape,
        K::Backspace => KeyCode::Backspace,
        K::Tab => KeyCode::Tab,
        K::Space => KeyCode::Space,
        K::Delete | K::KpDelete => KeyCode::Delete,
        K::Home => KeyCode::Home,
        K::End => KeyCode::End,
        K::PageUp => KeyCode::PageUp,
        K::PageDown => KeyCode::PageDown,
        K::UpArrow => KeyCode::Up,
        K::DownArrow => KeyCode::Down,
        K::LeftArrow => KeyCode::Left,
        K::RightArrow => KeyCode::Right,
        K::CapsLock => KeyCode::CapsLock,
        K::ControlLeft | K::ControlRight => KeyCode::Ctrl,
        K::Alt | K::AltGr => KeyCode::Alt,
        K::ShiftLeft | K::ShiftRight => KeyCode::Shift,
        K::MetaLeft | K::MetaRight => KeyCode::Cmd,
        K::F1 => KeyCode::F(1),
        K::F2 => KeyCode::F(2),
        K::F3 => KeyCode::F(3),
        K::F4 => KeyCode::F(4),
        K::F5 => KeyCode::F(5),
        K::F6 => KeyCode::F(6),
        K::F7 => KeyCode::F(7),
        K::F8 => KeyCode::F(8),
        K::F9 => KeyCode::F(9),
        K::F10 => KeyCode::F(10),
        K::F11 => KeyCode::F(11),
        K::F12 => KeyCode::F(12),
        K::Num0 | K::Kp0 => KeyCode::Char('0'),
        K::Num1 | K::Kp1 => KeyCode::Char('1'),
        K::Num2 | K::Kp2 => KeyCode::Char('2'),
        K::Num3 | K::Kp3 => KeyCode::Char('3'),
        K::Num4 | K::Kp4 => KeyCode::Char('4'),
        K::Num5 | K::Kp5 => KeyCode::Char('5'),
        K::Num6 | K::Kp6 => KeyCode::Char('6'),
        K::Num7 | K::Kp7 => KeyCode::Char('7'),
        K::Num8 | K::Kp8 => KeyCode::Char('8'),
        K::Num9 | K::Kp9 => KeyCode::Char('9'),
        K::Minus | K::KpMinus => KeyCode::Char('-'),
        K::KpPlus => KeyCode::Char('+'),
        K::KpMultiply => KeyCode::Char('*'),
        K::KpDivide | K::Slash => KeyCode::Char('/'),
        K::Equal => KeyCode::Char('='),
        K::LeftBracket => KeyCode::Char('['),
        K::RightBracket => KeyCode::Char(']'),
        K::SemiColon => KeyCode::Char(';'),
        K::Quote => KeyCode::Char('\''),
        K::BackSlash | K::IntlBackslash => KeyCode::Char('\\'),
        K::Comma => KeyCode::Char(','),
        K::Dot => KeyCode::Char('.'),
        K::BackQuote => KeyCode::Char('`'),
        other => match letter(other) {
            Some(c) => KeyCode::Char(c),
            None => return format!("{:?}", other).to_lowercase(),
        },
    };
    code.to_string()
}

fn letter(key: rdev::Key) -> Option<char> {
    use rdev::Key as K;

    const LETTERS: [(rdev::Key, char); 26] = [
        (K::KeyA, 'a'), (K::KeyB, 'b'), (K::KeyC, 'c'), (K::KeyD, 'd'), (K::KeyE, 'e'),
        (K::KeyF, 'f'), (K::KeyG, 'g'), (K::KeyH, 'h'), (K::KeyI, 'i'), (K::KeyJ, 'j'),
        (K::KeyK, 'k'), (K::KeyL, 'l'), (K::KeyM, 'm'), (K::KeyN, 'n'), (K::KeyO, 'o'),
        (K::KeyP, 'p'), (K::KeyQ, 'q'), (K::KeyR, 'r'), (K::KeyS, 's'), (K::KeyT, 't'),
        (K::KeyU, 'u'), (K::KeyV, 'v'), (K::KeyW, 'w'), (K::KeyX, 'x'), (K::KeyY, 'y'),
        (K::KeyZ, 'z'),
    ];
    LETTERS.iter().find(|(k, _)| *k == key).map(|(_, c)| *c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn key_down(key: &str) -> HookEvent {
        HookEvent::now(EventKind::KeyDown { key: key.to_string() })
    }

    fn feed(events: Vec<HookEvent>) -> Receiver<HookMessage> {
        let (tx, rx) = bounded(events.len().max(1));
        for e in events {
            tx.send(Ok(e)).unwrap();
        }
        rx
    }

    #[test]
    fn key_filter_matches_only_key_down() {
        let filter = HookFilter::Key(KeyCode::Char('a'));
        assert!(filter.matches(&key_down("a")));
        assert!(!filter.matches(&key_down("b")));
        assert!(!filter.matches(&HookEvent::now(EventKind::KeyUp { key: "a".into() })));
    }

    #[test]
    fn button_filter_matches_presses_and_wheel_direction() {
        let left = HookFilter::Button(MouseButton::Left);
        assert!(left.matches(&HookEvent::now(EventKind::MouseDown { button: "left".into() })));
        assert!(!left.matches(&HookEvent::now(EventKind::MouseUp { button: "left".into() })));

        let up = HookFilter::Button(MouseButton::WheelUp);
        assert!(up.matches(&HookEvent::now(EventKind::Wheel { dx: 0, dy: 1 })));
        assert!(!up.matches(&HookEvent::now(EventKind::Wheel { dx: 0, dy: -1 })));
    }

    #[test]
    fn key_filter_ignores_letter_case() {
        let filter = HookFilter::Key(KeyCode::Char('A'));
        assert!(filter.matches(&key_down("a")));
    }

    #[test]
    fn wait_skips_until_match() {
        let rx = feed(vec![key_down("x"), key_down("enter"), key_down("y")]);
        let event = wait_for(&rx, &HookFilter::Key(KeyCode::Enter), None).unwrap();
        assert_eq!(event.kind, EventKind::KeyDown { key: "enter".into() });
        assert_eq!(rx.len(), 1);
    }

    #[test]
    fn wait_times_out() {
        let (_tx, rx) = bounded::<HookMessage>(1);
        let err = wait_for(&rx, &HookFilter::Key(KeyCode::Escape), Some(Duration::from_millis(20)))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Timeout);
        assert_eq!(err.message, "Timeout after 20ms waiting for: key esc");
    }

    #[test]
    fn wait_fails_when_hook_dies() {
        let rx = feed(vec![key_down("q")]);
        let err = wait_for(&rx, &HookFilter::Key(KeyCode::Char('z')), None).unwrap_err();
        assert_eq!(err.code, ErrorCode::HookFailed);
    }

    #[test]
    fn failed_start_reaches_waiter_while_callback_is_held() {
        let (tx, rx) = bounded(4);
        // keep the callback (and its sender) alive the way rdev does
        let mut held: Option<Callback> = None;
        run_listener(tx, |callback| {
            held = Some(callback);
            Err("event tap could not be created")
        });
        assert!(held.is_some());

        let err = wait_for(&rx, &HookFilter::Key(KeyCode::Enter), None).unwrap_err();
        assert_eq!(err.code, ErrorCode::HookFailed);
        assert!(err.message.contains("event tap could not be created"));
        assert!(!err.suggestions.is_empty());
    }

    #[test]
    fn failed_start_ends_stream() {
        let (tx, rx) = bounded(4);
        let mut held: Option<Callback> = None;
        run_listener(tx, |callback| {
            held = Some(callback);
            Err("XRecordExtensionError")
        });

        let stop = AtomicBool::new(false);
        let err = stream(&rx, &stop, StreamOptions::default(), |_| Ok(())).unwrap_err();
        assert_eq!(err.code, ErrorCode::HookFailed);
        assert!(held.is_some());
    }

    #[test]
    fn stream_stops_at_count_and_skips_moves() {
        let (tx, rx) = bounded(8);
        tx.send(Ok(HookEvent::now(EventKind::MouseMove { x: 1.0, y: 2.0 }))).unwrap();
        tx.send(Ok(key_down("a"))).unwrap();
        tx.send(Ok(key_down("b"))).unwrap();
        tx.send(Ok(key_down("c"))).unwrap();

        let stop = AtomicBool::new(false);
        let mut seen = Vec::new();
        let options = StreamOptions { count: Some(2), include_moves: false };
        let n = stream(&rx, &stop, options, |e| {
            seen.push(e.to_string());
            Ok(())
        })
        .unwrap();
        assert_eq!(n, 2);
        assert_eq!(seen, vec!["key_down a", "key_down b"]);
    }

    #[test]
    fn stream_honours_stop_flag() {
        let (_tx, rx) = bounded::<HookMessage>(1);
        let stop = AtomicBool::new(true);
        let n = stream(&rx, &stop, StreamOptions::default(), |_| Ok(())).unwrap();
        assert_eq!(n, 0);
    }

    #[test]
    fn event_serializes_flat() {
        let event = HookEvent::now(EventKind::Wheel { dx: 0, dy: -3 });
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "wheel");
        assert_eq!(value["dy"], -3);
        assert!(value["time"].is_string());
    }

    #[test]
    fn rdev_keys_use_canonical_names() {
        assert_eq!(key_name(rdev::Key::KeyQ), "q");
        assert_eq!(key_name(rdev::Key::Return), "enter");
        assert_eq!(key_name(rdev::Key::ControlRight), "ctrl");
        assert_eq!(key_name(rdev::Key::Num7), "7");
        assert_eq!(key_name(rdev::Key::F11), "f11");
        assert_eq!(key_name(rdev::Key::PrintScreen), "printscreen");
    }

    #[test]
    fn wheel_buttons_are_dropped() {
        assert_eq!(button_name(rdev::Button::Unknown(4)), None);
        assert_eq!(button_name(rdev::Button::Unknown(8)).as_deref(), Some("button8"));
        assert_eq!(button_name(rdev::Button::Middle).as_deref(), Some("middle"));
    }
}
