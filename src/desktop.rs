//! Desktop - the native `Automation` implementation

use crate::automation::{Automation, DisplayInfo, ProcessInfo, Region, Size};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::keys::{KeyCode, MouseButton, ScrollDirection, ToggleState};
use crate::platform;
use enigo::{Enigo, Key, KeyboardControllable, MouseControllable};
use screenshots::image::RgbaImage;
use screenshots::Screen;
use std::thread;
use std::time::Duration;
use tracing::debug;

pub struct Desktop {
    enigo: Enigo,
    type_delay: Duration,
}

impl Desktop {
    pub fn new(config: &Config) -> Self {
        Self {
            enigo: Enigo::new(),
            type_delay: Duration::from_millis(config.type_delay_ms),
        }
    }

    fn primary_screen() -> Result<Screen> {
        let screens = Screen::all().map_err(Error::capture_failed)?;
        let index = screens
            .iter()
            .position(|s| s.display_info.is_primary)
            .unwrap_or(0);
        screens
            .into_iter()
            .nth(index)
            .ok_or_else(|| Error::capture_failed("no displays found"))
    }
}

fn to_enigo_key(key: KeyCode) -> Key {
    match key {
        KeyCode::Char(c) => Key::Layout(c),
        KeyCode::Enter => Key::Return,
        KeyCode::Escape => Key::Escape,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Tab => Key::Tab,
        KeyCode::Space => Key::Space,
        KeyCode::Delete => Key::Delete,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Up => Key::UpArrow,
        KeyCode::Down => Key::DownArrow,
        KeyCode::Left => Key::LeftArrow,
        KeyCode::Right => Key::RightArrow,
        KeyCode::CapsLock => Key::CapsLock,
        KeyCode::Ctrl => Key::Control,
        KeyCode::Alt => Key::Alt,
        KeyCode::Shift => Key::Shift,
        KeyCode::Cmd => Key::Meta,
        KeyCode::F(n) => match n {
            1 => Key::F1,
            2 => Key::F2,
            3 => Key::F3,
            4 => Key::F4,
            5 => Key::F5,
            6 => Key::F6,
            7 => Key::F7,
            8 => Key::F8,
            9 => Key::F9,
            10 => Key::F10,
            11 => Key::F11,
            _ => Key::F12,
        },
    }
}

fn to_enigo_button(button: MouseButton) -> enigo::MouseButton {
    match button {
        MouseButton::Left => enigo::MouseButton::Left,
        MouseButton::Middle => enigo::MouseButton::Middle,
        MouseButton::Right => enigo::MouseButton::Right,
        MouseButton::WheelUp => enigo::MouseButton::ScrollUp,
        MouseButton::WheelDown => enigo::MouseButton::ScrollDown,
        MouseButton::WheelLeft => enigo::MouseButton::ScrollLeft,
        MouseButton::WheelRight => enigo::MouseButton::ScrollRight,
    }
}

impl Automation for Desktop {
    fn mouse_move(&mut self, x: i32, y: i32) -> Result<()> {
        debug!(x, y, "mouse move");
        self.enigo.mouse_move_to(x, y);
        Ok(())
    }

    fn mouse_location(&mut self) -> Result<(i32, i32)> {
        Ok(self.enigo.mouse_location())
    }

    fn mouse_click(&mut self, button: MouseButton, double: bool) -> Result<()> {
        debug!(%button, double, "mouse click");
        let button = to_enigo_button(button);
        self.enigo.mouse_click(button);
        if double {
            self.enigo.mouse_click(button);
        }
        Ok(())
    }

    fn mouse_scroll(&mut self, direction: ScrollDirection, steps: u32) -> Result<()> {
        debug!(%direction, steps, "mouse scroll");
        let steps = i32::try_from(steps)
            .map_err(|_| Error::invalid_argument(format!("too many steps: {}", steps)))?;
        // positive lengths scroll down/right
        match direction {
            ScrollDirection::Up => self.enigo.mouse_scroll_y(-steps),
            ScrollDirection::Down => self.enigo.mouse_scroll_y(steps),
            ScrollDirection::Left => self.enigo.mouse_scroll_x(-steps),
            ScrollDirection::Right => self.enigo.mouse_scroll_x(steps),
        }
        Ok(())
    }

    fn mouse_toggle(&mut self, button: MouseButton, state: ToggleState) -> Result<()> {
        debug!(%button, %state, "mouse toggle");
        let button = to_enigo_button(button);
        match state {
            ToggleState::Down => self.enigo.mouse_down(button),
            ToggleState::Up => self.enigo.mouse_up(button),
        }
        Ok(())
    }

    fn type_text(&mut self, text: &str) -> Result<()> {
        debug!(chars = text.chars().count(), "type text");
        if self.type_delay.is_zero() {
            self.enigo.key_sequence(text);
            return Ok(());
        }
        let mut buf = [0u8; 4];
        for c in text.chars() {
            self.enigo.key_sequence(c.encode_utf8(&mut buf));
            thread::sleep(self.type_delay);
        }
        Ok(())
    }

    fn key_tap(&mut self, key: KeyCode, modifiers: &[KeyCode]) -> Result<()> {
        debug!(%key, ?modifiers, "key tap");
        for m in modifiers {
            self.enigo.key_down(to_enigo_key(*m));
        }
        self.enigo.key_click(to_enigo_key(key));
        for m in modifiers.iter().rev() {
            self.enigo.key_up(to_enigo_key(*m));
        }
        Ok(())
    }

    fn key_toggle(&mut self, key: KeyCode, state: ToggleState) -> Result<()> {
        debug!(%key, %state, "key toggle");
        match state {
            ToggleState::Down => self.enigo.key_down(to_enigo_key(key)),
            ToggleState::Up => self.enigo.key_up(to_enigo_key(key)),
        }
        Ok(())
    }

    fn screen_size(&mut self) -> Result<Size> {
        let info = Self::primary_screen()?.display_info;
        Ok(Size {
            width: info.width,
            height: info.height,
        })
    }

    fn displays(&mut self) -> Result<Vec<DisplayInfo>> {
        let screens = Screen::all().map_err(Error::capture_failed)?;
        Ok(screens
            .iter()
            .map(|s| {
                let info = &s.display_info;
                DisplayInfo {
                    id: info.id,
                    x: info.x,
                    y: info.y,
                    width: info.width,
                    height: info.height,
                    scale_factor: info.scale_factor,
                    is_primary: info.is_primary,
                }
            })
            .collect())
    }

    fn capture(&mut self, region: Region) -> Result<RgbaImage> {
        debug!(?region, "capture");
        let screen = Self::primary_screen()?;
        screen
            .capture_area(region.x, region.y, region.width, region.height)
            .map_err(Error::capture_failed)
    }

    fn activate_window_by_name(&mut self, name: &str) -> Result<()> {
        debug!(name, "activate window");
        platform::current::activate_by_name(name)
    }

    fn activate_window_by_pid(&mut self, pid: u32) -> Result<()> {
        debug!(pid, "activate window");
        platform::current::activate_by_pid(pid)
    }

    fn active_window_title(&mut self) -> Result<String> {
        platform::current::active_title()
    }

    fn kill_process(&mut self, pid: u32) -> Result<()> {
        debug!(pid, "kill process");
        platform::current::kill(pid)
    }

    fn processes(&mut self) -> Result<Vec<ProcessInfo>> {
        platform::current::list_processes()
    }

    fn clipboard_read(&mut self) -> Result<String> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| Error::clipboard_failed("reading", e))?;
        clipboard
            .get_text()
            .map_err(|e| Error::clipboard_failed("reading", e))
    }

    fn clipboard_write(&mut self, text: &str) -> Result<()> {
        debug!(chars = text.chars().count(), "clipboard write");
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| Error::clipboard_failed("writing to", e))?;
        clipboard
            .set_text(text)
            .map_err(|e| Error::clipboard_failed("writing to", e))
    }
}
