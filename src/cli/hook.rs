//! `hook` command group: block on or stream global input events

use super::Reporter;
use crate::error::Result;
use crate::hook::{self, HookFilter, HookMessage, Receiver, StreamOptions};
use crate::keys::{KeyCode, MouseButton};
use clap::Subcommand;
use serde_json::json;
use std::io::Write;
use std::sync::atomic::AtomicBool;
use std::time::Duration;
use tracing::info;

#[derive(Subcommand, Debug, Clone)]
pub enum HookCommand {
    /// Wait for a key press anywhere on the desktop
    Key {
        /// Key to wait for
        #[arg(long)]
        key: KeyCode,
        /// Give up after this many milliseconds (0 waits forever)
        #[arg(long, value_name = "MS")]
        timeout: Option<u64>,
    },
    /// Wait for a mouse button press
    Mouse {
        /// Mouse button to wait for
        #[arg(long, default_value = "left")]
        button: MouseButton,
        /// Give up after this many milliseconds (0 waits forever)
        #[arg(long, value_name = "MS")]
        timeout: Option<u64>,
    },
    /// Print input events until Ctrl+C
    Listen {
        /// Stop after this many events
        #[arg(long)]
        count: Option<usize>,
        /// Include mouse-move events
        #[arg(long)]
        moves: bool,
    },
}

/// Everything a hook command needs besides its flags
pub struct HookContext<'a> {
    pub events: &'a Receiver<HookMessage>,
    pub stop: &'a AtomicBool,
    /// Used when `--timeout` is absent
    pub default_timeout_ms: u64,
}

impl HookContext<'_> {
    fn timeout(&self, flag: Option<u64>) -> Option<Duration> {
        match flag.unwrap_or(self.default_timeout_ms) {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }
}

pub fn run<W: Write>(cmd: HookCommand, ctx: &HookContext<'_>, out: &mut Reporter<W>) -> Result<()> {
    match cmd {
        HookCommand::Key { key, timeout } => {
            let event = hook::wait_for(ctx.events, &HookFilter::Key(key), ctx.timeout(timeout))?;
            out.emit(format!("Key pressed: {}", key), json!({"key": key, "event": event}))
        }
        HookCommand::Mouse { button, timeout } => {
            let event = hook::wait_for(ctx.events, &HookFilter::Button(button), ctx.timeout(timeout))?;
            out.emit(
                format!("Mouse button pressed: {}", button),
                json!({"button": button, "event": event}),
            )
        }
        HookCommand::Listen { count, moves } => {
            let options = StreamOptions { count, include_moves: moves };
            let n = hook::stream(ctx.events, ctx.stop, options, |event| out.emit_record(event, event))?;
            info!(events = n, "listen finished");
            Ok(())
        }
    }
}
