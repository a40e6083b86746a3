//! `window` command group

use super::Reporter;
use crate::automation::Automation;
use crate::error::{Error, Result};
use clap::Subcommand;
use serde_json::json;
use std::io::Write;

#[derive(Subcommand, Debug, Clone)]
pub enum WindowCommand {
    /// Activate a window by name or pid
    Activate {
        /// Window name to activate
        #[arg(long, default_value = "")]
        name: String,
        /// Process ID of the window to activate
        #[arg(long, default_value_t = 0)]
        pid: u32,
    },
    /// Kill a process by pid
    Kill {
        /// Process ID to kill
        #[arg(long, default_value_t = 0)]
        pid: u32,
    },
    /// Get the title of the active window
    Title,
}

pub fn run<W: Write>(cmd: WindowCommand, desk: &mut dyn Automation, out: &mut Reporter<W>) -> Result<()> {
    match cmd {
        // a name wins over a pid when both are given
        WindowCommand::Activate { name, .. } if !name.is_empty() => {
            desk.activate_window_by_name(&name)?;
            out.emit(
                format!("Activated window with name: {}", name),
                json!({"activated": {"name": name}}),
            )
        }
        WindowCommand::Activate { pid, .. } if pid != 0 => {
            desk.activate_window_by_pid(pid)?;
            out.emit(
                format!("Activated window with pid: {}", pid),
                json!({"activated": {"pid": pid}}),
            )
        }
        WindowCommand::Activate { .. } => Err(Error::invalid_argument(
            "Please provide either a window name or a pid",
        )),
        WindowCommand::Kill { pid: 0 } => Err(Error::invalid_argument("Please provide a pid")),
        WindowCommand::Kill { pid } => {
            desk.kill_process(pid)?;
            out.emit(
                format!("Killed process with pid: {}", pid),
                json!({"killed": pid}),
            )
        }
        WindowCommand::Title => {
            let title = desk.active_window_title()?;
            out.emit(
                format!("Active window title: {}", title),
                json!({"title": title}),
            )
        }
    }
}
