//! macOS platform implementation
//!
//! Window operations are AppleScript snippets run through `osascript`.

use super::run_tool;
use crate::error::{Error, ErrorCode, Result};

pub use super::unix::{kill, list_processes};

const OSASCRIPT_HINT: &str =
    "Grant Automation permissions in System Settings > Privacy & Security";

fn osascript(script: &str) -> Result<String> {
    run_tool("osascript", &["-e", script], OSASCRIPT_HINT)
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Activate (bring to front) an application by name
pub fn activate_by_name(name: &str) -> Result<()> {
    let script = format!(r#"tell application "{}" to activate"#, escape(name));
    osascript(&script).map(|_| ()).map_err(|e| match e.code {
        ErrorCode::ActionFailed => Error::window_not_found(name),
        _ => e,
    })
}

pub fn activate_by_pid(pid: u32) -> Result<()> {
    let script = format!(
        r#"tell application "System Events" to set frontmost of (first process whose unix id is {}) to true"#,
        pid
    );
    osascript(&script).map(|_| ()).map_err(|e| match e.code {
        ErrorCode::ActionFailed => Error::window_not_found(&format!("pid {}", pid)),
        _ => e,
    })
}

pub fn active_title() -> Result<String> {
    osascript(
        r#"tell application "System Events"
            set frontApp to first application process whose frontmost is true
            if (count of windows of frontApp) is 0 then return name of frontApp
            return name of front window of frontApp
        end tell"#,
    )
}
