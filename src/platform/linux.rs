//! Linux platform implementation
//!
//! Window operations go through `xdotool` (X11). Wayland sessions need
//! XWayland windows for these to work.

use super::{run_tool, xdotool_failure};
use crate::error::Result;

pub use super::unix::{kill, list_processes};

const XDOTOOL_HINT: &str = "Install xdotool (apt install xdotool / dnf install xdotool)";

pub fn activate_by_name(name: &str) -> Result<()> {
    run_tool("xdotool", &["search", "--name", name, "windowactivate"], XDOTOOL_HINT)
        .map(|_| ())
        .map_err(|e| xdotool_failure(e, name))
}

pub fn activate_by_pid(pid: u32) -> Result<()> {
    let pid_arg = pid.to_string();
    run_tool(
        "xdotool",
        &["search", "--onlyvisible", "--pid", &pid_arg, "windowactivate"],
        XDOTOOL_HINT,
    )
    .map(|_| ())
    .map_err(|e| xdotool_failure(e, &format!("pid {}", pid)))
}

pub fn active_title() -> Result<String> {
    run_tool("xdotool", &["getactivewindow", "getwindowname"], XDOTOOL_HINT)
}
