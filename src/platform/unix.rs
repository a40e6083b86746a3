//! Process listing and killing shared by Linux and macOS

use super::{parse_ps_output, run_tool};
use crate::automation::ProcessInfo;
use crate::error::{Error, Result};
use std::io;

#[cfg(target_os = "macos")]
const PS_ARGS: &[&str] = &["-axco", "pid=,comm="];

#[cfg(not(target_os = "macos"))]
const PS_ARGS: &[&str] = &["-eo", "pid=,comm="];

pub fn list_processes() -> Result<Vec<ProcessInfo>> {
    let stdout = run_tool("ps", PS_ARGS, "install procps")?;
    Ok(parse_ps_output(&stdout))
}

/// Send SIGKILL to `pid`
pub fn kill(pid: u32) -> Result<()> {
    let pid = libc::pid_t::try_from(pid)
        .map_err(|_| Error::invalid_argument(format!("pid out of range: {}", pid)))?;

    // SAFETY: kill(2) has no memory-safety preconditions.
    let rc = unsafe { libc::kill(pid, libc::SIGKILL) };
    if rc == 0 {
        return Ok(());
    }

    let err = io::Error::last_os_error();
    match err.raw_os_error() {
        Some(libc::ESRCH) => Err(Error::process_not_found(pid as u32)),
        Some(libc::EPERM) => Err(Error::action_failed("kill", err)
            .with_suggestions(vec!["Process belongs to another user".to_string()])),
        _ => Err(Error::action_failed("kill", err)),
    }
}
