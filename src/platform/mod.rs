//! Platform glue for window and process operations
//!
//! Input synthesis, capture and clipboard go through cross-platform crates;
//! what is left here talks to each OS directly or through its stock tools.

use crate::automation::ProcessInfo;
use crate::error::{Error, ErrorCode, Result};
use std::io::ErrorKind;
use std::process::Command;
use tracing::debug;

#[cfg(unix)]
mod unix;

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(target_os = "linux")]
pub mod linux;

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(target_os = "macos")]
pub use macos as current;

#[cfg(target_os = "linux")]
pub use linux as current;

#[cfg(target_os = "windows")]
pub use windows as current;

/// Run an external tool and return its trimmed stdout.
///
/// A missing binary maps to `NOT_SUPPORTED` with `install_hint` as suggestion;
/// a non-zero exit maps to `ACTION_FAILED` carrying stderr, see [`tool_failure`].
pub(crate) fn run_tool(program: &str, args: &[&str], install_hint: &str) -> Result<String> {
    debug!(program, ?args, "running tool");
    let output = Command::new(program).args(args).output().map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            Error::not_supported(format!("{} is not installed", program))
                .with_suggestions(vec![install_hint.to_string()])
        } else {
            Error::action_failed(program, e)
        }
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(tool_failed(program, output.status.code(), stderr.trim()));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn tool_failed(program: &str, status: Option<i32>, stderr: &str) -> Error {
    Error::action_failed(program, stderr)
        .with_context(serde_json::json!({ "status": status, "stderr": stderr }))
}

/// Exit status and stderr of a failed [`run_tool`] call
pub(crate) fn tool_failure(err: &Error) -> Option<(Option<i64>, &str)> {
    if err.code != ErrorCode::ActionFailed {
        return None;
    }
    let context = err.context.as_ref()?;
    let stderr = context.get("stderr")?.as_str()?;
    Some((context.get("status").and_then(|s| s.as_i64()), stderr))
}

/// Map an `xdotool search ... windowactivate` failure
#[cfg(any(target_os = "linux", test))]
pub(crate) fn xdotool_failure(err: Error, target: &str) -> Error {
    match tool_failure(&err) {
        // a search that matched nothing exits 1 without a message
        Some((_, "")) => Error::window_not_found(target),
        Some((_, stderr)) if stderr.contains("Can't open display") => {
            Error::not_supported(format!("No X11 display: {}", stderr))
                .with_suggestions(vec!["Run inside an X11 session or set DISPLAY".to_string()])
        }
        _ => err,
    }
}

/// Map a `taskkill /F /PID` failure
#[cfg(any(target_os = "windows", test))]
pub(crate) fn taskkill_failure(err: Error, pid: u32) -> Error {
    match tool_failure(&err) {
        Some((Some(128), _)) => Error::process_not_found(pid),
        Some((_, stderr)) if stderr.contains("not found") => Error::process_not_found(pid),
        Some((_, stderr)) if stderr.contains("Access is denied") => err.with_suggestions(vec![
            "Process belongs to another user or needs an elevated prompt".to_string(),
        ]),
        _ => err,
    }
}

/// Parse `ps ... -o pid=,comm=` output, one `<pid> <name>` pair per line
pub fn parse_ps_output(stdout: &str) -> Vec<ProcessInfo> {
    stdout
        .lines()
        .filter_map(|line| {
            let (pid, comm) = line.trim().split_once(char::is_whitespace)?;
            let pid = pid.parse().ok()?;
            let name = comm.trim();
            if name.is_empty() {
                return None;
            }
            Some(ProcessInfo { pid, name: name.to_string() })
        })
        .collect()
}

/// Parse `tasklist /FO CSV /NH` output: `"name.exe","1234","Console","1","9,000 K"`
pub fn parse_tasklist_output(stdout: &str) -> Vec<ProcessInfo> {
    stdout
        .lines()
        .filter_map(|line| {
            let fields: Vec<&str> = line
                .trim()
                .trim_matches('"')
                .split("\",\"")
                .collect();
            let name = fields.first()?.trim();
            let pid = fields.get(1)?.trim().parse().ok()?;
            if name.is_empty() {
                return None;
            }
            Some(ProcessInfo { pid, name: name.to_string() })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ps_output_pairs_pid_and_name() {
        let out = "    1 launchd\n  412 Google Chrome Helper\n 9001 bash\n";
        let procs = parse_ps_output(out);
        assert_eq!(procs.len(), 3);
        assert_eq!(procs[0], ProcessInfo { pid: 1, name: "launchd".into() });
        assert_eq!(procs[1].name, "Google Chrome Helper");
        assert_eq!(procs[2], ProcessInfo { pid: 9001, name: "bash".into() });
    }

    #[test]
    fn ps_output_skips_garbage_lines() {
        let out = "PID COMMAND\n\n  77 kworker/0:1-events\n";
        let procs = parse_ps_output(out);
        assert_eq!(procs.len(), 1);
        assert_eq!(procs[0].pid, 77);
        assert_eq!(procs[0].name, "kworker/0:1-events");
    }

    #[test]
    fn empty_xdotool_failure_means_no_window() {
        let err = xdotool_failure(tool_failed("xdotool", Some(1), ""), "Firefox");
        assert_eq!(err.code, ErrorCode::WindowNotFound);
        assert_eq!(err.message, "No window matching: Firefox");
    }

    #[test]
    fn xdotool_without_display_is_not_a_missing_window() {
        let stderr = "Error: Can't open display: (null)\nFailed creating new xdo instance";
        let err = xdotool_failure(tool_failed("xdotool", Some(1), stderr), "Firefox");
        assert_eq!(err.code, ErrorCode::NotSupported);
        assert!(err.message.contains("Can't open display"));

        let err = xdotool_failure(tool_failed("xdotool", Some(1), "XGetWindowProperty failed"), "x");
        assert_eq!(err.code, ErrorCode::ActionFailed);
    }

    #[test]
    fn missing_tool_passes_through() {
        let err = xdotool_failure(Error::not_supported("xdotool is not installed"), "x");
        assert_eq!(err.code, ErrorCode::NotSupported);
        assert!(tool_failure(&err).is_none());
    }

    #[test]
    fn taskkill_failures_are_told_apart() {
        let missing = tool_failed("taskkill", Some(128), "ERROR: The process \"4242\" not found.");
        assert_eq!(taskkill_failure(missing, 4242).code, ErrorCode::ProcessNotFound);

        let denied = tool_failed(
            "taskkill",
            Some(1),
            "ERROR: The process with PID 4 could not be terminated.\nReason: Access is denied.",
        );
        let err = taskkill_failure(denied, 4);
        assert_eq!(err.code, ErrorCode::ActionFailed);
        assert!(err.message.contains("Access is denied"));
        assert_eq!(err.suggestions.len(), 1);
    }

    #[test]
    fn tasklist_csv_is_parsed() {
        let out = "\"System Idle Process\",\"0\",\"Services\",\"0\",\"8 K\"\r\n\"explorer.exe\",\"5120\",\"Console\",\"1\",\"98,304 K\"\r\n";
        let procs = parse_tasklist_output(out);
        assert_eq!(procs.len(), 2);
        assert_eq!(procs[0].name, "System Idle Process");
        assert_eq!(procs[1], ProcessInfo { pid: 5120, name: "explorer.exe".into() });
    }

    #[test]
    fn tasklist_info_line_is_ignored() {
        let out = "INFO: No tasks are running which match the specified criteria.\n";
        assert!(parse_tasklist_output(out).is_empty());
    }
}
