//! Windows platform implementation
//!
//! Window lookup walks top-level windows with `EnumWindows`; processes come
//! from `tasklist` and are killed with `taskkill`.

use super::{parse_tasklist_output, run_tool, taskkill_failure};
use crate::automation::ProcessInfo;
use crate::error::{Error, Result};
use windows::Win32::Foundation::{BOOL, HWND, LPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GetForegroundWindow, GetWindowTextLengthW, GetWindowTextW,
    GetWindowThreadProcessId, IsWindowVisible, SetForegroundWindow, ShowWindow, SW_RESTORE,
};

const SYSTEM_TOOL_HINT: &str = "tasklist/taskkill ship with Windows; check PATH";

enum Target<'a> {
    Pid(u32),
    Title(&'a str),
}

struct Search<'a> {
    target: Target<'a>,
    found: Option<HWND>,
}

fn window_title(hwnd: HWND) -> String {
    // SAFETY: hwnd comes from the system and the buffer outlives the call.
    unsafe {
        let len = GetWindowTextLengthW(hwnd);
        if len <= 0 {
            return String::new();
        }
        let mut buf = vec![0u16; len as usize + 1];
        let copied = GetWindowTextW(hwnd, &mut buf);
        String::from_utf16_lossy(&buf[..copied.max(0) as usize])
    }
}

unsafe extern "system" fn enum_callback(hwnd: HWND, lparam: LPARAM) -> BOOL {
    let search = &mut *(lparam.0 as *mut Search);
    if !IsWindowVisible(hwnd).as_bool() {
        return BOOL(1);
    }
    let matched = match search.target {
        Target::Pid(pid) => {
            let mut proc_pid: u32 = 0;
            GetWindowThreadProcessId(hwnd, Some(&mut proc_pid));
            proc_pid == pid
        }
        Target::Title(needle) => window_title(hwnd)
            .to_lowercase()
            .contains(&needle.to_lowercase()),
    };
    if matched {
        search.found = Some(hwnd);
        return BOOL(0); // stop enumerating
    }
    BOOL(1)
}

fn find_window(target: Target<'_>) -> Option<HWND> {
    let mut search = Search { target, found: None };
    // SAFETY: `search` lives for the whole enumeration; the callback only
    // casts the LPARAM back to it.
    unsafe {
        // EnumWindows reports an error when the callback stops early
        let _ = EnumWindows(Some(enum_callback), LPARAM(&mut search as *mut Search as isize));
    }
    search.found
}

fn bring_to_front(hwnd: HWND, target: &str) -> Result<()> {
    // SAFETY: hwnd was just returned by EnumWindows.
    unsafe {
        let _ = ShowWindow(hwnd, SW_RESTORE);
        if !SetForegroundWindow(hwnd).as_bool() {
            return Err(Error::action_failed(
                "SetForegroundWindow",
                format!("window {} refused focus", target),
            ));
        }
    }
    Ok(())
}

pub fn activate_by_name(name: &str) -> Result<()> {
    let hwnd = find_window(Target::Title(name)).ok_or_else(|| Error::window_not_found(name))?;
    bring_to_front(hwnd, name)
}

pub fn activate_by_pid(pid: u32) -> Result<()> {
    let label = format!("pid {}", pid);
    let hwnd = find_window(Target::Pid(pid)).ok_or_else(|| Error::window_not_found(&label))?;
    bring_to_front(hwnd, &label)
}

pub fn active_title() -> Result<String> {
    // SAFETY: no preconditions.
    let hwnd = unsafe { GetForegroundWindow() };
    if hwnd.0.is_null() {
        return Err(Error::window_not_found("foreground window"));
    }
    Ok(window_title(hwnd))
}

pub fn list_processes() -> Result<Vec<ProcessInfo>> {
    let stdout = run_tool("tasklist", &["/FO", "CSV", "/NH"], SYSTEM_TOOL_HINT)?;
    Ok(parse_tasklist_output(&stdout))
}

pub fn kill(pid: u32) -> Result<()> {
    let pid_arg = pid.to_string();
    run_tool("taskkill", &["/F", "/PID", &pid_arg], SYSTEM_TOOL_HINT)
        .map(|_| ())
        .map_err(|e| taskkill_failure(e, pid))
}
