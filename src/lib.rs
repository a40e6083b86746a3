//! deskctl-core - desktop automation behind the `deskctl` command line tools
//!
//! Mouse, keyboard, screen, window, clipboard and process operations go
//! through the [`Automation`] trait. [`Desktop`] is the native
//! implementation; the [`cli`] module holds the clap command groups that
//! both binaries share.
//!
//! ## Platform Support
//!
//! - **Linux**: X11 (window commands need `xdotool`)
//! - **macOS**: window commands use `osascript`; needs Accessibility permission
//! - **Windows**: Win32 window APIs, `tasklist`/`taskkill`
//!
//! ## Features
//!
//! - **hook** (default): global keyboard and mouse event hook

pub mod automation;
pub mod capture;
pub mod cli;
pub mod config;
pub mod desktop;
pub mod error;
#[cfg(feature = "hook")]
pub mod hook;
pub mod keys;
pub mod logging;
pub mod platform;

#[cfg(test)]
mod testing;

pub use automation::Automation;
pub use config::Config;
pub use desktop::Desktop;
pub use error::{Error, ErrorCode, Result};

pub mod prelude {
    pub use crate::automation::{Automation, DisplayInfo, ProcessInfo, Region, Rgb, Size};
    pub use crate::cli::{GlobalArgs, OutputFormat, Reporter};
    pub use crate::config::Config;
    pub use crate::desktop::Desktop;
    pub use crate::error::{Error, ErrorCode, Result};
    pub use crate::keys::{KeyCode, MouseButton, ScrollDirection, ToggleState};
}
