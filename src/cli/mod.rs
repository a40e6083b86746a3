//! Command groups shared by the `deskctl` and `deskctl-hook` binaries
//!
//! Each group is a clap `Subcommand` plus a `run` function that forwards the
//! parsed flags to an [`Automation`](crate::Automation) and reports the result.

pub mod clipboard;
#[cfg(feature = "hook")]
pub mod hook;
pub mod keyboard;
pub mod mouse;
pub mod output;
pub mod process;
pub mod screen;
pub mod window;

pub use output::{Output, OutputFormat, Reporter};

use crate::config::Config;
use clap::{ArgAction, Args};
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Print results as a JSON envelope
    #[arg(long, global = true)]
    pub json: bool,
    /// Log more (-v info, -vv debug, -vvv trace); DESKCTL_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    /// Config file (default: $DESKCTL_CONFIG or ~/.config/deskctl/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl GlobalArgs {
    pub fn format(&self, config: &Config) -> OutputFormat {
        if self.json || config.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_flag_or_config_selects_json() {
        let config = Config::default();
        let flags = GlobalArgs::default();
        assert_eq!(flags.format(&config), OutputFormat::Text);

        let flags = GlobalArgs { json: true, ..GlobalArgs::default() };
        assert_eq!(flags.format(&config), OutputFormat::Json);

        let config = Config { json: true, ..Config::default() };
        assert_eq!(GlobalArgs::default().format(&config), OutputFormat::Json);
    }
}
