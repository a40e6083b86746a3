//! Optional TOML configuration
//!
//! Lookup order: `--config <path>`, `$DESKCTL_CONFIG`, then
//! `$HOME/.config/deskctl/config.toml`. Only an explicitly named file has to
//! exist.

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const CONFIG_ENV: &str = "DESKCTL_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Print the JSON envelope instead of text lines
    pub json: bool,
    /// Pause between characters in `keyboard type`
    pub type_delay_ms: u64,
    /// Default hook timeout, 0 waits forever
    pub hook_timeout_ms: u64,
    /// Default file for `screen capture` in the file-writing tree
    pub capture_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            json: false,
            type_delay_ms: 0,
            hook_timeout_ms: 0,
            capture_path: PathBuf::from("screenshot.png"),
        }
    }
}

impl Config {
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::from_file(Path::new(&path));
        }
        match default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "loading config");
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }
}

fn default_path() -> Option<PathBuf> {
    let home = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE"))?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("deskctl")
            .join("config.toml"),
    )
}
