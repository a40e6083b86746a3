//! Structured errors, printable as text or as part of the JSON envelope

use serde::{Deserialize, Serialize};
use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub context: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidArgument,
    UnknownKey,
    UnknownButton,
    CaptureFailed,
    ClipboardFailed,
    WindowNotFound,
    ProcessNotFound,
    ActionFailed,
    HookFailed,
    Timeout,
    Config,
    NotSupported,
    Unknown,
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            suggestions: Vec::new(),
            context: None,
        }
    }

    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = suggestions;
        self
    }

    pub fn with_context(mut self, context: serde_json::Value) -> Self {
        self.context = Some(context);
        self
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidArgument, message)
    }

    pub fn unknown_key(name: &str) -> Self {
        Self::new(ErrorCode::UnknownKey, format!("Unknown key: {}", name))
    }

    pub fn unknown_button(name: &str) -> Self {
        Self::new(
            ErrorCode::UnknownButton,
            format!("Unknown mouse button: {}", name),
        )
        .with_suggestions(vec![
            "left, middle, right, wheelUp, wheelDown, wheelLeft, wheelRight".to_string(),
        ])
    }

    pub fn capture_failed(reason: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::CaptureFailed,
            format!("Failed to capture screen: {}", reason),
        )
    }

    pub fn clipboard_failed(action: &str, reason: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::ClipboardFailed,
            format!("Error {} clipboard: {}", action, reason),
        )
    }

    pub fn window_not_found(target: &str) -> Self {
        Self::new(
            ErrorCode::WindowNotFound,
            format!("No window matching: {}", target),
        )
    }

    pub fn process_not_found(pid: u32) -> Self {
        Self::new(
            ErrorCode::ProcessNotFound,
            format!("No process with pid: {}", pid),
        )
    }

    pub fn action_failed(action: &str, reason: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::ActionFailed,
            format!("{} failed: {}", action, reason),
        )
    }

    pub fn hook_failed(reason: impl fmt::Display) -> Self {
        Self::new(ErrorCode::HookFailed, format!("Event hook failed: {}", reason))
    }

    pub fn timeout(what: &str, timeout_ms: u64) -> Self {
        Self::new(
            ErrorCode::Timeout,
            format!("Timeout after {}ms waiting for: {}", timeout_ms, what),
        )
    }

    pub fn not_supported(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotSupported, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

impl From<anyhow::Error> for Error {
    fn from(e: anyhow::Error) -> Self {
        match e.downcast::<Error>() {
            Ok(err) => err,
            Err(e) => Self::new(ErrorCode::Unknown, format!("{:#}", e)),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::new(ErrorCode::Unknown, e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::new(ErrorCode::Unknown, e.to_string())
    }
}

impl From<crate::config::ConfigError> for Error {
    fn from(e: crate::config::ConfigError) -> Self {
        Self::new(ErrorCode::Config, e.to_string())
    }
}
