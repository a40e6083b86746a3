//! Key, mouse button and direction names accepted on the command line
//!
//! Names are case-insensitive, except single characters: those keep their
//! case, so `A` taps a capital letter. Each type prints back its canonical
//! name, so `"Return".parse::<KeyCode>()?.to_string() == "enter"`.

use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum KeyCode {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Tab,
    Space,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
    CapsLock,
    F(u8),
    Ctrl,
    Alt,
    Shift,
    Cmd,
}

impl KeyCode {
    pub fn is_modifier(&self) -> bool {
        matches!(self, Self::Ctrl | Self::Alt | Self::Shift | Self::Cmd)
    }
}

impl FromStr for KeyCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(Self::Char(c));
        }

        let lower = trimmed.to_lowercase();
        let key = match lower.as_str() {
            "enter" | "return" => Self::Enter,
            "esc" | "escape" => Self::Escape,
            "backspace" => Self::Backspace,
            "tab" => Self::Tab,
            "space" => Self::Space,
            "delete" | "del" => Self::Delete,
            "home" => Self::Home,
            "end" => Self::End,
            "pageup" | "page_up" => Self::PageUp,
            "pagedown" | "page_down" => Self::PageDown,
            "up" | "arrow_up" => Self::Up,
            "down" | "arrow_down" => Self::Down,
            "left" | "arrow_left" => Self::Left,
            "right" | "arrow_right" => Self::Right,
            "capslock" | "caps_lock" => Self::CapsLock,
            "ctrl" | "control" | "lctrl" | "rctrl" => Self::Ctrl,
            "alt" | "option" | "lalt" | "ralt" => Self::Alt,
            "shift" | "lshift" | "rshift" => Self::Shift,
            "cmd" | "command" | "meta" | "super" | "win" | "lcmd" | "rcmd" => Self::Cmd,
            other => match other.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                Some(n @ 1..=12) => Self::F(n),
                _ => return Err(Error::unknown_key(trimmed)),
            },
        };
        Ok(key)
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Char(' ') => "space",
            Self::Char(c) => return write!(f, "{}", c),
            Self::F(n) => return write!(f, "f{}", n),
            Self::Enter => "enter",
            Self::Escape => "esc",
            Self::Backspace => "backspace",
            Self::Tab => "tab",
            Self::Space => "space",
            Self::Delete => "delete",
            Self::Home => "home",
            Self::End => "end",
            Self::PageUp => "pageup",
            Self::PageDown => "pagedown",
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::CapsLock => "capslock",
            Self::Ctrl => "ctrl",
            Self::Alt => "alt",
            Self::Shift => "shift",
            Self::Cmd => "cmd",
        };
        f.write_str(name)
    }
}

impl From<KeyCode> for String {
    fn from(key: KeyCode) -> Self {
        key.to_string()
    }
}

/// Parse a comma-separated modifier list such as `ctrl,shift`.
/// An empty string yields no modifiers.
pub fn parse_modifiers(mods: &str) -> Result<Vec<KeyCode>> {
    if mods.trim().is_empty() {
        return Ok(Vec::new());
    }
    mods.split(',')
        .map(|m| {
            let key: KeyCode = m.parse()?;
            if key.is_modifier() {
                Ok(key)
            } else {
                Err(Error::invalid_argument(format!("Not a modifier key: {}", m.trim())))
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    WheelUp,
    WheelDown,
    WheelLeft,
    WheelRight,
}

impl FromStr for MouseButton {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "middle" | "center" => Ok(Self::Middle),
            "right" => Ok(Self::Right),
            "wheelup" => Ok(Self::WheelUp),
            "wheeldown" => Ok(Self::WheelDown),
            "wheelleft" => Ok(Self::WheelLeft),
            "wheelright" => Ok(Self::WheelRight),
            _ => Err(Error::unknown_button(s.trim())),
        }
    }
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Left => "left",
            Self::Middle => "middle",
            Self::Right => "right",
            Self::WheelUp => "wheelUp",
            Self::WheelDown => "wheelDown",
            Self::WheelLeft => "wheelLeft",
            Self::WheelRight => "wheelRight",
        })
    }
}

impl From<MouseButton> for String {
    fn from(button: MouseButton) -> Self {
        button.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    Up,
    Down,
    Left,
    Right,
}

impl FromStr for ScrollDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(Error::invalid_argument(format!("Unknown direction: {}", s.trim()))),
        }
    }
}

impl fmt::Display for ScrollDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        })
    }
}

/// Pressed or released
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleState {
    Down,
    Up,
}

impl FromStr for ToggleState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "down" => Ok(Self::Down),
            "up" => Ok(Self::Up),
            _ => Err(Error::invalid_argument(format!(
                "Unknown state: {} (expected down or up)",
                s.trim()
            ))),
        }
    }
}

impl fmt::Display for ToggleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Down => "down",
            Self::Up => "up",
        })
    }
}
