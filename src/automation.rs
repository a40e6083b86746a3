//! The automation seam: one method per desktop operation the CLI forwards to

use crate::error::Result;
use crate::keys::{KeyCode, MouseButton, ScrollDirection, ToggleState};
use screenshots::image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

/// Capture rectangle, relative to the primary display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayInfo {
    pub id: u32,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub scale_factor: f32,
    pub is_primary: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessInfo {
    pub pid: u32,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    /// Lowercase hex without a leading `#`, e.g. `ff8000`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

pub trait Automation {
    // Mouse

    fn mouse_move(&mut self, x: i32, y: i32) -> Result<()>;
    fn mouse_location(&mut self) -> Result<(i32, i32)>;
    fn mouse_click(&mut self, button: MouseButton, double: bool) -> Result<()>;
    fn mouse_scroll(&mut self, direction: ScrollDirection, steps: u32) -> Result<()>;
    fn mouse_toggle(&mut self, button: MouseButton, state: ToggleState) -> Result<()>;

    // Keyboard

    fn type_text(&mut self, text: &str) -> Result<()>;
    /// Hold `modifiers` in order, tap `key`, release modifiers in reverse order
    fn key_tap(&mut self, key: KeyCode, modifiers: &[KeyCode]) -> Result<()>;
    fn key_toggle(&mut self, key: KeyCode, state: ToggleState) -> Result<()>;

    // Screen

    fn screen_size(&mut self) -> Result<Size>;
    fn displays(&mut self) -> Result<Vec<DisplayInfo>>;
    fn capture(&mut self, region: Region) -> Result<RgbaImage>;

    fn pixel_color(&mut self, x: i32, y: i32) -> Result<Rgb> {
        let image = self.capture(Region { x, y, width: 1, height: 1 })?;
        let [r, g, b, _] = image.get_pixel(0, 0).0;
        Ok(Rgb(r, g, b))
    }

    // Windows and processes

    fn activate_window_by_name(&mut self, name: &str) -> Result<()>;
    fn activate_window_by_pid(&mut self, pid: u32) -> Result<()>;
    fn active_window_title(&mut self) -> Result<String>;
    fn kill_process(&mut self, pid: u32) -> Result<()>;
    fn processes(&mut self) -> Result<Vec<ProcessInfo>>;

    // Clipboard

    fn clipboard_read(&mut self) -> Result<String>;
    fn clipboard_write(&mut self, text: &str) -> Result<()>;
}
