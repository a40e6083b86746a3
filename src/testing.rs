//! In-memory `Automation` used by the command tests

use crate::automation::{Automation, DisplayInfo, ProcessInfo, Region, Size};
use crate::error::{Error, Result};
use crate::keys::{KeyCode, MouseButton, ScrollDirection, ToggleState};
use screenshots::image::{Rgba, RgbaImage};

/// Every call the fake received, in order
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    MouseMove(i32, i32),
    MouseClick(MouseButton, bool),
    MouseScroll(ScrollDirection, u32),
    MouseToggle(MouseButton, ToggleState),
    TypeText(String),
    KeyTap(KeyCode, Vec<KeyCode>),
    KeyToggle(KeyCode, ToggleState),
    Capture(Region),
    ActivateName(String),
    ActivatePid(u32),
    Kill(u32),
    ClipboardWrite(String),
}

pub struct FakeDesktop {
    pub calls: Vec<Call>,
    pub location: (i32, i32),
    pub screen: Size,
    pub fill: Rgba<u8>,
    pub title: String,
    pub clipboard: String,
    pub processes: Vec<ProcessInfo>,
    /// When set, every call fails with this error
    pub fail_with: Option<Error>,
}

impl Default for FakeDesktop {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            location: (0, 0),
            screen: Size { width: 1280, height: 720 },
            fill: Rgba([0x12, 0x34, 0x56, 0xff]),
            title: "Terminal".to_string(),
            clipboard: String::new(),
            processes: Vec::new(),
            fail_with: None,
        }
    }
}

impl FakeDesktop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(err: Error) -> Self {
        Self { fail_with: Some(err), ..Self::default() }
    }

    fn record(&mut self, call: Call) -> Result<()> {
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        self.calls.push(call);
        Ok(())
    }

    fn check(&self) -> Result<()> {
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

impl Automation for FakeDesktop {
    fn mouse_move(&mut self, x: i32, y: i32) -> Result<()> {
        self.record(Call::MouseMove(x, y))?;
        self.location = (x, y);
        Ok(())
    }

    fn mouse_location(&mut self) -> Result<(i32, i32)> {
        self.check()?;
        Ok(self.location)
    }

    fn mouse_click(&mut self, button: MouseButton, double: bool) -> Result<()> {
        self.record(Call::MouseClick(button, double))
    }

    fn mouse_scroll(&mut self, direction: ScrollDirection, steps: u32) -> Result<()> {
        self.record(Call::MouseScroll(direction, steps))
    }

    fn mouse_toggle(&mut self, button: MouseButton, state: ToggleState) -> Result<()> {
        self.record(Call::MouseToggle(button, state))
    }

    fn type_text(&mut self, text: &str) -> Result<()> {
        self.record(Call::TypeText(text.to_string()))
    }

    fn key_tap(&mut self, key: KeyCode, modifiers: &[KeyCode]) -> Result<()> {
        self.record(Call::KeyTap(key, modifiers.to_vec()))
    }

    fn key_toggle(&mut self, key: KeyCode, state: ToggleState) -> Result<()> {
        self.record(Call::KeyToggle(key, state))
    }

    fn screen_size(&mut self) -> Result<Size> {
        self.check()?;
        Ok(self.screen)
    }

    fn displays(&mut self) -> Result<Vec<DisplayInfo>> {
        self.check()?;
        Ok(vec![
            DisplayInfo {
                id: 1,
                x: 0,
                y: 0,
                width: self.screen.width,
                height: self.screen.height,
                scale_factor: 1.0,
                is_primary: true,
            },
            DisplayInfo {
                id: 2,
                x: self.screen.width as i32,
                y: 0,
                width: 800,
                height: 600,
                scale_factor: 2.0,
                is_primary: false,
            },
        ])
    }

    fn capture(&mut self, region: Region) -> Result<RgbaImage> {
        self.record(Call::Capture(region))?;
        Ok(RgbaImage::from_pixel(region.width, region.height, self.fill))
    }

    fn activate_window_by_name(&mut self, name: &str) -> Result<()> {
        self.record(Call::ActivateName(name.to_string()))
    }

    fn activate_window_by_pid(&mut self, pid: u32) -> Result<()> {
        self.record(Call::ActivatePid(pid))
    }

    fn active_window_title(&mut self) -> Result<String> {
        self.check()?;
        Ok(self.title.clone())
    }

    fn kill_process(&mut self, pid: u32) -> Result<()> {
        self.record(Call::Kill(pid))
    }

    fn processes(&mut self) -> Result<Vec<ProcessInfo>> {
        self.check()?;
        Ok(self.processes.clone())
    }

    fn clipboard_read(&mut self) -> Result<String> {
        self.check()?;
        Ok(self.clipboard.clone())
    }

    fn clipboard_write(&mut self, text: &str) -> Result<()> {
        self.record(Call::ClipboardWrite(text.to_string()))?;
        self.clipboard = text.to_string();
        Ok(())
    }
}
