//! `screen` command group
//!
//! `ScreenCommand` prints captures as Base64; `FileScreenCommand` writes them
//! to a PNG file. Everything else is shared.

use super::Reporter;
use crate::automation::Automation;
use crate::capture::{encode_png, resolve_region, to_base64};
use crate::error::{Error, Result};
use clap::{Args, Subcommand};
use serde_json::json;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Args, Debug, Clone)]
pub struct CaptureArgs {
    /// Capture the full screen
    #[arg(long)]
    pub full: bool,
    /// X coordinate of capture
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub x: i32,
    /// Y coordinate of capture
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub y: i32,
    /// Width of capture
    #[arg(long, default_value_t = 100)]
    pub width: u32,
    /// Height of capture
    #[arg(long, default_value_t = 100)]
    pub height: u32,
}

#[derive(Args, Debug, Clone)]
pub struct PointArgs {
    /// X coordinate
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub x: i32,
    /// Y coordinate
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub y: i32,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ScreenCommand {
    /// Capture a portion of the screen and return a Base64 string
    Capture(CaptureArgs),
    /// Get the color of the pixel at given coordinates
    Getpixel(PointArgs),
    /// Get the screen size
    Size,
    /// List connected displays
    Displays,
}

#[derive(Subcommand, Debug, Clone)]
pub enum FileScreenCommand {
    /// Capture a portion of the screen and save it as PNG
    Capture {
        #[command(flatten)]
        area: CaptureArgs,
        /// Output file (default: capture_path from config, screenshot.png)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Get the color of the pixel at given coordinates
    Getpixel(PointArgs),
    /// Get the screen size
    Size,
    /// List connected displays
    Displays,
}

pub fn run<W: Write>(cmd: ScreenCommand, desk: &mut dyn Automation, out: &mut Reporter<W>) -> Result<()> {
    match cmd {
        ScreenCommand::Capture(area) => capture_base64(&area, desk, out),
        ScreenCommand::Getpixel(point) => get_pixel(&point, desk, out),
        ScreenCommand::Size => size(desk, out),
        ScreenCommand::Displays => displays(desk, out),
    }
}

pub fn run_file<W: Write>(
    cmd: FileScreenCommand,
    default_output: &Path,
    desk: &mut dyn Automation,
    out: &mut Reporter<W>,
) -> Result<()> {
    match cmd {
        FileScreenCommand::Capture { area, output } => {
            let path = output.unwrap_or_else(|| default_output.to_path_buf());
            capture_file(&area, &path, desk, out)
        }
        FileScreenCommand::Getpixel(point) => get_pixel(&point, desk, out),
        FileScreenCommand::Size => size(desk, out),
        FileScreenCommand::Displays => displays(desk, out),
    }
}

fn capture_png(area: &CaptureArgs, desk: &mut dyn Automation) -> Result<(u32, u32, Vec<u8>)> {
    let screen = if area.full { desk.screen_size()? } else { Default::default() };
    let region = resolve_region(area.full, area.x, area.y, area.width, area.height, screen)?;
    let image = desk.capture(region)?;
    let png = encode_png(&image)?;
    Ok((image.width(), image.height(), png))
}

fn capture_base64<W: Write>(area: &CaptureArgs, desk: &mut dyn Automation, out: &mut Reporter<W>) -> Result<()> {
    let (width, height, png) = capture_png(area, desk)?;
    let encoded = to_base64(&png);
    out.emit(
        &encoded,
        json!({"format": "png", "width": width, "height": height, "base64": encoded}),
    )
}

fn capture_file<W: Write>(
    area: &CaptureArgs,
    path: &Path,
    desk: &mut dyn Automation,
    out: &mut Reporter<W>,
) -> Result<()> {
    let (width, height, png) = capture_png(area, desk)?;
    fs::write(path, &png)
        .map_err(|e| Error::action_failed(&format!("Writing {}", path.display()), e))?;
    out.emit(
        format!("Saved screenshot to {}", path.display()),
        json!({"path": path, "width": width, "height": height, "bytes": png.len()}),
    )
}

fn get_pixel<W: Write>(point: &PointArgs, desk: &mut dyn Automation, out: &mut Reporter<W>) -> Result<()> {
    let color = desk.pixel_color(point.x, point.y)?;
    out.emit(
        format!("Pixel color at ({}, {}): {}", point.x, point.y, color),
        json!({"x": point.x, "y": point.y, "color": color}),
    )
}

fn size<W: Write>(desk: &mut dyn Automation, out: &mut Reporter<W>) -> Result<()> {
    let size = desk.screen_size()?;
    out.emit(
        format!("Screen size: width={}, height={}", size.width, size.height),
        size,
    )
}

fn displays<W: Write>(desk: &mut dyn Automation, out: &mut Reporter<W>) -> Result<()> {
    let displays = desk.displays()?;
    let lines: Vec<String> = displays
        .iter()
        .map(|d| {
            format!(
                "Display {}: {}x{} at ({}, {}){}",
                d.id,
                d.width,
                d.height,
                d.x,
                d.y,
                if d.is_primary { " primary" } else { "" }
            )
        })
        .collect();
    out.emit_lines(lines, &displays)
}
