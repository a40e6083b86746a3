//! Screen capture helpers: region resolution and PNG/Base64 encoding

use crate::automation::{Region, Size};
use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use screenshots::image::{ImageOutputFormat, RgbaImage};
use std::io::Cursor;

/// Resolve the area to capture. `full` ignores the other values and takes the
/// whole primary display.
pub fn resolve_region(full: bool, x: i32, y: i32, width: u32, height: u32, screen: Size) -> Result<Region> {
    let region = if full {
        Region {
            x: 0,
            y: 0,
            width: screen.width,
            height: screen.height,
        }
    } else {
        Region { x, y, width, height }
    };

    if region.width == 0 || region.height == 0 {
        return Err(Error::invalid_argument(format!(
            "Capture area must not be empty ({}x{})",
            region.width, region.height
        )));
    }
    Ok(region)
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut png = Cursor::new(Vec::new());
    image
        .write_to(&mut png, ImageOutputFormat::Png)
        .map_err(|e| Error::capture_failed(format!("PNG encoding: {}", e)))?;
    Ok(png.into_inner())
}

pub fn to_base64(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}
