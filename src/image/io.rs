//! I/O helpers for 8-bit images and JSON.
//!
//! - `load_image`: read a PNG/JPEG into an owned gray or RGB buffer.
//! - `save_image_u8`: write a 1- or 3-channel buffer to disk.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::ImageU8;
use image::{DynamicImage, GrayImage, RgbImage};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Channel layout requested when decoding an image file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Gray,
    Rgb,
}

impl ColorMode {
    pub fn channels(self) -> usize {
        match self {
            ColorMode::Gray => 1,
            ColorMode::Rgb => 3,
        }
    }
}

/// Load an image from disk and convert it to the requested channel layout.
pub fn load_image(path: &Path, mode: ColorMode) -> Result<ImageU8, String> {
    let img = image::open(path).map_err(|e| format!("Failed to open {}: {e}", path.display()))?;
    let (width, height, data) = match mode {
        ColorMode::Gray => {
            let g = img.into_luma8();
            (g.width() as usize, g.height() as usize, g.into_raw())
        }
        ColorMode::Rgb => {
            let c = img.into_rgb8();
            (c.width() as usize, c.height() as usize, c.into_raw())
        }
    };
    ImageU8::from_raw(width, height, mode.channels(), data)
        .map_err(|e| format!("Failed to load {}: {e}", path.display()))
}

/// Save an 8-bit gray or RGB buffer.
pub fn save_image_u8(buffer: &ImageU8, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let (w, h) = (buffer.w as u32, buffer.h as u32);
    let data = buffer.data.clone();
    let image = match buffer.channels {
        1 => GrayImage::from_raw(w, h, data).map(DynamicImage::ImageLuma8),
        3 => RgbImage::from_raw(w, h, data).map(DynamicImage::ImageRgb8),
        n => return Err(format!("Cannot save image with {n} channels")),
    }
    .ok_or_else(|| "Failed to create image buffer".to_string())?;
    image
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
