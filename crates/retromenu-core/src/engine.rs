//! Emulation engine seam
//!
//! The menu never steps frames itself; it only pauses, resumes, resets and
//! moves opaque state blobs through this trait.

use std::path::Path;

use crate::error::{MenuError, Result};

/// Captured frame, RGBA8 row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screenshot {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl Screenshot {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Self {
        Self {
            width,
            height,
            rgba,
        }
    }

    /// Encode as PNG at `path`
    pub fn write_png(&self, path: &Path) -> Result<()> {
        let buffer = image::RgbaImage::from_raw(self.width, self.height, self.rgba.clone())
            .ok_or_else(|| {
                MenuError::Image(format!(
                    "buffer of {} bytes does not fit {}x{}",
                    self.rgba.len(),
                    self.width,
                    self.height
                ))
            })?;
        buffer.save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }

    /// Decode a PNG written by [`Screenshot::write_png`]
    pub fn read_png(path: &Path) -> Result<Self> {
        let decoded = image::open(path)?.to_rgba8();
        let (width, height) = decoded.dimensions();
        Ok(Self::new(width, height, decoded.into_raw()))
    }
}

/// Operations the menu needs from the running core
pub trait Engine: Send + Sync {
    fn pause(&self);

    /// Resume at the given speed multiplier (1 = normal)
    fn resume(&self, speed: u32);

    fn reset(&self);

    fn serialize_state(&self) -> Vec<u8>;

    /// False when the blob was rejected
    fn unserialize_state(&self, state: &[u8]) -> bool;

    /// Called synchronously before pause so the frame is the one the player saw
    fn capture_screenshot(&self) -> Option<Screenshot>;
}
