//! Grayscale image input

use crate::{Error, Result};

/// An 8-bit grayscale image borrowed from the caller.
///
/// Rows are tightly packed, one byte per pixel.
#[derive(Debug, Clone, Copy)]
pub struct Image<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
}

impl<'a> Image<'a> {
    /// Wrap grayscale data; `data` must hold exactly `width * height` bytes.
    pub fn from_gray(data: &'a [u8], width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidParameter("image dimensions must be non-zero"));
        }
        if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
            return Err(Error::InvalidParameter("image dimensions too large"));
        }
        if (data.len() as u64) != u64::from(width) * u64::from(height) {
            return Err(Error::InvalidParameter(
                "image data length does not match dimensions",
            ));
        }
        Ok(Image {
            data,
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Width and height as the engine's `int` arguments.
    pub(crate) fn dimensions_i32(&self) -> (i32, i32) {
        // Both fit: checked in `from_gray`.
        (self.width as i32, self.height as i32)
    }
}
