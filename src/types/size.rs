//! Detection result

use crate::types::ImageFormat;
use std::fmt;

/// Pixel dimensions and detected format of an image
///
/// Width and height are always both present; a parser that can determine
/// only one of them reports an error instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageSize {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Format whose parser produced the dimensions
    pub format: ImageFormat,
}

impl ImageSize {
    /// Create a new size result
    pub fn new(width: u32, height: u32, format: ImageFormat) -> Self {
        Self {
            width,
            height,
            format,
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} {}", self.width, self.height, self.format)
    }
}
