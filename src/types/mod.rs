//! Value types
//!
//! This module defines the format identifiers and the size result returned
//! by every detection call.

pub mod format;
pub mod size;

pub use format::ImageFormat;
pub use size::ImageSize;
