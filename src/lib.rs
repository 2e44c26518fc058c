//! # peeksize
//!
//! Determine the width, height and format of an image by reading only a
//! bounded prefix of it.
//!
//! Supported formats: JPEG, PNG, GIF, JPEG 2000, PSD, BMP, TIFF, IFF, ICO
//! and WBMP.
//!
//! ## Features
//!
//! - **Bounded reads**: each format declares the most header bytes it will
//!   ever need; nothing past that is fetched
//! - **Hints**: an extension or MIME type selects the parser directly, with
//!   trial detection as the fallback
//! - **Pluggable I/O**: network resources go through a [`StreamTransport`],
//!   local files through a [`RangeReader`]
//! - **Thread-safe**: an [`ImageProbe`] keeps no per-image state
//! - **Per-format features**: each parser sits behind a cargo feature of
//!   the same name (`jpeg`, `png`, ...); `full-formats` (default) enables
//!   all of them
//!
//! ## Example
//!
//! ```rust,no_run
//! use peeksize::{get_image_size, ImageFormat};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let size = get_image_size("photo.jpg", "")?;
//! assert_eq!(size.format, ImageFormat::Jpeg);
//! println!("{}", size);
//! # Ok(())
//! # }
//! ```
//!
//! In-memory data:
//!
//! ```rust
//! use peeksize::{ImageFormat, ImageProbe, ImageSize};
//!
//! let gif = b"GIF89a\x10\x00\x20\x00\x00\x00\x00";
//! let size = ImageProbe::new().size_from_bytes(gif, "").unwrap();
//! assert_eq!(size, ImageSize::new(16, 32, ImageFormat::Gif));
//! ```

pub mod core;
pub mod files;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use crate::core::error::{SizeError, SizeResult};
#[cfg(feature = "jpeg")]
pub use files::JpegScanState;
pub use files::{
    get_image_size, FileRangeReader, FormatParser, ImageProbe, ProbeOptions, RangeReader,
    StreamTransport,
};
pub use types::{ImageFormat, ImageSize};
