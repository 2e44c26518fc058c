//! Format parsers
//!
//! Each parser implements signature checking and size extraction for one
//! image format over a header slice. All parsers are pure Rust and never
//! read past the bytes they are given.

#[cfg(feature = "bmp")]
pub mod bmp;
#[cfg(feature = "gif")]
pub mod gif;
#[cfg(feature = "ico")]
pub mod ico;
#[cfg(feature = "iff")]
pub mod iff;
#[cfg(feature = "jp2")]
pub mod jp2;
#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png")]
pub mod png;
#[cfg(feature = "psd")]
pub mod psd;
#[cfg(feature = "tiff")]
pub mod tiff;
#[cfg(feature = "wbmp")]
pub mod wbmp;
