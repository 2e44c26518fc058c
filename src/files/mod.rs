//! Image format support
//!
//! This module provides header fetching, the format registry and one parser
//! per supported image format. All implementations are pure Rust and only
//! ever read a bounded prefix of the resource.

pub mod file;
pub mod formats;
pub mod handler;
pub mod registry;
pub mod source;

pub use file::{get_image_size, ImageProbe};
#[cfg(feature = "bmp")]
pub use formats::bmp::BmpHandler;
#[cfg(feature = "gif")]
pub use formats::gif::GifHandler;
#[cfg(feature = "ico")]
pub use formats::ico::IcoHandler;
#[cfg(feature = "iff")]
pub use formats::iff::IffHandler;
#[cfg(feature = "jp2")]
pub use formats::jp2::Jp2Handler;
#[cfg(feature = "jpeg")]
pub use formats::jpeg::{JpegHandler, JpegScanState};
#[cfg(feature = "png")]
pub use formats::png::PngHandler;
#[cfg(feature = "psd")]
pub use formats::psd::PsdHandler;
#[cfg(feature = "tiff")]
pub use formats::tiff::TiffHandler;
#[cfg(feature = "wbmp")]
pub use formats::wbmp::WbmpHandler;
pub use handler::{FormatParser, ProbeOptions};
pub use registry::{FormatDescriptor, Handler};
pub use source::{FileRangeReader, ImageHandle, RangeReader, StreamTransport};
