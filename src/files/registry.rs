//! Format registry
//!
//! A compile-time table mapping each [`ImageFormat`] to its aliases, header
//! ceiling and parser, plus the fixed order used for trial detection.

use crate::core::error::{SizeError, SizeResult};
#[cfg(feature = "jpeg")]
use crate::files::formats::jpeg::JpegHandler;
#[cfg(feature = "png")]
use crate::files::formats::png::PngHandler;
#[cfg(feature = "gif")]
use crate::files::formats::gif::GifHandler;
#[cfg(feature = "jp2")]
use crate::files::formats::jp2::Jp2Handler;
#[cfg(feature = "psd")]
use crate::files::formats::psd::PsdHandler;
#[cfg(feature = "bmp")]
use crate::files::formats::bmp::BmpHandler;
#[cfg(feature = "tiff")]
use crate::files::formats::tiff::TiffHandler;
#[cfg(feature = "iff")]
use crate::files::formats::iff::IffHandler;
#[cfg(feature = "ico")]
use crate::files::formats::ico::IcoHandler;
#[cfg(feature = "wbmp")]
use crate::files::formats::wbmp::WbmpHandler;
use crate::files::handler::FormatParser;
use crate::types::{ImageFormat, ImageSize};
use log::debug;

/// Enum of format parsers compiled into this build
#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub enum Handler {
    #[cfg(feature = "jpeg")]
    Jpeg(JpegHandler),
    #[cfg(feature = "png")]
    Png(PngHandler),
    #[cfg(feature = "gif")]
    Gif(GifHandler),
    #[cfg(feature = "jp2")]
    Jp2(Jp2Handler),
    #[cfg(feature = "psd")]
    Psd(PsdHandler),
    #[cfg(feature = "bmp")]
    Bmp(BmpHandler),
    #[cfg(feature = "tiff")]
    Tiff(TiffHandler),
    #[cfg(feature = "iff")]
    Iff(IffHandler),
    #[cfg(feature = "ico")]
    Ico(IcoHandler),
    #[cfg(feature = "wbmp")]
    Wbmp(WbmpHandler),
}

impl Handler {
    /// Parser for `format`, or `None` when its cargo feature is disabled
    #[allow(unreachable_patterns)]
    pub const fn for_format(format: ImageFormat) -> Option<Self> {
        match format {
            #[cfg(feature = "jpeg")]
            ImageFormat::Jpeg => Some(Handler::Jpeg(JpegHandler)),
            #[cfg(feature = "png")]
            ImageFormat::Png => Some(Handler::Png(PngHandler)),
            #[cfg(feature = "gif")]
            ImageFormat::Gif => Some(Handler::Gif(GifHandler)),
            #[cfg(feature = "jp2")]
            ImageFormat::Jp2 => Some(Handler::Jp2(Jp2Handler)),
            #[cfg(feature = "psd")]
            ImageFormat::Psd => Some(Handler::Psd(PsdHandler)),
            #[cfg(feature = "bmp")]
            ImageFormat::Bmp => Some(Handler::Bmp(BmpHandler)),
            #[cfg(feature = "tiff")]
            ImageFormat::Tiff => Some(Handler::Tiff(TiffHandler)),
            #[cfg(feature = "iff")]
            ImageFormat::Iff => Some(Handler::Iff(IffHandler)),
            #[cfg(feature = "ico")]
            ImageFormat::Ico => Some(Handler::Ico(IcoHandler)),
            #[cfg(feature = "wbmp")]
            ImageFormat::Wbmp => Some(Handler::Wbmp(WbmpHandler)),
            _ => None,
        }
    }
}

impl FormatParser for Handler {
    fn format(&self) -> ImageFormat {
        match *self {
            #[cfg(feature = "jpeg")]
            Handler::Jpeg(h) => h.format(),
            #[cfg(feature = "png")]
            Handler::Png(h) => h.format(),
            #[cfg(feature = "gif")]
            Handler::Gif(h) => h.format(),
            #[cfg(feature = "jp2")]
            Handler::Jp2(h) => h.format(),
            #[cfg(feature = "psd")]
            Handler::Psd(h) => h.format(),
            #[cfg(feature = "bmp")]
            Handler::Bmp(h) => h.format(),
            #[cfg(feature = "tiff")]
            Handler::Tiff(h) => h.format(),
            #[cfg(feature = "iff")]
            Handler::Iff(h) => h.format(),
            #[cfg(feature = "ico")]
            Handler::Ico(h) => h.format(),
            #[cfg(feature = "wbmp")]
            Handler::Wbmp(h) => h.format(),
        }
    }

    fn max_header_bytes(&self) -> usize {
        match *self {
            #[cfg(feature = "jpeg")]
            Handler::Jpeg(h) => h.max_header_bytes(),
            #[cfg(feature = "png")]
            Handler::Png(h) => h.max_header_bytes(),
            #[cfg(feature = "gif")]
            Handler::Gif(h) => h.max_header_bytes(),
            #[cfg(feature = "jp2")]
            Handler::Jp2(h) => h.max_header_bytes(),
            #[cfg(feature = "psd")]
            Handler::Psd(h) => h.max_header_bytes(),
            #[cfg(feature = "bmp")]
            Handler::Bmp(h) => h.max_header_bytes(),
            #[cfg(feature = "tiff")]
            Handler::Tiff(h) => h.max_header_bytes(),
            #[cfg(feature = "iff")]
            Handler::Iff(h) => h.max_header_bytes(),
            #[cfg(feature = "ico")]
            Handler::Ico(h) => h.max_header_bytes(),
            #[cfg(feature = "wbmp")]
            Handler::Wbmp(h) => h.max_header_bytes(),
        }
    }

    fn matches(&self, header: &[u8]) -> bool {
        match *self {
            #[cfg(feature = "jpeg")]
            Handler::Jpeg(h) => h.matches(header),
            #[cfg(feature = "png")]
            Handler::Png(h) => h.matches(header),
            #[cfg(feature = "gif")]
            Handler::Gif(h) => h.matches(header),
            #[cfg(feature = "jp2")]
            Handler::Jp2(h) => h.matches(header),
            #[cfg(feature = "psd")]
            Handler::Psd(h) => h.matches(header),
            #[cfg(feature = "bmp")]
            Handler::Bmp(h) => h.matches(header),
            #[cfg(feature = "tiff")]
            Handler::Tiff(h) => h.matches(header),
            #[cfg(feature = "iff")]
            Handler::Iff(h) => h.matches(header),
            #[cfg(feature = "ico")]
            Handler::Ico(h) => h.matches(header),
            #[cfg(feature = "wbmp")]
            Handler::Wbmp(h) => h.matches(header),
        }
    }

    fn dimensions(&self, header: &[u8]) -> SizeResult<(u32, u32)> {
        match *self {
            #[cfg(feature = "jpeg")]
            Handler::Jpeg(h) => h.dimensions(header),
            #[cfg(feature = "png")]
            Handler::Png(h) => h.dimensions(header),
            #[cfg(feature = "gif")]
            Handler::Gif(h) => h.dimensions(header),
            #[cfg(feature = "jp2")]
            Handler::Jp2(h) => h.dimensions(header),
            #[cfg(feature = "psd")]
            Handler::Psd(h) => h.dimensions(header),
            #[cfg(feature = "bmp")]
            Handler::Bmp(h) => h.dimensions(header),
            #[cfg(feature = "tiff")]
            Handler::Tiff(h) => h.dimensions(header),
            #[cfg(feature = "iff")]
            Handler::Iff(h) => h.dimensions(header),
            #[cfg(feature = "ico")]
            Handler::Ico(h) => h.dimensions(header),
            #[cfg(feature = "wbmp")]
            Handler::Wbmp(h) => h.dimensions(header),
        }
    }
}

/// Static description of a supported format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatDescriptor {
    /// Canonical format
    pub id: ImageFormat,
    /// Lowercase extensions and MIME subtypes resolving to `id`
    pub aliases: &'static [&'static str],
    /// Ceiling on the bytes ever fetched for this format
    pub max_header_bytes: usize,
}

#[allow(dead_code)]
const fn describe(id: ImageFormat, max_header_bytes: usize) -> FormatDescriptor {
    FormatDescriptor {
        id,
        aliases: id.aliases(),
        max_header_bytes,
    }
}

/// Descriptors of the enabled formats, in trial order.
///
/// Most common formats come first. WBMP has no magic number and stays
/// last; ICO precedes it because both start with two zero bytes. Changing
/// the order changes which format wins on ambiguous input.
pub const DESCRIPTORS: &[FormatDescriptor] = &[
    #[cfg(feature = "jpeg")]
    describe(ImageFormat::Jpeg, JpegHandler::MAX_HEADER_BYTES),
    #[cfg(feature = "png")]
    describe(ImageFormat::Png, PngHandler::MAX_HEADER_BYTES),
    #[cfg(feature = "gif")]
    describe(ImageFormat::Gif, GifHandler::MAX_HEADER_BYTES),
    #[cfg(feature = "jp2")]
    describe(ImageFormat::Jp2, Jp2Handler::MAX_HEADER_BYTES),
    #[cfg(feature = "psd")]
    describe(ImageFormat::Psd, PsdHandler::MAX_HEADER_BYTES),
    #[cfg(feature = "bmp")]
    describe(ImageFormat::Bmp, BmpHandler::MAX_HEADER_BYTES),
    #[cfg(feature = "tiff")]
    describe(ImageFormat::Tiff, TiffHandler::MAX_HEADER_BYTES),
    #[cfg(feature = "iff")]
    describe(ImageFormat::Iff, IffHandler::MAX_HEADER_BYTES),
    #[cfg(feature = "ico")]
    describe(ImageFormat::Ico, IcoHandler::MAX_HEADER_BYTES),
    #[cfg(feature = "wbmp")]
    describe(ImageFormat::Wbmp, WbmpHandler::MAX_HEADER_BYTES),
];

/// Descriptor of `format`, if enabled
pub fn descriptor(format: ImageFormat) -> Option<&'static FormatDescriptor> {
    DESCRIPTORS.iter().find(|d| d.id == format)
}

/// Enabled formats in the order trial detection tests them
pub fn trial_order() -> impl Iterator<Item = ImageFormat> {
    DESCRIPTORS.iter().map(|d| d.id)
}

/// Header ceiling of `format`, if enabled
pub fn max_header_bytes(format: ImageFormat) -> Option<usize> {
    descriptor(format).map(|d| d.max_header_bytes)
}

/// Largest header ceiling across the enabled formats
pub fn largest_header_bytes() -> usize {
    DESCRIPTORS
        .iter()
        .map(|d| d.max_header_bytes)
        .max()
        .unwrap_or(0)
}

/// Find a format by file extension or MIME subtype
///
/// # Arguments
///
/// * `alias` - Extension or MIME subtype (e.g., "jpg", "PNG", "x-icon")
///
/// # Returns
///
/// * `Some(ImageFormat)` if an alias matches, ignoring ASCII case
/// * `None` otherwise
pub fn by_alias(alias: &str) -> Option<ImageFormat> {
    let alias = alias.trim();
    DESCRIPTORS
        .iter()
        .find(|d| d.aliases.iter().any(|a| a.eq_ignore_ascii_case(alias)))
        .map(|d| d.id)
}

/// Find a format by trial detection over an already fetched header
///
/// Tests every format in [`trial_order`] against the same bytes and returns
/// the first whose parser yields both dimensions.
pub fn find_by_detection(header: &[u8]) -> SizeResult<ImageSize> {
    for handler in trial_order().filter_map(Handler::for_format) {
        let format = handler.format();
        if !handler.matches(header) {
            continue;
        }
        match handler.parse(header) {
            Ok(size) => {
                debug!("detected {} ({}x{})", format, size.width, size.height);
                return Ok(size);
            }
            Err(e) => debug!("{} signature matched but parsing failed: {}", format, e),
        }
    }

    Err(SizeError::Unsupported(
        "no registered format matched the header".to_string(),
    ))
}
