//! GIF format parser
//!
//! The logical screen descriptor directly follows the 6-byte signature:
//! width at offset 6 and height at offset 8, 2 bytes little-endian each.

use crate::core::error::SizeResult;
use crate::files::handler::FormatParser;
use crate::types::ImageFormat;
use crate::utils::bytes::{read_u16, ByteOrder};

/// GIF file signatures
const GIF_SIGNATURE_87A: &[u8] = b"GIF87a";
const GIF_SIGNATURE_89A: &[u8] = b"GIF89a";

/// GIF format parser
#[derive(Debug, Default, Clone, Copy)]
pub struct GifHandler;

impl GifHandler {
    /// Signature plus logical screen width and height
    pub const MAX_HEADER_BYTES: usize = 10;
}

impl FormatParser for GifHandler {
    fn format(&self) -> ImageFormat {
        ImageFormat::Gif
    }

    fn max_header_bytes(&self) -> usize {
        Self::MAX_HEADER_BYTES
    }

    fn matches(&self, header: &[u8]) -> bool {
        header.starts_with(GIF_SIGNATURE_87A) || header.starts_with(GIF_SIGNATURE_89A)
    }

    fn dimensions(&self, header: &[u8]) -> SizeResult<(u32, u32)> {
        Ok((
            read_u16(header, 6, ByteOrder::LittleEndian)? as u32,
            read_u16(header, 8, ByteOrder::LittleEndian)? as u32,
        ))
    }
}
