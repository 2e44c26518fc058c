//! PNG format parser
//!
//! PNG header layout:
//! - Signature: `\x89PNG\r\n\x1a\n` (8 bytes)
//! - First chunk length (4 bytes, big-endian) and type `IHDR` (4 bytes)
//! - IHDR width (offset 16) and height (offset 20), 4 bytes big-endian each

use crate::core::error::SizeResult;
use crate::files::handler::FormatParser;
use crate::types::ImageFormat;
use crate::utils::bytes::{read_u32, ByteOrder};

/// PNG file signature
const PNG_SIGNATURE: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// IHDR chunk type, which must directly follow the signature
const IHDR_CHUNK: &[u8] = b"IHDR";

const WIDTH_OFFSET: usize = 16;
const HEIGHT_OFFSET: usize = 20;

/// PNG format parser
#[derive(Debug, Default, Clone, Copy)]
pub struct PngHandler;

impl PngHandler {
    /// Signature plus IHDR height field
    pub const MAX_HEADER_BYTES: usize = 24;
}

impl FormatParser for PngHandler {
    fn format(&self) -> ImageFormat {
        ImageFormat::Png
    }

    fn max_header_bytes(&self) -> usize {
        Self::MAX_HEADER_BYTES
    }

    fn matches(&self, header: &[u8]) -> bool {
        header.starts_with(PNG_SIGNATURE) && header.get(12..16) == Some(IHDR_CHUNK)
    }

    fn dimensions(&self, header: &[u8]) -> SizeResult<(u32, u32)> {
        Ok((
            read_u32(header, WIDTH_OFFSET, ByteOrder::BigEndian)?,
            read_u32(header, HEIGHT_OFFSET, ByteOrder::BigEndian)?,
        ))
    }
}
