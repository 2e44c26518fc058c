//! PSD (Photoshop) format parser
//!
//! ## PSD File Header
//!
//! - Signature: "8BPS" (4 bytes)
//! - Version: 1 (PSD) or 2 (PSB) (2 bytes)
//! - Reserved: 6 bytes (zeros)
//! - Channels: 2 bytes (big-endian)
//! - Height: 4 bytes (big-endian), offset 14
//! - Width: 4 bytes (big-endian), offset 18
//! - Depth: 2 bytes (big-endian)
//! - Color mode: 2 bytes (big-endian)

use crate::core::error::SizeResult;
use crate::files::handler::FormatParser;
use crate::types::ImageFormat;
use crate::utils::bytes::{read_u16, read_u32, ByteOrder};

// PSD signature
const PSD_SIGNATURE: &[u8; 4] = b"8BPS";

const HEIGHT_OFFSET: usize = 14;
const WIDTH_OFFSET: usize = 18;

/// PSD format parser
#[derive(Debug, Default, Clone, Copy)]
pub struct PsdHandler;

impl PsdHandler {
    /// Complete fixed header
    pub const MAX_HEADER_BYTES: usize = 26;
}

impl FormatParser for PsdHandler {
    /// Check "8BPS" at offset 0 and a version of 1 (PSD) or 2 (PSB)
    fn matches(&self, header: &[u8]) -> bool {
        header.starts_with(PSD_SIGNATURE)
            && matches!(read_u16(header, 4, ByteOrder::BigEndian), Ok(1 | 2))
    }

    fn dimensions(&self, header: &[u8]) -> SizeResult<(u32, u32)> {
        // Height precedes width on disk
        let height = read_u32(header, HEIGHT_OFFSET, ByteOrder::BigEndian)?;
        let width = read_u32(header, WIDTH_OFFSET, ByteOrder::BigEndian)?;
        Ok((width, height))
    }

    fn format(&self) -> ImageFormat {
        ImageFormat::Psd
    }

    fn max_header_bytes(&self) -> usize {
        Self::MAX_HEADER_BYTES
    }
}
