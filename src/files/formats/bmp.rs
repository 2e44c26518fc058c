//! BMP format parser
//!
//! BITMAPFILEHEADER (14 bytes) is followed by the DIB header. Width and
//! height are signed 32-bit little-endian values at offsets 18 and 22; a
//! negative height marks a top-down bitmap.

use crate::core::error::SizeResult;
use crate::files::handler::FormatParser;
use crate::types::ImageFormat;
use crate::utils::bytes::{read_i32, ByteOrder};

/// BMP file signature
const BMP_SIGNATURE: &[u8] = b"BM";

const WIDTH_OFFSET: usize = 18;
const HEIGHT_OFFSET: usize = 22;

/// BMP format parser
#[derive(Debug, Default, Clone, Copy)]
pub struct BmpHandler;

impl BmpHandler {
    /// File header plus DIB width and height
    pub const MAX_HEADER_BYTES: usize = 26;
}

impl FormatParser for BmpHandler {
    fn format(&self) -> ImageFormat {
        ImageFormat::Bmp
    }

    fn max_header_bytes(&self) -> usize {
        Self::MAX_HEADER_BYTES
    }

    fn matches(&self, header: &[u8]) -> bool {
        header.starts_with(BMP_SIGNATURE)
    }

    fn dimensions(&self, header: &[u8]) -> SizeResult<(u32, u32)> {
        let width = read_i32(header, WIDTH_OFFSET, ByteOrder::LittleEndian)?;
        let height = read_i32(header, HEIGHT_OFFSET, ByteOrder::LittleEndian)?;
        Ok((width.unsigned_abs(), height.unsigned_abs()))
    }
}
