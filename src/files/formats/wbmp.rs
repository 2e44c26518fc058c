//! WBMP format parser
//!
//! Type 0 wireless bitmaps carry no magic number:
//! - Type field: multi-byte integer, 0 for monochrome bitmaps (1 byte)
//! - Fixed header: 0 (1 byte)
//! - Width, height: multi-byte integers
//!
//! A multi-byte integer stores 7 bits per byte, most significant group
//! first; a set high bit means another byte follows.

use crate::core::error::{SizeError, SizeResult};
use crate::files::handler::FormatParser;
use crate::types::ImageFormat;
use crate::utils::bytes::read_u8;

/// Longest accepted multi-byte integer (28 bits)
const MAX_INTEGER_BYTES: usize = 4;

const DIMENSIONS_OFFSET: usize = 2;

/// WBMP format parser
#[derive(Debug, Default, Clone, Copy)]
pub struct WbmpHandler;

impl WbmpHandler {
    /// Two header bytes plus two maximal multi-byte integers
    pub const MAX_HEADER_BYTES: usize = DIMENSIONS_OFFSET + 2 * MAX_INTEGER_BYTES;
}

/// Decode a multi-byte integer at `*offset`, advancing past it
fn read_multi_byte(header: &[u8], offset: &mut usize) -> SizeResult<u32> {
    let mut value = 0u32;
    for _ in 0..MAX_INTEGER_BYTES {
        let byte = read_u8(header, *offset)?;
        *offset += 1;
        value = (value << 7) | (byte & 0x7F) as u32;
        if byte & 0x80 == 0 {
            return Ok(value);
        }
    }
    Err(SizeError::Malformed(format!(
        "WBMP integer longer than {} bytes",
        MAX_INTEGER_BYTES
    )))
}

impl FormatParser for WbmpHandler {
    fn format(&self) -> ImageFormat {
        ImageFormat::Wbmp
    }

    fn max_header_bytes(&self) -> usize {
        Self::MAX_HEADER_BYTES
    }

    fn matches(&self, header: &[u8]) -> bool {
        header.len() > DIMENSIONS_OFFSET && header[0] == 0 && header[1] == 0
    }

    fn dimensions(&self, header: &[u8]) -> SizeResult<(u32, u32)> {
        let mut offset = DIMENSIONS_OFFSET;
        let width = read_multi_byte(header, &mut offset)?;
        let height = read_multi_byte(header, &mut offset)?;

        // Without a magic number an empty bitmap is far more likely to be
        // some other zero-prefixed file
        if width == 0 || height == 0 {
            return Err(SizeError::Malformed("WBMP with zero dimension".to_string()));
        }
        Ok((width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(mut value: u32) -> Vec<u8> {
        let mut groups = vec![(value & 0x7F) as u8];
        value >>= 7;
        while value > 0 {
            groups.push((value & 0x7F) as u8 | 0x80);
            value >>= 7;
        }
        groups.reverse();
        groups
    }

    fn create_test_wbmp(width: u32, height: u32) -> Vec<u8> {
        let mut data = vec![0x00, 0x00];
        data.extend(encode(width));
        data.extend(encode(height));
        data
    }

    #[test]
    fn test_parse_single_byte_dimensions() {
        let size = WbmpHandler.parse(&create_test_wbmp(100, 50)).unwrap();
        assert_eq!((size.width, size.height), (100, 50));
        assert_eq!(size.format, ImageFormat::Wbmp);
    }

    #[test]
    fn test_parse_multi_byte_dimensions() {
        let data = create_test_wbmp(300, 20_000);
        assert_eq!(&data[2..4], &[0x82, 0x2C]);

        let size = WbmpHandler.parse(&data).unwrap();
        assert_eq!((size.width, size.height), (300, 20_000));
    }

    #[test]
    fn test_integer_too_long() {
        let data = [0x00, 0x00, 0x81, 0x80, 0x80, 0x80, 0x01, 0x01];
        assert!(matches!(
            WbmpHandler.parse(&data),
            Err(SizeError::Malformed(_))
        ));
    }

    #[test]
    fn test_zero_dimension() {
        assert!(WbmpHandler.parse(&[0x00, 0x00, 0x00, 0x10]).is_err());
    }

    #[test]
    fn test_truncated() {
        assert!(WbmpHandler.parse(&[0x00, 0x00, 0x81]).is_err());
        assert!(WbmpHandler.parse(&[0x00, 0x00, 0x10]).is_err());
        assert!(!WbmpHandler.matches(&[0x00, 0x00]));
    }

    #[test]
    fn test_signature() {
        assert!(!WbmpHandler.matches(&[0x01, 0x00, 0x10, 0x10]));
        assert!(!WbmpHandler.matches(&[0x00, 0x80, 0x10, 0x10]));
    }
}
