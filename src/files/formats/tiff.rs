//! TIFF format parser
//!
//! TIFF header: byte-order mark ("II" little-endian or "MM" big-endian),
//! magic 42 and the offset of the first image file directory (IFD). The IFD
//! holds a u16 entry count followed by 12-byte entries:
//! - Tag (2 bytes)
//! - Type (2 bytes): SHORT (3) or LONG (4) for the size tags
//! - Count (4 bytes)
//! - Value, left-aligned in a 4-byte field
//!
//! Every multi-byte field follows the declared byte order.

use crate::core::error::{SizeError, SizeResult};
use crate::files::handler::FormatParser;
use crate::types::ImageFormat;
use crate::utils::bytes::{read_u16, read_u32, ByteOrder};

/// TIFF file header signatures
const TIFF_SIGNATURE_LE: &[u8] = &[0x49, 0x49, 0x2A, 0x00]; // II/42 (little-endian)
const TIFF_SIGNATURE_BE: &[u8] = &[0x4D, 0x4D, 0x00, 0x2A]; // MM/42 (big-endian)

/// TIFF Tag IDs
const TAG_IMAGE_WIDTH: u16 = 256;
const TAG_IMAGE_LENGTH: u16 = 257;

/// TIFF Data Types
const TYPE_SHORT: u16 = 3;
const TYPE_LONG: u16 = 4;

/// Size of an IFD entry in bytes
const IFD_ENTRY_SIZE: usize = 12;

/// TIFF format parser
#[derive(Debug, Default, Clone, Copy)]
pub struct TiffHandler;

impl TiffHandler {
    /// Covers IFDs written right after the header; directories stored at
    /// the end of large files fail with `Truncated`
    pub const MAX_HEADER_BYTES: usize = 8192;

    fn byte_order(header: &[u8]) -> Option<ByteOrder> {
        if header.starts_with(TIFF_SIGNATURE_LE) {
            Some(ByteOrder::LittleEndian)
        } else if header.starts_with(TIFF_SIGNATURE_BE) {
            Some(ByteOrder::BigEndian)
        } else {
            None
        }
    }

    /// Value of a SHORT or LONG entry; `None` for other types
    fn entry_value(header: &[u8], entry: usize, byte_order: ByteOrder) -> SizeResult<Option<u32>> {
        let value = match read_u16(header, entry + 2, byte_order)? {
            TYPE_SHORT => read_u16(header, entry + 8, byte_order)? as u32,
            TYPE_LONG => read_u32(header, entry + 8, byte_order)?,
            _ => return Ok(None),
        };
        Ok(Some(value))
    }
}

impl FormatParser for TiffHandler {
    fn format(&self) -> ImageFormat {
        ImageFormat::Tiff
    }

    fn max_header_bytes(&self) -> usize {
        Self::MAX_HEADER_BYTES
    }

    fn matches(&self, header: &[u8]) -> bool {
        Self::byte_order(header).is_some()
    }

    fn dimensions(&self, header: &[u8]) -> SizeResult<(u32, u32)> {
        let byte_order =
            Self::byte_order(header).ok_or(SizeError::SignatureMismatch(ImageFormat::Tiff))?;

        let ifd_offset = read_u32(header, 4, byte_order)? as usize;
        let entry_count = read_u16(header, ifd_offset, byte_order)? as usize;

        let mut width = None;
        let mut height = None;

        for index in 0..entry_count {
            let entry = ifd_offset.saturating_add(2 + index * IFD_ENTRY_SIZE);
            // Entries may come in any tag order
            match read_u16(header, entry, byte_order)? {
                TAG_IMAGE_WIDTH => width = Self::entry_value(header, entry, byte_order)?,
                TAG_IMAGE_LENGTH => height = Self::entry_value(header, entry, byte_order)?,
                _ => {}
            }

            if let (Some(width), Some(height)) = (width, height) {
                return Ok((width, height));
            }
        }

        Err(SizeError::Malformed(
            "first IFD lacks ImageWidth/ImageLength".to_string(),
        ))
    }
}
