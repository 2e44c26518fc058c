//! IFF format parser
//!
//! Two flavors share the chunk structure (4-byte id, 4-byte big-endian
//! length, body):
//! - Amiga `FORM` files (`ILBM`, `PBM `): the `BMHD` chunk starts with u16
//!   width and height. In a standard file it is the first chunk, putting
//!   width at offset 20 and height at 22.
//! - Maya `FOR4` files (`CIMG`): the `TBHD` chunk starts with u32 width
//!   and height; chunks are 4-byte aligned.

use crate::core::error::{SizeError, SizeResult};
use crate::files::handler::FormatParser;
use crate::types::ImageFormat;
use crate::utils::bytes::{read_u16, read_u32, slice, ByteOrder};

/// IFF container signatures
const IFF_SIGNATURE_AMIGA: &[u8] = b"FORM";
const IFF_SIGNATURE_MAYA: &[u8] = b"FOR4";

/// Bitmap header chunk ids
const CHUNK_BMHD: &[u8] = b"BMHD";
const CHUNK_TBHD: &[u8] = b"TBHD";

/// First chunk after the container id, length and form type
const FIRST_CHUNK_OFFSET: usize = 12;

/// IFF format parser
#[derive(Debug, Default, Clone, Copy)]
pub struct IffHandler;

impl IffHandler {
    /// Room for a few chunks ahead of the bitmap header
    pub const MAX_HEADER_BYTES: usize = 1024;

    /// Offset of the body of chunk `id`
    fn find_chunk(header: &[u8], id: &[u8], alignment: usize) -> SizeResult<usize> {
        let mut offset = FIRST_CHUNK_OFFSET;
        loop {
            let chunk_id = slice(header, offset, 4)?;
            let length = read_u32(header, offset + 4, ByteOrder::BigEndian)? as usize;
            if chunk_id == id {
                return Ok(offset + 8);
            }
            offset = length
                .div_ceil(alignment)
                .checked_mul(alignment)
                .and_then(|padded| padded.checked_add(8))
                .and_then(|step| offset.checked_add(step))
                .ok_or_else(|| SizeError::Malformed("IFF chunk length overflows".to_string()))?;
        }
    }
}

impl FormatParser for IffHandler {
    fn format(&self) -> ImageFormat {
        ImageFormat::Iff
    }

    fn max_header_bytes(&self) -> usize {
        Self::MAX_HEADER_BYTES
    }

    fn matches(&self, header: &[u8]) -> bool {
        header.starts_with(IFF_SIGNATURE_AMIGA) || header.starts_with(IFF_SIGNATURE_MAYA)
    }

    fn dimensions(&self, header: &[u8]) -> SizeResult<(u32, u32)> {
        if header.starts_with(IFF_SIGNATURE_MAYA) {
            let body = Self::find_chunk(header, CHUNK_TBHD, 4)?;
            return Ok((
                read_u32(header, body, ByteOrder::BigEndian)?,
                read_u32(header, body + 4, ByteOrder::BigEndian)?,
            ));
        }

        let body = Self::find_chunk(header, CHUNK_BMHD, 2)?;
        Ok((
            read_u16(header, body, ByteOrder::BigEndian)? as u32,
            read_u16(header, body + 2, ByteOrder::BigEndian)? as u32,
        ))
    }
}
