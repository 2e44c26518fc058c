//! ICO format parser
//!
//! ICONDIR (6 bytes): reserved 0, type 1, entry count (all u16
//! little-endian), followed by 16-byte ICONDIRENTRY records whose first two
//! bytes are width and height. A stored 0 stands for 256 pixels.

use crate::core::error::SizeResult;
use crate::files::handler::FormatParser;
use crate::types::ImageFormat;
use crate::utils::bytes::{read_u16, read_u8, ByteOrder};

/// Reserved word plus resource type 1 (icon)
const ICO_SIGNATURE: &[u8] = &[0x00, 0x00, 0x01, 0x00];

const ENTRY_COUNT_OFFSET: usize = 4;
const FIRST_ENTRY_OFFSET: usize = 6;

/// ICO format parser
#[derive(Debug, Default, Clone, Copy)]
pub struct IcoHandler;

impl IcoHandler {
    /// ICONDIR plus the first directory entry
    pub const MAX_HEADER_BYTES: usize = 22;
}

fn entry_dimension(value: u8) -> u32 {
    if value == 0 {
        256
    } else {
        value as u32
    }
}

impl FormatParser for IcoHandler {
    fn format(&self) -> ImageFormat {
        ImageFormat::Ico
    }

    fn max_header_bytes(&self) -> usize {
        Self::MAX_HEADER_BYTES
    }

    fn matches(&self, header: &[u8]) -> bool {
        header.starts_with(ICO_SIGNATURE)
            && read_u16(header, ENTRY_COUNT_OFFSET, ByteOrder::LittleEndian).is_ok_and(|n| n > 0)
    }

    fn dimensions(&self, header: &[u8]) -> SizeResult<(u32, u32)> {
        Ok((
            entry_dimension(read_u8(header, FIRST_ENTRY_OFFSET)?),
            entry_dimension(read_u8(header, FIRST_ENTRY_OFFSET + 1)?),
        ))
    }
}
