//! JPEG 2000 format parser
//!
//! JP2 files are a sequence of boxes:
//! - LBox: 4 bytes big-endian (0 = to end of file, 1 = 8-byte XLBox follows)
//! - TBox: 4-byte type
//!
//! The signature box comes first; the header superbox `jp2h` contains the
//! image header box `ihdr` whose payload starts with HEIGHT then WIDTH (4
//! bytes big-endian each).
//!
//! Raw codestreams (.j2k) have no boxes and start with SOC (`FF4F`) directly
//! followed by SIZ (`FF51`), whose reference grid size minus the image offset
//! gives the dimensions. JP2 files whose header box lies outside the fetched
//! prefix fall back to the SIZ of the embedded codestream.

use crate::core::error::{SizeError, SizeResult};
use crate::files::handler::FormatParser;
use crate::types::ImageFormat;
use crate::utils::bytes::{array, read_u32, read_u64_be, ByteOrder};

/// JP2 signature box
const JP2_SIGNATURE: &[u8] = &[
    0x00, 0x00, 0x00, 0x0C, 0x6A, 0x50, 0x20, 0x20, 0x0D, 0x0A, 0x87, 0x0A,
];

/// SOC marker followed by the SIZ marker
const J2K_CODESTREAM: &[u8] = &[0xFF, 0x4F, 0xFF, 0x51];

const BOX_JP2_HEADER: &[u8; 4] = b"jp2h";
const BOX_IMAGE_HEADER: &[u8; 4] = b"ihdr";

/// JPEG 2000 format parser
#[derive(Debug, Default, Clone, Copy)]
pub struct Jp2Handler;

impl Jp2Handler {
    /// Leaves room for ftyp, rreq and similar boxes ahead of jp2h
    pub const MAX_HEADER_BYTES: usize = 8192;
}

/// Box header position within the buffer
#[derive(Debug)]
struct Jp2Box {
    kind: [u8; 4],
    /// Offset of the payload
    body: usize,
    /// Offset one past the last payload byte
    end: usize,
}

fn read_box(header: &[u8], offset: usize, limit: usize) -> SizeResult<Jp2Box> {
    let lbox = read_u32(header, offset, ByteOrder::BigEndian)?;
    let kind = array::<4>(header, offset + 4)?;

    let (header_len, len) = match lbox {
        0 => (8, limit.saturating_sub(offset)),
        1 => {
            let xlbox = read_u64_be(header, offset + 8)?;
            let len = usize::try_from(xlbox)
                .map_err(|_| SizeError::Malformed("JP2 box length overflows".to_string()))?;
            (16, len)
        }
        n => (8, n as usize),
    };

    if len < header_len {
        return Err(SizeError::Malformed(format!(
            "JP2 box length {} shorter than its header",
            len
        )));
    }

    let end = offset
        .checked_add(len)
        .ok_or_else(|| SizeError::Malformed("JP2 box length overflows".to_string()))?;

    Ok(Jp2Box {
        kind,
        body: offset + header_len,
        end,
    })
}

/// Find the first box of `kind` among the siblings in `[start, end)`
fn find_box(header: &[u8], start: usize, end: usize, kind: &[u8; 4]) -> SizeResult<Jp2Box> {
    let mut offset = start;
    while offset < end {
        let found = read_box(header, offset, end)?;
        if &found.kind == kind {
            return Ok(found);
        }
        offset = found.end;
    }
    Err(SizeError::Malformed(format!(
        "no '{}' box found",
        String::from_utf8_lossy(kind)
    )))
}

/// Dimensions from the SIZ segment of a codestream starting at `soc`
fn siz_dimensions(header: &[u8], soc: usize) -> SizeResult<(u32, u32)> {
    let x_size = read_u32(header, soc + 8, ByteOrder::BigEndian)?;
    let y_size = read_u32(header, soc + 12, ByteOrder::BigEndian)?;
    let x_offset = read_u32(header, soc + 16, ByteOrder::BigEndian)?;
    let y_offset = read_u32(header, soc + 20, ByteOrder::BigEndian)?;

    match (x_size.checked_sub(x_offset), y_size.checked_sub(y_offset)) {
        (Some(width), Some(height)) => Ok((width, height)),
        _ => Err(SizeError::Malformed(
            "SIZ image offset beyond reference grid".to_string(),
        )),
    }
}

impl FormatParser for Jp2Handler {
    fn format(&self) -> ImageFormat {
        ImageFormat::Jp2
    }

    fn max_header_bytes(&self) -> usize {
        Self::MAX_HEADER_BYTES
    }

    fn matches(&self, header: &[u8]) -> bool {
        header.starts_with(JP2_SIGNATURE) || header.starts_with(J2K_CODESTREAM)
    }

    fn dimensions(&self, header: &[u8]) -> SizeResult<(u32, u32)> {
        if header.starts_with(J2K_CODESTREAM) {
            return siz_dimensions(header, 0);
        }

        let image_header = find_box(header, 0, header.len(), BOX_JP2_HEADER).and_then(|jp2h| {
            find_box(
                header,
                jp2h.body,
                jp2h.end.min(header.len()),
                BOX_IMAGE_HEADER,
            )
        });

        match image_header {
            Ok(ihdr) => {
                let height = read_u32(header, ihdr.body, ByteOrder::BigEndian)?;
                let width = read_u32(header, ihdr.body + 4, ByteOrder::BigEndian)?;
                Ok((width, height))
            }
            Err(e) => match header
                .windows(J2K_CODESTREAM.len())
                .position(|w| w == J2K_CODESTREAM)
            {
                Some(soc) => siz_dimensions(header, soc),
                None => Err(e),
            },
        }
    }
}
