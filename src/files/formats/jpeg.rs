//! JPEG format parser
//!
//! The size lives in the first start-of-frame (SOF) segment:
//! - Marker: `FF Cn` (2 bytes)
//! - Segment length (2 bytes, big-endian)
//! - Sample precision (1 byte)
//! - Height, then width (2 bytes big-endian each)
//!
//! Camera files routinely put large EXIF (APP1), XMP (APP1), ICC (APP2) and
//! Photoshop (APP13) segments ahead of it, so recognized APP segments are
//! jumped over by their declared length instead of scanned byte by byte.
//! Between recognized markers the scanner steps one byte at a time, which
//! tolerates fill bytes and non-standard padding.

use crate::core::error::{SizeError, SizeResult};
use crate::files::handler::FormatParser;
use crate::types::ImageFormat;
use crate::utils::bytes::{read_u16, ByteOrder};
use log::trace;

/// JPEG segment markers
const MARKER_PREFIX: u8 = 0xFF;
const MARKER_SOI: u8 = 0xD8; // Start of Image
const MARKER_APP1: u8 = 0xE1; // EXIF and XMP

/// Offset of the height field from the SOF marker: marker (2), segment
/// length (2), precision (1)
const SOF_HEIGHT_OFFSET: usize = 5;
const SOF_WIDTH_OFFSET: usize = 7;

/// JPEG format parser
#[derive(Debug, Default, Clone, Copy)]
pub struct JpegHandler;

impl JpegHandler {
    /// Headers can be bigger, but the scan gives up after this many bytes
    pub const MAX_HEADER_BYTES: usize = 124_576;
}

/// APP segments skipped by length: APP0-APP3, APP12-APP14
fn is_app_marker(first: u8, second: u8) -> bool {
    first == MARKER_PREFIX && matches!(second, 0xE0..=0xE3 | 0xEC..=0xEE)
}

/// SOFn markers carrying dimensions. C4 (DHT), C8 (JPG) and CC (DAC) share
/// the range but are not frame headers.
fn is_sof_marker(first: u8, second: u8) -> bool {
    first == MARKER_PREFIX
        && matches!(second, 0xC0..=0xC3 | 0xC5..=0xC7 | 0xC9..=0xCB | 0xCD..=0xCF)
}

/// Cursor and metadata flags of a single marker scan
///
/// `exif_seen` and `xmp_seen` only ever go from false to true: the first
/// APP1 segment is taken as EXIF, the second as XMP, later ones change
/// nothing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct JpegScanState {
    /// Current byte index into the header
    pub position: usize,
    /// An APP1 segment has been skipped
    pub exif_seen: bool,
    /// A second APP1 segment has been skipped
    pub xmp_seen: bool,
}

impl JpegScanState {
    fn record_app_marker(&mut self, marker: u8) {
        if marker != MARKER_APP1 {
            return;
        }
        if !self.exif_seen {
            self.exif_seen = true;
        } else if !self.xmp_seen {
            self.xmp_seen = true;
        }
    }

    /// Scan `data` from the start for the first SOF marker
    ///
    /// Returns `(width, height)`. Fails if an APP segment length points at
    /// or past the end of `data`, or if no SOF marker is found.
    pub fn scan(&mut self, data: &[u8]) -> SizeResult<(u32, u32)> {
        // Every check looks at position + 1
        let last = data.len().saturating_sub(1);
        self.position = 0;

        while self.position < last {
            let i = self.position;
            if is_app_marker(data[i], data[i + 1]) {
                let length = read_u16(data, i + 2, ByteOrder::BigEndian)? as usize;
                self.record_app_marker(data[i + 1]);
                trace!(
                    "skipping JPEG marker {:02X} segment of {} bytes at {}",
                    data[i + 1],
                    length,
                    i
                );

                self.position = i + length;
                if self.position >= last {
                    return Err(SizeError::Malformed(format!(
                        "APP segment at {} runs past the {} byte header",
                        i,
                        data.len()
                    )));
                }
            }

            let i = self.position;
            if is_sof_marker(data[i], data[i + 1]) {
                let height = read_u16(data, i + SOF_HEIGHT_OFFSET, ByteOrder::BigEndian)?;
                let width = read_u16(data, i + SOF_WIDTH_OFFSET, ByteOrder::BigEndian)?;
                return Ok((width as u32, height as u32));
            }

            self.position += 1;
        }

        Err(SizeError::Malformed(format!(
            "no SOF marker within the first {} bytes",
            data.len()
        )))
    }
}

impl FormatParser for JpegHandler {
    fn format(&self) -> ImageFormat {
        ImageFormat::Jpeg
    }

    fn max_header_bytes(&self) -> usize {
        Self::MAX_HEADER_BYTES
    }

    /// Offset 0 must have the SOI marker (0xFFD8)
    fn matches(&self, header: &[u8]) -> bool {
        header.starts_with(&[MARKER_PREFIX, MARKER_SOI])
    }

    fn dimensions(&self, header: &[u8]) -> SizeResult<(u32, u32)> {
        JpegScanState::default().scan(header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn soi() -> Vec<u8> {
        vec![MARKER_PREFIX, MARKER_SOI]
    }

    fn segment(marker: u8, body: &[u8]) -> Vec<u8> {
        let mut data = vec![MARKER_PREFIX, marker];
        data.extend_from_slice(&((body.len() + 2) as u16).to_be_bytes());
        data.extend_from_slice(body);
        data
    }

    fn sof(marker: u8, width: u16, height: u16) -> Vec<u8> {
        let mut body = vec![8]; // precision
        body.extend_from_slice(&height.to_be_bytes());
        body.extend_from_slice(&width.to_be_bytes());
        body.extend_from_slice(&[3, 1, 0x22, 0, 2, 0x11, 1, 3, 0x11, 1]);
        segment(marker, &body)
    }

    #[test]
    fn test_soi_then_sof0() {
        let mut data = soi();
        data.extend(sof(0xC0, 100, 50));

        let mut state = JpegScanState::default();
        assert_eq!(state.scan(&data).unwrap(), (100, 50));
        assert!(!state.exif_seen);
        assert!(!state.xmp_seen);

        let size = JpegHandler.parse(&data).unwrap();
        assert_eq!((size.width, size.height), (100, 50));
        assert_eq!(size.format, ImageFormat::Jpeg);
    }

    #[test]
    fn test_app1_flags() {
        for app1_count in 1..=3 {
            let mut data = soi();
            data.extend(segment(0xE0, b"JFIF\0\x01\x02\0\0\x01\0\x01\0\0"));
            for _ in 0..app1_count {
                data.extend(segment(MARKER_APP1, &[0u8; 64]));
            }
            data.extend(sof(0xC2, 4000, 3000));

            let mut state = JpegScanState::default();
            assert_eq!(state.scan(&data).unwrap(), (4000, 3000));
            assert!(state.exif_seen);
            assert_eq!(state.xmp_seen, app1_count >= 2);
        }
    }

    #[test]
    fn test_skipped_segment_hides_fake_sof() {
        let mut data = soi();
        // An SOF-looking byte pair inside an APP payload must not match
        data.extend(segment(
            MARKER_APP1,
            &[0, 0, 0xFF, 0xC0, 0, 0x11, 8, 0, 1, 0, 1, 0, 0],
        ));
        data.extend(sof(0xC1, 640, 480));
        assert_eq!(JpegScanState::default().scan(&data).unwrap(), (640, 480));
    }

    #[test]
    fn test_non_sof_markers_are_ignored() {
        let mut data = soi();
        // DHT (C4), JPG (C8) and DAC (CC) look like SOF but are not
        data.extend(segment(0xC4, &[0u8; 8]));
        data.extend(segment(0xC8, &[0u8; 8]));
        data.extend(segment(0xCC, &[0u8; 8]));
        data.extend(sof(0xCF, 21, 12));
        assert_eq!(JpegScanState::default().scan(&data).unwrap(), (21, 12));
    }

    #[test]
    fn test_fill_bytes_between_segments() {
        let mut data = soi();
        data.extend(segment(0xED, &[0u8; 20]));
        data.extend_from_slice(&[0xFF, 0xFF, 0xFF]);
        data.extend(sof(0xC0, 7, 9));
        assert_eq!(JpegScanState::default().scan(&data).unwrap(), (7, 9));
    }

    #[test]
    fn test_segment_length_past_buffer() {
        let mut data = soi();
        data.extend_from_slice(&[MARKER_PREFIX, MARKER_APP1, 0xFF, 0xF0]);
        data.extend_from_slice(&[0u8; 32]);
        data.extend(sof(0xC0, 100, 50));

        let mut state = JpegScanState::default();
        assert!(matches!(state.scan(&data), Err(SizeError::Malformed(_))));
        assert!(state.exif_seen);
    }

    #[test]
    fn test_truncated_after_marker() {
        let mut data = soi();
        data.extend(sof(0xC0, 100, 50));
        assert!(JpegHandler.parse(&data[..8]).is_err());
        // APP marker without its length field
        assert!(JpegHandler.parse(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00]).is_err());
    }

    #[test]
    fn test_no_sof() {
        let mut data = soi();
        data.extend(segment(0xE0, &[0u8; 16]));
        data.extend_from_slice(&[0u8; 64]);
        assert!(matches!(
            JpegHandler.parse(&data),
            Err(SizeError::Malformed(_))
        ));
    }

    #[test]
    fn test_signature() {
        assert!(JpegHandler.matches(&[0xFF, 0xD8]));
        assert!(!JpegHandler.matches(&[0xFF, 0xD9]));
        assert!(!JpegHandler.matches(&[0xFF]));
    }
}
