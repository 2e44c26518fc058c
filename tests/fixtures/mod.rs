//! Synthetic image headers for tests
//!
//! Each builder produces the smallest byte layout the matching format
//! parser accepts, optionally followed by padding so the file is larger
//! than its header.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Write `data` as `name` inside `dir` and return the path
pub fn write_fixture(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, data).unwrap();
    path
}

pub fn png(width: u32, height: u32) -> Vec<u8> {
    let mut data = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    data.extend_from_slice(&13u32.to_be_bytes());
    data.extend_from_slice(b"IHDR");
    data.extend_from_slice(&width.to_be_bytes());
    data.extend_from_slice(&height.to_be_bytes());
    data.extend_from_slice(&[8, 6, 0, 0, 0]);
    data.extend_from_slice(&[0u8; 4]); // CRC
    data.extend_from_slice(&0u32.to_be_bytes());
    data.extend_from_slice(b"IEND");
    data
}

pub fn gif(width: u16, height: u16) -> Vec<u8> {
    let mut data = b"GIF89a".to_vec();
    data.extend_from_slice(&width.to_le_bytes());
    data.extend_from_slice(&height.to_le_bytes());
    data.extend_from_slice(&[0xF0, 0, 0, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0x3B]);
    data
}

/// SOI, APP0 (JFIF), `app1_segments` APP1 segments of `app1_len` payload
/// bytes, then SOF0
pub fn jpeg(width: u16, height: u16, app1_segments: usize, app1_len: usize) -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8];
    data.extend(segment(0xE0, b"JFIF\0\x01\x01\0\0\x01\0\x01\0\0"));
    for _ in 0..app1_segments {
        data.extend(segment(0xE1, &vec![0x20; app1_len]));
    }
    let mut sof = vec![8];
    sof.extend_from_slice(&height.to_be_bytes());
    sof.extend_from_slice(&width.to_be_bytes());
    sof.extend_from_slice(&[3, 1, 0x22, 0, 2, 0x11, 1, 3, 0x11, 1]);
    data.extend(segment(0xC0, &sof));
    data.extend_from_slice(&[0xFF, 0xD9]);
    data
}

fn segment(marker: u8, body: &[u8]) -> Vec<u8> {
    let mut data = vec![0xFF, marker];
    data.extend_from_slice(&((body.len() + 2) as u16).to_be_bytes());
    data.extend_from_slice(body);
    data
}

pub fn bmp(width: i32, height: i32) -> Vec<u8> {
    let mut data = b"BM".to_vec();
    data.extend_from_slice(&[0u8; 12]); // file size, reserved, pixel offset
    data.extend_from_slice(&40u32.to_le_bytes());
    data.extend_from_slice(&width.to_le_bytes());
    data.extend_from_slice(&height.to_le_bytes());
    data.extend_from_slice(&1u16.to_le_bytes());
    data.extend_from_slice(&24u16.to_le_bytes());
    data.extend_from_slice(&[0u8; 24]);
    data
}

pub fn psd(width: u32, height: u32) -> Vec<u8> {
    let mut data = b"8BPS".to_vec();
    data.extend_from_slice(&1u16.to_be_bytes());
    data.extend_from_slice(&[0u8; 6]);
    data.extend_from_slice(&3u16.to_be_bytes()); // channels
    data.extend_from_slice(&height.to_be_bytes());
    data.extend_from_slice(&width.to_be_bytes());
    data.extend_from_slice(&8u16.to_be_bytes());
    data.extend_from_slice(&3u16.to_be_bytes());
    data
}

/// Little-endian TIFF whose first IFD holds a SHORT width and LONG height
pub fn tiff_le(width: u16, height: u32) -> Vec<u8> {
    let mut data = vec![0x49, 0x49, 0x2A, 0x00];
    data.extend_from_slice(&8u32.to_le_bytes());
    data.extend_from_slice(&3u16.to_le_bytes());
    // NewSubfileType
    data.extend_from_slice(&254u16.to_le_bytes());
    data.extend_from_slice(&4u16.to_le_bytes());
    data.extend_from_slice(&1u32.to_le_bytes());
    data.extend_from_slice(&0u32.to_le_bytes());
    // ImageWidth
    data.extend_from_slice(&256u16.to_le_bytes());
    data.extend_from_slice(&3u16.to_le_bytes());
    data.extend_from_slice(&1u32.to_le_bytes());
    data.extend_from_slice(&width.to_le_bytes());
    data.extend_from_slice(&[0, 0]);
    // ImageLength
    data.extend_from_slice(&257u16.to_le_bytes());
    data.extend_from_slice(&4u16.to_le_bytes());
    data.extend_from_slice(&1u32.to_le_bytes());
    data.extend_from_slice(&height.to_le_bytes());
    data.extend_from_slice(&0u32.to_le_bytes()); // next IFD
    data
}

/// Big-endian TIFF with LONG width and height
pub fn tiff_be(width: u32, height: u32) -> Vec<u8> {
    let mut data = vec![0x4D, 0x4D, 0x00, 0x2A];
    data.extend_from_slice(&8u32.to_be_bytes());
    data.extend_from_slice(&2u16.to_be_bytes());
    for (tag, value) in [(256u16, width), (257u16, height)] {
        data.extend_from_slice(&tag.to_be_bytes());
        data.extend_from_slice(&4u16.to_be_bytes());
        data.extend_from_slice(&1u32.to_be_bytes());
        data.extend_from_slice(&value.to_be_bytes());
    }
    data.extend_from_slice(&0u32.to_be_bytes());
    data
}

/// Amiga ILBM with an ANNO chunk ahead of BMHD
pub fn iff(width: u16, height: u16) -> Vec<u8> {
    let mut chunks = b"ILBM".to_vec();
    chunks.extend_from_slice(b"ANNO");
    chunks.extend_from_slice(&5u32.to_be_bytes());
    chunks.extend_from_slice(b"hello\0"); // odd length, padded
    chunks.extend_from_slice(b"BMHD");
    chunks.extend_from_slice(&20u32.to_be_bytes());
    chunks.extend_from_slice(&width.to_be_bytes());
    chunks.extend_from_slice(&height.to_be_bytes());
    chunks.extend_from_slice(&[0u8; 16]);

    let mut data = b"FORM".to_vec();
    data.extend_from_slice(&(chunks.len() as u32).to_be_bytes());
    data.extend(chunks);
    data
}

pub fn ico(width: u8, height: u8) -> Vec<u8> {
    let mut data = vec![0x00, 0x00, 0x01, 0x00, 0x01, 0x00];
    data.extend_from_slice(&[width, height, 0, 0]);
    data.extend_from_slice(&1u16.to_le_bytes());
    data.extend_from_slice(&32u16.to_le_bytes());
    data.extend_from_slice(&0u32.to_le_bytes());
    data.extend_from_slice(&22u32.to_le_bytes());
    data
}

/// WBMP type 0 with single-byte dimensions
pub fn wbmp(width: u8, height: u8) -> Vec<u8> {
    assert!(width < 0x80 && height < 0x80);
    let mut data = vec![0x00, 0x00, width, height];
    data.extend(vec![0xFF; (width as usize).div_ceil(8) * height as usize]);
    data
}

pub fn jp2(width: u32, height: u32) -> Vec<u8> {
    fn jp2_box(kind: &[u8; 4], payload: &[u8]) -> Vec<u8> {
        let mut data = ((payload.len() + 8) as u32).to_be_bytes().to_vec();
        data.extend_from_slice(kind);
        data.extend_from_slice(payload);
        data
    }

    let mut data = vec![
        0x00, 0x00, 0x00, 0x0C, 0x6A, 0x50, 0x20, 0x20, 0x0D, 0x0A, 0x87, 0x0A,
    ];
    data.extend(jp2_box(b"ftyp", b"jp2 \0\0\0\0jp2 "));
    let mut ihdr = Vec::new();
    ihdr.extend_from_slice(&height.to_be_bytes());
    ihdr.extend_from_slice(&width.to_be_bytes());
    ihdr.extend_from_slice(&[0, 3, 7, 7, 0, 0]);
    data.extend(jp2_box(b"jp2h", &jp2_box(b"ihdr", &ihdr)));
    data
}

/// `data` followed by `len` filler bytes
pub fn padded(mut data: Vec<u8>, len: usize) -> Vec<u8> {
    data.extend(std::iter::repeat(0xA5).take(len));
    data
}
