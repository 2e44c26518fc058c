//! Bounds-checked integer reads over header buffers
//!
//! Every parser reads through these helpers so that a short header turns
//! into [`SizeError::Truncated`] instead of a panic.

use crate::core::error::{SizeError, SizeResult};

/// Byte order of a multi-byte field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    LittleEndian,
    BigEndian,
}

/// Borrow `len` bytes at `offset`
pub fn slice(data: &[u8], offset: usize, len: usize) -> SizeResult<&[u8]> {
    let end = offset.checked_add(len).ok_or_else(|| {
        SizeError::Malformed(format!("offset {} + {} overflows", offset, len))
    })?;
    data.get(offset..end).ok_or(SizeError::Truncated {
        needed: end,
        available: data.len(),
    })
}

/// Read a fixed-size array at `offset`
pub fn array<const N: usize>(data: &[u8], offset: usize) -> SizeResult<[u8; N]> {
    let mut out = [0u8; N];
    out.copy_from_slice(slice(data, offset, N)?);
    Ok(out)
}

/// Read u8
pub fn read_u8(data: &[u8], offset: usize) -> SizeResult<u8> {
    data.get(offset).copied().ok_or(SizeError::Truncated {
        needed: offset.saturating_add(1),
        available: data.len(),
    })
}

/// Read u16 with byte order
pub fn read_u16(data: &[u8], offset: usize, byte_order: ByteOrder) -> SizeResult<u16> {
    let bytes = array::<2>(data, offset)?;
    Ok(match byte_order {
        ByteOrder::LittleEndian => u16::from_le_bytes(bytes),
        ByteOrder::BigEndian => u16::from_be_bytes(bytes),
    })
}

/// Read u32 with byte order
pub fn read_u32(data: &[u8], offset: usize, byte_order: ByteOrder) -> SizeResult<u32> {
    let bytes = array::<4>(data, offset)?;
    Ok(match byte_order {
        ByteOrder::LittleEndian => u32::from_le_bytes(bytes),
        ByteOrder::BigEndian => u32::from_be_bytes(bytes),
    })
}

/// Read i32 with byte order
pub fn read_i32(data: &[u8], offset: usize, byte_order: ByteOrder) -> SizeResult<i32> {
    let bytes = array::<4>(data, offset)?;
    Ok(match byte_order {
        ByteOrder::LittleEndian => i32::from_le_bytes(bytes),
        ByteOrder::BigEndian => i32::from_be_bytes(bytes),
    })
}

/// Read big-endian u64
pub fn read_u64_be(data: &[u8], offset: usize) -> SizeResult<u64> {
    Ok(u64::from_be_bytes(array::<8>(data, offset)?))
}
