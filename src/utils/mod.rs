//! Internal helpers

pub mod bytes;
