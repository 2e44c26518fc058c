//! Core module
//!
//! Error types shared by the byte source, the registry and every format
//! parser.

pub mod error;

pub use error::{SizeError, SizeResult};
