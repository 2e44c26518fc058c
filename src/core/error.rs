//! Error types for size detection
//!
//! This module defines all error types used throughout peeksize. Every
//! failure terminates the parse with no size; a half-filled result is never
//! produced.

use crate::types::ImageFormat;
use thiserror::Error;

/// Error types for size detection
#[derive(Debug, Error)]
pub enum SizeError {
    /// No read strategy produced any bytes for the resource
    #[error("Resource unreachable: {0}")]
    Unreachable(String),

    /// IO error raised by a transport or range reader
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// The header does not carry the format's signature
    #[error("Signature mismatch: not a {0} image")]
    SignatureMismatch(ImageFormat),

    /// The fetched header is shorter than a read requires
    #[error("Header truncated: needed {needed} bytes, {available} available")]
    Truncated {
        /// Bytes required by the read
        needed: usize,
        /// Bytes actually present
        available: usize,
    },

    /// Structurally invalid header (bad segment length, missing tags, ...)
    #[error("Malformed header: {0}")]
    Malformed(String),

    /// No format matched, or the format is not supported
    #[error("Unsupported format: {0}")]
    Unsupported(String),
}

/// Result type alias for size detection
pub type SizeResult<T> = Result<T, SizeError>;
