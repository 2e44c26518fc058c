//! Format parser trait and probe options
//!
//! This module defines the trait that all format parsers must implement.
//! This allows for a unified interface across different image formats.

use crate::core::error::{SizeError, SizeResult};
use crate::files::source::{ImageHandle, DEFAULT_CHUNK_SIZE};
use crate::types::{ImageFormat, ImageSize};

/// Options for size detection.
///
/// Use the builder pattern to configure options.
///
/// # Example
///
/// ```rust
/// use peeksize::ProbeOptions;
///
/// // Only ever read through a configured stream transport
/// let options = ProbeOptions::default().without_direct_reads().chunk_size(4096);
/// assert!(!options.direct_reads);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ProbeOptions {
    /// Allow direct ranged reads when streaming yields nothing (default: true)
    pub direct_reads: bool,
    /// Upper bound of a single streamed read in bytes (default: 8192)
    pub chunk_size: usize,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            direct_reads: true,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl ProbeOptions {
    /// Allow direct ranged reads (default).
    pub fn with_direct_reads(mut self) -> Self {
        self.direct_reads = true;
        self
    }

    /// Disable direct ranged reads.
    ///
    /// Only resources with a network scheme and a configured stream
    /// transport can then be read.
    pub fn without_direct_reads(mut self) -> Self {
        self.direct_reads = false;
        self
    }

    /// Set the streamed read chunk size.
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }
}

/// Trait for format parsers
///
/// All format parsers (JPEG, PNG, TIFF, etc.) implement this trait. The
/// byte-level methods work on a header slice and never perform I/O, so a
/// single fetched buffer can be tested against every format in turn.
pub trait FormatParser: Send + Sync {
    /// Format this parser recognizes
    fn format(&self) -> ImageFormat;

    /// Ceiling on the number of header bytes this parser ever reads
    fn max_header_bytes(&self) -> usize;

    /// Check the format signature at the start of `header`
    fn matches(&self, header: &[u8]) -> bool;

    /// Decode `(width, height)` from a header that passed [`Self::matches`]
    fn dimensions(&self, header: &[u8]) -> SizeResult<(u32, u32)>;

    /// Signature check plus size extraction over an in-memory header
    ///
    /// Only the first [`Self::max_header_bytes`] bytes are considered.
    fn parse(&self, header: &[u8]) -> SizeResult<ImageSize> {
        let header = &header[..header.len().min(self.max_header_bytes())];
        if !self.matches(header) {
            return Err(SizeError::SignatureMismatch(self.format()));
        }
        let (width, height) = self.dimensions(header)?;
        Ok(ImageSize::new(width, height, self.format()))
    }

    /// Fetch this format's header through `handle` and extract the size
    fn extract_size(&self, handle: &mut ImageHandle<'_>) -> SizeResult<ImageSize> {
        let header = handle.fetch(0, self.max_header_bytes(), false)?;
        self.parse(header)
    }
}
