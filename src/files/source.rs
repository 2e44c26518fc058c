//! Bounded, cached byte fetch over local and remote resources
//!
//! An [`ImageHandle`] owns the byte buffer for exactly one detection pass.
//! The first [`ImageHandle::fetch`] populates it through the configured
//! strategies:
//!
//! 1. resources carrying a network scheme (`http://`, `https://`, ...) are
//!    read through the [`StreamTransport`], skipping to the offset and
//!    collecting the body in bounded chunks;
//! 2. if that yields nothing and direct reads are enabled, the
//!    [`RangeReader`] performs one ranged read.
//!
//! A failing strategy is logged and the next one tried. Later fetches on the
//! same handle are served from the buffer.

use crate::core::error::{SizeError, SizeResult};
use log::debug;
use std::borrow::Cow;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};

/// Default chunk size for streamed reads (8 KiB)
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// Streamed partial-content transport for network resources
///
/// Implementations wrap an HTTP (or other) client. The returned reader
/// yields the resource body from its first byte; cancellation and timeouts
/// are the implementation's concern.
pub trait StreamTransport: Send + Sync {
    /// Open a streamed read of `url`
    fn open(&self, url: &str) -> io::Result<Box<dyn Read + '_>>;
}

/// Direct ranged read of a resource
pub trait RangeReader: Send + Sync {
    /// Read at most `length` bytes of `resource` starting at `offset`
    ///
    /// Returning fewer bytes than requested means the resource ended.
    fn read_range(&self, resource: &str, offset: u64, length: usize) -> io::Result<Vec<u8>>;
}

/// [`RangeReader`] over the local filesystem
///
/// Accepts plain paths and `file://` URLs.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileRangeReader;

impl RangeReader for FileRangeReader {
    fn read_range(&self, resource: &str, offset: u64, length: usize) -> io::Result<Vec<u8>> {
        let path = resource.strip_prefix("file://").unwrap_or(resource);
        let mut file = File::open(path)?;
        if offset > 0 {
            file.seek(SeekFrom::Start(offset))?;
        }

        let mut data = Vec::with_capacity(length.min(DEFAULT_CHUNK_SIZE * 16));
        file.take(length as u64).read_to_end(&mut data)?;
        Ok(data)
    }
}

/// Whether `resource` starts with an RFC 3986 scheme followed by `://`
pub fn has_network_scheme(resource: &str) -> bool {
    let Some((scheme, _)) = resource.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    scheme.len() >= 2 && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Read strategies available to a handle
#[derive(Clone, Copy, Default)]
pub struct ByteSource<'a> {
    /// Streamed transport for network resources
    pub stream: Option<&'a dyn StreamTransport>,
    /// Direct ranged reader; `None` when direct reads are disabled
    pub ranged: Option<&'a dyn RangeReader>,
    /// Upper bound of a single streamed read
    pub chunk_size: usize,
}

impl<'a> ByteSource<'a> {
    /// Streamed read of `[offset, offset + length)`; an empty vector means
    /// the stream ended before `offset`
    ///
    /// A read error part way through discards the bytes collected so far;
    /// the caller then moves on to the direct read.
    fn stream_read(
        &self,
        transport: &dyn StreamTransport,
        resource: &str,
        offset: u64,
        length: usize,
    ) -> SizeResult<Vec<u8>> {
        let mut body = transport.open(resource)?;

        if offset > 0 {
            let skipped = io::copy(&mut body.by_ref().take(offset), &mut io::sink())?;
            if skipped < offset {
                return Ok(Vec::new());
            }
        }

        let chunk_size = self.chunk_size.max(1);
        let mut chunk = vec![0u8; chunk_size.min(length.max(1))];
        let mut data = Vec::with_capacity(length.min(chunk_size));

        while data.len() < length {
            let want = (length - data.len()).min(chunk.len());
            match body.read(&mut chunk[..want]) {
                Ok(0) => break,
                Ok(n) => data.extend_from_slice(&chunk[..n]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Ok(data)
    }

    /// Run the fallback sequence; every failure is logged and skipped
    fn load(&self, resource: &str, offset: u64, length: usize) -> SizeResult<Vec<u8>> {
        let mut last_error: Option<SizeError> = None;

        if has_network_scheme(resource) {
            match self.stream {
                Some(transport) => match self.stream_read(transport, resource, offset, length) {
                    Ok(data) if !data.is_empty() => return Ok(data),
                    Ok(_) => debug!("stream read of {} returned no data", resource),
                    Err(e) => {
                        debug!("stream read of {} failed: {}", resource, e);
                        last_error = Some(e);
                    }
                },
                None => debug!("no stream transport configured for {}", resource),
            }
        }

        if let Some(reader) = self.ranged {
            match reader.read_range(resource, offset, length) {
                Ok(data) if !data.is_empty() => return Ok(data),
                Ok(_) => debug!("direct read of {} returned no data", resource),
                Err(e) => {
                    debug!("direct read of {} failed: {}", resource, e);
                    last_error = Some(e.into());
                }
            }
        }

        Err(SizeError::Unreachable(match last_error {
            Some(e) => format!("{}: {}", resource, e),
            None => format!("{}: no bytes obtained", resource),
        }))
    }
}

/// Resource under inspection plus its lazily fetched header bytes
///
/// Created fresh for every detection call and dropped when it returns.
pub struct ImageHandle<'a> {
    resource: &'a str,
    source: ByteSource<'a>,
    data: Cow<'a, [u8]>,
    /// Resource offset of `data[0]`
    start: u64,
    /// The last read ended before the requested length
    exhausted: bool,
}

impl<'a> ImageHandle<'a> {
    /// Create a handle with an empty buffer
    pub fn new(resource: &'a str, source: ByteSource<'a>) -> Self {
        Self {
            resource,
            source,
            data: Cow::Borrowed(&[][..]),
            start: 0,
            exhausted: false,
        }
    }

    /// Create a handle whose buffer is already the complete resource
    pub fn from_bytes(bytes: &'a [u8]) -> Self {
        Self {
            resource: "<memory>",
            source: ByteSource::default(),
            data: Cow::Borrowed(bytes),
            start: 0,
            exhausted: true,
        }
    }

    /// Path or URL under inspection
    pub fn resource(&self) -> &str {
        self.resource
    }

    /// Number of valid bytes currently buffered
    pub fn buffered_len(&self) -> usize {
        self.data.len()
    }

    fn covers(&self, offset: u64, length: usize) -> bool {
        if self.data.is_empty() || offset < self.start {
            return false;
        }
        let cached_end = self.start + self.data.len() as u64;
        self.exhausted || cached_end >= offset.saturating_add(length as u64)
    }

    /// Fetch `[offset, offset + length)` of the resource
    ///
    /// With `force_length` the full window must be available, otherwise the
    /// call fails with [`SizeError::Truncated`]. Without it, whatever part of
    /// the window was obtained is returned, failing only when nothing was.
    pub fn fetch(&mut self, offset: u64, length: usize, force_length: bool) -> SizeResult<&[u8]> {
        if !self.covers(offset, length) {
            match self.source.load(self.resource, offset, length) {
                Ok(data) => {
                    self.exhausted = data.len() < length;
                    self.data = Cow::Owned(data);
                    self.start = offset;
                }
                // A shorter buffer from an earlier read is still usable
                Err(e) if self.data.is_empty() => return Err(e),
                Err(e) => debug!("keeping {} cached bytes: {}", self.data.len(), e),
            }
        }

        let Some(rel) = offset
            .checked_sub(self.start)
            .and_then(|rel| usize::try_from(rel).ok())
        else {
            return Err(SizeError::Unreachable(format!(
                "{}: offset {} not available",
                self.resource, offset
            )));
        };
        let available = self.data.len().saturating_sub(rel);

        if force_length {
            if available < length {
                return Err(SizeError::Truncated {
                    needed: length,
                    available,
                });
            }
            return Ok(&self.data[rel..rel + length]);
        }

        if available == 0 {
            return Err(SizeError::Truncated {
                needed: length.min(1),
                available,
            });
        }
        Ok(&self.data[rel..rel + length.min(available)])
    }
}
