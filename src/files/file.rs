//! Image size API
//!
//! [`ImageProbe`] is the entry point: it resolves a format from a hint or by
//! trial detection, runs that format's parser and returns the size. Every
//! call creates its own [`ImageHandle`], so a probe holds no per-image state
//! and can be shared between threads.

use crate::core::error::{SizeError, SizeResult};
use crate::files::handler::{FormatParser, ProbeOptions};
use crate::files::registry::{self, Handler};
use crate::files::source::{
    has_network_scheme, ByteSource, FileRangeReader, ImageHandle, RangeReader, StreamTransport,
};
use crate::types::{ImageFormat, ImageSize};
use log::debug;

/// Determine image dimensions from a bounded header prefix
///
/// # Example
///
/// ```rust,no_run
/// use peeksize::{ImageProbe, ProbeOptions};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let probe = ImageProbe::new().with_options(ProbeOptions::default().chunk_size(4096));
///
/// // Format from the extension, falling back to detection
/// let size = probe.get_image_size("photo.jpg", "")?;
/// println!("{}x{} {}", size.width, size.height, size.format);
///
/// // Format from a MIME type
/// let size = probe.get_image_size("download.bin", "image/png")?;
/// # Ok(())
/// # }
/// ```
pub struct ImageProbe {
    options: ProbeOptions,
    stream: Option<Box<dyn StreamTransport>>,
    ranged: Box<dyn RangeReader>,
}

impl ImageProbe {
    /// Create a probe reading local files, without a stream transport
    pub fn new() -> Self {
        Self {
            options: ProbeOptions::default(),
            stream: None,
            ranged: Box::new(FileRangeReader),
        }
    }

    /// Replace the probe options
    pub fn with_options(mut self, options: ProbeOptions) -> Self {
        self.options = options;
        self
    }

    /// Read network resources through `transport`
    pub fn with_stream_transport<T: StreamTransport + 'static>(mut self, transport: T) -> Self {
        self.stream = Some(Box::new(transport));
        self
    }

    /// Replace the direct ranged reader (default: [`FileRangeReader`])
    pub fn with_range_reader<R: RangeReader + 'static>(mut self, reader: R) -> Self {
        self.ranged = Box::new(reader);
        self
    }

    /// Current options
    pub fn options(&self) -> &ProbeOptions {
        &self.options
    }

    fn source(&self) -> ByteSource<'_> {
        ByteSource {
            stream: self.stream.as_deref(),
            ranged: self.options.direct_reads.then_some(self.ranged.as_ref()),
            chunk_size: self.options.chunk_size,
        }
    }

    /// Resolve the format named by `hint`, or by the extension of
    /// `resource` when `hint` is empty
    ///
    /// `hint` may be an extension (`"jpg"`) or a MIME type (`"image/png"`).
    pub fn resolve_by_hint(&self, resource: &str, hint: &str) -> Option<ImageFormat> {
        hint_alias(resource, hint).and_then(registry::by_alias)
    }

    /// Identify the format of `resource` by trial detection
    ///
    /// The largest header any format needs is fetched once and every format
    /// is tested against it in [`registry::trial_order`].
    pub fn detect_by_trial(&self, resource: &str) -> SizeResult<ImageFormat> {
        let mut handle = ImageHandle::new(resource, self.source());
        detect(&mut handle).map(|size| size.format)
    }

    /// Get the dimensions and format of `resource`
    ///
    /// # Arguments
    ///
    /// * `resource` - Local path, `file://` URL or network URL
    /// * `hint` - Extension or MIME type; empty to use the resource extension
    ///
    /// # Returns
    ///
    /// * `Ok(ImageSize)` with both dimensions
    /// * `Err(SizeError)` if the resource cannot be read or no format matches
    pub fn get_image_size(&self, resource: &str, hint: &str) -> SizeResult<ImageSize> {
        let mut handle = ImageHandle::new(resource, self.source());
        size_of(&mut handle, self.resolve_by_hint(resource, hint))
    }

    /// Get the dimensions and format of an in-memory image
    ///
    /// `hint` works as in [`Self::get_image_size`]; there is no resource
    /// extension to fall back on.
    pub fn size_from_bytes(&self, data: &[u8], hint: &str) -> SizeResult<ImageSize> {
        let mut handle = ImageHandle::from_bytes(data);
        size_of(&mut handle, self.resolve_by_hint("", hint))
    }
}

impl Default for ImageProbe {
    fn default() -> Self {
        Self::new()
    }
}

/// Get the dimensions and format of a local file with the default probe
///
/// See [`ImageProbe::get_image_size`].
pub fn get_image_size(resource: &str, hint: &str) -> SizeResult<ImageSize> {
    ImageProbe::new().get_image_size(resource, hint)
}

/// Hinted format first, trial detection if it yields no size
fn size_of(handle: &mut ImageHandle<'_>, hinted: Option<ImageFormat>) -> SizeResult<ImageSize> {
    if let Some(handler) = hinted.and_then(Handler::for_format) {
        match handler.extract_size(handle) {
            Ok(size) => return Ok(size),
            // Nothing readable at all; a larger fetch cannot do better
            Err(e @ SizeError::Unreachable(_)) => return Err(e),
            Err(e) => debug!(
                "{} parse of {} failed, falling back to detection: {}",
                handler.format(),
                handle.resource(),
                e
            ),
        }
    }
    detect(handle)
}

fn detect(handle: &mut ImageHandle<'_>) -> SizeResult<ImageSize> {
    let header = handle.fetch(0, registry::largest_header_bytes(), false)?;
    registry::find_by_detection(header)
}

/// Alias text carried by `hint`, or the extension of `resource`
fn hint_alias<'a>(resource: &'a str, hint: &'a str) -> Option<&'a str> {
    let hint = hint.trim();
    if !hint.is_empty() {
        // MIME type: parameters dropped, subtype after the last '/'
        let essence = hint.split(';').next().unwrap_or(hint).trim();
        return essence.rsplit('/').next();
    }
    extension(resource)
}

/// Extension of the last path segment; URL query and fragment ignored
fn extension(resource: &str) -> Option<&str> {
    let path = if has_network_scheme(resource) {
        resource.split(['?', '#']).next().unwrap_or(resource)
    } else {
        resource
    };
    let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    let (_, ext) = name.rsplit_once('.')?;
    (!ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric())).then_some(ext)
}
