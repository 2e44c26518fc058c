//! Image format identifiers
//!
//! The closed set of formats peeksize can size. Each variant maps to one
//! parser in [`crate::files::formats`] and one descriptor in the registry.

use crate::core::error::SizeError;
use std::fmt;
use std::str::FromStr;

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ImageFormat {
    /// JPEG / JFIF / EXIF
    Jpeg,
    /// Portable Network Graphics
    Png,
    /// Graphics Interchange Format (87a and 89a)
    Gif,
    /// JPEG 2000, boxed (.jp2) or raw codestream (.j2k)
    Jp2,
    /// Adobe Photoshop document (PSD and PSB)
    Psd,
    /// Windows bitmap
    Bmp,
    /// Tagged Image File Format
    Tiff,
    /// Interchange File Format (Amiga ILBM/PBM, Maya IFF)
    Iff,
    /// Windows icon
    Ico,
    /// Wireless bitmap, type 0
    Wbmp,
}

impl ImageFormat {
    /// Every format, in declaration order
    pub const ALL: [ImageFormat; 10] = [
        ImageFormat::Jpeg,
        ImageFormat::Png,
        ImageFormat::Gif,
        ImageFormat::Jp2,
        ImageFormat::Psd,
        ImageFormat::Bmp,
        ImageFormat::Tiff,
        ImageFormat::Iff,
        ImageFormat::Ico,
        ImageFormat::Wbmp,
    ];

    /// Canonical lowercase identifier (e.g. "jpeg", "png")
    pub const fn id(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Png => "png",
            ImageFormat::Gif => "gif",
            ImageFormat::Jp2 => "jp2",
            ImageFormat::Psd => "psd",
            ImageFormat::Bmp => "bmp",
            ImageFormat::Tiff => "tiff",
            ImageFormat::Iff => "iff",
            ImageFormat::Ico => "ico",
            ImageFormat::Wbmp => "wbmp",
        }
    }

    /// Registered MIME type
    pub const fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Jp2 => "image/jp2",
            ImageFormat::Psd => "image/vnd.adobe.photoshop",
            ImageFormat::Bmp => "image/bmp",
            ImageFormat::Tiff => "image/tiff",
            ImageFormat::Iff => "image/x-iff",
            ImageFormat::Ico => "image/vnd.microsoft.icon",
            ImageFormat::Wbmp => "image/vnd.wap.wbmp",
        }
    }

    /// Extension and MIME-subtype aliases accepted as hints, all lowercase
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            ImageFormat::Jpeg => &["jpeg", "jpg", "jpe", "jif", "jfif", "jfi"],
            ImageFormat::Png => &["png"],
            ImageFormat::Gif => &["gif"],
            ImageFormat::Jp2 => &["jp2", "j2k", "jpf", "jpg2", "jpx", "jpm"],
            ImageFormat::Psd => &["psd", "photoshop", "vnd.adobe.photoshop"],
            ImageFormat::Bmp => &["bmp"],
            ImageFormat::Tiff => &["tif", "tiff"],
            ImageFormat::Iff => &["iff", "x-iff"],
            ImageFormat::Ico => &["ico", "vnd.microsoft.icon", "x-icon", "icon"],
            ImageFormat::Wbmp => &["wbm", "wbmp", "vnd.wap.wbmp"],
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ImageFormat {
    type Err = SizeError;

    /// Resolve an extension or MIME subtype through the alias table,
    /// whether or not the format's parser is compiled in
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let alias = s.trim();
        ImageFormat::ALL
            .into_iter()
            .find(|f| f.aliases().iter().any(|a| a.eq_ignore_ascii_case(alias)))
            .ok_or_else(|| SizeError::Unsupported(format!("unknown image type '{}'", s)))
    }
}
