//! Magic-byte format detection.
//!
//! Classification looks only at the first few bytes of a source and never
//! trusts file extensions. Anything without a recognized signature is
//! `Unknown`, including prefixes shorter than the signature.

use crate::constants::SNIFF_LEN;
use crate::error::Result;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SniffedFormat {
    Jpeg,
    Png,
    Gif,
    WebP,
    Tiff,
    Svg,
    Bmp,
    Psd,
    Unknown,
}

impl SniffedFormat {
    /// Classify a byte prefix. Pure; inspects at most `SNIFF_LEN` bytes.
    pub fn detect(prefix: &[u8]) -> Self {
        let prefix = &prefix[..prefix.len().min(SNIFF_LEN)];

        if prefix.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return SniffedFormat::Jpeg;
        }
        if prefix.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return SniffedFormat::Png;
        }
        if prefix.starts_with(b"GIF87a") || prefix.starts_with(b"GIF89a") {
            return SniffedFormat::Gif;
        }
        if prefix.len() >= 12 && prefix.starts_with(b"RIFF") && &prefix[8..12] == b"WEBP" {
            return SniffedFormat::WebP;
        }
        if prefix.starts_with(&[0x49, 0x49, 0x2A, 0x00]) || prefix.starts_with(&[0x4D, 0x4D, 0x00, 0x2A]) {
            return SniffedFormat::Tiff;
        }
        if prefix.starts_with(b"8BPS") {
            return SniffedFormat::Psd;
        }
        if prefix.starts_with(b"BM") {
            return SniffedFormat::Bmp;
        }
        if looks_like_svg(prefix) {
            return SniffedFormat::Svg;
        }

        SniffedFormat::Unknown
    }

    /// Formats the resize pipeline can decode and re-encode.
    pub fn resize_supported(&self) -> bool {
        matches!(
            self,
            SniffedFormat::Jpeg
                | SniffedFormat::Png
                | SniffedFormat::Gif
                | SniffedFormat::WebP
                | SniffedFormat::Tiff
        )
    }

    pub fn extension(&self) -> &'static str {
        match self {
            SniffedFormat::Jpeg => "jpg",
            SniffedFormat::Png => "png",
            SniffedFormat::Gif => "gif",
            SniffedFormat::WebP => "webp",
            SniffedFormat::Tiff => "tiff",
            SniffedFormat::Svg => "svg",
            SniffedFormat::Bmp => "bmp",
            SniffedFormat::Psd => "psd",
            SniffedFormat::Unknown => "bin",
        }
    }

    pub fn to_image_format(&self) -> Option<image::ImageFormat> {
        match self {
            SniffedFormat::Jpeg => Some(image::ImageFormat::Jpeg),
            SniffedFormat::Png => Some(image::ImageFormat::Png),
            SniffedFormat::Gif => Some(image::ImageFormat::Gif),
            SniffedFormat::WebP => Some(image::ImageFormat::WebP),
            SniffedFormat::Tiff => Some(image::ImageFormat::Tiff),
            _ => None,
        }
    }
}

impl fmt::Display for SniffedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SniffedFormat::Jpeg => "jpeg",
            SniffedFormat::Png => "png",
            SniffedFormat::Gif => "gif",
            SniffedFormat::WebP => "webp",
            SniffedFormat::Tiff => "tiff",
            SniffedFormat::Svg => "svg",
            SniffedFormat::Bmp => "bmp",
            SniffedFormat::Psd => "psd",
            SniffedFormat::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

// SVG has no binary signature. Accept an optional UTF-8 BOM and leading
// whitespace, then require the prefix to open an XML or svg tag.
fn looks_like_svg(prefix: &[u8]) -> bool {
    let rest = prefix.strip_prefix(&[0xEF, 0xBB, 0xBF][..]).unwrap_or(prefix);
    let start = rest
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(rest.len());
    let rest = &rest[start..];
    rest.starts_with(b"<svg") || rest.starts_with(b"<?xml")
}

pub fn sniff_bytes(bytes: &[u8]) -> SniffedFormat {
    SniffedFormat::detect(bytes)
}

/// Sniff a file by reading only its first `SNIFF_LEN` bytes.
pub fn sniff_file(path: &Path) -> Result<SniffedFormat> {
    let mut file = File::open(path)?;
    let mut prefix = [0u8; SNIFF_LEN];
    let mut filled = 0;
    // A short file yields a short prefix, which detect() treats as Unknown.
    while filled < SNIFF_LEN {
        let n = file.read(&mut prefix[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(SniffedFormat::detect(&prefix[..filled]))
}
