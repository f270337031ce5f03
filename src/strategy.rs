//! Compression strategies and their static registry.
//!
//! Strategy names map to statically known implementations of
//! [`CompressStrategy`]. A name that is not in the registry fails the whole
//! run before any item is touched. Each strategy is format-gated by magic
//! bytes: input of any other format passes through unchanged, so an ordered
//! strategy list forms a pipeline that every item can safely traverse.

use crate::constants::{
    DEFAULT_STRATEGIES, GIF_ENCODE_SPEED, LIBDEFLATER_HIGH_LEVEL, LIBDEFLATER_LOW_LEVEL,
    OXIPNG_PRESET, ZOPFLI_ITERATIONS,
};
use crate::error::{PicplusError, Result};
use crate::sniff::{sniff_bytes, SniffedFormat};
use image::codecs::gif::{GifDecoder, GifEncoder};
use image::codecs::jpeg::JpegEncoder;
use image::AnimationDecoder;
use oxipng::{Deflaters, Options};
use std::io::Cursor;
use std::num::NonZeroU8;

pub trait CompressStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Apply the strategy to raw image bytes, returning the (possibly
    /// unchanged) output bytes.
    fn compress(&self, bytes: &[u8]) -> Result<Vec<u8>>;
}

/// Resolve an ordered list of strategy names to implementations.
///
/// An empty list resolves the default set. Any unknown name aborts the
/// resolution; no partial strategy set is ever returned.
pub fn resolve_strategies(
    names: &[String],
    quality: u8,
) -> Result<Vec<Box<dyn CompressStrategy>>> {
    if names.is_empty() {
        return DEFAULT_STRATEGIES
            .iter()
            .map(|name| strategy_by_name(name, quality))
            .collect();
    }
    names
        .iter()
        .map(|name| strategy_by_name(name, quality))
        .collect()
}

fn strategy_by_name(name: &str, quality: u8) -> Result<Box<dyn CompressStrategy>> {
    match name {
        "gifsicle" => Ok(Box::new(Gifsicle)),
        "jpegtran" => Ok(Box::new(Jpegtran { quality })),
        "optipng" => Ok(Box::new(Optipng { quality })),
        "svgo" => Ok(Box::new(Svgo)),
        other => Err(PicplusError::UnknownStrategy(other.to_string())),
    }
}

// Keep the original bytes whenever the re-encode did not actually shrink them.
fn keep_smaller(original: &[u8], candidate: Vec<u8>) -> Vec<u8> {
    if candidate.len() < original.len() {
        candidate
    } else {
        original.to_vec()
    }
}

fn codec_error(err: impl std::fmt::Display) -> PicplusError {
    PicplusError::CompressionFailed(err.to_string())
}

/// Frame-preserving GIF re-encode.
struct Gifsicle;

impl CompressStrategy for Gifsicle {
    fn name(&self) -> &'static str {
        "gifsicle"
    }

    fn compress(&self, bytes: &[u8]) -> Result<Vec<u8>> {
        if sniff_bytes(bytes) != SniffedFormat::Gif {
            return Ok(bytes.to_vec());
        }

        let decoder = GifDecoder::new(Cursor::new(bytes)).map_err(codec_error)?;
        let frames = decoder.into_frames().collect_frames().map_err(codec_error)?;

        let mut out = Vec::new();
        {
            let mut encoder = GifEncoder::new_with_speed(&mut out, GIF_ENCODE_SPEED);
            encoder.encode_frames(frames).map_err(codec_error)?;
        }
        Ok(keep_smaller(bytes, out))
    }
}

/// JPEG transcode through the jpeg encoder at the run quality.
struct Jpegtran {
    quality: u8,
}

impl CompressStrategy for Jpegtran {
    fn name(&self) -> &'static str {
        "jpegtran"
    }

    fn compress(&self, bytes: &[u8]) -> Result<Vec<u8>> {
        if sniff_bytes(bytes) != SniffedFormat::Jpeg {
            return Ok(bytes.to_vec());
        }

        let img = image::load_from_memory(bytes).map_err(codec_error)?;
        let mut out = Cursor::new(Vec::new());
        img.write_with_encoder(JpegEncoder::new_with_quality(&mut out, self.quality))
            .map_err(codec_error)?;
        Ok(keep_smaller(bytes, out.into_inner()))
    }
}

/// Lossless PNG optimization via oxipng.
struct Optipng {
    quality: u8,
}

impl CompressStrategy for Optipng {
    fn name(&self) -> &'static str {
        "optipng"
    }

    fn compress(&self, bytes: &[u8]) -> Result<Vec<u8>> {
        if sniff_bytes(bytes) != SniffedFormat::Png {
            return Ok(bytes.to_vec());
        }

        let mut options = Options::from_preset(OXIPNG_PRESET);
        // Quality >=90 buys the slow Zopfli search, >=70 a thorough
        // libdeflater pass, anything below a faster level.
        options.deflate = if self.quality >= 90 {
            Deflaters::Zopfli {
                iterations: NonZeroU8::new(ZOPFLI_ITERATIONS).unwrap(),
            }
        } else if self.quality >= 70 {
            Deflaters::Libdeflater {
                compression: LIBDEFLATER_HIGH_LEVEL,
            }
        } else {
            Deflaters::Libdeflater {
                compression: LIBDEFLATER_LOW_LEVEL,
            }
        };

        let out = oxipng::optimize_from_memory(bytes, &options).map_err(codec_error)?;
        Ok(keep_smaller(bytes, out))
    }
}

/// SVG text minification: comment stripping and whitespace collapse.
struct Svgo;

impl CompressStrategy for Svgo {
    fn name(&self) -> &'static str {
        "svgo"
    }

    fn compress(&self, bytes: &[u8]) -> Result<Vec<u8>> {
        if sniff_bytes(bytes) != SniffedFormat::Svg {
            return Ok(bytes.to_vec());
        }
        let Ok(text) = std::str::from_utf8(bytes) else {
            return Ok(bytes.to_vec());
        };
        let minified = minify_svg(text);
        if minified.len() < bytes.len() {
            Ok(minified.into_bytes())
        } else {
            Ok(bytes.to_vec())
        }
    }
}

fn minify_svg(text: &str) -> String {
    let mut stripped = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("<!--") {
        stripped.push_str(&rest[..start]);
        match rest[start..].find("-->") {
            Some(end) => rest = &rest[start + end + 3..],
            None => {
                rest = "";
                break;
            }
        }
    }
    stripped.push_str(rest);

    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.replace("> <", "><")
}
