//! Per-item resizing, gated on the sniffed format.

use crate::batch::ItemOutcome;
use crate::error::{PicplusError, Result};
use crate::input::InputItem;
use crate::router::Sink;
use crate::sniff::sniff_bytes;
use image::imageops::FilterType;
use std::ffi::OsString;
use std::fs;

/// Scale one item to the target width, deriving height from the aspect
/// ratio, and write it as `<width>_<basename>` into the sink directory.
pub fn resize_item(item: &InputItem, width: u32, sink: &Sink) -> Result<ItemOutcome> {
    let bytes = item.read_bytes()?;
    let bytes_in = bytes.len() as u64;

    let format = sniff_bytes(&bytes);
    if !format.resize_supported() {
        return Err(PicplusError::UnsupportedFormat(format.to_string()));
    }
    let image_format = format
        .to_image_format()
        .ok_or_else(|| PicplusError::UnsupportedFormat(format.to_string()))?;

    let dir = match sink {
        Sink::Directory(dir) => dir,
        Sink::Stdout => {
            return Err(PicplusError::ResizeFailed(
                "resize cannot write to stdout".to_string(),
            ))
        }
    };

    let img = image::load_from_memory(&bytes)
        .map_err(|e| PicplusError::ResizeFailed(e.to_string()))?;
    let height = scaled_height(img.width(), img.height(), width);
    let resized = img.resize_exact(width, height, FilterType::Lanczos3);

    let base = match item.file_name() {
        Some(name) => name,
        None => OsString::from(format!("stdin.{}", format.extension())),
    };
    let mut file_name = OsString::from(format!("{}_", width));
    file_name.push(&base);
    let output = dir.join(file_name);

    resized
        .save_with_format(&output, image_format)
        .map_err(|e| PicplusError::ResizeFailed(e.to_string()))?;
    let bytes_out = fs::metadata(&output)?.len();

    Ok(ItemOutcome {
        output: Some(output),
        bytes_in,
        bytes_out,
        dimensions: Some((resized.width(), resized.height())),
    })
}

fn scaled_height(orig_width: u32, orig_height: u32, target_width: u32) -> u32 {
    let ratio = target_width as f32 / orig_width as f32;
    ((orig_height as f32 * ratio).round() as u32).max(1)
}
