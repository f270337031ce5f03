//! Per-item compression: strategy pipeline plus output writing.

use crate::batch::ItemOutcome;
use crate::error::{PicplusError, Result};
use crate::input::InputItem;
use crate::router::Sink;
use crate::sniff::sniff_bytes;
use crate::strategy::CompressStrategy;
use std::ffi::OsString;
use std::fs;
use std::io::Write;

/// Apply the resolved strategies to one item and write the result.
///
/// Strategies apply in order to the same byte stream. With a `Stdout` sink
/// the bytes go straight to standard output and the outcome carries no path.
pub fn compress_item(
    item: &InputItem,
    strategies: &[Box<dyn CompressStrategy>],
    sink: &Sink,
) -> Result<ItemOutcome> {
    let original = item.read_bytes()?;
    let bytes_in = original.len() as u64;

    let mut bytes = original;
    for strategy in strategies {
        bytes = strategy.compress(&bytes)?;
    }
    let bytes_out = bytes.len() as u64;

    match sink {
        Sink::Stdout => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(&bytes)
                .and_then(|()| stdout.flush())
                .map_err(|e| PicplusError::CompressionFailed(e.to_string()))?;
            Ok(ItemOutcome {
                output: None,
                bytes_in,
                bytes_out,
                dimensions: None,
            })
        }
        Sink::Directory(dir) => {
            let output = dir.join(output_file_name(item, &bytes)?);
            fs::write(&output, &bytes)
                .map_err(|e| PicplusError::CompressionFailed(e.to_string()))?;
            Ok(ItemOutcome {
                output: Some(output),
                bytes_in,
                bytes_out,
                dimensions: None,
            })
        }
    }
}

// The original basename is preserved; a stdin buffer gets a name derived
// from its sniffed format.
fn output_file_name(item: &InputItem, bytes: &[u8]) -> Result<OsString> {
    match item.file_name() {
        Some(name) => Ok(name),
        None => match item {
            InputItem::Buffer(_) => {
                Ok(OsString::from(format!("stdin.{}", sniff_bytes(bytes).extension())))
            }
            InputItem::Path(path) => Err(PicplusError::CompressionFailed(format!(
                "invalid file name: {}",
                path.display()
            ))),
        },
    }
}
