//! Output routing: decide once per run where results go.

use crate::batch::OperationMode;
use crate::error::{PicplusError, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sink {
    Directory(PathBuf),
    Stdout,
}

impl Sink {
    /// Eagerly create the directory sink. Idempotent; runs before any item
    /// is processed and a failure aborts the whole run.
    pub fn prepare(&self) -> Result<()> {
        if let Sink::Directory(dir) = self {
            fs::create_dir_all(dir)
                .map_err(|_| PicplusError::DirectoryCreationFailed(dir.clone()))?;
        }
        Ok(())
    }
}

/// Route a run's output. The decision depends only on the operation mode,
/// the number of inputs, the presence of an output directory, and the force
/// flag; it is made once, before any item is processed.
pub fn route(
    mode: OperationMode,
    input_count: usize,
    out: Option<&Path>,
    force: bool,
) -> Result<Sink> {
    match mode {
        OperationMode::Resize => match out {
            Some(dir) => Ok(Sink::Directory(dir.to_path_buf())),
            None => Err(PicplusError::OutputSink(
                "An output directory is required for resize; specify --out".to_string(),
            )),
        },
        OperationMode::Compress => {
            if let Some(dir) = out {
                return Ok(Sink::Directory(dir.to_path_buf()));
            }
            if force {
                return Ok(Sink::Directory(env::current_dir()?));
            }
            match input_count {
                0 => Err(PicplusError::OutputSink(
                    "Nothing produced to compress".to_string(),
                )),
                1 => Ok(Sink::Stdout),
                _ => Err(PicplusError::OutputSink(
                    "Cannot write multiple files to stdout; specify --out or override with --force"
                        .to_string(),
                )),
            }
        }
    }
}
