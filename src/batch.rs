//! Batch orchestration: mode selection, strategy resolution, output routing,
//! and concurrency-bounded per-item processing with isolated failures.

use crate::compress::compress_item;
use crate::constants::{
    DEFAULT_QUALITY, MAX_PARALLEL_ITEMS, MAX_QUALITY, MEMORY_ESTIMATE_MULTIPLIER,
    MIN_AVAILABLE_MEMORY_MIB, MIN_QUALITY,
};
use crate::error::{PicplusError, Result};
use crate::input::InputItem;
use crate::resize::resize_item;
use crate::router::{route, Sink};
use crate::strategy::resolve_strategies;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{MemoryRefreshKind, RefreshKind, System};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    Compress,
    Resize,
}

impl OperationMode {
    /// Resolve the two CLI flags into a mode. Resize wins when both are
    /// set; compress and resize are never chained.
    pub fn from_flags(compress: bool, resize: bool) -> Option<Self> {
        if resize {
            Some(OperationMode::Resize)
        } else if compress {
            Some(OperationMode::Compress)
        } else {
            None
        }
    }

    fn verb(&self) -> &'static str {
        match self {
            OperationMode::Compress => "minified",
            OperationMode::Resize => "resized",
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Strategy names in application order; empty means the default set.
    pub strategies: Vec<String>,
    pub quality: u8,
    pub out: Option<PathBuf>,
    pub width: Option<u32>,
    pub force: bool,
}

impl RunOptions {
    pub fn new(
        mode: OperationMode,
        strategies: Vec<String>,
        quality: Option<u8>,
        out: Option<PathBuf>,
        width: Option<u32>,
        force: bool,
    ) -> Result<Self> {
        let options = Self {
            strategies,
            quality: quality.unwrap_or(DEFAULT_QUALITY),
            out,
            width,
            force,
        };
        options.validate(mode)?;
        Ok(options)
    }

    fn validate(&self, mode: OperationMode) -> Result<()> {
        if !(MIN_QUALITY..=MAX_QUALITY).contains(&self.quality) {
            return Err(PicplusError::InvalidQuality(self.quality));
        }
        if mode == OperationMode::Resize {
            match self.width {
                None => return Err(PicplusError::MissingWidth),
                Some(0) => return Err(PicplusError::InvalidWidth(0)),
                Some(_) => {}
            }
        }
        Ok(())
    }
}

/// Success descriptor for one processed item.
#[derive(Debug)]
pub struct ItemOutcome {
    /// Written path; `None` when the bytes went to stdout.
    pub output: Option<PathBuf>,
    pub bytes_in: u64,
    pub bytes_out: u64,
    /// Final width/height, resize only.
    pub dimensions: Option<(u32, u32)>,
}

/// Exactly one per input item, in input order.
#[derive(Debug)]
pub struct ItemReport {
    pub label: String,
    pub result: Result<ItemOutcome>,
}

#[derive(Debug, Default)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub bytes_in: u64,
    pub bytes_out: u64,
    pub reports: Vec<ItemReport>,
}

impl BatchSummary {
    pub fn ratio(&self) -> f64 {
        if self.bytes_in == 0 {
            return 0.0;
        }
        ((self.bytes_in as f64 - self.bytes_out as f64) / self.bytes_in as f64) * 100.0
    }
}

/// Run a whole batch.
///
/// Strategy resolution and output routing happen exactly once, before any
/// item is touched; their failures abort the run. Item processing then fans
/// out over a bounded rayon pool, every item yields exactly one report, and
/// a failing item never stops its siblings.
pub fn run_batch(
    inputs: Vec<InputItem>,
    mode: OperationMode,
    options: &RunOptions,
) -> Result<BatchSummary> {
    if inputs.is_empty() {
        return Err(PicplusError::NoInput);
    }
    options.validate(mode)?;

    let start = Instant::now();

    let strategies = match mode {
        OperationMode::Compress => resolve_strategies(&options.strategies, options.quality)?,
        OperationMode::Resize => Vec::new(),
    };
    let width = match mode {
        OperationMode::Resize => options.width.ok_or(PicplusError::MissingWidth)?,
        OperationMode::Compress => 0,
    };

    let sink = route(mode, inputs.len(), options.out.as_deref(), options.force)?;
    sink.prepare()?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(plan_parallelism(&inputs))
        .build()
        .expect("Failed to build Rayon thread pool");

    // The bar would corrupt a stdout payload, so it only runs for
    // directory sinks.
    let progress = match &sink {
        Sink::Directory(_) => {
            let pb = ProgressBar::new(inputs.len() as u64);
            pb.set_style(ProgressStyle::default_bar());
            pb
        }
        Sink::Stdout => ProgressBar::hidden(),
    };

    let reports: Vec<ItemReport> = pool.install(|| {
        inputs
            .par_iter()
            .map(|item| {
                let result = match mode {
                    OperationMode::Compress => compress_item(item, &strategies, &sink),
                    OperationMode::Resize => resize_item(item, width, &sink),
                };
                progress.inc(1);
                ItemReport {
                    label: item.label(),
                    result,
                }
            })
            .collect()
    });
    progress.finish_and_clear();

    let mut summary = BatchSummary::default();
    for report in &reports {
        match &report.result {
            Ok(outcome) => {
                summary.succeeded += 1;
                summary.bytes_in += outcome.bytes_in;
                summary.bytes_out += outcome.bytes_out;
            }
            Err(err) => {
                summary.failed += 1;
                eprintln!("❌ {}: {}", report.label, err);
            }
        }
    }

    if mode == OperationMode::Resize {
        for report in &reports {
            if let Ok(outcome) = &report.result {
                if let Some((w, h)) = outcome.dimensions {
                    println!("{} resized {}x{}", report.label, w, h);
                }
            }
        }
    }

    let noun = if summary.succeeded == 1 { "image" } else { "images" };
    let line = format!("{} {} {}", summary.succeeded, noun, mode.verb());
    match &sink {
        Sink::Directory(_) => {
            println!("✅ {}", line);
            if mode == OperationMode::Compress && summary.bytes_in > 0 {
                println!(
                    "📊 {} -> {} bytes ({:.1}% smaller, {:.2?})",
                    summary.bytes_in,
                    summary.bytes_out,
                    summary.ratio(),
                    start.elapsed()
                );
            }
        }
        // Keep stdout clean for the payload
        Sink::Stdout => eprintln!("{}", line),
    }

    summary.reports = reports;
    Ok(summary)
}

// Parallelism is the smaller of the core count, the item count, a hard cap
// on open descriptors, and what available memory can hold given a
// conservative decoded-size estimate.
fn plan_parallelism(inputs: &[InputItem]) -> usize {
    let baseline = num_cpus::get().min(inputs.len()).clamp(1, MAX_PARALLEL_ITEMS);

    let estimated_mib: u64 = inputs
        .iter()
        .map(|item| {
            let on_disk = match item {
                InputItem::Path(path) => fs::metadata(path).map(|m| m.len()).unwrap_or(0),
                InputItem::Buffer(buffer) => buffer.len() as u64,
            };
            (on_disk * MEMORY_ESTIMATE_MULTIPLIER) / (1024 * 1024)
        })
        .sum();
    let avg_per_item_mib = (estimated_mib / inputs.len() as u64).max(1);

    let mut sys =
        System::new_with_specifics(RefreshKind::new().with_memory(MemoryRefreshKind::new()));
    sys.refresh_memory();
    let available_mib = sys.available_memory() / (1024 * 1024);
    let mem_cap = (available_mib.saturating_sub(MIN_AVAILABLE_MEMORY_MIB) / avg_per_item_mib)
        .clamp(1, baseline as u64) as usize;

    baseline.min(mem_cap)
}
