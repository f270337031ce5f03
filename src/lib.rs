pub mod batch;
pub mod cli;
pub mod compress;
pub mod constants;
pub mod error;
pub mod input;
pub mod resize;
pub mod router;
pub mod sniff;
pub mod strategy;

pub use batch::{run_batch, BatchSummary, ItemOutcome, ItemReport, OperationMode, RunOptions};
pub use compress::compress_item;
pub use error::{PicplusError, Result};
pub use input::{collect_inputs, is_image_file, InputItem};
pub use resize::resize_item;
pub use router::{route, Sink};
pub use sniff::{sniff_bytes, sniff_file, SniffedFormat};
pub use strategy::{resolve_strategies, CompressStrategy};
