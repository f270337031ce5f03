use clap::Parser;
use picplus::batch::{run_batch, OperationMode, RunOptions};
use picplus::cli::Args;
use picplus::input::collect_inputs;
use std::process;

fn main() {
    let args = Args::parse();
    process::exit(run(args));
}

// All exit-code decisions live here: run-aborting errors and all-items-failed
// batches exit 1, everything else exits 0.
fn run(args: Args) -> i32 {
    let Some(mode) = OperationMode::from_flags(args.compress, args.resize) else {
        eprintln!("❌ Specify --compress or --resize");
        return 1;
    };

    let options = match RunOptions::new(
        mode,
        args.plugin,
        args.quality,
        args.out,
        args.width,
        args.force,
    ) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("❌ {}", err);
            return 1;
        }
    };

    let inputs = match collect_inputs(&args.inputs, mode == OperationMode::Compress) {
        Ok(inputs) => inputs,
        Err(err) => {
            eprintln!("❌ {}", err);
            return 1;
        }
    };

    match run_batch(inputs, mode, &options) {
        Ok(summary) if summary.succeeded == 0 && summary.failed > 0 => 1,
        Ok(_) => 0,
        Err(err) => {
            eprintln!("❌ {}", err);
            1
        }
    }
}
