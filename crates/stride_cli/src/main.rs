use std::sync::Once;
use std::thread::sleep;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use stride_progress::{ndindex, ProgressBar, ProgressIteratorExt};
use tracing::{info, Level};

static INIT: Once = Once::new();

fn init_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .with_writer(std::io::stderr)
            .init();
    });
}

/// Drive a simulated workload behind a progress bar.
#[derive(Parser, Debug)]
#[command(name = "stride")]
struct Args {
    /// Number of steps to run
    #[arg(long, default_value_t = 100)]
    steps: u64,

    /// Simulated work per step, in milliseconds
    #[arg(long, default_value_t = 50)]
    step_ms: u64,

    /// Smoothing factor for the time estimate, clamped to [0, 1]
    #[arg(long, default_value_t = 0.1)]
    smoothing: f64,

    /// Minimum milliseconds between display refreshes
    #[arg(long, default_value_t = 1000)]
    interval_ms: u64,

    /// Iterate a rows x cols grid through the index iterator instead of a
    /// flat step loop
    #[arg(long)]
    grid: bool,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();
    let work = Duration::from_millis(args.step_ms);

    if args.grid {
        // Square-ish grid covering the requested number of steps.
        let side = (args.steps as f64).sqrt().ceil() as usize;
        info!(rows = side, cols = side, "iterating grid");
        let bar = ProgressBar::new((side * side) as u64)
            .with_smoothing(args.smoothing)
            .with_interval(Duration::from_millis(args.interval_ms));
        for _coord in ndindex(&[side, side]).progress_with(bar) {
            sleep(work);
        }
    } else {
        info!(steps = args.steps, "running workload");
        let mut bar = ProgressBar::new(args.steps)
            .with_smoothing(args.smoothing)
            .with_interval(Duration::from_millis(args.interval_ms));
        for _ in 0..args.steps {
            sleep(work);
            bar.inc();
        }
        bar.close();
    }

    info!("done");
    Ok(())
}
