//! Command-line front end for the tickfence outlier detector.
//!
//! Reads a `Date,Price` delimited file, runs the causal Tukey's-fences
//! detector over it, prints run statistics, and writes the cleaned series
//! back out. Outlier notices are emitted on the log as they are found.
//!
//! ```bash
//! tickfence -i input.csv -o output.csv
//! tickfence -i ticks.csv -d ';' -k 3.0 -w 20 -o clean.csv
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tickfence_core::DetectorConfig;
use tickfence_detect::Detector;
use tickfence_io::{SeriesReader, SeriesWriter};

#[derive(Parser)]
#[command(name = "tickfence")]
#[command(version, about = "Detect and remove outliers from a (date, price) series", long_about = None)]
struct Args {
    /// Input delimited file
    #[arg(short, long, default_value = "input.csv")]
    input: PathBuf,

    /// Field delimiter (single character)
    #[arg(short, long, default_value = ",")]
    delimiter: String,

    /// Tukey's fences multiplier
    #[arg(short, long, default_value = "1.5")]
    k: f64,

    /// Sub-window size in points
    #[arg(short, long, default_value = "5")]
    window: usize,

    /// Output delimited file for the cleaned series
    #[arg(short, long, default_value = "output.csv")]
    output: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let delimiter = parse_delimiter(&args.delimiter)?;
    let config = DetectorConfig::new(args.k, args.window)
        .context("invalid detector configuration")?;

    // Interrupt flag, checked between points so a stop request never splits
    // a point-processing step.
    let interrupted = Arc::new(AtomicBool::new(false));
    {
        let interrupted = interrupted.clone();
        ctrlc::set_handler(move || {
            interrupted.store(true, Ordering::SeqCst);
        })
        .context("failed to install interrupt handler")?;
    }

    info!(input = %args.input.display(), "input file");
    info!(delimiter = %args.delimiter, "field delimiter");
    info!(k = config.k, "Tukey's fences multiplier");
    info!(window = config.window_size, "sub-window size");
    info!(output = %args.output.display(), "output file");

    let file = File::open(&args.input)
        .with_context(|| format!("failed to open input '{}'", args.input.display()))?;
    let points = SeriesReader::new(delimiter)
        .read_points(BufReader::new(file))
        .with_context(|| format!("failed to read '{}'", args.input.display()))?;

    let mut detector = Detector::new(config)?;
    for point in points {
        if interrupted.load(Ordering::SeqCst) {
            // No partial output file: abort before any write happens.
            eprintln!("\nInterrupted by user.");
            return Ok(());
        }
        detector.push(point)?;
    }
    let detection = detector.finish();

    println!("{} data read", detection.stats.total_read);
    println!("{} cleaned data read", detection.stats.total_clean());
    println!("{} outliers found by detector", detection.stats.total_outliers);

    let file = File::create(&args.output)
        .with_context(|| format!("failed to create output '{}'", args.output.display()))?;
    SeriesWriter::new(delimiter)
        .write_points(BufWriter::new(file), &detection.clean)
        .with_context(|| format!("failed to write '{}'", args.output.display()))?;

    Ok(())
}

/// Resolve the delimiter option to a single byte.
fn parse_delimiter(s: &str) -> Result<u8> {
    let bytes = s.as_bytes();
    if bytes.len() != 1 {
        bail!("delimiter must be a single character, got '{s}'");
    }
    Ok(bytes[0])
}
