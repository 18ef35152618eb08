//! Preprocessing CLI - turn raw scans into normalized `.npy` arrays.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use radiograph_pipeline::image::TARGET_SIZE;
use radiograph_pipeline::pipeline::{DEFAULT_PROCESSED_DIR, DEFAULT_RAW_DIR};
use radiograph_pipeline::{process_dataset, PreprocessConfig};

/// Resize and normalize every PNG/JPEG image in a directory.
#[derive(Parser, Debug)]
#[command(name = "preprocess")]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory of raw images.
    #[arg(short, long, default_value = DEFAULT_RAW_DIR, value_name = "DIR")]
    input: PathBuf,

    /// Directory for the normalized arrays.
    #[arg(short, long, default_value = DEFAULT_PROCESSED_DIR, value_name = "DIR")]
    output: PathBuf,

    /// Output width in pixels.
    #[arg(long, default_value_t = TARGET_SIZE, value_name = "INT")]
    width: u32,

    /// Output height in pixels.
    #[arg(long, default_value_t = TARGET_SIZE, value_name = "INT")]
    height: u32,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("radiograph_pipeline={log_level},preprocess={log_level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Err(err) = run(&args) {
        tracing::error!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(args: &Args) -> Result<()> {
    let config = PreprocessConfig {
        input_dir: args.input.clone(),
        output_dir: args.output.clone(),
        target_size: (args.width, args.height),
        ..PreprocessConfig::default()
    };

    println!("Starting preprocessing pipeline...");

    let summary = process_dataset(&config).with_context(|| {
        format!(
            "Failed to preprocess {} into {}",
            config.input_dir.display(),
            config.output_dir.display()
        )
    })?;

    println!(
        "Done. Successfully processed {} images ({} skipped).",
        summary.processed, summary.skipped
    );

    Ok(())
}
