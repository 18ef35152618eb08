//! Analysis CLI - compute intensity and edge metrics for normalized arrays.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use radiograph_pipeline::pipeline::{DEFAULT_PROCESSED_DIR, DEFAULT_REPORT_PATH};
use radiograph_pipeline::{run_analysis_pipeline, AnalysisConfig, EdgeChannelMode, EdgeParams};

/// Channel handling for edge detection.
#[derive(ValueEnum, Clone, Copy, Debug)]
enum ChannelMode {
    /// Detect edges per channel and merge the maps.
    PerChannel,
    /// Convert to luminosity before detecting edges.
    Luma,
}

impl From<ChannelMode> for EdgeChannelMode {
    fn from(mode: ChannelMode) -> Self {
        match mode {
            ChannelMode::PerChannel => Self::PerChannel,
            ChannelMode::Luma => Self::Luma,
        }
    }
}

/// Aggregate per-array metrics into a CSV report.
#[derive(Parser, Debug)]
#[command(name = "analyze")]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory of `.npy` arrays produced by `preprocess`.
    #[arg(short, long, default_value = DEFAULT_PROCESSED_DIR, value_name = "DIR")]
    input: PathBuf,

    /// Output CSV path.
    #[arg(short, long, default_value = DEFAULT_REPORT_PATH, value_name = "FILE")]
    output: PathBuf,

    /// Canny low threshold.
    #[arg(long, default_value = "100", value_name = "FLOAT")]
    low_threshold: f32,

    /// Canny high threshold.
    #[arg(long, default_value = "200", value_name = "FLOAT")]
    high_threshold: f32,

    /// How multi-channel arrays are fed to the edge detector.
    #[arg(long, value_enum, default_value_t = ChannelMode::PerChannel)]
    channel_mode: ChannelMode,

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
                format!("radiograph_pipeline={log_level},analyze={log_level}").into()
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
    let config = AnalysisConfig {
        input_dir: args.input.clone(),
        output_csv: args.output.clone(),
        edges: EdgeParams {
            low_threshold: args.low_threshold,
            high_threshold: args.high_threshold,
            channel_mode: args.channel_mode.into(),
        },
    };

    let summary = run_analysis_pipeline(&config)
        .with_context(|| format!("Failed to analyze {}", config.input_dir.display()))?;

    match summary.report {
        Some(path) => println!(
            "Analyzed {} arrays ({} failed). Results saved to {}",
            summary.records.len(),
            summary.failed,
            path.display()
        ),
        None => println!("No results found. Did you run preprocess first?"),
    }

    Ok(())
}
