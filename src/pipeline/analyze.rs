//! Analysis stage: normalized arrays to a metrics report.

use std::path::PathBuf;

use crate::analysis::{analyze_single_image, EdgeParams, MetricsRecord};
use crate::error::Result;
use crate::image::ARRAY_EXTENSION;

use super::preprocess::DEFAULT_PROCESSED_DIR;
use super::{ensure_dir, list_files, progress_bar, write_report};

/// Default location of the results table.
pub const DEFAULT_REPORT_PATH: &str = "data/results/analysis_metrics.csv";

/// Configuration for the analysis stage.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Directory holding `.npy` arrays from the preprocessing stage.
    pub input_dir: PathBuf,

    /// CSV file to write. Overwritten on every run that yields records.
    pub output_csv: PathBuf,

    /// Edge detection parameters.
    pub edges: EdgeParams,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_PROCESSED_DIR),
            output_csv: PathBuf::from(DEFAULT_REPORT_PATH),
            edges: EdgeParams::default(),
        }
    }
}

impl AnalysisConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge detection parameters are invalid.
    pub fn validate(&self) -> Result<()> {
        self.edges.validate()
    }
}

/// Outcome of an analysis run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisSummary {
    /// Successfully analyzed arrays, in directory-listing order.
    pub records: Vec<MetricsRecord>,

    /// Number of array files that could not be analyzed.
    pub failed: usize,

    /// Path of the written report, or `None` when there was nothing to write.
    pub report: Option<PathBuf>,
}

/// Analyze every array in `config.input_dir` and write the results table.
///
/// Arrays that fail to load or analyze are logged and left out of the table.
/// When no array succeeds, the report file is left untouched.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the report directory
/// cannot be created, the input directory cannot be listed, or the report
/// cannot be written.
pub fn run_analysis_pipeline(config: &AnalysisConfig) -> Result<AnalysisSummary> {
    config.validate()?;

    if let Some(parent) = config.output_csv.parent() {
        ensure_dir(parent)?;
    }

    tracing::info!("Starting analysis on {}...", config.input_dir.display());

    let arrays = list_files(&config.input_dir, |ext| ext == ARRAY_EXTENSION)?;

    let mut summary = AnalysisSummary::default();
    let pb = progress_bar(arrays.len(), "Analyzing");

    for path in &arrays {
        pb.inc(1);

        match analyze_single_image(path, &config.edges) {
            Ok(record) => {
                tracing::debug!("{record:?}");
                summary.records.push(record);
            }
            Err(err) => {
                tracing::error!("Error analyzing {}: {err}", path.display());
                summary.failed += 1;
            }
        }
    }

    pb.finish_and_clear();

    if summary.records.is_empty() {
        tracing::warn!("No results found. Did you run the preprocessing stage first?");
        return Ok(summary);
    }

    write_report(&config.output_csv, &summary.records)?;
    tracing::info!(
        "Analysis complete. Results saved to {}",
        config.output_csv.display()
    );
    tracing::info!("Total images analyzed: {}", summary.records.len());

    summary.report = Some(config.output_csv.clone());
    Ok(summary)
}
