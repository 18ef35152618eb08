//! # radiograph-pipeline
//!
//! Offline batch pipeline for medical image datasets, in two stages:
//!
//! 1. **Preprocessing** decodes raw PNG/JPEG scans, resizes them to a fixed
//!    size, normalizes samples to [0, 1], and stores each one as a `.npy` array.
//! 2. **Analysis** loads those arrays, computes intensity statistics and a
//!    Canny edge density per array, and writes them to a CSV report.
//!
//! Each stage is a single pass over a directory. A file that fails is logged
//! and skipped; the batch always continues.
//!
//! ## Example
//!
//! ```no_run
//! use radiograph_pipeline::{process_dataset, run_analysis_pipeline};
//! use radiograph_pipeline::{AnalysisConfig, PreprocessConfig};
//!
//! # fn main() -> radiograph_pipeline::Result<()> {
//! let prep = process_dataset(&PreprocessConfig::default())?;
//! println!("{} arrays written", prep.processed);
//!
//! let analysis = run_analysis_pipeline(&AnalysisConfig::default())?;
//! println!("{} rows", analysis.records.len());
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod error;
pub mod image;
pub mod pipeline;

pub use analysis::{analyze_single_image, EdgeChannelMode, EdgeParams, MetricsRecord};
pub use error::{Error, Result};
pub use image::{preprocess_image, NormalizedArray};
pub use pipeline::{
    process_dataset, run_analysis_pipeline, AnalysisConfig, AnalysisSummary, PreprocessConfig,
    PreprocessSummary,
};
