//! Per-array metrics record.

use std::path::Path;

use ndarray::{ArrayD, ArrayView3, Axis, Ix2, Ix3};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::image::load_array;

use super::edges::{edge_density, EdgeParams};
use super::stats::{intensity_stats, to_u8_samples};

/// One row of the results table.
///
/// Field order is the column order of the CSV report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    /// Base name of the analyzed array file.
    pub filename: String,

    /// Arithmetic mean of all samples.
    pub mean_intensity: f64,

    /// Population standard deviation of all samples.
    pub std_intensity: f64,

    /// Fraction of pixels on a Canny edge, in [0, 1].
    pub edge_density: f64,
}

/// Load a persisted array and compute its [`MetricsRecord`].
///
/// # Errors
///
/// Returns an error if the file cannot be read or its contents cannot be
/// analyzed. Callers are expected to log and skip.
pub fn analyze_single_image<P: AsRef<Path>>(
    path: P,
    params: &EdgeParams,
) -> Result<MetricsRecord> {
    let path = path.as_ref();

    let array = load_array(path)?;
    let filename = path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    );

    compute_metrics(filename, &array, params)
}

/// Compute metrics for an in-memory array.
///
/// Accepts `(H, W)` or `(H, W, C)` arrays with `C` of 1 or 3. No range is
/// assumed; samples outside [0, 1] are clamped when rescaled for edge detection.
///
/// # Errors
///
/// Returns an error for unsupported shapes, empty arrays, or invalid
/// edge-detection parameters.
pub fn compute_metrics(
    filename: impl Into<String>,
    array: &ArrayD<f32>,
    params: &EdgeParams,
) -> Result<MetricsRecord> {
    let hwc = as_hwc(array)?;

    let stats = intensity_stats(&hwc).ok_or(Error::EmptyArray)?;
    let samples = to_u8_samples(&hwc);
    let density = edge_density(&samples, params)?;

    Ok(MetricsRecord {
        filename: filename.into(),
        mean_intensity: stats.mean,
        std_intensity: stats.std,
        edge_density: density,
    })
}

/// View an array as HWC, adding a channel axis to 2D input.
fn as_hwc(array: &ArrayD<f32>) -> Result<ArrayView3<'_, f32>> {
    let mismatch = || Error::ShapeMismatch {
        expected: "(H, W) or (H, W, C) array".to_string(),
        actual: format!("{:?}", array.shape()),
    };

    match array.ndim() {
        2 => array
            .view()
            .into_dimensionality::<Ix2>()
            .map(|view| view.insert_axis(Axis(2)))
            .map_err(|_| mismatch()),
        3 => array.view().into_dimensionality::<Ix3>().map_err(|_| mismatch()),
        _ => Err(mismatch()),
    }
}
