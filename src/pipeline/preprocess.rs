//! Preprocessing stage: raw images to normalized arrays.

use std::path::PathBuf;

use image::imageops::FilterType;

use crate::error::{Error, Result};
use crate::image::{preprocess_image, save_array, ARRAY_EXTENSION, IMAGE_EXTENSIONS, TARGET_SIZE};

use super::{ensure_dir, list_files, progress_bar};

/// Default location of the raw training images.
pub const DEFAULT_RAW_DIR: &str = "chest_xray_images/chest_xray/train/NORMAL";

/// Default location of the normalized arrays.
pub const DEFAULT_PROCESSED_DIR: &str = "data/processed/NORMAL";

/// Configuration for the preprocessing stage.
#[derive(Debug, Clone)]
pub struct PreprocessConfig {
    /// Directory holding raw images. Not searched recursively.
    pub input_dir: PathBuf,

    /// Directory receiving one `.npy` file per processed image.
    pub output_dir: PathBuf,

    /// Output (width, height).
    pub target_size: (u32, u32),

    /// Resampling filter used for resizing.
    pub filter: FilterType,

    /// Log progress after every this many successfully processed images.
    pub progress_interval: usize,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_RAW_DIR),
            output_dir: PathBuf::from(DEFAULT_PROCESSED_DIR),
            target_size: (TARGET_SIZE, TARGET_SIZE),
            filter: FilterType::Triangle,
            progress_interval: 10,
        }
    }
}

impl PreprocessConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of valid range.
    pub fn validate(&self) -> Result<()> {
        let (width, height) = self.target_size;
        if width == 0 || height == 0 {
            return Err(Error::InvalidParameter {
                name: "target_size".to_string(),
                reason: format!("dimensions must be positive, got {width}x{height}"),
            });
        }

        if self.progress_interval == 0 {
            return Err(Error::InvalidParameter {
                name: "progress_interval".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

/// Outcome of a preprocessing run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreprocessSummary {
    /// Number of images written as arrays.
    pub processed: usize,

    /// Number of matching images that failed to decode or save.
    pub skipped: usize,

    /// Paths of the written arrays, in processing order.
    pub outputs: Vec<PathBuf>,
}

/// Preprocess every image in `config.input_dir` into `config.output_dir`.
///
/// Per-image failures are logged and skipped; earlier outputs are kept.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the output directory
/// cannot be created, or the input directory cannot be listed.
pub fn process_dataset(config: &PreprocessConfig) -> Result<PreprocessSummary> {
    config.validate()?;
    ensure_dir(&config.output_dir)?;

    let images = list_files(&config.input_dir, |ext| {
        IMAGE_EXTENSIONS
            .iter()
            .any(|candidate| ext.eq_ignore_ascii_case(candidate))
    })?;

    tracing::info!(
        "Preprocessing {} images from {}",
        images.len(),
        config.input_dir.display()
    );

    let mut summary = PreprocessSummary::default();
    let pb = progress_bar(images.len(), "Preprocessing");

    for input_path in &images {
        pb.inc(1);

        let array = match preprocess_image(input_path, config.target_size, config.filter) {
            Ok(array) => array,
            Err(err) => {
                tracing::warn!("Could not read image {}: {err}", input_path.display());
                summary.skipped += 1;
                continue;
            }
        };

        let Some(stem) = input_path.file_stem() else {
            summary.skipped += 1;
            continue;
        };
        // Stems may contain dots, so append the extension instead of replacing one
        let mut file_name = stem.to_os_string();
        file_name.push(".");
        file_name.push(ARRAY_EXTENSION);
        let output_path = config.output_dir.join(file_name);

        if let Err(err) = save_array(&array, &output_path) {
            tracing::warn!("{err}");
            summary.skipped += 1;
            continue;
        }

        summary.processed += 1;
        summary.outputs.push(output_path);

        if summary.processed % config.progress_interval == 0 {
            tracing::info!("Processed {} images...", summary.processed);
        }
    }

    pb.finish_and_clear();
    tracing::info!(
        "Done. Successfully processed {} images ({} skipped)",
        summary.processed,
        summary.skipped
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PreprocessConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.target_size, (224, 224));
        assert_eq!(config.output_dir, PathBuf::from("data/processed/NORMAL"));
    }

    #[test]
    fn test_zero_target_size_rejected() {
        let config = PreprocessConfig {
            target_size: (224, 0),
            ..PreprocessConfig::default()
        };

        assert!(matches!(
            config.validate(),
            Err(Error::InvalidParameter { .. })
        ));
    }
}
