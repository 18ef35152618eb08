//! Canny edge detection over rescaled intensity arrays.

use image::{GrayImage, Luma};
use imageproc::edges::canny;
use ndarray::{Array3, ArrayView2, Axis};

use crate::error::{Error, Result};

/// How a multi-channel array is presented to the single-channel Canny detector.
///
/// Stored arrays keep the three colour channels and no grayscale conversion
/// happens upstream, so the edge count depends on this choice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EdgeChannelMode {
    /// Run Canny on every channel and mark a pixel as edge when any channel does.
    #[default]
    PerChannel,
    /// Collapse channels to luminosity first, then run Canny once.
    Luma,
}

/// Parameters for edge detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeParams {
    /// Hysteresis low threshold on gradient magnitude.
    pub low_threshold: f32,

    /// Hysteresis high threshold on gradient magnitude.
    pub high_threshold: f32,

    /// Channel handling for multi-channel input.
    pub channel_mode: EdgeChannelMode,
}

impl Default for EdgeParams {
    fn default() -> Self {
        Self {
            low_threshold: 100.0,
            high_threshold: 200.0,
            channel_mode: EdgeChannelMode::PerChannel,
        }
    }
}

impl EdgeParams {
    /// Validate the thresholds.
    ///
    /// # Errors
    ///
    /// Returns an error if a threshold is negative or not finite, or if the
    /// low threshold exceeds the high one.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("low_threshold", self.low_threshold),
            ("high_threshold", self.high_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidParameter {
                    name: name.to_string(),
                    reason: "must be a finite, non-negative number".to_string(),
                });
            }
        }

        if self.low_threshold > self.high_threshold {
            return Err(Error::InvalidParameter {
                name: "low_threshold".to_string(),
                reason: "must not exceed high_threshold".to_string(),
            });
        }

        Ok(())
    }
}

/// Compute a binary edge map (0 or 255) with the same spatial size as `samples`.
///
/// `samples` is an 8-bit HWC array with 1 or 3 channels.
///
/// # Errors
///
/// Returns an error if the parameters are invalid, the array has an
/// unsupported channel count, or its dimensions do not fit an image buffer.
pub fn detect_edges(samples: &Array3<u8>, params: &EdgeParams) -> Result<GrayImage> {
    params.validate()?;

    let (height, width, channels) = samples.dim();
    if channels != 1 && channels != 3 {
        return Err(Error::ShapeMismatch {
            expected: "1 or 3 channels".to_string(),
            actual: format!("{channels} channels"),
        });
    }

    let dims = (to_u32("width", width)?, to_u32("height", height)?);

    let edges = match params.channel_mode {
        EdgeChannelMode::Luma if channels == 3 => {
            let gray = GrayImage::from_fn(dims.0, dims.1, |x, y| {
                let (x, y) = (x as usize, y as usize);
                Luma([luminosity(
                    samples[[y, x, 0]],
                    samples[[y, x, 1]],
                    samples[[y, x, 2]],
                )])
            });
            canny(&gray, params.low_threshold, params.high_threshold)
        }
        _ => {
            let mut edges = GrayImage::new(dims.0, dims.1);
            for channel in samples.axis_iter(Axis(2)) {
                let gray = channel_to_gray(channel, dims);
                let channel_edges = canny(&gray, params.low_threshold, params.high_threshold);
                for (dst, src) in edges.pixels_mut().zip(channel_edges.pixels()) {
                    if src[0] > 0 {
                        *dst = Luma([255]);
                    }
                }
            }
            edges
        }
    };

    Ok(edges)
}

/// Fraction of pixels marked as edges by [`detect_edges`], in [0, 1].
///
/// # Errors
///
/// Propagates errors from [`detect_edges`] and rejects empty arrays.
#[allow(clippy::cast_precision_loss)]
pub fn edge_density(samples: &Array3<u8>, params: &EdgeParams) -> Result<f64> {
    if samples.is_empty() {
        return Err(Error::EmptyArray);
    }

    let edges = detect_edges(samples, params)?;
    let total = u64::from(edges.width()) * u64::from(edges.height());
    let count = edges.pixels().filter(|p| p[0] != 0).count();

    Ok(count as f64 / total as f64)
}

fn channel_to_gray(channel: ArrayView2<'_, u8>, (width, height): (u32, u32)) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| Luma([channel[[y as usize, x as usize]]]))
}

/// Standard luminosity formula: 0.299*R + 0.587*G + 0.114*B
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn luminosity(r: u8, g: u8, b: u8) -> u8 {
    let (r, g, b) = (f32::from(r), f32::from(g), f32::from(b));
    // Safe: clamped to [0, 255] before casting
    0.299_f32
        .mul_add(r, 0.587_f32.mul_add(g, 0.114 * b))
        .round()
        .clamp(0.0, 255.0) as u8
}

fn to_u32(name: &str, value: usize) -> Result<u32> {
    u32::try_from(value).map_err(|_| Error::ShapeMismatch {
        expected: format!("{name} that fits in u32"),
        actual: value.to_string(),
    })
}
