//! Intensity statistics and 8-bit rescaling.

use ndarray::{Array, ArrayBase, Data, Dimension};

/// Mean and population standard deviation over every sample of an array.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntensityStats {
    pub mean: f64,
    pub std: f64,
}

/// Compute [`IntensityStats`] over all samples, accumulating in `f64`.
///
/// Returns `None` for an empty array.
#[allow(clippy::cast_precision_loss)]
pub fn intensity_stats<S, D>(array: &ArrayBase<S, D>) -> Option<IntensityStats>
where
    S: Data<Elem = f32>,
    D: Dimension,
{
    if array.is_empty() {
        return None;
    }

    let count = array.len() as f64;
    let mean = array.iter().map(|&v| f64::from(v)).sum::<f64>() / count;
    let variance = array
        .iter()
        .map(|&v| {
            let diff = f64::from(v) - mean;
            diff * diff
        })
        .sum::<f64>()
        / count;

    Some(IntensityStats {
        mean,
        std: variance.sqrt(),
    })
}

/// Rescale normalized samples back to the 8-bit range, keeping the layout.
pub fn to_u8_samples<S, D>(array: &ArrayBase<S, D>) -> Array<u8, D>
where
    S: Data<Elem = f32>,
    D: Dimension,
{
    array.mapv(rescale_to_u8)
}

/// Map a [0, 1] sample to [0, 255] with rounding and clamping.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn rescale_to_u8(value: f32) -> u8 {
    // NaN survives the clamp and casts to 0
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::{arr1, Array2};

    #[test]
    fn test_rescale() {
        assert_eq!(rescale_to_u8(0.0), 0);
        assert_eq!(rescale_to_u8(0.502), 128);
        assert_eq!(rescale_to_u8(1.0), 255);
    }

    #[test]
    fn test_rescale_clamp() {
        assert_eq!(rescale_to_u8(-0.5), 0);
        assert_eq!(rescale_to_u8(3.0), 255);
        assert_eq!(rescale_to_u8(f32::NAN), 0);
    }

    #[test]
    fn test_stats_population_std() {
        let stats = intensity_stats(&arr1(&[0.0_f32, 1.0, 0.0, 1.0])).unwrap();

        assert!((stats.mean - 0.5).abs() < 1e-12);
        // ddof = 0: sqrt(mean((x - 0.5)^2)) = 0.5
        assert!((stats.std - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_stats_constant() {
        let stats = intensity_stats(&Array2::<f32>::from_elem((8, 8), 0.25)).unwrap();

        assert!((stats.mean - 0.25).abs() < 1e-12);
        assert_eq!(stats.std, 0.0);
    }

    #[test]
    fn test_stats_empty() {
        assert!(intensity_stats(&Array2::<f32>::zeros((0, 4))).is_none());
    }

    #[test]
    fn test_to_u8_keeps_shape() {
        let samples = to_u8_samples(&Array2::<f32>::from_elem((3, 7), 1.0));

        assert_eq!(samples.shape(), &[3, 7]);
        assert!(samples.iter().all(|&v| v == 255));
    }
}
