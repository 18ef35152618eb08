//! Image loading utilities.

use std::path::Path;

use image::{imageops::FilterType, DynamicImage};

use crate::error::{Error, Result};

use super::{NormalizedArray, RGB_CHANNELS};

/// Decode a raster image from disk.
///
/// # Errors
///
/// Returns [`Error::ImageLoad`] if the file is missing, unreadable, or not a
/// supported image format.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
    let path = path.as_ref();

    image::open(path).map_err(|source| Error::ImageLoad {
        path: path.to_path_buf(),
        source,
    })
}

/// Load an image from disk and convert it to a normalized array.
///
/// The image is:
/// 1. Decoded from the specified path
/// 2. Converted to RGB if necessary
/// 3. Resized to exactly `target_size` (width, height)
/// 4. Normalized from [0, 255] to [0, 1]
///
/// # Errors
///
/// Returns an error if the image cannot be decoded. Nothing is written to disk.
pub fn preprocess_image<P: AsRef<Path>>(
    path: P,
    target_size: (u32, u32),
    filter: FilterType,
) -> Result<NormalizedArray> {
    let img = load_image(path)?;
    Ok(image_to_array(&img, target_size, filter))
}

/// Convert a `DynamicImage` to a normalized HWC array of the given size.
pub fn image_to_array(
    img: &DynamicImage,
    (width, height): (u32, u32),
    filter: FilterType,
) -> NormalizedArray {
    let rgb = img.to_rgb8();
    let resized = image::imageops::resize(&rgb, width, height, filter);

    let (width, height) = (width as usize, height as usize);

    // RgbImage buffers are row-major HWC, same order as the array's standard layout
    let samples = resized.into_raw();
    let mut array = NormalizedArray::zeros((height, width, RGB_CHANNELS));
    for (dst, &src) in array.iter_mut().zip(samples.iter()) {
        *dst = f32::from(src) / 255.0;
    }

    array
}

#[cfg(test)]
mod tests {
    use super::*;

    use image::{Rgb, RgbImage};
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_array_shape() {
        let img = DynamicImage::new_rgb8(100, 100);
        let array = image_to_array(&img, (224, 224), FilterType::Triangle);

        assert_eq!(array.shape(), &[224, 224, 3]);
    }

    #[test]
    fn test_non_square_target() {
        let img = DynamicImage::new_rgb8(37, 91);
        let array = image_to_array(&img, (64, 32), FilterType::Triangle);

        // (height, width, channels)
        assert_eq!(array.shape(), &[32, 64, 3]);
    }

    #[test]
    fn test_random_image_range() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let img = RgbImage::from_fn(100, 100, |_, _| {
            Rgb([rng.random(), rng.random(), rng.random()])
        });
        let array = image_to_array(&DynamicImage::ImageRgb8(img), (224, 224), FilterType::Triangle);

        let min = array.iter().copied().fold(f32::INFINITY, f32::min);
        let max = array.iter().copied().fold(f32::NEG_INFINITY, f32::max);

        assert_eq!(array.shape(), &[224, 224, 3]);
        assert!(min >= 0.0);
        assert!(max <= 1.0);
    }

    #[test]
    fn test_normalization_values() {
        let img = RgbImage::from_pixel(1, 1, Rgb([0, 128, 255]));
        let array = image_to_array(&DynamicImage::ImageRgb8(img), (224, 224), FilterType::Triangle);

        let pixel: ndarray::ArrayView1<f32> = array.slice(ndarray::s![0, 0, ..]);
        assert!((pixel[0] - 0.0).abs() < 0.005);
        assert!((pixel[1] - 0.502).abs() < 0.005);
        assert!((pixel[2] - 1.0).abs() < 0.005);
    }

    #[test]
    fn test_grayscale_input_expands_to_rgb() {
        let img = DynamicImage::new_luma8(10, 20);
        let array = image_to_array(&img, (224, 224), FilterType::Triangle);

        assert_eq!(array.shape(), &[224, 224, 3]);
        assert!(array.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_missing_file_is_error() {
        let result = preprocess_image("non_existent_file.jpg", (224, 224), FilterType::Triangle);

        assert!(matches!(result, Err(Error::ImageLoad { .. })));
    }
}
