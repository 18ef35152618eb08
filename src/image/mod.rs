//! Image decoding, normalization, and array storage.

mod load;
mod npy;

pub use load::{image_to_array, load_image, preprocess_image};
pub use npy::{load_array, save_array};

use ndarray::Array3;

/// Normalized image in HWC layout (height, width, channels).
/// Values are scaled to the [0, 1] range.
pub type NormalizedArray = Array3<f32>;

/// Default edge length of the preprocessed square images.
pub const TARGET_SIZE: u32 = 224;

/// Number of channels in RGB images.
pub const RGB_CHANNELS: usize = 3;

/// Extension used for persisted normalized arrays.
pub const ARRAY_EXTENSION: &str = "npy";

/// Raw image extensions accepted by the preprocessor, matched case-insensitively.
pub const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];
