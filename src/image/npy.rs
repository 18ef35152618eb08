//! Array storage in NumPy `.npy` format.

use std::path::Path;

use ndarray::ArrayD;

use crate::error::{Error, Result};

use super::NormalizedArray;

/// Save a normalized array to disk, overwriting any existing file.
///
/// # Errors
///
/// Returns [`Error::ArraySave`] if the file cannot be created or written.
pub fn save_array<P: AsRef<Path>>(array: &NormalizedArray, path: P) -> Result<()> {
    let path = path.as_ref();

    ndarray_npy::write_npy(path, array).map_err(|source| Error::ArraySave {
        path: path.to_path_buf(),
        source,
    })
}

/// Load an `f32` array of any rank from disk.
///
/// No assumption is made about shape or value range; callers validate the
/// layout they need.
///
/// # Errors
///
/// Returns [`Error::ArrayLoad`] if the file is missing, malformed, or holds a
/// different element type.
pub fn load_array<P: AsRef<Path>>(path: P) -> Result<ArrayD<f32>> {
    let path = path.as_ref();

    ndarray_npy::read_npy(path).map_err(|source| Error::ArrayLoad {
        path: path.to_path_buf(),
        source,
    })
}
