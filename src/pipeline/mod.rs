//! Directory-level batch drivers for the two pipeline stages.

mod analyze;
mod preprocess;
mod report;

pub use analyze::{run_analysis_pipeline, AnalysisConfig, AnalysisSummary, DEFAULT_REPORT_PATH};
pub use preprocess::{
    process_dataset, PreprocessConfig, PreprocessSummary, DEFAULT_PROCESSED_DIR, DEFAULT_RAW_DIR,
};
pub use report::{read_report, write_report, REPORT_HEADER};

use std::fs;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};

use crate::error::{Error, Result};

/// List regular files directly inside `dir` whose extension satisfies `accept`.
///
/// Entries come back in directory-listing order. Subdirectories are never
/// descended into.
fn list_files<F>(dir: &Path, accept: F) -> Result<Vec<PathBuf>>
where
    F: Fn(&str) -> bool,
{
    let entries = fs::read_dir(dir).map_err(|source| Error::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|source| Error::ReadDir {
                path: dir.to_path_buf(),
                source,
            })?
            .path();

        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(&accept);

        if matches && path.is_file() {
            files.push(path);
        }
    }

    Ok(files)
}

/// Create `dir` and its parents if missing.
fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.as_os_str().is_empty() || dir.is_dir() {
        return Ok(());
    }

    fs::create_dir_all(dir).map_err(|source| Error::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    tracing::info!("Created directory: {}", dir.display());

    Ok(())
}

fn progress_bar(len: usize, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(&format!(
                "{{spinner:.green}} {label} [{{bar:40.cyan/blue}}] {{pos}}/{{len}}"
            ))
            .expect("valid template")
            .progress_chars("#>-"),
    );
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_files_filters_and_skips_dirs() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.npy"), b"").unwrap();
        fs::write(dir.path().join("b.txt"), b"").unwrap();
        fs::create_dir(dir.path().join("nested.npy")).unwrap();

        let files = list_files(dir.path(), |ext| ext == "npy").unwrap();

        assert_eq!(files, vec![dir.path().join("a.npy")]);
    }

    #[test]
    fn test_list_files_missing_dir() {
        let result = list_files(Path::new("no/such/dir"), |_| true);

        assert!(matches!(result, Err(Error::ReadDir { .. })));
    }

    #[test]
    fn test_ensure_dir_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("x").join("y");

        ensure_dir(&nested).unwrap();

        assert!(nested.is_dir());
        ensure_dir(Path::new("")).unwrap();
    }
}
