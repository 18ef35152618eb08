//! CSV results table.

use std::path::Path;

use crate::analysis::MetricsRecord;
use crate::error::{Error, Result};

/// Header row written at the top of every report.
pub const REPORT_HEADER: &str = "filename,mean_intensity,std_intensity,edge_density";

/// Write `records` to `path` as CSV, replacing any existing file.
///
/// # Errors
///
/// Returns [`Error::Report`] if the file cannot be created or written.
pub fn write_report<P: AsRef<Path>>(path: P, records: &[MetricsRecord]) -> Result<()> {
    let path = path.as_ref();
    let report_err = |source| Error::Report {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(report_err)?;
    for record in records {
        writer.serialize(record).map_err(report_err)?;
    }
    writer.flush().map_err(|err| report_err(err.into()))?;

    Ok(())
}

/// Read a report produced by [`write_report`].
///
/// # Errors
///
/// Returns [`Error::Report`] if the file cannot be read or a row does not parse.
pub fn read_report<P: AsRef<Path>>(path: P) -> Result<Vec<MetricsRecord>> {
    let path = path.as_ref();
    let report_err = |source| Error::Report {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::Reader::from_path(path).map_err(report_err)?;
    reader
        .deserialize()
        .collect::<std::result::Result<Vec<MetricsRecord>, csv::Error>>()
        .map_err(report_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, mean: f64) -> MetricsRecord {
        MetricsRecord {
            filename: name.to_string(),
            mean_intensity: mean,
            std_intensity: 0.125,
            edge_density: 0.0,
        }
    }

    #[test]
    fn test_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metrics.csv");

        write_report(&path, &[record("a.npy", 0.5), record("b.npy", 0.25)]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], REPORT_HEADER);
        assert!(lines[1].starts_with("a.npy,0.5,0.125,"));
        assert!(lines[2].starts_with("b.npy,0.25,"));
    }

    #[test]
    fn test_overwrites_previous_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metrics.csv");

        write_report(&path, &[record("a.npy", 0.5), record("b.npy", 0.25)]).unwrap();
        write_report(&path, &[record("c.npy", 0.75)]).unwrap();

        assert_eq!(read_report(&path).unwrap(), vec![record("c.npy", 0.75)]);
    }

    #[test]
    fn test_missing_parent_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("metrics.csv");

        assert!(matches!(
            write_report(&path, &[record("a.npy", 0.5)]),
            Err(Error::Report { .. })
        ));
    }
}
