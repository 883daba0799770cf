//! Shared axis limits across a batch of result files
//!
//! Every file is re-read on its own, independent of the per-file series loader, so
//! that charts rendered for different files in one batch share their Y-axis scales.

use crate::analysis::constants::TIME_UNIT;
use crate::common::data_structures::AxisBounds;
use crate::parsing::experiment::{parse_row, ExperimentError, ResultRow};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

type Result<T> = core::result::Result<T, ExperimentError>;

/// Largest comparison count and elapsed time found in one file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMaxima {
    pub comparisons: u64,
    /// Nanoseconds, as recorded
    pub time_ns: u64,
}

/// Scans sample rows for their maxima; returns `None` when there are no samples
///
/// End of run rows are validated but otherwise ignored.
pub fn scan_maxima<R: BufRead>(reader: R) -> Result<Option<FileMaxima>> {
    let mut maxima: Option<FileMaxima> = None;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if let Some(ResultRow::Sample(sample)) = parse_row(&line, index + 1)? {
            let current = maxima.get_or_insert(FileMaxima {
                comparisons: sample.comparisons,
                time_ns: sample.time_ns,
            });
            current.comparisons = current.comparisons.max(sample.comparisons);
            current.time_ns = current.time_ns.max(sample.time_ns);
        }
    }

    Ok(maxima)
}

/// Reads a single result file and returns its maxima
pub fn scan_file_maxima(file_path: &Path) -> Result<FileMaxima> {
    let file = File::open(file_path)?;
    scan_maxima(BufReader::new(file))?
        .ok_or_else(|| ExperimentError::NoSamples(file_path.to_path_buf()))
}

/// Computes the shared axis bounds for a batch of result files
///
/// # Returns
/// * `Ok(AxisBounds)` - Mean-of-maxima and global maxima for comparisons and time (ms)
/// * `Err(ExperimentError)` - If no files were given, a file has no samples, or a row is malformed
pub fn find_axis_bounds<P: AsRef<Path>>(file_paths: &[P]) -> Result<AxisBounds> {
    if file_paths.is_empty() {
        return Err(ExperimentError::NoInputFiles);
    }

    let maxima = file_paths
        .iter()
        .map(|path| scan_file_maxima(path.as_ref()))
        .collect::<Result<Vec<_>>>()?;

    let bounds = bounds_from_maxima(&maxima);
    debug!(?bounds, files = file_paths.len(), "computed shared axis bounds");
    Ok(bounds)
}

/// Combines per-file maxima; `maxima` must not be empty
fn bounds_from_maxima(maxima: &[FileMaxima]) -> AxisBounds {
    let count = maxima.len() as f64;
    let total_comparisons: f64 = maxima.iter().map(|m| m.comparisons as f64).sum();
    let total_time: f64 = maxima.iter().map(|m| m.time_ns as f64).sum();

    AxisBounds {
        mean_max_comparisons: total_comparisons / count,
        max_comparisons: maxima.iter().map(|m| m.comparisons).max().unwrap_or(0),
        mean_max_time_ms: total_time / count / TIME_UNIT,
        max_time_ms: maxima.iter().map(|m| m.time_ns).max().unwrap_or(0) as f64 / TIME_UNIT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn scan_ignores_end_of_run_rows() {
        let input = "0 10 0 1 4000000\n1 30 1 1 2000000\n99999999 0 0 0 0 0\n";
        let maxima = scan_maxima(Cursor::new(input)).unwrap().unwrap();
        assert_eq!(maxima.comparisons, 30);
        assert_eq!(maxima.time_ns, 4_000_000);
    }

    #[test]
    fn scan_without_samples_returns_none() {
        assert_eq!(scan_maxima(Cursor::new("5 0 0 0 0 0\n")).unwrap(), None);
    }

    #[test]
    fn computes_mean_and_max_over_files() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("results_a.dat");
        let second = dir.path().join("results_b.dat");
        fs::write(&first, "0 100 0 1 2000000\n1 200 1 1 4000000\n7 0 0 0 0 0\n").unwrap();
        fs::write(&second, "0 600 0 1 8000000\n7 0 0 0 0 0\n").unwrap();

        let bounds = find_axis_bounds(&[&first, &second]).unwrap();
        assert_eq!(bounds.mean_max_comparisons, 400.0);
        assert_eq!(bounds.max_comparisons, 600);
        assert_eq!(bounds.mean_max_time_ms, 6.0);
        assert_eq!(bounds.max_time_ms, 8.0);
    }

    #[test]
    fn repeated_scans_are_identical() {
        let dir = TempDir::new().unwrap();
        let paths: Vec<_> = (0..3)
            .map(|i| {
                let path = dir.path().join(format!("results_{i}.dat"));
                let body: String = (0..50)
                    .map(|step| format!("{step} {} {step} 3 {}\n", step * (i + 1), step * 1000))
                    .collect();
                fs::write(&path, format!("{body}12 0 0 0 0 0\n")).unwrap();
                path
            })
            .collect();

        let first = find_axis_bounds(&paths).unwrap();
        let second = find_axis_bounds(&paths).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn rejects_empty_file_list() {
        let paths: [&Path; 0] = [];
        assert!(matches!(
            find_axis_bounds(&paths),
            Err(ExperimentError::NoInputFiles)
        ));
    }

    #[test]
    fn rejects_file_without_samples() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results_empty.dat");
        fs::write(&path, "").unwrap();
        assert!(matches!(
            find_axis_bounds(&[&path]),
            Err(ExperimentError::NoSamples(p)) if p == path
        ));
    }
}
