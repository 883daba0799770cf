//! Per-simulation run summaries
//!
//! Condenses the series of one result file into a row per simulation, then writes
//! the rows as an ASCII table (`.txt`) and as JSON (`.json`) next to the charts.

use crate::analysis::elite_comparisons::comparison_change;
use crate::common::data_structures::ExperimentData;
use crate::common::output_paths::derive_output_path;
use crate::common::tables::{format_percentage, format_table};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tabled::Tabled;
use thiserror::Error;

/// Kind token used when naming summary files
pub const SUMMARY_KIND: &str = "summary";

/// Errors that can occur while writing run summaries
#[derive(Error, Debug)]
pub enum SummaryError {
    #[error("Failed to write summary: {0}")]
    FileWrite(#[from] std::io::Error),

    #[error("Failed to serialize summary: {0}")]
    Serialize(#[from] serde_json::Error),
}

type Result<T> = core::result::Result<T, SummaryError>;

/// Statistics for one simulation of a result file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSummary {
    /// 1-based simulation number
    pub simulation: usize,
    pub samples: usize,
    pub final_comparisons: u64,
    pub final_population_size: u64,
    pub final_elite_archive_size: u64,
    /// Largest elapsed time seen in the series (ms)
    pub peak_time_ms: f64,
    /// Mean comparisons performed per timestep
    pub mean_comparison_rate: f64,
    /// Timing reported when the simulation ended (ms)
    pub run_time_ms: u64,
}

/// A [`SimulationSummary`] formatted for display
#[derive(Debug, Clone, Tabled)]
struct SummaryRow {
    #[tabled(rename = "Simulation")]
    simulation: usize,
    #[tabled(rename = "Samples")]
    samples: usize,
    #[tabled(rename = "Comparisons")]
    comparisons: u64,
    #[tabled(rename = "Population")]
    population: u64,
    #[tabled(rename = "Elite Archive")]
    elite_archive: u64,
    #[tabled(rename = "Elite Share")]
    elite_share: String,
    #[tabled(rename = "Comparisons/Step")]
    comparison_rate: String,
    #[tabled(rename = "Peak Time (ms)")]
    peak_time: String,
    #[tabled(rename = "Run Time (ms)")]
    run_time: u64,
}

impl From<&SimulationSummary> for SummaryRow {
    fn from(summary: &SimulationSummary) -> Self {
        Self {
            simulation: summary.simulation,
            samples: summary.samples,
            comparisons: summary.final_comparisons,
            population: summary.final_population_size,
            elite_archive: summary.final_elite_archive_size,
            elite_share: format_percentage(
                summary.final_elite_archive_size as f64,
                summary.final_population_size as f64,
            ),
            comparison_rate: format!("{:.2}", summary.mean_comparison_rate),
            peak_time: format!("{:.3}", summary.peak_time_ms),
            run_time: summary.run_time_ms,
        }
    }
}

/// Summarises every simulation held in `data`
pub fn summarise_simulations(data: &ExperimentData) -> Vec<SimulationSummary> {
    let changes = comparison_change(&data.comparisons);

    (0..data.simulations())
        .map(|index| {
            let change = &changes[index];
            let mean_comparison_rate = if change.is_empty() {
                0.0
            } else {
                change.iter().sum::<f64>() / change.len() as f64
            };

            SimulationSummary {
                simulation: index + 1,
                samples: data.comparisons[index].len(),
                final_comparisons: data.comparisons[index].last().copied().unwrap_or(0),
                final_population_size: data.population_size[index].last().copied().unwrap_or(0),
                final_elite_archive_size: data.elite_archive_size[index]
                    .last()
                    .copied()
                    .unwrap_or(0),
                peak_time_ms: data.times[index].iter().copied().fold(0.0, f64::max),
                mean_comparison_rate,
                run_time_ms: data.timing.get(index).copied().unwrap_or(0),
            }
        })
        .collect()
}

/// Formats summaries as a titled ASCII table
pub fn format_summary_table(summaries: &[SimulationSummary], title: &str) -> String {
    let rows: Vec<SummaryRow> = summaries.iter().map(SummaryRow::from).collect();
    format_table(&rows, Some(title))
}

/// Writes the text and JSON summaries for one result file
///
/// # Arguments
/// * `data` - Series loaded from `input`
/// * `input` - The result file, used to name the outputs
/// * `output_dir` - Directory the summaries are written to
///
/// # Returns
/// Paths of the text and JSON files, in that order.
pub fn generate_run_summary(
    data: &ExperimentData,
    input: &Path,
    output_dir: &Path,
) -> Result<(PathBuf, PathBuf)> {
    let summaries = summarise_simulations(data);
    let title = format!(
        "Run Summary: {}",
        input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    );

    fs::create_dir_all(output_dir)?;

    let text_path = derive_output_path(output_dir, input, SUMMARY_KIND, "txt");
    fs::write(&text_path, format_summary_table(&summaries, &title))?;

    let json_path = derive_output_path(output_dir, input, SUMMARY_KIND, "json");
    fs::write(&json_path, serde_json::to_string_pretty(&summaries)?)?;

    Ok((text_path, json_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::experiment::parse_experiment_data;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn sample_data() -> ExperimentData {
        let input = "0 0 0 1 1000000\n\
                     1 10 1 1 2000000\n\
                     2 30 2 2 5000000\n\
                     1200 0 0 0 0 0\n\
                     800 0 0 0 0 0\n";
        parse_experiment_data(Cursor::new(input), 2).unwrap()
    }

    #[test]
    fn summarises_each_simulation() {
        let summaries = summarise_simulations(&sample_data());

        assert_eq!(summaries.len(), 2);
        assert_eq!(
            summaries[0],
            SimulationSummary {
                simulation: 1,
                samples: 3,
                final_comparisons: 30,
                final_population_size: 2,
                final_elite_archive_size: 2,
                peak_time_ms: 5.0,
                mean_comparison_rate: 15.0,
                run_time_ms: 1200,
            }
        );

        // A run with no samples still reports its timing.
        assert_eq!(summaries[1].samples, 0);
        assert_eq!(summaries[1].mean_comparison_rate, 0.0);
        assert_eq!(summaries[1].run_time_ms, 800);
    }

    #[test]
    fn table_contains_headers_and_values() {
        let table = format_summary_table(&summarise_simulations(&sample_data()), "Run Summary");
        assert!(table.starts_with("Run Summary\n==========="));
        assert!(table.contains("Comparisons/Step"));
        assert!(table.contains("100.00%"));
        assert!(table.contains("15.00"));
    }

    #[test]
    fn writes_text_and_json_summaries() {
        let temp_dir = TempDir::new().unwrap();
        let output_dir = temp_dir.path().join("report").join("plots");

        let (text_path, json_path) =
            generate_run_summary(&sample_data(), Path::new("linear_results_c1.dat"), &output_dir)
                .unwrap();

        assert_eq!(text_path, output_dir.join("linear_summary_c1.txt"));
        assert_eq!(json_path, output_dir.join("linear_summary_c1.json"));

        let text = fs::read_to_string(&text_path).unwrap();
        assert!(text.contains("Run Summary: linear_results_c1.dat"));

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 2);
        assert_eq!(json[0]["final_comparisons"], 30);
        assert_eq!(json[1]["run_time_ms"], 800);
    }
}
