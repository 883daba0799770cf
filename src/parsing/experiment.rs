//! Loader for experiment result files
//!
//! Result files are whitespace delimited. Each simulation contributes a run of
//! 5-field sample rows followed by a single 6-field row closing the run:
//!
//! ```text
//! <step> <comparisons> <population size> <elite archive size> <elapsed ns>
//! <run time ms> 0 0 0 0 0
//! ```

use crate::analysis::constants::TIME_UNIT;
use crate::common::data_structures::ExperimentData;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading experiment result files
#[derive(Error, Debug)]
pub enum ExperimentError {
    #[error("Failed to read result file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Line {line}: expected 5 (sample) or 6 (end of run) fields, found {found}")]
    UnexpectedFieldCount { line: usize, found: usize },

    #[error("Line {line}: '{value}' is not a valid non-negative integer")]
    InvalidNumber { line: usize, value: String },

    #[error("Line {line}: data continues after all {expected} simulations have ended")]
    TooManySimulations { line: usize, expected: usize },

    #[error("Expected {expected} completed simulations, found {found}")]
    SimulationCountMismatch { expected: usize, found: usize },

    #[error("No result files were supplied")]
    NoInputFiles,

    #[error("Result file {} contains no sample rows", .0.display())]
    NoSamples(PathBuf),
}

type Result<T> = core::result::Result<T, ExperimentError>;

/// A single per-timestep measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub step: u64,
    pub comparisons: u64,
    pub population_size: u64,
    pub elite_archive_size: u64,
    /// Elapsed time in nanoseconds
    pub time_ns: u64,
}

/// One meaningful row of a result file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultRow {
    Sample(Sample),
    /// Closes the current simulation, carrying its summary timing
    RunEnd { timing_ms: u64 },
}

/// Parses a single line; blank lines yield `None`
pub fn parse_row(line: &str, line_number: usize) -> Result<Option<ResultRow>> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    match fields.len() {
        0 => Ok(None),
        5 => {
            let values = parse_fields(&fields, line_number)?;
            Ok(Some(ResultRow::Sample(Sample {
                step: values[0],
                comparisons: values[1],
                population_size: values[2],
                elite_archive_size: values[3],
                time_ns: values[4],
            })))
        }
        6 => {
            let values = parse_fields(&fields, line_number)?;
            Ok(Some(ResultRow::RunEnd {
                timing_ms: values[0],
            }))
        }
        found => Err(ExperimentError::UnexpectedFieldCount {
            line: line_number,
            found,
        }),
    }
}

fn parse_fields(fields: &[&str], line_number: usize) -> Result<Vec<u64>> {
    fields
        .iter()
        .map(|field| {
            field
                .parse::<u64>()
                .map_err(|_| ExperimentError::InvalidNumber {
                    line: line_number,
                    value: field.to_string(),
                })
        })
        .collect()
}

/// Parses a result file from disk, expecting `simulations` completed runs
pub fn parse_experiment_file(file_path: &Path, simulations: usize) -> Result<ExperimentData> {
    let file = File::open(file_path)?;
    parse_experiment_data(BufReader::new(file), simulations)
}

/// Splits a stream of result rows into per-simulation series
///
/// # Arguments
/// * `reader` - Source of result rows
/// * `simulations` - Number of simulations the file must contain
///
/// # Returns
/// * `Ok(ExperimentData)` - Exactly `simulations` series and timings
/// * `Err(ExperimentError)` - On a malformed row, or if the number of completed runs differs
pub fn parse_experiment_data<R: BufRead>(reader: R, simulations: usize) -> Result<ExperimentData> {
    let mut data = ExperimentData::with_simulations(simulations);
    let mut simulation_index = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;

        let Some(row) = parse_row(&line, line_number)? else {
            continue;
        };

        if simulation_index >= simulations {
            return Err(ExperimentError::TooManySimulations {
                line: line_number,
                expected: simulations,
            });
        }

        match row {
            ResultRow::Sample(sample) => {
                data.comparisons[simulation_index].push(sample.comparisons);
                data.population_size[simulation_index].push(sample.population_size);
                data.elite_archive_size[simulation_index].push(sample.elite_archive_size);
                data.times[simulation_index].push(sample.time_ns as f64 / TIME_UNIT);
            }
            ResultRow::RunEnd { timing_ms } => {
                data.timing.push(timing_ms);
                simulation_index += 1;
            }
        }
    }

    if simulation_index != simulations {
        return Err(ExperimentError::SimulationCountMismatch {
            expected: simulations,
            found: simulation_index,
        });
    }

    Ok(data)
}
