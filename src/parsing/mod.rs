//! File parsing functionality for experiment logs
//!
//! This module handles loading the two input formats:
//! - Domination links files written by the archive tests
//! - Whitespace-delimited experiment result (`.dat`) files

pub mod dominance;
pub mod experiment;

pub use dominance::{parse_dominance_data, parse_dominance_file, DominanceError};
pub use experiment::{
    parse_experiment_data, parse_experiment_file, parse_row, ExperimentError, ResultRow, Sample,
};
