//! # Guardian Plots
//! Charts and summaries for Pareto archive experiments.
//!
//! Two reports are produced:
//! - A dominance chart drawn from a domination links file
//! - Per result file charts (comparisons, timings, elite-only comparisons) and run summaries

use thiserror::Error;

/// Domain-specific analysis: dominance links, axis bounds, elite comparisons and reports.
pub mod analysis;

/// Shared data structures, plotting and table formatting.
pub mod common;

/// Loaders for domination links files and experiment result files.
pub mod parsing;

/// User configurable settings for report generation.
pub mod settings;

pub mod utilities {
    /// This module contains utilities for discovering input files.
    pub mod io {
        pub mod file_finder;
    }
}

/// Errors that can occur while generating any report
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Dominance chart error: {0}")]
    Dominance(#[from] analysis::DominancePlotError),

    #[error("Experiment chart error: {0}")]
    Experiments(#[from] analysis::ExperimentPlotError),
}

/// Commonly used items.
pub mod prelude {
    pub use crate::analysis::{
        generate_dominance_plot, generate_dominance_plot_from_file, generate_experiment_plots,
        ExperimentReport,
    };
    pub use crate::parsing::{parse_dominance_file, parse_experiment_file};
    pub use crate::settings::ReportSettings;
    pub use crate::ReportError;
}
