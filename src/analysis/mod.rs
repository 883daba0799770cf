//! Domain-specific analysis modules
//!
//! This module contains the analysis logic for:
//! - Dominance links between archive solutions
//! - Shared axis bounds across a batch of result files
//! - Elite-only comparison accounting
//! - Experiment charts and run summaries

pub mod axis_bounds;
pub mod constants;
pub mod dominance;
pub mod elite_comparisons;
pub mod experiments;
pub mod summary;

// Re-export analysis functions for convenience
pub use axis_bounds::find_axis_bounds;
pub use dominance::{generate_dominance_plot, generate_dominance_plot_from_file, DominancePlotError};
pub use elite_comparisons::{calculate_elite_comparisons, comparison_change, EliteComparisonError};
pub use experiments::{generate_experiment_plots, ExperimentPlotError, ExperimentReport};
pub use summary::{generate_run_summary, summarise_simulations, SimulationSummary, SummaryError};
