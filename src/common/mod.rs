//! Common infrastructure modules shared across analysis phases
//!
//! This module provides reusable infrastructure for:
//! - Data structures for dominance sets and experiment series
//! - Output file naming
//! - ASCII table formatting
//! - Plotting line and scatter charts

pub mod data_structures;
pub mod output_paths;
pub mod plots;
pub mod tables;

// Re-export commonly used items
pub use data_structures::{AxisBounds, DominanceSet, Edge, EliteComparisons, ExperimentData};
pub use plots::PlotError;
