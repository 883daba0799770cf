use serde::Serialize;
use std::collections::HashMap;

/// Solutions parsed from a domination links file
///
/// All vectors are indexed by the order in which solutions appear in the file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DominanceSet {
    /// Maps a solution id to its index
    pub ids: HashMap<String, usize>,
    /// First objective value of each solution
    pub x: Vec<f64>,
    /// Second objective value of each solution
    pub y: Vec<f64>,
    /// Ids of the solutions each solution dominates
    pub dominates: Vec<Vec<String>>,
}

impl DominanceSet {
    /// Number of solutions in the set
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Coordinates of every solution as `(x, y)` pairs
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.x.iter().copied().zip(self.y.iter().copied()).collect()
    }
}

/// A dominance link between two solutions, resolved to indices and coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Index of the dominating solution
    pub from: usize,
    /// Index of the dominated solution
    pub to: usize,
    pub start: (f64, f64),
    pub end: (f64, f64),
}

/// Per-simulation time series loaded from one result file
///
/// The outer vectors hold one entry per simulation; inner vectors are indexed by sample.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExperimentData {
    /// Cumulative dominance comparisons at each sample
    pub comparisons: Vec<Vec<u64>>,
    /// Population size at each sample
    pub population_size: Vec<Vec<u64>>,
    /// Elite archive size at each sample
    pub elite_archive_size: Vec<Vec<u64>>,
    /// Elapsed time at each sample, in milliseconds
    pub times: Vec<Vec<f64>>,
    /// Summary timing recorded at the end of each simulation, in milliseconds
    pub timing: Vec<u64>,
}

impl ExperimentData {
    /// Creates empty series for the given number of simulations
    pub fn with_simulations(simulations: usize) -> Self {
        Self {
            comparisons: vec![Vec::new(); simulations],
            population_size: vec![Vec::new(); simulations],
            elite_archive_size: vec![Vec::new(); simulations],
            times: vec![Vec::new(); simulations],
            timing: Vec::with_capacity(simulations),
        }
    }

    /// Number of simulations held
    pub fn simulations(&self) -> usize {
        self.comparisons.len()
    }
}

/// Shared axis limits computed once over a batch of result files
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisBounds {
    /// Mean over files of each file's maximum comparison count
    pub mean_max_comparisons: f64,
    /// Largest comparison count across all files
    pub max_comparisons: u64,
    /// Mean over files of each file's maximum elapsed time (ms)
    pub mean_max_time_ms: f64,
    /// Largest elapsed time across all files (ms)
    pub max_time_ms: f64,
}

/// Cumulative comparisons counted only at elite archive changes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EliteComparisons {
    /// Sample indices at which the elite archive changed, per simulation
    pub timesteps: Vec<Vec<u64>>,
    /// Running comparison total at each of those samples, per simulation
    pub cumulative: Vec<Vec<u64>>,
}
