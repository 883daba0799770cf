//! Comparisons attributed to elite archive changes
//!
//! Samples are walked in strides of 2 starting at index 1, and the final two samples
//! of each simulation are excluded because the simulation does not finish recording them.
//! Whenever the elite archive size differs from the preceding sample, the comparison
//! delta between the two samples is added to a running total.

use crate::common::data_structures::EliteComparisons;
use thiserror::Error;

/// Errors that can occur while deriving elite-only comparisons
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EliteComparisonError {
    #[error("Series hold different simulation counts: {elite} elite, {comparisons} comparison, {population} population")]
    SimulationCountMismatch {
        elite: usize,
        comparisons: usize,
        population: usize,
    },

    #[error("Simulation {simulation} has series of different lengths")]
    SeriesShapeMismatch { simulation: usize },
}

type Result<T> = core::result::Result<T, EliteComparisonError>;

/// Stride between inspected samples
const SAMPLE_STRIDE: usize = 2;

/// Number of trailing samples left out of every simulation
const INCOMPLETE_TRAILING_SAMPLES: usize = 2;

/// Accumulates comparison deltas at elite archive changes
///
/// The running total is shared by all simulations of one call, as the experiment
/// reports have always plotted it. A decreasing comparison counter contributes nothing.
///
/// # Arguments
/// * `elite_archive_size` - Elite archive size per simulation and sample
/// * `comparisons` - Cumulative comparison count per simulation and sample
/// * `population_size` - Population size per simulation and sample, only checked for shape
///
/// # Returns
/// Per simulation, the sample indices where the archive changed and the running total there.
pub fn calculate_elite_comparisons(
    elite_archive_size: &[Vec<u64>],
    comparisons: &[Vec<u64>],
    population_size: &[Vec<u64>],
) -> Result<EliteComparisons> {
    if elite_archive_size.len() != comparisons.len()
        || elite_archive_size.len() != population_size.len()
    {
        return Err(EliteComparisonError::SimulationCountMismatch {
            elite: elite_archive_size.len(),
            comparisons: comparisons.len(),
            population: population_size.len(),
        });
    }

    let mut result = EliteComparisons::default();
    let mut total: u64 = 0;

    for (simulation, ((elite, comps), population)) in elite_archive_size
        .iter()
        .zip(comparisons)
        .zip(population_size)
        .enumerate()
    {
        if elite.len() != comps.len() || elite.len() != population.len() {
            return Err(EliteComparisonError::SeriesShapeMismatch { simulation });
        }

        let mut timesteps = Vec::new();
        let mut cumulative = Vec::new();
        let end = elite.len().saturating_sub(INCOMPLETE_TRAILING_SAMPLES);

        for j in (1..end).step_by(SAMPLE_STRIDE) {
            if elite[j] != elite[j - 1] {
                total += comps[j].saturating_sub(comps[j - 1]);
                timesteps.push(j as u64);
                cumulative.push(total);
            }
        }

        result.timesteps.push(timesteps);
        result.cumulative.push(cumulative);
    }

    Ok(result)
}

/// Change in comparisons between consecutive samples, per simulation
///
/// Deltas are divided by the recording interval so they read as comparisons per timestep.
pub fn comparison_change(comparisons: &[Vec<u64>]) -> Vec<Vec<f64>> {
    use crate::analysis::constants::DATA_INTERVAL;

    comparisons
        .iter()
        .map(|series| {
            series
                .windows(2)
                .map(|pair| (pair[1] as f64 - pair[0] as f64) / DATA_INTERVAL)
                .collect()
        })
        .collect()
}
