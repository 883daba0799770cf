//! Unit and chart constants for experiment analysis
//!
//! Times in result files are recorded in nanoseconds; everything downstream of the
//! parsers works in milliseconds.

/// Divisor converting recorded nanosecond timings into milliseconds
pub const TIME_UNIT: f64 = 1e6;

/// Spacing between recorded samples, in timesteps
pub const DATA_INTERVAL: f64 = 1.0;

/// Upper X-axis limit for charts plotted against population size
pub const MAX_POPULATION_AXIS: f64 = 50_000.0;

/// Lower Y-axis limit for the population vs. comparisons chart
pub const MIN_COMPARISONS_AXIS: f64 = 1e5;

/// Lower Y-axis limit for the population vs. timing chart (ms)
pub const MIN_TIME_AXIS: f64 = 1.0;

/// Y-axis limits for the elite-only comparisons chart
pub const MIN_ELITE_COMPARISONS_AXIS: f64 = 1.0;
pub const MAX_ELITE_COMPARISONS_AXIS: f64 = 1e8;

/// Number of points between markers on population charts
pub const POPULATION_MARKER_INTERVAL: usize = 5000;

/// Number of points between markers on the elite-only comparisons chart
pub const ELITE_MARKER_INTERVAL: usize = 50;

/// Extension of experiment result files
pub const RESULT_FILE_EXTENSION: &str = "dat";

/// Token replaced by the chart kind when deriving output file names
pub const RESULTS_TOKEN: &str = "results";
