//! Experiment chart generation
//!
//! Renders the three charts of every result file in a directory, sharing Y-axis
//! limits across the whole batch, and optionally writes a run summary per file.

use crate::analysis::axis_bounds::find_axis_bounds;
use crate::analysis::constants::*;
use crate::analysis::elite_comparisons::{calculate_elite_comparisons, EliteComparisonError};
use crate::analysis::summary::{generate_run_summary, SummaryError};
use crate::common::data_structures::{AxisBounds, ExperimentData};
use crate::common::output_paths::derive_output_path;
use crate::common::plots::{
    render_series, AxisLimits, AxisScale, ChartSpec, Figure, PlotError, PlotValue,
};
use crate::parsing::experiment::{parse_experiment_file, ExperimentError};
use crate::settings::ReportSettings;
use crate::utilities::io::file_finder::find_result_files;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Chart kind of the population size vs. comparisons chart
pub const POPULATION_COMPARISONS_KIND: &str = "population_comparisons";

/// Chart kind of the population size vs. elapsed time chart
pub const POPULATION_TIMINGS_KIND: &str = "population_timings";

/// Chart kind of the elite-only comparisons chart
pub const ELITE_COMPARISONS_KIND: &str = "population_eliteComparisons";

/// Errors that can occur while generating experiment charts
#[derive(Error, Debug)]
pub enum ExperimentPlotError {
    #[error("Failed to list result files in {}: {source}", path.display())]
    ListFiles {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {source}", path.display())]
    InFile {
        path: PathBuf,
        #[source]
        source: ExperimentError,
    },

    #[error(transparent)]
    Experiment(#[from] ExperimentError),

    #[error("Failed to derive elite comparisons: {0}")]
    EliteComparisons(#[from] EliteComparisonError),

    #[error("Failed to generate plot: {0}")]
    PlotGeneration(#[from] PlotError),

    #[error("Failed to write run summary: {0}")]
    Summary(#[from] SummaryError),
}

type Result<T> = core::result::Result<T, ExperimentPlotError>;

/// Outputs generated for one result file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub input: PathBuf,
    /// Charts in the order they were rendered
    pub charts: Vec<PathBuf>,
    /// Text and JSON summary, when summaries are enabled
    pub summary: Option<(PathBuf, PathBuf)>,
}

/// Outputs generated for a directory of result files
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentReport {
    pub bounds: AxisBounds,
    pub files: Vec<FileReport>,
}

/// Generate charts (and summaries) for every result file in `input_dir`
///
/// # Arguments
/// * `input_dir` - Directory searched (non-recursively) for `.dat` files
/// * `settings` - Output directory, image size, simulation count and summary toggle
///
/// # Returns
/// * `Ok(ExperimentReport)` - Shared axis bounds and the outputs of each file
/// * `Err(ExperimentPlotError)` - On the first file that cannot be read, parsed or drawn
pub fn generate_experiment_plots(
    input_dir: &Path,
    settings: &ReportSettings,
) -> Result<ExperimentReport> {
    let files =
        find_result_files(input_dir).map_err(|source| ExperimentPlotError::ListFiles {
            path: input_dir.to_path_buf(),
            source,
        })?;
    info!(directory = %input_dir.display(), files = files.len(), "found result files");

    let bounds = find_axis_bounds(&files)?;
    info!(
        max_comparisons = bounds.max_comparisons,
        max_time_ms = bounds.max_time_ms,
        "computed shared axis bounds"
    );

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut reports = Vec::with_capacity(files.len());
    for file in &files {
        progress.set_message(display_name(file));
        let report = progress.suspend(|| generate_file_plots(file, &bounds, settings))?;
        reports.push(report);
        progress.inc(1);
    }
    progress.finish_and_clear();

    Ok(ExperimentReport {
        bounds,
        files: reports,
    })
}

/// Loads one result file and renders its three charts, then its summary
pub fn generate_file_plots(
    input: &Path,
    bounds: &AxisBounds,
    settings: &ReportSettings,
) -> Result<FileReport> {
    let data = parse_experiment_file(input, settings.simulations).map_err(|source| {
        ExperimentPlotError::InFile {
            path: input.to_path_buf(),
            source,
        }
    })?;
    info!(
        input = %input.display(),
        simulations = data.simulations(),
        samples = data.comparisons.iter().map(Vec::len).sum::<usize>(),
        "loaded result file"
    );

    let charts = vec![
        plot_population_comparisons(&data, bounds, input, settings)?,
        plot_population_timings(&data, bounds, input, settings)?,
        plot_population_elite_comparisons(&data, input, settings)?,
    ];

    let summary = if settings.write_summaries {
        let paths = generate_run_summary(&data, input, &settings.output_dir)?;
        info!(path = %paths.0.display(), "wrote run summary");
        Some(paths)
    } else {
        None
    };

    Ok(FileReport {
        input: input.to_path_buf(),
        charts,
        summary,
    })
}

/// Population size vs. cumulative comparisons, log-scaled up to the batch maximum
pub fn plot_population_comparisons(
    data: &ExperimentData,
    bounds: &AxisBounds,
    input: &Path,
    settings: &ReportSettings,
) -> Result<PathBuf> {
    render_chart(
        POPULATION_COMPARISONS_KIND,
        &data.population_size,
        &data.comparisons,
        &population_comparisons_spec(bounds),
        input,
        settings,
    )
}

/// Population size vs. elapsed time (ms), log-scaled up to the batch maximum
pub fn plot_population_timings(
    data: &ExperimentData,
    bounds: &AxisBounds,
    input: &Path,
    settings: &ReportSettings,
) -> Result<PathBuf> {
    render_chart(
        POPULATION_TIMINGS_KIND,
        &data.population_size,
        &data.times,
        &population_timings_spec(bounds),
        input,
        settings,
    )
}

/// Comparisons accumulated only at elite archive changes, per timestep
pub fn plot_population_elite_comparisons(
    data: &ExperimentData,
    input: &Path,
    settings: &ReportSettings,
) -> Result<PathBuf> {
    let elite = calculate_elite_comparisons(
        &data.elite_archive_size,
        &data.comparisons,
        &data.population_size,
    )?;
    debug!(
        points = elite.cumulative.iter().map(Vec::len).sum::<usize>(),
        "derived elite comparisons"
    );

    // Nothing to draw when the archive never changes; the chart is still written.
    render_chart(
        ELITE_COMPARISONS_KIND,
        &elite.timesteps,
        &elite.cumulative,
        &elite_comparisons_spec(),
        input,
        settings,
    )
}

/// Population size vs. comparisons: log Y from 1e5 up to the batch maximum
pub fn population_comparisons_spec(bounds: &AxisBounds) -> ChartSpec<'static> {
    ChartSpec {
        title: "Population Size vs. Comparisons",
        x_label: "Population Size",
        y_label: "Comparisons",
        x_limits: AxisLimits::fixed(0.0, MAX_POPULATION_AXIS),
        y_limits: AxisLimits::fixed(MIN_COMPARISONS_AXIS, bounds.max_comparisons as f64),
        y_scale: AxisScale::Log,
        marker_interval: POPULATION_MARKER_INTERVAL,
    }
}

/// Population size vs. time: log Y from 1 ms up to the batch maximum
pub fn population_timings_spec(bounds: &AxisBounds) -> ChartSpec<'static> {
    ChartSpec {
        title: "Population Size vs. Time",
        x_label: "Population Size",
        y_label: "Time (ms)",
        x_limits: AxisLimits::fixed(0.0, MAX_POPULATION_AXIS),
        y_limits: AxisLimits::fixed(MIN_TIME_AXIS, bounds.max_time_ms),
        y_scale: AxisScale::Log,
        marker_interval: POPULATION_MARKER_INTERVAL,
    }
}

/// Elite comparisons per timestep: X from 0, log Y over 1..1e8
pub fn elite_comparisons_spec() -> ChartSpec<'static> {
    ChartSpec {
        title: "Elite Comparisons",
        x_label: "Timestep",
        y_label: "Elite Comparisons",
        x_limits: AxisLimits::starting_at(0.0),
        y_limits: AxisLimits::fixed(MIN_ELITE_COMPARISONS_AXIS, MAX_ELITE_COMPARISONS_AXIS),
        y_scale: AxisScale::Log,
        marker_interval: ELITE_MARKER_INTERVAL,
    }
}

fn render_chart<X, Y>(
    kind: &str,
    x_series: &[Vec<X>],
    y_series: &[Vec<Y>],
    spec: &ChartSpec<'_>,
    input: &Path,
    settings: &ReportSettings,
) -> Result<PathBuf>
where
    X: PlotValue,
    Y: PlotValue,
{
    let path = derive_output_path(&settings.output_dir, input, kind, "png");
    let figure = render_series(
        Figure::new(path, settings.image_size),
        x_series,
        y_series,
        spec,
    )?;

    info!(kind, path = %figure.path().display(), "wrote chart");
    Ok(figure.path().to_path_buf())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::plots::layout_series;
    use crate::parsing::experiment::parse_experiment_data;
    use crate::parsing::experiment::tests::result_file;
    use rstest::rstest;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    const BOUNDS: AxisBounds = AxisBounds {
        mean_max_comparisons: 2.5e6,
        max_comparisons: 4_000_000,
        mean_max_time_ms: 150.0,
        max_time_ms: 320.0,
    };

    /// Two runs of ten samples whose elite archive never changes size
    fn constant_elite_data() -> ExperimentData {
        let runs: Vec<Vec<(u64, u64)>> = (0..2)
            .map(|run| (0..10u64).map(|i| ((i + 1) * 1000 * (run + 1), 5)).collect())
            .collect();
        parse_experiment_data(Cursor::new(result_file(&runs)), 2).unwrap()
    }

    #[test]
    fn population_comparisons_chart_configuration() {
        let spec = population_comparisons_spec(&BOUNDS);
        assert_eq!(spec.x_label, "Population Size");
        assert_eq!(spec.y_label, "Comparisons");
        assert_eq!(spec.x_limits, AxisLimits::fixed(0.0, 50_000.0));
        assert_eq!(spec.y_limits, AxisLimits::fixed(1e5, 4_000_000.0));
        assert_eq!(spec.y_scale, AxisScale::Log);
        assert_eq!(spec.marker_interval, 5000);
    }

    #[test]
    fn population_timings_chart_configuration() {
        let spec = population_timings_spec(&BOUNDS);
        assert_eq!(spec.x_label, "Population Size");
        assert_eq!(spec.y_label, "Time (ms)");
        assert_eq!(spec.x_limits, AxisLimits::fixed(0.0, 50_000.0));
        assert_eq!(spec.y_limits, AxisLimits::fixed(1.0, 320.0));
        assert_eq!(spec.y_scale, AxisScale::Log);
        assert_eq!(spec.marker_interval, 5000);
    }

    #[test]
    fn elite_comparisons_chart_configuration() {
        let spec = elite_comparisons_spec();
        assert_eq!(spec.x_label, "Timestep");
        assert_eq!(spec.x_limits, AxisLimits::starting_at(0.0));
        assert_eq!(spec.y_limits, AxisLimits::fixed(1.0, 1e8));
        assert_eq!(spec.y_scale, AxisScale::Log);
        assert_eq!(spec.marker_interval, 50);
    }

    #[rstest]
    #[case::comparisons(POPULATION_COMPARISONS_KIND, "linear_population_comparisons_c1.png")]
    #[case::timings(POPULATION_TIMINGS_KIND, "linear_population_timings_c1.png")]
    #[case::elite(ELITE_COMPARISONS_KIND, "linear_population_eliteComparisons_c1.png")]
    fn chart_output_names(#[case] kind: &str, #[case] expected: &str) {
        let output_dir = Path::new("report/plots");
        let path = derive_output_path(output_dir, Path::new("linear_results_c1.dat"), kind, "png");
        assert_eq!(path, output_dir.join(expected));
    }

    #[test]
    fn constant_elite_archive_lays_out_an_empty_chart() {
        let data = constant_elite_data();
        let elite = calculate_elite_comparisons(
            &data.elite_archive_size,
            &data.comparisons,
            &data.population_size,
        )
        .unwrap();
        assert!(elite.cumulative.iter().all(Vec::is_empty));

        let layout =
            layout_series(&elite.timesteps, &elite.cumulative, &elite_comparisons_spec()).unwrap();
        assert_eq!(layout.x_range, 0.0..1.0);
        assert_eq!(layout.y_range, 1.0..1e8);
    }

    #[test]
    fn elite_chart_starts_at_timestep_zero() {
        let timesteps = vec![vec![3u64, 7, 11]];
        let cumulative = vec![vec![10u64, 40, 90]];
        let layout = layout_series(&timesteps, &cumulative, &elite_comparisons_spec()).unwrap();
        assert_eq!(layout.x_range, 0.0..11.0);
    }

    #[test]
    #[ignore = "Font rendering not available in test environment"]
    fn writes_elite_chart_for_constant_elite_archive() {
        let temp_dir = TempDir::new().unwrap();
        let settings = settings(temp_dir.path().to_path_buf());

        let path = plot_population_elite_comparisons(
            &constant_elite_data(),
            Path::new("results_c1.dat"),
            &settings,
        )
        .unwrap();
        assert!(path.exists());
    }

    fn settings(output_dir: PathBuf) -> ReportSettings {
        let mut settings = ReportSettings::new(output_dir);
        settings.simulations = 2;
        settings.sanitize();
        settings
    }

    #[test]
    fn empty_directory_has_no_input_files() {
        let temp_dir = TempDir::new().unwrap();
        let result = generate_experiment_plots(temp_dir.path(), &settings(temp_dir.path().join("out")));

        assert!(matches!(
            result,
            Err(ExperimentPlotError::Experiment(ExperimentError::NoInputFiles))
        ));
    }

    #[test]
    fn missing_directory_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");
        let result = generate_experiment_plots(&missing, &settings(temp_dir.path().join("out")));

        assert!(matches!(
            result,
            Err(ExperimentPlotError::ListFiles { ref path, .. }) if path == &missing
        ));
    }

    #[test]
    fn wrong_simulation_count_names_the_file() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("results_c1.dat");
        fs::write(&input, result_file(&[vec![(10, 1), (20, 2)]])).unwrap();

        let result = generate_experiment_plots(temp_dir.path(), &settings(temp_dir.path().join("out")));

        match result {
            Err(ExperimentPlotError::InFile { path, source }) => {
                assert_eq!(path, input);
                assert!(matches!(
                    source,
                    ExperimentError::SimulationCountMismatch {
                        expected: 2,
                        found: 1
                    }
                ));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn malformed_row_fails_before_any_chart() {
        let temp_dir = TempDir::new().unwrap();
        let output_dir = temp_dir.path().join("out");
        fs::write(temp_dir.path().join("results_c1.dat"), "0 10 0 1\n").unwrap();

        let result = generate_experiment_plots(temp_dir.path(), &settings(output_dir.clone()));

        assert!(matches!(
            result,
            Err(ExperimentPlotError::Experiment(
                ExperimentError::UnexpectedFieldCount { line: 1, found: 4 }
            ))
        ));
        assert!(!output_dir.exists());
    }

    #[test]
    #[ignore = "Font rendering not available in test environment"]
    fn writes_three_charts_and_summary_per_file() {
        let temp_dir = TempDir::new().unwrap();
        let output_dir = temp_dir.path().join("report").join("plots");
        let runs: Vec<Vec<(u64, u64)>> = (0..2)
            .map(|run| {
                (0..64u64)
                    .map(|i| ((i + 1) * 200_000 * (run + 1), i / 3))
                    .collect()
            })
            .collect();
        fs::write(temp_dir.path().join("linear_results_c1.dat"), result_file(&runs)).unwrap();
        fs::write(temp_dir.path().join("linear_results_c2.dat"), result_file(&runs)).unwrap();

        let report = generate_experiment_plots(temp_dir.path(), &settings(output_dir.clone())).unwrap();

        assert_eq!(report.files.len(), 2);
        assert_eq!(
            report.files[0].charts,
            vec![
                output_dir.join("linear_population_comparisons_c1.png"),
                output_dir.join("linear_population_timings_c1.png"),
                output_dir.join("linear_population_eliteComparisons_c1.png"),
            ]
        );
        for file in &report.files {
            assert!(file.charts.iter().all(|chart| chart.exists()));
            let (text, json) = file.summary.as_ref().unwrap();
            assert!(text.exists());
            assert!(json.exists());
        }
    }
}
