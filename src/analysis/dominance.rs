//! Dominance link analysis
//!
//! Resolves the dominated ids of each solution into drawable edges and renders the
//! dominance chart.

use crate::common::data_structures::{DominanceSet, Edge};
use crate::common::plots::{render_dominance_chart, Figure, PlotError, ScatterSpec};
use crate::parsing::dominance::{parse_dominance_file, DominanceError};
use crate::settings::ReportSettings;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// File name of the rendered dominance chart
pub const DOMINANCE_CHART_FILE: &str = "dominance_links.png";

/// Errors that can occur while generating the dominance chart
#[derive(Error, Debug)]
pub enum DominancePlotError {
    #[error(transparent)]
    Dominance(#[from] DominanceError),

    #[error("Failed to generate plot: {0}")]
    PlotGeneration(#[from] PlotError),
}

impl DominanceSet {
    /// Resolves every dominance link into an [`Edge`]
    ///
    /// # Returns
    /// * `Ok(Vec<Edge>)` - One edge per dominated id, in file order
    /// * `Err(DominanceError::UnknownId)` - If a dominated id names no solution in the set
    pub fn edges(&self) -> Result<Vec<Edge>, DominanceError> {
        let mut names = vec![""; self.len()];
        for (id, &index) in &self.ids {
            names[index] = id;
        }

        let mut edges = Vec::new();
        for (from, dominated) in self.dominates.iter().enumerate() {
            for id in dominated {
                let to = *self.ids.get(id).ok_or_else(|| DominanceError::UnknownId {
                    from: names[from].to_string(),
                    id: id.clone(),
                })?;

                edges.push(Edge {
                    from,
                    to,
                    start: (self.x[from], self.y[from]),
                    end: (self.x[to], self.y[to]),
                });
            }
        }

        Ok(edges)
    }

    /// Returns a copy with both objectives replaced by their z-scores
    ///
    /// Uses the sample standard deviation, so at least two solutions are required.
    pub fn standardised(&self) -> Result<DominanceSet, DominanceError> {
        if self.len() < 2 {
            return Err(DominanceError::NotEnoughSolutions);
        }

        Ok(DominanceSet {
            ids: self.ids.clone(),
            x: standardise(&self.x).ok_or(DominanceError::ZeroDeviation("x"))?,
            y: standardise(&self.y).ok_or(DominanceError::ZeroDeviation("y"))?,
            dominates: self.dominates.clone(),
        })
    }
}

/// Z-scores of `values`, or `None` when they do not vary
fn standardise(values: &[f64]) -> Option<Vec<f64>> {
    let count = values.len() as f64;
    let mean = values.iter().sum::<f64>() / count;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1.0);
    let deviation = variance.sqrt();

    if deviation == 0.0 || !deviation.is_finite() {
        return None;
    }

    Some(values.iter().map(|v| (v - mean) / deviation).collect())
}

/// Generate the dominance chart for a parsed domination links file
///
/// # Arguments
/// * `set` - Solutions and their dominance links
/// * `settings` - Output directory and image size
/// * `standardise_values` - Plot z-scores instead of raw objective values
///
/// # Returns
/// * `Ok((PathBuf, usize))` - Path of the written chart and the number of edges drawn
/// * `Err(DominancePlotError)` - If an id is unknown, standardisation fails, or drawing fails
pub fn generate_dominance_plot(
    set: &DominanceSet,
    settings: &ReportSettings,
    standardise_values: bool,
) -> Result<(PathBuf, usize), DominancePlotError> {
    let standardised;
    let set = if standardise_values {
        standardised = set.standardised()?;
        &standardised
    } else {
        set
    };

    let edges = set.edges()?;
    debug!(solutions = set.len(), edges = edges.len(), "resolved dominance links");

    let figure = Figure::new(
        settings.output_dir.join(DOMINANCE_CHART_FILE),
        settings.image_size,
    );
    let figure = render_dominance_chart(
        figure,
        &set.points(),
        &edges,
        &ScatterSpec {
            title: "Dominance Links",
            x_label: "Objective 2",
            y_label: "Objective 1",
        },
    )?;

    info!(path = %figure.path().display(), "wrote dominance chart");
    Ok((figure.path().to_path_buf(), edges.len()))
}

/// Parses a domination links file and renders its chart
pub fn generate_dominance_plot_from_file(
    input: &Path,
    settings: &ReportSettings,
    standardise_values: bool,
) -> Result<(PathBuf, usize), DominancePlotError> {
    let set = parse_dominance_file(input)?;
    info!(input = %input.display(), solutions = set.len(), "loaded dominance links");
    generate_dominance_plot(&set, settings, standardise_values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::dominance::parse_dominance_data;
    use std::io::Cursor;

    fn parse(input: &str) -> DominanceSet {
        parse_dominance_data(Cursor::new(input)).unwrap()
    }

    #[test]
    fn two_solution_example_has_single_edge() {
        let set = parse("A,[0.1, 0.2],[B]\nB,[0.3, 0.1],[]\n");
        let edges = set.edges().unwrap();

        assert_eq!(
            edges,
            vec![Edge {
                from: 0,
                to: 1,
                start: (0.1, 0.2),
                end: (0.3, 0.1),
            }]
        );
    }

    #[test]
    fn every_dominated_id_has_a_segment() {
        let set = parse(
            "A,[0, 0],[B, C]\n\
             B,[1, 1],[D]\n\
             C,[2, 0.5],[D]\n\
             D,[3, 3],[]\n",
        );
        let edges = set.edges().unwrap();
        assert_eq!(edges.len(), 4);

        for (from, dominated) in set.dominates.iter().enumerate() {
            for id in dominated {
                let to = set.ids[id];
                assert!(edges.iter().any(|edge| edge.from == from
                    && edge.to == to
                    && edge.start == (set.x[from], set.y[from])
                    && edge.end == (set.x[to], set.y[to])));
            }
        }
    }

    #[test]
    fn unknown_id_is_an_error() {
        let set = parse("A,[0.1, 0.2],[Z]\nB,[0.3, 0.1],[]\n");
        let err = set.edges().unwrap_err();
        assert!(matches!(
            err,
            DominanceError::UnknownId { ref from, ref id } if from == "A" && id == "Z"
        ));
    }

    #[test]
    fn standardised_values_have_zero_mean_and_unit_deviation() {
        let set = parse("A,[1, 10],[B]\nB,[2, 20],[]\nC,[3, 30],[]\n");
        let standardised = set.standardised().unwrap();

        assert_eq!(standardised.x, vec![-1.0, 0.0, 1.0]);
        assert_eq!(standardised.y, vec![-1.0, 0.0, 1.0]);
        assert_eq!(standardised.ids, set.ids);
        assert_eq!(standardised.dominates, set.dominates);
    }

    #[test]
    fn standardising_requires_variation() {
        let single = parse("A,[1, 10],[]\n");
        assert!(matches!(
            single.standardised(),
            Err(DominanceError::NotEnoughSolutions)
        ));

        let flat = parse("A,[1, 10],[]\nB,[1, 20],[]\n");
        assert!(matches!(
            flat.standardised(),
            Err(DominanceError::ZeroDeviation("x"))
        ));
    }

    #[test]
    fn unknown_id_fails_before_rendering() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let mut settings = ReportSettings::new(temp_dir.path().join("plots"));
        settings.sanitize();

        let set = parse("A,[0.1, 0.2],[Missing]\n");
        let result = generate_dominance_plot(&set, &settings, false);

        assert!(matches!(
            result,
            Err(DominancePlotError::Dominance(DominanceError::UnknownId { .. }))
        ));
        assert!(!settings.output_dir.exists());
    }

    #[test]
    #[ignore = "Font rendering not available in test environment"]
    fn writes_dominance_chart() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let settings = ReportSettings::new(temp_dir.path().to_path_buf());

        let set = parse("A,[0.1, 0.2],[B]\nB,[0.3, 0.1],[]\n");
        let (path, edges) = generate_dominance_plot(&set, &settings, false).unwrap();

        assert_eq!(edges, 1);
        assert!(path.exists());
    }
}
