//! Plotting infrastructure for experiment charts
//!
//! This module provides two renderers built on the [`plotters`] crate:
//! - [`render_series`]: one line per simulation, with markers and optional log-scaled Y-axis
//! - [`render_dominance_chart`]: a scatter of solutions joined by their dominance links
//!
//! Every render call takes a [`Figure`] describing the PNG to produce and hands it back
//! once the image has been saved. The bitmap backend only lives for the duration of
//! that call.

use crate::common::data_structures::Edge;
use plotters::coord::ranged1d::{AsRangedCoord, ValueFormatter};
use plotters::coord::Shift;
use plotters::prelude::IntoLogRange;
use plotters::prelude::*;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during plot generation
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Failed to save plot to file: {0}")]
    FileSave(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

type Result<T> = core::result::Result<T, PlotError>;

/// Default PNG resolution
pub const DEFAULT_FIGURE_SIZE: (u32, u32) = (1200, 800);

/// Scaling applied to the Y-axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisScale {
    Linear,
    /// Base 10 logarithmic scale; non-positive values are not drawn
    Log,
}

/// Optional limits for one axis; a missing limit is taken from the data
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisLimits {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl AxisLimits {
    /// Both limits taken from the data
    pub const AUTO: AxisLimits = AxisLimits {
        min: None,
        max: None,
    };

    pub fn fixed(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Only the lower limit is fixed
    pub fn starting_at(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn is_fixed(&self) -> bool {
        self.min.is_some() && self.max.is_some()
    }
}

/// Describes how a multi-series line chart is drawn
#[derive(Debug, Clone, Copy)]
pub struct ChartSpec<'a> {
    /// Caption drawn above the chart
    pub title: &'a str,
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub x_limits: AxisLimits,
    pub y_limits: AxisLimits,
    pub y_scale: AxisScale,
    /// A marker is drawn on every n-th point of each series
    pub marker_interval: usize,
}

/// Labels for a scatter chart
#[derive(Debug, Clone, Copy)]
pub struct ScatterSpec<'a> {
    pub title: &'a str,
    pub x_label: &'a str,
    pub y_label: &'a str,
}

/// Marker shapes, assigned to series in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    Circle,
    Triangle,
    Cross,
    Square,
}

impl MarkerShape {
    const ALL: [MarkerShape; 4] = [
        MarkerShape::Circle,
        MarkerShape::Triangle,
        MarkerShape::Cross,
        MarkerShape::Square,
    ];

    /// Shape used for the series at `index`; shapes repeat after the fourth series
    pub fn for_series(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }
}

/// A numeric value that can be placed on a chart axis
pub trait PlotValue: Copy {
    fn to_f64(self) -> f64;
}

impl PlotValue for u64 {
    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl PlotValue for u32 {
    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl PlotValue for f64 {
    fn to_f64(self) -> f64 {
        self
    }
}

/// A PNG image to be rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Figure {
    path: PathBuf,
    size: (u32, u32),
}

impl Figure {
    pub fn new(path: impl Into<PathBuf>, size: (u32, u32)) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }

    /// Where the image is saved
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Acquires a bitmap backend, runs `draw` on it and saves the result
    ///
    /// The parent directory of the output path is created if missing.
    fn draw<F>(&self, draw: F) -> Result<()>
    where
        F: FnOnce(&DrawingArea<BitMapBackend<'_>, Shift>) -> Result<()>,
    {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let root = BitMapBackend::new(&self.path, self.size).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

        draw(&root)?;

        // Ensure everything is properly rendered and saved
        root.present()
            .map_err(|e| PlotError::Drawing(e.to_string()))?;
        Ok(())
    }
}

/// Drawable points and resolved axis ranges of a line chart
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesLayout {
    /// Points of each simulation, in order
    pub lines: Vec<Vec<(f64, f64)>>,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
}

/// Pairs up the series and resolves both axis ranges without drawing anything
///
/// A chart without any drawable point is only accepted when its Y limits are fixed;
/// a missing X limit then falls back to a unit range.
pub fn layout_series<X, Y>(
    x_series: &[Vec<X>],
    y_series: &[Vec<Y>],
    spec: &ChartSpec<'_>,
) -> Result<SeriesLayout>
where
    X: PlotValue,
    Y: PlotValue,
{
    let lines = prepare_series(x_series, y_series, spec.y_scale)?;
    if lines.iter().all(Vec::is_empty) && !spec.y_limits.is_fixed() {
        return Err(PlotError::InvalidData("Data cannot be empty".to_string()));
    }

    let x_range = resolve_range(
        spec.x_limits,
        lines.iter().flatten().map(|&(x, _)| x),
        AxisScale::Linear,
    )?;
    let y_range = resolve_range(
        spec.y_limits,
        lines.iter().flatten().map(|&(_, y)| y),
        spec.y_scale,
    )?;

    Ok(SeriesLayout {
        lines,
        x_range,
        y_range,
    })
}

/// Draws one line per simulation and saves the chart as a PNG
///
/// # Arguments
/// * `figure` - Image to render into
/// * `x_series` - X values, one vector per simulation
/// * `y_series` - Y values, one vector per simulation, matching `x_series` in shape
/// * `spec` - Labels, limits, scale and marker spacing
///
/// # Returns
/// * `Ok(Figure)` - The figure, once its PNG has been written
/// * `Err(PlotError)` - If the data is malformed or drawing failed
pub fn render_series<X, Y>(
    figure: Figure,
    x_series: &[Vec<X>],
    y_series: &[Vec<Y>],
    spec: &ChartSpec<'_>,
) -> Result<Figure>
where
    X: PlotValue,
    Y: PlotValue,
{
    let SeriesLayout {
        lines,
        x_range,
        y_range,
    } = layout_series(x_series, y_series, spec)?;

    figure.draw(|area| match spec.y_scale {
        AxisScale::Linear => draw_line_chart(area, x_range, y_range, &lines, spec),
        AxisScale::Log => draw_line_chart(area, x_range, y_range.log_scale(), &lines, spec),
    })?;

    Ok(figure)
}

/// Draws solutions as points and each dominance link as a segment
///
/// # Returns
/// * `Ok(Figure)` - The figure, once its PNG has been written
/// * `Err(PlotError)` - If there are no points or drawing failed
pub fn render_dominance_chart(
    figure: Figure,
    points: &[(f64, f64)],
    edges: &[Edge],
    spec: &ScatterSpec<'_>,
) -> Result<Figure> {
    if points.is_empty() {
        return Err(PlotError::InvalidData("No solutions to plot".to_string()));
    }
    if points.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
        return Err(PlotError::InvalidData(
            "Solution coordinates must be finite".to_string(),
        ));
    }

    let x_range = padded_range(points.iter().map(|&(x, _)| x));
    let y_range = padded_range(points.iter().map(|&(_, y)| y));

    figure.draw(|area| {
        let mut chart = ChartBuilder::on(area)
            .caption(spec.title, ("sans-serif", 40))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(85)
            .build_cartesian_2d(x_range, y_range)
            .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

        chart
            .configure_mesh()
            .x_desc(spec.x_label)
            .y_desc(spec.y_label)
            .label_style(("sans-serif", 20))
            .draw()
            .map_err(|e| PlotError::Drawing(e.to_string()))?;

        chart
            .draw_series(edges.iter().map(|edge| {
                let color = Palette99::pick(edge.from).to_rgba();
                PathElement::new(vec![edge.start, edge.end], color.stroke_width(1))
            }))
            .map_err(|e| PlotError::Drawing(e.to_string()))?;

        chart
            .draw_series(
                points
                    .iter()
                    .map(|&point| Circle::new(point, 4, BLUE.filled())),
            )
            .map_err(|e| PlotError::Drawing(e.to_string()))?;

        Ok(())
    })?;

    Ok(figure)
}

fn draw_line_chart<Y>(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    x_range: Range<f64>,
    y_range: Y,
    lines: &[Vec<(f64, f64)>],
    spec: &ChartSpec<'_>,
) -> Result<()>
where
    Y: AsRangedCoord<Value = f64>,
    Y::CoordDescType: ValueFormatter<f64>,
{
    let mut chart = ChartBuilder::on(area)
        .caption(spec.title, ("sans-serif", 40))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(110)
        .build_cartesian_2d(x_range, y_range)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc(spec.x_label)
        .y_desc(spec.y_label)
        .label_style(("sans-serif", 20))
        .x_label_formatter(&format_scientific)
        .y_label_formatter(&format_scientific)
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    for (index, points) in lines.iter().enumerate() {
        let color = Palette99::pick(index).to_rgba();
        let style = color.stroke_width(2);

        chart
            .draw_series(LineSeries::new(points.iter().copied(), style))
            .map_err(|e| PlotError::Drawing(e.to_string()))?
            .label(format!("Simulation {}", index + 1))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));

        let markers = marker_points(points, spec.marker_interval);
        let drawn = match MarkerShape::for_series(index) {
            MarkerShape::Circle => chart
                .draw_series(markers.iter().map(|&p| Circle::new(p, 6, style)))
                .map(|_| ()),
            MarkerShape::Triangle => chart
                .draw_series(markers.iter().map(|&p| TriangleMarker::new(p, 7, style)))
                .map(|_| ()),
            MarkerShape::Cross => chart
                .draw_series(markers.iter().map(|&p| Cross::new(p, 6, style)))
                .map(|_| ()),
            MarkerShape::Square => chart
                .draw_series(markers.iter().map(|&p| {
                    EmptyElement::at(p) + Rectangle::new([(-5, -5), (5, 5)], style.filled())
                }))
                .map(|_| ()),
        };
        drawn.map_err(|e| PlotError::Drawing(e.to_string()))?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font(("sans-serif", 18))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(())
}

/// Pairs up X and Y values per simulation, dropping points that cannot be drawn
///
/// Non-finite points are always dropped; points with non-positive Y are dropped on a log scale.
fn prepare_series<X, Y>(
    x_series: &[Vec<X>],
    y_series: &[Vec<Y>],
    y_scale: AxisScale,
) -> Result<Vec<Vec<(f64, f64)>>>
where
    X: PlotValue,
    Y: PlotValue,
{
    if x_series.len() != y_series.len() {
        return Err(PlotError::InvalidData(format!(
            "{} X series but {} Y series",
            x_series.len(),
            y_series.len()
        )));
    }

    let mut lines = Vec::with_capacity(x_series.len());
    for (index, (xs, ys)) in x_series.iter().zip(y_series).enumerate() {
        if xs.len() != ys.len() {
            return Err(PlotError::InvalidData(format!(
                "Simulation {} has {} X values but {} Y values",
                index + 1,
                xs.len(),
                ys.len()
            )));
        }

        let line: Vec<(f64, f64)> = xs
            .iter()
            .zip(ys)
            .map(|(&x, &y)| (x.to_f64(), y.to_f64()))
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .filter(|&(_, y)| y_scale == AxisScale::Linear || y > 0.0)
            .collect();
        lines.push(line);
    }

    Ok(lines)
}

/// Resolves axis limits, filling missing ones from `values`
fn resolve_range(
    limits: AxisLimits,
    values: impl Iterator<Item = f64>,
    scale: AxisScale,
) -> Result<Range<f64>> {
    let (data_min, data_max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });

    // No points: unit range (one decade on a log axis)
    let (data_min, data_max) = if data_min > data_max {
        match scale {
            AxisScale::Linear => (0.0, 1.0),
            AxisScale::Log => (1.0, 10.0),
        }
    } else {
        (data_min, data_max)
    };

    let min = limits.min.unwrap_or(data_min);
    let mut max = limits.max.unwrap_or(data_max);

    if !min.is_finite() || !max.is_finite() {
        return Err(PlotError::InvalidData(format!(
            "Axis limits must be finite, got {min}..{max}"
        )));
    }
    if scale == AxisScale::Log && min <= 0.0 {
        return Err(PlotError::InvalidData(format!(
            "Logarithmic axis must start above zero, got {min}"
        )));
    }

    // Fix edge case: if min >= max, create a valid range
    if min >= max {
        max = match scale {
            AxisScale::Linear => min + 1.0,
            AxisScale::Log => min * 10.0,
        };
    }

    Ok(min..max)
}

/// Data range with 5% padding on both sides
fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });

    let span = max - min;
    if span > 0.0 {
        let pad = span * 0.05;
        (min - pad)..(max + pad)
    } else {
        (min - 0.5)..(max + 0.5)
    }
}

/// Points that receive a marker: the first, then every `interval`-th after it
fn marker_points(points: &[(f64, f64)], interval: usize) -> Vec<(f64, f64)> {
    points.iter().step_by(interval.max(1)).copied().collect()
}

/// Tick label in scientific notation, e.g. `2.5e4`
fn format_scientific(value: &f64) -> String {
    if *value == 0.0 {
        "0".to_string()
    } else {
        format!("{:.1e}", value)
    }
}
