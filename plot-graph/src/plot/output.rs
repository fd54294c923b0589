use super::sample::{Sampled, StatusCounts};
use plot_compute::grid::Grid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named curve, ready to be drawn by a renderer.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Series {
    /// The label of the series: `f(x)`, `f'(x)`, or `∫f(x) dx`.
    pub label: String,

    /// The symbolic form of the plotted expression.
    pub expression: String,

    /// The `x`-coordinates of the points.
    pub x: Vec<f64>,

    /// The values at each point. Non-finite and complex points hold `NaN` or an infinity.
    pub y: Vec<f64>,

    /// Whether each value was discarded for being complex.
    pub complex: Vec<bool>,

    /// The number of points with each status.
    pub counts: StatusCounts,
}

impl Series {
    pub(crate) fn new(label: &str, expression: String, grid: &Grid, sampled: Sampled) -> Self {
        let (y, complex) = sampled.values.into_parts();
        Self {
            label: label.to_owned(),
            expression,
            x: grid.axis(0).map(<[f64]>::to_vec).unwrap_or_default(),
            y,
            complex,
            counts: sampled.counts,
        }
    }

    /// The finite points of the series.
    pub fn finite_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter()
            .copied()
            .zip(self.y.iter().copied())
            .filter(|(_, y)| y.is_finite())
    }

    /// The smallest and largest finite values, if any.
    pub fn range(&self) -> Option<(f64, f64)> {
        finite_range(self.y.iter().copied())
    }
}

/// A surface, ready to be drawn by a renderer.
///
/// The meshes follow the `meshgrid` convention: `x[i][j] = x_j` and `y[i][j] = y_i`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SurfaceMesh {
    /// The title of the surface, `f(x, y)`.
    pub title: String,

    /// The symbolic form of the plotted expression.
    pub expression: String,

    /// The `x`-coordinate of each point.
    pub x: Vec<Vec<f64>>,

    /// The `y`-coordinate of each point.
    pub y: Vec<Vec<f64>>,

    /// The value at each point.
    pub z: Vec<Vec<f64>>,

    /// The number of points with each status.
    pub counts: StatusCounts,
}

/// Splits a flattened column into rows of the given length.
fn to_rows(values: &[f64], cols: usize) -> Vec<Vec<f64>> {
    if cols == 0 {
        return Vec::new();
    }
    values.chunks(cols).map(<[f64]>::to_vec).collect()
}

impl SurfaceMesh {
    pub(crate) fn new(title: &str, expression: String, grid: &Grid, sampled: Sampled) -> Self {
        let cols = grid.axis(0).map_or(0, <[f64]>::len);
        let column = |index| grid.column(index).map(|column| to_rows(column, cols)).unwrap_or_default();
        Self {
            title: title.to_owned(),
            expression,
            x: column(0),
            y: column(1),
            z: sampled.values.rows().into_iter().map(<[f64]>::to_vec).collect(),
            counts: sampled.counts,
        }
    }

    /// The smallest and largest finite values, if any.
    pub fn range(&self) -> Option<(f64, f64)> {
        finite_range(self.z.iter().flatten().copied())
    }
}

/// The smallest and largest finite values.
fn finite_range(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values.into_iter()
        .filter(|value| value.is_finite())
        .fold(None, |range, value| match range {
            None => Some((value, value)),
            Some((min, max)) => Some((f64::min(min, value), f64::max(max, value))),
        })
}

/// The result of a plot.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PlotOutput {
    /// The curve of the expression, followed by its derivative and integral if requested. All
    /// series share the same `x`-coordinates.
    Curve(Vec<Series>),

    /// The surface of the expression.
    Surface(SurfaceMesh),
}

impl PlotOutput {
    /// The series of a curve plot.
    pub fn series(&self) -> &[Series] {
        match self {
            PlotOutput::Curve(series) => series,
            PlotOutput::Surface(_) => &[],
        }
    }

    /// The mesh of a surface plot.
    pub fn surface(&self) -> Option<&SurfaceMesh> {
        match self {
            PlotOutput::Curve(_) => None,
            PlotOutput::Surface(mesh) => Some(mesh),
        }
    }
}
