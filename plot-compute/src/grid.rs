//! Uniform evaluation grids, and the numeric arrays produced by evaluating over them.

use crate::error::{InvalidBounds, InvalidResolution};
use plot_error::Error;

/// The largest number of points on a line.
pub const MAX_LINE_RESOLUTION: usize = 100_000;

/// The largest number of points along each axis of a mesh.
pub const MAX_MESH_RESOLUTION: usize = 2_000;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The shape of a grid, and of every array evaluated over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Shape {
    /// A one-dimensional line of points.
    Line(usize),

    /// A two-dimensional mesh of points, stored in row-major order.
    Mesh {
        rows: usize,
        cols: usize,
    },
}

impl Shape {
    /// The total number of points.
    pub fn len(&self) -> usize {
        match *self {
            Shape::Line(n) => n,
            Shape::Mesh { rows, cols } => rows.saturating_mul(cols),
        }
    }

    /// Returns true if there are no points.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Returns `n` evenly spaced points over `[min, max]`.
///
/// Both endpoints are exact. If `n` is 1, the only point is `min`. Points are interpolated
/// without computing `max - min`, which overflows for bounds near `±f64::MAX`.
pub fn linspace(min: f64, max: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let last = (n - 1) as f64;
            (0..n)
                .map(|i| match i {
                    0 => min,
                    _ if i == n - 1 => max,
                    _ => {
                        let t = i as f64 / last;
                        min * (1.0 - t) + max * t
                    },
                })
                .collect()
        },
    }
}

/// Checks that the bounds of an axis are finite and increasing.
pub fn check_bounds(axis: &str, min: f64, max: f64) -> Result<(), Error> {
    if min.is_finite() && max.is_finite() && min < max {
        Ok(())
    } else {
        Err(Error::unspanned(InvalidBounds { axis: axis.to_owned(), min, max }))
    }
}

/// Checks that a resolution is at least 1 and at most `max`.
pub fn check_resolution(n: usize, max: usize) -> Result<(), Error> {
    if (1..=max).contains(&n) {
        Ok(())
    } else {
        Err(Error::unspanned(InvalidResolution { given: n, max }))
    }
}

/// A set of evaluation points.
///
/// A grid holds the coordinate vector of each axis, and one flattened coordinate column per
/// variable. For meshes, the columns follow the `meshgrid` convention: `X[i][j] = x[j]` and
/// `Y[i][j] = y[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    axes: Vec<Vec<f64>>,
    columns: Vec<Vec<f64>>,
    shape: Shape,
}

impl Grid {
    /// Creates a line of `n` points over `[min, max]`.
    pub fn line(min: f64, max: f64, n: usize) -> Result<Self, Error> {
        check_bounds("x", min, max)?;
        check_resolution(n, MAX_LINE_RESOLUTION)?;
        Ok(Self::from_axis(linspace(min, max, n)))
    }

    /// Creates an `n` by `n` mesh over `[x_min, x_max] × [y_min, y_max]`.
    pub fn mesh(x: (f64, f64), y: (f64, f64), n: usize) -> Result<Self, Error> {
        check_bounds("x", x.0, x.1)?;
        check_bounds("y", y.0, y.1)?;
        check_resolution(n, MAX_MESH_RESOLUTION)?;
        Self::from_axes(linspace(x.0, x.1, n), linspace(y.0, y.1, n))
    }

    /// Creates a line from the given coordinates.
    pub fn from_axis(x: Vec<f64>) -> Self {
        let shape = Shape::Line(x.len());
        Self {
            columns: vec![x.clone()],
            axes: vec![x],
            shape,
        }
    }

    /// Creates a mesh from the coordinates of each axis. Rows follow `y`, columns follow `x`.
    ///
    /// Returns an error if the number of points does not fit in a `usize`.
    pub fn from_axes(x: Vec<f64>, y: Vec<f64>) -> Result<Self, Error> {
        let (rows, cols) = (y.len(), x.len());
        let len = rows.checked_mul(cols)
            .ok_or_else(|| Error::unspanned(InvalidResolution {
                given: rows.max(cols),
                max: MAX_MESH_RESOLUTION,
            }))?;
        let mut xs = Vec::with_capacity(len);
        let mut ys = Vec::with_capacity(len);
        for &y_value in &y {
            xs.extend_from_slice(&x);
            ys.extend(std::iter::repeat(y_value).take(cols));
        }

        Ok(Self {
            axes: vec![x, y],
            columns: vec![xs, ys],
            shape: Shape::Mesh { rows, cols },
        })
    }

    /// The shape of the grid.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// The number of variables of the grid.
    pub fn arity(&self) -> usize {
        self.columns.len()
    }

    /// The total number of points.
    pub fn len(&self) -> usize {
        self.shape.len()
    }

    /// Returns true if the grid has no points.
    pub fn is_empty(&self) -> bool {
        self.shape.is_empty()
    }

    /// The coordinates along the given axis.
    pub fn axis(&self, index: usize) -> Option<&[f64]> {
        self.axes.get(index).map(Vec::as_slice)
    }

    /// The flattened coordinate column of the given variable.
    pub fn column(&self, index: usize) -> Option<&[f64]> {
        self.columns.get(index).map(Vec::as_slice)
    }

    /// All coordinate columns, in variable order.
    pub fn columns(&self) -> Vec<&[f64]> {
        self.columns.iter().map(Vec::as_slice).collect()
    }
}

/// The values of an expression evaluated over a grid.
///
/// Points whose value was complex hold `NaN`, and are flagged in the complex mask.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NumericArray {
    values: Vec<f64>,
    complex: Vec<bool>,
    shape: Shape,
}

impl NumericArray {
    /// Creates an array. The values and mask must both have the length of the shape.
    pub(crate) fn new(values: Vec<f64>, complex: Vec<bool>, shape: Shape) -> Self {
        debug_assert_eq!(values.len(), shape.len());
        debug_assert_eq!(complex.len(), shape.len());
        Self { values, complex, shape }
    }

    /// Joins arrays evaluated over consecutive chunks of a grid into one array of the given shape.
    pub fn concat(parts: impl IntoIterator<Item = NumericArray>, shape: Shape) -> Self {
        let mut values = Vec::with_capacity(shape.len());
        let mut complex = Vec::with_capacity(shape.len());
        for part in parts {
            values.extend(part.values);
            complex.extend(part.complex);
        }
        Self::new(values, complex, shape)
    }

    /// Returns the same values with a different shape of the same length.
    pub(crate) fn reshape(self, shape: Shape) -> Self {
        Self::new(self.values, self.complex, shape)
    }

    /// The values, flattened in row-major order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Whether the value at each point was discarded for being complex.
    pub fn complex_mask(&self) -> &[bool] {
        &self.complex
    }

    /// Returns true if the value at the given index was complex.
    pub fn is_complex(&self, index: usize) -> bool {
        self.complex.get(index).copied().unwrap_or(false)
    }

    /// The shape of the array.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// The number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there are no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The rows of a mesh. A line has a single row.
    pub fn rows(&self) -> Vec<&[f64]> {
        match self.shape {
            Shape::Line(_) => vec![&self.values],
            Shape::Mesh { cols, .. } if cols > 0 => self.values.chunks(cols).collect(),
            Shape::Mesh { .. } => Vec::new(),
        }
    }

    /// Consumes the array, returning its values and complex mask.
    pub fn into_parts(self) -> (Vec<f64>, Vec<bool>) {
        (self.values, self.complex)
    }
}

#[cfg(test)]
mod tests {
    use plot_error::Category;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn linspace_endpoints() {
        assert_eq!(linspace(-2.0, 2.0, 5), vec![-2.0, -1.0, 0.0, 1.0, 2.0]);
        assert_eq!(linspace(3.0, 4.0, 1), vec![3.0]);

        let points = linspace(-5.0, 5.0, 800);
        assert_eq!(points.len(), 800);
        assert_eq!(points[0], -5.0);
        assert_eq!(points[799], 5.0);
    }

    #[test]
    fn meshgrid_convention() {
        let grid = Grid::from_axes(vec![1.0, 2.0, 3.0], vec![10.0, 20.0]).unwrap();
        assert_eq!(grid.shape(), Shape::Mesh { rows: 2, cols: 3 });
        assert_eq!(grid.column(0).unwrap(), &[1.0, 2.0, 3.0, 1.0, 2.0, 3.0]);
        assert_eq!(grid.column(1).unwrap(), &[10.0, 10.0, 10.0, 20.0, 20.0, 20.0]);
        assert_eq!(grid.axis(1).unwrap(), &[10.0, 20.0]);
    }

    #[test]
    fn invalid_grids() {
        let err = Grid::line(1.0, 1.0, 10).unwrap_err();
        assert_eq!(err.category(), Category::InvalidRequest);

        let err = Grid::line(f64::NAN, 1.0, 10).unwrap_err();
        assert!(err.is::<InvalidBounds>());

        let err = Grid::mesh((0.0, 1.0), (2.0, -2.0), 10).unwrap_err();
        assert_eq!(err.downcast_ref::<InvalidBounds>().unwrap().axis, "y");

        let err = Grid::line(0.0, 1.0, 0).unwrap_err();
        assert!(err.is::<InvalidResolution>());
    }

    #[test]
    fn resolution_limits() {
        assert!(Grid::line(0.0, 1.0, MAX_LINE_RESOLUTION).is_ok());

        let err = Grid::line(0.0, 1.0, usize::MAX).unwrap_err();
        assert_eq!(
            err.downcast_ref::<InvalidResolution>(),
            Some(&InvalidResolution { given: usize::MAX, max: MAX_LINE_RESOLUTION }),
        );

        let err = Grid::mesh((0.0, 1.0), (0.0, 1.0), MAX_MESH_RESOLUTION + 1).unwrap_err();
        assert_eq!(err.category(), Category::InvalidRequest);
        assert_eq!(err.downcast_ref::<InvalidResolution>().unwrap().max, MAX_MESH_RESOLUTION);
    }

    #[test]
    fn shape_len_saturates() {
        assert_eq!(Shape::Mesh { rows: usize::MAX, cols: 2 }.len(), usize::MAX);
    }

    #[test]
    fn linspace_extreme_bounds() {
        let points = linspace(-1e308, 1e308, 5);
        assert_eq!(points, vec![-1e308, -5e307, 0.0, 5e307, 1e308]);
        assert!(points.iter().all(|point| point.is_finite()));
    }

    #[test]
    fn rows() {
        let array = NumericArray::new(vec![1.0, 2.0, 3.0, 4.0], vec![false; 4], Shape::Mesh { rows: 2, cols: 2 });
        assert_eq!(array.rows(), vec![&[1.0, 2.0][..], &[3.0, 4.0][..]]);
    }
}
