//! Evaluation of compiled expressions over grids, and classification of the results.

use crate::error::EmptyResult;
use plot_compute::{
    grid::{Grid, NumericArray},
    numeric::CompiledExpr,
    Expression,
};
use plot_error::Error;
use rayon::prelude::*;
use super::opts::SamplingOptions;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The status of a single sampled point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Status {
    /// The value is a finite real number.
    Finite,

    /// The value is `NaN` or infinite, from real arithmetic (e.g. `1/0` or `ln(0)`).
    NonFinite,

    /// The value was complex, and was discarded.
    Complex,
}

/// The number of sampled points with each [`Status`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StatusCounts {
    pub finite: usize,
    pub non_finite: usize,
    pub complex: usize,
}

impl StatusCounts {
    /// The total number of points.
    pub fn total(&self) -> usize {
        self.finite + self.non_finite + self.complex
    }

    fn record(&mut self, status: Status) {
        match status {
            Status::Finite => self.finite += 1,
            Status::NonFinite => self.non_finite += 1,
            Status::Complex => self.complex += 1,
        }
    }
}

/// The classified values of an expression over a grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Sampled {
    /// The values at each point of the grid.
    pub values: NumericArray,

    /// The number of points with each status.
    pub counts: StatusCounts,
}

impl Sampled {
    /// Classifies every value of the array.
    pub fn classify(values: NumericArray) -> Self {
        let mut counts = StatusCounts::default();
        for index in 0..values.len() {
            counts.record(status_of(&values, index));
        }
        Self { values, counts }
    }

    /// The status of the point at the given index.
    pub fn status(&self, index: usize) -> Status {
        status_of(&self.values, index)
    }

    /// The status of every point, in order.
    pub fn statuses(&self) -> impl Iterator<Item = Status> + '_ {
        (0..self.values.len()).map(|index| self.status(index))
    }

    /// Returns an [`EmptyResult`] error if no point is finite.
    pub fn require_finite(self, label: &str, expression: &str) -> Result<Self, Error> {
        if self.counts.finite == 0 {
            Err(Error::unspanned(EmptyResult {
                label: label.to_owned(),
                expression: expression.to_owned(),
            }))
        } else {
            Ok(self)
        }
    }
}

fn status_of(values: &NumericArray, index: usize) -> Status {
    if values.is_complex(index) {
        Status::Complex
    } else if values.values().get(index).is_some_and(|value| value.is_finite()) {
        Status::Finite
    } else {
        Status::NonFinite
    }
}

/// Evaluates the compiled expression over the grid and classifies the result.
///
/// Grids larger than [`SamplingOptions::parallel_threshold`] are split into chunks that are
/// evaluated in parallel. The result is identical to evaluating the whole grid at once.
pub fn evaluate(compiled: &CompiledExpr, grid: &Grid, options: &SamplingOptions) -> Result<Sampled, Error> {
    let chunk_len = options.parallel_threshold.max(1);
    let values = if grid.len() <= chunk_len {
        compiled.eval(grid)?
    } else {
        let columns = grid.columns();
        let chunks = grid.len().div_ceil(chunk_len);
        log::trace!("evaluating {} points in {} parallel chunks", grid.len(), chunks);

        let parts = (0..chunks)
            .into_par_iter()
            .map(|chunk| {
                let start = chunk * chunk_len;
                let end = (start + chunk_len).min(grid.len());
                let slices = columns.iter()
                    .map(|column| &column[start..end])
                    .collect::<Vec<_>>();
                compiled.eval_slices(&slices)
            })
            .collect::<Result<Vec<_>, _>>()?;
        NumericArray::concat(parts, grid.shape())
    };

    Ok(Sampled::classify(values))
}

/// Samples the expression at `n` evenly spaced points over `[x_min, x_max]`.
///
/// Returns an [`EmptyResult`] error if no point is finite.
pub fn sample_curve(expression: &Expression, x_min: f64, x_max: f64, n: usize) -> Result<(Grid, Sampled), Error> {
    let grid = Grid::line(x_min, x_max, n)?;
    let sampled = evaluate(&expression.compile()?, &grid, &SamplingOptions::default())?
        .require_finite("f(x)", &expression.to_string())?;
    Ok((grid, sampled))
}

/// Samples the expression on an `n×n` mesh over `[x_min, x_max] × [y_min, y_max]`.
///
/// Returns an [`EmptyResult`] error if no point is finite.
pub fn sample_surface(
    expression: &Expression,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    n: usize,
) -> Result<(Grid, Sampled), Error> {
    let grid = Grid::mesh((x_min, x_max), (y_min, y_max), n)?;
    let sampled = evaluate(&expression.compile()?, &grid, &SamplingOptions::default())?
        .require_finite("f(x, y)", &expression.to_string())?;
    Ok((grid, sampled))
}

#[cfg(test)]
mod tests {
    use plot_error::Category;
    use plot_parser::SymbolTable;
    use pretty_assertions::assert_eq;
    use super::*;

    fn parsed(text: &str, table: SymbolTable) -> Expression {
        Expression::parse(text, table).unwrap()
    }

    fn compiled(text: &str, table: SymbolTable) -> CompiledExpr {
        parsed(text, table).compile().unwrap()
    }

    #[test]
    fn classification() {
        let (_, sampled) = sample_curve(&parsed("sqrt(x) + 1 / x", SymbolTable::CURVE), -1.0, 1.0, 3).unwrap();
        assert_eq!(sampled.statuses().collect::<Vec<_>>(), vec![
            Status::Complex,
            Status::NonFinite,
            Status::Finite,
        ]);
        assert_eq!(sampled.counts, StatusCounts { finite: 1, non_finite: 1, complex: 1 });
    }

    #[test]
    fn empty_result() {
        let err = sample_curve(&parsed("sqrt(x)", SymbolTable::CURVE), -2.0, -1.0, 10).unwrap_err();
        assert_eq!(err.category(), Category::EmptyResult);

        let err = sample_surface(&parsed("ln(-x^2 - y^2)", SymbolTable::SURFACE), -1.0, 1.0, -1.0, 1.0, 5).unwrap_err();
        assert_eq!(err.category(), Category::EmptyResult);
    }

    #[test]
    fn empty_result_names_expression() {
        let expression = parsed("sqrt(x - 10)", SymbolTable::CURVE);
        let err = sample_curve(&expression, -2.0, -1.0, 10).unwrap_err();
        let empty = err.downcast_ref::<EmptyResult>().unwrap();
        assert_eq!(empty.label, "f(x)");
        assert_eq!(empty.expression, expression.to_string());
        assert_ne!(empty.expression, "f");

        let text = "sqrt(-x^2 - y^2 - 1)";
        let expression = parsed(text, SymbolTable::SURFACE);
        let err = sample_surface(&expression, -1.0, 1.0, -1.0, 1.0, 5).unwrap_err();
        assert_eq!(err.downcast_ref::<EmptyResult>().unwrap().label, "f(x, y)");
        assert!(err.render_plain("input", text).contains(&expression.to_string()));
    }

    #[test]
    fn parallel_matches_sequential() {
        let f = compiled("sin(x) * y + sqrt(x)", SymbolTable::SURFACE);
        let grid = Grid::mesh((-3.0, 3.0), (-2.0, 2.0), 61).unwrap();
        let sequential = evaluate(&f, &grid, &SamplingOptions::default()).unwrap();
        let parallel = evaluate(&f, &grid, &SamplingOptions::default().parallel_threshold(100)).unwrap();

        assert_eq!(parallel.values.shape(), grid.shape());
        assert_eq!(parallel.counts, sequential.counts);
        for (a, b) in parallel.values.values().iter().zip(sequential.values.values()) {
            assert!(a == b || (a.is_nan() && b.is_nan()));
        }
    }

    #[test]
    fn invalid_grid() {
        let f = parsed("x", SymbolTable::CURVE);
        let err = sample_curve(&f, 1.0, -1.0, 10).unwrap_err();
        assert_eq!(err.category(), Category::InvalidRequest);
        let err = sample_curve(&f, -1.0, 1.0, 0).unwrap_err();
        assert_eq!(err.category(), Category::InvalidRequest);
    }
}
