//! Symbolic transforms and vectorized numeric evaluation of plottable expressions.
//!
//! This crate takes expressions validated by [`plot_parser`] and provides everything the plotting
//! pipeline does with them:
//!
//! - [`symbolic`]: a flattened symbolic form, a light simplifier, exact first derivatives, and a
//!   rule-based integrator that either finds a closed form or fails.
//! - [`numeric`]: compilation to a column machine that evaluates whole grids at once, replacing
//!   complex values with `NaN` rather than keeping their real part.
//! - [`grid`]: uniform evaluation grids and the arrays produced over them.
//! - [`backend`]: the [`Backend`] trait tying these together, with the [`NativeBackend`]
//!   implementation.
//!
//! ```
//! use plot_compute::{grid::Grid, Expression};
//! use plot_parser::{SymbolTable, Variable};
//!
//! let expr = Expression::parse("x^2", SymbolTable::CURVE).unwrap();
//! let derivative = expr.derivative(Variable::X).unwrap();
//! assert_eq!(derivative.to_string(), "2 * x");
//!
//! let grid = Grid::line(-2.0, 2.0, 5).unwrap();
//! let values = derivative.compile().unwrap().eval(&grid).unwrap();
//! assert_eq!(values.values(), &[-4.0, -2.0, 0.0, 2.0, 4.0]);
//! ```

pub mod backend;
pub mod error;
pub mod expression;
pub mod grid;
pub mod numeric;
pub mod symbolic;

pub use backend::{Backend, NativeBackend};
pub use expression::Expression;
