//! Sampling engine and plotting pipeline for math expressions.
//!
//! A [`PlotRequest`] names an expression, a mode (curve or surface), the bounds of each axis, and
//! whether to include the derivative and integral of a curve. A [`Plotter`] turns it into a
//! [`PlotOutput`]: named series of points for curves, or a mesh for surfaces. Drawing the output
//! is left to the caller.
//!
//! Points where the expression is undefined are kept in the output as `NaN` or an infinity, so
//! that a renderer can break the curve there; only a request with no finite point at all fails.

pub mod error;
pub mod plot;

pub use plot::{Mode, PlotOutput, PlotRequest, Plotter, SamplingOptions, Series, SurfaceMesh};
