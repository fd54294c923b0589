//! The plotting pipeline: from a [`PlotRequest`] to the arrays a renderer draws.
//!
//! Each request moves through the same stages: the expression is parsed and validated, its
//! derivative and integral are derived if requested, every branch is compiled, and finally each
//! branch is sampled over one shared grid and its points are classified. A failure at any stage
//! fails the whole request; partial output is never returned.
//!
//! ```
//! use plot_graph::plot::{Plotter, PlotRequest};
//!
//! let request = PlotRequest::new("x^2")
//!     .x_bounds(-2.0, 2.0)
//!     .resolution(5)
//!     .show_derivative(true);
//! let output = Plotter::new().plot(&request).unwrap();
//!
//! let series = output.series();
//! assert_eq!(series[0].label, "f(x)");
//! assert_eq!(series[1].label, "f'(x)");
//! assert_eq!(series[1].x, vec![-2.0, -1.0, 0.0, 1.0, 2.0]);
//! assert_eq!(series[1].y, vec![-4.0, -2.0, 0.0, 2.0, 4.0]);
//! ```

pub mod cache;
pub mod opts;
pub mod output;
pub mod request;
pub mod sample;

pub use cache::CompileCache;
pub use opts::SamplingOptions;
pub use output::{PlotOutput, Series, SurfaceMesh};
pub use request::{Mode, PlotRequest};
pub use sample::{sample_curve, sample_surface, Sampled, Status, StatusCounts};

use crate::error::EmptyRequest;
use plot_compute::{
    grid::{check_bounds, check_resolution, Grid, MAX_LINE_RESOLUTION, MAX_MESH_RESOLUTION},
    numeric::CompiledExpr,
    Backend,
    Expression,
    NativeBackend,
};
use plot_error::Error;
use plot_parser::Variable;
use std::sync::Arc;

/// The label of the plotted expression.
pub const FUNCTION_LABEL: &str = "f(x)";

/// The label of the derivative.
pub const DERIVATIVE_LABEL: &str = "f'(x)";

/// The label of the integral.
pub const INTEGRAL_LABEL: &str = "∫f(x) dx";

/// The title of a surface.
pub const SURFACE_TITLE: &str = "f(x, y)";

/// One compiled expression of a request, with its label.
#[derive(Clone, Debug, PartialEq)]
pub struct Branch {
    /// The label of the branch.
    pub label: &'static str,

    /// The symbolic form of the branch.
    pub expression: Expression,

    /// The compiled form of the branch.
    pub compiled: CompiledExpr,
}

/// Every compiled branch of a request, in the order they are plotted.
#[derive(Clone, Debug, PartialEq)]
pub struct Prepared {
    pub branches: Vec<Branch>,
}

/// Attaches the whole source text as the span of errors that do not point anywhere, so that
/// reports for transform and compilation failures still show the expression.
fn spanned(mut err: Error, text: &str) -> Error {
    if err.spans.is_empty() && !text.is_empty() {
        err.spans.push(0..text.len());
    }
    err
}

/// Runs plot requests through the pipeline.
///
/// A plotter holds no per-request state, so a single plotter can serve many requests, including
/// concurrently from multiple threads. The optional [`CompileCache`] is the only thing shared
/// between requests.
#[derive(Debug, Default)]
pub struct Plotter<B: Backend = NativeBackend> {
    backend: B,
    options: SamplingOptions,
    cache: Option<CompileCache>,
}

impl Plotter {
    /// Creates a plotter with the native backend and default options.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<B: Backend> Plotter<B> {
    /// Creates a plotter with the given backend and default options.
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            options: SamplingOptions::default(),
            cache: None,
        }
    }

    /// Set the sampling options. Returns an updated [`Plotter`] for chaining.
    pub fn options(mut self, options: SamplingOptions) -> Self {
        self.options = options;
        self
    }

    /// Cache the compiled expressions of each request, so that repeating a request only samples
    /// it again. Returns an updated [`Plotter`] for chaining.
    pub fn with_cache(mut self) -> Self {
        self.cache = Some(CompileCache::new());
        self
    }

    /// The backend of the plotter.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The sampling options of the plotter.
    pub fn sampling_options(&self) -> &SamplingOptions {
        &self.options
    }

    /// The compile cache of the plotter, if enabled.
    pub fn cache(&self) -> Option<&CompileCache> {
        self.cache.as_ref()
    }

    /// Plots the request.
    pub fn plot(&self, request: &PlotRequest) -> Result<PlotOutput, Error> {
        let n = self.validate(request)?;

        let prepared = match &self.cache {
            Some(cache) => cache.get_or_prepare(
                cache::CacheKey::of(request),
                || self.prepare(request),
            )?,
            None => Arc::new(self.prepare(request)?),
        };

        let grid = match request.mode {
            Mode::Curve => Grid::line(request.x_bounds.0, request.x_bounds.1, n)?,
            Mode::Surface => Grid::mesh(request.x_bounds, request.y_bounds, n)?,
        };
        log::debug!("sampling {} branch(es) over {} points", prepared.branches.len(), grid.len());

        let output = match request.mode {
            Mode::Curve => {
                let series = prepared.branches.iter()
                    .map(|branch| {
                        let sampled = self.sample(branch, &grid, &request.expression)?;
                        Ok(Series::new(branch.label, branch.expression.to_string(), &grid, sampled))
                    })
                    .collect::<Result<Vec<_>, Error>>()?;
                PlotOutput::Curve(series)
            },
            Mode::Surface => {
                let branch = &prepared.branches[0];
                let sampled = self.sample(branch, &grid, &request.expression)?;
                PlotOutput::Surface(SurfaceMesh::new(SURFACE_TITLE, branch.expression.to_string(), &grid, sampled))
            },
        };

        log::info!("plotted `{}` ({})", request.expression, request.mode);
        Ok(output)
    }

    /// Checks the parts of the request that do not depend on the expression, and returns the
    /// resolution to sample at.
    fn validate(&self, request: &PlotRequest) -> Result<usize, Error> {
        if request.expression.trim().is_empty() {
            return Err(Error::unspanned(EmptyRequest));
        }

        check_bounds("x", request.x_bounds.0, request.x_bounds.1)?;
        if request.mode == Mode::Surface {
            check_bounds("y", request.y_bounds.0, request.y_bounds.1)?;
        }

        let (default, max) = match request.mode {
            Mode::Curve => (self.options.curve_resolution, MAX_LINE_RESOLUTION),
            Mode::Surface => (self.options.surface_resolution, MAX_MESH_RESOLUTION),
        };
        let n = request.resolution.unwrap_or(default);
        check_resolution(n, max)?;
        Ok(n)
    }

    /// Parses, transforms and compiles every branch of the request.
    fn prepare(&self, request: &PlotRequest) -> Result<Prepared, Error> {
        let text = request.expression.as_str();
        let expr = self.backend.parse(text, request.mode.table())?;
        log::debug!("parsed `{}` as `{}`", text, expr);

        let label = match request.mode {
            Mode::Curve => FUNCTION_LABEL,
            Mode::Surface => SURFACE_TITLE,
        };
        let mut expressions = vec![(label, expr.clone())];

        if request.mode == Mode::Surface {
            if request.show_derivative || request.show_integral {
                log::info!("derivative and integral are only plotted for curves; ignoring them");
            }
        } else {
            if request.show_derivative {
                let derivative = self.backend.differentiate(&expr, Variable::X)
                    .map_err(|err| spanned(err, text))?;
                log::debug!("transformed: {} = {}", DERIVATIVE_LABEL, derivative);
                expressions.push((DERIVATIVE_LABEL, derivative));
            }

            if request.show_integral {
                let integral = self.backend.integrate(&expr, Variable::X)
                    .map_err(|err| spanned(err, text))?;
                log::debug!("transformed: {} = {}", INTEGRAL_LABEL, integral);
                expressions.push((INTEGRAL_LABEL, integral));
            }
        }

        let branches = expressions.into_iter()
            .map(|(label, expression)| {
                let compiled = self.backend.compile(&expression)
                    .map_err(|err| spanned(err, text))?
                    .with_complex_tolerance(self.options.complex_tolerance);
                log::trace!("compiled {} into {} instructions", label, compiled.instructions().len());
                Ok(Branch { label, expression, compiled })
            })
            .collect::<Result<Vec<_>, Error>>()?;
        log::debug!("compiled {} branch(es) of `{}`", branches.len(), text);

        Ok(Prepared { branches })
    }

    /// Samples one branch over the grid and classifies the result.
    fn sample(&self, branch: &Branch, grid: &Grid, text: &str) -> Result<Sampled, Error> {
        let sampled = sample::evaluate(&branch.compiled, grid, &self.options)?;
        log::debug!(
            "classified {}: {} finite, {} non-finite, {} complex",
            branch.label,
            sampled.counts.finite,
            sampled.counts.non_finite,
            sampled.counts.complex,
        );
        sampled.require_finite(branch.label, &branch.expression.to_string())
            .map_err(|err| spanned(err, text))
    }
}
