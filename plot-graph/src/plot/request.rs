use plot_parser::SymbolTable;
use std::{fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Whether to plot a curve `f(x)` or a surface `f(x, y)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Mode {
    /// A 2D curve of an expression in `x`.
    #[default]
    Curve,

    /// A 3D surface of an expression in `x` and `y`.
    Surface,
}

impl Mode {
    /// The variables an expression may use in this mode.
    pub fn table(self) -> SymbolTable {
        match self {
            Mode::Curve => SymbolTable::CURVE,
            Mode::Surface => SymbolTable::SURFACE,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Mode::Curve => write!(f, "curve"),
            Mode::Surface => write!(f, "surface"),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "curve" | "2d" => Ok(Mode::Curve),
            "surface" | "3d" => Ok(Mode::Surface),
            other => Err(format!("unknown mode `{}`, expected `curve` or `surface`", other)),
        }
    }
}

/// A request to plot an expression.
///
/// The request is only read by the plotter; every field is a plain value owned by the caller.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlotRequest {
    /// The expression to plot, as typed by the user.
    ///
    /// The default value is `sin(x)`.
    pub expression: String,

    /// Whether to plot a curve or a surface.
    ///
    /// The default value is [`Mode::Curve`].
    pub mode: Mode,

    /// The `(min, max)` bounds of the `x` axis.
    ///
    /// The default value is `(-5.0, 5.0)`.
    pub x_bounds: (f64, f64),

    /// The `(min, max)` bounds of the `y` axis. Only used for surfaces.
    ///
    /// The default value is `(-5.0, 5.0)`.
    pub y_bounds: (f64, f64),

    /// Whether to also plot the derivative of a curve.
    ///
    /// The default value is `false`.
    pub show_derivative: bool,

    /// Whether to also plot the integral of a curve.
    ///
    /// The default value is `false`.
    pub show_integral: bool,

    /// The number of points to sample (along each axis, for surfaces). If [`None`], the resolution
    /// from the [`SamplingOptions`](super::SamplingOptions) is used.
    ///
    /// The default value is [`None`].
    pub resolution: Option<usize>,
}

impl Default for PlotRequest {
    fn default() -> PlotRequest {
        PlotRequest {
            expression: String::from("sin(x)"),
            mode: Mode::Curve,
            x_bounds: (-5.0, 5.0),
            y_bounds: (-5.0, 5.0),
            show_derivative: false,
            show_integral: false,
            resolution: None,
        }
    }
}

impl PlotRequest {
    /// Create a request to plot the given expression as a curve, with default bounds.
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            ..Self::default()
        }
    }

    /// Set the expression. Returns an updated [`PlotRequest`] for chaining.
    pub fn expression(mut self, expression: impl Into<String>) -> Self {
        self.expression = expression.into();
        self
    }

    /// Set the mode. Returns an updated [`PlotRequest`] for chaining.
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the bounds of the `x` axis. Returns an updated [`PlotRequest`] for chaining.
    pub fn x_bounds(mut self, min: f64, max: f64) -> Self {
        self.x_bounds = (min, max);
        self
    }

    /// Set the bounds of the `y` axis. Returns an updated [`PlotRequest`] for chaining.
    pub fn y_bounds(mut self, min: f64, max: f64) -> Self {
        self.y_bounds = (min, max);
        self
    }

    /// Set whether to plot the derivative. Returns an updated [`PlotRequest`] for chaining.
    pub fn show_derivative(mut self, show_derivative: bool) -> Self {
        self.show_derivative = show_derivative;
        self
    }

    /// Set whether to plot the integral. Returns an updated [`PlotRequest`] for chaining.
    pub fn show_integral(mut self, show_integral: bool) -> Self {
        self.show_integral = show_integral;
        self
    }

    /// Set the resolution. Returns an updated [`PlotRequest`] for chaining.
    pub fn resolution(mut self, resolution: usize) -> Self {
        self.resolution = Some(resolution);
        self
    }
}
