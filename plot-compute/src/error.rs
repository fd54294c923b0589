//! Error kinds produced by symbolic transforms, the numeric compiler, and grid construction.

use ariadne::Fmt;
use plot_attrs::ErrorKind;
use plot_error::EXPR;

/// The integral of an expression could not be found with the available integration rules.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = NoClosedForm,
    message = format!("no closed-form antiderivative of `{}` with respect to `{}`", self.integrand, self.var),
    labels = ["this expression"],
    help = "only elementary antiderivatives are supported; plot the expression without its integral",
)]
pub struct NoClosedForm {
    /// The expression that was integrated.
    pub integrand: String,

    /// The variable of integration.
    pub var: String,
}

/// The derivative of a function is not known.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = NoClosedForm,
    message = format!("cannot differentiate the `{}` function", self.name),
    labels = ["this expression"],
)]
pub struct UnsupportedDerivative {
    /// The name of the function.
    pub name: String,
}

/// The numeric backend has no implementation of a function.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Compilation,
    message = format!("the `{}` function cannot be evaluated numerically", self.name),
    labels = ["this expression"],
    help = if self.suggestions.is_empty() {
        String::from("see the documentation for a list of available functions")
    } else {
        format!(
            "did you mean {}?",
            self.suggestions.iter()
                .map(|s| format!("`{}`", s.fg(EXPR)))
                .collect::<Vec<_>>()
                .join(", "),
        )
    },
)]
pub struct UnknownFunction {
    /// The name of the function.
    pub name: String,

    /// Similarly named functions that can be evaluated.
    pub suggestions: Vec<String>,
}

/// A symbol is neither a variable of the symbol table nor a known constant.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Compilation,
    message = format!("the symbol `{}` has no value", self.name),
    labels = ["this expression"],
    help = format!("the expression may only use the variables {}", self.allowed),
)]
pub struct UnboundSymbol {
    /// The name of the symbol.
    pub name: String,

    /// The variables the expression may use, e.g. `{x}`.
    pub allowed: String,
}

/// A function was called with a number of arguments the numeric backend does not accept.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Compilation,
    message = format!("the `{}` function cannot be evaluated with {} argument(s)", self.name, self.given),
    labels = ["this expression"],
)]
pub struct ArgumentCount {
    /// The name of the function.
    pub name: String,

    /// The number of arguments given.
    pub given: usize,
}

/// The bounds of an axis are not finite, or not increasing.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = InvalidRequest,
    message = format!("invalid bounds for the {} axis: [{}, {}]", self.axis, self.min, self.max),
    labels = [""],
    help = "the bounds must be finite numbers, with the minimum less than the maximum",
)]
pub struct InvalidBounds {
    /// The name of the axis.
    pub axis: String,

    /// The given minimum.
    pub min: f64,

    /// The given maximum.
    pub max: f64,
}

/// A grid was requested with no points, or with more points than can be sampled.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = InvalidRequest,
    message = format!("the resolution must be between 1 and {}", max),
    labels = [""],
    help = format!("the requested resolution was {}", given),
)]
pub struct InvalidResolution {
    /// The requested number of points along one axis.
    pub given: usize,

    /// The largest resolution accepted for this kind of grid.
    pub max: usize,
}

/// A compiled expression was evaluated over a grid of the wrong dimension.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = InvalidRequest,
    message = format!("expected a grid over {} variable(s), got {}", self.expected, self.given),
    labels = [""],
)]
pub struct GridArity {
    /// The number of variables of the compiled expression.
    pub expected: usize,

    /// The number of coordinate columns in the grid.
    pub given: usize,
}
