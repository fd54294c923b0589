use ariadne::Fmt;
use plot_attrs::ErrorKind;
use plot_error::EXPR;

/// Every sampled point of a series was non-finite, so there is nothing to draw.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = EmptyResult,
    message = format!("every sampled point of {} is undefined", self.label),
    labels = ["this expression"],
    help = format!(
        "`{}` has no real, finite value in the plotted range; try different bounds",
        (&self.expression).fg(EXPR),
    ),
)]
pub struct EmptyResult {
    /// The label of the series, e.g. `f(x)`.
    pub label: String,

    /// The symbolic form of the series.
    pub expression: String,
}

/// The request has no expression to plot.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = InvalidRequest,
    message = "there is no expression to plot",
    labels = [""],
    help = format!("type an expression, such as `{}`", "sin(x)".fg(EXPR)),
)]
pub struct EmptyRequest;
