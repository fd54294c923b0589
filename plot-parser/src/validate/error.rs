use ariadne::Fmt;
use plot_attrs::ErrorKind;
use plot_error::EXPR;

/// Formats the "did you mean" help text for a list of suggestions.
fn did_you_mean(suggestions: &[String], what: &str, fallback: &str) -> String {
    match suggestions {
        [] => fallback.to_string(),
        [single] => format!("did you mean `{}`?", single.fg(EXPR)),
        _ => format!(
            "did you mean one of these {}? {}",
            what,
            suggestions
                .iter()
                .map(|s| format!("`{}`", s.fg(EXPR)))
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

/// A name that is neither a variable of the symbol table nor a known constant.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = InvalidSymbol,
    message = format!("unknown symbol `{}`", self.name),
    labels = ["this name"],
    help = did_you_mean(
        &self.suggestions,
        "names",
        &format!("expressions may only use {} and the constants pi, e, tau and phi", self.allowed),
    ),
)]
pub struct UnknownSymbol {
    /// The name that was used.
    pub name: String,

    /// The variables the expression may use, e.g. `{x, y}`.
    pub allowed: String,

    /// A list of similarly named symbols, if any.
    pub suggestions: Vec<String>,
}

/// A function that is not in the allowed vocabulary.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = InvalidSymbol,
    message = format!("the `{}` function does not exist", self.name),
    labels = ["this function"],
    help = did_you_mean(&self.suggestions, "functions", "see the documentation for a list of available functions"),
)]
pub struct UnknownFunction {
    /// The name of the function that was called.
    pub name: String,

    /// A list of similarly named functions, if any.
    pub suggestions: Vec<String>,
}

/// A variable that exists, but is not available in the current plot mode (`y` in a curve).
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = InvalidSymbol,
    message = format!("the variable `{}` cannot be used here", self.name),
    labels = ["this variable"],
    help = format!("this plot is a function of {}; plot a surface to use `{}`", self.allowed, (&self.name).fg(EXPR)),
)]
pub struct UnavailableVariable {
    /// The name of the variable.
    pub name: String,

    /// The variables the expression may use, e.g. `{x}`.
    pub allowed: String,
}

/// A function name was used as a value, without being called.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Parse,
    message = format!("missing arguments to the `{}` function", self.name),
    labels = ["this function"],
    help = format!("call it with parentheses, such as {}", format!("{}(x)", self.name).fg(EXPR)),
)]
pub struct MissingCall {
    /// The name of the function.
    pub name: String,
}

/// A variable or constant was called like a function with more than one argument.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Parse,
    message = format!("`{}` is not a function", self.name),
    labels = ["this name", "these arguments"],
    help = "only one factor may follow a variable or constant in parentheses",
)]
pub struct NotAFunction {
    /// The name that was called.
    pub name: String,
}

/// A function was called with the wrong number of arguments.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Parse,
    message = format!("wrong number of arguments given to the `{}` function", self.name),
    labels = ["this function call", ""],
    help = format!(
        "the `{}` function takes {} argument(s); there are {} argument(s) provided here",
        (&self.name).fg(EXPR),
        self.expected,
        self.given
    ),
)]
pub struct WrongArgumentCount {
    /// The name of the function that was called.
    pub name: String,

    /// The accepted number of arguments, e.g. `1` or `1 or 2`.
    pub expected: String,

    /// The number of arguments that were given.
    pub given: usize,
}
