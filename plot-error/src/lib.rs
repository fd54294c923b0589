//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages, and the [`Error`] type that carries an error kind along with the regions of the
//! expression text it points at.

use ariadne::{Color, Report, Source};
use std::{any::Any, fmt::{self, Debug, Display, Formatter}, ops::Range, sync::Arc};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// The broad category an error belongs to.
///
/// Every error produced by the pipeline falls into exactly one of these categories. Front ends
/// can match on the category without knowing the concrete error kinds of each stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// The expression text is not syntactically valid.
    Parse,

    /// The expression uses an identifier outside the allowed vocabulary.
    InvalidSymbol,

    /// The expression has no closed-form antiderivative under the available rules.
    NoClosedForm,

    /// The expression contains something the numeric backend cannot evaluate.
    Compilation,

    /// Every sampled point of the expression was non-finite.
    EmptyResult,

    /// The plot request itself is malformed (empty text, bad bounds or resolution).
    InvalidRequest,
}

impl Category {
    /// Returns a short, human-readable name for the category.
    pub fn name(self) -> &'static str {
        match self {
            Self::Parse => "parse error",
            Self::InvalidSymbol => "invalid symbol",
            Self::NoClosedForm => "no closed form",
            Self::Compilation => "compilation error",
            Self::EmptyResult => "empty result",
            Self::InvalidRequest => "invalid request",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Represents any kind of error that can occur during some operation.
///
/// This trait is usually derived with `plot_attrs::ErrorKind`.
pub trait ErrorKind: Debug + Send + Sync {
    /// Returns this error as a [`dyn Any`], so that it can be downcast to its concrete type.
    fn as_any(&self) -> &dyn Any;

    /// The category of this error.
    fn category(&self) -> Category;

    /// The message displayed at the top of the error.
    fn message(&self) -> String;

    /// Optional help text describing what the user can do to fix the error.
    fn help(&self) -> Option<String>;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug, Clone)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Arc<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Arc::new(kind) }
    }

    /// Creates a new error that does not point at any region of the source code.
    pub fn unspanned(kind: impl ErrorKind + 'static) -> Self {
        Self::new(Vec::new(), kind)
    }

    /// The category of the underlying error kind.
    pub fn category(&self) -> Category {
        self.kind.category()
    }

    /// The user-facing message of the underlying error kind.
    pub fn message(&self) -> String {
        self.kind.message()
    }

    /// Returns true if the underlying error kind is of type `K`.
    pub fn is<K: ErrorKind + 'static>(&self) -> bool {
        self.kind.as_any().is::<K>()
    }

    /// Attempts to downcast the underlying error kind to the concrete type `K`.
    pub fn downcast_ref<K: ErrorKind + 'static>(&self) -> Option<&K> {
        self.kind.as_any().downcast_ref::<K>()
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Renders the report for this error against the given source text, with colors stripped.
    ///
    /// Useful for front ends that do not write to a terminal.
    pub fn render_plain(&self, src_id: &str, source: &str) -> String {
        let mut buf = Vec::new();
        let written = self
            .build_report(src_id)
            .write((src_id, Source::from(source)), &mut buf);
        match written {
            Ok(()) => strip_ansi_escapes::strip_str(String::from_utf8_lossy(&buf)),
            Err(_) => self.to_string(),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.category(), strip_ansi_escapes::strip_str(self.message()))?;
        if let Some(help) = self.kind.help() {
            write!(f, " ({})", strip_ansi_escapes::strip_str(help))?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}
