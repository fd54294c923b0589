//! Parsing and validation of plottable math expressions.
//!
//! Text is tokenized with [`logos`], parsed into an [`Expr`] by a backtracking
//! precedence-climbing parser, then validated against a [`SymbolTable`] and the closed
//! vocabulary of [`Func`]s and [`Constant`]s. No name outside the vocabulary ever reaches the
//! evaluator.
//!
//! ```
//! use plot_parser::{parse, SymbolTable};
//!
//! let expr = parse("2x^2 + sin(x)", SymbolTable::CURVE).unwrap();
//! assert_eq!(expr.to_string(), "2 * x^2 + sin(x)");
//!
//! assert!(parse("x^2 + eval(x)", SymbolTable::CURVE).is_err());
//! ```

pub mod parser;
pub mod symbols;
pub mod tokenizer;
pub mod validate;
pub mod vocab;

pub use parser::ast::Expr;
pub use symbols::{SymbolTable, Variable};
pub use vocab::{Constant, Func};

/// Parses the given text and validates it against the symbol table.
///
/// Syntax errors are reported with [`Category::Parse`], and names outside the vocabulary with
/// [`Category::InvalidSymbol`]. The text is never partially accepted.
///
/// [`Category::Parse`]: plot_error::Category::Parse
/// [`Category::InvalidSymbol`]: plot_error::Category::InvalidSymbol
pub fn parse(source: &str, table: SymbolTable) -> Result<Expr, plot_error::Error> {
    let expr = parser::parse_expr(source)?;
    let expr = validate::validate(expr, table)?;
    log::trace!("parsed `{}` over {} as `{}`", source, table, expr);
    Ok(expr)
}
