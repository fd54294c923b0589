//! Checks a parsed expression against a [`SymbolTable`] and the closed vocabulary.
//!
//! Validation also resolves the one ambiguity the grammar leaves open: `x(x + 1)` is parsed as a
//! call, but since `x` is a variable it is rewritten to the product `x * (x + 1)`.

pub mod error;

use crate::{
    parser::ast::{Binary, Call, Expr, Literal, LitSym, Paren, Unary},
    symbols::{SymbolTable, Variable},
    vocab::{Constant, Func},
};
use error::{MissingCall, NotAFunction, UnavailableVariable, UnknownFunction, UnknownSymbol, WrongArgumentCount};
use levenshtein::levenshtein;
use plot_error::Error;

/// Returns the names in `candidates` that are a single edit away from `name`.
fn similar_names<'a>(name: &str, candidates: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    candidates
        .into_iter()
        .filter(|candidate| levenshtein(candidate, name) < 2)
        .map(str::to_owned)
        .collect()
}

/// Validates the expression against the symbol table and vocabulary, returning the rewritten
/// expression.
///
/// Every name must be a variable of `table`, a [`Constant`], or a called [`Func`] with an
/// accepted number of arguments. The first violation found, in left-to-right order, is
/// returned.
pub fn validate(expr: Expr, table: SymbolTable) -> Result<Expr, Error> {
    Validator { table }.expr(expr)
}

/// Walks an expression tree, checking names against a symbol table.
struct Validator {
    table: SymbolTable,
}

impl Validator {
    fn expr(&self, expr: Expr) -> Result<Expr, Error> {
        match expr {
            Expr::Literal(Literal::Symbol(sym)) => self.symbol(&sym).map(|_| Expr::Literal(Literal::Symbol(sym))),
            Expr::Literal(num) => Ok(Expr::Literal(num)),
            Expr::Paren(paren) => Ok(Expr::Paren(Paren {
                expr: Box::new(self.expr(*paren.expr)?),
                span: paren.span,
            })),
            Expr::Unary(unary) => Ok(Expr::Unary(Unary {
                operand: Box::new(self.expr(*unary.operand)?),
                op: unary.op,
                span: unary.span,
            })),
            Expr::Binary(binary) => Ok(Expr::Binary(Binary {
                lhs: Box::new(self.expr(*binary.lhs)?),
                op: binary.op,
                rhs: Box::new(self.expr(*binary.rhs)?),
                span: binary.span,
            })),
            Expr::Call(call) => self.call(call),
        }
    }

    /// Checks a name used as a value.
    fn symbol(&self, sym: &LitSym) -> Result<(), Error> {
        if self.table.lookup(&sym.name).is_some() || Constant::from_name(&sym.name).is_some() {
            return Ok(());
        }

        if Func::from_name(&sym.name).is_some() {
            return Err(Error::new(vec![sym.span.clone()], MissingCall {
                name: sym.name.clone(),
            }));
        }

        Err(self.unknown_name(sym))
    }

    /// Checks a call, rewriting calls of variables and constants into multiplication.
    fn call(&self, call: Call) -> Result<Expr, Error> {
        let Call { name, args, span, paren_span } = call;

        if let Some(func) = Func::from_name(&name.name) {
            if !func.arity().contains(&args.len()) {
                return Err(Error::new(
                    vec![name.span.start..paren_span.start + 1, paren_span.end - 1..paren_span.end],
                    WrongArgumentCount {
                        name: name.name,
                        expected: func.arity_description(),
                        given: args.len(),
                    },
                ));
            }

            let args = args.into_iter()
                .map(|arg| self.expr(arg))
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(Expr::Call(Call { name, args, span, paren_span }));
        }

        if self.table.lookup(&name.name).is_some() || Constant::from_name(&name.name).is_some() {
            let mut args = args;
            if args.len() != 1 {
                return Err(Error::new(vec![name.span.clone(), paren_span], NotAFunction {
                    name: name.name,
                }));
            }

            let factor = Expr::Paren(Paren {
                expr: Box::new(self.expr(args.remove(0))?),
                span: paren_span,
            });
            return Ok(Expr::Binary(Binary::implicit_mul(Expr::Literal(Literal::Symbol(name)), factor)));
        }

        if Variable::from_name(&name.name).is_some() {
            return Err(self.unknown_name(&name));
        }

        let suggestions = similar_names(&name.name, Func::ALL.iter().map(|func| func.name()));
        Err(Error::new(vec![name.span], UnknownFunction {
            name: name.name,
            suggestions,
        }))
    }

    /// Builds the error for a name that is not a variable of the table, nor a constant.
    fn unknown_name(&self, sym: &LitSym) -> Error {
        let allowed = self.table.to_string();

        if Variable::from_name(&sym.name).is_some() {
            return Error::new(vec![sym.span.clone()], UnavailableVariable {
                name: sym.name.clone(),
                allowed,
            });
        }

        let candidates = self.table.symbols().iter().map(|var| var.name())
            .chain(Constant::ALL.iter().map(|c| c.name()));
        Error::new(vec![sym.span.clone()], UnknownSymbol {
            name: sym.name.clone(),
            allowed,
            suggestions: similar_names(&sym.name, candidates),
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use plot_error::Category;
    use super::*;
    use crate::parse;

    #[test]
    fn accepts_vocabulary() {
        for text in ["sin(x)^2 + cos(x)", "log(x, 2) + ln(x)", "pi * e^x", "E^x", "abs(sign(x))"] {
            assert!(parse(text, SymbolTable::CURVE).is_ok(), "{text}");
        }
        assert!(parse("sqrt(x^2 + y^2)", SymbolTable::SURFACE).is_ok());
    }

    #[test]
    fn unknown_symbol() {
        let err = parse("x + z", SymbolTable::CURVE).unwrap_err();
        assert_eq!(err.category(), Category::InvalidSymbol);
        assert_eq!(err.spans, vec![4..5]);
        assert!(err.is::<UnknownSymbol>());
    }

    #[test]
    fn multi_letter_names_are_not_products() {
        let err = parse("xy", SymbolTable::SURFACE).unwrap_err();
        assert_eq!(err.category(), Category::InvalidSymbol);
    }

    #[test]
    fn surface_variable_in_curve() {
        let err = parse("x * y", SymbolTable::CURVE).unwrap_err();
        assert_eq!(err.category(), Category::InvalidSymbol);
        assert!(err.is::<UnavailableVariable>());
    }

    #[test]
    fn unknown_function_suggestions() {
        let err = parse("sinn(x)", SymbolTable::CURVE).unwrap_err();
        assert_eq!(err.category(), Category::InvalidSymbol);
        let kind = err.downcast_ref::<UnknownFunction>().unwrap();
        assert_eq!(kind.suggestions, vec!["sin".to_string(), "sinh".to_string(), "sign".to_string()]);
    }

    #[test]
    fn dangerous_names_rejected() {
        for text in ["eval(x)", "__import__(x)", "os", "exec(x)", "i"] {
            let err = parse(text, SymbolTable::CURVE).unwrap_err();
            assert_eq!(err.category(), Category::InvalidSymbol, "{text}");
        }
    }

    #[test]
    fn wrong_arity() {
        let err = parse("sin(x, 2)", SymbolTable::CURVE).unwrap_err();
        assert_eq!(err.category(), Category::Parse);
        assert!(err.is::<WrongArgumentCount>());

        let err = parse("log()", SymbolTable::CURVE).unwrap_err();
        assert!(err.is::<WrongArgumentCount>());
    }

    #[test]
    fn function_without_call() {
        let err = parse("sin + 1", SymbolTable::CURVE).unwrap_err();
        assert!(err.is::<MissingCall>());
    }

    #[test]
    fn variable_call_is_multiplication() {
        let expr = parse("x(x + 1)", SymbolTable::CURVE).unwrap();
        assert_eq!(expr.to_string(), "x * (x + 1)");

        let err = parse("x(1, 2)", SymbolTable::CURVE).unwrap_err();
        assert!(err.is::<NotAFunction>());
    }
}
