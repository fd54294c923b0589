//! Symbolic derivatives of the functions in the vocabulary.

use crate::symbolic::{expr::SymExpr, simplify::number::Number};
use super::{derivative, MultBuilder, SymbolicDerivativeError};

/// Returns the fraction `numerator / denominator` as an expression.
fn rational(numerator: i64, denominator: i64) -> SymExpr {
    Number::rational(numerator, denominator)
        .map(Number::to_expr)
        .unwrap_or_else(|| SymExpr::float(numerator as f64 / denominator as f64))
}

/// Calls the named function with one argument.
fn call(name: &str, arg: &SymExpr) -> SymExpr {
    SymExpr::call(name, vec![arg.clone()])
}

/// `1 - u^2`
fn one_minus_square(u: &SymExpr) -> SymExpr {
    SymExpr::int(1) + -u.clone().pow(SymExpr::int(2))
}

/// Computes the derivative of a function in the vocabulary and performs the chain rule.
pub(super) fn function_derivative(func: &str, args: &[SymExpr], with: &str) -> Result<SymExpr, SymbolicDerivativeError> {
    let (outer, u) = match (func, args) {
        ("sin", [u]) => (call("cos", u), u),
        ("cos", [u]) => (-call("sin", u), u),
        ("tan", [u]) => (call("sec", u).pow(SymExpr::int(2)), u),
        ("cot", [u]) => (-call("csc", u).pow(SymExpr::int(2)), u),
        ("sec", [u]) => (call("sec", u) * call("tan", u), u),
        ("csc", [u]) => (-(call("csc", u) * call("cot", u)), u),
        ("asin", [u]) => (one_minus_square(u).pow(rational(-1, 2)), u),
        ("acos", [u]) => (-one_minus_square(u).pow(rational(-1, 2)), u),
        ("atan", [u]) => ((SymExpr::int(1) + u.clone().pow(SymExpr::int(2))).recip(), u),
        ("sinh", [u]) => (call("cosh", u), u),
        ("cosh", [u]) => (call("sinh", u), u),
        ("tanh", [u]) => (call("cosh", u).pow(SymExpr::int(-2)), u),
        ("asinh", [u]) => ((u.clone().pow(SymExpr::int(2)) + SymExpr::int(1)).pow(rational(-1, 2)), u),
        ("acosh", [u]) => ((u.clone().pow(SymExpr::int(2)) + SymExpr::int(-1)).pow(rational(-1, 2)), u),
        ("atanh", [u]) => (one_minus_square(u).recip(), u),
        ("exp", [u]) => (call("exp", u), u),
        ("ln" | "log", [u]) => (u.clone().recip(), u),
        ("log", [u, base]) => {
            // log(u, b) = ln(u) / ln(b)
            let quotient = call("ln", u) * call("ln", base).recip();
            return derivative(&quotient, with);
        },
        ("log10", [u]) => ((u.clone() * SymExpr::int(10).ln()).recip(), u),
        ("log2", [u]) => ((u.clone() * SymExpr::int(2).ln()).recip(), u),
        ("sqrt", [u]) => ((SymExpr::int(2) * call("sqrt", u)).recip(), u),
        ("cbrt", [u]) => ((SymExpr::int(3) * call("cbrt", u).pow(SymExpr::int(2))).recip(), u),
        ("abs", [u]) => (call("sign", u), u),
        // the derivative of sign is zero wherever it is defined
        ("sign", [_]) => return Ok(SymExpr::int(0)),
        _ => return Err(SymbolicDerivativeError::Unsupported(func.to_string())),
    };

    let mut mult_group = MultBuilder::default();
    mult_group.mult(outer);
    mult_group.mult(derivative(u, with)?);
    Ok(mult_group.into())
}
