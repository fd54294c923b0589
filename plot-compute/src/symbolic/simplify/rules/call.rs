//! Simplification rules for function calls with known values.

use crate::symbolic::{
    expr::SymExpr,
    simplify::{number::Number, rules::do_call},
};

/// Returns the only argument of a unary call.
fn single(args: &[SymExpr]) -> Option<&SymExpr> {
    match args {
        [arg] => Some(arg),
        _ => None,
    }
}

/// `ln(e) = 1`
/// `ln(1) = 0`
/// `ln(exp(a)) = a`
pub fn ln(expr: &SymExpr) -> Option<SymExpr> {
    do_call(expr, "ln", |args| {
        let arg = single(args)?;
        if arg.as_symbol() == Some("e") {
            Some(SymExpr::int(1))
        } else if arg.is_one() {
            Some(SymExpr::int(0))
        } else {
            match arg.as_call() {
                Some(("exp", [inner])) => Some(inner.clone()),
                _ => None,
            }
        }
    })
}

/// `exp(0) = 1`
pub fn exp(expr: &SymExpr) -> Option<SymExpr> {
    do_call(expr, "exp", |args| single(args)?.is_zero().then(|| SymExpr::int(1)))
}

/// `sin(0) = 0`, `tan(0) = 0`, `sinh(0) = 0`, `sqrt(0) = 0`
pub fn zero_at_zero(expr: &SymExpr) -> Option<SymExpr> {
    let (name, args) = expr.as_call()?;
    let odd = matches!(name, "sin" | "tan" | "sinh" | "tanh" | "asin" | "atan" | "sqrt" | "cbrt");
    (odd && single(args)?.is_zero()).then(|| SymExpr::int(0))
}

/// `cos(0) = 1`, `cosh(0) = 1`
pub fn one_at_zero(expr: &SymExpr) -> Option<SymExpr> {
    let (name, args) = expr.as_call()?;
    (matches!(name, "cos" | "cosh") && single(args)?.is_zero()).then(|| SymExpr::int(1))
}

/// `abs(n) = |n|`, for numbers `n`
pub fn abs(expr: &SymExpr) -> Option<SymExpr> {
    do_call(expr, "abs", |args| {
        let number = Number::from_expr(single(args)?)?;
        if number.is_negative() {
            number.neg().map(Number::to_expr)
        } else {
            Some(number.to_expr())
        }
    })
}

/// Applies all rules.
pub fn all(expr: &SymExpr) -> Option<SymExpr> {
    ln(expr)
        .or_else(|| exp(expr))
        .or_else(|| zero_at_zero(expr))
        .or_else(|| one_at_zero(expr))
        .or_else(|| abs(expr))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn known_values() {
        assert_eq!(all(&SymExpr::symbol("e").ln()), Some(SymExpr::int(1)));
        assert_eq!(all(&SymExpr::call("cos", vec![SymExpr::int(0)])), Some(SymExpr::int(1)));
        assert_eq!(all(&SymExpr::call("abs", vec![SymExpr::int(-3)])), Some(SymExpr::int(3)));
        assert_eq!(all(&SymExpr::call("sin", vec![SymExpr::symbol("x")])), None);
    }

    #[test]
    fn log_of_exp() {
        let expr = SymExpr::call("exp", vec![SymExpr::symbol("x")]).ln();
        assert_eq!(all(&expr), Some(SymExpr::symbol("x")));
    }
}
