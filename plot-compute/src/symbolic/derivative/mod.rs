//! Symbolic differentiation.
//!
//! [`derivative`] applies the sum, product and chain rules recursively, along with the power rule
//! in its three forms: `u^n` where `n` is independent of the variable, `c^v` where `c` is, and
//! `u^v` in general (logarithmic differentiation). Quotients need no rule of their own, since
//! they are represented as products with a power of `-1`.
//!
//! The result is not simplified; see [`simplify`](crate::symbolic::simplify()).

mod function;

use crate::error::UnsupportedDerivative;
use crate::symbolic::{expr::{Primary, SymExpr}, simplify::number::Number};
use plot_error::Error;

/// Returns `true` if the given [`SymExpr`] is "clearly" zero. This is intended to clean up
/// results and is not mathematically rigorous.
fn is_trivially_zero(e: &SymExpr) -> bool {
    match e {
        SymExpr::Primary(Primary::Float(f)) => *f == 0.0,
        SymExpr::Primary(Primary::Integer(i)) => *i == 0,
        SymExpr::Add(sum) => sum.iter().all(is_trivially_zero),
        SymExpr::Mul(mul) => mul.iter().any(is_trivially_zero),
        SymExpr::Exp(base, exponent) => is_trivially_zero(base) && !is_trivially_zero(exponent),
        _ => false,
    }
}

/// Returns `true` if the given [`SymExpr`] is "clearly" one. This is intended to clean up results
/// and is not mathematically rigorous.
fn is_trivially_unity(e: &SymExpr) -> bool {
    match e {
        SymExpr::Primary(Primary::Float(f)) => *f == 1.0,
        SymExpr::Primary(Primary::Integer(i)) => *i == 1,
        SymExpr::Mul(exprs) => exprs.iter().all(is_trivially_unity),
        SymExpr::Exp(base, exponent) => is_trivially_zero(exponent) || is_trivially_unity(base),
        SymExpr::Add(exprs) => exprs.len() == 1 && is_trivially_unity(&exprs[0]),
        _ => false,
    }
}

/// Helper struct to build a product of expressions while applying basic simplification rules. If
/// any of the expressions are zero, the product is reduced to zero.
#[derive(Default)]
pub(crate) struct MultBuilder(Vec<SymExpr>);

impl From<MultBuilder> for SymExpr {
    fn from(value: MultBuilder) -> Self {
        SymExpr::Mul(value.0).downgrade()
    }
}

impl MultBuilder {
    pub(crate) fn mult(&mut self, e: SymExpr) {
        if is_trivially_zero(&e) || self.0.first().is_some_and(is_trivially_zero) {
            self.0 = vec![SymExpr::int(0)];
            return;
        }

        if !is_trivially_unity(&e) {
            self.0.push(e)
        }
    }
}

/// Helper struct to build a summation of expressions while applying basic simplification rules.
/// Only non-zero expressions are added to the sum.
#[derive(Default)]
pub(crate) struct SumBuilder(Vec<SymExpr>);

impl From<SumBuilder> for SymExpr {
    fn from(value: SumBuilder) -> Self {
        SymExpr::Add(value.0).downgrade()
    }
}

impl SumBuilder {
    pub(crate) fn add(&mut self, e: SymExpr) {
        if !is_trivially_zero(&e) {
            self.0.push(e)
        }
    }
}

/// An error produced while computing a derivative.
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolicDerivativeError {
    /// The derivative of the named function is not known.
    Unsupported(String),
}

impl From<SymbolicDerivativeError> for Error {
    fn from(err: SymbolicDerivativeError) -> Self {
        match err {
            SymbolicDerivativeError::Unsupported(name) => {
                Error::unspanned(UnsupportedDerivative { name })
            },
        }
    }
}

/// `(f + g)' = f' + g'`
fn sum_rule(exprs: &[SymExpr], with: &str) -> Result<SymExpr, SymbolicDerivativeError> {
    let mut sum = SumBuilder::default();
    for elem in exprs {
        sum.add(derivative(elem, with)?);
    }
    Ok(sum.into())
}

/// `(f * g * h)' = f' * g * h + f * g' * h + f * g * h'`
fn product_rule(product: &[SymExpr], with: &str) -> Result<SymExpr, SymbolicDerivativeError> {
    let mut outer_sum = SumBuilder::default();

    for derivative_index in 0..product.len() {
        // constant factors contribute nothing to the sum
        if !product[derivative_index].contains_symbol(with) {
            continue;
        }

        let mut inner_mult = MultBuilder::default();
        for (term_index, term) in product.iter().enumerate() {
            if derivative_index == term_index {
                inner_mult.mult(derivative(term, with)?);
            } else {
                inner_mult.mult(term.clone());
            }
        }

        outer_sum.add(inner_mult.into());
    }

    Ok(outer_sum.into())
}

/// Returns `n - 1`, folding the subtraction when `n` is a number.
fn minus_one(n: &SymExpr) -> SymExpr {
    Number::from_expr(n)
        .and_then(|n| n.add(Number::Rational(-1, 1)))
        .map(Number::to_expr)
        .unwrap_or_else(|| n.clone() + SymExpr::int(-1))
}

/// `(u^v)'`, using whichever form of the power rule applies.
fn power_rule(base: &SymExpr, exp: &SymExpr, with: &str) -> Result<SymExpr, SymbolicDerivativeError> {
    let mut mult_group = MultBuilder::default();

    match (base.contains_symbol(with), exp.contains_symbol(with)) {
        // (u^n)' = n * u^(n - 1) * u'
        (_, false) => {
            mult_group.mult(exp.clone());
            mult_group.mult(base.clone().pow(minus_one(exp)));
            mult_group.mult(derivative(base, with)?);
        },
        // (c^v)' = c^v * ln(c) * v'
        (false, true) => {
            mult_group.mult(base.clone().pow(exp.clone()));
            mult_group.mult(base.clone().ln());
            mult_group.mult(derivative(exp, with)?);
        },
        // (u^v)' = u^v * (v' * ln(u) + v * u' / u)
        (true, true) => {
            let mut first = MultBuilder::default();
            first.mult(derivative(exp, with)?);
            first.mult(base.clone().ln());

            let mut second = MultBuilder::default();
            second.mult(exp.clone());
            second.mult(derivative(base, with)?);
            second.mult(base.clone().recip());

            let mut sum = SumBuilder::default();
            sum.add(first.into());
            sum.add(second.into());

            mult_group.mult(base.clone().pow(exp.clone()));
            mult_group.mult(sum.into());
        },
    }

    Ok(mult_group.into())
}

/// Computes the derivative of the given expression with respect to the symbol `with`. Returns
/// [`Err`] if the expression calls a function whose derivative is not known.
pub fn derivative(f: &SymExpr, with: &str) -> Result<SymExpr, SymbolicDerivativeError> {
    if !f.contains_symbol(with) {
        return Ok(SymExpr::int(0));
    }

    let expr = match f {
        SymExpr::Primary(Primary::Symbol(_)) => SymExpr::int(1),
        SymExpr::Primary(Primary::Call(func, args)) => function::function_derivative(func, args, with)?,
        SymExpr::Primary(_) => SymExpr::int(0),
        SymExpr::Add(terms) => sum_rule(terms, with)?,
        SymExpr::Mul(factors) => product_rule(factors, with)?,
        SymExpr::Exp(base, exp) => power_rule(base, exp, with)?,
    };

    if is_trivially_zero(&expr) {
        Ok(SymExpr::int(0))
    } else {
        Ok(expr)
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use pretty_assertions::assert_eq;
    use plot_parser::{parser::parse_expr, SymbolTable};
    use crate::{numeric::compile, symbolic::simplify};
    use super::*;

    fn sym(text: &str) -> SymExpr {
        SymExpr::from(parse_expr(text).unwrap())
    }

    /// Evaluates the expression at `x`.
    fn eval_x(expr: &SymExpr, x: f64) -> f64 {
        compile(expr, SymbolTable::CURVE).unwrap().eval_point(&[x])
    }

    /// Approximates the derivative of the expression at `x` with a central difference.
    fn finite_difference(expr: &SymExpr, x: f64) -> f64 {
        const DX: f64 = 1e-6;
        (eval_x(expr, x + DX) - eval_x(expr, x - DX)) / (2.0 * DX)
    }

    fn test_for_function(function: &str, points: impl IntoIterator<Item = f64>) {
        const TOL: f64 = 1e-4;

        let expr = sym(function);
        let symbolic = derivative(&expr, "x")
            .unwrap_or_else(|err| panic!("derivative of `{function}` failed: {err:?}"));

        for point in points {
            let symbolically_computed = eval_x(&symbolic, point);
            let numerically_computed = finite_difference(&expr, point);
            assert!(
                (symbolically_computed - numerically_computed).abs() < TOL,
                "for `{function}` at x={point}, symbolic derivative `{symbolic}` was \
                {symbolically_computed} but the numeric derivative was {numerically_computed}",
            );
        }
    }

    #[test]
    fn sin_is_cos() {
        let d = simplify(&derivative(&sym("sin(x)"), "x").unwrap());
        assert_eq!(d, sym("cos(x)"));
        for x in [0.0, std::f64::consts::FRAC_PI_4, std::f64::consts::FRAC_PI_2, std::f64::consts::PI] {
            assert_float_absolute_eq!(eval_x(&d, x), x.cos(), 1e-12);
        }
    }

    #[test]
    fn power_rule_simplifies() {
        let d = simplify(&derivative(&sym("x^2"), "x").unwrap());
        assert_eq!(d.to_string(), "2 * x");

        let d = simplify(&derivative(&sym("x^3 / 3 + 5"), "x").unwrap());
        assert_eq!(d.to_string(), "x^2");
    }

    #[test]
    fn constants() {
        assert_eq!(derivative(&sym("pi^2 + sin(e)"), "x").unwrap(), SymExpr::int(0));
        assert_eq!(derivative(&sym("y^2"), "x").unwrap(), SymExpr::int(0));
    }

    #[test]
    fn polynomial() {
        test_for_function("x^2 + x + 1", [0.0, 1.0, 2.0, 5.0, 8.0]);
        test_for_function("(x + 1)(x - 1) / (x^2 + 1)", [-2.0, 0.0, 0.5, 3.0]);
    }

    #[test]
    fn trigonometric() {
        for function in ["sin(2x)", "cos(x^2)", "tan(x)", "cot(x)", "sec(x)", "csc(x)"] {
            test_for_function(function, [0.3, 0.7, 1.1, 2.0]);
        }
        for function in ["asin(x / 2)", "acos(x / 2)", "atan(3x)"] {
            test_for_function(function, [-0.5, 0.0, 0.25, 1.0]);
        }
    }

    #[test]
    fn hyperbolic() {
        for function in ["sinh(x)", "cosh(2x)", "tanh(x)", "asinh(x)", "atanh(x / 3)"] {
            test_for_function(function, [-1.0, 0.0, 0.5, 1.5]);
        }
        test_for_function("acosh(x)", [1.5, 2.0, 4.0]);
    }

    #[test]
    fn exponential_and_logarithmic() {
        for function in ["exp(x^2)", "e^x", "2^x", "ln(x)", "log(x)", "log(x, 3)", "log10(x)", "log2(x^2)", "x^x"] {
            test_for_function(function, [0.5, 1.0, 2.5]);
        }
    }

    #[test]
    fn roots_and_misc() {
        for function in ["sqrt(x)", "cbrt(x)", "x^(1/3)", "abs(x)", "sign(x) * x", "sqrt(x^2 + 1)"] {
            test_for_function(function, [0.5, 1.0, 2.5]);
        }
        test_for_function("cbrt(x)", [-8.0, -1.0]);
    }

    #[test]
    fn unsupported() {
        let expr = SymExpr::call("gamma", vec![SymExpr::symbol("x")]);
        assert_eq!(
            derivative(&expr, "x"),
            Err(SymbolicDerivativeError::Unsupported("gamma".to_string())),
        );
    }
}
