//! Light simplification of symbolic expressions.
//!
//! Simplification is done by applying the rules in [`rules`] to the expression in multiple passes,
//! until no rule applies anywhere in the tree. The rules only cover what derivative and integral
//! results need to stay readable: numeric folding with exact fractions, flattening, zero / one
//! elimination, like terms and factors, and a few known function values.
//!
//! ```
//! use plot_compute::symbolic::{expr::SymExpr, simplify};
//!
//! // x + x + x = 3x
//! let x = SymExpr::symbol("x");
//! let simplified = simplify(&SymExpr::Add(vec![x.clone(), x.clone(), x]));
//! assert_eq!(simplified.to_string(), "3 * x");
//! ```

pub mod fraction;
pub(crate) mod number;
pub mod rules;

use crate::symbolic::expr::{Primary, SymExpr};

/// The maximum number of passes made over a single node. The rules are expected to reach a fixed
/// point long before this.
const MAX_PASSES: usize = 64;

/// Base implementation of the simplification algorithm.
///
/// Returns the simplified expression, and whether anything changed.
fn inner_simplify(expr: &SymExpr) -> (SymExpr, bool) {
    let mut expr = expr.clone();
    let mut changed_at_least_once = false;

    for _ in 0..MAX_PASSES {
        let mut changed_in_this_pass = false;

        // try to simplify this expression using all rules
        if let Some(new_expr) = rules::all(&expr) {
            expr = new_expr;
            changed_in_this_pass = true;
            changed_at_least_once = true;
        }

        // then begin recursing into the expression's children
        match expr {
            SymExpr::Primary(Primary::Call(_, ref mut args))
                | SymExpr::Add(ref mut args)
                | SymExpr::Mul(ref mut args) => {
                for arg in args.iter_mut() {
                    let (new_arg, changed) = inner_simplify(arg);
                    *arg = new_arg;
                    // use |= instead of = to not reset these variables to false if already true
                    changed_in_this_pass |= changed;
                    changed_at_least_once |= changed;
                }
            },
            SymExpr::Primary(_) => return (expr, changed_at_least_once),
            SymExpr::Exp(ref mut lhs, ref mut rhs) => {
                let (new_lhs, changed_l) = inner_simplify(lhs);
                let (new_rhs, changed_r) = inner_simplify(rhs);
                **lhs = new_lhs;
                **rhs = new_rhs;
                changed_in_this_pass |= changed_l || changed_r;
                changed_at_least_once |= changed_l || changed_r;
            },
        }

        if !changed_in_this_pass {
            break;
        }
    }

    (expr, changed_at_least_once)
}

/// Simplifies the given expression.
pub fn simplify(expr: &SymExpr) -> SymExpr {
    inner_simplify(expr).0
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use plot_parser::parser::parse_expr;
    use super::*;

    fn simplified(text: &str) -> String {
        let expr = SymExpr::from(parse_expr(text).unwrap());
        simplify(&expr).to_string()
    }

    #[test]
    fn numbers() {
        assert_eq!(simplified("2 + 3 * 4"), "14");
        assert_eq!(simplified("6 / 4"), "3 / 2");
        assert_eq!(simplified("1 / 3 + 1 / 6"), "1 / 2");
        assert_eq!(simplified("2^10"), "1024");
        assert_eq!(simplified("0.5 + 1/4"), "0.75");
    }

    #[test]
    fn zero_and_one() {
        assert_eq!(simplified("0 * sin(x) + 1 * x^1"), "x");
        assert_eq!(simplified("x^0 + 0"), "1");
    }

    #[test]
    fn like_terms_and_factors() {
        assert_eq!(simplified("x + x + x"), "3 * x");
        assert_eq!(simplified("x * x * x / x"), "x^2");
        assert_eq!(simplified("2x - 2x + y"), "y");
    }

    #[test]
    fn ratio_of_products() {
        // (2x) / (2x) = 1
        assert_eq!(simplified("x / (2x)"), "1 / 2");
        assert_eq!(simplified("cos(x) / cos(x)"), "1");
    }

    #[test]
    fn nested_calls() {
        assert_eq!(simplified("sin(0 * x) + ln(e)"), "1");
        assert_eq!(simplified("sqrt(x + x)"), "sqrt(2 * x)");
    }

    #[test]
    fn idempotent() {
        for text in ["x^3 / 3 - x", "2^x * ln(2)", "-sin(x)", "(x + 1)^-2"] {
            let once = simplify(&SymExpr::from(parse_expr(text).unwrap()));
            assert_eq!(simplify(&once), once, "{text}");
        }
    }
}
