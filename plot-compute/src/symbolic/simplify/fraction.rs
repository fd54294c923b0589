//! Tools to help manipulate fractions.

use crate::symbolic::expr::SymExpr;
use super::number::Number;

/// Create a [`SymExpr`] representing a fraction with the given numerator and denominator.
///
/// The representation is a [`SymExpr::Mul`] containing the numerator's factors, and the
/// denominator raised to the power of -1.
pub(crate) fn make_fraction(numerator: SymExpr, denominator: SymExpr) -> SymExpr {
    numerator * denominator.recip()
}

/// Splits a term into its numeric coefficient and the remaining non-numeric factors.
///
/// Purely numeric terms return `None` as the remaining factors. Terms without a numeric factor
/// have the coefficient 1.
pub(crate) fn split_coefficient(term: &SymExpr) -> (Number, Option<SymExpr>) {
    if let Some(number) = Number::from_expr(term) {
        return (number, None);
    }

    if let SymExpr::Mul(factors) = term {
        let mut coefficient = Number::ONE;
        let mut rest = Vec::with_capacity(factors.len());
        for factor in factors {
            match Number::from_expr(factor).and_then(|number| coefficient.mul(number)) {
                Some(product) => coefficient = product,
                None => rest.push(factor.clone()),
            }
        }
        return (coefficient, Some(SymExpr::Mul(rest).downgrade()));
    }

    (Number::ONE, Some(term.clone()))
}

/// Multiplies the remaining factors of a term by a numeric coefficient. This is the inverse of
/// [`split_coefficient`].
pub(crate) fn join_coefficient(coefficient: Number, rest: Option<SymExpr>) -> SymExpr {
    match rest {
        None => coefficient.to_expr(),
        Some(_) if coefficient.is_zero() => SymExpr::int(0),
        Some(rest) if coefficient.is_one() => rest,
        Some(rest) => coefficient.to_expr() * rest,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn split_and_join() {
        // 3 * x * 2^-1
        let term = SymExpr::Mul(vec![
            SymExpr::int(3),
            SymExpr::symbol("x"),
            SymExpr::int(2).recip(),
        ]);
        let (coefficient, rest) = split_coefficient(&term);
        assert_eq!(coefficient, Number::Rational(3, 2));
        assert_eq!(rest, Some(SymExpr::symbol("x")));
        assert_eq!(join_coefficient(coefficient, rest), term);
    }
}
