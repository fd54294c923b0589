//! Simplification rules for powers.

use crate::symbolic::{
    expr::SymExpr,
    simplify::{number::Number, rules::do_power},
};

/// `a^0 = 1`
pub fn power_zero(expr: &SymExpr) -> Option<SymExpr> {
    do_power(expr, |_, rhs| rhs.is_zero().then(|| SymExpr::int(1)))
}

/// `a^1 = a`
pub fn power_one(expr: &SymExpr) -> Option<SymExpr> {
    do_power(expr, |lhs, rhs| rhs.is_one().then(|| lhs.clone()))
}

/// `1^a = 1`
pub fn base_one(expr: &SymExpr) -> Option<SymExpr> {
    do_power(expr, |lhs, _| lhs.is_one().then(|| SymExpr::int(1)))
}

/// `0^a = 0`, for positive numbers `a`
pub fn base_zero(expr: &SymExpr) -> Option<SymExpr> {
    do_power(expr, |lhs, rhs| {
        let positive = rhs.as_number().map_or(false, |exp| exp > 0.0);
        (lhs.is_zero() && positive).then(|| SymExpr::int(0))
    })
}

/// Folds powers of numbers when the result is real.
///
/// `2^3 = 8`
/// `4^-1 = 1/4`
/// `2.25^0.5 = 1.5`
pub fn fold_numbers(expr: &SymExpr) -> Option<SymExpr> {
    do_power(expr, |lhs, rhs| {
        let base = Number::from_expr(lhs)?;
        let exp = Number::from_expr(rhs)?;
        base.pow(exp).map(Number::to_expr)
    })
}

/// `(a^b)^n = a^(b * n)`, for integers `n`
pub fn power_of_power(expr: &SymExpr) -> Option<SymExpr> {
    do_power(expr, |lhs, rhs| {
        rhs.as_integer()?;
        match lhs {
            SymExpr::Exp(base, exp) => Some((**base).clone().pow((**exp).clone() * rhs.clone())),
            _ => None,
        }
    })
}

/// `(a * b)^n = a^n * b^n`, for integers `n`
pub fn power_of_product(expr: &SymExpr) -> Option<SymExpr> {
    do_power(expr, |lhs, rhs| {
        rhs.as_integer()?;
        match lhs {
            SymExpr::Mul(factors) => Some(SymExpr::Mul(
                factors.iter()
                    .map(|factor| factor.clone().pow(rhs.clone()))
                    .collect(),
            )),
            _ => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn trivial_powers() {
        let x = SymExpr::symbol("x");
        assert_eq!(power_zero(&x.clone().pow(SymExpr::int(0))), Some(SymExpr::int(1)));
        assert_eq!(power_one(&x.clone().pow(SymExpr::int(1))), Some(x.clone()));
        assert_eq!(base_one(&SymExpr::int(1).pow(x.clone())), Some(SymExpr::int(1)));
        assert_eq!(base_zero(&SymExpr::int(0).pow(x)), None);
    }

    #[test]
    fn numbers() {
        assert_eq!(fold_numbers(&SymExpr::int(2).pow(SymExpr::int(3))), Some(SymExpr::int(8)));
        assert_eq!(fold_numbers(&SymExpr::int(-8).pow(SymExpr::float(0.5))), None);
    }

    #[test]
    fn nested_powers() {
        // (x^2)^3
        let expr = SymExpr::symbol("x").pow(SymExpr::int(2)).pow(SymExpr::int(3));
        assert_eq!(power_of_power(&expr), Some(SymExpr::symbol("x").pow(SymExpr::int(6))));

        // (x^2)^0.5 is not |x|
        let expr = SymExpr::symbol("x").pow(SymExpr::int(2)).pow(SymExpr::float(0.5));
        assert_eq!(power_of_power(&expr), None);
    }
}
