//! Simplification rules for expressions involving multiplication, including combining like
//! factors.

use crate::symbolic::{
    expr::SymExpr,
    simplify::{number::Number, rules::do_multiply},
};

/// `a * (b * c) = a * b * c`
pub fn flatten(expr: &SymExpr) -> Option<SymExpr> {
    do_multiply(expr, |factors| {
        if factors.len() > 1 && !factors.iter().any(|factor| matches!(factor, SymExpr::Mul(_))) {
            return None;
        }

        let flat = factors.iter()
            .cloned()
            .fold(SymExpr::Mul(Vec::new()), |acc, factor| acc * factor);
        Some(flat.downgrade())
    })
}

/// `0*a = 0`
/// `a*0 = 0`
pub fn multiply_zero(expr: &SymExpr) -> Option<SymExpr> {
    do_multiply(expr, |factors| {
        if factors.iter().any(SymExpr::is_zero) {
            Some(SymExpr::int(0))
        } else {
            None
        }
    })
}

/// Multiplies every numeric factor into one coefficient, dropping it if it is 1.
///
/// `2 * x * 3 = 6x`
/// `1 * a = a`
/// `2 * 4^-1 = 1/2`
pub fn combine_numbers(expr: &SymExpr) -> Option<SymExpr> {
    do_multiply(expr, |factors| {
        let mut coefficient = Number::ONE;
        let mut count = 0;
        let mut rest = Vec::with_capacity(factors.len());
        for factor in factors {
            match Number::from_expr(factor).and_then(|number| coefficient.mul(number)) {
                Some(product) => {
                    coefficient = product;
                    count += 1;
                },
                None => rest.push(factor.clone()),
            }
        }

        if count == 0 || (count == 1 && !coefficient.is_one()) {
            return None;
        }

        if rest.is_empty() {
            return Some(coefficient.to_expr());
        }

        let rest = SymExpr::Mul(rest).downgrade();
        if coefficient.is_one() {
            Some(rest)
        } else {
            Some(coefficient.to_expr() * rest)
        }
    })
}

/// Splits a factor into its base and exponent.
fn base_and_exponent(factor: &SymExpr) -> (&SymExpr, SymExpr) {
    match factor {
        SymExpr::Exp(base, exp) => (base, (**exp).clone()),
        other => (other, SymExpr::int(1)),
    }
}

/// Combines like factors by adding their exponents. Numeric factors are left to
/// [`combine_numbers`].
///
/// `x * x = x^2`
/// `x^2 * x^-1 = x`
/// `sin(x) * sin(x)^y = sin(x)^(y + 1)`
pub fn combine_like_factors(expr: &SymExpr) -> Option<SymExpr> {
    do_multiply(expr, |factors| {
        let mut groups: Vec<(&SymExpr, SymExpr)> = Vec::with_capacity(factors.len());
        let mut numbers = Vec::new();
        let mut changed = false;

        for factor in factors {
            if Number::from_expr(factor).is_some() {
                numbers.push(factor.clone());
                continue;
            }

            let (base, exp) = base_and_exponent(factor);
            match groups.iter_mut().find(|(other, _)| *other == base) {
                Some((_, sum)) => {
                    let prev = std::mem::replace(sum, SymExpr::int(0));
                    *sum = prev + exp;
                    changed = true;
                },
                None => groups.push((base, exp)),
            }
        }

        if !changed {
            return None;
        }

        let combined = groups.into_iter()
            .map(|(base, exp)| base.clone().pow(exp))
            .chain(numbers)
            .collect();
        Some(SymExpr::Mul(combined).downgrade())
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn numbers() {
        // 2 * x * 3
        let expr = SymExpr::Mul(vec![SymExpr::int(2), SymExpr::symbol("x"), SymExpr::int(3)]);
        assert_eq!(combine_numbers(&expr), Some(SymExpr::Mul(vec![
            SymExpr::int(6),
            SymExpr::symbol("x"),
        ])));

        // 1 * x
        let expr = SymExpr::Mul(vec![SymExpr::int(1), SymExpr::symbol("x")]);
        assert_eq!(combine_numbers(&expr), Some(SymExpr::symbol("x")));
    }

    #[test]
    fn like_factors() {
        // x * x^2
        let expr = SymExpr::Mul(vec![
            SymExpr::symbol("x"),
            SymExpr::symbol("x").pow(SymExpr::int(2)),
        ]);
        assert_eq!(combine_like_factors(&expr), Some(SymExpr::symbol("x").pow(SymExpr::int(3))));
    }

    #[test]
    fn zero() {
        let expr = SymExpr::Mul(vec![SymExpr::symbol("x"), SymExpr::float(0.0)]);
        assert_eq!(multiply_zero(&expr), Some(SymExpr::int(0)));
    }
}
