//! Simplification rules for expressions involving addition, including combining like terms.

use crate::symbolic::{
    expr::SymExpr,
    simplify::{fraction::{join_coefficient, split_coefficient}, number::Number, rules::do_add},
};

/// `a + (b + c) = a + b + c`
pub fn flatten(expr: &SymExpr) -> Option<SymExpr> {
    do_add(expr, |terms| {
        if terms.len() > 1 && !terms.iter().any(|term| matches!(term, SymExpr::Add(_))) {
            return None;
        }

        let flat = terms.iter()
            .cloned()
            .fold(SymExpr::Add(Vec::new()), |acc, term| acc + term);
        Some(flat.downgrade())
    })
}

/// Combines numbers and like terms, and removes terms that cancel out.
///
/// `2 + 3 = 5`
/// `x + x = 2x`
/// `2x - 2x + y = y`
pub fn combine_like_terms(expr: &SymExpr) -> Option<SymExpr> {
    do_add(expr, |terms| {
        let mut groups: Vec<(Option<SymExpr>, Number)> = Vec::with_capacity(terms.len());
        let mut changed = false;

        for term in terms {
            let (coefficient, rest) = split_coefficient(term);
            match groups.iter_mut().find(|(other, _)| *other == rest) {
                Some((_, sum)) => {
                    *sum = sum.add(coefficient)?;
                    changed = true;
                },
                None => groups.push((rest, coefficient)),
            }
        }

        let len = groups.len();
        groups.retain(|(_, coefficient)| !coefficient.is_zero());
        if !changed && groups.len() == len {
            return None;
        }

        let terms = groups.into_iter()
            .map(|(rest, coefficient)| join_coefficient(coefficient, rest))
            .collect();
        Some(SymExpr::Add(terms).downgrade())
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn like_terms() {
        // x + 2x + 3 + 4
        let expr = SymExpr::Add(vec![
            SymExpr::symbol("x"),
            SymExpr::Mul(vec![SymExpr::int(2), SymExpr::symbol("x")]),
            SymExpr::int(3),
            SymExpr::int(4),
        ]);
        assert_eq!(combine_like_terms(&expr), Some(SymExpr::Add(vec![
            SymExpr::Mul(vec![SymExpr::int(3), SymExpr::symbol("x")]),
            SymExpr::int(7),
        ])));
    }

    #[test]
    fn cancellation() {
        // x - x
        let expr = SymExpr::Add(vec![
            SymExpr::symbol("x"),
            SymExpr::Mul(vec![SymExpr::int(-1), SymExpr::symbol("x")]),
        ]);
        assert_eq!(combine_like_terms(&expr), Some(SymExpr::int(0)));
    }

    #[test]
    fn nothing_to_combine() {
        let expr = SymExpr::Add(vec![SymExpr::symbol("x"), SymExpr::int(1)]);
        assert_eq!(combine_like_terms(&expr), None);
    }
}
