//! Implementation of the simplification rules.
//!
//! Each rule in this module is a function that takes the expression to simplify as an argument,
//! and returns `Some(expr)` with the simplified expression if the rule applies, or `None` if the
//! rule does not apply.

pub mod add;
pub mod call;
pub mod multiply;
pub mod power;

use crate::symbolic::expr::{Primary, SymExpr};

/// A single simplification rule.
pub type Rule = fn(&SymExpr) -> Option<SymExpr>;

/// If the expression is a function call with the given function name, calls the given
/// transformation function with the arguments.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_call(
    expr: &SymExpr,
    name: &str,
    f: impl Copy + Fn(&[SymExpr]) -> Option<SymExpr>,
) -> Option<SymExpr> {
    if let SymExpr::Primary(Primary::Call(target_name, args)) = expr {
        if target_name == name {
            return f(args);
        }
    }

    None
}

/// If the expression is an add expression, calls the given transformation function with the terms.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_add(expr: &SymExpr, f: impl Copy + Fn(&[SymExpr]) -> Option<SymExpr>) -> Option<SymExpr> {
    if let SymExpr::Add(terms) = expr {
        f(terms)
    } else {
        None
    }
}

/// If the expression is a multiplication expression, calls the given transformation function with
/// the factors.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_multiply(expr: &SymExpr, f: impl Copy + Fn(&[SymExpr]) -> Option<SymExpr>) -> Option<SymExpr> {
    if let SymExpr::Mul(factors) = expr {
        f(factors)
    } else {
        None
    }
}

/// If the expression is a power expression, calls the given transformation function with the left
/// and right-hand-side of the power.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_power(expr: &SymExpr, f: impl Copy + Fn(&SymExpr, &SymExpr) -> Option<SymExpr>) -> Option<SymExpr> {
    if let SymExpr::Exp(lhs, rhs) = expr {
        f(lhs, rhs)
    } else {
        None
    }
}

/// Every rule, in the order they are tried.
const RULES: &[Rule] = &[
    add::flatten,
    add::combine_like_terms,
    multiply::flatten,
    multiply::multiply_zero,
    multiply::combine_numbers,
    multiply::combine_like_factors,
    power::power_zero,
    power::power_one,
    power::base_one,
    power::base_zero,
    power::fold_numbers,
    power::power_of_power,
    power::power_of_product,
    call::all,
];

/// Applies the first rule that changes the expression.
///
/// A rule may rebuild an expression that is strictly equal to its input (for example, a fraction
/// already in lowest terms); such results are not counted as a change.
pub fn all(expr: &SymExpr) -> Option<SymExpr> {
    RULES.iter().find_map(|rule| rule(expr).filter(|new_expr| new_expr != expr))
}
