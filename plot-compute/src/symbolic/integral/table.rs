//! Antiderivatives of the functions in the vocabulary, in terms of their argument.

use crate::symbolic::expr::SymExpr;

fn call(name: &str, arg: &SymExpr) -> SymExpr {
    SymExpr::call(name, vec![arg.clone()])
}

fn half() -> SymExpr {
    SymExpr::int(2).recip()
}

/// `ln|arg|`
pub(super) fn ln_abs(arg: SymExpr) -> SymExpr {
    SymExpr::call("abs", vec![arg]).ln()
}

/// `u^2`
fn square(u: &SymExpr) -> SymExpr {
    u.clone().pow(SymExpr::int(2))
}

/// Returns `F(u)` such that `dF/du = f(u)`, where `f` is the named function. Returns [`None`] for
/// functions without an entry.
///
/// The logarithms with an explicit base are expected to have been rewritten in terms of `ln`.
pub(super) fn antiderivative(name: &str, u: &SymExpr) -> Option<SymExpr> {
    let u2 = || square(u);
    let one = || SymExpr::int(1);

    let result = match name {
        "sin" => -call("cos", u),
        "cos" => call("sin", u),
        "tan" => -ln_abs(call("cos", u)),
        "cot" => ln_abs(call("sin", u)),
        "sec" => ln_abs(call("sec", u) + call("tan", u)),
        "csc" => -ln_abs(call("csc", u) + call("cot", u)),
        "asin" => u.clone() * call("asin", u) + (one() + -u2()).sqrt(),
        "acos" => u.clone() * call("acos", u) + -(one() + -u2()).sqrt(),
        "atan" => u.clone() * call("atan", u) + -(half() * (one() + u2()).ln()),
        "sinh" => call("cosh", u),
        "cosh" => call("sinh", u),
        "tanh" => call("cosh", u).ln(),
        "asinh" => u.clone() * call("asinh", u) + -(u2() + one()).sqrt(),
        "acosh" => u.clone() * call("acosh", u) + -(u2() + SymExpr::int(-1)).sqrt(),
        "atanh" => u.clone() * call("atanh", u) + half() * (one() + -u2()).ln(),
        "exp" => call("exp", u),
        "ln" => u.clone() * u.clone().ln() + -u.clone(),
        "sqrt" => SymExpr::int(2) * SymExpr::int(3).recip() * u.clone() * u.clone().sqrt(),
        "cbrt" => SymExpr::int(3) * SymExpr::int(4).recip() * u.clone() * call("cbrt", u),
        "abs" => half() * u.clone() * call("abs", u),
        "sign" => call("abs", u),
        _ => return None,
    };
    Some(result)
}
