//! Symbolic integration.
//!
//! [`integral`] finds one antiderivative of an expression (with an integration constant of 0) by
//! trying a fixed set of rules, recursively:
//!
//! - linearity: sums are integrated termwise, and constant factors are pulled out
//! - substitution: `k * u' * f(u)` where `f` has a known antiderivative, which includes the power
//!   rule for `u^n` (`ln|u|` when `n = -1`), `c^u` for constant `c`, every function of the
//!   vocabulary applied to a linear argument, and `f' / f`
//! - `1 / (a*x^2 + b*x + c)`, using the discriminant to choose between `atan` and `ln`
//! - integration by parts for `x^n * g(x)` where `g` is `exp`, `sin`, `cos`, `sinh`, `cosh` or
//!   `c^u` of a linear argument, and for `x^n * ln(u)`
//! - `exp(u) * sin(v)` and `exp(u) * cos(v)` for linear `u` and `v`, where integrating by parts
//!   twice leads back to the integrand
//! - power reduction of `sin(u)^2` and `cos(u)^2`
//! - expansion of products of sums, and of small integer powers of sums
//!
//! Before any rule runs, logarithms are rewritten in terms of `ln`, and `sqrt(u)` as `u^(1/2)`.
//! `cbrt(u)` is kept as a call so that it stays real for negative `u`; its powers have their own
//! antiderivative.
//!
//! Each rule application consumes one unit of fuel, so the search always terminates. If no rule
//! produces a closed form before the fuel runs out, integration fails with [`NoClosedForm`]; a
//! partial result is never returned.

mod table;

use crate::error::NoClosedForm;
use crate::symbolic::{
    derivative::derivative,
    expr::{Primary, SymExpr},
    simplify::{number::Number, simplify},
};
use plot_error::Error;

/// The default number of rule applications an integration may make.
pub const DEFAULT_FUEL: usize = 256;

/// The largest power of a sum that is expanded.
const MAX_EXPANSION: i64 = 8;

/// The largest number of terms an expansion may produce.
const MAX_TERMS: usize = 256;

/// Computes an antiderivative of the given expression with respect to the symbol `var`, using the
/// default fuel.
pub fn integral(f: &SymExpr, var: &str) -> Result<SymExpr, Error> {
    integral_with_fuel(f, var, DEFAULT_FUEL)
}

/// Computes an antiderivative of the given expression with respect to the symbol `var`, making at
/// most `fuel` rule applications.
pub fn integral_with_fuel(f: &SymExpr, var: &str, fuel: usize) -> Result<SymExpr, Error> {
    let integrand = simplify(&rewrite_calls(f));
    let mut integrator = Integrator { var, fuel };

    match integrator.integrate(&integrand) {
        Some(result) => {
            let result = simplify(&result);
            log::debug!(
                "integrated `{}` with respect to {} as `{}` ({} fuel left)",
                f, var, result, integrator.fuel,
            );
            Ok(result)
        },
        None => {
            log::debug!("no closed form for the integral of `{}` with respect to {}", f, var);
            Err(Error::unspanned(NoClosedForm {
                integrand: f.to_string(),
                var: var.to_owned(),
            }))
        },
    }
}

/// Rewrites every logarithm in terms of `ln`, so that only one logarithm needs integration rules,
/// and square roots as powers, so that the power rule applies to them.
///
/// `log(u) = ln(u)`
/// `log(u, b) = ln(u) / ln(b)`
/// `log10(u) = ln(u) / ln(10)`
/// `log2(u) = ln(u) / ln(2)`
/// `sqrt(u) = u^(1/2)`
fn rewrite_calls(expr: &SymExpr) -> SymExpr {
    match expr {
        SymExpr::Primary(Primary::Call(name, args)) => {
            let args = args.iter().map(rewrite_calls).collect::<Vec<_>>();
            let change_of_base = |u: &SymExpr, base: SymExpr| u.clone().ln() * base.ln().recip();
            match (name.as_str(), args.as_slice()) {
                ("log", [u]) => u.clone().ln(),
                ("log", [u, base]) => change_of_base(u, base.clone()),
                ("log10", [u]) => change_of_base(u, SymExpr::int(10)),
                ("log2", [u]) => change_of_base(u, SymExpr::int(2)),
                ("sqrt", [u]) => u.clone().pow(SymExpr::int(2).recip()),
                _ => SymExpr::call(name.clone(), args),
            }
        },
        SymExpr::Primary(_) => expr.clone(),
        SymExpr::Add(terms) => SymExpr::Add(terms.iter().map(rewrite_calls).collect()),
        SymExpr::Mul(factors) => SymExpr::Mul(factors.iter().map(rewrite_calls).collect()),
        SymExpr::Exp(base, exp) => rewrite_calls(base).pow(rewrite_calls(exp)),
    }
}

/// Returns true if the factor can be multiplied out into a sum.
fn is_expandable(factor: &SymExpr) -> bool {
    match factor {
        SymExpr::Add(_) => true,
        SymExpr::Exp(base, exp) => matches!(**base, SymExpr::Add(_))
            && exp.as_integer().is_some_and(|n| (2..=MAX_EXPANSION).contains(&n)),
        _ => false,
    }
}

/// Multiplies every term of `lhs` with every term of `rhs`. Returns [`None`] if the result would
/// have too many terms.
fn distribute(lhs: &[SymExpr], rhs: &[SymExpr]) -> Option<Vec<SymExpr>> {
    if lhs.len() * rhs.len() > MAX_TERMS {
        return None;
    }

    Some(lhs.iter()
        .flat_map(|a| rhs.iter().map(move |b| a.clone() * b.clone()))
        .collect())
}

/// The terms of a factor once multiplied out.
fn terms_of(factor: &SymExpr) -> Option<Vec<SymExpr>> {
    match factor {
        SymExpr::Add(terms) => Some(terms.clone()),
        SymExpr::Exp(base, exp) if is_expandable(factor) => {
            let (SymExpr::Add(terms), Some(n)) = (&**base, exp.as_integer()) else {
                return None;
            };
            (1..n).try_fold(terms.clone(), |acc, _| distribute(&acc, terms))
        },
        other => Some(vec![other.clone()]),
    }
}

/// Multiplies out products of sums, and small positive integer powers of sums. Returns [`None`] if
/// there is nothing to expand.
fn expand(expr: &SymExpr) -> Option<SymExpr> {
    let factors = match expr {
        SymExpr::Mul(factors) => factors.as_slice(),
        SymExpr::Exp(..) => std::slice::from_ref(expr),
        _ => return None,
    };

    if !factors.iter().any(is_expandable) {
        return None;
    }

    let mut terms = vec![SymExpr::int(1)];
    for factor in factors {
        terms = distribute(&terms, &terms_of(factor)?)?;
    }
    Some(SymExpr::Add(terms))
}

/// Returns `sqrt(n)`, exactly if `n` is a fraction of perfect squares.
fn sqrt_number(n: Number) -> SymExpr {
    fn exact_root(n: i64) -> Option<i64> {
        let root = (n as f64).sqrt().round() as i64;
        (root.checked_mul(root)? == n).then_some(root)
    }

    match n {
        Number::Rational(numerator, denominator) => exact_root(numerator)
            .zip(exact_root(denominator))
            .and_then(|(numerator, denominator)| Number::rational(numerator, denominator))
            .map(Number::to_expr)
            .unwrap_or_else(|| n.to_expr().sqrt()),
        Number::Float(float) => SymExpr::float(float.sqrt()),
    }
}

/// The state of a single integration.
struct Integrator<'a> {
    /// The variable of integration.
    var: &'a str,

    /// The number of rule applications left.
    fuel: usize,
}

impl Integrator<'_> {
    /// The variable of integration, as an expression.
    fn x(&self) -> SymExpr {
        SymExpr::symbol(self.var)
    }

    fn is_constant(&self, expr: &SymExpr) -> bool {
        !expr.contains_symbol(self.var)
    }

    /// The simplified derivative of the expression.
    fn derivative(&self, expr: &SymExpr) -> Option<SymExpr> {
        derivative(expr, self.var).ok().map(|d| simplify(&d))
    }

    /// Returns the slope `a` if the expression is `a*x + b` for constants `a != 0` and `b`.
    fn slope(&self, expr: &SymExpr) -> Option<SymExpr> {
        let slope = self.derivative(expr)?;
        (self.is_constant(&slope) && !slope.is_zero()).then_some(slope)
    }

    /// Returns true if the factor is `x` or `x^n`, for a positive integer `n`.
    fn is_monomial(&self, factor: &SymExpr) -> bool {
        match factor {
            SymExpr::Primary(Primary::Symbol(name)) => name == self.var,
            SymExpr::Exp(base, exp) => base.as_symbol() == Some(self.var)
                && exp.as_integer().is_some_and(|n| n > 0),
            _ => false,
        }
    }

    /// Returns true if the factor can be integrated repeatedly when integrating by parts.
    fn is_periodic_or_exponential(&self, factor: &SymExpr) -> bool {
        match factor {
            SymExpr::Primary(Primary::Call(name, args)) => {
                matches!(name.as_str(), "exp" | "sin" | "cos" | "sinh" | "cosh")
                    && matches!(args.as_slice(), [u] if self.slope(u).is_some())
            },
            SymExpr::Exp(base, exp) => self.is_constant(base) && self.slope(exp).is_some(),
            _ => false,
        }
    }

    /// Returns the constant `a` if the factor is `exp(u)` or `c^u` for a linear `u`, so that its
    /// derivative is `a` times itself.
    fn exponential_rate(&self, factor: &SymExpr) -> Option<SymExpr> {
        match factor {
            SymExpr::Primary(Primary::Call(name, args)) if name == "exp" => match args.as_slice() {
                [u] => self.slope(u),
                _ => None,
            },
            SymExpr::Exp(base, exp) if self.is_constant(base) => {
                let rate = simplify(&((**base).clone().ln() * self.slope(exp)?));
                (!rate.is_zero()).then_some(rate)
            },
            _ => None,
        }
    }

    /// Integrates the expression. Returns [`None`] if no rule applies, or the fuel runs out.
    fn integrate(&mut self, f: &SymExpr) -> Option<SymExpr> {
        self.fuel = self.fuel.checked_sub(1)?;
        let f = simplify(f);

        // ∫ c dx = c*x
        if self.is_constant(&f) {
            return Some(f * self.x());
        }

        match &f {
            // ∫ x dx = x^2 / 2
            SymExpr::Primary(Primary::Symbol(_)) => {
                Some(SymExpr::int(2).recip() * self.x().pow(SymExpr::int(2)))
            },
            SymExpr::Primary(_) => self.substitution(std::slice::from_ref(&f)),
            SymExpr::Add(terms) => terms.iter()
                .map(|term| self.integrate(term))
                .collect::<Option<Vec<_>>>()
                .map(SymExpr::Add),
            SymExpr::Mul(factors) => self.product(factors),
            SymExpr::Exp(base, exp) => self.substitution(std::slice::from_ref(&f))
                .or_else(|| self.quadratic_reciprocal(base, exp))
                .or_else(|| self.power_reduction(base, exp))
                .or_else(|| self.expansion(&f)),
        }
    }

    fn product(&mut self, factors: &[SymExpr]) -> Option<SymExpr> {
        let (constant, varying): (Vec<_>, Vec<_>) = factors.iter()
            .cloned()
            .partition(|factor| self.is_constant(factor));

        // ∫ c*f dx = c * ∫ f dx
        if !constant.is_empty() {
            let integral = self.integrate(&SymExpr::Mul(varying).downgrade())?;
            return Some(SymExpr::Mul(constant).downgrade() * integral);
        }

        self.substitution(factors)
            .or_else(|| self.by_parts(factors))
            .or_else(|| self.cyclic_by_parts(factors))
            .or_else(|| self.expansion(&SymExpr::Mul(factors.to_vec())))
    }

    /// Returns the ways the factor can be read as `f(u)` for a known antiderivative `F`, as pairs
    /// of `u` and `F(u)`.
    fn outer_functions(&self, factor: &SymExpr) -> Vec<(SymExpr, SymExpr)> {
        let mut candidates = Vec::new();

        match factor {
            SymExpr::Primary(Primary::Call(name, args)) => {
                if let [u] = args.as_slice() {
                    if let Some(antiderivative) = table::antiderivative(name, u) {
                        candidates.push((u.clone(), antiderivative));
                    }
                }
            },
            // u^n
            SymExpr::Exp(base, exp) if self.is_constant(exp) => {
                let exp_plus_one = simplify(&((**exp).clone() + SymExpr::int(1)));
                let antiderivative = if exp_plus_one.is_zero() {
                    table::ln_abs((**base).clone())
                } else {
                    (**base).clone().pow(exp_plus_one.clone()) * exp_plus_one.recip()
                };
                candidates.push(((**base).clone(), antiderivative));
            },
            // c^u
            SymExpr::Exp(base, exp) if self.is_constant(base) => {
                let antiderivative = factor.clone() * (**base).clone().ln().recip();
                candidates.push(((**exp).clone(), antiderivative));
            },
            _ => {},
        }

        // cbrt(u)^n = u^(n/3)
        if let SymExpr::Exp(base, exp) = factor {
            if let Some(("cbrt", [u])) = base.as_call() {
                if self.is_constant(exp) {
                    let exp_plus_three = simplify(&((**exp).clone() + SymExpr::int(3)));
                    let antiderivative = if exp_plus_three.is_zero() {
                        table::ln_abs(u.clone())
                    } else {
                        SymExpr::int(3)
                            * exp_plus_three.clone().recip()
                            * (**base).clone().pow(exp_plus_three)
                    };
                    candidates.push((u.clone(), antiderivative));
                }
            }
        }

        // u itself, so that ∫ u * u' dx = u^2 / 2
        if factor.as_symbol().is_none() {
            let antiderivative = SymExpr::int(2).recip() * factor.clone().pow(SymExpr::int(2));
            candidates.push((factor.clone(), antiderivative));
        }

        candidates
    }

    /// `∫ k * u' * f(u) dx = k * F(u)`, for constant `k`.
    fn substitution(&self, factors: &[SymExpr]) -> Option<SymExpr> {
        for (i, factor) in factors.iter().enumerate() {
            for (u, antiderivative) in self.outer_functions(factor) {
                if self.is_constant(&u) {
                    continue;
                }

                let Some(du) = self.derivative(&u) else {
                    continue;
                };
                if du.is_zero() {
                    continue;
                }

                let rest = factors.iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .map(|(_, other)| other.clone())
                    .collect::<Vec<_>>();
                let ratio = simplify(&(SymExpr::Mul(rest).downgrade() * du.recip()));
                if self.is_constant(&ratio) {
                    return Some(ratio * antiderivative);
                }
            }
        }

        None
    }

    /// Integration by parts, for a monomial times one other factor.
    ///
    /// `∫ p*g dx = p*G - ∫ p'*G dx`, when `g` can be integrated repeatedly
    /// `∫ p*ln(u) dx = P*ln(u) - ∫ P*u'/u dx`
    fn by_parts(&mut self, factors: &[SymExpr]) -> Option<SymExpr> {
        let (monomials, others): (Vec<_>, Vec<_>) = factors.iter()
            .cloned()
            .partition(|factor| self.is_monomial(factor));
        let [g] = others.as_slice() else {
            return None;
        };
        if monomials.is_empty() {
            return None;
        }
        let p = SymExpr::Mul(monomials).downgrade();

        if self.is_periodic_or_exponential(g) {
            let big_g = self.integrate(g)?;
            let dp = self.derivative(&p)?;
            let rest = self.integrate(&(dp * big_g.clone()))?;
            return Some(p * big_g + -rest);
        }

        match g.as_call() {
            Some(("ln", [_])) => {
                let big_p = self.integrate(&p)?;
                let dg = self.derivative(g)?;
                let rest = self.integrate(&(big_p.clone() * dg))?;
                Some(big_p * g.clone() + -rest)
            },
            _ => None,
        }
    }

    /// `∫ e^u * sin(v) dx = e^u * (a*sin(v) - b*cos(v)) / (a^2 + b^2)`
    /// `∫ e^u * cos(v) dx = e^u * (a*cos(v) + b*sin(v)) / (a^2 + b^2)`
    ///
    /// where `a` and `b` are the slopes of the linear arguments `u` and `v`. The exponential may
    /// also be `c^u` for a constant `c`, with `a` scaled by `ln(c)`.
    fn cyclic_by_parts(&self, factors: &[SymExpr]) -> Option<SymExpr> {
        let [first, second] = factors else {
            return None;
        };
        let (exponential, trig, a) = match (self.exponential_rate(first), self.exponential_rate(second)) {
            (Some(a), _) => (first, second, a),
            (_, Some(a)) => (second, first, a),
            _ => return None,
        };
        let (name, v) = match trig.as_call()? {
            (name @ ("sin" | "cos"), [v]) => (name, v),
            _ => return None,
        };
        let b = self.slope(v)?;

        let sin = SymExpr::call("sin", vec![v.clone()]);
        let cos = SymExpr::call("cos", vec![v.clone()]);
        let combination = if name == "sin" {
            a.clone() * sin + -(b.clone() * cos)
        } else {
            a.clone() * cos + b.clone() * sin
        };
        let scale = (a.pow(SymExpr::int(2)) + b.pow(SymExpr::int(2))).recip();
        Some(scale * exponential.clone() * combination)
    }

    /// `∫ sin(u)^2 dx = ∫ (1 - cos(2u)) / 2 dx`
    /// `∫ cos(u)^2 dx = ∫ (1 + cos(2u)) / 2 dx`
    fn power_reduction(&mut self, base: &SymExpr, exp: &SymExpr) -> Option<SymExpr> {
        if exp.as_integer() != Some(2) {
            return None;
        }

        let (name, u) = match base.as_call()? {
            (name @ ("sin" | "cos"), [u]) => (name, u),
            _ => return None,
        };
        let cos_2u = SymExpr::call("cos", vec![SymExpr::int(2) * u.clone()]);
        let reduced = match name {
            "sin" => SymExpr::int(1) + -cos_2u,
            _ => SymExpr::int(1) + cos_2u,
        };
        self.integrate(&(SymExpr::int(2).recip() * reduced))
    }

    /// The reciprocal of a quadratic with numeric coefficients, `1 / (a*x^2 + b*x + c)`.
    fn quadratic_reciprocal(&self, q: &SymExpr, exp: &SymExpr) -> Option<SymExpr> {
        if exp.as_integer() != Some(-1) {
            return None;
        }

        let dq = self.derivative(q)?;
        let two_a = Number::from_expr(&self.derivative(&dq)?)?;
        if two_a.is_zero() {
            return None;
        }

        let zero = SymExpr::int(0);
        let a = two_a.mul(Number::rational(1, 2)?)?;
        let b = Number::from_expr(&simplify(&dq.substitute(self.var, &zero)))?;
        let c = Number::from_expr(&simplify(&q.substitute(self.var, &zero)))?;

        // b^2 - 4ac
        let discriminant = b.mul(b)?.add(Number::Rational(-4, 1).mul(a)?.mul(c)?)?;

        // 2ax + b, the derivative of the quadratic
        let linear = two_a.to_expr() * self.x() + b.to_expr();

        let result = if discriminant.is_zero() {
            // -2 / (2ax + b)
            SymExpr::int(-2) * linear.recip()
        } else if discriminant.is_negative() {
            // 2 / k * atan((2ax + b) / k)
            let k = sqrt_number(discriminant.neg()?);
            SymExpr::int(2)
                * k.clone().recip()
                * SymExpr::call("atan", vec![linear * k.recip()])
        } else {
            // 1 / k * ln|(2ax + b - k) / (2ax + b + k)|
            let k = sqrt_number(discriminant);
            let ratio = (linear.clone() + -k.clone()) * (linear + k.clone()).recip();
            k.recip() * table::ln_abs(ratio)
        };
        Some(result)
    }

    /// Multiplies out the integrand, and integrates the resulting sum.
    fn expansion(&mut self, f: &SymExpr) -> Option<SymExpr> {
        let expanded = simplify(&expand(f)?);
        if expanded == *f {
            return None;
        }
        self.integrate(&expanded)
    }
}

#[cfg(test)]
mod tests {
    use plot_error::Category;
    use plot_parser::{parser::parse_expr, SymbolTable};
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::numeric::compile;

    const DX: f64 = 1e-6;
    const TOL: f64 = 1e-4;

    fn sym(text: &str) -> SymExpr {
        SymExpr::from(parse_expr(text).unwrap())
    }

    fn eval(expr: &SymExpr, x: f64) -> f64 {
        compile(expr, SymbolTable::CURVE).unwrap().eval_point(&[x])
    }

    /// Checks that the derivative of the integral matches the integrand at the given points.
    fn check(text: &str, points: &[f64]) {
        let f = sym(text);
        let big_f = integral(&f, "x").unwrap_or_else(|err| panic!("{text}: {}", err.message()));
        for &x in points {
            let expected = eval(&f, x);
            let slope = (eval(&big_f, x + DX) - eval(&big_f, x - DX)) / (2.0 * DX);
            let error = (expected - slope).abs() / expected.abs().max(1.0);
            assert!(
                error < TOL,
                "d/dx({big_f}) = {slope} at x = {x}, but {text} = {expected}",
            );
        }
    }

    #[test]
    fn display() {
        assert_eq!(integral(&sym("x^2"), "x").unwrap().to_string(), "x^3 / 3");
        assert_eq!(integral(&sym("sin(x)"), "x").unwrap().to_string(), "-cos(x)");
        assert_eq!(integral(&sym("1 / (x^2 + 1)"), "x").unwrap().to_string(), "atan(x)");
    }

    #[test]
    fn constants() {
        assert_eq!(integral(&sym("5"), "x").unwrap(), sym("5x"));
        check("pi", &[-1.0, 2.0]);

        let y = SymExpr::symbol("y");
        assert_eq!(integral(&y, "x").unwrap(), SymExpr::Mul(vec![y, SymExpr::symbol("x")]));
    }

    #[test]
    fn polynomials() {
        check("x", &[-2.0, 0.5, 3.0]);
        check("3x^2 + 2x + 1", &[-2.0, 0.5, 3.0]);
        check("x^5 / 4 - x^3", &[-1.5, 0.25, 2.0]);
        check("(x + 1)^3", &[-2.0, 0.0, 1.5]);
        check("(x^2 + 1)^2", &[-1.0, 0.5, 2.0]);
        check("(x + 1)(x - 2)", &[-1.0, 0.5, 2.0]);
        check("sqrt(x) + x^(1/3)", &[0.5, 2.0, 4.0]);
    }

    #[test]
    fn reciprocals() {
        check("1 / x", &[-3.0, -0.5, 0.5, 3.0]);
        check("1 / (2x + 1)", &[0.5, 2.0]);
        check("(3 - x)^-2", &[0.0, 1.0, 5.0]);
        check("1 / (x^2 + 1)", &[-2.0, 0.0, 1.0]);
        check("1 / (x^2 + x + 1)", &[-2.0, 0.0, 1.0]);
        check("1 / (x^2 - 1)", &[2.0, 3.0, -4.0]);
        check("1 / (x^2 + 2x + 1)", &[0.0, 2.0]);
        check("1 / (4x^2 + 9)", &[-1.0, 0.5]);
    }

    #[test]
    fn functions_of_linear_arguments() {
        check("sin(x)", &[0.0, 1.0, 2.5]);
        check("cos(2x + 1)", &[0.0, 1.0, 2.5]);
        check("exp(3x) + e^(2x) + 2^x", &[-1.0, 0.0, 0.5]);
        check("tan(x) + sec(x)", &[-1.0, 0.3, 1.0]);
        check("cot(x) + csc(x)", &[0.5, 1.0, 2.0]);
        check("asin(x / 2) + acos(x / 2) + atan(x)", &[-1.0, 0.0, 1.0]);
        check("sinh(x) + cosh(x) + tanh(x)", &[-1.0, 0.0, 1.0]);
        check("asinh(x) + atanh(x / 2)", &[-1.0, 0.0, 1.0]);
        check("acosh(x)", &[1.5, 3.0]);
        check("ln(x) + log(x, 2) + log10(x) + log2(x)", &[0.5, 2.0, 4.0]);
        check("cbrt(x) + abs(x) + sign(x)", &[-2.0, -0.5, 0.5, 2.0]);
    }

    #[test]
    fn substitution() {
        check("2x * cos(x^2)", &[-1.0, 0.5, 1.5]);
        check("x * exp(x^2)", &[-1.0, 0.5, 1.5]);
        check("sin(x) * cos(x)", &[0.0, 1.0, 2.0]);
        check("cos(x) / sin(x)", &[0.5, 1.0, 2.0]);
        check("2x / (x^2 + 1)", &[-1.0, 0.5, 2.0]);
        check("ln(x) / x", &[0.5, 2.0]);
        check("x^2 * sqrt(x^3 + 1)", &[0.0, 1.0, 2.0]);
    }

    #[test]
    fn by_parts() {
        check("x * exp(x)", &[-1.0, 0.0, 1.0]);
        check("x^2 * sin(x)", &[-1.0, 0.0, 2.0]);
        check("x^3 * cosh(2x)", &[-1.0, 0.5]);
        check("x * 2^x", &[-1.0, 1.0]);
        check("x * ln(x)", &[0.5, 2.0]);
        check("x^2 * ln(3x)", &[0.5, 2.0]);
    }

    #[test]
    fn roots() {
        check("1 / sqrt(x)", &[0.5, 2.0, 4.0]);
        check("x * sqrt(x)", &[0.5, 2.0, 4.0]);
        check("1 / sqrt(2x + 1)", &[0.0, 1.0, 3.0]);
        check("x / sqrt(x^2 + 1)", &[-1.0, 0.5, 2.0]);
        check("1 / cbrt(x)", &[-2.0, -0.5, 0.5, 2.0]);
        check("cbrt(3x - 1)^2", &[-1.0, 1.0, 2.0]);
    }

    #[test]
    fn squared_sine_and_cosine() {
        check("sin(x)^2", &[-1.0, 0.0, 2.0]);
        check("cos(x)^2", &[-1.0, 0.0, 2.0]);
        check("3cos(2x + 1)^2", &[-1.0, 0.5]);
        check("sin(x)^2 + cos(x)^2", &[-1.0, 0.5, 3.0]);
    }

    #[test]
    fn exponential_times_trig() {
        check("exp(x) * sin(x)", &[-1.0, 0.0, 1.0]);
        check("exp(x) * cos(x)", &[-1.0, 0.0, 1.0]);
        check("exp(2x) * cos(3x)", &[-1.0, 0.0, 0.5]);
        check("e^(-x) * sin(2x + 1)", &[-1.0, 0.0, 2.0]);
        check("2^x * cos(x)", &[-1.0, 0.0, 1.0]);
    }

    #[test]
    fn no_closed_form() {
        for text in ["exp(x^2)", "sin(x^2)", "x^x", "1 / ln(x)", "sqrt(sin(x))"] {
            let err = integral(&sym(text), "x").unwrap_err();
            assert_eq!(err.category(), Category::NoClosedForm, "{text}");
            assert!(err.is::<NoClosedForm>());
        }
    }

    #[test]
    fn fuel_bounds_the_search() {
        let err = integral_with_fuel(&sym("x^2 * sin(x)"), "x", 2).unwrap_err();
        assert!(err.is::<NoClosedForm>());
    }
}
