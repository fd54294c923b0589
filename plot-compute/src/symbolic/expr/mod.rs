//! A representation of mathematical expressions that is easier to manipulate than an AST.
//!
//! The [`Expr`](plot_parser::Expr) type from `plot_parser` is a recursive `enum` that mirrors the
//! source text: every binary operator is its own node, and parentheses are kept. That is
//! convenient for reporting errors, but not for algebraic manipulation.
//!
//! This module defines a separate [`Expr`], which recursively **flattens** the AST into lists of
//! terms or factors. Subtraction becomes addition of a negated term, division becomes
//! multiplication by a power of `-1`, and named constants are normalized to their canonical name
//! (`E` becomes `e`).
//!
//! # Strict equality
//!
//! Deciding whether two expressions are mathematically equal is hard; `x^2 + 2x + 1` and
//! `(x + 1)^2` are equal, but that is only visible after expansion. Instead, the [`PartialEq`] and
//! [`Eq`] implementations of [`Expr`] implement **strict equality**. Two expressions are strictly
//! equal if:
//!
//! - They are the same type of expression (i.e. both [`Expr::Primary`], both [`Expr::Add`], etc.).
//! - If both are [`Expr::Primary`], both expressions must have strictly equal values.
//! - If both are [`Expr::Add`] or [`Expr::Mul`], both expressions must have strictly equal terms /
//!   factors, in any order.
//! - If both are [`Expr::Exp`], both expressions must have strictly equal base and exponent.
//!
//! Strict equality never reports false positives, and does not depend on simplification, so the
//! simplifier can use it to find like terms and factors.

mod iter;

use iter::ExprIter;
use plot_parser::{
    parser::{
        ast::{Expr as AstExpr, Literal},
        token::op::{BinOpKind, UnaryOpKind},
    },
    Constant,
};
use std::{fmt, mem, ops::{Add, AddAssign, Mul, MulAssign, Neg}};
use super::simplify::fraction::make_fraction;

/// A single term / factor, such as a number, variable, or function call.
#[derive(Debug, Clone, PartialEq)]
pub enum Primary {
    /// An integer, such as `2` or `144`.
    Integer(i64),

    /// A floating-point number, such as `3.14` or `0.5`.
    Float(f64),

    /// A variable or named constant, such as `x` or `pi`.
    Symbol(String),

    /// A function call, such as `sin(x)` or `log(x, 2)`.
    Call(String, Vec<Expr>),
}

/// [`Eq`] is implemented manually to allow comparing [`Primary::Float`]s. This module **must
/// never** produce `NaN` floats! Numeric folding only keeps results that are not `NaN`.
impl Eq for Primary {}

impl fmt::Display for Primary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(num) => write!(f, "{}", num),
            Self::Float(num) => {
                if num.fract() == 0.0 && num.abs() < 1e16 {
                    write!(f, "{:.1}", num)
                } else {
                    write!(f, "{}", num)
                }
            },
            Self::Symbol(sym) => write!(f, "{}", sym),
            Self::Call(name, args) => {
                write!(f, "{}(", name)?;
                let mut iter = args.iter();
                if let Some(arg) = iter.next() {
                    write!(f, "{}", arg)?;
                    for arg in iter {
                        write!(f, ", {}", arg)?;
                    }
                }
                write!(f, ")")
            },
        }
    }
}

/// Adds two [`Primary`]s together. If both are the **same numeric type** and the result is
/// representable, the numbers are added together. Otherwise, the two [`Primary`]s are wrapped in
/// an [`Expr::Add`].
impl Add<Primary> for Primary {
    type Output = Expr;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Primary::Integer(lhs), Primary::Integer(rhs)) if lhs.checked_add(rhs).is_some() => {
                Expr::Primary(Primary::Integer(lhs + rhs))
            },
            (Primary::Float(lhs), Primary::Float(rhs)) if (lhs + rhs).is_finite() => {
                Expr::Primary(Primary::Float(lhs + rhs))
            },
            (lhs, rhs) => Expr::Add(vec![
                Expr::Primary(lhs),
                Expr::Primary(rhs),
            ]),
        }
    }
}

/// Multiplies two [`Primary`]s together. If both are the **same numeric type** and the result is
/// representable, the numbers are multiplied together. Otherwise, the two [`Primary`]s are wrapped
/// in an [`Expr::Mul`].
impl Mul<Primary> for Primary {
    type Output = Expr;

    fn mul(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Primary::Integer(lhs), Primary::Integer(rhs)) if lhs.checked_mul(rhs).is_some() => {
                Expr::Primary(Primary::Integer(lhs * rhs))
            },
            (Primary::Float(lhs), Primary::Float(rhs)) if (lhs * rhs).is_finite() => {
                Expr::Primary(Primary::Float(lhs * rhs))
            },
            (lhs, rhs) => Expr::Mul(vec![
                Expr::Primary(lhs),
                Expr::Primary(rhs),
            ]),
        }
    }
}

/// A mathematical expression with information about its terms and factors.
///
/// This type should be distinguished from the [`plot_parser::Expr`] type. The main difference is
/// that this type **flattens** out the tree structure. For example, the expression `x + (y + z)`
/// is represented as a single [`Expr::Add`] node with _three_ children, `x`, `y`, and `z`.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone, Eq)]
pub enum Expr {
    /// A single term or factor.
    Primary(Primary),

    /// Multiple terms added together.
    Add(Vec<Expr>),

    /// Multiple factors multiplied together.
    Mul(Vec<Expr>),

    /// An expression raised to a power.
    Exp(Box<Expr>, Box<Expr>),
}

pub use self::Expr as SymExpr;

/// Writes a factor of a product, parenthesizing sums and products.
fn fmt_factor(f: &mut fmt::Formatter<'_>, factor: &Expr) -> fmt::Result {
    match factor {
        Expr::Add(_) | Expr::Mul(_) => write!(f, "({})", factor),
        _ => write!(f, "{}", factor),
    }
}

/// Writes the base or exponent of a power, parenthesizing anything that is not a non-negative
/// primary.
fn fmt_power_operand(f: &mut fmt::Formatter<'_>, operand: &Expr) -> fmt::Result {
    match operand {
        Expr::Primary(_) if operand.negated().is_none() => write!(f, "{}", operand),
        _ => write!(f, "({})", operand),
    }
}

/// Writes `base^exp` for a positive integer exponent, or just the base when the exponent is 1.
fn fmt_power(f: &mut fmt::Formatter<'_>, base: &Expr, exp: i64) -> fmt::Result {
    fmt_power_operand(f, base)?;
    if exp != 1 {
        write!(f, "^{}", exp)?;
    }
    Ok(())
}

/// Writes a product as `numerator / denominator`, where each denominator entry is a base with a
/// positive integer exponent.
fn fmt_fraction(f: &mut fmt::Formatter<'_>, num: &[&Expr], den: &[(&Expr, i64)]) -> fmt::Result {
    let negatives = num.iter().filter(|factor| factor.as_integer() == Some(-1)).count();
    let mut rest = num.iter()
        .copied()
        .filter(|factor| factor.as_integer() != Some(-1))
        .collect::<Vec<_>>();
    if negatives % 2 == 1 {
        match num.first().copied() {
            Some(minus_one) if rest.is_empty() => rest.push(minus_one),
            _ => write!(f, "-")?,
        }
    }

    match rest.split_first() {
        Some((first, rest)) => {
            fmt_factor(f, first)?;
            for factor in rest {
                write!(f, " * ")?;
                fmt_factor(f, factor)?;
            }
        },
        None => write!(f, "1")?,
    }

    match den {
        [] => Ok(()),
        [(base, exp)] => {
            write!(f, " / ")?;
            if *exp == 1 {
                fmt_factor(f, base)
            } else {
                fmt_power(f, base, *exp)
            }
        },
        _ => {
            write!(f, " / (")?;
            let mut iter = den.iter();
            if let Some((base, exp)) = iter.next() {
                fmt_power(f, base, *exp)?;
                for (base, exp) in iter {
                    write!(f, " * ")?;
                    fmt_power(f, base, *exp)?;
                }
            }
            write!(f, ")")
        },
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary(primary) => write!(f, "{}", primary),
            Self::Add(terms) => {
                for (i, term) in terms.iter().enumerate() {
                    match (i, term.negated()) {
                        (0, Some(negated)) => {
                            write!(f, "-")?;
                            fmt_factor(f, &negated)?;
                        },
                        (0, None) => write!(f, "{}", term)?,
                        (_, Some(negated)) => write!(f, " - {}", negated)?,
                        (_, None) => write!(f, " + {}", term)?,
                    }
                }
                Ok(())
            },
            Self::Mul(factors) => {
                let mut num = Vec::new();
                let mut den = Vec::new();
                for factor in factors {
                    match factor.as_reciprocal_power() {
                        Some(pair) => den.push(pair),
                        None => num.push(factor),
                    }
                }
                fmt_fraction(f, &num, &den)
            },
            Self::Exp(base, exp) => {
                if let Some(pair) = self.as_reciprocal_power() {
                    return fmt_fraction(f, &[], &[pair]);
                }
                fmt_power_operand(f, base)?;
                write!(f, "^")?;
                fmt_power_operand(f, exp)
            },
        }
    }
}

impl Expr {
    /// Creates an integer expression.
    pub fn int(n: i64) -> Self {
        Self::Primary(Primary::Integer(n))
    }

    /// Creates a floating-point expression.
    pub fn float(n: f64) -> Self {
        Self::Primary(Primary::Float(n))
    }

    /// Creates a symbol expression.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Primary(Primary::Symbol(name.into()))
    }

    /// Creates a function call expression.
    pub fn call(name: impl Into<String>, args: Vec<Self>) -> Self {
        Self::Primary(Primary::Call(name.into(), args))
    }

    /// Raises this expression to the given power. No simplification is done.
    pub fn pow(self, exp: Self) -> Self {
        Self::Exp(Box::new(self), Box::new(exp))
    }

    /// Returns `1 / self`. No simplification is done.
    pub fn recip(self) -> Self {
        self.pow(Self::int(-1))
    }

    /// Returns the square root of this expression as a call to `sqrt`.
    pub fn sqrt(self) -> Self {
        Self::call("sqrt", vec![self])
    }

    /// Returns the natural logarithm of this expression as a call to `ln`.
    pub fn ln(self) -> Self {
        Self::call("ln", vec![self])
    }

    /// If the expression is a [`Primary::Integer`], returns the contained integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Primary(Primary::Integer(int)) => Some(*int),
            _ => None,
        }
    }

    /// If the expression is a [`Primary::Integer`] or [`Primary::Float`], returns its value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Primary(Primary::Integer(int)) => Some(*int as f64),
            Self::Primary(Primary::Float(float)) => Some(*float),
            _ => None,
        }
    }

    /// If the expression is a [`Primary::Symbol`], returns the contained symbol.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Primary(Primary::Symbol(sym)) => Some(sym),
            _ => None,
        }
    }

    /// If the expression is a [`Primary::Call`], returns the name and arguments of the call.
    pub fn as_call(&self) -> Option<(&str, &[Expr])> {
        match self {
            Self::Primary(Primary::Call(name, args)) => Some((name, args)),
            _ => None,
        }
    }

    /// Returns true if the expression is the integer 0 or the float 0.
    pub fn is_zero(&self) -> bool {
        self.as_number() == Some(0.0)
    }

    /// Returns true if the expression is the integer 1 or the float 1.
    pub fn is_one(&self) -> bool {
        self.as_number() == Some(1.0)
    }

    /// If the expression is a power with a negative integer exponent, returns the base and the
    /// negated exponent, i.e. the denominator of the fraction it represents.
    pub fn as_reciprocal_power(&self) -> Option<(&Expr, i64)> {
        match self {
            Self::Exp(base, exp) => match exp.as_integer() {
                Some(exp) if exp < 0 => Some((base, exp.checked_neg()?)),
                _ => None,
            },
            _ => None,
        }
    }

    /// If the expression has a negative leading coefficient, returns the expression with that
    /// coefficient negated. This is used to print `a - b` instead of `a + -1 * b`.
    pub fn negated(&self) -> Option<Expr> {
        match self {
            Self::Primary(Primary::Integer(int)) if *int < 0 => int.checked_neg().map(Self::int),
            Self::Primary(Primary::Float(float)) if *float < 0.0 => Some(Self::float(-float)),
            Self::Mul(factors) => {
                let (idx, negated) = factors.iter()
                    .enumerate()
                    .filter(|(_, factor)| factor.as_number().is_some())
                    .find_map(|(idx, factor)| factor.negated().map(|negated| (idx, negated)))?;
                let mut factors = factors.clone();
                if negated.is_one() {
                    factors.remove(idx);
                } else {
                    factors[idx] = negated;
                }
                Some(Self::Mul(factors).downgrade())
            },
            _ => None,
        }
    }

    /// Trivially downgrades the expression into a simpler form.
    ///
    /// Some operations may result in an [`Expr::Add`] with zero / one term, or an [`Expr::Mul`]
    /// with zero / one factor. This function checks for these cases and simplifies the expression
    /// into the single term / factor, or an [`Expr::Primary`] containing the integer 0 or 1.
    pub fn downgrade(self) -> Self {
        match self {
            Self::Add(mut terms) => {
                if terms.is_empty() {
                    Self::int(0)
                } else if terms.len() == 1 {
                    terms.remove(0)
                } else {
                    Self::Add(terms)
                }
            },
            Self::Mul(mut factors) => {
                if factors.is_empty() {
                    Self::int(1)
                } else if factors.len() == 1 {
                    factors.remove(0)
                } else {
                    Self::Mul(factors)
                }
            },
            _ => self,
        }
    }

    /// Returns true if the given symbol appears anywhere in the expression.
    pub fn contains_symbol(&self, name: &str) -> bool {
        self.post_order_iter().any(|expr| expr.as_symbol() == Some(name))
    }

    /// Replaces every occurrence of the given symbol with the replacement expression. No
    /// simplification is done.
    pub fn substitute(&self, name: &str, replacement: &Expr) -> Self {
        match self {
            Self::Primary(Primary::Symbol(sym)) if sym == name => replacement.clone(),
            Self::Primary(Primary::Call(func, args)) => Self::call(
                func.clone(),
                args.iter().map(|arg| arg.substitute(name, replacement)).collect(),
            ),
            Self::Primary(_) => self.clone(),
            Self::Add(terms) => terms.iter()
                .map(|term| term.substitute(name, replacement))
                .fold(Self::Add(Vec::new()), |acc, term| acc + term)
                .downgrade(),
            Self::Mul(factors) => factors.iter()
                .map(|factor| factor.substitute(name, replacement))
                .fold(Self::Mul(Vec::new()), |acc, factor| acc * factor)
                .downgrade(),
            Self::Exp(base, exp) => base.substitute(name, replacement)
                .pow(exp.substitute(name, replacement)),
        }
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }
}

/// Returns true if both lists contain strictly equal expressions, in any order, counting
/// repeated expressions.
fn same_elements(lhs: &[Expr], rhs: &[Expr]) -> bool {
    if lhs.len() != rhs.len() {
        return false;
    }

    let mut matched = vec![false; rhs.len()];
    lhs.iter().all(|lhs| {
        let found = rhs.iter()
            .enumerate()
            .find(|(idx, rhs)| !matched[*idx] && lhs == *rhs)
            .map(|(idx, _)| idx);
        match found {
            Some(idx) => {
                matched[idx] = true;
                true
            },
            None => false,
        }
    })
}

/// Checks if two expressions are **strictly** equal.
///
/// For more information about strict equality, see the [module-level documentation](self).
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs == rhs,
            (Self::Add(lhs), Self::Add(rhs)) | (Self::Mul(lhs), Self::Mul(rhs)) => {
                same_elements(lhs, rhs)
            },
            (Self::Exp(lhs_base, lhs_exp), Self::Exp(rhs_base, rhs_exp)) => {
                lhs_base == rhs_base && lhs_exp == rhs_exp
            },
            _ => false,
        }
    }
}

impl From<AstExpr> for Expr {
    fn from(expr: AstExpr) -> Self {
        match expr {
            AstExpr::Literal(Literal::Number(num)) => match num.as_integer() {
                Some(int) => Self::int(int),
                None => Self::float(num.value),
            },
            AstExpr::Literal(Literal::Symbol(sym)) => match Constant::from_name(&sym.name) {
                Some(constant) => Self::symbol(constant.name()),
                None => Self::symbol(sym.name),
            },
            AstExpr::Paren(paren) => Self::from(*paren.expr),
            AstExpr::Call(call) => {
                let args = call.args.into_iter().map(Self::from).collect();
                Self::call(call.name.name, args)
            },
            AstExpr::Unary(unary) => match unary.op.kind {
                // treat this as -1 * operand
                UnaryOpKind::Neg => Self::from(*unary.operand).neg(),
                UnaryOpKind::Pos => Self::from(*unary.operand),
            },
            AstExpr::Binary(bin) => {
                let lhs = Self::from(*bin.lhs);
                let rhs = Self::from(*bin.rhs);
                match bin.op.kind {
                    BinOpKind::Exp => lhs.pow(rhs),
                    // the `Add` and `Mul` impls flatten nested sums and products
                    BinOpKind::Mul => lhs * rhs,
                    // treat this as lhs * rhs^-1
                    BinOpKind::Div => make_fraction(lhs, rhs),
                    BinOpKind::Add => lhs + rhs,
                    // treat this as lhs + -1 * rhs
                    BinOpKind::Sub => lhs + rhs.neg(),
                }
            },
        }
    }
}

/// Adds two [`Expr`]s together. No simplification is done, except for the case where the operands
/// are a mix of [`Primary`] and / or [`Expr::Add`], in which case both are combined in one list
/// of terms (flattening).
impl Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs + rhs,
            (Self::Add(mut terms), Self::Add(rhs_terms)) => {
                terms.extend(rhs_terms);
                Self::Add(terms)
            },
            (Self::Add(mut terms), other) | (other, Self::Add(mut terms)) => {
                terms.push(other);
                Self::Add(terms)
            },
            (lhs, rhs) => Self::Add(vec![lhs, rhs]),
        }
    }
}

/// Adds two [`Expr`]s together. The behavior is the same as [`Add`].
impl AddAssign for Expr {
    fn add_assign(&mut self, rhs: Self) {
        let lhs = mem::replace(self, Self::Add(Vec::new()));
        *self = lhs + rhs;
    }
}

/// Multiplies two [`Expr`]s together. No simplification is done, except for the case where the
/// operands are a mix of [`Primary`] and / or [`Expr::Mul`], in which case both are combined in
/// one list of factors (flattening).
impl Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs * rhs,
            (Self::Mul(mut factors), Self::Mul(rhs_factors)) => {
                factors.extend(rhs_factors);
                Self::Mul(factors)
            },
            (Self::Mul(mut factors), other) => {
                factors.push(other);
                Self::Mul(factors)
            },
            (other, Self::Mul(mut factors)) => {
                factors.insert(0, other);
                Self::Mul(factors)
            },
            (lhs, rhs) => Self::Mul(vec![lhs, rhs]),
        }
    }
}

/// Multiplies two [`Expr`]s together. The behavior is the same as [`Mul`].
impl MulAssign for Expr {
    fn mul_assign(&mut self, rhs: Self) {
        let lhs = mem::replace(self, Self::Mul(Vec::new()));
        *self = lhs * rhs;
    }
}

/// Negates the expression. Numbers are negated directly, a product drops an existing `-1` factor,
/// and anything else is multiplied by `-1`.
impl Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Primary(Primary::Integer(int)) if int.checked_neg().is_some() => Self::int(-int),
            Self::Primary(Primary::Float(float)) => Self::float(-float),
            Self::Mul(mut factors) => {
                match factors.iter().position(|factor| factor.as_integer() == Some(-1)) {
                    Some(idx) => {
                        factors.remove(idx);
                        Self::Mul(factors).downgrade()
                    },
                    None => Self::int(-1) * Self::Mul(factors),
                }
            },
            other => Self::int(-1) * other,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use plot_parser::{parser::parse_expr, Expr as AstExpr};
    use super::*;

    fn sym(text: &str) -> Expr {
        let ast: AstExpr = parse_expr(text).unwrap();
        Expr::from(ast)
    }

    #[test]
    fn flatten_sum() {
        assert_eq!(sym("x + (pi + E)"), Expr::Add(vec![
            Expr::symbol("x"),
            Expr::symbol("pi"),
            Expr::symbol("e"),
        ]));
    }

    #[test]
    fn flatten_product_and_fraction() {
        assert_eq!(sym("2x / (x + 1)"), Expr::Mul(vec![
            Expr::int(2),
            Expr::symbol("x"),
            Expr::Add(vec![Expr::symbol("x"), Expr::int(1)]).recip(),
        ]));
    }

    #[test]
    fn subtraction_is_negated_addition() {
        assert_eq!(sym("x - 3"), Expr::Add(vec![Expr::symbol("x"), Expr::int(-3)]));
        assert_eq!(sym("-x^2"), Expr::Mul(vec![
            Expr::int(-1),
            Expr::symbol("x").pow(Expr::int(2)),
        ]));
    }

    #[test]
    fn strict_equality_ignores_order() {
        assert_eq!(sym("x * sin(x) + 1"), sym("1 + sin(x)x"));
        assert_ne!(sym("x * x * y"), sym("x * y * y"));
    }

    #[test]
    fn display() {
        assert_eq!(sym("x - 3").to_string(), "x - 3");
        assert_eq!(sym("-x^2 + 2x").to_string(), "-x^2 + 2 * x");
        assert_eq!(sym("x^3 / 3").to_string(), "x^3 / 3");
        assert_eq!(sym("1 / (x + 1)").to_string(), "1 / (x + 1)");
        assert_eq!(sym("sin(x) / (x * y^2)").to_string(), "sin(x) / (x * y^2)");
        assert_eq!(sym("(-2)^x").to_string(), "(-2)^x");
        assert_eq!(sym("0.5 * 2.").to_string(), "1.0");
    }

    #[test]
    fn double_negation() {
        assert_eq!(sym("--x"), Expr::symbol("x"));
        assert_eq!(sym("--x").to_string(), "x");
        assert_eq!(sym("---x").to_string(), "-x");
        assert_eq!(sym("y - -x").to_string(), "y + x");
        assert_eq!(
            Expr::Mul(vec![Expr::int(-1), Expr::int(-1), Expr::symbol("x")]).to_string(),
            "x",
        );
    }

    #[test]
    fn substitution() {
        let expr = sym("sin(x) + x^2").substitute("x", &sym("2y"));
        assert_eq!(expr, sym("sin(2y) + (2y)^2"));
    }

    #[test]
    fn contains_symbol() {
        assert!(sym("2 + sin(3x)").contains_symbol("x"));
        assert!(!sym("2 + sin(3pi)").contains_symbol("x"));
    }
}
