//! Exact rational arithmetic used to fold numbers, falling back to floating-point when a result
//! does not fit in an [`i64`].

use crate::symbolic::expr::{Primary, SymExpr};

/// Greatest common divisor of two unsigned integers.
fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// A number that can be folded at simplification time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Number {
    /// An exact fraction `numerator / denominator`, in lowest terms with a positive denominator.
    Rational(i64, i64),

    /// A finite floating-point number.
    Float(f64),
}

impl Number {
    pub const ZERO: Self = Self::Rational(0, 1);
    pub const ONE: Self = Self::Rational(1, 1);

    /// Creates a reduced fraction. Returns [`None`] if the denominator is zero.
    pub fn rational(numerator: i64, denominator: i64) -> Option<Self> {
        if denominator == 0 {
            return None;
        }

        let divisor = i64::try_from(gcd(numerator.unsigned_abs(), denominator.unsigned_abs())).ok()?;
        let (numerator, denominator) = (numerator / divisor, denominator / divisor);
        if denominator < 0 {
            Some(Self::Rational(numerator.checked_neg()?, denominator.checked_neg()?))
        } else {
            Some(Self::Rational(numerator, denominator))
        }
    }

    /// Creates a floating-point number. Returns [`None`] if it is not finite.
    pub fn float(value: f64) -> Option<Self> {
        value.is_finite().then_some(Self::Float(value))
    }

    /// Extracts a number from an expression made only of numbers: integers, finite floats,
    /// integer powers of those, and products of those.
    pub fn from_expr(expr: &SymExpr) -> Option<Self> {
        match expr {
            SymExpr::Primary(Primary::Integer(int)) => Some(Self::Rational(*int, 1)),
            SymExpr::Primary(Primary::Float(float)) => Self::float(*float),
            SymExpr::Exp(base, exp) => Self::from_expr(base)?.powi(exp.as_integer()?),
            SymExpr::Mul(factors) => factors.iter()
                .try_fold(Self::ONE, |acc, factor| acc.mul(Self::from_expr(factor)?)),
            _ => None,
        }
    }

    /// Converts the number back into its canonical expression form.
    pub fn to_expr(self) -> SymExpr {
        match self {
            Self::Rational(numerator, 1) => SymExpr::int(numerator),
            Self::Rational(1, denominator) => SymExpr::int(denominator).recip(),
            Self::Rational(numerator, denominator) => SymExpr::Mul(vec![
                SymExpr::int(numerator),
                SymExpr::int(denominator).recip(),
            ]),
            Self::Float(float) => SymExpr::float(float),
        }
    }

    /// Returns the value of the number as an [`f64`].
    pub fn to_f64(self) -> f64 {
        match self {
            Self::Rational(numerator, denominator) => numerator as f64 / denominator as f64,
            Self::Float(float) => float,
        }
    }

    /// If the number is an integer, returns it.
    pub fn as_integer(self) -> Option<i64> {
        match self {
            Self::Rational(numerator, 1) => Some(numerator),
            _ => None,
        }
    }

    pub fn is_zero(self) -> bool {
        self.to_f64() == 0.0
    }

    pub fn is_one(self) -> bool {
        self.to_f64() == 1.0
    }

    pub fn is_negative(self) -> bool {
        self.to_f64() < 0.0
    }

    /// Adds two numbers, exactly if both are rational and the result fits.
    pub fn add(self, rhs: Self) -> Option<Self> {
        if let (Self::Rational(a, b), Self::Rational(c, d)) = (self, rhs) {
            let exact = a.checked_mul(d)
                .zip(c.checked_mul(b))
                .and_then(|(ad, cb)| ad.checked_add(cb))
                .zip(b.checked_mul(d))
                .and_then(|(numerator, denominator)| Self::rational(numerator, denominator));
            if exact.is_some() {
                return exact;
            }
        }
        Self::float(self.to_f64() + rhs.to_f64())
    }

    /// Multiplies two numbers, exactly if both are rational and the result fits.
    pub fn mul(self, rhs: Self) -> Option<Self> {
        if let (Self::Rational(a, b), Self::Rational(c, d)) = (self, rhs) {
            let exact = a.checked_mul(c)
                .zip(b.checked_mul(d))
                .and_then(|(numerator, denominator)| Self::rational(numerator, denominator));
            if exact.is_some() {
                return exact;
            }
        }
        Self::float(self.to_f64() * rhs.to_f64())
    }

    /// Negates the number.
    pub fn neg(self) -> Option<Self> {
        self.mul(Self::Rational(-1, 1))
    }

    /// Raises the number to an integer power. Returns [`None`] for division by zero.
    pub fn powi(self, exp: i64) -> Option<Self> {
        match self {
            Self::Rational(numerator, denominator) if exp < 0 => {
                Self::rational(denominator, numerator)?.powi(exp.checked_neg()?)
            },
            Self::Rational(numerator, denominator) => {
                let exact = u32::try_from(exp).ok()
                    .and_then(|exp| numerator.checked_pow(exp).zip(denominator.checked_pow(exp)))
                    .and_then(|(numerator, denominator)| Self::rational(numerator, denominator));
                exact.or_else(|| Self::float(self.to_f64().powf(exp as f64)))
            },
            Self::Float(float) => Self::float(float.powf(exp as f64)),
        }
    }

    /// Raises the number to a numeric power. Results that would not be real are not folded, nor
    /// are rational roots of rational numbers (`2^(1/2)` stays exact).
    pub fn pow(self, exp: Self) -> Option<Self> {
        if let Some(exp) = exp.as_integer() {
            return self.powi(exp);
        }

        match (self, exp) {
            (Self::Rational(..), Self::Rational(..)) => None,
            (base, exp) if !base.is_negative() => Self::float(base.to_f64().powf(exp.to_f64())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn rational_arithmetic() {
        let half = Number::rational(1, 2).unwrap();
        let third = Number::rational(2, -6).unwrap();
        assert_eq!(third, Number::Rational(-1, 3));
        assert_eq!(half.add(third), Some(Number::Rational(1, 6)));
        assert_eq!(half.mul(Number::Rational(4, 1)), Some(Number::Rational(2, 1)));
        assert_eq!(half.powi(-3), Some(Number::Rational(8, 1)));
        assert_eq!(Number::ZERO.powi(-1), None);
    }

    #[test]
    fn overflow_falls_back_to_float() {
        let big = Number::Rational(i64::MAX, 1);
        assert_eq!(big.mul(Number::Rational(2, 1)), Some(Number::Float(i64::MAX as f64 * 2.0)));
    }

    #[test]
    fn roots() {
        assert_eq!(Number::Rational(2, 1).pow(Number::Rational(1, 2)), None);
        assert_eq!(Number::Float(4.0).pow(Number::Rational(1, 2)), Some(Number::Float(2.0)));
        assert_eq!(Number::Float(-4.0).pow(Number::Rational(1, 2)), None);
    }

    #[test]
    fn expression_form() {
        let expr = SymExpr::Mul(vec![SymExpr::int(6), SymExpr::int(4).recip()]);
        assert_eq!(Number::from_expr(&expr), Some(Number::Rational(3, 2)));
        assert_eq!(Number::Rational(3, 2).to_expr().to_string(), "3 / 2");
        assert_eq!(Number::from_expr(&SymExpr::symbol("pi")), None);
    }
}
