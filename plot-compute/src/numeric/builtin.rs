//! Elementwise implementations of the functions in the vocabulary.
//!
//! Every function is evaluated in complex arithmetic, with a fast path: a real argument inside the
//! function's real domain is evaluated with [`f64`] math, so real results are exact rather than
//! the real part of a complex computation (`cbrt(-8)` is `-2`, not a complex cube root).

use num_complex::Complex64;
use once_cell::sync::Lazy;
use plot_parser::Func;
use std::{collections::HashMap, f64::consts::{LN_10, LN_2}};

/// Name lookup for every function the column machine can evaluate.
static BUILTINS: Lazy<HashMap<&'static str, Func>> = Lazy::new(|| {
    Func::ALL.iter().map(|&func| (func.name(), func)).collect()
});

/// Returns the function with the given name, if it can be evaluated numerically.
pub fn lookup(name: &str) -> Option<Func> {
    BUILTINS.get(name).copied()
}

/// Returns the names of every function that can be evaluated numerically.
pub fn names() -> impl Iterator<Item = &'static str> {
    Func::ALL.iter().map(|func| func.name())
}

/// Wraps a real number.
pub(crate) fn real(x: f64) -> Complex64 {
    Complex64::new(x, 0.0)
}

/// The sign function, with `sign(0) = 0`.
fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        x
    }
}

/// Evaluates a unary function at a real point. Returns [`None`] if the point is outside the real
/// domain of the function.
pub fn eval_real(func: Func, x: f64) -> Option<f64> {
    let y = match func {
        Func::Sin => x.sin(),
        Func::Cos => x.cos(),
        Func::Tan => x.tan(),
        Func::Cot => 1.0 / x.tan(),
        Func::Sec => 1.0 / x.cos(),
        Func::Csc => 1.0 / x.sin(),
        Func::Asin if (-1.0..=1.0).contains(&x) => x.asin(),
        Func::Acos if (-1.0..=1.0).contains(&x) => x.acos(),
        Func::Atan => x.atan(),
        Func::Sinh => x.sinh(),
        Func::Cosh => x.cosh(),
        Func::Tanh => x.tanh(),
        Func::Asinh => x.asinh(),
        Func::Acosh if x >= 1.0 => x.acosh(),
        Func::Atanh if (-1.0..=1.0).contains(&x) => x.atanh(),
        Func::Exp => x.exp(),
        Func::Ln | Func::Log if x >= 0.0 => x.ln(),
        Func::Log10 if x >= 0.0 => x.log10(),
        Func::Log2 if x >= 0.0 => x.log2(),
        Func::Sqrt if x >= 0.0 => x.sqrt(),
        Func::Cbrt => x.cbrt(),
        Func::Abs => x.abs(),
        Func::Sign => sign(x),
        _ => return None,
    };
    Some(y)
}

/// Evaluates a unary function at a complex point.
fn eval_complex(func: Func, z: Complex64) -> Complex64 {
    let one = real(1.0);
    match func {
        Func::Sin => z.sin(),
        Func::Cos => z.cos(),
        Func::Tan => z.tan(),
        Func::Cot => one / z.tan(),
        Func::Sec => one / z.cos(),
        Func::Csc => one / z.sin(),
        Func::Asin => z.asin(),
        Func::Acos => z.acos(),
        Func::Atan => z.atan(),
        Func::Sinh => z.sinh(),
        Func::Cosh => z.cosh(),
        Func::Tanh => z.tanh(),
        Func::Asinh => z.asinh(),
        Func::Acosh => z.acosh(),
        Func::Atanh => z.atanh(),
        Func::Exp => z.exp(),
        Func::Ln | Func::Log => z.ln(),
        Func::Log10 => z.ln() / LN_10,
        Func::Log2 => z.ln() / LN_2,
        Func::Sqrt => z.sqrt(),
        Func::Cbrt => z.powf(1.0 / 3.0),
        Func::Abs => real(z.norm()),
        Func::Sign => {
            let norm = z.norm();
            if norm == 0.0 { z } else { z / norm }
        },
    }
}

/// Evaluates a unary function, using real math when possible.
fn eval_unary(func: Func, z: Complex64) -> Complex64 {
    if z.im == 0.0 {
        if let Some(y) = eval_real(func, z.re) {
            return real(y);
        }
    }
    eval_complex(func, z)
}

/// Evaluates a function with the given arguments. The argument count must be accepted by the
/// function; otherwise the result is `NaN`.
pub fn eval(func: Func, args: &[Complex64]) -> Complex64 {
    match (func, args) {
        (Func::Log, [z, base]) => div(eval_unary(Func::Ln, *z), eval_unary(Func::Ln, *base)),
        (_, [z]) => eval_unary(func, *z),
        _ => real(f64::NAN),
    }
}

/// `a + b`
pub fn add(a: Complex64, b: Complex64) -> Complex64 {
    if a.im == 0.0 && b.im == 0.0 {
        real(a.re + b.re)
    } else {
        a + b
    }
}

/// `a * b`
pub fn mul(a: Complex64, b: Complex64) -> Complex64 {
    if a.im == 0.0 && b.im == 0.0 {
        real(a.re * b.re)
    } else {
        a * b
    }
}

/// `a / b`
pub fn div(a: Complex64, b: Complex64) -> Complex64 {
    if a.im == 0.0 && b.im == 0.0 {
        real(a.re / b.re)
    } else {
        a / b
    }
}

/// `base ^ exp`. Negative real bases with non-integer exponents produce the principal complex
/// value.
pub fn pow(base: Complex64, exp: Complex64) -> Complex64 {
    if base.im == 0.0 && exp.im == 0.0 {
        let (b, e) = (base.re, exp.re);
        if b >= 0.0 || b.is_nan() || !e.is_finite() || e.fract() == 0.0 {
            return real(b.powf(e));
        }
    }

    if base.re == 0.0 && base.im == 0.0 {
        return if exp.re > 0.0 { real(0.0) } else { real(f64::NAN) };
    }
    base.powc(exp)
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use super::*;

    #[test]
    fn real_fast_path() {
        assert_eq!(eval(Func::Cbrt, &[real(-8.0)]), real(-2.0));
        assert_eq!(pow(real(-2.0), real(2.0)), real(4.0));
        assert_eq!(pow(real(-2.0), real(3.0)), real(-8.0));
        assert_eq!(eval(Func::Sign, &[real(0.0)]), real(0.0));
        assert_eq!(eval(Func::Ln, &[real(0.0)]), real(f64::NEG_INFINITY));
    }

    #[test]
    fn complex_results() {
        let z = eval(Func::Sqrt, &[real(-4.0)]);
        assert_float_absolute_eq!(z.re, 0.0, 1e-12);
        assert_float_absolute_eq!(z.im, 2.0, 1e-12);

        let z = eval(Func::Ln, &[real(-1.0)]);
        assert_float_absolute_eq!(z.im, std::f64::consts::PI, 1e-12);

        let z = pow(real(-8.0), real(0.5));
        assert!(z.im.abs() > 1.0);
    }

    #[test]
    fn log_with_base() {
        let z = eval(Func::Log, &[real(8.0), real(2.0)]);
        assert_float_absolute_eq!(z.re, 3.0, 1e-12);
        assert_eq!(z.im, 0.0);
    }

    #[test]
    fn lookup_names() {
        assert_eq!(lookup("atanh"), Some(Func::Atanh));
        assert_eq!(lookup("gamma"), None);
        assert_eq!(names().count(), Func::ALL.len());
    }
}
