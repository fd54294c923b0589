//! The closed vocabulary of functions and constants an expression may use.

use std::{f64::consts, fmt, ops::RangeInclusive};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Generates the [`Func`] enum along with its name table and argument counts.
macro_rules! functions {
    ($($variant:ident => $name:literal, $min:literal..=$max:literal;)*) => {
        /// A function in the allowed vocabulary.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        pub enum Func {
            $($variant,)*
        }

        impl Func {
            /// Every function in the vocabulary.
            pub const ALL: &'static [Func] = &[$(Func::$variant,)*];

            /// The name of the function as it is written in expressions.
            pub fn name(self) -> &'static str {
                match self {
                    $(Func::$variant => $name,)*
                }
            }

            /// The number of arguments the function accepts.
            pub fn arity(self) -> RangeInclusive<usize> {
                match self {
                    $(Func::$variant => $min..=$max,)*
                }
            }
        }
    };
}

functions! {
    Sin => "sin", 1..=1;
    Cos => "cos", 1..=1;
    Tan => "tan", 1..=1;
    Cot => "cot", 1..=1;
    Sec => "sec", 1..=1;
    Csc => "csc", 1..=1;
    Asin => "asin", 1..=1;
    Acos => "acos", 1..=1;
    Atan => "atan", 1..=1;
    Sinh => "sinh", 1..=1;
    Cosh => "cosh", 1..=1;
    Tanh => "tanh", 1..=1;
    Asinh => "asinh", 1..=1;
    Acosh => "acosh", 1..=1;
    Atanh => "atanh", 1..=1;
    Exp => "exp", 1..=1;
    Ln => "ln", 1..=1;
    Log => "log", 1..=2;
    Log10 => "log10", 1..=1;
    Log2 => "log2", 1..=1;
    Sqrt => "sqrt", 1..=1;
    Cbrt => "cbrt", 1..=1;
    Abs => "abs", 1..=1;
    Sign => "sign", 1..=1;
}

impl Func {
    /// Returns the function with the given name, if it is in the vocabulary.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|func| func.name() == name)
    }

    /// Describes the accepted argument count, e.g. `1` or `1 or 2`.
    pub fn arity_description(self) -> String {
        let arity = self.arity();
        if arity.start() == arity.end() {
            arity.start().to_string()
        } else {
            format!("{} or {}", arity.start(), arity.end())
        }
    }
}

impl fmt::Display for Func {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named constant in the allowed vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Constant {
    /// The ratio of a circle's circumference to its diameter.
    Pi,

    /// Euler's number, the base of the natural logarithm.
    E,

    /// The ratio of a circle's circumference to its radius.
    Tau,

    /// The golden ratio.
    Phi,
}

impl Constant {
    /// Every constant in the vocabulary.
    pub const ALL: &'static [Constant] = &[Constant::Pi, Constant::E, Constant::Tau, Constant::Phi];

    /// The canonical name of the constant.
    pub fn name(self) -> &'static str {
        match self {
            Constant::Pi => "pi",
            Constant::E => "e",
            Constant::Tau => "tau",
            Constant::Phi => "phi",
        }
    }

    /// Returns the constant with the given name. `E` is accepted as an alias for `e`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "E" => Some(Constant::E),
            _ => Self::ALL.iter().copied().find(|c| c.name() == name),
        }
    }

    /// The numeric value of the constant.
    pub fn value(self) -> f64 {
        match self {
            Constant::Pi => consts::PI,
            Constant::E => consts::E,
            Constant::Tau => consts::TAU,
            Constant::Phi => 1.618_033_988_749_895,
        }
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup() {
        assert_eq!(Func::from_name("log10"), Some(Func::Log10));
        assert_eq!(Func::from_name("eval"), None);
        assert_eq!(Func::Log.arity(), 1..=2);
        assert_eq!(Func::Log.arity_description(), "1 or 2");
        assert_eq!(Constant::from_name("E"), Some(Constant::E));
        assert_eq!(Constant::from_name("i"), None);
    }

    #[test]
    fn names_are_unique() {
        for (i, a) in Func::ALL.iter().enumerate() {
            for b in &Func::ALL[i + 1..] {
                assert_ne!(a.name(), b.name());
            }
            assert!(Constant::from_name(a.name()).is_none());
        }
    }
}
