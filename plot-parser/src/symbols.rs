//! The independent variables an expression may be written in terms of.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An independent variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Variable {
    /// The horizontal axis, `x`.
    X,

    /// The depth axis of a surface, `y`.
    Y,
}

impl Variable {
    /// All variables known to the plotter, in axis order.
    pub const ALL: &'static [Variable] = &[Variable::X, Variable::Y];

    /// The name of the variable as it is written in expressions.
    pub fn name(self) -> &'static str {
        match self {
            Variable::X => "x",
            Variable::Y => "y",
        }
    }

    /// Returns the variable with the given name, if any.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|var| var.name() == name)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An ordered, non-empty set of independent variables that an expression may reference.
///
/// Only two tables exist: [`SymbolTable::CURVE`] for plots of `f(x)`, and
/// [`SymbolTable::SURFACE`] for plots of `f(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolTable {
    symbols: &'static [Variable],
}

impl SymbolTable {
    /// The table for curves, containing only `x`.
    pub const CURVE: Self = Self { symbols: &[Variable::X] };

    /// The table for surfaces, containing `x` and `y`, in that order.
    pub const SURFACE: Self = Self { symbols: &[Variable::X, Variable::Y] };

    /// The variables in this table, in order.
    pub fn symbols(&self) -> &'static [Variable] {
        self.symbols
    }

    /// The number of variables in this table.
    pub fn arity(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true if the table contains the given variable.
    pub fn contains(&self, var: Variable) -> bool {
        self.symbols.contains(&var)
    }

    /// Returns the position of the given variable in the table.
    pub fn index_of(&self, var: Variable) -> Option<usize> {
        self.symbols.iter().position(|&v| v == var)
    }

    /// Returns the variable of this table with the given name.
    pub fn lookup(&self, name: &str) -> Option<Variable> {
        Variable::from_name(name).filter(|&var| self.contains(var))
    }
}

impl fmt::Display for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{")?;
        for (i, var) in self.symbols.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", var)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables() {
        assert_eq!(SymbolTable::CURVE.symbols(), &[Variable::X]);
        assert_eq!(SymbolTable::SURFACE.arity(), 2);
        assert_eq!(SymbolTable::SURFACE.index_of(Variable::Y), Some(1));
        assert_eq!(SymbolTable::CURVE.lookup("y"), None);
        assert_eq!(SymbolTable::SURFACE.lookup("y"), Some(Variable::Y));
        assert_eq!(SymbolTable::SURFACE.to_string(), "{x, y}");
    }
}
