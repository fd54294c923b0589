use crate::{
    numeric::{self, CompiledExpr},
    symbolic::{derivative, integral, simplify, SymExpr},
};
use plot_error::Error;
use plot_parser::{SymbolTable, Variable};
use std::fmt;

/// A validated symbolic expression over a [`SymbolTable`].
///
/// Expressions are immutable. The derivative and integral of an expression are new, independent
/// expressions over the same table.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    expr: SymExpr,
    table: SymbolTable,
}

impl Expression {
    /// Parses and validates the given text against the symbol table.
    pub fn parse(text: &str, table: SymbolTable) -> Result<Self, Error> {
        let ast = plot_parser::parse(text, table)?;
        Ok(Self::new(SymExpr::from(ast), table))
    }

    /// Wraps a symbolic expression. The expression is not checked against the table; names it
    /// cannot resolve are reported when it is compiled.
    pub fn new(expr: SymExpr, table: SymbolTable) -> Self {
        Self { expr, table }
    }

    /// The symbolic form of the expression.
    pub fn expr(&self) -> &SymExpr {
        &self.expr
    }

    /// The symbol table of the expression.
    pub fn table(&self) -> SymbolTable {
        self.table
    }

    /// The simplified first derivative with respect to the given variable.
    pub fn derivative(&self, var: Variable) -> Result<Self, Error> {
        let derivative = derivative(&self.expr, var.name())?;
        Ok(Self::new(simplify(&derivative), self.table))
    }

    /// An antiderivative with respect to the given variable, with an integration constant of 0.
    pub fn integral(&self, var: Variable) -> Result<Self, Error> {
        self.integral_with_fuel(var, integral::DEFAULT_FUEL)
    }

    /// An antiderivative with respect to the given variable, making at most `fuel` rule
    /// applications.
    pub fn integral_with_fuel(&self, var: Variable, fuel: usize) -> Result<Self, Error> {
        let integral = integral::integral_with_fuel(&self.expr, var.name(), fuel)?;
        Ok(Self::new(integral, self.table))
    }

    /// Compiles the expression into a numeric function of the table's variables.
    pub fn compile(&self) -> Result<CompiledExpr, Error> {
        numeric::compile(&self.expr, self.table)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.expr)
    }
}

#[cfg(test)]
mod tests {
    use plot_error::Category;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn parse_is_deterministic() {
        let a = Expression::parse("2x^2 + sin(x) / 3", SymbolTable::CURVE).unwrap();
        let b = Expression::parse("2x^2 + sin(x) / 3", SymbolTable::CURVE).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn transforms_share_the_table() {
        let expr = Expression::parse("x^2 * y", SymbolTable::SURFACE).unwrap();
        let dx = expr.derivative(Variable::X).unwrap();
        let dy = expr.derivative(Variable::Y).unwrap();
        assert_eq!(dx.table(), SymbolTable::SURFACE);
        assert_eq!(dy.to_string(), "x^2");
        assert_eq!(dx.compile().unwrap().eval_point(&[3.0, 2.0]), 12.0);
    }

    #[test]
    fn integral_of_derivative() {
        let expr = Expression::parse("x^3", SymbolTable::CURVE).unwrap();
        let round_trip = expr.derivative(Variable::X).unwrap().integral(Variable::X).unwrap();
        assert_eq!(round_trip.to_string(), "x^3");
    }

    #[test]
    fn scientific_notation() {
        let expr = Expression::parse("1e-3*x", SymbolTable::CURVE).unwrap();
        assert!(!expr.to_string().contains('e'));
        assert_eq!(expr.compile().unwrap().eval_point(&[2.0]), 0.002);
    }

    #[test]
    fn errors() {
        let err = Expression::parse("   ", SymbolTable::CURVE).unwrap_err();
        assert_eq!(err.category(), Category::Parse);

        let err = Expression::parse("exp(x^2)", SymbolTable::CURVE).unwrap()
            .integral(Variable::X)
            .unwrap_err();
        assert_eq!(err.category(), Category::NoClosedForm);
    }
}
