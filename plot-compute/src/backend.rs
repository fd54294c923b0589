//! The symbolic engine behind the plotting pipeline, as a swappable capability.

use crate::{
    expression::Expression,
    numeric::{CompiledExpr, DEFAULT_COMPLEX_TOLERANCE},
    symbolic::integral::DEFAULT_FUEL,
};
use plot_error::Error;
use plot_parser::{SymbolTable, Variable};

/// The operations the plotting pipeline needs from a symbolic engine.
///
/// Implementations must be pure: the same inputs always produce the same outputs, and nothing is
/// shared between calls.
pub trait Backend: Send + Sync {
    /// Parses and validates the text against the symbol table.
    fn parse(&self, text: &str, table: SymbolTable) -> Result<Expression, Error>;

    /// Returns the first derivative of the expression.
    fn differentiate(&self, expr: &Expression, var: Variable) -> Result<Expression, Error>;

    /// Returns an antiderivative of the expression, or a
    /// [`NoClosedForm`](crate::error::NoClosedForm) error.
    fn integrate(&self, expr: &Expression, var: Variable) -> Result<Expression, Error>;

    /// Compiles the expression into a vectorized numeric function.
    fn compile(&self, expr: &Expression) -> Result<CompiledExpr, Error>;
}

/// The backend implemented by this crate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NativeBackend {
    /// The number of rule applications an integration may make.
    ///
    /// The default value is [`DEFAULT_FUEL`].
    pub integration_fuel: usize,

    /// The relative tolerance below which the imaginary part of a value is ignored.
    ///
    /// The default value is [`DEFAULT_COMPLEX_TOLERANCE`].
    pub complex_tolerance: f64,
}

impl Default for NativeBackend {
    fn default() -> Self {
        Self {
            integration_fuel: DEFAULT_FUEL,
            complex_tolerance: DEFAULT_COMPLEX_TOLERANCE,
        }
    }
}

impl NativeBackend {
    /// Sets the number of rule applications an integration may make.
    pub fn integration_fuel(mut self, fuel: usize) -> Self {
        self.integration_fuel = fuel;
        self
    }

    /// Sets the relative tolerance used to decide whether a value is complex.
    pub fn complex_tolerance(mut self, tolerance: f64) -> Self {
        self.complex_tolerance = tolerance;
        self
    }
}

impl Backend for NativeBackend {
    fn parse(&self, text: &str, table: SymbolTable) -> Result<Expression, Error> {
        Expression::parse(text, table)
    }

    fn differentiate(&self, expr: &Expression, var: Variable) -> Result<Expression, Error> {
        expr.derivative(var)
    }

    fn integrate(&self, expr: &Expression, var: Variable) -> Result<Expression, Error> {
        expr.integral_with_fuel(var, self.integration_fuel)
    }

    fn compile(&self, expr: &Expression) -> Result<CompiledExpr, Error> {
        Ok(expr.compile()?.with_complex_tolerance(self.complex_tolerance))
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use super::*;

    #[test]
    fn native_pipeline() {
        let backend = NativeBackend::default();
        let expr = backend.parse("x * cos(x)", SymbolTable::CURVE).unwrap();
        let integral = backend.integrate(&expr, Variable::X).unwrap();
        let derivative = backend.differentiate(&integral, Variable::X).unwrap();
        let compiled = backend.compile(&derivative).unwrap();
        for x in [-1.0, 0.5, 2.0] {
            assert_float_absolute_eq!(compiled.eval_point(&[x]), x * f64::cos(x), 1e-9);
        }
    }

    #[test]
    fn configured() {
        let backend = NativeBackend::default().complex_tolerance(1e-6).integration_fuel(1);
        let expr = backend.parse("sqrt(x)", SymbolTable::CURVE).unwrap();
        assert_eq!(backend.compile(&expr).unwrap().complex_tolerance(), 1e-6);
        assert!(backend.integrate(&backend.parse("x * exp(x)", SymbolTable::CURVE).unwrap(), Variable::X).is_err());
    }
}
