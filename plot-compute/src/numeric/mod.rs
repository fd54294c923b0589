//! Compilation of symbolic expressions into vectorized numeric functions.
//!
//! [`compile`] lowers an expression to a flat program for a small column machine (see
//! [`Instruction`]). The compiled program evaluates an entire [`Grid`] in one call: each
//! instruction operates on a whole column of values, so there is no per-point interpretation
//! overhead besides the arithmetic itself.
//!
//! Evaluation never fails at runtime. Points outside a function's domain produce `NaN` or
//! infinities, and points where the value is complex are replaced by `NaN` and flagged in the
//! resulting [`NumericArray`].
//!
//! ```
//! use plot_compute::{grid::Grid, numeric::compile, symbolic::SymExpr};
//! use plot_parser::SymbolTable;
//!
//! let expr = SymExpr::symbol("x").sqrt();
//! let compiled = compile(&expr, SymbolTable::CURVE).unwrap();
//! let result = compiled.eval(&Grid::line(-4.0, 4.0, 3).unwrap()).unwrap();
//!
//! assert!(result.values()[0].is_nan());
//! assert!(result.is_complex(0));
//! assert_eq!(&result.values()[1..], &[0.0, 2.0]);
//! ```

pub mod builtin;
pub mod compiler;
pub mod instruction;

use crate::{
    error::GridArity,
    grid::{Grid, NumericArray, Shape},
    symbolic::expr::SymExpr,
};
use builtin::real;
use compiler::Compiler;
pub use instruction::Instruction;
use num_complex::Complex64;
use plot_error::Error;
use plot_parser::SymbolTable;

/// The default relative tolerance below which the imaginary part of a value is ignored.
pub const DEFAULT_COMPLEX_TOLERANCE: f64 = 1e-12;

/// Compiles the expression into a numeric function of the variables of the table.
///
/// Returns an error if the expression contains a symbol that is neither a variable of the table
/// nor a known constant, or a function the column machine cannot evaluate.
pub fn compile(expr: &SymExpr, table: SymbolTable) -> Result<CompiledExpr, Error> {
    let mut compiler = Compiler::new(table);
    compiler.compile(expr)?;
    let instructions = compiler.finish();
    log::trace!("compiled `{}` to {} instruction(s): {:?}", expr, instructions.len(), instructions);

    Ok(CompiledExpr {
        instructions,
        arity: table.arity(),
        tolerance: DEFAULT_COMPLEX_TOLERANCE,
    })
}

/// A compiled expression, ready to be evaluated over grids.
///
/// The program is immutable, so a compiled expression can be shared across threads and evaluated
/// concurrently.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledExpr {
    instructions: Vec<Instruction>,
    arity: usize,
    tolerance: f64,
}

impl CompiledExpr {
    /// The number of coordinate columns the expression expects.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// The compiled program.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// The relative tolerance used to decide whether a value is complex.
    pub fn complex_tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Sets the relative tolerance used to decide whether a value is complex. A value `z` is
    /// complex if `|Im z| > tolerance * max(1, |Re z|)`.
    pub fn with_complex_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Evaluates the expression at every point of the grid. The result has the shape of the grid.
    pub fn eval(&self, grid: &Grid) -> Result<NumericArray, Error> {
        Ok(self.eval_slices(&grid.columns())?.reshape(grid.shape()))
    }

    /// Evaluates the expression over coordinate columns, one per variable. All columns must have
    /// the same length.
    pub fn eval_slices(&self, columns: &[&[f64]]) -> Result<NumericArray, Error> {
        if columns.len() != self.arity {
            return Err(Error::unspanned(GridArity {
                expected: self.arity,
                given: columns.len(),
            }));
        }

        let len = columns.first().map_or(0, |column| column.len());
        if columns.iter().any(|column| column.len() != len) {
            return Err(Error::unspanned(GridArity {
                expected: self.arity,
                given: columns.len(),
            }));
        }

        let raw = self.run(columns, len)
            .unwrap_or_else(|| vec![real(f64::NAN); len]);
        let (values, complex) = raw.into_iter()
            .map(|z| self.classify(z))
            .unzip();
        Ok(NumericArray::new(values, complex, Shape::Line(len)))
    }

    /// Evaluates the expression at a single point. Returns `NaN` if the value is complex, or the
    /// point has the wrong number of coordinates.
    pub fn eval_point(&self, point: &[f64]) -> f64 {
        let columns = point.iter().map(std::slice::from_ref).collect::<Vec<_>>();
        self.eval_slices(&columns)
            .ok()
            .and_then(|array| array.values().first().copied())
            .unwrap_or(f64::NAN)
    }

    /// Splits a complex value into the plotted value, and whether it was discarded for being
    /// complex.
    fn classify(&self, z: Complex64) -> (f64, bool) {
        if z.im.is_nan() {
            (f64::NAN, false)
        } else if z.im.abs() > self.tolerance * z.re.abs().max(1.0) {
            (f64::NAN, true)
        } else {
            (z.re, false)
        }
    }

    /// Runs the program over the given columns. Returns [`None`] if the program is malformed.
    fn run(&self, columns: &[&[f64]], len: usize) -> Option<Vec<Complex64>> {
        let mut stack: Vec<Vec<Complex64>> = Vec::new();

        for instruction in &self.instructions {
            match *instruction {
                Instruction::LoadConst(value) => stack.push(vec![real(value); len]),
                Instruction::LoadVar(index) => {
                    let column = columns.get(index)?;
                    stack.push(column.iter().map(|&x| real(x)).collect());
                },
                Instruction::Add(n) => {
                    let operands = pop_n(&mut stack, n)?;
                    stack.push(fold(operands, builtin::add)?);
                },
                Instruction::Mul(n) => {
                    let operands = pop_n(&mut stack, n)?;
                    stack.push(fold(operands, builtin::mul)?);
                },
                Instruction::Pow => {
                    let exp = stack.pop()?;
                    let mut base = stack.pop()?;
                    for (b, e) in base.iter_mut().zip(exp) {
                        *b = builtin::pow(*b, e);
                    }
                    stack.push(base);
                },
                Instruction::Call(func, argc) => {
                    let args = pop_n(&mut stack, argc)?;
                    let mut buf = Vec::with_capacity(argc);
                    let result = (0..len)
                        .map(|i| {
                            buf.clear();
                            buf.extend(args.iter().map(|arg| arg[i]));
                            builtin::eval(func, &buf)
                        })
                        .collect();
                    stack.push(result);
                },
            }
        }

        match (stack.pop(), stack.is_empty()) {
            (Some(result), true) => Some(result),
            _ => None,
        }
    }
}

/// Pops the top `n` columns of the stack, in push order.
fn pop_n(stack: &mut Vec<Vec<Complex64>>, n: usize) -> Option<Vec<Vec<Complex64>>> {
    let start = stack.len().checked_sub(n)?;
    Some(stack.split_off(start))
}

/// Combines columns elementwise with the given operation.
fn fold(
    operands: Vec<Vec<Complex64>>,
    op: fn(Complex64, Complex64) -> Complex64,
) -> Option<Vec<Complex64>> {
    let mut operands = operands.into_iter();
    let mut acc = operands.next()?;
    for operand in operands {
        for (a, b) in acc.iter_mut().zip(operand) {
            *a = op(*a, b);
        }
    }
    Some(acc)
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use plot_parser::parser::parse_expr;
    use pretty_assertions::assert_eq;
    use super::*;

    fn compiled(text: &str, table: SymbolTable) -> CompiledExpr {
        compile(&SymExpr::from(parse_expr(text).unwrap()), table).unwrap()
    }

    #[test]
    fn polynomial_over_line() {
        let f = compiled("x^2 - 2x + 1", SymbolTable::CURVE);
        let result = f.eval(&Grid::line(-1.0, 3.0, 5).unwrap()).unwrap();
        assert_eq!(result.values(), &[4.0, 1.0, 0.0, 1.0, 4.0]);
        assert_eq!(result.shape(), Shape::Line(5));
    }

    #[test]
    fn surface_over_mesh() {
        let f = compiled("x + 10y", SymbolTable::SURFACE);
        let grid = Grid::from_axes(vec![1.0, 2.0, 3.0], vec![0.0, 1.0]).unwrap();
        let result = f.eval(&grid).unwrap();
        assert_eq!(result.shape(), Shape::Mesh { rows: 2, cols: 3 });
        assert_eq!(result.rows(), vec![&[1.0, 2.0, 3.0][..], &[11.0, 12.0, 13.0][..]]);
    }

    #[test]
    fn domain_errors_are_non_finite() {
        let f = compiled("1 / x", SymbolTable::CURVE);
        let result = f.eval(&Grid::line(-1.0, 1.0, 3).unwrap()).unwrap();
        assert_eq!(result.values()[0], -1.0);
        assert!(result.values()[1].is_infinite());
        assert!(!result.is_complex(1));

        let f = compiled("ln(x)", SymbolTable::CURVE);
        assert_eq!(f.eval_point(&[0.0]), f64::NEG_INFINITY);
    }

    #[test]
    fn complex_values_are_discarded() {
        let f = compiled("sqrt(x)", SymbolTable::CURVE);
        let result = f.eval(&Grid::line(-1.0, 1.0, 3).unwrap()).unwrap();
        assert!(result.values()[0].is_nan());
        assert_eq!(result.complex_mask(), &[true, false, false]);

        // the imaginary parts cancel
        let f = compiled("sqrt(x) * sqrt(x)", SymbolTable::CURVE);
        let value = f.eval_point(&[-4.0]);
        assert_float_absolute_eq!(value, -4.0, 1e-9);
    }

    #[test]
    fn real_roots_of_negative_numbers() {
        let f = compiled("cbrt(x) + x^3", SymbolTable::CURVE);
        assert_eq!(f.eval_point(&[-8.0]), -514.0);

        let f = compiled("x^(1/3)", SymbolTable::CURVE);
        assert!(f.eval_point(&[-8.0]).is_nan());
    }

    #[test]
    fn constants_and_logs() {
        let f = compiled("log(x, 2) + log10(100) + pi - pi", SymbolTable::CURVE);
        assert_float_absolute_eq!(f.eval_point(&[8.0]), 5.0, 1e-12);
    }

    #[test]
    fn arity_mismatch() {
        let f = compiled("x", SymbolTable::CURVE);
        let grid = Grid::from_axes(vec![1.0], vec![1.0]).unwrap();
        let err = f.eval(&grid).unwrap_err();
        assert!(err.is::<GridArity>());
        assert!(f.eval_point(&[1.0, 2.0]).is_nan());
    }

    #[test]
    fn shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CompiledExpr>();
    }
}
