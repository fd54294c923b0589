use plot_parser::Func;

/// Instructions of the column machine that evaluates compiled expressions.
///
/// Every instruction operates on whole columns of values at once: loading a variable pushes the
/// entire coordinate column of the grid, and arithmetic combines columns elementwise. The program
/// for an expression is its post-order traversal, so a well-formed program leaves exactly one
/// column on the stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Instruction {
    /// Push a column filled with a constant.
    LoadConst(f64),

    /// Push the coordinate column of the variable at the given index of the symbol table.
    LoadVar(usize),

    /// Pop the given number of columns and push their elementwise sum.
    Add(usize),

    /// Pop the given number of columns and push their elementwise product.
    Mul(usize),

    /// Pop the exponent, then the base, and push the elementwise power.
    Pow,

    /// Pop the given number of argument columns and push the elementwise result of the function.
    Call(Func, usize),
}

impl Instruction {
    /// The net change in stack depth caused by executing this instruction.
    pub fn stack_effect(&self) -> isize {
        match self {
            Self::LoadConst(_) | Self::LoadVar(_) => 1,
            Self::Add(n) | Self::Mul(n) | Self::Call(_, n) => 1 - *n as isize,
            Self::Pow => -1,
        }
    }
}
