//! Lowering of symbolic expressions to column-machine programs.

use crate::{
    error::{ArgumentCount, UnboundSymbol, UnknownFunction},
    numeric::{builtin, instruction::Instruction},
    symbolic::expr::{Primary, SymExpr},
};
use levenshtein::levenshtein;
use plot_error::Error;
use plot_parser::{Constant, SymbolTable};

/// Returns the names of numeric builtins that are a single edit away from `name`.
fn similar_functions(name: &str) -> Vec<String> {
    builtin::names()
        .filter(|candidate| levenshtein(candidate, name) < 2)
        .map(str::to_owned)
        .collect()
}

/// Compiles a symbolic expression into a list of [`Instruction`]s.
pub struct Compiler {
    /// The variables that may appear in the expression, in column order.
    table: SymbolTable,

    /// The program compiled so far.
    instructions: Vec<Instruction>,
}

impl Compiler {
    /// Creates a compiler for expressions over the given symbol table.
    pub fn new(table: SymbolTable) -> Self {
        Self { table, instructions: Vec::new() }
    }

    /// Consumes the compiler, returning the compiled program.
    pub fn finish(self) -> Vec<Instruction> {
        self.instructions
    }

    /// Compiles an expression, appending its instructions to the program.
    pub fn compile(&mut self, expr: &SymExpr) -> Result<(), Error> {
        match expr {
            SymExpr::Primary(primary) => self.compile_primary(primary),
            SymExpr::Add(terms) => self.compile_nary(terms, 0.0, Instruction::Add),
            SymExpr::Mul(factors) => self.compile_nary(factors, 1.0, Instruction::Mul),
            SymExpr::Exp(base, exp) => {
                self.compile(base)?;
                self.compile(exp)?;
                self.instructions.push(Instruction::Pow);
                Ok(())
            },
        }
    }

    /// Compiles an n-ary operation. An empty operation is its identity element.
    fn compile_nary(
        &mut self,
        operands: &[SymExpr],
        identity: f64,
        instruction: fn(usize) -> Instruction,
    ) -> Result<(), Error> {
        match operands {
            [] => self.instructions.push(Instruction::LoadConst(identity)),
            [single] => self.compile(single)?,
            _ => {
                for operand in operands {
                    self.compile(operand)?;
                }
                self.instructions.push(instruction(operands.len()));
            },
        }
        Ok(())
    }

    fn compile_primary(&mut self, primary: &Primary) -> Result<(), Error> {
        match primary {
            Primary::Integer(n) => self.instructions.push(Instruction::LoadConst(*n as f64)),
            Primary::Float(f) => self.instructions.push(Instruction::LoadConst(*f)),
            Primary::Symbol(name) => self.compile_symbol(name)?,
            Primary::Call(name, args) => self.compile_call(name, args)?,
        }
        Ok(())
    }

    /// Compiles a variable load, or inlines the value of a constant.
    fn compile_symbol(&mut self, name: &str) -> Result<(), Error> {
        if let Some(index) = self.table.lookup(name).and_then(|var| self.table.index_of(var)) {
            self.instructions.push(Instruction::LoadVar(index));
        } else if let Some(constant) = Constant::from_name(name) {
            self.instructions.push(Instruction::LoadConst(constant.value()));
        } else {
            return Err(Error::unspanned(UnboundSymbol {
                name: name.to_owned(),
                allowed: self.table.to_string(),
            }));
        }
        Ok(())
    }

    fn compile_call(&mut self, name: &str, args: &[SymExpr]) -> Result<(), Error> {
        let Some(func) = builtin::lookup(name) else {
            return Err(Error::unspanned(UnknownFunction {
                name: name.to_owned(),
                suggestions: similar_functions(name),
            }));
        };

        if !func.arity().contains(&args.len()) {
            return Err(Error::unspanned(ArgumentCount {
                name: name.to_owned(),
                given: args.len(),
            }));
        }

        for arg in args {
            self.compile(arg)?;
        }
        self.instructions.push(Instruction::Call(func, args.len()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use plot_error::Category;
    use plot_parser::Func;
    use pretty_assertions::assert_eq;
    use super::*;

    fn compile(expr: &SymExpr, table: SymbolTable) -> Result<Vec<Instruction>, Error> {
        let mut compiler = Compiler::new(table);
        compiler.compile(expr)?;
        Ok(compiler.finish())
    }

    #[test]
    fn program_is_post_order() {
        // 2 * sin(y) + x^pi
        let expr = SymExpr::Add(vec![
            SymExpr::Mul(vec![SymExpr::int(2), SymExpr::call("sin", vec![SymExpr::symbol("y")])]),
            SymExpr::symbol("x").pow(SymExpr::symbol("pi")),
        ]);
        assert_eq!(compile(&expr, SymbolTable::SURFACE).unwrap(), vec![
            Instruction::LoadConst(2.0),
            Instruction::LoadVar(1),
            Instruction::Call(Func::Sin, 1),
            Instruction::Mul(2),
            Instruction::LoadVar(0),
            Instruction::LoadConst(std::f64::consts::PI),
            Instruction::Pow,
            Instruction::Add(2),
        ]);
    }

    #[test]
    fn stack_balance() {
        let expr = SymExpr::Add(vec![
            SymExpr::call("log", vec![SymExpr::symbol("x"), SymExpr::int(2)]),
            SymExpr::int(1),
            SymExpr::symbol("x"),
        ]);
        let program = compile(&expr, SymbolTable::CURVE).unwrap();
        let depth: isize = program.iter().map(Instruction::stack_effect).sum();
        assert_eq!(depth, 1);
    }

    #[test]
    fn unbound_symbol() {
        let err = compile(&SymExpr::symbol("y"), SymbolTable::CURVE).unwrap_err();
        assert_eq!(err.category(), Category::Compilation);
        assert!(err.is::<UnboundSymbol>());
    }

    #[test]
    fn unknown_function() {
        let expr = SymExpr::call("sinc", vec![SymExpr::symbol("x")]);
        let err = compile(&expr, SymbolTable::CURVE).unwrap_err();
        assert_eq!(err.category(), Category::Compilation);
        let kind = err.downcast_ref::<UnknownFunction>().unwrap();
        assert_eq!(kind.suggestions, vec!["sin".to_string(), "sinh".to_string()]);
    }

    #[test]
    fn argument_count() {
        let expr = SymExpr::call("sin", vec![SymExpr::symbol("x"), SymExpr::int(1)]);
        let err = compile(&expr, SymbolTable::CURVE).unwrap_err();
        assert!(err.is::<ArgumentCount>());
    }
}
