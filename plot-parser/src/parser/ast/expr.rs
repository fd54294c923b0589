use crate::{
    parser::{
        ast::{
            binary::Binary,
            call::Call,
            literal::Literal,
            paren::Paren,
            unary::Unary,
        },
        error::{kind, Error},
        token::CloseParen,
        Parse,
        Parser,
        Precedence,
    },
    try_parse_catch_fatal,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A node of the syntax tree of a plottable expression, such as `sin(x)^2 + 3x`.
///
/// The tree is exactly what was typed: parentheses are kept, and no name has been checked against
/// the vocabulary yet.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A number or a name.
    Literal(Literal),

    /// `(x + 1)`
    Paren(Paren),

    /// `log(x, 2)`
    Call(Call),

    /// `-x`
    Unary(Unary),

    /// `x^2`, `2x`
    Binary(Binary),
}

impl Expr {
    /// The region of the source text the node covers.
    pub fn span(&self) -> Range<usize> {
        match self {
            Expr::Literal(literal) => literal.span(),
            Expr::Paren(paren) => paren.span(),
            Expr::Call(call) => call.span(),
            Expr::Unary(unary) => unary.span(),
            Expr::Binary(binary) => binary.span(),
        }
    }

    /// Returns the height of the expression tree, where a literal has height 1. The tree is
    /// walked without recursion.
    pub fn height(&self) -> usize {
        let mut stack = vec![(self, 1)];
        let mut height = 0;
        while let Some((expr, level)) = stack.pop() {
            height = height.max(level);
            match expr {
                Expr::Literal(_) => {},
                Expr::Paren(paren) => stack.push((&*paren.expr, level + 1)),
                Expr::Call(call) => stack.extend(call.args.iter().map(|arg| (arg, level + 1))),
                Expr::Unary(unary) => stack.push((&*unary.operand, level + 1)),
                Expr::Binary(binary) => {
                    stack.push((&*binary.lhs, level + 1));
                    stack.push((&*binary.rhs, level + 1));
                },
            }
        }
        height
    }
}

impl Parse for Expr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        if input.clone().try_parse::<CloseParen>().is_ok() {
            return Err(input.error_fatal(kind::UnclosedParenthesis { opening: false }));
        }

        let lhs = input.try_parse_with_fn(Unary::parse_or_lower)?;
        Binary::parse_expr(input, lhs, Precedence::Any)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Literal(literal) => literal.fmt(f),
            Expr::Paren(paren) => paren.fmt(f),
            Expr::Call(call) => call.fmt(f),
            Expr::Unary(unary) => unary.fmt(f),
            Expr::Binary(binary) => binary.fmt(f),
        }
    }
}

/// An operand that binds tighter than any operator: a number, a name, a call, or a parenthesized
/// expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Primary {
    Literal(Literal),
    Paren(Paren),
    Call(Call),
}

impl Primary {
    /// The region of the source text the operand covers.
    pub fn span(&self) -> Range<usize> {
        match self {
            Primary::Literal(literal) => literal.span(),
            Primary::Paren(paren) => paren.span(),
            Primary::Call(call) => call.span(),
        }
    }
}

impl Parse for Primary {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        // `sin(x)` starts with a name, so calls are tried before names
        let _ = try_parse_catch_fatal!(input.try_parse::<Call>().map(Self::Call));
        let _ = try_parse_catch_fatal!(input.try_parse::<Literal>().map(Self::Literal));

        input.try_parse::<Paren>().map(Self::Paren)
    }
}

impl From<Primary> for Expr {
    fn from(primary: Primary) -> Self {
        match primary {
            Primary::Literal(literal) => Self::Literal(literal),
            Primary::Paren(paren) => Self::Paren(paren),
            Primary::Call(call) => Self::Call(call),
        }
    }
}
