pub mod ast;
pub mod error;
pub mod token;

use error::{Error, kind};
use plot_error::ErrorKind;
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use std::{ops::Range, rc::Rc};

/// The maximum depth of nested parentheses, function calls, unary operators and
/// right-associative operators.
pub const MAX_DEPTH: usize = 100;

/// The maximum height of a parsed expression tree. Long chains of left-associative operators
/// (`1 + 2 + 3 + ...`) grow the tree without nesting, so they are bounded separately.
pub const MAX_HEIGHT: usize = 1_000;

/// The maximum number of tokens in an expression, whitespace included.
pub const MAX_TOKENS: usize = 10_000;

/// Attempts to parse a value from the given stream of tokens, using multiple parsing functions
/// in order. The first function that succeeds is used to parse the value.
///
/// This macro also catches fatal errors and immediately short-circuits the parsing process.
///
/// If parsing is successful, the value is returned from the enclosing function. Otherwise, the
/// error of the last attempted parsing function is returned from the macro.
#[macro_export]
macro_rules! try_parse_catch_fatal {
    ($($expr:expr),+ $(,)?) => {{
        $(
            match $expr {
                Ok(value) => return Ok(value),
                Err(err) if err.fatal => return Err(err),
                // ignore this error and try the next parser, or return it
                err => err,
            }
        )+
    }};
}

/// A high-level parser for expressions. This is the type to use to parse an arbitrary piece of
/// text into an abstract syntax tree.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing. Shared so that cloning the parser to
    /// peek ahead does not copy the stream.
    tokens: Rc<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,

    /// How many nested constructs enclose the current position.
    depth: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: Rc::from(tokenize_complete(source)),
            cursor: 0,
            depth: 0,
        }
    }

    /// Returns the number of tokens in the stream, whitespace included.
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Runs the given parsing function one nesting level deeper. Returns a fatal
    /// [`kind::TooDeeplyNested`] error instead if that would exceed [`MAX_DEPTH`].
    pub fn nested<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        if self.depth >= MAX_DEPTH {
            return Err(self.error_fatal(kind::TooDeeplyNested { max: MAX_DEPTH }));
        }

        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Set the cursor of this parser to the cursor of another parser over the same source.
    pub fn set_cursor(&mut self, other: &Parser) {
        self.cursor = other.cursor;
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Creates a fatal error that points at the current token, or the end of the source code if
    /// the cursor is at the end of the stream.
    pub fn error_fatal(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new_fatal(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the current non-whitespace token, or the end of the source code if
    /// there are no more tokens.
    pub fn span(&self) -> Range<usize> {
        self.tokens[self.cursor.min(self.tokens.len())..]
            .iter()
            .find(|token| !token.is_whitespace())
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns the previous token. The cursor is not moved. Returns [`None`] if the cursor is at
    /// the beginning of the stream.
    pub fn prev_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor.checked_sub(1)?)
    }

    /// Returns the current token. The cursor is not moved. Returns [`None`] if the cursor is at
    /// the end of the stream.
    pub fn current_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor)
    }

    /// If the next non-whitespace token is a character outside the expression language, returns
    /// a fatal error pointing at it.
    pub fn unexpected_character(&self) -> Option<Error> {
        let token = self.tokens[self.cursor.min(self.tokens.len())..]
            .iter()
            .find(|token| !token.is_whitespace())?;
        (token.kind == TokenKind::Symbol).then(|| {
            Error::new_fatal(vec![token.span.clone()], kind::UnexpectedCharacter {
                character: token.lexeme.to_owned(),
            })
        })
    }

    /// Advances the cursor past any whitespace tokens.
    pub fn skip_whitespace(&mut self) {
        while self.current_token().is_some_and(Token::is_whitespace) {
            self.cursor += 1;
        }
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        while self.cursor < self.tokens.len() {
            let token = &self.tokens[self.cursor];
            self.cursor += 1;
            if token.is_whitespace() {
                continue;
            } else {
                // cloning is cheap: only Range<_> is cloned
                return Ok(token.clone());
            }
        }

        Err(self.error(kind::UnexpectedEof))
    }

    /// Speculatively parses a value from the given stream of tokens. This function can be used
    /// in the [`Parse::parse`] implementation of a type with the given [`Parser`], as it will
    /// automatically backtrack the cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Speculatively parses multiple values (at least one) from the given stream of tokens, each
    /// delimited by a certain token.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// values are returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_delimited<T: Parse>(&mut self, delimiter: TokenKind) -> Result<Vec<T>, Error> {
        let start = self.cursor;
        let mut values = Vec::new();

        loop {
            match self.try_parse::<T>() {
                Ok(value) => values.push(value),
                Err(err) => {
                    self.cursor = start;
                    return Err(err);
                },
            }

            self.skip_whitespace();
            match self.current_token() {
                Some(token) if token.kind == delimiter => {
                    self.cursor += 1;
                },
                _ => return Ok(values),
            }
        }
    }

    /// Speculatively parses a value from the given stream of tokens, using a custom parsing
    /// function to parse the value.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        let start = self.cursor;
        match f(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Speculatively parses a value from the given stream of tokens, with a validation predicate.
    /// The value must parse successfully, **and** the predicate must return [`Ok`] for this
    /// function to return successfully.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_then<T: Parse, F>(&mut self, predicate: F) -> Result<T, Error>
    where
        F: FnOnce(&T, &Parser) -> Result<(), Error>,
    {
        let start = self.cursor;

        // closure workaround allows us to use `?` in the closure
        let compute = || {
            let value = T::parse(self)?;
            predicate(&value, self)?;
            Ok(value)
        };

        match compute() {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Attempts to parse a value from the given stream of tokens. All the tokens must be consumed
    /// by the parser (trailing whitespace is allowed); if not, an error is returned.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        let value = T::parse(self)?;
        self.skip_whitespace();
        match self.current_token() {
            None => Ok(value),
            Some(token) if token.kind == TokenKind::CloseParen => {
                Err(self.error_fatal(kind::UnclosedParenthesis { opening: false }))
            },
            Some(_) => Err(self.unexpected_character()
                .unwrap_or_else(|| self.error(kind::ExpectedEof))),
        }
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    ///
    /// This function should be used by consumers of the library.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

/// The associativity of a binary or unary operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    /// The binary / unary operation is left-associative.
    ///
    /// For binary operations, this means `a op b op c` is evaluated as `(a op b) op c`.
    Left,

    /// The binary / unary operation is right-associative.
    ///
    /// For binary operations, this means `a op b op c` is evaluated as `a op (b op c)`. For unary
    /// operations, this means `op op a` is evaluated as `op (op a)`.
    Right,
}

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precedence {
    /// Any precedence.
    Any,

    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*`) and division (`/`), which separate factors. Implicit
    /// multiplication (`2x`) shares this precedence.
    Factor,

    /// Precedence of unary negation (`-`) and unary plus (`+`).
    Neg,

    /// Precedence of exponentiation (`^` or `**`).
    Exp,
}

impl PartialOrd for Precedence {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        let left = *self as u8;
        let right = *other as u8;
        left.partial_cmp(&right)
    }
}

/// Parses the given text into an expression, without checking its names against a vocabulary.
pub fn parse_expr(source: &str) -> Result<ast::Expr, Error> {
    if source.trim().is_empty() {
        return Err(Error::new_fatal(Vec::new(), kind::EmptyExpression));
    }

    let mut parser = Parser::new(source);
    if parser.token_count() > MAX_TOKENS {
        return Err(Error::new_fatal(vec![0..source.len()], kind::ExpressionTooLong {
            max: MAX_TOKENS,
        }));
    }

    let expr = parser.try_parse_full::<ast::Expr>()?;
    if expr.height() > MAX_HEIGHT {
        return Err(Error::new_fatal(vec![expr.span()], kind::TooDeeplyNested {
            max: MAX_HEIGHT,
        }));
    }
    Ok(expr)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use ast::{
        binary::Binary,
        call::Call,
        expr::Expr,
        literal::{Literal, LitNum, LitSym},
        paren::Paren,
        unary::Unary,
    };
    use token::op::{BinOp, BinOpKind, UnaryOp, UnaryOpKind};

    fn sym(name: &str, span: Range<usize>) -> Box<Expr> {
        Box::new(Expr::Literal(Literal::Symbol(LitSym {
            name: name.to_string(),
            span,
        })))
    }

    fn num(lexeme: &str, span: Range<usize>) -> Box<Expr> {
        Box::new(Expr::Literal(Literal::Number(LitNum {
            value: lexeme.parse().unwrap(),
            lexeme: lexeme.to_string(),
            span,
        })))
    }

    fn parse_kind(source: &str) -> error::Error {
        parse_expr(source).unwrap_err()
    }

    #[test]
    fn literal_int() {
        let expr = parse_expr("16").unwrap();
        assert_eq!(expr, *num("16", 0..2));
    }

    #[test]
    fn literal_float() {
        let expr = parse_expr("3.14").unwrap();
        assert_eq!(expr, *num("3.14", 0..4));
    }

    #[test]
    fn binary_precedence() {
        let expr = parse_expr("1 + 2 * x").unwrap();
        assert_eq!(expr, Expr::Binary(Binary {
            lhs: num("1", 0..1),
            op: BinOp { kind: BinOpKind::Add, implicit: false, span: 2..3 },
            rhs: Box::new(Expr::Binary(Binary {
                lhs: num("2", 4..5),
                op: BinOp { kind: BinOpKind::Mul, implicit: false, span: 6..7 },
                rhs: sym("x", 8..9),
                span: 4..9,
            })),
            span: 0..9,
        }));
    }

    #[test]
    fn exponent_right_associative() {
        let expr = parse_expr("x^2^3").unwrap();
        assert_eq!(expr, Expr::Binary(Binary {
            lhs: sym("x", 0..1),
            op: BinOp { kind: BinOpKind::Exp, implicit: false, span: 1..2 },
            rhs: Box::new(Expr::Binary(Binary {
                lhs: num("2", 2..3),
                op: BinOp { kind: BinOpKind::Exp, implicit: false, span: 3..4 },
                rhs: num("3", 4..5),
                span: 2..5,
            })),
            span: 0..5,
        }));
    }

    #[test]
    fn negation_binds_looser_than_exponent() {
        let expr = parse_expr("-x^2").unwrap();
        assert_eq!(expr, Expr::Unary(Unary {
            operand: Box::new(Expr::Binary(Binary {
                lhs: sym("x", 1..2),
                op: BinOp { kind: BinOpKind::Exp, implicit: false, span: 2..3 },
                rhs: num("2", 3..4),
                span: 1..4,
            })),
            op: UnaryOp { kind: UnaryOpKind::Neg, span: 0..1 },
            span: 0..4,
        }));
    }

    #[test]
    fn implicit_multiplication() {
        let expr = parse_expr("2x").unwrap();
        assert_eq!(expr, Expr::Binary(Binary {
            lhs: num("2", 0..1),
            op: BinOp { kind: BinOpKind::Mul, implicit: true, span: 1..1 },
            rhs: sym("x", 1..2),
            span: 0..2,
        }));
    }

    #[test]
    fn implicit_multiplication_before_power() {
        // `1 + 2x^2` is `1 + 2 * (x^2)`, not `1 + (2x)^2`
        let expr = parse_expr("1 + 2x^2").unwrap();
        assert_eq!(expr.to_string(), "1 + 2 * x^2");
    }

    #[test]
    fn implicit_multiplication_of_parens() {
        let expr = parse_expr("(x + 1)(x - 1)").unwrap();
        assert_eq!(expr.to_string(), "(x + 1) * (x - 1)");
    }

    #[test]
    fn power_with_double_star() {
        let a = parse_expr("x**2").unwrap();
        let b = parse_expr("x^2").unwrap();
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn negative_exponent() {
        let expr = parse_expr("2^-x").unwrap();
        assert_eq!(expr.to_string(), "2^(-x)");
    }

    #[test]
    fn function_call() {
        let expr = parse_expr("log(x, 2)").unwrap();
        assert_eq!(expr, Expr::Call(Call {
            name: LitSym { name: "log".to_string(), span: 0..3 },
            args: vec![*sym("x", 4..5), *num("2", 7..8)],
            span: 0..9,
            paren_span: 3..9,
        }));
    }

    #[test]
    fn empty_call() {
        let expr = parse_expr("sin()").unwrap();
        assert_eq!(expr, Expr::Call(Call {
            name: LitSym { name: "sin".to_string(), span: 0..3 },
            args: vec![],
            span: 0..5,
            paren_span: 3..5,
        }));
    }

    #[test]
    fn paren() {
        let expr = parse_expr("(x)").unwrap();
        assert_eq!(expr, Expr::Paren(Paren {
            expr: sym("x", 1..2),
            span: 0..3,
        }));
    }

    #[test]
    fn trailing_whitespace() {
        assert!(parse_expr("  x + 1   ").is_ok());
    }

    #[test]
    fn deterministic() {
        assert_eq!(parse_expr("sin(x)^2 + 3x").unwrap(), parse_expr("sin(x)^2 + 3x").unwrap());
    }

    #[test]
    fn empty_expression() {
        assert!(parse_kind("   ").kind.as_any().is::<kind::EmptyExpression>());
    }

    #[test]
    fn unclosed_parenthesis() {
        let err = parse_kind("sin(x");
        assert_eq!(err.spans, vec![3..4]);
        assert!(err.kind.as_any().is::<kind::UnclosedParenthesis>());
    }

    #[test]
    fn unopened_parenthesis() {
        let err = parse_kind("x + 1)");
        assert!(err.kind.as_any().is::<kind::UnclosedParenthesis>());
    }

    #[test]
    fn empty_parenthesis() {
        assert!(parse_kind("2 * ()").kind.as_any().is::<kind::EmptyParenthesis>());
    }

    #[test]
    fn dangling_operator() {
        assert!(parse_kind("x +").kind.as_any().is::<kind::UnexpectedEof>());
    }

    #[test]
    fn unexpected_character() {
        let err = parse_kind("x $ 2");
        assert_eq!(err.spans, vec![2..3]);
        assert!(err.kind.as_any().is::<kind::UnexpectedCharacter>());
    }

    #[test]
    fn errors_are_parse_category() {
        let err: plot_error::Error = parse_kind("x * * 2").into();
        assert_eq!(err.category(), plot_error::Category::Parse);
    }

    #[test]
    fn scientific_notation() {
        let expr = parse_expr("1e-3*x").unwrap();
        assert_eq!(expr, Expr::Binary(Binary {
            lhs: num("1e-3", 0..4),
            op: BinOp { kind: BinOpKind::Mul, implicit: false, span: 4..5 },
            rhs: sym("x", 5..6),
            span: 0..6,
        }));
        assert_eq!(parse_expr("2.5E+2").unwrap(), *num("2.5E+2", 0..6));
    }

    #[test]
    fn number_out_of_range() {
        let err = parse_kind("1e400");
        assert_eq!(err.spans, vec![0..5]);
        assert!(err.kind.as_any().is::<kind::InvalidNumber>());
    }

    #[test]
    fn repeated_decimal_point() {
        let err = parse_kind("1.2.3");
        assert_eq!(err.spans, vec![0..5]);
        assert!(err.kind.as_any().is::<kind::InvalidNumber>());

        let err = parse_kind("x + 1..5");
        assert_eq!(err.spans, vec![4..8]);
        assert!(err.kind.as_any().is::<kind::InvalidNumber>());
    }

    #[test]
    fn nesting_limit() {
        let at_limit = format!("{}x{}", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
        assert!(parse_expr(&at_limit).is_ok());

        let over_limit = format!("{}x{}", "(".repeat(MAX_DEPTH + 1), ")".repeat(MAX_DEPTH + 1));
        assert!(parse_kind(&over_limit).kind.as_any().is::<kind::TooDeeplyNested>());
    }

    #[test]
    fn runaway_nesting() {
        let sources = [
            "(".repeat(10_000),
            format!("sin({}x", "sin(".repeat(3_000)),
            format!("{}x", "-".repeat(5_000)),
            format!("{}x", "x^".repeat(2_000)),
            format!("{}1", "1+".repeat(2_000)),
        ];
        for source in &sources {
            let err = parse_kind(source);
            assert!(err.kind.as_any().is::<kind::TooDeeplyNested>(), "{}", &source[..10]);
        }
    }

    #[test]
    fn long_flat_sum() {
        let source = format!("{}x", "x + ".repeat(400));
        assert!(parse_expr(&source).is_ok());
    }

    #[test]
    fn too_many_tokens() {
        let err = parse_kind(&"x+".repeat(6_000));
        assert!(err.kind.as_any().is::<kind::ExpressionTooLong>());
    }
}
