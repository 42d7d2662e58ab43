//! SIMPLE front end: tokens, grammar and program level validation.

mod parser;
pub mod tokens;
mod validate;

use ir::{Expr, Program};

use crate::ParseError;

/// Parses and validates SIMPLE source, without numbering or CFGs.
pub fn parse_ast(src: &str) -> Result<Program, ParseError> {
    let tokens = tokens::tokenize(src)?;
    let program = parser::Parser::new(tokens).parse_program()?;
    validate::validate(&program)?;
    Ok(program)
}

/// Parses a single SIMPLE expression such as `x * (y + 1)`.
///
/// # Example
/// ```
/// let expr = parsers::parse_expr("a + b * 2").unwrap();
/// assert_eq!(expr.postfix(), ["a", "b", "2", "*", "+"]);
/// assert!(parsers::parse_expr("a +").is_err());
/// ```
pub fn parse_expr(src: &str) -> Result<Expr, ParseError> {
    let tokens = tokens::tokenize(src)?;
    parser::Parser::new(tokens).parse_standalone_expr()
}
