//! uscheme Parser Module
//!
//! Parses S-expression source text into an Abstract Syntax Tree (AST).

mod ast;
mod config;
mod sexpr_parser;

pub use ast::{Binding, Body, Expression, Variable};
pub use config::{ParserConfig, DEFAULT_MAX_DEPTH};
pub use sexpr_parser::SExprParser;

use crate::error::Result;

/// Parses a whole program: definitions followed by at least one expression
///
/// Uses [`ParserConfig::default`], so a program nested more than
/// [`DEFAULT_MAX_DEPTH`] parentheses deep fails with
/// [`ParseErrorKind::NestingTooDeep`](crate::ParseErrorKind::NestingTooDeep).
/// Build an [`SExprParser`] with a larger `max_depth` to accept such input.
pub fn parse(source: &str) -> Result<Body> {
    SExprParser::new(source).parse()
}

/// Parses a single standalone expression
///
/// Nesting is bounded by [`DEFAULT_MAX_DEPTH`], as for [`parse`].
pub fn parse_expression(source: &str) -> Result<Expression> {
    SExprParser::new(source).parse_expression()
}
