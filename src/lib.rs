//! # uscheme - Scheme-family front end
//!
//! Parses a small Lisp/Scheme-family surface syntax into a typed abstract
//! syntax tree, ready for a downstream evaluator. Evaluation itself lives
//! elsewhere; this crate only turns text into a tree or a diagnostic.
//!
//! ## Quick Start
//!
//! ```rust
//! use uscheme::{parse, Expression};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let program = parse("(define x 5) (set! x 6) x")?;
//!
//! assert_eq!(program.definitions.len(), 1);
//! assert_eq!(program.expressions.len(), 2);
//! assert_eq!(program.expressions[1], Expression::variable("x"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Grammar
//!
//! ```text
//! body        = definition* expression+
//! definition  = "(" "define" variable expression ")"
//! expression  = boolean | variable | integer | string
//!             | "(" "if" expression expression expression ")"
//!             | "(" "and" expression+ ")"
//!             | "(" "or" expression+ ")"
//!             | "(" "set!" variable expression ")"
//!             | "(" "lambda" "(" variable* ")" body ")"
//!             | "(" "let" "(" ("(" variable expression ")")* ")" body ")"
//!             | "(" "begin" body ")"
//!             | "(" expression expression* ")"
//! variable    = [A-Za-z][A-Za-z0-9]*
//! integer     = "-"? [0-9]+
//! boolean     = "true" | "false"
//! string      = '"' [^"]+ '"'
//! ```
//!
//! Once a special form's keyword has been read, every token after it is
//! mandatory. `(if a b)` is an error rather than an application of `if`.
//!
//! ## Error Handling
//!
//! ```rust
//! use uscheme::{parse_expression, Expected, ParseErrorKind};
//!
//! let err = parse_expression("(if a b c) extra").unwrap_err();
//! assert_eq!(err.kind, ParseErrorKind::TrailingInput);
//! assert_eq!(err.expected, Expected::EndOfInput);
//! assert_eq!(err.snippet, "extra");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Source Code → Scanner (on-demand recognizers) → Parser → AST
//! ```
//!
//! - [`SExprScanner`] - Recognizes one lexical category at a time
//! - [`SExprParser`] - Recursive descent over the scanner, one rule per form
//! - [`Body`] / [`Expression`] - The tree handed to the caller

pub mod error;
pub mod lexer;
pub mod parser;

// Re-export main types
pub use error::{Expected, ParseError, ParseErrorKind, Result};
pub use lexer::{Keyword, SExprScanner};
pub use parser::{
    parse, parse_expression, Binding, Body, Expression, ParserConfig, SExprParser, Variable,
};

/// Version of the uscheme crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Type alias for the S-expression scanner.
pub type Scanner<'a> = SExprScanner<'a>;

/// Type alias for the S-expression parser.
pub type Parser<'a> = SExprParser<'a>;
