//! Lexical layer for uscheme
//!
//! Recognizes integers, booleans, strings, identifiers, parentheses and the
//! special-form keywords on demand, skipping whitespace between tokens.

mod sexpr_scanner;
mod token;

pub use sexpr_scanner::{Checkpoint, SExprScanner, DEFAULT_SNIPPET_LEN};
pub use token::Keyword;
