//! Error types for the uscheme parser

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Syntactic category the parser was looking for when it failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Expected {
    /// Definitions followed by at least one expression
    Body,
    /// Any expression
    Expression,
    /// An identifier in binding position
    Variable,
    /// Integer literal
    Integer,
    /// At least one character between the quotes of a string literal
    StringCharacter,
    /// Closing `"` of a string literal
    Quote,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// Nothing but whitespace
    EndOfInput,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Expected::Body => "body",
            Expected::Expression => "expression",
            Expected::Variable => "variable",
            Expected::Integer => "integer",
            Expected::StringCharacter => "string character",
            Expected::Quote => "`\"`",
            Expected::OpenParen => "`(`",
            Expected::CloseParen => "`)`",
            Expected::EndOfInput => "end of input",
        };
        f.write_str(name)
    }
}

/// Categorizes parse failures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseErrorKind {
    /// No alternative matched, or a committed form was missing a required token
    Unexpected,
    /// The entry rule succeeded but non-whitespace input remains
    TrailingInput,
    /// End of input reached inside a string literal
    UnterminatedString {
        /// Byte offset of the opening quote
        opened_at: usize,
    },
    /// Integer literal does not fit in a signed 64-bit value
    IntegerOutOfRange,
    /// Expressions nested deeper than the configured limit
    NestingTooDeep {
        /// Configured maximum depth
        limit: usize,
    },
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::Unexpected => f.write_str("Syntax error"),
            ParseErrorKind::TrailingInput => f.write_str("Trailing input"),
            ParseErrorKind::UnterminatedString { opened_at } => {
                write!(f, "Unterminated string (opened at offset {})", opened_at)
            }
            ParseErrorKind::IntegerOutOfRange => f.write_str("Integer literal out of range"),
            ParseErrorKind::NestingTooDeep { limit } => {
                write!(f, "Expression too deeply nested (max depth: {})", limit)
            }
        }
    }
}

/// A failed parse, tied to a position in the source text
///
/// **Example:** parsing `(if a b)` reports `expected expression` at the
/// closing `)`, because a conditional needs exactly three arms.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{kind} at line {line}, column {column}: expected {expected} here: \"{snippet}\"")]
pub struct ParseError {
    /// What went wrong
    pub kind: ParseErrorKind,
    /// Category the parser was looking for
    pub expected: Expected,
    /// Byte offset of the failure
    pub offset: usize,
    /// Line number of the failure (1-indexed)
    pub line: usize,
    /// Column number of the failure in characters (1-indexed)
    pub column: usize,
    /// Remaining unconsumed text, truncated
    pub snippet: String,
    /// Whether the failure is fatal (raised past a commit point) rather than
    /// the exhaustion of every soft alternative
    pub committed: bool,
}

impl ParseError {
    /// Builds an error at `offset` in `source`, capturing position and snippet
    pub fn at(
        source: &str,
        offset: usize,
        kind: ParseErrorKind,
        expected: Expected,
        snippet_len: usize,
    ) -> Self {
        let offset = offset.min(source.len());
        let consumed = &source[..offset];
        let line = consumed.matches('\n').count() + 1;
        let line_start = consumed.rfind('\n').map_or(0, |i| i + 1);
        let column = consumed[line_start..].chars().count() + 1;
        let snippet = source[offset..].chars().take(snippet_len).collect();

        ParseError {
            kind,
            expected,
            offset,
            line,
            column,
            snippet,
            committed: false,
        }
    }

    /// Marks the error as raised past a commit point
    pub fn into_committed(mut self) -> Self {
        self.committed = true;
        self
    }

    /// True when the failure was raised past a commit point
    pub fn is_committed(&self) -> bool {
        self.committed
    }
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;
