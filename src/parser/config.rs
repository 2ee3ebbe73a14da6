use crate::lexer::DEFAULT_SNIPPET_LEN;
use serde::{Deserialize, Serialize};

/// Default limit on nested expressions
///
/// A parse accepts exactly this many open parentheses at once; one more is a
/// `NestingTooDeep` error.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Configuration for a parse
///
/// Missing fields fall back to their defaults when deserialized, so an
/// embedder can carry a partial `[parser]` table in its own config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Maximum expression nesting before the parse is aborted (default: 128)
    pub max_depth: usize,
    /// Characters of remaining input kept in error snippets (default: 32)
    pub snippet_len: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            snippet_len: DEFAULT_SNIPPET_LEN,
        }
    }
}
