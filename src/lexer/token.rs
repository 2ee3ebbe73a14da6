use serde::{Deserialize, Serialize};
use std::fmt;

/// Reserved spellings that give a parenthesized form or literal its meaning
///
/// Keywords are not excluded from the identifier charset; they only carry
/// meaning where the grammar asks for them (right after `(`, or as a literal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    /// `define` - top-of-body definition
    Define,
    /// `if` - three-armed conditional
    If,
    /// `and` - conjunction
    And,
    /// `or` - disjunction
    Or,
    /// `set!` - mutation
    SetBang,
    /// `lambda` - procedure
    Lambda,
    /// `let` - local bindings
    Let,
    /// `begin` - scope
    Begin,
    /// `true` literal
    True,
    /// `false` literal
    False,
}

impl Keyword {
    /// Source spelling of the keyword
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Define => "define",
            Keyword::If => "if",
            Keyword::And => "and",
            Keyword::Or => "or",
            Keyword::SetBang => "set!",
            Keyword::Lambda => "lambda",
            Keyword::Let => "let",
            Keyword::Begin => "begin",
            Keyword::True => "true",
            Keyword::False => "false",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
