use super::token::Keyword;
use crate::error::{Expected, ParseError, ParseErrorKind, Result};

/// Default number of characters of remaining input captured in error snippets
pub const DEFAULT_SNIPPET_LEN: usize = 32;

/// Saved scanner position, used to backtrack out of a soft mismatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    current: usize,
    token_end: usize,
}

/// On-demand recognizers over S-expression source text
///
/// There is no token stream: the grammar asks for one lexical category at a
/// time. A recognizer that matches advances past the token and any whitespace
/// after it; one that does not match leaves the position untouched.
pub struct SExprScanner<'a> {
    /// Full source text
    source: &'a str,
    /// Current byte offset (always past leading whitespace)
    current: usize,
    /// Byte offset just after the last consumed token
    token_end: usize,
    /// Characters of remaining input kept in error snippets
    snippet_len: usize,
}

impl<'a> SExprScanner<'a> {
    /// Creates a scanner positioned at the first non-whitespace character
    pub fn new(source: &'a str) -> Self {
        let mut scanner = SExprScanner {
            source,
            current: 0,
            token_end: 0,
            snippet_len: DEFAULT_SNIPPET_LEN,
        };
        scanner.skip_whitespace();
        scanner
    }

    /// Sets how many characters of remaining input error snippets keep
    pub fn with_snippet_len(mut self, snippet_len: usize) -> Self {
        self.snippet_len = snippet_len;
        self
    }

    /// The text being scanned
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Current byte offset
    pub fn offset(&self) -> usize {
        self.current
    }

    /// Byte offset immediately after the last consumed token
    pub fn token_end(&self) -> usize {
        self.token_end
    }

    /// Unconsumed text
    pub fn rest(&self) -> &'a str {
        &self.source[self.current..]
    }

    /// True once only whitespace remains
    pub fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            current: self.current,
            token_end: self.token_end,
        }
    }

    pub fn rewind(&mut self, checkpoint: Checkpoint) {
        self.current = checkpoint.current;
        self.token_end = checkpoint.token_end;
    }

    /// Skips a run of ASCII whitespace
    pub fn skip_whitespace(&mut self) {
        let skipped = self
            .rest()
            .bytes()
            .take_while(|b| b.is_ascii_whitespace())
            .count();
        self.current += skipped;
    }

    /// Recognizes a single punctuation character such as `(` or `)`
    pub fn punct(&mut self, c: char) -> bool {
        if self.rest().starts_with(c) {
            self.consume(c.len_utf8());
            true
        } else {
            false
        }
    }

    /// Recognizes a keyword as a whole word
    ///
    /// `if` matches in `(if a b c)` but not in `(iffy a b c)`. A spelling
    /// that already ends in punctuation needs no boundary, so `set!` matches
    /// in `(set!x 1)`.
    pub fn keyword(&mut self, keyword: Keyword) -> bool {
        let spelling = keyword.as_str();
        let rest = self.rest();
        if !rest.starts_with(spelling) {
            return false;
        }

        let ends_in_word = spelling
            .bytes()
            .last()
            .map_or(false, |b| b.is_ascii_alphanumeric());
        let boundary = !ends_in_word
            || rest[spelling.len()..]
                .chars()
                .next()
                .map_or(true, |c| !c.is_ascii_alphanumeric());
        if boundary {
            self.consume(spelling.len());
        }
        boundary
    }

    /// Recognizes `[A-Za-z][A-Za-z0-9]*`
    pub fn identifier(&mut self) -> Option<&'a str> {
        let rest = self.rest();
        let mut bytes = rest.bytes();
        if !bytes.next()?.is_ascii_alphabetic() {
            return None;
        }

        let len = 1 + bytes.take_while(|b| b.is_ascii_alphanumeric()).count();
        self.consume(len);
        Some(&rest[..len])
    }

    /// Recognizes `-?[0-9]+`
    ///
    /// A literal that does not fit in `i64` is fatal: the digits are
    /// unambiguously an integer, so no other alternative could claim them.
    pub fn integer(&mut self) -> Result<Option<i64>> {
        let rest = self.rest();
        let sign = usize::from(rest.starts_with('-'));
        let digits = rest[sign..]
            .bytes()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if digits == 0 {
            return Ok(None);
        }

        let text = &rest[..sign + digits];
        match text.parse::<i64>() {
            Ok(value) => {
                self.consume(text.len());
                Ok(Some(value))
            }
            Err(_) => Err(self
                .error(self.current, ParseErrorKind::IntegerOutOfRange, Expected::Integer)
                .into_committed()),
        }
    }

    /// Recognizes `"` followed by one or more non-quote characters and `"`
    ///
    /// Once the opening quote is seen, a missing body or closing quote is fatal.
    /// There are no escape sequences.
    pub fn string_literal(&mut self) -> Result<Option<String>> {
        let rest = self.rest();
        if !rest.starts_with('"') {
            return Ok(None);
        }

        let opened_at = self.current;
        match rest[1..].find('"') {
            None => Err(self
                .error(
                    self.source.len(),
                    ParseErrorKind::UnterminatedString { opened_at },
                    Expected::Quote,
                )
                .into_committed()),
            Some(0) => Err(self
                .error(opened_at + 1, ParseErrorKind::Unexpected, Expected::StringCharacter)
                .into_committed()),
            Some(len) => {
                let value = rest[1..1 + len].to_string();
                self.consume(len + 2);
                Ok(Some(value))
            }
        }
    }

    /// Builds an error at `offset` using this scanner's snippet length
    pub fn error(&self, offset: usize, kind: ParseErrorKind, expected: Expected) -> ParseError {
        ParseError::at(self.source, offset, kind, expected, self.snippet_len)
    }

    fn consume(&mut self, len: usize) {
        self.current += len;
        self.token_end = self.current;
        self.skip_whitespace();
    }
}
