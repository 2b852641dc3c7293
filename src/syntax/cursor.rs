//! Cursor over the input text and the combinator primitives built on it.
//!
//! The cursor is an immutable borrow of the source plus a byte offset. Saving
//! and restoring the offset is all backtracking needs, so grammar rules can
//! speculatively consume input and rewind it in O(1).

use crate::syntax::error::ParseError;
use crate::syntax::predicates::{
    CharPred, IsAlnum, IsAlpha, IsDigit, IsEither, IsInlineSpace, IsNot, IsSpace, IsSymbol,
    IS_MINUS,
};

/// A saved cursor position, only meaningful for the cursor that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position(usize);

impl Position {
    pub fn offset(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct Cursor<'src> {
    src: &'src str,
    pos: usize,
}

impl<'src> Cursor<'src> {
    pub fn new(src: &'src str) -> Self {
        Self { src, pos: 0 }
    }

    pub fn source(&self) -> &'src str {
        self.src
    }

    pub fn offset(&self) -> usize {
        self.pos
    }

    pub fn is_eof(&self) -> bool {
        self.pos == self.src.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    // ------------------------------------------------------------------------
    // Backtracking
    // ------------------------------------------------------------------------

    pub fn position(&self) -> Position {
        Position(self.pos)
    }

    pub fn backtrack(&mut self, saved: Position) {
        debug_assert!(saved.0 <= self.src.len());
        self.pos = saved.0;
    }

    // ------------------------------------------------------------------------
    // Consumption primitives
    // ------------------------------------------------------------------------

    /// Consumes the next character if it satisfies `pred`.
    ///
    /// This is the only primitive that moves the cursor forward speculatively;
    /// on failure nothing changes.
    pub fn accept(&mut self, pred: impl CharPred) -> bool {
        self.bump_if(&pred).is_some()
    }

    /// Like [`Cursor::accept`], appending the consumed character to `out`.
    pub fn accept_into(&mut self, pred: impl CharPred, out: &mut String) -> bool {
        match self.bump_if(&pred) {
            Some(c) => {
                out.push(c);
                true
            }
            None => false,
        }
    }

    /// Consumes the next character or fails the whole parse.
    pub fn expect(&mut self, pred: impl CharPred) -> Result<(), ParseError> {
        if self.bump_if(&pred).is_some() {
            return Ok(());
        }
        let got = match self.peek() {
            Some(c) => format!("'{c}'"),
            None => "end of input".to_string(),
        };
        Err(self.error_with_next_token(format!("expected {}, got {}", pred.name(), got)))
    }

    fn bump_if(&mut self, pred: &impl CharPred) -> Option<char> {
        let c = self.peek().filter(|&c| pred.test(c))?;
        self.pos += c.len_utf8();
        Some(c)
    }

    // ------------------------------------------------------------------------
    // Repetition helpers
    // ------------------------------------------------------------------------

    /// Skips characters while `pred` holds, returning how many were consumed.
    pub fn skip_while(&mut self, pred: impl CharPred) -> usize {
        let mut count = 0;
        while self.accept(&pred) {
            count += 1;
        }
        count
    }

    /// Captures a run of characters matching `pred`.
    pub fn collect_while(&mut self, pred: impl CharPred, out: &mut String) -> usize {
        let mut count = 0;
        while self.accept_into(&pred, out) {
            count += 1;
        }
        count
    }

    /// Captures characters up to (not including) the first one satisfying `pred`.
    pub fn any_until(&mut self, pred: impl CharPred, out: &mut String) -> usize {
        self.collect_while(IsNot(&pred), out)
    }

    pub fn space(&mut self) -> usize {
        self.skip_while(IsSpace)
    }

    pub fn inline_space(&mut self) -> usize {
        self.skip_while(IsInlineSpace)
    }

    // ------------------------------------------------------------------------
    // Token-level helpers
    // ------------------------------------------------------------------------

    /// Reads an identifier: `(alphabetic | sym) (alphanumeric | sym)*`.
    pub fn name(&mut self, out: &mut String) -> bool {
        if !self.accept_into(IsEither(&IsAlpha, &IsSymbol), out) {
            return false;
        }
        self.collect_while(IsEither(&IsAlnum, &IsSymbol), out);
        true
    }

    /// Reads an optional minus sign followed by at least one digit.
    ///
    /// A lone `-` is not a number; the cursor is rewound so it can still be
    /// read as something else.
    pub fn signed_number(&mut self, out: &mut String) -> bool {
        let start = self.position();
        let mark = out.len();
        self.accept_into(IS_MINUS, out);
        if self.collect_while(IsDigit, out) == 0 {
            self.backtrack(start);
            out.truncate(mark);
            return false;
        }
        true
    }

    // ------------------------------------------------------------------------
    // Diagnostics
    // ------------------------------------------------------------------------

    /// Builds a fatal error carrying the text that follows the failure point.
    pub fn error_with_next_token(&mut self, message: impl Into<String>) -> ParseError {
        let at = self.position();
        let mut next_token = String::new();
        self.any_until(IsInlineSpace, &mut next_token);
        self.backtrack(at);
        ParseError::new(message, next_token, at.offset())
    }
}
