//! Character-level scanning of Lisp source text.
//!
//! Everything here works on UTF-8 byte offsets into a `&str`. The rules for
//! what counts as a string, a comment, or an atom live in [`rules`] and are
//! shared by the scanner proper, the streaming tokenizer, and the structural
//! analysis in `crate::analysis`.

use serde::Serialize;

mod rules;
mod scanner;
mod stream;

// Re-export all public symbols
pub use rules::{is_special_form, Delimiter, Delimiters, Paren, SPECIAL_FORMS};
pub(crate) use rules::{
    clamp, head_symbol, opens_block_comment, skip_block_comment, skip_line_comment, skip_string,
};
pub use scanner::{classify, is_number, scan};
pub(crate) use scanner::next_span;
pub use stream::*;

/// A half-open `[start, end)` range of byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub fn new(start: usize, end: usize) -> TextRange {
        TextRange {
            start,
            end: end.max(start),
        }
    }

    /// A zero-length range sitting at a single cursor position.
    pub fn empty(at: usize) -> TextRange {
        TextRange { start: at, end: at }
    }

    /// The range covering the whole of the given text.
    pub fn whole(text: &str) -> TextRange {
        TextRange {
            start: 0,
            end: text.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True if the two ranges share at least one byte. A zero-length range
    /// never intersects anything.
    pub fn intersects(&self, other: &TextRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn contains(&self, other: &TextRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// Classification of a scanned span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    Paren,
    String,
    LineComment,
    BlockComment,
    Symbol,
    Number,
    Keyword,
    SpecialForm,
}

impl TokenKind {
    pub fn is_comment(&self) -> bool {
        matches!(self, TokenKind::LineComment | TokenKind::BlockComment)
    }
}

/// A typed region of source text. Whitespace between spans is implicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TokenSpan {
    pub offset: usize,
    pub length: usize,
    pub kind: TokenKind,
}

impl TokenSpan {
    pub fn new(offset: usize, length: usize, kind: TokenKind) -> TokenSpan {
        TokenSpan {
            offset,
            length,
            kind,
        }
    }

    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    pub fn range(&self) -> TextRange {
        TextRange::new(self.offset, self.end())
    }

    /// The slice of the source text this span covers.
    pub fn text<'i>(&self, source: &'i str) -> &'i str {
        &source[self.offset..self.end()]
    }
}
