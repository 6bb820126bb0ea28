use tracing::trace;

use super::rules::*;
use super::{TextRange, TokenKind, TokenSpan};
use crate::regex::compile;

/// Convert `text[range]` into a flat, ordered sequence of typed spans.
///
/// Total over any input: an unterminated string or comment extends to the
/// end of the range, and out-of-bounds ranges are clamped to the text.
pub fn scan(text: &str, range: TextRange) -> Vec<TokenSpan> {
    let start = clamp(text, range.start);
    let end = clamp(text, range.end);

    let mut spans = Vec::new();
    let mut i = start;

    while let Some(span) = next_span(text, i, end) {
        i = span.end();
        spans.push(span);
    }

    trace!(start, end, spans = spans.len(), "scanned");
    spans
}

/// The first span at or after `i`, skipping whitespace and reader-macro
/// prefixes, or `None` once `end` is reached.
pub(crate) fn next_span(text: &str, mut i: usize, end: usize) -> Option<TokenSpan> {
    let bytes = text.as_bytes();

    while i < end {
        let span = match bytes[i] {
            b';' => {
                let j = skip_line_comment(text, i, end);
                TokenSpan::new(i, j - i, TokenKind::LineComment)
            }
            b'#' if opens_block_comment(text, i, end) => {
                let j = skip_block_comment(text, i, end);
                TokenSpan::new(i, j - i, TokenKind::BlockComment)
            }
            b'"' => {
                let j = skip_string(text, i, end);
                TokenSpan::new(i, j - i, TokenKind::String)
            }
            b'(' | b')' => TokenSpan::new(i, 1, TokenKind::Paren),
            _ => {
                // i is always on a char boundary, so there is a char here
                let c = char_at(text, i).unwrap_or(' ');
                if c.is_whitespace() || is_prefix(c) {
                    i += c.len_utf8();
                    continue;
                }
                let j = atom_end(text, i, end);
                TokenSpan::new(i, j - i, classify(&text[i..j]))
            }
        };
        return Some(span);
    }
    None
}

/// Classify a single atom.
pub fn classify(atom: &str) -> TokenKind {
    if atom.starts_with(':') {
        TokenKind::Keyword
    } else if is_number(atom) {
        TokenKind::Number
    } else if is_special_form(atom) {
        TokenKind::SpecialForm
    } else {
        TokenKind::Symbol
    }
}

/// Integers, decimals (with optional exponent), ratios like `1/2`, and the
/// `#x` / `#o` / `#b` radix notations.
pub fn is_number(atom: &str) -> bool {
    let radix = compile!(r"^#[xXoObB]");
    let numeric = compile!(
        r"^[+-]?(?:[0-9]+(?:/[0-9]+)?|[0-9]+\.[0-9]*(?:[eE][+-]?[0-9]+)?|\.[0-9]+(?:[eE][+-]?[0-9]+)?|[0-9]+[eE][+-]?[0-9]+)$"
    );

    radix.is_match(atom) || numeric.is_match(atom)
}
