//! Lexical rules shared by every walk over Lisp text.
//!
//! Each `skip_*` function takes the offset of the character that opens the
//! construct and returns the offset just past it, never beyond `end`. An
//! unterminated string or comment runs to `end`.

/// Operators with indentation or context significance. Membership is
/// case-insensitive.
pub const SPECIAL_FORMS: &[&str] = &[
    "defun",
    "defmacro",
    "defvar",
    "defparameter",
    "defconstant",
    "let",
    "let*",
    "lambda",
    "if",
    "when",
    "unless",
    "cond",
    "case",
    "typecase",
    "quote",
    "function",
    "setq",
    "setf",
    "progn",
    "prog1",
    "prog2",
    "block",
    "return-from",
    "tagbody",
    "go",
    "catch",
    "throw",
    "unwind-protect",
    "labels",
    "flet",
];

pub fn is_special_form(name: &str) -> bool {
    SPECIAL_FORMS
        .iter()
        .any(|form| form.eq_ignore_ascii_case(name))
}

/// Clamp an arbitrary caller-supplied offset into the text, rounding down to
/// the nearest char boundary.
pub(crate) fn clamp(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Offset of the code point following the one at `i`.
#[inline]
pub(crate) fn step(text: &str, i: usize) -> usize {
    i + text[i..]
        .chars()
        .next()
        .map_or(1, char::len_utf8)
}

#[inline]
pub(crate) fn char_at(text: &str, i: usize) -> Option<char> {
    text[i..]
        .chars()
        .next()
}

/// Characters that terminate an atom.
pub(crate) fn is_atom_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '(' | ')' | '"' | ';' | '\'' | '`' | ',' | '@')
}

/// Reader-macro prefix characters. They delimit atoms but produce no span.
pub(crate) fn is_prefix(c: char) -> bool {
    matches!(c, '\'' | '`' | ',' | '@')
}

/// True if a `#|` block comment opens at `i`, with both characters before `end`.
#[inline]
pub(crate) fn opens_block_comment(text: &str, i: usize, end: usize) -> bool {
    let bytes = text.as_bytes();
    i + 1 < end && bytes[i] == b'#' && bytes[i + 1] == b'|'
}

/// `i` is the opening `"`. A backslash consumes the code point after it.
pub(crate) fn skip_string(text: &str, i: usize, end: usize) -> usize {
    let bytes = text.as_bytes();
    let mut j = i + 1;

    while j < end {
        match bytes[j] {
            b'\\' => {
                j += 1;
                if j < end {
                    j = step(text, j);
                }
            }
            b'"' => return j + 1,
            _ => j = step(text, j),
        }
    }
    end
}

/// `i` is the `;`. Stops at, and does not include, the newline.
pub(crate) fn skip_line_comment(text: &str, i: usize, end: usize) -> usize {
    match text[i..end].find('\n') {
        Some(newline) => i + newline,
        None => end,
    }
}

/// `i` is the `#` of `#|`. Nested `#|` / `|#` pairs are tracked by depth.
pub(crate) fn skip_block_comment(text: &str, i: usize, end: usize) -> usize {
    let bytes = text.as_bytes();
    let mut depth = 1;
    let mut j = i + 2;

    while j < end {
        if j + 1 < end && bytes[j] == b'|' && bytes[j + 1] == b'#' {
            depth -= 1;
            j += 2;
            if depth == 0 {
                return j;
            }
        } else if j + 1 < end && bytes[j] == b'#' && bytes[j + 1] == b'|' {
            depth += 1;
            j += 2;
        } else {
            j = step(text, j);
        }
    }
    end
}

/// Offset just past the atom starting at `i`.
pub(crate) fn atom_end(text: &str, i: usize, end: usize) -> usize {
    let mut j = i;
    while j < end {
        match char_at(text, j) {
            Some(c) if !is_atom_delimiter(c) => j += c.len_utf8(),
            _ => break,
        }
    }
    j
}

/// The head symbol of the form opened by the `(` at `open`: the atom that
/// follows it after any whitespace, lower-cased. Nothing is looked at beyond
/// `end`.
pub(crate) fn head_symbol(text: &str, open: usize, end: usize) -> Option<String> {
    let mut j = open + 1;
    while j < end {
        match char_at(text, j) {
            Some(c) if c.is_whitespace() => j += c.len_utf8(),
            _ => break,
        }
    }

    if j >= end || opens_block_comment(text, j, end) {
        return None;
    }

    let k = atom_end(text, j, end);
    if k == j {
        None
    } else {
        Some(text[j..k].to_lowercase())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paren {
    Open,
    Close,
}

/// A structural parenthesis: one that is not inside a string or comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiter {
    pub offset: usize,
    pub paren: Paren,
}

/// Iterator over the structural parentheses of a text, in offset order.
pub struct Delimiters<'i> {
    text: &'i str,
    position: usize,
    end: usize,
}

impl<'i> Delimiters<'i> {
    pub fn new(text: &'i str) -> Delimiters<'i> {
        Delimiters {
            text,
            position: 0,
            end: text.len(),
        }
    }

    /// Only consider `text[0, upto)`; constructs cut off at `upto` are
    /// treated as unterminated.
    pub fn upto(text: &'i str, upto: usize) -> Delimiters<'i> {
        Delimiters {
            text,
            position: 0,
            end: clamp(text, upto),
        }
    }
}

impl<'i> Iterator for Delimiters<'i> {
    type Item = Delimiter;

    fn next(&mut self) -> Option<Delimiter> {
        let text = self.text;
        let end = self.end;

        while self.position < end {
            let i = self.position;
            match text.as_bytes()[i] {
                b'"' => self.position = skip_string(text, i, end),
                b';' => self.position = skip_line_comment(text, i, end),
                b'#' if opens_block_comment(text, i, end) => {
                    self.position = skip_block_comment(text, i, end)
                }
                b'(' => {
                    self.position = i + 1;
                    return Some(Delimiter {
                        offset: i,
                        paren: Paren::Open,
                    });
                }
                b')' => {
                    self.position = i + 1;
                    return Some(Delimiter {
                        offset: i,
                        paren: Paren::Close,
                    });
                }
                _ => self.position = step(text, i),
            }
        }
        None
    }
}
