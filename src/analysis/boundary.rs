use tracing::trace;

use crate::scanning::{clamp, Delimiter, Delimiters, Paren, TextRange};

/// Grow `range` outward to the smallest complete form enclosing all of it.
///
/// The enclosing form is the innermost `(` that is open at `range.start` and
/// still open at `range.end`; the result runs from that paren to just past its
/// matching `)`. When no form encloses the range the result starts at 0 and
/// ends just past the first unmatched `)` after the range, or at the end of
/// the text. An unterminated form likewise extends to the end of the text.
///
/// The string and comment state needed to recognize parens is established by
/// walking forward from the start of the text, so a range that begins inside
/// a string or comment is handled exactly like any other position.
pub fn expand_to_form_boundaries(range: TextRange, text: &str) -> TextRange {
    if text.is_empty() {
        return TextRange::empty(0);
    }

    let start = clamp(text, range.start);
    let end = clamp(text, range.end).max(start);

    let mut delimiters = Delimiters::new(text).peekable();
    let mut stack: Vec<usize> = Vec::new();

    // parens before the range establish what is open at its start
    while let Some(delimiter) = delimiters.next_if(|d| d.offset < start) {
        match delimiter.paren {
            Paren::Open => stack.push(delimiter.offset),
            Paren::Close => {
                stack.pop();
            }
        }
    }

    // the range itself may close some of those; the deepest survivor encloses it
    let mut floor = stack.len();
    while let Some(delimiter) = delimiters.next_if(|d| d.offset < end) {
        match delimiter.paren {
            Paren::Open => stack.push(delimiter.offset),
            Paren::Close => {
                stack.pop();
                floor = floor.min(stack.len());
            }
        }
    }

    let form_start = match floor {
        0 => 0,
        n => stack[n - 1],
    };

    let mut height = stack.len();
    let mut form_end = text.len();
    for delimiter in delimiters {
        match delimiter.paren {
            Paren::Open => height += 1,
            Paren::Close if height == floor => {
                form_end = delimiter.offset + 1;
                break;
            }
            Paren::Close => height -= 1,
        }
    }

    let expanded = TextRange::new(form_start, form_end);
    trace!(?range, ?expanded, "expanded to form boundaries");
    expanded
}

/// Offset of the paren matching the one at `position`, skipping over strings
/// and comments. `None` if there is no structural paren at `position` or it
/// is unmatched.
pub fn matching_paren(position: usize, text: &str) -> Option<usize> {
    let delimiters: Vec<Delimiter> = Delimiters::new(text).collect();
    let index = delimiters
        .binary_search_by_key(&position, |d| d.offset)
        .ok()?;

    let mut depth = 0usize;
    match delimiters[index].paren {
        Paren::Open => {
            for delimiter in &delimiters[index..] {
                match delimiter.paren {
                    Paren::Open => depth += 1,
                    Paren::Close => {
                        depth -= 1;
                        if depth == 0 {
                            return Some(delimiter.offset);
                        }
                    }
                }
            }
        }
        Paren::Close => {
            for delimiter in delimiters[..=index]
                .iter()
                .rev()
            {
                match delimiter.paren {
                    Paren::Close => depth += 1,
                    Paren::Open => {
                        depth -= 1;
                        if depth == 0 {
                            return Some(delimiter.offset);
                        }
                    }
                }
            }
        }
    }
    None
}
