use serde::Serialize;

use crate::scanning::{
    clamp, head_symbol, opens_block_comment, skip_block_comment, skip_line_comment, skip_string,
};

/// What surrounds a given position: the innermost enclosing form's head
/// symbol, how deep the parens are nested, and whether a quote is in effect.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FormContext {
    pub form_type: Option<String>,
    pub depth: usize,
    pub is_quoted: bool,
    pub parent_form: Option<String>,
}

/// Stack of enclosing form names. Popping an empty stack is a no-op, as
/// unbalanced text routinely has more closers than openers.
#[derive(Debug, Clone, Default)]
pub(crate) struct FormStack {
    stack: Vec<String>,
}

impl FormStack {
    pub(crate) fn new() -> FormStack {
        FormStack { stack: vec![] }
    }

    pub(crate) fn push(&mut self, name: String) {
        self.stack
            .push(name);
    }

    pub(crate) fn pop(&mut self) -> Option<String> {
        self.stack
            .pop()
    }

    pub(crate) fn current(&self) -> Option<&String> {
        self.stack
            .last()
    }

    pub(crate) fn parent(&self) -> Option<&String> {
        let n = self
            .stack
            .len();
        if n > 1 {
            self.stack
                .get(n - 2)
        } else {
            None
        }
    }
}

/// Compute the context at `position` by walking `text[0, position)` once.
///
/// Every `(` pushes its head symbol, whatever it is, when one follows; every
/// `)` pops. A form with no head symbol, such as `((a 1))`'s inner list or
/// `()`, pushes nothing, so its closer pops the enclosing name.
pub fn context_at(position: usize, text: &str) -> FormContext {
    let end = clamp(text, position);
    let bytes = text.as_bytes();

    let mut forms = FormStack::new();
    let mut depth = 0usize;
    let mut quoted_at: Option<usize> = None;
    let mut i = 0;

    while i < end {
        match bytes[i] {
            b'"' => {
                i = skip_string(text, i, end);
                continue;
            }
            b';' => {
                i = skip_line_comment(text, i, end);
                continue;
            }
            b'#' if opens_block_comment(text, i, end) => {
                i = skip_block_comment(text, i, end);
                continue;
            }
            b'\'' => {
                if quoted_at.is_none() {
                    quoted_at = Some(depth);
                }
            }
            b'(' => {
                depth += 1;
                if let Some(name) = head_symbol(text, i, end) {
                    forms.push(name);
                }
            }
            b')' => {
                depth = depth.saturating_sub(1);
                forms.pop();
                if let Some(level) = quoted_at {
                    if depth <= level {
                        quoted_at = None;
                    }
                }
            }
            _ => {}
        }
        // every byte matched above is ASCII, anything else is skipped bytewise
        i += 1;
    }

    FormContext {
        form_type: forms
            .current()
            .cloned(),
        depth,
        is_quoted: quoted_at.is_some(),
        parent_form: forms
            .parent()
            .cloned(),
    }
}
