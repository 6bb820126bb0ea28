//! Indentation derived from form context.
//!
//! A line is indented two columns per enclosing paren, plus two more when
//! the innermost enclosing form is one whose body gets extra indent (`defun`,
//! `let`, and friends). The innermost form is whatever `context_at()` reports
//! at the start of the line.

use serde::Serialize;

use super::context::{context_at, FormContext, FormStack};
use crate::scanning::{is_special_form, Lexeme, StreamTokenizer, Token, Tokenizer};

/// Columns per nesting level.
pub const INDENT_WIDTH: usize = 2;

/// Forms whose bodies get one extra level of indent by default.
pub const BODY_INDENT_FORMS: &[&str] = &["defun", "defmacro", "let", "let*", "labels", "flet"];

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct IndentInfo {
    pub level: usize,
    pub is_special_form: bool,
    pub form_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct IndentEngine {
    body_forms: Vec<String>,
}

impl Default for IndentEngine {
    fn default() -> Self {
        IndentEngine::with_body_forms(BODY_INDENT_FORMS.iter().copied())
    }
}

impl IndentEngine {
    pub fn new() -> IndentEngine {
        IndentEngine::default()
    }

    /// Use a different table of forms receiving extra body indent. Names are
    /// matched case-insensitively.
    pub fn with_body_forms<I, S>(forms: I) -> IndentEngine
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        IndentEngine {
            body_forms: forms
                .into_iter()
                .map(|form| {
                    form.as_ref()
                        .to_lowercase()
                })
                .collect(),
        }
    }

    fn extra_for(&self, form: Option<&str>) -> usize {
        match form {
            Some(name)
                if self
                    .body_forms
                    .iter()
                    .any(|f| f == name) =>
            {
                INDENT_WIDTH
            }
            _ => 0,
        }
    }

    fn info(&self, depth: usize, form: Option<&str>) -> IndentInfo {
        IndentInfo {
            level: depth * INDENT_WIDTH + self.extra_for(form),
            is_special_form: form.is_some_and(is_special_form),
            form_name: form.map(str::to_string),
        }
    }

    pub fn indent_for(&self, context: &FormContext) -> IndentInfo {
        self.info(
            context.depth,
            context
                .form_type
                .as_deref(),
        )
    }

    /// Indentation of the zero-origin line `line`. A line past the end of
    /// the text gets level 0.
    pub fn indent_line(&self, line: usize, text: &str) -> IndentInfo {
        match line_starts(text).nth(line) {
            Some(offset) => self.indent_for(&context_at(offset, text)),
            None => IndentInfo::default(),
        }
    }

    /// Indentation of every line, computed in a single pass with the
    /// production tokenizer.
    pub fn indent_lines(&self, text: &str) -> Vec<IndentInfo> {
        let mut tokenizer = StreamTokenizer::new();
        self.indent_lines_with(&mut tokenizer, text)
    }

    /// Indentation of every line, driven by the supplied tokenizer. Closing
    /// parens pop. An opening paren's head symbol is pushed only once the
    /// token after the paren (the head atom itself) lies before the line
    /// start, so a head on a later line than its `(` counts from the line
    /// after it, just as `context_at()` sees it.
    pub fn indent_lines_with<'i, T>(&self, tokenizer: &mut T, text: &'i str) -> Vec<IndentInfo>
    where
        T: Tokenizer<'i>,
    {
        tokenizer.reset(text);

        let mut forms = FormStack::new();
        let mut depth = 0usize;
        let mut pending: Option<Token> = tokenizer.next_token();
        let mut awaiting: Option<String> = None;
        let mut result = Vec::new();

        for start in line_starts(text) {
            while let Some(token) = pending.take() {
                if token.offset >= start {
                    pending = Some(token);
                    break;
                }
                if let Some(name) = awaiting.take() {
                    forms.push(name);
                }
                match token.lexeme {
                    Lexeme::Open { head } => {
                        depth += 1;
                        awaiting = head;
                    }
                    Lexeme::Close => {
                        depth = depth.saturating_sub(1);
                        forms.pop();
                    }
                    Lexeme::Span(_) => {}
                }
                pending = tokenizer.next_token();
            }

            result.push(self.info(
                depth,
                forms
                    .current()
                    .map(String::as_str),
            ));
        }

        result
    }
}

/// Byte offsets at which each line begins.
pub(crate) fn line_starts(text: &str) -> impl Iterator<Item = usize> + '_ {
    std::iter::once(0).chain(
        text.match_indices('\n')
            .map(|(i, _)| i + 1),
    )
}
