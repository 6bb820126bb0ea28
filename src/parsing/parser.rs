use std::fmt;

use tracing::debug;

use super::Expr;
use crate::scanning::{scan, TextRange, TokenKind, TokenSpan};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsingError {
    UnexpectedEndOfInput(usize),
    UnmatchedCloseParen(usize),
}

impl ParsingError {
    pub fn offset(&self) -> usize {
        match self {
            ParsingError::UnexpectedEndOfInput(offset) => *offset,
            ParsingError::UnmatchedCloseParen(offset) => *offset,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ParsingError::UnexpectedEndOfInput(_) => "unexpected end of input".to_string(),
            ParsingError::UnmatchedCloseParen(_) => "unmatched closing parenthesis".to_string(),
        }
    }
}

impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at offset {}", self.message(), self.offset())
    }
}

impl std::error::Error for ParsingError {}

/// Read the first form in `text`. Anything after it is ignored.
pub fn parse(text: &str) -> Result<Expr, ParsingError> {
    let mut input = Parser::new(text);
    input.read_expression()
}

/// Read every top-level form in `text`.
pub fn parse_all(text: &str) -> Result<Vec<Expr>, ParsingError> {
    let mut input = Parser::new(text);
    let mut forms = Vec::new();

    while !input.is_finished() {
        forms.push(input.read_expression()?);
    }

    debug!(
        "Read {} form{}",
        forms.len(),
        if forms.len() == 1 { "" } else { "s" }
    );
    Ok(forms)
}

#[derive(Debug)]
struct Parser<'i> {
    source: &'i str,
    tokens: Vec<TokenSpan>,
    index: usize,
}

impl<'i> Parser<'i> {
    fn new(source: &'i str) -> Parser<'i> {
        let tokens = scan(source, TextRange::whole(source))
            .into_iter()
            .filter(|token| {
                !token
                    .kind
                    .is_comment()
            })
            .collect();

        Parser {
            source,
            tokens,
            index: 0,
        }
    }

    fn is_finished(&self) -> bool {
        self.index
            >= self
                .tokens
                .len()
    }

    fn next(&mut self) -> Option<TokenSpan> {
        let token = self
            .tokens
            .get(self.index)
            .copied()?;
        self.index += 1;
        Some(token)
    }

    fn peek(&self) -> Option<&TokenSpan> {
        self.tokens
            .get(self.index)
    }

    fn end_of_input(&self) -> ParsingError {
        ParsingError::UnexpectedEndOfInput(
            self.source
                .len(),
        )
    }

    fn read_expression(&mut self) -> Result<Expr, ParsingError> {
        let token = self
            .next()
            .ok_or_else(|| self.end_of_input())?;
        let text = token.text(self.source);

        match token.kind {
            TokenKind::Paren if text == "(" => self.read_list(),
            TokenKind::Paren => Err(ParsingError::UnmatchedCloseParen(token.offset)),
            TokenKind::String => self.read_string(text),
            _ => Ok(Expr::Symbol(text.to_string())),
        }
    }

    fn read_list(&mut self) -> Result<Expr, ParsingError> {
        let mut items = Vec::new();
        loop {
            match self.peek() {
                None => return Err(self.end_of_input()),
                Some(token) if token.kind == TokenKind::Paren && token.text(self.source) == ")" => {
                    self.index += 1;
                    return Ok(Expr::List(items));
                }
                Some(_) => items.push(self.read_expression()?),
            }
        }
    }

    /// Undo the escaping in a string literal, which arrives with its quotes.
    fn read_string(&self, literal: &str) -> Result<Expr, ParsingError> {
        let mut value = String::new();
        let mut chars = literal
            .chars()
            .skip(1);

        while let Some(c) = chars.next() {
            match c {
                '"' => return Ok(Expr::String(value)),
                '\\' => match chars.next() {
                    Some(escaped) => value.push(escaped),
                    None => break,
                },
                _ => value.push(c),
            }
        }

        Err(self.end_of_input())
    }
}
