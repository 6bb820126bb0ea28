//! Pull-style tokenization for consumers that want one token at a time.

use super::{head_symbol, next_span, TokenKind};

/// What a streamed token is, structurally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lexeme {
    /// An opening paren, with the lower-cased head symbol of the form it
    /// starts, if there is one. When there is, the next token is that
    /// symbol's atom.
    Open { head: Option<String> },
    Close,
    /// Any non-paren span: atoms, strings, comments.
    Span(TokenKind),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub offset: usize,
    pub length: usize,
    pub lexeme: Lexeme,
}

/// A source of tokens over some text. Consumers such as the indentation
/// engine are written against this so that alternative implementations can
/// stand in for the production one.
pub trait Tokenizer<'i> {
    /// Start over, reading tokens from the beginning of `text`.
    fn reset(&mut self, text: &'i str);

    fn next_token(&mut self) -> Option<Token>;
}

/// The production tokenizer: the scanner's rules, driven incrementally, with
/// head-symbol look-ahead on every opening paren.
#[derive(Debug, Default)]
pub struct StreamTokenizer<'i> {
    text: &'i str,
    position: usize,
}

impl<'i> StreamTokenizer<'i> {
    pub fn new() -> StreamTokenizer<'i> {
        StreamTokenizer {
            text: "",
            position: 0,
        }
    }
}

impl<'i> Tokenizer<'i> for StreamTokenizer<'i> {
    fn reset(&mut self, text: &'i str) {
        self.text = text;
        self.position = 0;
    }

    fn next_token(&mut self) -> Option<Token> {
        let text = self.text;
        let span = next_span(text, self.position, text.len())?;
        self.position = span.end();

        let lexeme = match span.kind {
            TokenKind::Paren if text.as_bytes()[span.offset] == b'(' => Lexeme::Open {
                head: head_symbol(text, span.offset, text.len()),
            },
            TokenKind::Paren => Lexeme::Close,
            kind => Lexeme::Span(kind),
        };

        Some(Token {
            offset: span.offset,
            length: span.length,
            lexeme,
        })
    }
}

impl<'i> Iterator for StreamTokenizer<'i> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}
