//! The reader engine: the single entry point an editing or REPL host talks
//! to. It ties scanning, boundary detection, context, and indentation
//! together and keeps a short-lived cache of viewport analyses.

mod clock;
mod engine;

// Re-export all public symbols
pub use clock::*;
pub use engine::*;

use crate::analysis::FormContext;
use crate::scanning::{TextRange, TokenSpan};

/// Whether some input is ready to hand to an evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormCompletion {
    Complete,
    Incomplete { expecting: String },
    Invalid { error: String },
}

impl FormCompletion {
    pub fn is_complete(&self) -> bool {
        matches!(self, FormCompletion::Complete)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolType {
    Keyword,
    SpecialForm,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolInfo {
    pub name: String,
    pub range: TextRange,
    pub symbol_type: SymbolType,
    pub context: FormContext,
}

/// The analysis of one expanded viewport: the complete form(s) covering the
/// requested range, the context at their start, and all their tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    pub range: TextRange,
    pub context: FormContext,
    pub tokens: Vec<TokenSpan>,
}
