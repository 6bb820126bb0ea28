//! Incremental, context-aware analysis of Lisp source text for editors and
//! REPLs: tokens for a viewport, the form around a cursor, paren balance,
//! indentation, and bookkeeping of which regions need rescanning after an
//! edit.

pub mod analysis;
pub mod editor;
pub mod parsing;
pub mod reader;
mod regex;
pub mod scanning;
pub mod storage;
