//! Structural analysis built on the scanning rules: where forms begin and
//! end, whether parens balance, what form encloses a position, and how a
//! line should be indented.

mod balance;
mod boundary;
mod context;
mod indent;

// Re-export all public symbols
pub use balance::*;
pub use boundary::*;
pub use context::*;
pub use indent::*;
