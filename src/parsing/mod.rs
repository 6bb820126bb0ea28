//! A minimal reader turning scanned tokens into nested expressions, enough
//! for a REPL host to hand accepted input to an evaluator.

use std::path::Path;
use tracing::debug;

mod expr;
mod parser;

pub use expr::Expr;
pub use parser::{parse, parse_all, ParsingError};

/// Failure to read a source file, carrying enough to report it to the user.
#[derive(Debug, PartialEq, Eq)]
pub struct LoadingError<'i> {
    pub problem: String,
    pub details: String,
    pub filename: &'i Path,
}

impl std::fmt::Display for LoadingError<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.problem, self.filename.display())?;
        if !self
            .details
            .is_empty()
        {
            write!(f, " ({})", self.details)?;
        }
        Ok(())
    }
}

impl std::error::Error for LoadingError<'_> {}

/// Read a file and return an owned String. A filename of `-` reads standard
/// input instead.
pub fn load(filename: &Path) -> Result<String, LoadingError<'_>> {
    let result = if filename.as_os_str() == "-" {
        std::io::read_to_string(std::io::stdin())
    } else {
        std::fs::read_to_string(filename)
    };

    match result {
        Ok(content) => Ok(content),
        Err(error) => {
            debug!(?error);
            match error.kind() {
                std::io::ErrorKind::NotFound => Err(LoadingError {
                    problem: "File not found".to_string(),
                    details: String::new(),
                    filename,
                }),
                _ => Err(LoadingError {
                    problem: "Failed reading".to_string(),
                    details: error
                        .kind()
                        .to_string(),
                    filename,
                }),
            }
        }
    }
}
