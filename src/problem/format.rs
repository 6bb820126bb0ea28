use owo_colors::OwoColorize;
use std::path::Path;
use turbolisp::parsing::{LoadingError, ParsingError};
use turbolisp::reader::FormCompletion;

/// Format a reader error as a single line.
pub fn concise_parsing_error(error: &ParsingError, filename: &Path, source: &str) -> String {
    let offset = error.offset();
    let line = calculate_line_number(source, offset) + 1;
    let column = calculate_column_number(source, offset) + 1;

    format!(
        "{}: {}:{}:{} {}",
        "error".bright_red(),
        filename.to_string_lossy(),
        line,
        column,
        error
            .message()
            .bold(),
    )
}

/// Format a LoadingError with concise single-line output
pub fn concise_loading_error(error: &LoadingError<'_>) -> String {
    format!(
        "{}: {}: {}",
        "error".bright_red(),
        error
            .filename
            .display(),
        error
            .problem
            .bold()
    )
}

/// One line describing whether the input is ready to evaluate.
pub fn completion_verdict(completion: &FormCompletion) -> String {
    match completion {
        FormCompletion::Complete => "complete".green().to_string(),
        FormCompletion::Incomplete { expecting } => {
            format!("{}: expecting {}", "incomplete".yellow(), expecting)
        }
        FormCompletion::Invalid { error } => {
            format!("{}: {}", "invalid".bright_red(), error.bold())
        }
    }
}

/// Zero-origin line containing `offset`.
pub fn calculate_line_number(content: &str, offset: usize) -> usize {
    content[..offset.min(content.len())]
        .bytes()
        .filter(|&b| b == b'\n')
        .count()
}

/// Zero-origin column of `offset`, counted in characters.
pub fn calculate_column_number(content: &str, offset: usize) -> usize {
    let before = &content[..offset.min(content.len())];
    match before.rfind('\n') {
        Some(start) => before[start + 1..]
            .chars()
            .count(),
        None => before
            .chars()
            .count(),
    }
}
