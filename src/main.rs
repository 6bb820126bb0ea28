use clap::value_parser;
use clap::{Arg, ArgAction, ArgMatches, Command};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, Level};

use turbolisp::analysis::{context_at, IndentEngine};
use turbolisp::parsing;
use turbolisp::reader::{FormCompletion, ReaderEngine};
use turbolisp::scanning::TextRange;

mod problem;

use problem::*;

fn main() {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    let matches = Command::new("turbolisp")
        .version(VERSION)
        .propagate_version(true)
        .about("Incremental structural analysis of Lisp source text.")
        .disable_help_subcommand(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Log more detail to standard error. Repeat for more."),
        )
        .subcommand(
            Command::new("tokens")
                .about("List the tokens in a region of the given file")
                .arg(
                    Arg::new("start")
                        .long("start")
                        .value_parser(value_parser!(usize))
                        .help("Byte offset where the region of interest begins. Defaults to the start of the file."),
                )
                .arg(
                    Arg::new("end")
                        .long("end")
                        .value_parser(value_parser!(usize))
                        .help("Byte offset where the region of interest ends. Defaults to the end of the file."),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Emit the tokens as JSON."),
                )
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The file containing the source to scan, or - to read standard input."),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Check that the given file reads as complete, balanced forms")
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The file containing the source to check, or - to read standard input."),
                ),
        )
        .subcommand(
            Command::new("indent")
                .about("Show the indentation level of every line of the given file")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Emit the indentation of each line as JSON."),
                )
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The file containing the source to indent, or - to read standard input."),
                ),
        )
        .subcommand(
            Command::new("context")
                .about("Describe the form enclosing the given offset")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Emit the context as JSON."),
                )
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The file containing the source, or - to read standard input."),
                )
                .arg(
                    Arg::new("offset")
                        .required(true)
                        .value_parser(value_parser!(usize))
                        .help("Byte offset of interest in the file."),
                ),
        )
        .subcommand(
            Command::new("match")
                .about("Find the paren matching the one at the given offset")
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The file containing the source, or - to read standard input."),
                )
                .arg(
                    Arg::new("offset")
                        .required(true)
                        .value_parser(value_parser!(usize))
                        .help("Byte offset of a parenthesis in the file."),
                ),
        )
        .get_matches();

    let level = match matches.get_count("verbose") {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    match matches.subcommand() {
        Some(("tokens", submatches)) => tokens(submatches),
        Some(("check", submatches)) => check(submatches),
        Some(("indent", submatches)) => indent(submatches),
        Some(("context", submatches)) => context(submatches),
        Some(("match", submatches)) => matching(submatches),
        Some(_) => {
            println!("No valid subcommand was used")
        }
        None => {
            println!("usage: turbolisp [COMMAND] ...");
            println!("Try '--help' for more information.");
        }
    }
}

/// Load the named file, or report why it could not be read and exit.
fn load(submatches: &ArgMatches) -> (&Path, String) {
    let filename = match submatches.get_one::<String>("filename") {
        Some(filename) => Path::new(filename),
        None => {
            eprintln!("{}: no filename given", "error".bright_red());
            std::process::exit(2);
        }
    };
    debug!(?filename);

    match parsing::load(filename) {
        Ok(content) => (filename, content),
        Err(error) => {
            eprintln!("{}", concise_loading_error(&error));
            std::process::exit(1);
        }
    }
}

fn tokens(submatches: &ArgMatches) {
    let (_, content) = load(submatches);

    let start = submatches
        .get_one::<usize>("start")
        .copied()
        .unwrap_or(0);
    let end = submatches
        .get_one::<usize>("end")
        .copied()
        .unwrap_or(content.len());

    let mut engine = ReaderEngine::new();
    let tokens = engine.tokenize_viewport(&content, TextRange::new(start, end));

    if submatches.get_flag("json") {
        print_json(&tokens);
        return;
    }

    for token in &tokens {
        println!(
            "{:>6} {:>4} {:<12} {:?}",
            token.offset,
            token.length,
            format!("{:?}", token.kind),
            token.text(&content)
        );
    }
}

fn check(submatches: &ArgMatches) {
    let (filename, content) = load(submatches);

    let engine = ReaderEngine::new();
    let completion = engine.is_form_complete(&content);
    println!("{}", completion_verdict(&completion));

    let mut failed = matches!(completion, FormCompletion::Invalid { .. });

    match parsing::parse_all(&content) {
        Ok(forms) => debug!(forms = forms.len()),
        Err(error) => {
            eprintln!("{}", concise_parsing_error(&error, filename, &content));
            failed = true;
        }
    }

    if failed {
        std::process::exit(1);
    }
}

fn indent(submatches: &ArgMatches) {
    let (_, content) = load(submatches);

    let indenter = IndentEngine::new();
    let levels = indenter.indent_lines(&content);

    if submatches.get_flag("json") {
        print_json(&levels);
        return;
    }

    for ((i, info), line) in levels
        .iter()
        .enumerate()
        .zip(content.lines())
    {
        println!(
            "{:>4} {:>3} {}{}",
            i + 1,
            info.level,
            " ".repeat(info.level),
            line.trim_start()
        );
    }
}

fn context(submatches: &ArgMatches) {
    let (_, content) = load(submatches);

    let offset = submatches
        .get_one::<usize>("offset")
        .copied()
        .unwrap_or(0);

    let context = context_at(offset, &content);

    if submatches.get_flag("json") {
        print_json(&context);
        return;
    }

    println!("depth  {}", context.depth);
    println!(
        "form   {}",
        context
            .form_type
            .as_deref()
            .unwrap_or("-")
    );
    println!(
        "parent {}",
        context
            .parent_form
            .as_deref()
            .unwrap_or("-")
    );
    println!("quoted {}", context.is_quoted);
}

fn matching(submatches: &ArgMatches) {
    let (_, content) = load(submatches);

    let offset = submatches
        .get_one::<usize>("offset")
        .copied()
        .unwrap_or(0);

    let engine = ReaderEngine::new();
    match engine.find_matching_paren(offset, &content) {
        Some(other) => println!("{}", other),
        None => {
            eprintln!(
                "{}: no matching paren for offset {}",
                "error".bright_red(),
                offset
            );
            std::process::exit(1);
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(error) => {
            eprintln!("{}: {}", "error".bright_red(), error);
            std::process::exit(1);
        }
    }
}
