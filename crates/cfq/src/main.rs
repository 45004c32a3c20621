use clap::Parser;
use std::process::ExitCode;

mod cli;
mod output;

use cimi_filter_rs::{ErrorKind, FilterError, FilterParser};
use cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match FilterParser::parse(&cli.filter) {
        Ok(filter) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&filter).unwrap());
            } else if !cli.quiet {
                print!("{}", filter.dump(&cli.prefix));
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                        "position": e.position(),
                    }
                });
                eprintln!("{}", serde_json::to_string_pretty(&error_json).unwrap());
            } else {
                output::print_error(&cli.filter, &e, !cli.no_color);
            }
            error_exit_code(&e)
        }
    }
}

/// Returns the error code string for JSON output.
fn error_code(e: &FilterError) -> &'static str {
    match e.kind() {
        ErrorKind::Lexical => "LEXICAL_ERROR",
        ErrorKind::Syntax => "SYNTAX_ERROR",
        ErrorKind::LiteralFormat => "LITERAL_FORMAT_ERROR",
    }
}

/// Returns the exit code for a parse failure.
fn error_exit_code(e: &FilterError) -> ExitCode {
    match e.kind() {
        ErrorKind::Lexical => ExitCode::from(2),
        ErrorKind::Syntax => ExitCode::from(3),
        ErrorKind::LiteralFormat => ExitCode::from(4),
    }
}
