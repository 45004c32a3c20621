//! CLI argument parsing using clap derive macros.

use clap::Parser;

/// cfq - parse and inspect CIMI filter expressions
#[derive(Parser, Debug)]
#[command(name = "cfq")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Filter expression to parse (e.g. "alpha=3 and beta=4")
    pub filter: String,

    /// Force JSON output
    #[arg(long)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long)]
    pub no_color: bool,

    /// Quiet mode (suppress the AST dump; errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Prefix repeated per nesting level in the AST dump
    #[arg(long, default_value = "> ")]
    pub prefix: String,
}
