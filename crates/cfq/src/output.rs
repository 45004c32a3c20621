//! Error rendering for the terminal.

use cimi_filter_rs::FilterError;
use owo_colors::OwoColorize;

/// Prints a parse error to stderr with a caret marking the offending
/// position in the input.
pub fn print_error(input: &str, error: &FilterError, use_colors: bool) {
    let caret = caret_line(input, error.position());
    if use_colors {
        eprintln!("{} {}", "error:".red(), error);
        eprintln!("  {input}");
        eprintln!("  {}", caret.red());
    } else {
        eprintln!("error: {error}");
        eprintln!("  {input}");
        eprintln!("  {caret}");
    }
}

/// Builds a line of spaces ending in a caret under the given byte position.
///
/// The column is counted in characters so the caret lines up even when the
/// input contains multi-byte text before the error.
fn caret_line(input: &str, position: usize) -> String {
    let column = input
        .char_indices()
        .take_while(|(index, _)| *index < position)
        .count();
    let mut line = " ".repeat(column);
    line.push('^');
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caret_at_start() {
        assert_eq!(caret_line("alpha=3", 0), "^");
    }

    #[test]
    fn test_caret_mid_input() {
        assert_eq!(caret_line("alpha=3 % beta", 8), "        ^");
    }

    #[test]
    fn test_caret_at_end_of_input() {
        // End-of-input errors point one past the last character.
        assert_eq!(caret_line("alpha=", 6), "      ^");
    }

    #[test]
    fn test_caret_after_multibyte_text() {
        // "é" is two bytes but one column.
        let input = "é=3 %";
        assert_eq!(caret_line(input, 5), "    ^");
    }
}
