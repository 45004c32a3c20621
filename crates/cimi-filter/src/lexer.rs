//! Lexer (tokenizer) for filter expressions.

use std::iter::Peekable;
use std::str::Chars;

use crate::error::{FilterError, FilterResult};

/// A token in a filter expression.
///
/// The lexer only delimits and classifies token text; it never interprets
/// literal values. Quoted strings keep their delimiters and escape sequences,
/// digit runs and date-times keep their raw text. Value resolution belongs to
/// the literal parsers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterToken {
    /// A property name: letter-start, alphanumeric.
    Identifier(String),

    /// A run of ASCII digits, kept as raw text.
    Integer(String),

    /// A quoted string, kept as raw text including the delimiters.
    QuotedString(String),

    /// A date or date-time, kept as raw text.
    DateTime(String),

    /// The `and` keyword.
    And,

    /// The `or` keyword.
    Or,

    /// The `true` keyword.
    True,

    /// The `false` keyword.
    False,

    /// The `=` comparison operator.
    Equal,

    /// Opening parenthesis `(`.
    OpenParen,

    /// Closing parenthesis `)`.
    CloseParen,

    /// Opening bracket `[`.
    OpenBracket,

    /// Closing bracket `]`.
    CloseBracket,
}

impl std::fmt::Display for FilterToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterToken::Identifier(text)
            | FilterToken::Integer(text)
            | FilterToken::QuotedString(text)
            | FilterToken::DateTime(text) => f.write_str(text),
            FilterToken::And => f.write_str("and"),
            FilterToken::Or => f.write_str("or"),
            FilterToken::True => f.write_str("true"),
            FilterToken::False => f.write_str("false"),
            FilterToken::Equal => f.write_str("="),
            FilterToken::OpenParen => f.write_str("("),
            FilterToken::CloseParen => f.write_str(")"),
            FilterToken::OpenBracket => f.write_str("["),
            FilterToken::CloseBracket => f.write_str("]"),
        }
    }
}

/// A token with its position in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedToken {
    /// The token.
    pub token: FilterToken,
    /// The byte position where the token starts (0-indexed).
    pub position: usize,
}

/// Lexer for tokenizing filter expressions.
///
/// Tokenization is fail-fast: the first unrecognized character or
/// unterminated string aborts with a lexical error.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    /// Current byte position in the input string.
    position: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input string.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            position: 0,
        }
    }

    /// Peeks at the next character without consuming it.
    fn peek(&mut self) -> Option<&char> {
        self.chars.peek()
    }

    /// Consumes and returns the next character, updating position.
    fn next_char(&mut self) -> Option<char> {
        let c = self.chars.next();
        if let Some(ch) = c {
            self.position += ch.len_utf8();
        }
        c
    }

    /// Skips whitespace characters.
    fn skip_whitespace(&mut self) {
        while let Some(&c) = self.peek() {
            if c.is_whitespace() {
                self.next_char();
            } else {
                break;
            }
        }
    }

    /// Reads an identifier (alphanumeric word; caller checked the letter start).
    fn read_identifier(&mut self) -> String {
        let mut ident = String::new();
        while let Some(&c) = self.peek() {
            if c.is_alphanumeric() {
                ident.push(c);
                self.next_char();
            } else {
                break;
            }
        }
        ident
    }

    /// Reads a run of ASCII digits.
    fn read_digits(&mut self) -> String {
        let mut digits = String::new();
        while let Some(&c) = self.peek() {
            if c.is_ascii_digit() {
                digits.push(c);
                self.next_char();
            } else {
                break;
            }
        }
        digits
    }

    /// Extends a four-digit year into a raw date-time token.
    ///
    /// Consumes the maximal run of date-time characters; whether the result
    /// is actually a well-formed date or date-time is decided by the literal
    /// parser, not here.
    fn read_date_time(&mut self, year: String) -> String {
        let mut raw = year;
        while let Some(&c) = self.peek() {
            if c.is_ascii_digit() || matches!(c, 'T' | 'Z' | ':' | '.' | '+' | '-') {
                raw.push(c);
                self.next_char();
            } else {
                break;
            }
        }
        raw
    }

    /// Reads a quoted string as raw text, delimiters and escapes included.
    ///
    /// A backslash consumes the character that follows it, so an escaped
    /// delimiter does not terminate the string. The input ending before the
    /// closing delimiter is a lexical error.
    fn read_quoted_string(&mut self, quote: char, start: usize) -> FilterResult<String> {
        let mut raw = String::new();
        self.next_char();
        raw.push(quote);

        loop {
            match self.next_char() {
                None => return Err(FilterError::UnterminatedString { position: start }),
                Some('\\') => {
                    raw.push('\\');
                    match self.next_char() {
                        None => return Err(FilterError::UnterminatedString { position: start }),
                        Some(escaped) => raw.push(escaped),
                    }
                }
                Some(c) if c == quote => {
                    raw.push(c);
                    return Ok(raw);
                }
                Some(c) => raw.push(c),
            }
        }
    }

    /// Returns the next token with its position, or `None` at end of input.
    pub fn next_token(&mut self) -> FilterResult<Option<PositionedToken>> {
        self.skip_whitespace();

        let Some(&c) = self.peek() else {
            return Ok(None);
        };
        let token_start = self.position;

        let token = match c {
            '=' => {
                self.next_char();
                FilterToken::Equal
            }
            '(' => {
                self.next_char();
                FilterToken::OpenParen
            }
            ')' => {
                self.next_char();
                FilterToken::CloseParen
            }
            '[' => {
                self.next_char();
                FilterToken::OpenBracket
            }
            ']' => {
                self.next_char();
                FilterToken::CloseBracket
            }

            '\'' | '"' => FilterToken::QuotedString(self.read_quoted_string(c, token_start)?),

            _ if c.is_ascii_digit() => {
                let digits = self.read_digits();
                // A four-digit run directly followed by '-' starts a
                // YYYY-MM-DD pattern rather than a bare integer.
                if digits.len() == 4 && self.peek() == Some(&'-') {
                    FilterToken::DateTime(self.read_date_time(digits))
                } else {
                    FilterToken::Integer(digits)
                }
            }

            _ if c.is_alphabetic() => {
                let ident = self.read_identifier();
                // Keywords are case-sensitive; "AND" is an identifier.
                match ident.as_str() {
                    "and" => FilterToken::And,
                    "or" => FilterToken::Or,
                    "true" => FilterToken::True,
                    "false" => FilterToken::False,
                    _ => FilterToken::Identifier(ident),
                }
            }

            _ => {
                return Err(FilterError::UnexpectedCharacter {
                    character: c,
                    position: token_start,
                });
            }
        };

        Ok(Some(PositionedToken {
            token,
            position: token_start,
        }))
    }

    /// Collects all tokens with their positions.
    pub fn tokenize(mut self) -> FilterResult<Vec<PositionedToken>> {
        let mut tokens = Vec::new();
        while let Some(positioned_token) = self.next_token()? {
            tokens.push(positioned_token);
        }
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tokenizes and strips positions, for stream-shape assertions.
    fn tokens(input: &str) -> Vec<FilterToken> {
        Lexer::new(input)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|pt| pt.token)
            .collect()
    }

    #[test]
    fn test_tokenize_comparison() {
        assert_eq!(
            tokens("alpha=3"),
            vec![
                FilterToken::Identifier("alpha".to_string()),
                FilterToken::Equal,
                FilterToken::Integer("3".to_string()),
            ]
        );
    }

    #[test]
    fn test_tokenize_reversed_comparison() {
        assert_eq!(
            tokens("3=alpha"),
            vec![
                FilterToken::Integer("3".to_string()),
                FilterToken::Equal,
                FilterToken::Identifier("alpha".to_string()),
            ]
        );
    }

    #[test]
    fn test_tokenize_keywords() {
        assert_eq!(
            tokens("alpha=true and beta=false or gamma=3"),
            vec![
                FilterToken::Identifier("alpha".to_string()),
                FilterToken::Equal,
                FilterToken::True,
                FilterToken::And,
                FilterToken::Identifier("beta".to_string()),
                FilterToken::Equal,
                FilterToken::False,
                FilterToken::Or,
                FilterToken::Identifier("gamma".to_string()),
                FilterToken::Equal,
                FilterToken::Integer("3".to_string()),
            ]
        );
    }

    #[test]
    fn test_tokenize_keywords_are_case_sensitive() {
        // "AND" and "True" are plain identifiers, not keywords.
        assert_eq!(
            tokens("AND True"),
            vec![
                FilterToken::Identifier("AND".to_string()),
                FilterToken::Identifier("True".to_string()),
            ]
        );
    }

    #[test]
    fn test_tokenize_parentheses() {
        assert_eq!(
            tokens("(alpha=3)"),
            vec![
                FilterToken::OpenParen,
                FilterToken::Identifier("alpha".to_string()),
                FilterToken::Equal,
                FilterToken::Integer("3".to_string()),
                FilterToken::CloseParen,
            ]
        );
    }

    #[test]
    fn test_tokenize_indexed_property() {
        assert_eq!(
            tokens("property['beta']=4"),
            vec![
                FilterToken::Identifier("property".to_string()),
                FilterToken::OpenBracket,
                FilterToken::QuotedString("'beta'".to_string()),
                FilterToken::CloseBracket,
                FilterToken::Equal,
                FilterToken::Integer("4".to_string()),
            ]
        );
    }

    #[test]
    fn test_tokenize_quoted_string_keeps_raw_text() {
        assert_eq!(
            tokens(r#"name='al\'pha'"#),
            vec![
                FilterToken::Identifier("name".to_string()),
                FilterToken::Equal,
                FilterToken::QuotedString(r"'al\'pha'".to_string()),
            ]
        );
    }

    #[test]
    fn test_tokenize_double_quoted_string() {
        assert_eq!(
            tokens(r#"name="al\"pha""#),
            vec![
                FilterToken::Identifier("name".to_string()),
                FilterToken::Equal,
                FilterToken::QuotedString(r#""al\"pha""#.to_string()),
            ]
        );
    }

    #[test]
    fn test_tokenize_bare_integer() {
        assert_eq!(tokens("2012"), vec![FilterToken::Integer("2012".to_string())]);
        assert_eq!(tokens("00"), vec![FilterToken::Integer("00".to_string())]);
    }

    #[test]
    fn test_tokenize_date() {
        assert_eq!(
            tokens("created=2012-01-02"),
            vec![
                FilterToken::Identifier("created".to_string()),
                FilterToken::Equal,
                FilterToken::DateTime("2012-01-02".to_string()),
            ]
        );
    }

    #[test]
    fn test_tokenize_date_time_with_offset() {
        assert_eq!(
            tokens("created=2012-01-02T13:14:25.6-01:15"),
            vec![
                FilterToken::Identifier("created".to_string()),
                FilterToken::Equal,
                FilterToken::DateTime("2012-01-02T13:14:25.6-01:15".to_string()),
            ]
        );
    }

    #[test]
    fn test_tokenize_date_time_stops_at_delimiter() {
        assert_eq!(
            tokens("(created=2012-01-02T13:14:25.6Z)"),
            vec![
                FilterToken::OpenParen,
                FilterToken::Identifier("created".to_string()),
                FilterToken::Equal,
                FilterToken::DateTime("2012-01-02T13:14:25.6Z".to_string()),
                FilterToken::CloseParen,
            ]
        );
    }

    #[test]
    fn test_tokenize_positions() {
        let positioned = Lexer::new("alpha=3 and beta=4").tokenize().unwrap();
        let positions: Vec<usize> = positioned.iter().map(|pt| pt.position).collect();
        // alpha @0, = @5, 3 @6, and @8, beta @12, = @16, 4 @17
        assert_eq!(positions, vec![0, 5, 6, 8, 12, 16, 17]);
    }

    #[test]
    fn test_tokenize_empty_input() {
        assert_eq!(tokens(""), vec![]);
        assert_eq!(tokens("   \t\n"), vec![]);
    }

    #[test]
    fn test_error_unexpected_character() {
        let result = Lexer::new("alpha=3 % beta=4").tokenize();
        assert_eq!(
            result,
            Err(FilterError::UnexpectedCharacter {
                character: '%',
                position: 8,
            })
        );
    }

    #[test]
    fn test_error_unterminated_string() {
        let result = Lexer::new("name='alpha").tokenize();
        assert_eq!(result, Err(FilterError::UnterminatedString { position: 5 }));
    }

    #[test]
    fn test_error_unterminated_string_with_escaped_delimiter() {
        // The escaped quote does not close the string.
        let result = Lexer::new(r"name='alpha\'").tokenize();
        assert_eq!(result, Err(FilterError::UnterminatedString { position: 5 }));
    }
}
