//! Recursive descent parser for filter expressions.

use crate::ast::{Filter, Literal, Operand, PropertyRef};
use crate::error::{FilterError, FilterResult};
use crate::lexer::{FilterToken, Lexer, PositionedToken};
use crate::literal;

/// Maximum depth of parenthesized grouping.
///
/// Grouping recursion consumes stack, so adversarial input like `((((...` is
/// rejected with [`FilterError::NestingTooDeep`] once it nests deeper than
/// this many levels.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Parser for CIMI filter expressions.
///
/// This parser implements a recursive descent parser for the filter grammar.
/// It supports equality comparisons between literals and property
/// references, combined with boolean operators with proper precedence.
///
/// # Grammar
///
/// ```text
/// filter       ::= or_expr
/// or_expr      ::= and_expr ("or" and_expr)*      // left-associative
/// and_expr     ::= primary ("and" primary)*       // left-associative
/// primary      ::= comparison | "(" filter ")"
/// comparison   ::= operand "=" operand
/// operand      ::= literal | property_ref
/// property_ref ::= identifier ("[" string_literal "]")?
/// literal      ::= integer | boolean | string | date_time
/// ```
///
/// # Operator Precedence (highest to lowest)
///
/// 1. `and` - binary, left-associative
/// 2. `or` - binary, left-associative
///
/// Parentheses may wrap any filter, not just comparisons, and are
/// transparent: `(alpha=3)` and `alpha=3` produce the same tree.
///
/// The parser consumes the entire input; trailing text after a complete
/// filter is a syntax error. There is no error recovery: the first violation
/// aborts the parse.
///
/// # Example
///
/// ```
/// use cimi_filter_rs::{Filter, FilterParser};
///
/// // Simple comparison
/// let filter = FilterParser::parse("alpha=3").unwrap();
/// assert!(matches!(filter, Filter::Comparison(_)));
///
/// // Boolean expression
/// let filter = FilterParser::parse("alpha=3 or beta=4").unwrap();
/// assert!(matches!(filter, Filter::Or(_, _)));
/// ```
pub struct FilterParser {
    tokens: Vec<PositionedToken>,
    position: usize,
    /// Current parenthesis nesting depth.
    depth: usize,
    /// Byte length of the input, for end-of-input diagnostics.
    input_len: usize,
}

impl FilterParser {
    /// Parses a filter expression string into a [`Filter`] AST.
    ///
    /// Each call operates on an independent input and produces an
    /// independent, immutable result; no state is shared between calls.
    ///
    /// # Errors
    ///
    /// Returns a [`FilterError`] describing the first point of failure
    /// (lexical, syntactic, or literal-format) with its byte position. No
    /// partial AST is ever returned.
    pub fn parse(input: &str) -> FilterResult<Filter> {
        let tokens = Lexer::new(input).tokenize()?;
        if tokens.is_empty() {
            return Err(FilterError::EmptyExpression);
        }

        let mut parser = Self {
            tokens,
            position: 0,
            depth: 0,
            input_len: input.len(),
        };
        let filter = parser.parse_expression()?;

        // Check that we consumed all tokens
        if let Some(remaining) = parser.peek() {
            return Err(FilterError::TrailingInput {
                token: remaining.token.to_string(),
                position: remaining.position,
            });
        }

        Ok(filter)
    }

    /// Returns the current token without consuming it.
    fn peek(&self) -> Option<&PositionedToken> {
        self.tokens.get(self.position)
    }

    /// Consumes and returns the current token.
    fn advance(&mut self) -> Option<&PositionedToken> {
        let token = self.tokens.get(self.position);
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    /// Checks if the current token matches the expected token type.
    fn check(&self, expected: &FilterToken) -> bool {
        self.peek().map(|positioned| &positioned.token) == Some(expected)
    }

    /// Builds the error for input ending where the grammar required more.
    fn end_of_input(&self) -> FilterError {
        FilterError::UnexpectedEndOfInput {
            position: self.input_len,
        }
    }

    /// Parses the top-level expression (OR expression).
    fn parse_expression(&mut self) -> FilterResult<Filter> {
        self.parse_or_expr()
    }

    /// Parses OR expressions: `and_expr ("or" and_expr)*`
    fn parse_or_expr(&mut self) -> FilterResult<Filter> {
        let mut left = self.parse_and_expr()?;

        while self.check(&FilterToken::Or) {
            self.advance(); // consume 'or'
            let right = self.parse_and_expr()?;
            left = Filter::or(left, right);
        }

        Ok(left)
    }

    /// Parses AND expressions: `primary ("and" primary)*`
    fn parse_and_expr(&mut self) -> FilterResult<Filter> {
        let mut left = self.parse_primary()?;

        while self.check(&FilterToken::And) {
            self.advance(); // consume 'and'
            let right = self.parse_primary()?;
            left = Filter::and(left, right);
        }

        Ok(left)
    }

    /// Parses primary expressions: `comparison | "(" filter ")"`
    fn parse_primary(&mut self) -> FilterResult<Filter> {
        if let Some(open) = self.peek() {
            if open.token == FilterToken::OpenParen {
                let open_position = open.position;
                if self.depth >= MAX_NESTING_DEPTH {
                    return Err(FilterError::NestingTooDeep {
                        position: open_position,
                    });
                }
                self.advance(); // consume '('
                self.depth += 1;
                let inner = self.parse_expression()?;
                self.depth -= 1;
                if !self.check(&FilterToken::CloseParen) {
                    return Err(FilterError::UnclosedParenthesis {
                        position: open_position,
                    });
                }
                self.advance(); // consume ')'
                // Grouping affects precedence only; the tree keeps no trace.
                return Ok(inner);
            }
        }

        self.parse_comparison()
    }

    /// Parses comparisons: `operand "=" operand`
    fn parse_comparison(&mut self) -> FilterResult<Filter> {
        let left = self.parse_operand()?;

        match self.advance().cloned() {
            Some(PositionedToken {
                token: FilterToken::Equal,
                ..
            }) => {}
            Some(PositionedToken { token, position }) => {
                return Err(FilterError::unexpected_token(token.to_string(), position));
            }
            None => return Err(self.end_of_input()),
        }

        let right = self.parse_operand()?;
        Ok(Filter::comparison(left, right))
    }

    /// Parses operands: `literal | property_ref`
    fn parse_operand(&mut self) -> FilterResult<Operand> {
        let Some(next) = self.advance().cloned() else {
            return Err(self.end_of_input());
        };

        match next.token {
            FilterToken::Identifier(name) => self.parse_property_index(name),

            FilterToken::True => Ok(Operand::Literal(Literal::Boolean(true))),
            FilterToken::False => Ok(Operand::Literal(Literal::Boolean(false))),

            FilterToken::Integer(text) => {
                let value =
                    literal::parse_integer(&text).map_err(|e| e.offset(next.position))?;
                Ok(Operand::Literal(Literal::Integer(value)))
            }

            FilterToken::QuotedString(raw) => {
                let value = literal::parse_string(&raw).map_err(|e| e.offset(next.position))?;
                Ok(Operand::Literal(Literal::String(value)))
            }

            FilterToken::DateTime(raw) => {
                let value =
                    literal::parse_date_time(&raw).map_err(|e| e.offset(next.position))?;
                Ok(Operand::Literal(Literal::DateTime(value)))
            }

            token => Err(FilterError::unexpected_token(
                token.to_string(),
                next.position,
            )),
        }
    }

    /// Parses the optional indexed access after a property name:
    /// `"[" string_literal "]"`
    fn parse_property_index(&mut self, name: String) -> FilterResult<Operand> {
        if !self.check(&FilterToken::OpenBracket) {
            return Ok(Operand::Property(PropertyRef::new(name)));
        }
        self.advance(); // consume '['

        let Some(key) = self.advance().cloned() else {
            return Err(self.end_of_input());
        };
        let index = match key.token {
            FilterToken::QuotedString(raw) => {
                literal::parse_string(&raw).map_err(|e| e.offset(key.position))?
            }
            token => {
                return Err(FilterError::unexpected_token(
                    token.to_string(),
                    key.position,
                ));
            }
        };

        match self.advance().cloned() {
            Some(PositionedToken {
                token: FilterToken::CloseBracket,
                ..
            }) => {}
            Some(PositionedToken { token, position }) => {
                return Err(FilterError::unexpected_token(token.to_string(), position));
            }
            None => return Err(self.end_of_input()),
        }

        Ok(Operand::Property(PropertyRef::indexed(name, index)))
    }
}
