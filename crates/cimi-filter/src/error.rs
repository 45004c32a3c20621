//! Error types for the filter parser.

use thiserror::Error;

/// A specialized Result type for filter parsing operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Classification of a parse failure.
///
/// Every [`FilterError`] belongs to exactly one kind. Callers translating
/// failures into an outer protocol (e.g. an HTTP 400 payload) can branch on
/// the kind instead of the full variant set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input could not be tokenized.
    Lexical,
    /// The token stream violates the filter grammar.
    Syntax,
    /// A token was lexically plausible but failed literal validation.
    LiteralFormat,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Lexical => write!(f, "lexical"),
            ErrorKind::Syntax => write!(f, "syntax"),
            ErrorKind::LiteralFormat => write!(f, "literal format"),
        }
    }
}

/// Errors that can occur during filter parsing.
///
/// All positions are 0-indexed byte offsets into the input string. Parsing is
/// fail-fast: the first violation is returned and no partial result exists.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// A character that cannot start or continue any token.
    #[error("unexpected character '{character}' at position {position}")]
    UnexpectedCharacter {
        /// The character that could not be tokenized.
        character: char,
        /// Where the character occurred.
        position: usize,
    },

    /// A quoted string with no matching unescaped closing delimiter.
    #[error("unterminated string literal starting at position {position}")]
    UnterminatedString {
        /// Where the opening delimiter occurred.
        position: usize,
    },

    /// The filter expression is empty.
    #[error("filter expression is empty")]
    EmptyExpression,

    /// A token was encountered where the grammar forbids it.
    #[error("unexpected token '{token}' at position {position}")]
    UnexpectedToken {
        /// The offending token, as written.
        token: String,
        /// Where the token starts.
        position: usize,
    },

    /// The input ended while the grammar required more.
    #[error("unexpected end of filter expression at position {position}")]
    UnexpectedEndOfInput {
        /// The byte length of the input.
        position: usize,
    },

    /// An opening parenthesis with no matching closing parenthesis.
    #[error("unclosed parenthesis opened at position {position}")]
    UnclosedParenthesis {
        /// Where the unmatched `(` occurred.
        position: usize,
    },

    /// A complete filter was parsed but input remained.
    #[error("trailing input '{token}' at position {position}")]
    TrailingInput {
        /// The first unconsumed token.
        token: String,
        /// Where the unconsumed input starts.
        position: usize,
    },

    /// Parenthesized grouping nested beyond the supported depth.
    #[error("grouping nested too deeply at position {position}")]
    NestingTooDeep {
        /// Where the offending `(` occurred.
        position: usize,
    },

    /// Text that is not a valid integer literal.
    #[error("invalid integer literal '{text}' at position {position}")]
    InvalidInteger {
        /// The offending text.
        text: String,
        /// Where the literal starts.
        position: usize,
    },

    /// Text that is not a valid boolean literal.
    #[error("invalid boolean literal '{text}' at position {position}")]
    InvalidBoolean {
        /// The offending text.
        text: String,
        /// Where the literal starts.
        position: usize,
    },

    /// Text that is not a valid string literal.
    #[error("invalid string literal '{text}' at position {position}")]
    InvalidString {
        /// The offending text.
        text: String,
        /// Where the literal starts.
        position: usize,
    },

    /// Text that is not a valid date or date-time literal.
    #[error("invalid date-time literal '{text}' at position {position}")]
    InvalidDateTime {
        /// The offending text.
        text: String,
        /// Where the literal starts.
        position: usize,
    },
}

impl FilterError {
    /// Creates an unexpected token error.
    pub fn unexpected_token(token: impl Into<String>, position: usize) -> Self {
        FilterError::UnexpectedToken {
            token: token.into(),
            position,
        }
    }

    /// Creates an invalid integer literal error.
    pub fn invalid_integer(text: impl Into<String>, position: usize) -> Self {
        FilterError::InvalidInteger {
            text: text.into(),
            position,
        }
    }

    /// Creates an invalid boolean literal error.
    pub fn invalid_boolean(text: impl Into<String>, position: usize) -> Self {
        FilterError::InvalidBoolean {
            text: text.into(),
            position,
        }
    }

    /// Creates an invalid string literal error.
    pub fn invalid_string(text: impl Into<String>, position: usize) -> Self {
        FilterError::InvalidString {
            text: text.into(),
            position,
        }
    }

    /// Creates an invalid date-time literal error.
    pub fn invalid_date_time(text: impl Into<String>, position: usize) -> Self {
        FilterError::InvalidDateTime {
            text: text.into(),
            position,
        }
    }

    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FilterError::UnexpectedCharacter { .. } | FilterError::UnterminatedString { .. } => {
                ErrorKind::Lexical
            }
            FilterError::EmptyExpression
            | FilterError::UnexpectedToken { .. }
            | FilterError::UnexpectedEndOfInput { .. }
            | FilterError::UnclosedParenthesis { .. }
            | FilterError::TrailingInput { .. }
            | FilterError::NestingTooDeep { .. } => ErrorKind::Syntax,
            FilterError::InvalidInteger { .. }
            | FilterError::InvalidBoolean { .. }
            | FilterError::InvalidString { .. }
            | FilterError::InvalidDateTime { .. } => ErrorKind::LiteralFormat,
        }
    }

    /// Returns the byte offset the error points at (0 when the error has no
    /// anchor, as for an empty expression).
    pub fn position(&self) -> usize {
        match self {
            FilterError::EmptyExpression => 0,
            FilterError::UnexpectedCharacter { position, .. }
            | FilterError::UnterminatedString { position }
            | FilterError::UnexpectedToken { position, .. }
            | FilterError::UnexpectedEndOfInput { position }
            | FilterError::UnclosedParenthesis { position }
            | FilterError::TrailingInput { position, .. }
            | FilterError::NestingTooDeep { position }
            | FilterError::InvalidInteger { position, .. }
            | FilterError::InvalidBoolean { position, .. }
            | FilterError::InvalidString { position, .. }
            | FilterError::InvalidDateTime { position, .. } => *position,
        }
    }

    /// Shifts the error's position forward by `base` bytes.
    ///
    /// The literal parsers report positions relative to their own input; when
    /// they are invoked on a token inside a full filter, the grammar parser
    /// rebases the error onto the token's offset.
    pub fn offset(mut self, base: usize) -> Self {
        match &mut self {
            FilterError::EmptyExpression => {}
            FilterError::UnexpectedCharacter { position, .. }
            | FilterError::UnterminatedString { position }
            | FilterError::UnexpectedToken { position, .. }
            | FilterError::UnexpectedEndOfInput { position }
            | FilterError::UnclosedParenthesis { position }
            | FilterError::TrailingInput { position, .. }
            | FilterError::NestingTooDeep { position }
            | FilterError::InvalidInteger { position, .. }
            | FilterError::InvalidBoolean { position, .. }
            | FilterError::InvalidString { position, .. }
            | FilterError::InvalidDateTime { position, .. } => *position += base,
        }
        self
    }
}
