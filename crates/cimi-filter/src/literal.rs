//! Standalone parsers for the typed literal values of the filter grammar.
//!
//! Each parser validates its entire input: leading or trailing text that is
//! not part of the literal is an error, never ignored, and there are no
//! default values. The grammar parser calls these on token text, but they
//! are equally usable on bare input, e.g. validating a single field value
//! without a surrounding filter.
//!
//! Errors report positions relative to the given input; use
//! [`FilterError::offset`] to rebase them into a larger string.

use chrono::{DateTime, NaiveDate, NaiveTime};

use crate::ast::DateTimeValue;
use crate::error::{FilterError, FilterResult};

/// Parses an unsigned decimal integer literal.
///
/// Accepts one or more ASCII digits and nothing else; leading zeros are
/// allowed and do not change the value. Signs, whitespace, non-digit text,
/// the empty string, and values that do not fit in `i64` all fail.
///
/// # Example
///
/// ```
/// use cimi_filter_rs::parse_integer;
///
/// assert_eq!(parse_integer("9999").unwrap(), 9999);
/// assert_eq!(parse_integer("00").unwrap(), 0);
/// assert!(parse_integer("").is_err());
/// assert!(parse_integer("12a").is_err());
/// ```
pub fn parse_integer(text: &str) -> FilterResult<i64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FilterError::invalid_integer(text, 0));
    }
    // A pure digit run can still overflow i64; reject rather than wrap.
    text.parse()
        .map_err(|_| FilterError::invalid_integer(text, 0))
}

/// Parses a boolean literal.
///
/// Accepts exactly `true` or `false`; any other text, including
/// differently-cased variants, fails.
pub fn parse_boolean(text: &str) -> FilterResult<bool> {
    match text {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(FilterError::invalid_boolean(text, 0)),
    }
}

/// Parses a quoted string literal, resolving escapes.
///
/// The input must be delimited by a matching pair of `'` or `"`. Inside the
/// delimiters a backslash consumes the character that follows it and emits
/// that character literally; this is how the delimiter itself and a literal
/// backslash are written. The closing delimiter must end the input.
///
/// # Example
///
/// ```
/// use cimi_filter_rs::parse_string;
///
/// assert_eq!(parse_string("'alpha'").unwrap(), "alpha");
/// assert_eq!(parse_string(r"'al\'pha'").unwrap(), "al'pha");
/// assert_eq!(parse_string(r"'al\\pha'").unwrap(), r"al\pha");
/// ```
pub fn parse_string(text: &str) -> FilterResult<String> {
    let mut chars = text.chars();
    let quote = match chars.next() {
        Some(c @ ('\'' | '"')) => c,
        _ => return Err(FilterError::invalid_string(text, 0)),
    };

    let mut value = String::new();
    loop {
        match chars.next() {
            None => return Err(FilterError::UnterminatedString { position: 0 }),
            Some('\\') => match chars.next() {
                Some(escaped) => value.push(escaped),
                None => return Err(FilterError::UnterminatedString { position: 0 }),
            },
            Some(c) if c == quote => {
                // The closing delimiter must be the end of the input.
                if chars.next().is_some() {
                    return Err(FilterError::invalid_string(text, 0));
                }
                return Ok(value);
            }
            Some(c) => value.push(c),
        }
    }
}

/// Parses a date or date-time literal.
///
/// Accepts either a bare calendar date (`YYYY-MM-DD`, taken as midnight with
/// no offset) or a full RFC 3339 date-time (`YYYY-MM-DDThh:mm:ss` with
/// optional fractional seconds, followed by `Z` or an explicit `±hh:mm`
/// offset). Calendar fields are range-validated; an out-of-range field, a
/// malformed separator, a missing offset, or a malformed offset fails rather
/// than being clamped or defaulted.
///
/// # Example
///
/// ```
/// use cimi_filter_rs::parse_date_time;
///
/// assert!(parse_date_time("2012-01-02").is_ok());
/// assert!(parse_date_time("2012-01-02T13:14:25.6Z").is_ok());
/// assert!(parse_date_time("2012").is_err());
/// assert!(parse_date_time("2012-01-99T13:14:25.6Z").is_err());
/// ```
pub fn parse_date_time(text: &str) -> FilterResult<DateTimeValue> {
    // A bare calendar date never contains a time designator.
    if text.contains('T') || text.contains('t') {
        let instant = DateTime::parse_from_rfc3339(text)
            .map_err(|_| FilterError::invalid_date_time(text, 0))?;
        Ok(DateTimeValue::Fixed(instant))
    } else {
        let date = NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map_err(|_| FilterError::invalid_date_time(text, 0))?;
        Ok(DateTimeValue::Naive(date.and_time(NaiveTime::MIN)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use chrono::NaiveDate;

    // ==================== Integer Tests ====================

    #[test]
    fn test_parse_valid_integers() {
        let cases = [("0", 0), ("00", 0), ("01", 1), ("1", 1), ("123", 123), ("9999", 9999)];
        for (text, expected) in cases {
            assert_eq!(parse_integer(text).unwrap(), expected, "input: {text}");
        }
    }

    #[test]
    fn test_parse_invalid_integers() {
        for text in ["", "abc", "12a", "a12", "-1", "+1", " 1", "1 "] {
            let error = parse_integer(text).unwrap_err();
            assert!(
                matches!(error, FilterError::InvalidInteger { .. }),
                "input: {text:?}, got {error:?}"
            );
            assert_eq!(error.kind(), ErrorKind::LiteralFormat);
        }
    }

    #[test]
    fn test_parse_integer_overflow() {
        // 20 digits does not fit in i64.
        let error = parse_integer("99999999999999999999").unwrap_err();
        assert!(matches!(error, FilterError::InvalidInteger { .. }));
    }

    // ==================== Boolean Tests ====================

    #[test]
    fn test_parse_valid_booleans() {
        assert!(parse_boolean("true").unwrap());
        assert!(!parse_boolean("false").unwrap());
    }

    #[test]
    fn test_parse_invalid_booleans() {
        for text in ["", "True", "FALSE", "yes", "0", "truee"] {
            let error = parse_boolean(text).unwrap_err();
            assert!(
                matches!(error, FilterError::InvalidBoolean { .. }),
                "input: {text:?}, got {error:?}"
            );
            assert_eq!(error.kind(), ErrorKind::LiteralFormat);
        }
    }

    // ==================== String Tests ====================

    #[test]
    fn test_parse_string_escapes() {
        let cases = [
            ("'alpha'", "alpha"),
            ("\"alpha\"", "alpha"),
            (r"'al\\pha'", r"al\pha"),
            (r#""al\\pha""#, r"al\pha"),
            (r"'al\'pha'", "al'pha"),
            (r#""al\"pha""#, "al\"pha"),
            (r"'\\pha'", r"\pha"),
            (r#""\\pha""#, r"\pha"),
            (r"'\'pha'", "'pha"),
            (r#""\"pha""#, "\"pha"),
            (r"'al\\'", r"al\"),
            (r#""al\\""#, r"al\"),
            (r"'al\''", "al'"),
            (r#""al\"""#, "al\""),
        ];
        for (text, expected) in cases {
            assert_eq!(parse_string(text).unwrap(), expected, "input: {text}");
        }
    }

    #[test]
    fn test_parse_string_empty_value() {
        assert_eq!(parse_string("''").unwrap(), "");
        assert_eq!(parse_string(r#""""#).unwrap(), "");
    }

    #[test]
    fn test_parse_string_missing_delimiters() {
        for text in ["", "alpha", "3"] {
            let error = parse_string(text).unwrap_err();
            assert!(
                matches!(error, FilterError::InvalidString { .. }),
                "input: {text:?}, got {error:?}"
            );
        }
    }

    #[test]
    fn test_parse_string_unterminated() {
        for text in ["'alpha", r"'alpha\'", "'alpha\"", r"'alpha\"] {
            let error = parse_string(text).unwrap_err();
            assert!(
                matches!(error, FilterError::UnterminatedString { .. }),
                "input: {text:?}, got {error:?}"
            );
            assert_eq!(error.kind(), ErrorKind::Lexical);
        }
    }

    #[test]
    fn test_parse_string_trailing_garbage() {
        let error = parse_string("'alpha'x").unwrap_err();
        assert!(matches!(error, FilterError::InvalidString { .. }));
    }

    #[test]
    fn test_parse_string_mismatched_delimiters_fail() {
        // A double quote inside single quotes is plain content, so the
        // string never terminates.
        let error = parse_string(r#"'alpha""#).unwrap_err();
        assert!(matches!(error, FilterError::UnterminatedString { .. }));
    }

    // ==================== Date-Time Tests ====================

    #[test]
    fn test_parse_bare_date() {
        let value = parse_date_time("2012-01-02").unwrap();
        let expected = NaiveDate::from_ymd_opt(2012, 1, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(value, DateTimeValue::Naive(expected));
        assert_eq!(value.offset(), None);
    }

    #[test]
    fn test_parse_date_time_utc() {
        let value = parse_date_time("2012-01-02T13:14:25.6Z").unwrap();
        let DateTimeValue::Fixed(instant) = value else {
            panic!("expected a fixed-offset date-time");
        };
        assert_eq!(instant.offset().local_minus_utc(), 0);
        assert_eq!(
            instant.naive_utc(),
            NaiveDate::from_ymd_opt(2012, 1, 2)
                .unwrap()
                .and_hms_milli_opt(13, 14, 25, 600)
                .unwrap()
        );
    }

    #[test]
    fn test_parse_date_time_negative_offset() {
        let value = parse_date_time("2012-01-02T13:14:25.6-01:15").unwrap();
        let DateTimeValue::Fixed(instant) = value else {
            panic!("expected a fixed-offset date-time");
        };
        assert_eq!(instant.offset().local_minus_utc(), -(3600 + 15 * 60));
        assert_eq!(
            instant.naive_local(),
            NaiveDate::from_ymd_opt(2012, 1, 2)
                .unwrap()
                .and_hms_milli_opt(13, 14, 25, 600)
                .unwrap()
        );
    }

    #[test]
    fn test_parse_date_time_positive_offset() {
        let value = parse_date_time("2012-01-02T13:14:25.6+02:30").unwrap();
        let DateTimeValue::Fixed(instant) = value else {
            panic!("expected a fixed-offset date-time");
        };
        assert_eq!(instant.offset().local_minus_utc(), 2 * 3600 + 30 * 60);
    }

    #[test]
    fn test_parse_invalid_dates() {
        let invalid = [
            // Incomplete.
            "2012",
            // Day out of range.
            "2012-01-99T13:14:25.6Z",
            // Bad zone marker.
            "2012-01-99T13:14:25.6Q",
            // Malformed date separator and hour out of range.
            "2012-01:02T25:14:25.6-01:15",
            // Malformed offset separator.
            "2012-01-02T13:14:25.6+02-30",
            // Missing offset entirely.
            "2012-01-02T13:14:25.6",
            // Day out of range on a bare date.
            "2012-01-99",
            // Trailing garbage.
            "2012-01-02x",
            "",
        ];
        for text in invalid {
            let error = parse_date_time(text).unwrap_err();
            assert!(
                matches!(error, FilterError::InvalidDateTime { .. }),
                "input: {text:?}, got {error:?}"
            );
            assert_eq!(error.kind(), ErrorKind::LiteralFormat);
        }
    }

    #[test]
    fn test_parse_date_time_no_silent_clamping() {
        // 2012 was a leap year; 2013 was not.
        assert!(parse_date_time("2012-02-29").is_ok());
        assert!(parse_date_time("2013-02-29").is_err());
    }
}
