//! Abstract Syntax Tree (AST) for filter expressions.

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Represents a parsed filter expression.
///
/// The `Filter` enum is the AST for CIMI filter expressions: comparisons
/// combined with `and`/`or`. Both combinators are binary and
/// left-associative, and `and` binds tighter than `or`, so
/// `a=1 and b=2 or c=3` parses to `Or(And(a=1, b=2), c=3)`. Parenthesized
/// grouping affects only parse-time precedence and leaves no trace in the
/// tree.
///
/// The tree is immutable once constructed. External consumers (such as a
/// filter-evaluation engine) traverse it by pattern matching on the
/// variants; no runtime type inspection is involved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Filter {
    /// A single `left = right` comparison.
    Comparison(Comparison),

    /// Logical AND of two filters.
    And(Box<Filter>, Box<Filter>),

    /// Logical OR of two filters.
    Or(Box<Filter>, Box<Filter>),
}

/// An equality comparison between two operands.
///
/// Equality is the only comparison operator of the grammar. Operand order is
/// preserved exactly as written: `3=alpha` keeps the literal on the left.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    /// The left-hand operand, as written.
    pub left: Operand,
    /// The right-hand operand, as written.
    pub right: Operand,
}

/// One side of a comparison: a literal value or a property reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operand {
    /// A typed constant value.
    Literal(Literal),
    /// A named attribute access.
    Property(PropertyRef),
}

/// A named attribute access, optionally refined by an indexed sub-key.
///
/// `alpha` references the attribute `alpha`; `property['beta']` references
/// the `beta` entry of the `property` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyRef {
    /// The attribute name.
    pub name: String,
    /// The indexed sub-key, with string escapes resolved.
    pub index: Option<String>,
}

impl PropertyRef {
    /// Creates a plain property reference.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            index: None,
        }
    }

    /// Creates an indexed property reference.
    pub fn indexed(name: impl Into<String>, index: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            index: Some(index.into()),
        }
    }
}

impl std::fmt::Display for PropertyRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.index {
            Some(index) => write!(f, "{}['{}']", self.name, index),
            None => f.write_str(&self.name),
        }
    }
}

/// A typed constant value appearing in a comparison.
///
/// Literals carry exact, escape-resolved, validated values, never raw token
/// text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Literal {
    /// A decimal integer.
    Integer(i64),
    /// `true` or `false`.
    Boolean(bool),
    /// A quoted string with escapes resolved.
    String(String),
    /// A calendar date or date-time.
    DateTime(DateTimeValue),
}

/// A parsed date or date-time literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateTimeValue {
    /// A bare calendar date, taken as midnight with no explicit offset.
    Naive(NaiveDateTime),
    /// A full date-time pinned to an explicit UTC offset (`Z` or `±hh:mm`).
    Fixed(DateTime<FixedOffset>),
}

impl DateTimeValue {
    /// The wall-clock fields as written in the filter.
    pub fn naive_local(&self) -> NaiveDateTime {
        match self {
            DateTimeValue::Naive(datetime) => *datetime,
            DateTimeValue::Fixed(datetime) => datetime.naive_local(),
        }
    }

    /// The explicit UTC offset, if one was written.
    pub fn offset(&self) -> Option<FixedOffset> {
        match self {
            DateTimeValue::Naive(_) => None,
            DateTimeValue::Fixed(datetime) => Some(*datetime.offset()),
        }
    }
}

impl std::fmt::Display for DateTimeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateTimeValue::Naive(datetime) => write!(f, "{datetime}"),
            DateTimeValue::Fixed(datetime) => f.write_str(&datetime.to_rfc3339()),
        }
    }
}

impl Filter {
    /// Creates an AND filter from two filters.
    ///
    /// # Example
    ///
    /// ```
    /// use cimi_filter_rs::{Filter, FilterParser};
    ///
    /// let filter = FilterParser::parse("alpha=3 and beta=4").unwrap();
    /// assert!(matches!(filter, Filter::And(_, _)));
    /// ```
    pub fn and(left: Filter, right: Filter) -> Self {
        Filter::And(Box::new(left), Box::new(right))
    }

    /// Creates an OR filter from two filters.
    ///
    /// # Example
    ///
    /// ```
    /// use cimi_filter_rs::{Filter, FilterParser};
    ///
    /// let filter = FilterParser::parse("alpha=3 or beta=4").unwrap();
    /// assert!(matches!(filter, Filter::Or(_, _)));
    /// ```
    pub fn or(left: Filter, right: Filter) -> Self {
        Filter::Or(Box::new(left), Box::new(right))
    }

    /// Creates a comparison filter from two operands.
    pub fn comparison(left: Operand, right: Operand) -> Self {
        Filter::Comparison(Comparison { left, right })
    }

    /// Renders the expression tree for diagnostics, one node per line, each
    /// line carrying one copy of `prefix` per nesting level.
    ///
    /// The output is a debugging aid only; nothing evaluates it.
    ///
    /// # Example
    ///
    /// ```
    /// use cimi_filter_rs::FilterParser;
    ///
    /// let filter = FilterParser::parse("alpha=3").unwrap();
    /// let expected = "\
    /// > Comparison
    /// > > Property alpha
    /// > > Integer 3
    /// ";
    /// assert_eq!(filter.dump("> "), expected);
    /// ```
    pub fn dump(&self, prefix: &str) -> String {
        let mut out = String::new();
        self.dump_node(prefix, 1, &mut out);
        out
    }

    fn dump_node(&self, prefix: &str, depth: usize, out: &mut String) {
        match self {
            Filter::Comparison(comparison) => {
                dump_line(out, prefix, depth, "Comparison");
                comparison.left.dump_node(prefix, depth + 1, out);
                comparison.right.dump_node(prefix, depth + 1, out);
            }
            Filter::And(left, right) => {
                dump_line(out, prefix, depth, "And");
                left.dump_node(prefix, depth + 1, out);
                right.dump_node(prefix, depth + 1, out);
            }
            Filter::Or(left, right) => {
                dump_line(out, prefix, depth, "Or");
                left.dump_node(prefix, depth + 1, out);
                right.dump_node(prefix, depth + 1, out);
            }
        }
    }
}

impl Operand {
    fn dump_node(&self, prefix: &str, depth: usize, out: &mut String) {
        let label = match self {
            Operand::Property(property) => format!("Property {property}"),
            Operand::Literal(Literal::Integer(value)) => format!("Integer {value}"),
            Operand::Literal(Literal::Boolean(value)) => format!("Boolean {value}"),
            Operand::Literal(Literal::String(value)) => format!("String {value:?}"),
            Operand::Literal(Literal::DateTime(value)) => format!("DateTime {value}"),
        };
        dump_line(out, prefix, depth, &label);
    }
}

fn dump_line(out: &mut String, prefix: &str, depth: usize, label: &str) {
    for _ in 0..depth {
        out.push_str(prefix);
    }
    out.push_str(label);
    out.push('\n');
}
