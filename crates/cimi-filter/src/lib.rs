//! Parser for CIMI `$filter` query expressions.
//!
//! This crate turns a client-supplied filter string (e.g.
//! `alpha=3 and beta=4 or gamma=5`) into a typed expression tree, or fails
//! with a single classified diagnostic pointing at the offending input. The
//! resulting [`Filter`] AST is consumed by an external evaluation engine;
//! this crate ends at the parse.
//!
//! # Supported Syntax
//!
//! ## Comparisons
//! - `alpha=3` - property compared against a literal
//! - `3=alpha` - operand order is preserved as written
//! - `property['beta']=4` - indexed property access
//!
//! ## Literals
//! - Integers: `3`, `00`, `9999`
//! - Booleans: `true`, `false`
//! - Strings: `'alpha'` or `"alpha"`, with backslash escapes (`'al\'pha'`)
//! - Dates: `2012-01-02`, `2012-01-02T13:14:25.6Z`,
//!   `2012-01-02T13:14:25.6+02:30`
//!
//! ## Boolean Operators
//! - `and` - binds tighter than `or`
//! - `or`
//! - `()` - grouping, transparent to the resulting tree
//!
//! Keywords are case-sensitive.
//!
//! # Example
//!
//! ```
//! use cimi_filter_rs::{Filter, FilterParser};
//!
//! // Parse a filter expression
//! let filter = FilterParser::parse("alpha=3 and beta=4 or gamma=5").unwrap();
//! assert!(matches!(filter, Filter::Or(_, _)));
//!
//! // Failures carry a kind and a byte position
//! let error = FilterParser::parse("alpha=3 %").unwrap_err();
//! assert_eq!(error.position(), 8);
//! ```
//!
//! The literal parsers are also reachable on their own for callers that only
//! need value parsing:
//!
//! ```
//! use cimi_filter_rs::parse_boolean;
//!
//! assert!(parse_boolean("true").unwrap());
//! assert!(parse_boolean("True").is_err());
//! ```

mod ast;
mod error;
mod lexer;
mod literal;
mod parser;

pub use ast::{Comparison, DateTimeValue, Filter, Literal, Operand, PropertyRef};
pub use error::{ErrorKind, FilterError, FilterResult};
pub use literal::{parse_boolean, parse_date_time, parse_integer, parse_string};
pub use parser::{FilterParser, MAX_NESTING_DEPTH};
