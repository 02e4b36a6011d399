//! iCalendar parsing (RFC 5545).
//!
//! Lenient where real-world feeds require it (bare LF line endings,
//! unknown properties and components carried through as raw text),
//! strict about document structure (BEGIN/END matching).

mod error;
mod lexer;
mod parser;
mod values;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use parser::parse;
pub use values::{parse_date, parse_datetime, parse_rrule, unescape_text};
