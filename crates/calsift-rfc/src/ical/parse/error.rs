//! Parse error types for iCalendar documents.

use thiserror::Error;

/// What went wrong while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The document does not start with BEGIN:VCALENDAR.
    MissingBegin,
    /// A component was not terminated with a matching END line.
    MissingEnd,
    /// An END line named a different component than its BEGIN.
    MismatchedComponent,
    /// A content line has no property name.
    MissingPropertyName,
    /// A content line has no colon separating name and value.
    MissingColon,
    /// A parameter is malformed.
    InvalidParameter,
    /// A quoted parameter value is not closed.
    UnclosedQuote,
    /// A DATE value is malformed.
    InvalidDate,
    /// A DATE-TIME or TIME value is malformed.
    InvalidDateTime,
    /// An RRULE value is malformed.
    InvalidRRule,
    /// An RRULE carries both COUNT and UNTIL.
    UntilCountConflict,
}

impl ParseErrorKind {
    /// Returns a short human-readable description.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingBegin => "missing BEGIN:VCALENDAR",
            Self::MissingEnd => "missing END line",
            Self::MismatchedComponent => "mismatched BEGIN/END component",
            Self::MissingPropertyName => "missing property name",
            Self::MissingColon => "missing ':' separator",
            Self::InvalidParameter => "invalid parameter",
            Self::UnclosedQuote => "unclosed quoted parameter value",
            Self::InvalidDate => "invalid DATE value",
            Self::InvalidDateTime => "invalid DATE-TIME value",
            Self::InvalidRRule => "invalid RRULE value",
            Self::UntilCountConflict => "RRULE has both COUNT and UNTIL",
        }
    }
}

/// Parse error with source location.
#[derive(Debug, Clone, Error)]
#[error("{} at line {line}{}", kind.as_str(), context.as_deref().map(|c| format!(" ({c})")).unwrap_or_default())]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// 1-based source line number.
    pub line: usize,
    /// Optional extra context.
    pub context: Option<String>,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub const fn new(kind: ParseErrorKind, line: usize) -> Self {
        Self {
            kind,
            line,
            context: None,
        }
    }

    /// Attaches context to the error.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

pub type ParseResult<T> = std::result::Result<T, ParseError>;
