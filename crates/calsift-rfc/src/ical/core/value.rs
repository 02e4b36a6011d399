//! Typed property values (RFC 5545 §3.3).

use super::{Date, DateTime, RRule};

/// A resolved property value.
///
/// Only the value kinds the duplicate filter reasons about are typed;
/// everything else stays as text. The raw value string on the owning
/// [`super::Property`] is authoritative for serialization.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// TEXT value, unescaped.
    Text(String),
    /// DATE value.
    Date(Date),
    /// DATE-TIME value.
    DateTime(DateTime),
    /// RECUR (RRULE) value.
    Recur(RRule),
    /// Any value this crate does not resolve (kept verbatim).
    Raw(String),
}

impl Value {
    /// Returns the text content if this is a TEXT value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}
