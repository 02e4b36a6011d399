//! iCalendar (RFC 5545) model, parser, and serializer for the calsift
//! feed filter.
//!
//! The model is deliberately narrower than a full CalDAV implementation:
//! it resolves the value types the duplicate filter cares about (DATE,
//! DATE-TIME, RRULE) and carries everything else as raw text so that a
//! parsed feed can be re-serialized without loss.

pub mod error;
pub mod ical;
