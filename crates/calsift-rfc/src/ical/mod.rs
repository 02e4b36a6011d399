//! iCalendar support (RFC 5545).

pub mod build;
pub mod core;
pub mod parse;
