//! iCalendar core models (RFC 5545).
//!
//! These types favor round-trip fidelity: property order and unknown
//! properties are preserved exactly as parsed, and only the values the
//! duplicate filter reasons about are resolved into typed form.

mod component;
mod datetime;
mod property;
mod rrule;
mod value;

pub use component::{Component, ComponentKind, ICalendar};
pub use datetime::{Date, DateTime, DateTimeForm};
pub use property::{ContentLine, Parameter, Property};
pub use rrule::{Frequency, RRule, RRuleUntil, Weekday, WeekdayNum};
pub use value::Value;
