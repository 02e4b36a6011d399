//! Duplicate-detection engine for calendar feeds.
//!
//! Decides whether two events - one of which may be a recurring series -
//! represent the same thing despite differing identifiers, slightly
//! different titles, differing recurrence boundaries, or differing time
//! zone representations, and removes the duplicates (plus keyword-matched
//! events) from a target calendar.
//!
//! The engine is synchronous and pure: all comparisons are predicates
//! over already-parsed events, and the only mutation is the removal of
//! events from the target calendar by the pipeline.

pub mod equivalence;
pub mod error;
pub mod interval;
pub mod pipeline;
pub mod recurrence;
pub mod title;

pub use error::{EngineError, EngineResult};
pub use pipeline::{filter_by_keyword, filter_duplicates};
pub use title::MatchPolicy;
