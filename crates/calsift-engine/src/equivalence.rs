//! Event equivalence predicates.
//!
//! Two predicates, one per event class. Single events are equivalent
//! when they overlap in time and their titles match. Recurring events
//! go through a cascade: matching titles, identical recurrence shape,
//! intersecting series lifetimes, and overlapping daily timing. Mixed
//! pairs (one recurring, one not) are never compared; the pipeline
//! keeps the two classes apart.

use calsift_rfc::ical::core::{Component, RRule};

use crate::error::{EngineError, EngineResult};
use crate::interval::{events_overlap, start_instant, OverlapMode};
use crate::recurrence::{lifetimes_intersect, same_structure};
use crate::title::{titles_match, MatchPolicy};

/// Determines whether two single (non-recurring) events are duplicates:
/// their spans overlap and their titles match under the policy.
#[must_use]
pub fn single_events_duplicate(
    candidate: &Component,
    reference: &Component,
    policy: &MatchPolicy,
) -> bool {
    events_overlap(candidate, reference, OverlapMode::Instant)
        && titles_match(candidate.summary(), reference.summary(), policy)
}

/// Determines whether two recurring events describe the same series.
///
/// The cascade short-circuits cheapest-first: titles, recurrence shape,
/// lifetime intersection, then daily timing. A missing anchor makes the
/// pair non-equivalent without error.
///
/// ## Errors
///
/// Returns an error when either event carries a malformed RRULE or the
/// recurrence library rejects a rule during expansion. The caller
/// decides how to degrade; the pair is never silently treated as a
/// duplicate.
pub fn recurring_events_duplicate(
    candidate: &Component,
    reference: &Component,
    policy: &MatchPolicy,
) -> EngineResult<bool> {
    if !titles_match(candidate.summary(), reference.summary(), policy) {
        return Ok(false);
    }

    let (Some(rule_a), Some(rule_b)) = (event_rule(candidate)?, event_rule(reference)?) else {
        return Ok(false);
    };

    if !same_structure(rule_a, rule_b)? {
        return Ok(false);
    }

    let (Some(anchor_a), Some(anchor_b)) = (start_instant(candidate), start_instant(reference))
    else {
        tracing::debug!(
            candidate = candidate.summary().unwrap_or("<untitled>"),
            "Recurring event without a resolvable start, skipping comparison"
        );
        return Ok(false);
    };

    if !lifetimes_intersect(rule_a, anchor_a, rule_b, anchor_b)? {
        return Ok(false);
    }

    Ok(events_overlap(candidate, reference, OverlapMode::TimeOfDay))
}

/// Extracts an event's recurrence rule, surfacing a malformed RRULE as
/// an error rather than ignoring it.
fn event_rule(event: &Component) -> EngineResult<Option<&RRule>> {
    if let Some(raw) = event.malformed_rrule() {
        return Err(EngineError::MalformedRule(raw.to_string()));
    }
    Ok(event.rrule())
}
