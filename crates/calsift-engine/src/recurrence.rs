//! Recurrence structure comparison and lifetime intersection.
//!
//! Two series recur "the same way" when their rules agree after
//! normalization: anchor, COUNT, UNTIL and WKST describe where a series
//! starts and stops, not its shape, so they are excluded from the
//! canonical key. Whether two series' lifetimes can actually coincide
//! is a separate question answered by expanding the bounded rule.

use chrono::{DateTime, Utc};

use calsift_rfc::ical::core::{
    DateTime as IcalDateTime, DateTimeForm, Frequency, RRule, RRuleUntil, WeekdayNum,
};

use crate::error::{EngineError, EngineResult};

/// Cap on occurrences generated when expanding a bounded rule.
const MAX_EXPANSION: u16 = 1000;

/// Canonical recurrence shape.
///
/// Equality on this key answers "do these two rules generate the same
/// pattern of occurrences, ignoring where each series is anchored and
/// when it stops". BY* lists are order-insensitive in RFC 5545, so they
/// are sorted here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecurrenceKey {
    pub freq: Frequency,
    pub interval: u32,
    pub by_day: Vec<WeekdayNum>,
    pub by_monthday: Vec<i8>,
    pub by_month: Vec<u8>,
    pub by_setpos: Vec<i16>,
    pub by_hour: Vec<u8>,
    pub by_minute: Vec<u8>,
}

impl RecurrenceKey {
    /// Builds the canonical key for a rule.
    ///
    /// ## Errors
    ///
    /// Returns [`EngineError::MalformedRule`] when the rule has no
    /// frequency, which RFC 5545 requires.
    pub fn of(rule: &RRule) -> EngineResult<Self> {
        let freq = rule
            .freq
            .ok_or_else(|| EngineError::MalformedRule(rule.to_string()))?;

        let mut key = Self {
            freq,
            interval: rule.interval.unwrap_or(1),
            by_day: rule.by_day.clone(),
            by_monthday: rule.by_monthday.clone(),
            by_month: rule.by_month.clone(),
            by_setpos: rule.by_setpos.clone(),
            by_hour: rule.by_hour.clone(),
            by_minute: rule.by_minute.clone(),
        };
        key.by_day.sort_unstable();
        key.by_monthday.sort_unstable();
        key.by_month.sort_unstable();
        key.by_setpos.sort_unstable();
        key.by_hour.sort_unstable();
        key.by_minute.sort_unstable();
        Ok(key)
    }
}

/// Determines whether two rules describe the same recurrence shape.
///
/// ## Errors
///
/// Returns an error when either rule is missing its frequency.
pub fn same_structure(a: &RRule, b: &RRule) -> EngineResult<bool> {
    Ok(RecurrenceKey::of(a)? == RecurrenceKey::of(b)?)
}

/// Determines whether the lifetimes of two series can intersect.
///
/// If either rule is bounded (COUNT or UNTIL), the bounded one is
/// expanded and the other must produce at least one occurrence within
/// the bounded series' first-to-last window. Two unbounded rules always
/// intersect.
///
/// ## Errors
///
/// Returns an error when a rule is missing its frequency or cannot be
/// expanded by the recurrence library.
pub fn lifetimes_intersect(
    rule_a: &RRule,
    anchor_a: DateTime<Utc>,
    rule_b: &RRule,
    anchor_b: DateTime<Utc>,
) -> EngineResult<bool> {
    if rule_a.is_finite() {
        bounded_window_hit(rule_a, anchor_a, rule_b, anchor_b)
    } else if rule_b.is_finite() {
        bounded_window_hit(rule_b, anchor_b, rule_a, anchor_a)
    } else {
        Ok(true)
    }
}

/// Expands the bounded rule and checks whether the other rule produces
/// any occurrence within its first-to-last window (inclusive).
fn bounded_window_hit(
    bounded: &RRule,
    bounded_anchor: DateTime<Utc>,
    other: &RRule,
    other_anchor: DateTime<Utc>,
) -> EngineResult<bool> {
    let occurrences = rule_set(bounded, bounded_anchor)?.all(MAX_EXPANSION).dates;

    let (Some(first), Some(last)) = (
        occurrences.first().cloned(),
        occurrences.last().cloned(),
    ) else {
        // A bounded series that generates nothing intersects nothing.
        return Ok(false);
    };

    let hit = rule_set(other, other_anchor)?
        .after(first)
        .before(last)
        .all(1)
        .dates;

    Ok(!hit.is_empty())
}

/// Builds an expandable rule set from a rule and its anchor instant.
fn rule_set(rule: &RRule, anchor: DateTime<Utc>) -> EngineResult<rrule::RRuleSet> {
    if rule.freq.is_none() {
        return Err(EngineError::MalformedRule(rule.to_string()));
    }

    let text = format!(
        "DTSTART:{}\nRRULE:{}",
        anchor.format("%Y%m%dT%H%M%SZ"),
        expansion_rule(rule)
    );

    Ok(text.parse::<rrule::RRuleSet>()?)
}

/// Rewrites UNTIL into the UTC DATE-TIME form the recurrence library
/// expects: a date-only boundary becomes the end of that day, and a
/// floating or zoned boundary is taken at face value as UTC.
fn expansion_rule(rule: &RRule) -> RRule {
    let mut rule = rule.clone();
    if let Some(until) = rule.until.take() {
        let dt = match until {
            RRuleUntil::Date(d) => IcalDateTime::utc(d, 23, 59, 59),
            RRuleUntil::DateTime(mut dt) => {
                dt.form = DateTimeForm::Utc;
                dt
            }
        };
        rule.until = Some(RRuleUntil::DateTime(dt));
    }
    rule
}
