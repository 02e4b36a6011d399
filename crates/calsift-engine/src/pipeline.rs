//! Filter pipeline: keyword removal and duplicate removal.
//!
//! Both filters decide removals over a snapshot of the target's
//! children and apply them in one batch afterwards, so comparisons
//! never observe a half-filtered calendar. Non-event children
//! (VTIMEZONE, X-components) pass through untouched.

use calsift_rfc::ical::core::{Component, ICalendar};

use crate::equivalence::{recurring_events_duplicate, single_events_duplicate};
use crate::title::MatchPolicy;

/// Removes target events whose title contains any of the given phrases.
///
/// Substring containment, case-sensitive. Events without a title are
/// never removed. Returns the number of events removed; the result does
/// not depend on phrase order.
pub fn filter_by_keyword(target: &mut ICalendar, phrases: &[String]) -> usize {
    if phrases.is_empty() {
        return 0;
    }

    let mut removals = Vec::new();

    for (idx, child) in target.root.children.iter().enumerate() {
        if !child.is_event() {
            continue;
        }
        if let Some(summary) = child.summary()
            && phrases.iter().any(|p| summary.contains(p.as_str()))
        {
            tracing::debug!(summary, "Removing keyword-matched event");
            removals.push(idx);
        }
    }

    let removed = removals.len();
    target.remove_children(&removals);
    removed
}

/// Removes target events that duplicate an event in the primary
/// calendar.
///
/// Runs two passes: recurring target events are compared only against
/// recurring primary events, then single target events only against
/// single primary events. A pair whose comparison fails (malformed
/// recurrence data) is logged and treated as not a duplicate; the rest
/// of the pipeline continues. Returns the number of events removed.
pub fn filter_duplicates(
    target: &mut ICalendar,
    primary: &ICalendar,
    policy: &MatchPolicy,
) -> usize {
    let primary_events = primary.events();
    let (primary_recurring, primary_single): (Vec<&Component>, Vec<&Component>) = primary_events
        .into_iter()
        .partition(|e| e.has_rrule());

    let mut removals = Vec::new();

    // Recurring pass.
    for (idx, child) in target.root.children.iter().enumerate() {
        if !child.is_event() || !child.has_rrule() {
            continue;
        }
        if primary_recurring
            .iter()
            .any(|p| pair_duplicates(child, p, policy))
        {
            tracing::debug!(
                summary = child.summary().unwrap_or("<untitled>"),
                "Removing duplicate recurring event"
            );
            removals.push(idx);
        }
    }

    // Single pass.
    for (idx, child) in target.root.children.iter().enumerate() {
        if !child.is_event() || child.has_rrule() {
            continue;
        }
        if primary_single
            .iter()
            .any(|p| single_events_duplicate(child, p, policy))
        {
            tracing::debug!(
                summary = child.summary().unwrap_or("<untitled>"),
                "Removing duplicate event"
            );
            removals.push(idx);
        }
    }

    let removed = removals.len();
    target.remove_children(&removals);
    removed
}

/// Compares one recurring pair, degrading a comparison failure to "not
/// a duplicate" so one broken rule cannot stall the whole filter.
fn pair_duplicates(candidate: &Component, reference: &Component, policy: &MatchPolicy) -> bool {
    match recurring_events_duplicate(candidate, reference, policy) {
        Ok(duplicate) => duplicate,
        Err(error) => {
            tracing::warn!(
                candidate = candidate.summary().unwrap_or("<untitled>"),
                reference = reference.summary().unwrap_or("<untitled>"),
                %error,
                "Skipping pair with unusable recurrence data"
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calsift_rfc::ical::core::{
        Date, DateTime, Frequency, Property, RRule, Value, Weekday, WeekdayNum,
    };

    fn single(title: &str, day: u8, start_hour: u8) -> Component {
        let mut event = Component::event();
        event.add_property(Property::text("SUMMARY", title));
        event.add_property(Property::datetime(
            "DTSTART",
            DateTime::utc(Date::new(2024, 3, day), start_hour, 0, 0),
        ));
        event.add_property(Property::datetime(
            "DTEND",
            DateTime::utc(Date::new(2024, 3, day), start_hour + 1, 0, 0),
        ));
        event
    }

    fn recurring(title: &str, day: u8, start_hour: u8, rule: RRule) -> Component {
        let mut event = single(title, day, start_hour);
        event.add_property(Property::rrule(rule));
        event
    }

    fn weekly_monday() -> RRule {
        RRule::with_freq(Frequency::Weekly).by_day(vec![WeekdayNum::every(Weekday::Monday)])
    }

    fn calendar(events: Vec<Component>) -> ICalendar {
        let mut ical = ICalendar::default();
        for event in events {
            ical.add_event(event);
        }
        ical
    }

    #[test]
    fn keyword_filter_removes_matching_events() {
        let mut target = calendar(vec![
            single("OOF: vacation", 4, 9),
            single("Standup", 4, 9),
            single("Lunch (OOF)", 5, 12),
        ]);

        let removed = filter_by_keyword(&mut target, &["OOF".to_string()]);

        assert_eq!(removed, 2);
        assert_eq!(target.events().len(), 1);
        assert_eq!(target.events()[0].summary(), Some("Standup"));
    }

    #[test]
    fn keyword_filter_is_case_sensitive() {
        let mut target = calendar(vec![single("oof day", 4, 9)]);
        assert_eq!(filter_by_keyword(&mut target, &["OOF".to_string()]), 0);
        assert_eq!(target.events().len(), 1);
    }

    #[test]
    fn keyword_filter_skips_untitled_events() {
        let mut untitled = Component::event();
        untitled.add_property(Property::datetime(
            "DTSTART",
            DateTime::utc(Date::new(2024, 3, 4), 9, 0, 0),
        ));
        let mut target = calendar(vec![untitled]);

        assert_eq!(filter_by_keyword(&mut target, &["OOF".to_string()]), 0);
        assert_eq!(target.events().len(), 1);
    }

    #[test]
    fn keyword_filter_order_independent() {
        let phrases_a = vec!["OOF".to_string(), "Focus".to_string()];
        let phrases_b = vec!["Focus".to_string(), "OOF".to_string()];

        let events = vec![
            single("OOF: vacation", 4, 9),
            single("Focus time", 4, 14),
            single("Standup", 5, 9),
        ];

        let mut target_a = calendar(events.clone());
        let mut target_b = calendar(events);

        assert_eq!(filter_by_keyword(&mut target_a, &phrases_a), 2);
        assert_eq!(filter_by_keyword(&mut target_b, &phrases_b), 2);
        assert_eq!(target_a, target_b);
    }

    #[test]
    fn duplicate_filter_removes_overlapping_singles() {
        let primary = calendar(vec![single("Lunch", 4, 12)]);
        let mut target = calendar(vec![single("Lunch Break", 4, 12), single("Dentist", 4, 15)]);

        let removed = filter_duplicates(&mut target, &primary, &MatchPolicy::default());

        assert_eq!(removed, 1);
        assert_eq!(target.events().len(), 1);
        assert_eq!(target.events()[0].summary(), Some("Dentist"));
    }

    #[test]
    fn duplicate_filter_removes_matching_series() {
        let primary = calendar(vec![recurring("Standup", 4, 9, weekly_monday().count(10))]);
        let mut target = calendar(vec![recurring("Team Standup", 4, 9, weekly_monday())]);

        let removed = filter_duplicates(&mut target, &primary, &MatchPolicy::default());

        assert_eq!(removed, 1);
        assert_eq!(target.events().len(), 0);
    }

    #[test]
    fn mixed_pairs_are_never_compared() {
        // A single "Standup" in the target survives even though the
        // primary has a recurring series at the exact same time.
        let primary = calendar(vec![recurring("Standup", 4, 9, weekly_monday())]);
        let mut target = calendar(vec![single("Standup", 4, 9)]);

        assert_eq!(filter_duplicates(&mut target, &primary, &MatchPolicy::default()), 0);
        assert_eq!(target.events().len(), 1);
    }

    #[test]
    fn malformed_rule_degrades_to_kept_event() {
        let mut broken = single("Standup", 4, 9);
        broken.add_property(Property {
            name: "RRULE".to_string(),
            params: Vec::new(),
            value: Value::Raw("FREQ=NEVER".to_string()),
            raw_value: "FREQ=NEVER".to_string(),
        });
        let primary = calendar(vec![recurring("Standup", 4, 9, weekly_monday())]);
        let mut target = calendar(vec![broken, recurring("Standup", 4, 9, weekly_monday())]);

        let removed = filter_duplicates(&mut target, &primary, &MatchPolicy::default());

        // The broken pair is skipped; the well-formed twin is removed.
        assert_eq!(removed, 1);
        assert_eq!(target.events().len(), 1);
        assert!(target.events()[0].malformed_rrule().is_some());
    }

    #[test]
    fn duplicate_filter_is_idempotent() {
        let primary = calendar(vec![
            single("Lunch", 4, 12),
            recurring("Standup", 4, 9, weekly_monday()),
        ]);
        let mut target = calendar(vec![
            single("Lunch Break", 4, 12),
            recurring("Team Standup", 4, 9, weekly_monday()),
            single("Dentist", 4, 15),
        ]);

        assert_eq!(filter_duplicates(&mut target, &primary, &MatchPolicy::default()), 2);
        let after_first = target.clone();
        assert_eq!(filter_duplicates(&mut target, &primary, &MatchPolicy::default()), 0);
        assert_eq!(target, after_first);
    }

    #[test]
    fn non_event_children_are_preserved() {
        let primary = calendar(vec![single("Lunch", 4, 12)]);
        let mut target = calendar(vec![single("Lunch", 4, 12)]);
        target.root.children.insert(0, Component::new("VTIMEZONE"));

        filter_duplicates(&mut target, &primary, &MatchPolicy::default());
        filter_by_keyword(&mut target, &["OOF".to_string()]);

        assert_eq!(target.events().len(), 0);
        assert!(target.root.children.iter().any(|c| c.name == "VTIMEZONE"));
    }

    #[test]
    fn empty_primary_removes_nothing() {
        let primary = ICalendar::default();
        let mut target = calendar(vec![single("Lunch", 4, 12)]);
        assert_eq!(filter_duplicates(&mut target, &primary, &MatchPolicy::default()), 0);
        assert_eq!(target.events().len(), 1);
    }
}
