//! Time span resolution and overlap testing.
//!
//! An event's DTSTART/DTEND resolve to one of two span kinds: a
//! date-only span or an instant span. The kinds are never compared to
//! each other - mismatched granularity is defined as "no overlap", not
//! coerced or errored.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use calsift_rfc::ical::core::{Component, DateTime as IcalDateTime, DateTimeForm};

/// How two spans are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapMode {
    /// Full-instant comparison, for single-occurrence events.
    Instant,
    /// Time-of-day-only comparison: the date component is discarded
    /// and only daily wall-clock timing matters. Used exclusively when
    /// comparing recurring events.
    TimeOfDay,
}

/// A resolved event time span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span {
    /// A date-only span (all-day or multi-day event).
    Days { start: NaiveDate, end: NaiveDate },
    /// A span between two absolute instants.
    Instants {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

/// Resolves an iCalendar DATE-TIME to an absolute UTC instant.
///
/// Floating times are treated as UTC: a floating value compares against
/// other floating/UTC values exactly as written, which matches how the
/// feeds under comparison use them. Zoned times resolve through the
/// IANA database; an unknown TZID or a nonexistent local time (DST gap)
/// is unresolvable.
#[must_use]
pub fn resolve_instant(dt: &IcalDateTime) -> Option<DateTime<Utc>> {
    let date = NaiveDate::from_ymd_opt(
        i32::from(dt.date.year),
        u32::from(dt.date.month),
        u32::from(dt.date.day),
    )?;
    // Leap second 60 is clamped; chrono has no representation for it.
    let naive = date.and_hms_opt(
        u32::from(dt.hour),
        u32::from(dt.minute),
        u32::from(dt.second.min(59)),
    )?;

    match &dt.form {
        DateTimeForm::Utc | DateTimeForm::Floating => Some(Utc.from_utc_datetime(&naive)),
        DateTimeForm::Zoned { tzid } => {
            let tz: Tz = tzid.parse().ok()?;
            Some(tz.from_local_datetime(&naive).earliest()?.with_timezone(&Utc))
        }
    }
}

/// Resolves an event's start to an absolute instant.
///
/// A date-only start resolves to midnight UTC; used as the recurrence
/// anchor for all-day series.
#[must_use]
pub fn start_instant(event: &Component) -> Option<DateTime<Utc>> {
    let dtstart = event.dtstart()?;

    if let Some(date) = dtstart.as_date() {
        let naive = NaiveDate::from_ymd_opt(
            i32::from(date.year),
            u32::from(date.month),
            u32::from(date.day),
        )?
        .and_hms_opt(0, 0, 0)?;
        return Some(Utc.from_utc_datetime(&naive));
    }

    resolve_instant(dtstart.as_datetime()?)
}

/// Resolves an event's DTSTART/DTEND pair to a span.
///
/// Returns `None` when the span cannot be determined: missing DTSTART,
/// a DTEND whose kind differs from DTSTART, an unresolvable zone, or a
/// timed event with no DTEND. A date-only event with no DTEND gets the
/// RFC 5545 default duration of one day.
#[must_use]
pub fn event_span(event: &Component) -> Option<Span> {
    let dtstart = event.dtstart()?;

    if let Some(start) = dtstart.as_date() {
        let start = NaiveDate::from_ymd_opt(
            i32::from(start.year),
            u32::from(start.month),
            u32::from(start.day),
        )?;
        let end = match event.dtend() {
            Some(prop) => {
                let date = prop.as_date()?;
                NaiveDate::from_ymd_opt(
                    i32::from(date.year),
                    u32::from(date.month),
                    u32::from(date.day),
                )?
            }
            None => start.checked_add_days(Days::new(1))?,
        };
        return Some(Span::Days { start, end });
    }

    let start = resolve_instant(dtstart.as_datetime()?)?;
    let end = resolve_instant(event.dtend()?.as_datetime()?)?;
    Some(Span::Instants { start, end })
}

/// Returns the wall-clock start/end times of a timed event, as written
/// in the feed (no zone normalization - recurring events are compared
/// on their local daily timing).
fn clock_times(event: &Component) -> Option<(NaiveTime, NaiveTime)> {
    let start = event.dtstart()?.as_datetime()?;
    let end = event.dtend()?.as_datetime()?;
    Some((
        NaiveTime::from_hms_opt(
            u32::from(start.hour),
            u32::from(start.minute),
            u32::from(start.second.min(59)),
        )?,
        NaiveTime::from_hms_opt(
            u32::from(end.hour),
            u32::from(end.minute),
            u32::from(end.second.min(59)),
        )?,
    ))
}

/// Returns whether the event uses date-only DTSTART/DTEND values.
fn is_date_only(event: &Component) -> bool {
    event
        .dtstart()
        .is_some_and(|p| p.as_date().is_some())
}

/// Determines whether two events overlap in time.
///
/// Closed-interval test: spans touching at a boundary count as
/// overlapping. Missing or unresolvable temporal data and mismatched
/// granularity (date-only vs. date-time) yield `false`, never an error.
#[must_use]
pub fn events_overlap(a: &Component, b: &Component, mode: OverlapMode) -> bool {
    match mode {
        OverlapMode::Instant => instants_overlap(a, b),
        OverlapMode::TimeOfDay => times_of_day_overlap(a, b),
    }
}

fn instants_overlap(a: &Component, b: &Component) -> bool {
    let (Some(span_a), Some(span_b)) = (event_span(a), event_span(b)) else {
        tracing::debug!(
            a = a.summary().unwrap_or("<untitled>"),
            b = b.summary().unwrap_or("<untitled>"),
            "One or more events is missing a start or end time"
        );
        return false;
    };

    match (span_a, span_b) {
        (Span::Days { start: s1, end: e1 }, Span::Days { start: s2, end: e2 }) => {
            s1 <= e2 && e1 >= s2
        }
        (
            Span::Instants { start: s1, end: e1 },
            Span::Instants { start: s2, end: e2 },
        ) => s1 <= e2 && e1 >= s2,
        // Mismatched granularity is never considered overlapping.
        _ => false,
    }
}

fn times_of_day_overlap(a: &Component, b: &Component) -> bool {
    match (is_date_only(a), is_date_only(b)) {
        // Two all-day events occupy the same whole-day window.
        (true, true) => true,
        (false, false) => {
            let (Some((s1, e1)), Some((s2, e2))) = (clock_times(a), clock_times(b)) else {
                tracing::debug!("One or more events is missing a start or end time");
                return false;
            };
            s1 <= e2 && e1 >= s2
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calsift_rfc::ical::core::{Date, DateTime as IcalDateTime, Property};

    fn timed_event(start: IcalDateTime, end: Option<IcalDateTime>) -> Component {
        let mut event = Component::event();
        event.add_property(Property::datetime("DTSTART", start));
        if let Some(end) = end {
            event.add_property(Property::datetime("DTEND", end));
        }
        event
    }

    fn all_day_event(start: Date, end: Option<Date>) -> Component {
        let mut event = Component::event();
        event.add_property(Property::date("DTSTART", start));
        if let Some(end) = end {
            event.add_property(Property::date("DTEND", end));
        }
        event
    }

    fn utc(day: u8, hour: u8, minute: u8) -> IcalDateTime {
        IcalDateTime::utc(Date::new(2024, 3, day), hour, minute, 0)
    }

    #[test]
    fn overlapping_instants() {
        let a = timed_event(utc(4, 12, 0), Some(utc(4, 13, 0)));
        let b = timed_event(utc(4, 12, 30), Some(utc(4, 14, 0)));
        assert!(events_overlap(&a, &b, OverlapMode::Instant));
    }

    #[test]
    fn disjoint_instants() {
        let a = timed_event(utc(4, 12, 0), Some(utc(4, 13, 0)));
        let b = timed_event(utc(5, 12, 0), Some(utc(5, 13, 0)));
        assert!(!events_overlap(&a, &b, OverlapMode::Instant));
    }

    #[test]
    fn touching_instants_overlap() {
        // Closed intervals: e1 == s2 counts as overlapping.
        let a = timed_event(utc(4, 12, 0), Some(utc(4, 13, 0)));
        let b = timed_event(utc(4, 13, 0), Some(utc(4, 14, 0)));
        assert!(events_overlap(&a, &b, OverlapMode::Instant));
    }

    #[test]
    fn missing_end_yields_false_without_error() {
        let a = timed_event(utc(4, 12, 0), None);
        let b = timed_event(utc(4, 12, 0), Some(utc(4, 13, 0)));
        assert!(!events_overlap(&a, &b, OverlapMode::Instant));
        assert!(!events_overlap(&b, &a, OverlapMode::Instant));
    }

    #[test]
    fn granularity_mismatch_never_overlaps() {
        let a = all_day_event(Date::new(2024, 3, 4), None);
        let b = timed_event(utc(4, 10, 0), Some(utc(4, 11, 0)));
        assert!(!events_overlap(&a, &b, OverlapMode::Instant));
        assert!(!events_overlap(&b, &a, OverlapMode::Instant));
    }

    #[test]
    fn date_only_default_duration_is_one_day() {
        let a = all_day_event(Date::new(2024, 3, 4), None);
        assert_eq!(
            event_span(&a),
            Some(Span::Days {
                start: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
                end: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            })
        );
    }

    #[test]
    fn zoned_times_resolve_to_same_instant() {
        // 12:00 Helsinki == 10:00 UTC in March (EET, +02:00).
        let helsinki = IcalDateTime::zoned(Date::new(2024, 3, 4), 12, 0, 0, "Europe/Helsinki");
        let a = timed_event(helsinki.clone(), Some(IcalDateTime::zoned(
            Date::new(2024, 3, 4),
            13,
            0,
            0,
            "Europe/Helsinki",
        )));
        let b = timed_event(utc(4, 10, 0), Some(utc(4, 11, 0)));
        assert!(events_overlap(&a, &b, OverlapMode::Instant));

        let c = timed_event(utc(4, 12, 0), Some(utc(4, 13, 0)));
        assert!(!events_overlap(&a, &c, OverlapMode::Instant));
    }

    #[test]
    fn unknown_tzid_is_unresolvable() {
        let dt = IcalDateTime::zoned(Date::new(2024, 3, 4), 12, 0, 0, "Not/AZone");
        assert!(resolve_instant(&dt).is_none());
    }

    #[test]
    fn time_of_day_ignores_dates() {
        let a = timed_event(utc(4, 12, 0), Some(utc(4, 13, 0)));
        let b = timed_event(utc(25, 12, 30), Some(utc(25, 13, 30)));
        assert!(!events_overlap(&a, &b, OverlapMode::Instant));
        assert!(events_overlap(&a, &b, OverlapMode::TimeOfDay));
    }

    #[test]
    fn time_of_day_disjoint_clocks() {
        let a = timed_event(utc(4, 9, 0), Some(utc(4, 10, 0)));
        let b = timed_event(utc(4, 15, 0), Some(utc(4, 16, 0)));
        assert!(!events_overlap(&a, &b, OverlapMode::TimeOfDay));
    }
}
