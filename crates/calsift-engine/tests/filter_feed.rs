//! End-to-end filtering over parsed feed text.

use calsift_engine::{filter_by_keyword, filter_duplicates, MatchPolicy};
use calsift_rfc::ical::build::serialize;
use calsift_rfc::ical::parse::parse;

const PRIMARY: &str = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Primary//Primary//EN\r\n\
BEGIN:VEVENT\r\n\
UID:lunch@primary\r\n\
SUMMARY:Lunch\r\n\
DTSTART:20240304T120000Z\r\n\
DTEND:20240304T130000Z\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:standup@primary\r\n\
SUMMARY:Standup\r\n\
DTSTART;TZID=Europe/Helsinki:20240304T090000\r\n\
DTEND;TZID=Europe/Helsinki:20240304T091500\r\n\
RRULE:FREQ=WEEKLY;BYDAY=MO;COUNT=10\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

const TARGET: &str = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Target//Target//EN\r\n\
BEGIN:VEVENT\r\n\
UID:lunch@target\r\n\
SUMMARY:Lunch Break\r\n\
DTSTART:20240304T121500Z\r\n\
DTEND:20240304T124500Z\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:standup@target\r\n\
SUMMARY:Team Standup\r\n\
DTSTART;TZID=Europe/Helsinki:20240304T090000\r\n\
DTEND;TZID=Europe/Helsinki:20240304T091500\r\n\
RRULE:FREQ=WEEKLY;BYDAY=MO\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:oof@target\r\n\
SUMMARY:OOF: travel day\r\n\
DTSTART;VALUE=DATE:20240306\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:dentist@target\r\n\
SUMMARY:Dentist\r\n\
DTSTART:20240305T150000Z\r\n\
DTEND:20240305T160000Z\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

#[test_log::test]
fn filters_keywords_and_duplicates_from_a_parsed_feed() {
    let primary = parse(PRIMARY).unwrap();
    let mut target = parse(TARGET).unwrap();

    let by_keyword = filter_by_keyword(&mut target, &["OOF".to_string()]);
    let by_duplicate = filter_duplicates(&mut target, &primary, &MatchPolicy::default());

    assert_eq!(by_keyword, 1);
    assert_eq!(by_duplicate, 2);

    let remaining = target.events();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].summary(), Some("Dentist"));

    let output = serialize(&target);
    assert!(output.contains("SUMMARY:Dentist"));
    assert!(!output.contains("Team Standup"));
    assert!(!output.contains("Lunch Break"));
    assert!(!output.contains("OOF"));
}

#[test_log::test]
fn filtering_preserves_untouched_event_bytes() {
    let primary = parse(PRIMARY).unwrap();
    let mut target = parse(TARGET).unwrap();

    filter_by_keyword(&mut target, &["OOF".to_string()]);
    filter_duplicates(&mut target, &primary, &MatchPolicy::default());

    // The surviving event serializes exactly as it arrived.
    let output = serialize(&target);
    assert!(output.contains("UID:dentist@target\r\n"));
    assert!(output.contains("DTSTART:20240305T150000Z\r\n"));
    assert!(output.contains("DTEND:20240305T160000Z\r\n"));
}
