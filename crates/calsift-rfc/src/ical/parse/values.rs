//! Value type parsers for iCalendar (RFC 5545 §3.3).

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::ical::core::{
    Date, DateTime, DateTimeForm, Frequency, RRule, RRuleUntil, Weekday, WeekdayNum,
};

/// Unescapes an iCalendar TEXT value (RFC 5545 §3.3.11).
///
/// `\\`, `\,`, `\;`, `\n`/`\N` become their literal characters; an
/// unrecognized escape is preserved as-is.
#[must_use]
pub fn unescape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n' | 'N') => result.push('\n'),
                Some(escaped @ ('\\' | ',' | ';')) => result.push(escaped),
                Some(other) => {
                    result.push('\\');
                    result.push(other);
                }
                None => result.push('\\'),
            }
        } else {
            result.push(c);
        }
    }
    result
}

/// Parses a DATE value: `YYYYMMDD` (RFC 5545 §3.3.4).
///
/// ## Errors
/// Returns an error if the string is not a valid 8-digit date.
pub fn parse_date(s: &str, line: usize) -> ParseResult<Date> {
    let invalid = || ParseError::new(ParseErrorKind::InvalidDate, line);

    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let year = s[0..4].parse::<u16>().map_err(|_| invalid())?;
    let month = s[4..6].parse::<u8>().map_err(|_| invalid())?;
    let day = s[6..8].parse::<u8>().map_err(|_| invalid())?;

    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return Err(invalid());
    }

    Ok(Date { year, month, day })
}

/// Parses a DATE-TIME value: `YYYYMMDD"T"HHMMSS[Z]` (RFC 5545 §3.3.5).
///
/// The TZID parameter lives at the property level, so it is passed in;
/// a trailing `Z` wins over a TZID (UTC form).
///
/// ## Errors
/// Returns an error if the string is not a valid date-time.
pub fn parse_datetime(s: &str, tzid: Option<&str>, line: usize) -> ParseResult<DateTime> {
    let invalid = || ParseError::new(ParseErrorKind::InvalidDateTime, line);

    let (date_str, time_str) = s.split_once('T').ok_or_else(invalid)?;
    let date = parse_date(date_str, line).map_err(|_| invalid())?;

    let (clock, is_utc) = match time_str.strip_suffix('Z') {
        Some(stripped) => (stripped, true),
        None => (time_str, false),
    };

    if clock.len() != 6 || !clock.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let hour = clock[0..2].parse::<u8>().map_err(|_| invalid())?;
    let minute = clock[2..4].parse::<u8>().map_err(|_| invalid())?;
    let second = clock[4..6].parse::<u8>().map_err(|_| invalid())?;

    // Allow 60 for leap seconds
    if hour > 23 || minute > 59 || second > 60 {
        return Err(invalid());
    }

    let form = if is_utc {
        DateTimeForm::Utc
    } else if let Some(tz) = tzid {
        DateTimeForm::Zoned {
            tzid: tz.to_string(),
        }
    } else {
        DateTimeForm::Floating
    };

    Ok(DateTime {
        date,
        hour,
        minute,
        second,
        form,
    })
}

/// Parses a RECUR (RRULE) value (RFC 5545 §3.3.10).
///
/// Unknown rule parts are ignored; COUNT together with UNTIL is rejected.
///
/// ## Errors
/// Returns an error if any recognized rule part is malformed.
pub fn parse_rrule(s: &str, line: usize) -> ParseResult<RRule> {
    let invalid = || ParseError::new(ParseErrorKind::InvalidRRule, line);

    let mut rule = RRule::new();

    for part in s.split(';') {
        let (key, value) = part.split_once('=').ok_or_else(invalid)?;

        match key.to_ascii_uppercase().as_str() {
            "FREQ" => {
                rule.freq = Some(Frequency::parse(value).ok_or_else(invalid)?);
            }
            "INTERVAL" => {
                rule.interval = Some(value.parse().map_err(|_| invalid())?);
            }
            "COUNT" => {
                if rule.until.is_some() {
                    return Err(ParseError::new(ParseErrorKind::UntilCountConflict, line));
                }
                rule.count = Some(value.parse().map_err(|_| invalid())?);
            }
            "UNTIL" => {
                if rule.count.is_some() {
                    return Err(ParseError::new(ParseErrorKind::UntilCountConflict, line));
                }
                rule.until = Some(if value.contains('T') {
                    RRuleUntil::DateTime(parse_datetime(value, None, line)?)
                } else {
                    RRuleUntil::Date(parse_date(value, line)?)
                });
            }
            "WKST" => {
                rule.wkst = Some(Weekday::parse(value).ok_or_else(invalid)?);
            }
            "BYDAY" => {
                rule.by_day = value
                    .split(',')
                    .map(|d| WeekdayNum::parse(d.trim()).ok_or_else(invalid))
                    .collect::<ParseResult<_>>()?;
            }
            "BYMONTHDAY" => rule.by_monthday = parse_num_list(value, line)?,
            "BYMONTH" => rule.by_month = parse_num_list(value, line)?,
            "BYSETPOS" => rule.by_setpos = parse_num_list(value, line)?,
            "BYHOUR" => rule.by_hour = parse_num_list(value, line)?,
            "BYMINUTE" => rule.by_minute = parse_num_list(value, line)?,
            // Unknown rule part - ignore
            _ => {}
        }
    }

    Ok(rule)
}

/// Parses a comma-separated list of numbers.
fn parse_num_list<T: std::str::FromStr>(s: &str, line: usize) -> ParseResult<Vec<T>> {
    s.split(',')
        .map(|v| {
            v.trim()
                .parse()
                .map_err(|_| ParseError::new(ParseErrorKind::InvalidRRule, line))
        })
        .collect()
}
