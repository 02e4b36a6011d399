//! iCalendar RRULE (Recurrence Rule) value type (RFC 5545 §3.3.10, §3.8.5.3).

use std::fmt;

use super::{Date, DateTime};

/// Recurrence frequency (RFC 5545 §3.3.10).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Secondly => "SECONDLY",
            Self::Minutely => "MINUTELY",
            Self::Hourly => "HOURLY",
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
            Self::Yearly => "YEARLY",
        }
    }

    /// Parses a frequency from a string (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.to_ascii_uppercase().as_str() {
            "SECONDLY" => Self::Secondly,
            "MINUTELY" => Self::Minutely,
            "HOURLY" => Self::Hourly,
            "DAILY" => Self::Daily,
            "WEEKLY" => Self::Weekly,
            "MONTHLY" => Self::Monthly,
            "YEARLY" => Self::Yearly,
            _ => return None,
        })
    }

    /// Returns whether this frequency repeats more than once per day.
    ///
    /// Duplicate detection for sub-daily rules is a known accuracy
    /// limitation: the time-of-day overlap check cannot distinguish
    /// distinct same-day occurrences.
    #[must_use]
    pub const fn is_sub_daily(self) -> bool {
        matches!(self, Self::Secondly | Self::Minutely | Self::Hourly)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// Returns the two-letter abbreviation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sunday => "SU",
            Self::Monday => "MO",
            Self::Tuesday => "TU",
            Self::Wednesday => "WE",
            Self::Thursday => "TH",
            Self::Friday => "FR",
            Self::Saturday => "SA",
        }
    }

    /// Parses a weekday from a two-letter abbreviation (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.to_ascii_uppercase().as_str() {
            "SU" => Self::Sunday,
            "MO" => Self::Monday,
            "TU" => Self::Tuesday,
            "WE" => Self::Wednesday,
            "TH" => Self::Thursday,
            "FR" => Self::Friday,
            "SA" => Self::Saturday,
            _ => return None,
        })
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Weekday with optional occurrence number, used in BYDAY.
///
/// Examples: `MO` (every Monday), `1MO` (first Monday), `-1FR` (last Friday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekdayNum {
    /// Optional occurrence number (-53 to 53, excluding 0).
    pub ordinal: Option<i8>,
    /// The day of the week.
    pub weekday: Weekday,
}

impl WeekdayNum {
    /// Creates a weekday occurrence without an ordinal.
    #[must_use]
    pub const fn every(weekday: Weekday) -> Self {
        Self {
            ordinal: None,
            weekday,
        }
    }

    /// Parses a BYDAY entry, e.g. `MO`, `2TU`, `-1FR`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let split = s.len().checked_sub(2)?;
        let (num, day) = s.split_at(split);
        let weekday = Weekday::parse(day)?;
        let ordinal = if num.is_empty() {
            None
        } else {
            let n: i8 = num.parse().ok()?;
            if n == 0 || !(-53..=53).contains(&n) {
                return None;
            }
            Some(n)
        };
        Some(Self { ordinal, weekday })
    }
}

impl fmt::Display for WeekdayNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(n) = self.ordinal {
            write!(f, "{n}")?;
        }
        write!(f, "{}", self.weekday)
    }
}

/// UNTIL value for RRULE - can be either DATE or DATE-TIME.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RRuleUntil {
    /// Date-only boundary (inclusive).
    Date(Date),
    /// Date-time boundary (inclusive).
    DateTime(DateTime),
}

impl fmt::Display for RRuleUntil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(d) => write!(f, "{d}"),
            Self::DateTime(dt) => write!(f, "{dt}"),
        }
    }
}

/// Recurrence rule (RFC 5545 §3.3.10, §3.8.5.3).
///
/// A rule carries at most one of COUNT and UNTIL; the builder methods
/// keep that invariant, and the parser rejects rules with both.
/// Rules with neither are infinite.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RRule {
    /// Recurrence frequency (required by RFC 5545).
    pub freq: Option<Frequency>,

    /// Recurrence interval (default: 1).
    pub interval: Option<u32>,

    /// End boundary of the recurrence (mutually exclusive with count).
    pub until: Option<RRuleUntil>,

    /// Number of occurrences (mutually exclusive with until).
    pub count: Option<u32>,

    /// Week start day (default: Monday).
    pub wkst: Option<Weekday>,

    /// By-day list with optional occurrence numbers.
    pub by_day: Vec<WeekdayNum>,

    /// By-monthday list (-31 to 31, excluding 0).
    pub by_monthday: Vec<i8>,

    /// By-month list (1-12).
    pub by_month: Vec<u8>,

    /// By-setpos list (-366 to 366, excluding 0).
    pub by_setpos: Vec<i16>,

    /// By-hour list (0-23).
    pub by_hour: Vec<u8>,

    /// By-minute list (0-59).
    pub by_minute: Vec<u8>,
}

impl RRule {
    /// Creates a new empty recurrence rule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a rule with the given frequency.
    #[must_use]
    pub fn with_freq(freq: Frequency) -> Self {
        Self {
            freq: Some(freq),
            ..Self::default()
        }
    }

    /// Sets the interval.
    #[must_use]
    pub fn interval(mut self, interval: u32) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Sets the count, clearing any until boundary.
    #[must_use]
    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self.until = None;
        self
    }

    /// Sets the until boundary, clearing any count.
    #[must_use]
    pub fn until(mut self, until: RRuleUntil) -> Self {
        self.until = Some(until);
        self.count = None;
        self
    }

    /// Sets the by-day list.
    #[must_use]
    pub fn by_day(mut self, days: Vec<WeekdayNum>) -> Self {
        self.by_day = days;
        self
    }

    /// Sets the week start day.
    #[must_use]
    pub fn wkst(mut self, wkst: Weekday) -> Self {
        self.wkst = Some(wkst);
        self
    }

    /// Returns whether this rule is bounded by a count or an until date.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.count.is_some() || self.until.is_some()
    }
}

impl fmt::Display for RRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();

        if let Some(freq) = self.freq {
            parts.push(format!("FREQ={freq}"));
        }

        if let Some(interval) = self.interval
            && interval != 1
        {
            parts.push(format!("INTERVAL={interval}"));
        }

        if let Some(ref until) = self.until {
            parts.push(format!("UNTIL={until}"));
        }

        if let Some(count) = self.count {
            parts.push(format!("COUNT={count}"));
        }

        if let Some(wkst) = self.wkst {
            parts.push(format!("WKST={wkst}"));
        }

        if !self.by_day.is_empty() {
            let s: Vec<_> = self.by_day.iter().map(ToString::to_string).collect();
            parts.push(format!("BYDAY={}", s.join(",")));
        }

        if !self.by_monthday.is_empty() {
            let s: Vec<_> = self.by_monthday.iter().map(ToString::to_string).collect();
            parts.push(format!("BYMONTHDAY={}", s.join(",")));
        }

        if !self.by_month.is_empty() {
            let s: Vec<_> = self.by_month.iter().map(ToString::to_string).collect();
            parts.push(format!("BYMONTH={}", s.join(",")));
        }

        if !self.by_setpos.is_empty() {
            let s: Vec<_> = self.by_setpos.iter().map(ToString::to_string).collect();
            parts.push(format!("BYSETPOS={}", s.join(",")));
        }

        if !self.by_hour.is_empty() {
            let s: Vec<_> = self.by_hour.iter().map(ToString::to_string).collect();
            parts.push(format!("BYHOUR={}", s.join(",")));
        }

        if !self.by_minute.is_empty() {
            let s: Vec<_> = self.by_minute.iter().map(ToString::to_string).collect();
            parts.push(format!("BYMINUTE={}", s.join(",")));
        }

        write!(f, "{}", parts.join(";"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rrule_display_basic() {
        let rrule = RRule::with_freq(Frequency::Daily).count(10);
        assert_eq!(rrule.to_string(), "FREQ=DAILY;COUNT=10");
    }

    #[test]
    fn rrule_display_weekly_byday() {
        let rrule = RRule::with_freq(Frequency::Weekly).by_day(vec![
            WeekdayNum::every(Weekday::Monday),
            WeekdayNum::every(Weekday::Wednesday),
        ]);
        assert_eq!(rrule.to_string(), "FREQ=WEEKLY;BYDAY=MO,WE");
    }

    #[test]
    fn rrule_display_interval_suppressed_when_one() {
        let rrule = RRule::with_freq(Frequency::Weekly).interval(1);
        assert_eq!(rrule.to_string(), "FREQ=WEEKLY");

        let rrule = RRule::with_freq(Frequency::Weekly).interval(2);
        assert_eq!(rrule.to_string(), "FREQ=WEEKLY;INTERVAL=2");
    }

    #[test]
    fn count_and_until_are_mutually_exclusive() {
        let rrule = RRule::with_freq(Frequency::Daily)
            .count(5)
            .until(RRuleUntil::Date(Date::new(2024, 6, 1)));
        assert!(rrule.count.is_none());
        assert!(rrule.until.is_some());

        let rrule = RRule::with_freq(Frequency::Daily)
            .until(RRuleUntil::Date(Date::new(2024, 6, 1)))
            .count(5);
        assert!(rrule.until.is_none());
        assert_eq!(rrule.count, Some(5));
    }

    #[test]
    fn weekday_num_parse() {
        assert_eq!(
            WeekdayNum::parse("MO"),
            Some(WeekdayNum::every(Weekday::Monday))
        );
        assert_eq!(
            WeekdayNum::parse("-1FR"),
            Some(WeekdayNum {
                ordinal: Some(-1),
                weekday: Weekday::Friday
            })
        );
        assert_eq!(WeekdayNum::parse("0TU"), None);
        assert_eq!(WeekdayNum::parse("XX"), None);
    }

    #[test]
    fn finite_rules() {
        assert!(RRule::with_freq(Frequency::Daily).count(3).is_finite());
        assert!(
            RRule::with_freq(Frequency::Daily)
                .until(RRuleUntil::Date(Date::new(2024, 1, 1)))
                .is_finite()
        );
        assert!(!RRule::with_freq(Frequency::Daily).is_finite());
    }
}
