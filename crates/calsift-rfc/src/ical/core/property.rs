//! iCalendar property, parameter, and content line types (RFC 5545 §3.1, §3.2, §3.8).

use super::{Date, DateTime, RRule, Value};

/// A property parameter (RFC 5545 §3.2).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Parameter name (normalized to uppercase).
    pub name: String,
    /// Parameter values in order of appearance.
    pub values: Vec<String>,
}

impl Parameter {
    /// Creates a parameter with a single value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            values: vec![value.into()],
        }
    }

    /// Creates a parameter with multiple values.
    #[must_use]
    pub fn with_values(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            values,
        }
    }

    /// Returns the first value.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }
}

/// A raw content line as parsed from iCalendar text, before value
/// type resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    /// Property name (normalized to uppercase).
    pub name: String,
    /// Parameters in order of appearance.
    pub params: Vec<Parameter>,
    /// Raw value string (after unfolding, before unescaping).
    pub raw_value: String,
}

impl ContentLine {
    /// Creates a new content line.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            params: Vec::new(),
            raw_value: value.into(),
        }
    }

    /// Returns the value of the parameter with the given name.
    #[must_use]
    pub fn param_value(&self, name: &str) -> Option<&str> {
        let upper = name.to_ascii_uppercase();
        self.params.iter().find(|p| p.name == upper)?.value()
    }
}

/// A fully parsed iCalendar property.
///
/// Carries the resolved value plus the original raw value string for
/// round-trip serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Property name (normalized to uppercase).
    pub name: String,
    /// Parameters in order of appearance.
    pub params: Vec<Parameter>,
    /// Resolved value.
    pub value: Value,
    /// Original raw value string.
    pub raw_value: String,
}

impl Property {
    /// Creates a property with a text value.
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            name: name.into().to_ascii_uppercase(),
            params: Vec::new(),
            value: Value::Text(value.clone()),
            raw_value: value,
        }
    }

    /// Creates a property with a DATE value (adds `VALUE=DATE`).
    #[must_use]
    pub fn date(name: impl Into<String>, date: Date) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            params: vec![Parameter::new("VALUE", "DATE")],
            value: Value::Date(date),
            raw_value: date.to_string(),
        }
    }

    /// Creates a property with a DATE-TIME value.
    ///
    /// A zoned DATE-TIME gets a `TZID` parameter.
    #[must_use]
    pub fn datetime(name: impl Into<String>, dt: DateTime) -> Self {
        let params = dt
            .tzid()
            .map(|tzid| vec![Parameter::new("TZID", tzid)])
            .unwrap_or_default();
        Self {
            name: name.into().to_ascii_uppercase(),
            params,
            raw_value: dt.to_string(),
            value: Value::DateTime(dt),
        }
    }

    /// Creates an RRULE property.
    #[must_use]
    pub fn rrule(rule: RRule) -> Self {
        Self {
            name: "RRULE".to_string(),
            params: Vec::new(),
            raw_value: rule.to_string(),
            value: Value::Recur(rule),
        }
    }

    /// Returns the value of the parameter with the given name.
    #[must_use]
    pub fn param_value(&self, name: &str) -> Option<&str> {
        let upper = name.to_ascii_uppercase();
        self.params.iter().find(|p| p.name == upper)?.value()
    }

    /// Returns the text content if this property holds a TEXT value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        self.value.as_text()
    }

    /// Returns the DATE value if this property holds one.
    #[must_use]
    pub fn as_date(&self) -> Option<Date> {
        match self.value {
            Value::Date(d) => Some(d),
            _ => None,
        }
    }

    /// Returns the DATE-TIME value if this property holds one.
    #[must_use]
    pub fn as_datetime(&self) -> Option<&DateTime> {
        match &self.value {
            Value::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    /// Returns the recurrence rule if this property holds one.
    #[must_use]
    pub fn as_rrule(&self) -> Option<&RRule> {
        match &self.value {
            Value::Recur(r) => Some(r),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameter_names_are_uppercased() {
        let p = Parameter::new("tzid", "Europe/Helsinki");
        assert_eq!(p.name, "TZID");
        assert_eq!(p.value(), Some("Europe/Helsinki"));
    }

    #[test]
    fn datetime_property_carries_tzid() {
        let dt = DateTime::zoned(Date::new(2024, 3, 4), 9, 30, 0, "Europe/Helsinki");
        let prop = Property::datetime("DTSTART", dt);
        assert_eq!(prop.param_value("TZID"), Some("Europe/Helsinki"));
        assert_eq!(prop.raw_value, "20240304T093000");
    }

    #[test]
    fn date_property_has_value_date_param() {
        let prop = Property::date("DTSTART", Date::new(2024, 1, 1));
        assert_eq!(prop.param_value("VALUE"), Some("DATE"));
        assert_eq!(prop.as_date(), Some(Date::new(2024, 1, 1)));
        assert!(prop.as_datetime().is_none());
    }
}
