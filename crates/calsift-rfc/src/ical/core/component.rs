//! iCalendar component types (RFC 5545 §3.4-3.6).

use super::{Property, RRule, Value};

/// Component kind for iCalendar.
///
/// Components the filter does not act on (VTIMEZONE, VALARM, X-components)
/// are preserved verbatim and re-serialized untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// VCALENDAR wrapper component.
    Calendar,
    /// VEVENT component.
    Event,
    /// VTIMEZONE component.
    Timezone,
    /// VALARM component (nested within VEVENT).
    Alarm,
    /// Any other component, including X-components.
    Other,
}

impl ComponentKind {
    /// Parses a component kind from a name (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "VCALENDAR" => Self::Calendar,
            "VEVENT" => Self::Event,
            "VTIMEZONE" => Self::Timezone,
            "VALARM" => Self::Alarm,
            _ => Self::Other,
        }
    }
}

/// An iCalendar component.
///
/// Components contain properties in order of appearance and nested
/// sub-components (a VCALENDAR contains VEVENTs, a VEVENT may contain
/// VALARMs).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Component {
    /// Component kind, derived from the name.
    pub kind: Option<ComponentKind>,
    /// Original component name (preserved for X-components).
    pub name: String,
    /// Properties in order of appearance.
    pub properties: Vec<Property>,
    /// Nested sub-components.
    pub children: Vec<Component>,
}

impl Component {
    /// Creates a new component with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into().to_ascii_uppercase();
        Self {
            kind: Some(ComponentKind::parse(&name)),
            name,
            properties: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates a VEVENT component.
    #[must_use]
    pub fn event() -> Self {
        Self::new("VEVENT")
    }

    /// Returns whether this component is a VEVENT.
    #[must_use]
    pub fn is_event(&self) -> bool {
        self.kind == Some(ComponentKind::Event)
    }

    /// Adds a property to this component.
    pub fn add_property(&mut self, prop: Property) {
        self.properties.push(prop);
    }

    /// Returns the first property with the given name.
    #[must_use]
    pub fn get_property(&self, name: &str) -> Option<&Property> {
        let upper = name.to_ascii_uppercase();
        self.properties.iter().find(|p| p.name == upper)
    }

    /// Returns the SUMMARY property value if present.
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.get_property("SUMMARY")?.as_text()
    }

    /// Returns the UID property value if present.
    #[must_use]
    pub fn uid(&self) -> Option<&str> {
        self.get_property("UID")?.as_text()
    }

    /// Returns the DTSTART property if present.
    #[must_use]
    pub fn dtstart(&self) -> Option<&Property> {
        self.get_property("DTSTART")
    }

    /// Returns the DTEND property if present.
    #[must_use]
    pub fn dtend(&self) -> Option<&Property> {
        self.get_property("DTEND")
    }

    /// Returns the recurrence rule if this component has a well-formed RRULE.
    #[must_use]
    pub fn rrule(&self) -> Option<&RRule> {
        self.get_property("RRULE")?.as_rrule()
    }

    /// Returns whether this component carries an RRULE property at all,
    /// well-formed or not.
    #[must_use]
    pub fn has_rrule(&self) -> bool {
        self.get_property("RRULE").is_some()
    }

    /// Returns the raw RRULE text if the property is present but could
    /// not be resolved into a typed rule.
    #[must_use]
    pub fn malformed_rrule(&self) -> Option<&str> {
        let prop = self.get_property("RRULE")?;
        match &prop.value {
            Value::Recur(_) => None,
            _ => Some(&prop.raw_value),
        }
    }
}

/// Top-level iCalendar object: a VCALENDAR component with helpers.
#[derive(Debug, Clone, PartialEq)]
pub struct ICalendar {
    /// The root VCALENDAR component.
    pub root: Component,
}

impl ICalendar {
    /// Creates a new empty iCalendar with required properties.
    #[must_use]
    pub fn new(prodid: impl Into<String>) -> Self {
        let mut root = Component::new("VCALENDAR");
        root.add_property(Property::text("VERSION", "2.0"));
        root.add_property(Property::text("PRODID", prodid));
        Self { root }
    }

    /// Adds a VEVENT component.
    pub fn add_event(&mut self, event: Component) {
        self.root.children.push(event);
    }

    /// Returns all VEVENT components.
    #[must_use]
    pub fn events(&self) -> Vec<&Component> {
        self.root.children.iter().filter(|c| c.is_event()).collect()
    }

    /// Removes the direct children at the given indices.
    ///
    /// Used by the filter pipeline, which decides removals over a
    /// snapshot and applies them here after traversal completes.
    pub fn remove_children(&mut self, indices: &[usize]) {
        let mut keep = 0usize;
        self.root.children.retain(|_| {
            let removed = indices.contains(&keep);
            keep += 1;
            !removed
        });
    }
}

impl Default for ICalendar {
    fn default() -> Self {
        Self::new("-//calsift//calsift feed filter//EN")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_kind_parse() {
        assert_eq!(ComponentKind::parse("VEVENT"), ComponentKind::Event);
        assert_eq!(ComponentKind::parse("vcalendar"), ComponentKind::Calendar);
        assert_eq!(ComponentKind::parse("X-CUSTOM"), ComponentKind::Other);
    }

    #[test]
    fn events_filters_non_event_children() {
        let mut ical = ICalendar::default();
        ical.root.children.push(Component::new("VTIMEZONE"));
        let mut event = Component::event();
        event.add_property(Property::text("SUMMARY", "Standup"));
        ical.add_event(event);

        assert_eq!(ical.events().len(), 1);
        assert_eq!(ical.events()[0].summary(), Some("Standup"));
    }

    #[test]
    fn remove_children_by_index() {
        let mut ical = ICalendar::default();
        for name in ["a", "b", "c"] {
            let mut event = Component::event();
            event.add_property(Property::text("SUMMARY", name));
            ical.add_event(event);
        }

        ical.remove_children(&[0, 2]);

        assert_eq!(ical.events().len(), 1);
        assert_eq!(ical.events()[0].summary(), Some("b"));
    }
}
