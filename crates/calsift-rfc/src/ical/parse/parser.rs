//! iCalendar document parser (RFC 5545).

use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::lexer::{tokenize, unfold_lines};
use super::values::{parse_date, parse_datetime, parse_rrule, unescape_text};
use crate::ical::core::{Component, ComponentKind, ContentLine, ICalendar, Property, Value};

/// Parses an iCalendar document from a string.
///
/// ## Errors
///
/// Returns an error if the input is not a structurally valid VCALENDAR.
/// Individual property values are resolved best-effort: a value that
/// fails to resolve (e.g. a malformed RRULE) is carried as raw text
/// rather than failing the whole document.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn parse(input: &str) -> ParseResult<ICalendar> {
    let lines = unfold_lines(input);

    if lines.is_empty() {
        return Err(ParseError::new(ParseErrorKind::MissingBegin, 1));
    }

    tracing::trace!(count = lines.len(), "Unfolded content lines");

    let mut iter = lines
        .into_iter()
        .map(|(line_num, line)| tokenize(&line, line_num).map(|cl| (line_num, cl)))
        .collect::<ParseResult<Vec<_>>>()?
        .into_iter()
        .peekable();

    let root = parse_component(&mut iter)?;

    if root.kind != Some(ComponentKind::Calendar) {
        return Err(ParseError::new(ParseErrorKind::MissingBegin, 1)
            .with_context(format!("expected VCALENDAR, got {}", root.name)));
    }

    tracing::debug!(
        events = root.children.iter().filter(|c| c.is_event()).count(),
        "Parsed iCalendar document"
    );

    Ok(ICalendar { root })
}

/// Parses one component starting at a BEGIN line, recursing into
/// nested components.
fn parse_component(
    iter: &mut std::iter::Peekable<impl Iterator<Item = (usize, ContentLine)>>,
) -> ParseResult<Component> {
    let (begin_line, begin) = iter
        .next()
        .ok_or_else(|| ParseError::new(ParseErrorKind::MissingBegin, 1))?;

    if begin.name != "BEGIN" {
        return Err(ParseError::new(ParseErrorKind::MissingBegin, begin_line));
    }

    let mut component = Component::new(begin.raw_value);
    let mut last_line = begin_line;

    loop {
        match iter.peek() {
            Some((_, cl)) if cl.name == "BEGIN" => {
                let child = parse_component(iter)?;
                component.children.push(child);
            }
            Some(&(line_num, ref cl)) if cl.name == "END" => {
                let end_name = cl.raw_value.to_ascii_uppercase();
                if end_name != component.name {
                    return Err(
                        ParseError::new(ParseErrorKind::MismatchedComponent, line_num)
                            .with_context(format!(
                                "expected END:{}, got END:{end_name}",
                                component.name
                            )),
                    );
                }
                iter.next();
                break;
            }
            Some(_) => {
                // Consume a plain property line.
                // Unwrap is guarded by the peek above.
                let Some((line_num, cl)) = iter.next() else {
                    break;
                };
                last_line = line_num;
                component.properties.push(resolve_property(cl, line_num));
            }
            None => {
                return Err(ParseError::new(ParseErrorKind::MissingEnd, last_line)
                    .with_context(format!("missing END:{}", component.name)));
            }
        }
    }

    Ok(component)
}

/// Property names whose values are TEXT (RFC 5545 §3.8.1).
const TEXT_PROPERTIES: &[&str] = &[
    "SUMMARY",
    "DESCRIPTION",
    "LOCATION",
    "UID",
    "STATUS",
    "TRANSP",
    "CLASS",
    "PRODID",
    "VERSION",
    "CALSCALE",
    "METHOD",
    "TZID",
];

/// Property names whose values are DATE or DATE-TIME (RFC 5545 §3.8.2).
const DATE_PROPERTIES: &[&str] = &["DTSTART", "DTEND", "DTSTAMP", "CREATED", "LAST-MODIFIED"];

/// Resolves a content line into a typed property.
///
/// Resolution is keyed on the property name plus VALUE/TZID parameters.
/// Failure to resolve is not an error here: the raw value is kept and
/// downstream code decides whether that matters (a malformed RRULE on
/// a compared event does, an unknown X-property never does).
fn resolve_property(cl: ContentLine, line_num: usize) -> Property {
    let value = resolve_value(&cl, line_num);
    Property {
        name: cl.name,
        params: cl.params,
        value,
        raw_value: cl.raw_value,
    }
}

fn resolve_value(cl: &ContentLine, line_num: usize) -> Value {
    let name = cl.name.as_str();

    if TEXT_PROPERTIES.contains(&name) {
        return Value::Text(unescape_text(&cl.raw_value));
    }

    if DATE_PROPERTIES.contains(&name) {
        let is_date = cl.param_value("VALUE") == Some("DATE") || !cl.raw_value.contains('T');
        let resolved = if is_date {
            parse_date(&cl.raw_value, line_num).map(Value::Date)
        } else {
            parse_datetime(&cl.raw_value, cl.param_value("TZID"), line_num).map(Value::DateTime)
        };
        return match resolved {
            Ok(v) => v,
            Err(e) => {
                tracing::debug!(property = name, error = %e, "Unresolvable date value, keeping raw");
                Value::Raw(cl.raw_value.clone())
            }
        };
    }

    if name == "RRULE" {
        return match parse_rrule(&cl.raw_value, line_num) {
            Ok(rule) => Value::Recur(rule),
            Err(e) => {
                tracing::warn!(error = %e, "Malformed RRULE, keeping raw");
                Value::Raw(cl.raw_value.clone())
            }
        };
    }

    Value::Raw(cl.raw_value.clone())
}
