//! Content line lexer for iCalendar (RFC 5545 §3.1).
//!
//! Handles line unfolding and tokenization of content lines.

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::ical::core::{ContentLine, Parameter};

/// Splits input into unfolded content lines with their source line numbers.
///
/// Per RFC 5545 §3.1 long lines are folded by inserting a line break
/// followed by a single SPACE or HTAB; unfolding removes the break and
/// that one whitespace character. Both CRLF and bare LF breaks are
/// accepted (lenient), and blank lines are skipped.
#[must_use]
pub fn unfold_lines(input: &str) -> Vec<(usize, String)> {
    let mut lines: Vec<(usize, String)> = Vec::new();

    for (i, raw) in input.lines().enumerate() {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        if line.is_empty() {
            continue;
        }

        if let Some(continuation) = line.strip_prefix([' ', '\t'])
            && let Some((_, prev)) = lines.last_mut()
        {
            prev.push_str(continuation);
        } else {
            lines.push((i + 1, line.to_string()));
        }
    }

    lines
}

/// Parses a single content line: `name *(";" param) ":" value`.
///
/// ## Errors
/// Returns an error if the line has no name, no colon, or a malformed
/// parameter.
pub fn tokenize(line: &str, line_num: usize) -> ParseResult<ContentLine> {
    let name_end = line
        .find([';', ':'])
        .ok_or_else(|| ParseError::new(ParseErrorKind::MissingColon, line_num))?;

    if name_end == 0 {
        return Err(ParseError::new(
            ParseErrorKind::MissingPropertyName,
            line_num,
        ));
    }

    let name = &line[..name_end];
    if !name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-') {
        return Err(ParseError::new(ParseErrorKind::InvalidParameter, line_num)
            .with_context(format!("invalid property name {name:?}")));
    }

    let mut params = Vec::new();
    let mut rest = &line[name_end..];

    while let Some(stripped) = rest.strip_prefix(';') {
        let (param, remaining) = scan_parameter(stripped, line_num)?;
        params.push(param);
        rest = remaining;
    }

    let value = rest
        .strip_prefix(':')
        .ok_or_else(|| ParseError::new(ParseErrorKind::MissingColon, line_num))?;

    Ok(ContentLine {
        name: name.to_ascii_uppercase(),
        params,
        raw_value: value.to_string(),
    })
}

/// Scans one `name=value[,value...]` parameter.
///
/// Returns the parameter and the unconsumed remainder of the line,
/// which starts with either `;` (more parameters) or `:` (the value).
fn scan_parameter<'a>(input: &'a str, line_num: usize) -> ParseResult<(Parameter, &'a str)> {
    let eq = input
        .find('=')
        .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidParameter, line_num))?;
    let name = &input[..eq];
    if name.is_empty() {
        return Err(ParseError::new(ParseErrorKind::InvalidParameter, line_num));
    }

    let mut values = Vec::new();
    let mut rest = &input[eq + 1..];

    loop {
        let (value, remaining) = scan_param_value(rest, line_num)?;
        values.push(value);
        rest = remaining;

        match rest.chars().next() {
            Some(',') => rest = &rest[1..],
            Some(';' | ':') => break,
            Some(c) => {
                return Err(ParseError::new(ParseErrorKind::InvalidParameter, line_num)
                    .with_context(format!("unexpected character {c:?}")));
            }
            None => return Err(ParseError::new(ParseErrorKind::MissingColon, line_num)),
        }
    }

    Ok((Parameter::with_values(name, values), rest))
}

/// Scans a single parameter value, which may be quoted.
fn scan_param_value<'a>(input: &'a str, line_num: usize) -> ParseResult<(String, &'a str)> {
    if let Some(quoted) = input.strip_prefix('"') {
        let close = quoted
            .find('"')
            .ok_or_else(|| ParseError::new(ParseErrorKind::UnclosedQuote, line_num))?;
        Ok((quoted[..close].to_string(), &quoted[close + 1..]))
    } else {
        let end = input.find([',', ';', ':']).unwrap_or(input.len());
        Ok((input[..end].to_string(), &input[end..]))
    }
}
