//! Line grammar for the checker's textual report.
//!
//! ```text
//! line      := eof-line | rule-line | file-line | other
//! eof-line  := <anything containing "Unexpected EOF">
//! rule-line := <prefix> "Error:" RULE "(" "line:" N "," "col:" M ")" [":"] DETAIL
//! file-line := PATH ": Error!"
//! ```
//!
//! Malformed rule lines yield `None`: one broken line must not abort the batch.

use super::{Diagnostic, Location};

pub const EOF_MARKER: &str = "Unexpected EOF";
pub const ERROR_MARKER: &str = "Error:";
pub const FILE_ERROR_MARKER: &str = ": Error!";

const LINE_KEY: &str = "line:";
const COLUMN_KEY: &str = "col:";

/// Parse one line of checker output.
///
/// The description after the location is kept only when `detailed` is set.
#[must_use]
pub fn parse_line(line: &str, detailed: bool) -> Option<Diagnostic> {
    if line.contains(EOF_MARKER) {
        return Some(Diagnostic::end_of_file(line.trim()));
    }

    if let Some(idx) = line.find(ERROR_MARKER) {
        let parsed = parse_rule(&line[idx + ERROR_MARKER.len()..], detailed);
        if parsed.is_none() {
            tracing::trace!(line, "skipping malformed diagnostic line");
        }
        return parsed;
    }

    if let Some(idx) = line.find(FILE_ERROR_MARKER) {
        let path = line[..idx].trim();
        return (!path.is_empty()).then(|| Diagnostic::file_level(path));
    }

    None
}

fn parse_rule(rest: &str, detailed: bool) -> Option<Diagnostic> {
    let open = rest.find('(')?;
    let rule = rest[..open].trim();
    if rule.is_empty() {
        return None;
    }

    let close = open + rest[open..].find(')')?;
    let location = parse_location(&rest[open + 1..close])?;

    let detail = if detailed {
        let text = rest[close + 1..].trim_start();
        let text = text.strip_prefix(':').unwrap_or(text).trim();
        (!text.is_empty()).then(|| text.to_string())
    } else {
        None
    };

    Some(Diagnostic::located(location, rule, detail))
}

fn parse_location(inner: &str) -> Option<Location> {
    let (line_part, column_part) = inner.split_once(',')?;
    let line = parse_field(line_part, LINE_KEY)?;
    let column = parse_field(column_part, COLUMN_KEY)?;
    Some(Location::new(line, column))
}

fn parse_field(part: &str, key: &str) -> Option<u32> {
    part.trim().strip_prefix(key)?.trim().parse().ok()
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
