use super::{Diagnostic, DiagnosticKind, parse_line};

pub const OK_MARKER: &str = ": OK!";
pub const NOTICE_MARKER: &str = "Notice:";

/// Classification of one complete checker report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Ok,
    Warning,
    Error(Vec<Diagnostic>),
    /// Neither a success marker nor a single diagnostic could be found.
    Unrecognized,
}

/// Classify the full standard output of one checker run.
///
/// Diagnostics keep the order in which their lines appear. A bare `path: Error!`
/// header is dropped when the same report also lists located diagnostics.
#[must_use]
pub fn classify_output(stdout: &str, detailed: bool) -> Classification {
    let has_ok = stdout.contains(OK_MARKER);
    if has_ok && stdout.contains(NOTICE_MARKER) {
        return Classification::Warning;
    }
    if has_ok {
        return Classification::Ok;
    }

    let mut diagnostics: Vec<Diagnostic> = stdout
        .lines()
        .filter_map(|line| parse_line(line, detailed))
        .collect();

    if diagnostics.iter().any(Diagnostic::is_located) {
        diagnostics.retain(|d| d.kind != DiagnosticKind::FileLevel);
    }

    if diagnostics.is_empty() {
        Classification::Unrecognized
    } else {
        Classification::Error(diagnostics)
    }
}

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;
