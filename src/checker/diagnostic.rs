use std::fmt;

/// 1-based position reported by the checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

impl Location {
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// Where a diagnostic came from in the checker output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// `Error: RULE (line: N, col: M) description`
    Rule,
    /// A line carrying the `Unexpected EOF` marker, kept verbatim.
    EndOfFile,
    /// A bare `path: Error!` line; `rule` holds the path.
    FileLevel,
}

/// One issue reported for a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub location: Option<Location>,
    pub rule: String,
    pub detail: Option<String>,
}

impl Diagnostic {
    #[must_use]
    pub fn located(location: Location, rule: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            kind: DiagnosticKind::Rule,
            location: Some(location),
            rule: rule.into(),
            detail,
        }
    }

    #[must_use]
    pub fn end_of_file(text: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::EndOfFile,
            location: None,
            rule: text.into(),
            detail: None,
        }
    }

    #[must_use]
    pub fn file_level(path: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::FileLevel,
            location: None,
            rule: path.into(),
            detail: None,
        }
    }

    #[must_use]
    pub const fn is_located(&self) -> bool {
        self.location.is_some()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location {
            Some(loc) => write!(f, "{:>4} {:>4} {}", loc.line, loc.column, self.rule)?,
            None => write!(f, "{}", self.rule)?,
        }
        if let Some(detail) = &self.detail {
            write!(f, " {detail}")?;
        }
        Ok(())
    }
}
