use std::path::{Path, PathBuf};

use super::Diagnostic;

/// Classified status of one checked file, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
    TimedOut,
    Crashed,
    ProcessFailed,
}

impl CheckStatus {
    /// Returns true for the three infrastructure failures (the checker itself broke).
    #[must_use]
    pub const fn is_failure(self) -> bool {
        matches!(self, Self::TimedOut | Self::Crashed | Self::ProcessFailed)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::TimedOut => "timeout",
            Self::Crashed => "crash",
            Self::ProcessFailed => "fail",
        }
    }
}

/// Result of checking one file.
///
/// Diagnostics only exist on `Error`, and a failure detail only exists on the three
/// failure variants, so neither can be attached to the wrong status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Ok {
        path: PathBuf,
    },
    Warning {
        path: PathBuf,
    },
    Error {
        path: PathBuf,
        diagnostics: Vec<Diagnostic>,
    },
    TimedOut {
        path: PathBuf,
        detail: String,
    },
    Crashed {
        path: PathBuf,
        detail: String,
    },
    ProcessFailed {
        path: PathBuf,
        detail: String,
    },
}

impl CheckOutcome {
    #[must_use]
    pub fn timed_out(path: &Path) -> Self {
        Self::TimedOut {
            path: path.to_path_buf(),
            detail: format!("Checking timed out for {}", path.display()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Ok { path }
            | Self::Warning { path }
            | Self::Error { path, .. }
            | Self::TimedOut { path, .. }
            | Self::Crashed { path, .. }
            | Self::ProcessFailed { path, .. } => path,
        }
    }

    #[must_use]
    pub const fn status(&self) -> CheckStatus {
        match self {
            Self::Ok { .. } => CheckStatus::Ok,
            Self::Warning { .. } => CheckStatus::Warning,
            Self::Error { .. } => CheckStatus::Error,
            Self::TimedOut { .. } => CheckStatus::TimedOut,
            Self::Crashed { .. } => CheckStatus::Crashed,
            Self::ProcessFailed { .. } => CheckStatus::ProcessFailed,
        }
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Self::Error { diagnostics, .. } => diagnostics,
            _ => &[],
        }
    }

    #[must_use]
    pub fn failure_detail(&self) -> Option<&str> {
        match self {
            Self::TimedOut { detail, .. }
            | Self::Crashed { detail, .. }
            | Self::ProcessFailed { detail, .. } => Some(detail),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_failure(&self) -> bool {
        self.status().is_failure()
    }

    /// True when the file should block a gated push: style errors or a broken check.
    #[must_use]
    pub const fn is_blocking(&self) -> bool {
        matches!(self.status(), CheckStatus::Error) || self.is_failure()
    }
}
