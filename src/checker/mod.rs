mod classify;
mod diagnostic;
mod norminette;
mod outcome;
mod parser;
mod process;

pub use classify::{Classification, NOTICE_MARKER, OK_MARKER, classify_output};
pub use diagnostic::{Diagnostic, DiagnosticKind, Location};
pub use norminette::NorminetteChecker;
pub use outcome::{CheckOutcome, CheckStatus};
pub use parser::{EOF_MARKER, ERROR_MARKER, FILE_ERROR_MARKER, parse_line};
pub use process::{ChildRegistry, ProcessOutput, RunError, kill_process_group, run_with_timeout};

use std::path::Path;

/// Runs the external checker against a single file.
///
/// Implementations must never panic or return an error for a per-file problem:
/// timeouts, spawn failures and malformed output are all reported through the
/// returned [`CheckOutcome`].
pub trait Checker: Send + Sync {
    /// Check one file. `detailed` requests the free-text description of each diagnostic.
    fn check(&self, path: &Path, detailed: bool) -> CheckOutcome;
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
