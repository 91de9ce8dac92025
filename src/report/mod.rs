use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::checker::{CheckOutcome, CheckStatus};

/// Outcomes of one run partitioned by status, each bucket sorted by path.
///
/// Sorting here makes every rendering independent of the order in which the
/// engine happened to finish files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub ok: Vec<CheckOutcome>,
    pub warnings: Vec<CheckOutcome>,
    pub errors: Vec<CheckOutcome>,
    pub failed: Vec<CheckOutcome>,
}

impl RunReport {
    #[must_use]
    pub fn from_outcomes(outcomes: Vec<CheckOutcome>) -> Self {
        let mut report = Self::default();
        for outcome in outcomes {
            match outcome.status() {
                CheckStatus::Ok => report.ok.push(outcome),
                CheckStatus::Warning => report.warnings.push(outcome),
                CheckStatus::Error => report.errors.push(outcome),
                CheckStatus::TimedOut | CheckStatus::Crashed | CheckStatus::ProcessFailed => {
                    report.failed.push(outcome);
                }
            }
        }

        for bucket in [
            &mut report.ok,
            &mut report.warnings,
            &mut report.errors,
            &mut report.failed,
        ] {
            bucket.sort_by(|a, b| a.path().cmp(b.path()));
        }
        report
    }

    #[must_use]
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            ok_count: self.ok.len(),
            warning_count: self.warnings.len(),
            error_file_count: self.errors.len(),
            failed_count: self.failed.len(),
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.ok.len() + self.warnings.len() + self.errors.len() + self.failed.len()
    }

    /// Blocking outcomes (errors and failures) counted per containing directory.
    #[must_use]
    pub fn per_directory_failures(&self) -> BTreeMap<PathBuf, usize> {
        per_directory_failures(self.errors.iter().chain(&self.failed))
    }
}

/// Counts for the closing summary. Warnings are their own bucket and count
/// toward neither `ok_count` nor `error_file_count`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub ok_count: usize,
    pub warning_count: usize,
    pub error_file_count: usize,
    pub failed_count: usize,
}

impl RunSummary {
    #[must_use]
    pub const fn has_problems(&self) -> bool {
        self.error_file_count > 0 || self.failed_count > 0
    }
}

/// Map each blocking outcome's parent directory to the number of blocking files in it.
///
/// Blocking means style errors plus checker failures (timeouts, crashes).
/// Directories with no blocking files are absent from the map.
pub fn per_directory_failures<'a, I>(outcomes: I) -> BTreeMap<PathBuf, usize>
where
    I: IntoIterator<Item = &'a CheckOutcome>,
{
    let mut counts = BTreeMap::new();
    for outcome in outcomes.into_iter().filter(|o| o.is_blocking()) {
        let dir = outcome
            .path()
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        *counts.entry(dir).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
