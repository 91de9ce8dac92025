//! Bounded fan-out of checker runs.
//!
//! Every file is handed to the [`Checker`] exactly once on a dedicated rayon
//! pool. Outcomes come back over a channel in completion order; callers that
//! need a stable order sort afterwards (see [`crate::report`]).

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::mpsc;

use crate::checker::{CheckOutcome, Checker};
use crate::error::{NorminoError, Result};

pub struct Engine<C: Checker> {
    checker: C,
    jobs: usize,
}

impl<C: Checker> Engine<C> {
    /// `jobs` is the maximum number of checks in flight; zero is treated as one.
    #[must_use]
    pub fn new(checker: C, jobs: usize) -> Self {
        Self {
            checker,
            jobs: jobs.max(1),
        }
    }

    #[must_use]
    pub const fn jobs(&self) -> usize {
        self.jobs
    }

    /// Check every file and return the outcomes in completion order.
    ///
    /// `on_complete` runs on the calling thread once per finished file.
    ///
    /// # Errors
    /// Returns an error if the worker pool cannot be built.
    pub fn run<F>(
        &self,
        files: &[PathBuf],
        detailed: bool,
        mut on_complete: F,
    ) -> Result<Vec<CheckOutcome>>
    where
        F: FnMut(&CheckOutcome),
    {
        if files.is_empty() {
            return Ok(Vec::new());
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .thread_name(|i| format!("normino-worker-{i}"))
            .build()
            .map_err(|e| NorminoError::ThreadPool(e.to_string()))?;

        tracing::info!(files = files.len(), jobs = self.jobs, "starting check run");

        let checker = &self.checker;
        let mut outcomes = Vec::with_capacity(files.len());

        pool.in_place_scope(|scope| {
            let (tx, rx) = mpsc::channel();

            for path in files {
                let tx = tx.clone();
                scope.spawn(move |_| {
                    let outcome =
                        panic::catch_unwind(AssertUnwindSafe(|| checker.check(path, detailed)))
                            .unwrap_or_else(|payload| CheckOutcome::Crashed {
                                path: path.clone(),
                                detail: format!("An error occurred: {}", panic_message(&*payload)),
                            });
                    // receiver only goes away if the caller's callback panicked
                    let _ = tx.send(outcome);
                });
            }
            drop(tx);

            for outcome in rx {
                tracing::debug!(
                    path = %outcome.path().display(),
                    status = outcome.status().label(),
                    "check finished"
                );
                on_complete(&outcome);
                outcomes.push(outcome);
            }
        });

        tracing::info!(outcomes = outcomes.len(), "check run finished");
        Ok(outcomes)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker panicked".to_string()
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
