use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner shown on stderr while the checker runs.
///
/// Hidden in quiet or silent mode and when stderr is not a TTY, so piped
/// output never contains control sequences.
#[derive(Clone)]
pub struct CheckProgress {
    progress_bar: ProgressBar,
}

impl CheckProgress {
    #[must_use]
    pub fn new(total: u64, hidden: bool) -> Self {
        let is_tty = std::io::stderr().is_terminal();
        Self::new_with_visibility(total, hidden, is_tty)
    }

    fn new_with_visibility(total: u64, hidden: bool, is_tty: bool) -> Self {
        let progress_bar = if hidden || !is_tty {
            ProgressBar::hidden()
        } else {
            Self::create_visible_spinner(total)
        };

        Self { progress_bar }
    }

    fn create_visible_spinner(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} Processing... {pos}/{len} files")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        pb.set_style(style);
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    /// Record one finished file.
    pub fn inc(&self) {
        self.progress_bar.inc(1);
    }

    #[must_use]
    pub fn position(&self) -> u64 {
        self.progress_bar.position()
    }

    /// Finishes the spinner and clears it from the terminal.
    pub fn finish(&self) {
        self.progress_bar.finish_and_clear();
    }
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;
