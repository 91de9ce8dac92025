use std::path::Path;
use std::process::Command;
use std::sync::Arc;
use std::time::Duration;

use crate::config::CheckerConfig;

use super::{
    CheckOutcome, Checker, ChildRegistry, Classification, ProcessOutput, RunError,
    classify_output, run_with_timeout,
};

/// [`Checker`] backed by an external process (norminette by default).
#[derive(Debug, Clone)]
pub struct NorminetteChecker {
    command: String,
    args: Vec<String>,
    timeout: Duration,
    registry: Arc<ChildRegistry>,
}

impl NorminetteChecker {
    #[must_use]
    pub fn new(command: impl Into<String>, timeout: Duration, registry: Arc<ChildRegistry>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
            timeout,
            registry,
        }
    }

    #[must_use]
    pub fn from_config(config: &CheckerConfig, registry: Arc<ChildRegistry>) -> Self {
        Self::new(
            config.command.clone(),
            Duration::from_secs(config.timeout_secs),
            registry,
        )
        .with_args(config.args.clone())
    }

    /// Extra arguments placed before the file path.
    #[must_use]
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    fn outcome_from_output(path: &Path, output: &ProcessOutput, detailed: bool) -> CheckOutcome {
        if output.status.code().is_none() {
            return CheckOutcome::ProcessFailed {
                path: path.to_path_buf(),
                detail: describe_abnormal_exit(output),
            };
        }

        match classify_output(&output.stdout, detailed) {
            Classification::Ok => CheckOutcome::Ok {
                path: path.to_path_buf(),
            },
            Classification::Warning => CheckOutcome::Warning {
                path: path.to_path_buf(),
            },
            Classification::Error(diagnostics) => CheckOutcome::Error {
                path: path.to_path_buf(),
                diagnostics,
            },
            Classification::Unrecognized => {
                let stderr = output.stderr.trim();
                let detail = if stderr.is_empty() {
                    format!("checker produced no recognizable output ({})", output.status)
                } else {
                    stderr.to_string()
                };
                CheckOutcome::ProcessFailed {
                    path: path.to_path_buf(),
                    detail,
                }
            }
        }
    }
}

fn describe_abnormal_exit(output: &ProcessOutput) -> String {
    let stderr = output.stderr.trim();
    if stderr.is_empty() {
        format!("checker exited abnormally ({})", output.status)
    } else {
        format!("checker exited abnormally ({}): {stderr}", output.status)
    }
}

impl Checker for NorminetteChecker {
    fn check(&self, path: &Path, detailed: bool) -> CheckOutcome {
        let mut command = Command::new(&self.command);
        command.args(&self.args).arg(path);

        match run_with_timeout(&mut command, self.timeout, &self.registry) {
            Ok(output) => Self::outcome_from_output(path, &output, detailed),
            Err(RunError::TimedOut) => CheckOutcome::timed_out(path),
            Err(RunError::Spawn(e)) => CheckOutcome::ProcessFailed {
                path: path.to_path_buf(),
                detail: format!("failed to run {}: {e}", self.command),
            },
            Err(RunError::Io(e)) => CheckOutcome::Crashed {
                path: path.to_path_buf(),
                detail: format!("An error occurred: {e}"),
            },
        }
    }
}

#[cfg(test)]
#[path = "norminette_tests.rs"]
mod tests;
