use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use crate::error::{NorminoError, Result};

/// Porcelain operations the push workflow needs.
pub trait GitOps {
    /// Output of `git status --porcelain`.
    ///
    /// # Errors
    /// Returns an error if git fails.
    fn status_porcelain(&self) -> Result<String>;

    /// Stage everything under the working tree.
    ///
    /// # Errors
    /// Returns an error if git fails.
    fn add_all(&self) -> Result<()>;

    /// # Errors
    /// Returns an error if git fails.
    fn commit(&self, message: &str) -> Result<()>;

    /// # Errors
    /// Returns an error if the branch cannot be determined.
    fn current_branch(&self) -> Result<String>;

    /// Push `branch` to `origin`, setting upstream.
    ///
    /// # Errors
    /// Returns an error if git fails.
    fn push(&self, branch: &str) -> Result<()>;
}

/// [`GitOps`] backed by the `git` executable.
pub struct GitCli {
    root: PathBuf,
    branch: Option<String>,
}

impl GitCli {
    /// `branch` is the branch already known from repository discovery, if any.
    #[must_use]
    pub fn new(root: &Path, branch: Option<String>) -> Self {
        Self {
            root: root.to_path_buf(),
            branch,
        }
    }

    fn run(&self, args: &[&str]) -> Result<Output> {
        tracing::debug!(?args, "running git");
        Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()
            .map_err(|e| NorminoError::Git(format!("failed to run git: {e}")))
    }

    fn run_checked(&self, what: &str, args: &[&str]) -> Result<String> {
        let output = self.run(args)?;
        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let detail = if stderr.is_empty() {
                format!("exited with {}", output.status)
            } else {
                stderr
            };
            Err(NorminoError::Git(format!("{what} failed: {detail}")))
        }
    }
}

impl GitOps for GitCli {
    fn status_porcelain(&self) -> Result<String> {
        self.run_checked("Git status", &["status", "--porcelain"])
    }

    fn add_all(&self) -> Result<()> {
        self.run_checked("Git add", &["add", "."]).map(drop)
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.run_checked("Git commit", &["commit", "-m", message])
            .map(drop)
    }

    fn current_branch(&self) -> Result<String> {
        if let Some(branch) = &self.branch {
            return Ok(branch.clone());
        }
        let branch = self
            .run_checked("Git rev-parse", &["rev-parse", "--abbrev-ref", "HEAD"])?
            .trim()
            .to_string();
        if branch.is_empty() {
            return Err(NorminoError::Git(
                "Failed to retrieve current branch.".to_string(),
            ));
        }
        Ok(branch)
    }

    fn push(&self, branch: &str) -> Result<()> {
        self.run_checked("Git push", &["push", "-u", "origin", branch])
            .map(drop)
    }
}
