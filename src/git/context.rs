//! Repository discovery for the push workflow.

use std::path::{Path, PathBuf};

use crate::error::{NorminoError, Result};

/// Where the repository lives and what is checked out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitContext {
    /// Working tree root.
    pub root: PathBuf,
    /// Branch name if on a branch (None for detached HEAD or an unborn repository)
    pub branch: Option<String>,
}

impl GitContext {
    /// Discover the repository containing `path`.
    ///
    /// # Errors
    /// Returns [`NorminoError::NotGitRepository`] when no repository encloses
    /// `path`, and [`NorminoError::Git`] for bare repositories.
    pub fn discover(path: &Path) -> Result<Self> {
        let repo =
            gix::discover(path).map_err(|_| NorminoError::NotGitRepository(path.to_path_buf()))?;
        let root = repo
            .workdir()
            .ok_or_else(|| NorminoError::Git("Unable to determine Git root directory.".into()))?;
        let root = dunce::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());

        let branch = repo
            .head_name()
            .ok()
            .flatten()
            .map(|name| name.shorten().to_string());

        tracing::debug!(root = %root.display(), branch = ?branch, "discovered repository");
        Ok(Self { root, branch })
    }
}

/// True when `dir` itself holds a `.git` entry.
#[must_use]
pub fn has_git_dir(dir: &Path) -> bool {
    dir.join(".git").exists()
}
