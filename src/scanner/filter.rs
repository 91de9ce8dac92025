use std::path::{Component, Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::{NorminoError, Result};

pub trait FileFilter {
    /// Whether a discovered file is handed to the checker.
    fn should_include(&self, path: &Path) -> bool;

    /// Whether the walk enters this directory at all.
    fn should_descend(&self, _dir: &Path) -> bool {
        true
    }
}

/// Returns true when `pattern` uses glob syntax rather than naming a path.
#[must_use]
pub fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains(['*', '?', '[', '{'])
}

/// Extension allow-list plus path and glob exclusions.
///
/// Literal exclusions are resolved against `base` and match the path itself
/// or anything underneath it. Glob exclusions are tried against both the
/// path relative to `base` and the absolute path.
pub struct ExclusionFilter {
    extensions: Vec<String>,
    base: PathBuf,
    excluded_paths: Vec<PathBuf>,
    excluded_globs: GlobSet,
}

impl ExclusionFilter {
    /// Create a filter for the given extensions and exclusions.
    ///
    /// # Errors
    /// Returns an error if any glob exclusion is invalid.
    pub fn new(extensions: Vec<String>, exclusions: &[String], base: &Path) -> Result<Self> {
        let base = dunce::canonicalize(base).unwrap_or_else(|_| base.to_path_buf());
        let mut excluded_paths = Vec::new();
        let mut builder = GlobSetBuilder::new();

        for exclusion in exclusions {
            let exclusion = exclusion.trim();
            if exclusion.is_empty() {
                continue;
            }
            if is_glob_pattern(exclusion) {
                let glob = Glob::new(exclusion).map_err(|e| NorminoError::InvalidPattern {
                    pattern: exclusion.to_string(),
                    source: e,
                })?;
                builder.add(glob);
            } else {
                excluded_paths.push(resolve_path(&base, exclusion));
            }
        }

        let excluded_globs = builder.build().map_err(|e| NorminoError::InvalidPattern {
            pattern: "combined patterns".to_string(),
            source: e,
        })?;

        Ok(Self {
            extensions,
            base,
            excluded_paths,
            excluded_globs,
        })
    }

    fn has_valid_extension(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }

        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }

    fn is_excluded(&self, path: &Path) -> bool {
        let absolute = if path.is_absolute() {
            normalize(path)
        } else {
            normalize(&self.base.join(path))
        };

        if self
            .excluded_paths
            .iter()
            .any(|excluded| absolute.starts_with(excluded))
        {
            return true;
        }

        if self.excluded_globs.is_empty() {
            return false;
        }
        let relative = absolute.strip_prefix(&self.base).unwrap_or(&absolute);
        self.excluded_globs.is_match(relative) || self.excluded_globs.is_match(&absolute)
    }
}

impl FileFilter for ExclusionFilter {
    fn should_include(&self, path: &Path) -> bool {
        self.has_valid_extension(path) && !self.is_excluded(path)
    }

    fn should_descend(&self, dir: &Path) -> bool {
        !self.is_excluded(dir)
    }
}

fn resolve_path(base: &Path, raw: &str) -> PathBuf {
    let joined = base.join(raw);
    dunce::canonicalize(&joined).unwrap_or_else(|_| normalize(&joined))
}

/// Lexically remove `.` and `..` components.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
