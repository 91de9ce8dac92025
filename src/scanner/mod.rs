mod filter;

pub use filter::{ExclusionFilter, FileFilter, is_glob_pattern};

use std::path::{Path, PathBuf};

use globset::Glob;
use indexmap::IndexSet;
use walkdir::WalkDir;

use crate::error::{NorminoError, Result};

/// Trait for scanning a root and finding files.
pub trait FileScanner {
    /// Scan one root (file or directory) and return all matching file paths.
    ///
    /// A root that does not exist yields nothing.
    ///
    /// # Errors
    /// Returns an error if the scan cannot proceed at all.
    fn scan(&self, root: &Path) -> Result<Vec<PathBuf>>;
}

pub struct DirectoryScanner<F: FileFilter> {
    filter: F,
}

impl<F: FileFilter> DirectoryScanner<F> {
    #[must_use]
    pub const fn new(filter: F) -> Self {
        Self { filter }
    }

    fn scan_impl(&self, root: &Path) -> Vec<PathBuf> {
        let Ok(root) = dunce::canonicalize(root) else {
            tracing::warn!(root = %root.display(), "skipping missing root");
            return Vec::new();
        };

        if root.is_file() {
            return if self.filter.should_include(&root) {
                vec![root]
            } else {
                Vec::new()
            };
        }

        WalkDir::new(&root)
            .into_iter()
            .filter_entry(|e| {
                e.depth() == 0 || !e.file_type().is_dir() || self.filter.should_descend(e.path())
            })
            // entries that vanish mid-walk surface as errors and are dropped
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_file() && self.filter.should_include(e.path()))
            .map(walkdir::DirEntry::into_path)
            .collect()
    }
}

impl<F: FileFilter> FileScanner for DirectoryScanner<F> {
    fn scan(&self, root: &Path) -> Result<Vec<PathBuf>> {
        Ok(self.scan_impl(root))
    }
}

/// Expand every root and collect the deduplicated set of files to check.
///
/// Plain roots are resolved against `base`. Glob roots are matched against
/// every path under `base`, and each match is scanned as a root of its own.
/// The result keeps first-discovery order.
///
/// # Errors
/// Returns an error if a glob root is invalid.
pub fn discover_files<S: FileScanner>(
    scanner: &S,
    roots: &[String],
    base: &Path,
) -> Result<Vec<PathBuf>> {
    let mut files = IndexSet::new();

    for root in roots {
        for path in expand_root(root, base)? {
            for file in scanner.scan(&path)? {
                let file = dunce::canonicalize(&file).unwrap_or(file);
                files.insert(file);
            }
        }
    }

    tracing::debug!(count = files.len(), "discovered files");
    Ok(files.into_iter().collect())
}

fn expand_root(root: &str, base: &Path) -> Result<Vec<PathBuf>> {
    if !is_glob_pattern(root) {
        return Ok(vec![base.join(root)]);
    }

    let matcher = Glob::new(root)
        .map_err(|e| NorminoError::InvalidPattern {
            pattern: root.to_string(),
            source: e,
        })?
        .compile_matcher();

    let matches: Vec<PathBuf> = WalkDir::new(base)
        .min_depth(1)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| {
            e.path()
                .strip_prefix(base)
                .is_ok_and(|relative| matcher.is_match(relative))
        })
        .map(walkdir::DirEntry::into_path)
        .collect();

    if matches.is_empty() {
        tracing::warn!(pattern = root, "pattern matched no paths");
    }
    Ok(matches)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
