use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{NorminoError, Result};

/// Read the manifest, one relative path per line. Blank lines are skipped.
///
/// # Errors
/// Returns [`NorminoError::ManifestNotFound`] when the file does not exist.
pub fn read_manifest(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            NorminoError::ManifestNotFound(path.to_path_buf())
        } else {
            NorminoError::FileRead {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect())
}

/// Write `entries` as a manifest at `path`.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_manifest(path: &Path, entries: &[String]) -> Result<()> {
    let mut content = entries.join("\n");
    content.push('\n');
    fs::write(path, content)?;
    Ok(())
}

/// Manifest entries as exclusions for discovery, relative to `base`.
///
/// A missing manifest means nothing to exclude.
#[must_use]
pub fn manifest_exclusions(base: &Path, manifest_name: &str) -> Vec<String> {
    match read_manifest(&base.join(manifest_name)) {
        Ok(entries) => entries,
        Err(NorminoError::ManifestNotFound(_)) => Vec::new(),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable fixture manifest");
            Vec::new()
        }
    }
}

/// What happened to one manifest entry during cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanEntry {
    Deleted(PathBuf),
    Missing(PathBuf),
}

/// Delete every path listed in the manifest under `base`, deepest names first.
///
/// The manifest lists itself, so it goes away with the rest.
///
/// # Errors
/// Returns an error if the manifest is missing or a listed path cannot be removed.
pub fn clean_manifest(base: &Path, manifest_name: &str) -> Result<Vec<CleanEntry>> {
    let manifest = base.join(manifest_name);
    let mut entries = read_manifest(&manifest)?;
    entries.sort_unstable_by(|a, b| b.cmp(a));
    entries.dedup();

    let mut results = Vec::with_capacity(entries.len());
    for entry in entries {
        let full = base.join(&entry);
        let Ok(metadata) = fs::symlink_metadata(&full) else {
            results.push(CleanEntry::Missing(full));
            continue;
        };
        if metadata.is_dir() {
            fs::remove_dir_all(&full)?;
        } else {
            fs::remove_file(&full)?;
        }
        tracing::debug!(path = %full.display(), "removed fixture entry");
        results.push(CleanEntry::Deleted(full));
    }
    Ok(results)
}
