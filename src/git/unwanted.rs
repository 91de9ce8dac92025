use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;

/// Top-level names that usually should not be committed.
const JUNK_PATTERNS: &[&str] = &[".*", "*.o", "*.a", "*~", "*.swp", "*.swo", "*.swn"];
const SOURCE_EXTENSIONS: &[&str] = &["c", "h", "sh"];

/// Files under `root` that are probably not meant to be pushed.
///
/// Two kinds are reported: executables anywhere outside `.git` that are not
/// C sources, headers or shell scripts, and top-level entries matching
/// [`JUNK_PATTERNS`]. `.git`, `.gitignore` and anything named like a Makefile
/// are never reported.
#[must_use]
pub fn find_unwanted_files(root: &Path) -> Vec<PathBuf> {
    let mut found = BTreeSet::new();

    for entry in WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || e.file_name() != ".git")
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        if is_executable(path) && !has_source_extension(path) {
            found.insert(path.to_path_buf());
        }
    }

    let junk = junk_matcher();
    if let Ok(entries) = fs::read_dir(root) {
        for entry in entries.filter_map(std::result::Result::ok) {
            if junk.is_match(entry.file_name()) {
                found.insert(entry.path());
            }
        }
    }

    found
        .into_iter()
        .filter(|path| !is_always_allowed(path))
        .collect()
}

fn junk_matcher() -> GlobSet {
    let mut builder = GlobSetBuilder::new();
    for pattern in JUNK_PATTERNS {
        if let Ok(glob) = Glob::new(pattern) {
            builder.add(glob);
        }
    }
    builder.build().unwrap_or_else(|_| GlobSet::empty())
}

fn is_always_allowed(path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    name == ".git" || name == ".gitignore" || name.ends_with("Makefile")
}

fn has_source_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path).is_ok_and(|m| m.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("exe"))
}
