//! Reference test fixtures published on a plain HTTP directory index.

mod http;
mod listing;
mod manifest;
mod matcher;

pub use http::{HttpClient, ReqwestClient};
pub use listing::{ListingEntry, join_url, parse_listing};
pub use manifest::{
    CleanEntry, clean_manifest, manifest_exclusions, read_manifest, write_manifest,
};
pub use matcher::{NameMatch, SUGGESTION_CUTOFF, match_name, normalize_name, similarity};

use std::fs;
use std::path::Path;

use crate::error::Result;

const AVAILABLE_LIST: &str = "available.txt";
const TEMP_PREFIX: &str = ".normino-download-";

/// A file that could not be fetched; the rest of the download continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadFailure {
    pub url: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadReport {
    /// Top-level names now present in the destination, manifest included.
    pub entries: Vec<String>,
    pub failures: Vec<DownloadFailure>,
}

pub struct FixtureStore<H: HttpClient> {
    http: H,
    base_url: String,
    manifest_name: String,
}

impl<H: HttpClient> FixtureStore<H> {
    #[must_use]
    pub fn new(http: H, base_url: &str, manifest_name: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            manifest_name: manifest_name.to_string(),
        }
    }

    /// Names of the fixture sets published on the server.
    ///
    /// # Errors
    /// Returns an error if the list cannot be fetched.
    pub fn available(&self) -> Result<Vec<String>> {
        let text = self
            .http
            .get_text(&join_url(&self.base_url, AVAILABLE_LIST))?;
        Ok(text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(ToString::to_string)
            .collect())
    }

    /// Download the fixture set `name` into `dest` and record it in the manifest.
    ///
    /// The tree is assembled in a temporary directory inside `dest` and moved
    /// into place only once complete. Existing entries with the same names are
    /// replaced.
    ///
    /// # Errors
    /// Returns an error if the top-level listing cannot be fetched or the
    /// files cannot be written.
    pub fn download(&self, name: &str, dest: &Path) -> Result<DownloadReport> {
        let staging = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .tempdir_in(dest)?;
        let root_url = format!("{}/", join_url(&self.base_url, name));

        let mut report = DownloadReport::default();
        let listing = self.http.get_text(&root_url)?;
        self.download_listing(&listing, &root_url, staging.path(), &mut report.failures)?;

        let mut entries: Vec<String> = fs::read_dir(staging.path())?
            .filter_map(std::result::Result::ok)
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        entries.push(self.manifest_name.clone());
        entries.sort();
        entries.dedup();
        write_manifest(&staging.path().join(&self.manifest_name), &entries)?;

        for entry in &entries {
            let target = dest.join(entry);
            replace_existing(&target)?;
            fs::rename(staging.path().join(entry), &target)?;
            make_accessible(&target)?;
        }

        report.entries = entries;
        Ok(report)
    }

    fn download_listing(
        &self,
        html: &str,
        url: &str,
        dir: &Path,
        failures: &mut Vec<DownloadFailure>,
    ) -> Result<()> {
        for entry in parse_listing(html, url) {
            let target = dir.join(&entry.name);
            if entry.is_dir {
                fs::create_dir_all(&target)?;
                match self.http.get_text(&entry.url) {
                    Ok(listing) => {
                        self.download_listing(&listing, &entry.url, &target, failures)?;
                    }
                    Err(e) => failures.push(DownloadFailure {
                        url: entry.url,
                        message: e.to_string(),
                    }),
                }
            } else {
                match self.http.get_bytes(&entry.url) {
                    Ok(bytes) => fs::write(&target, bytes)?,
                    Err(e) => failures.push(DownloadFailure {
                        url: entry.url,
                        message: e.to_string(),
                    }),
                }
            }
        }
        Ok(())
    }
}

fn replace_existing(target: &Path) -> Result<()> {
    let Ok(metadata) = fs::symlink_metadata(target) else {
        return Ok(());
    };
    tracing::warn!(path = %target.display(), "replacing existing fixture entry");
    if metadata.is_dir() {
        fs::remove_dir_all(target)?;
    } else {
        fs::remove_file(target)?;
    }
    Ok(())
}

#[cfg(unix)]
fn make_accessible(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    Ok(())
}

#[cfg(not(unix))]
fn make_accessible(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
