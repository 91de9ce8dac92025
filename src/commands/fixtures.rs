use std::io::{self, Write};
use std::path::Path;

use crate::cli::Cli;
use crate::error::Result;
use crate::fixtures::{
    CleanEntry, FixtureStore, HttpClient, NameMatch, ReqwestClient, clean_manifest, match_name,
};
use crate::output::{Color, Palette};
use crate::EXIT_SUCCESS;

use super::context::{color_choice_to_mode, resolve_config};

/// `normino --test [NAME...]`: list the published fixture sets, or download one.
///
/// # Errors
/// Returns an error if the server cannot be reached or the download cannot be written.
pub fn run_test(cli: &Cli, name: Option<&str>) -> Result<i32> {
    let config = resolve_config(cli)?;
    let store = FixtureStore::new(
        ReqwestClient::new()?,
        &config.fixtures.base_url,
        &config.fixtures.manifest,
    );
    let palette = Palette::stdout(color_choice_to_mode(cli.color));
    let cwd = std::env::current_dir()?;

    let mut stdout = io::stdout().lock();
    match name {
        Some(name) => download_impl(&store, name, &cwd, palette, &mut stdout)?,
        None => list_available_impl(&store, palette, &mut stdout)?,
    }
    Ok(EXIT_SUCCESS)
}

/// # Errors
/// Returns an error if the list cannot be fetched or `out` fails.
pub fn list_available_impl<H: HttpClient, W: Write>(
    store: &FixtureStore<H>,
    palette: Palette,
    out: &mut W,
) -> Result<()> {
    let names = store.available()?;
    writeln!(
        out,
        "{}",
        palette.bold("Projects with Tests Available:\n", Color::Green)
    )?;
    for name in names {
        writeln!(out, "{}", palette.paint(&format!(" - {name}"), Color::Cyan))?;
    }
    writeln!(out)?;
    Ok(())
}

/// Resolve `query` against the published names and download on an exact match.
///
/// A near miss or no match is reported and is not an error.
///
/// # Errors
/// Returns an error if the list or the fixture listing cannot be fetched.
pub fn download_impl<H: HttpClient, W: Write>(
    store: &FixtureStore<H>,
    query: &str,
    dest: &Path,
    palette: Palette,
    out: &mut W,
) -> Result<()> {
    let available = store.available()?;
    let name = match match_name(query, &available) {
        NameMatch::Exact(name) => name,
        NameMatch::Suggestion(name) => {
            let hint = format!("Did you mean: {name}?");
            writeln!(out, "{}", palette.bold(&hint, Color::Yellow))?;
            return Ok(());
        }
        NameMatch::NoMatch => {
            let miss = format!("No match found for: {query}");
            writeln!(out, "{}", palette.bold(&miss, Color::Red))?;
            return Ok(());
        }
    };

    let starting = format!("Downloading test for: {name}");
    writeln!(out, "{}", palette.bold(&starting, Color::Green))?;

    let report = store.download(&name, dest)?;
    for failure in &report.failures {
        writeln!(
            out,
            "Failed to download file {}: {}",
            failure.url, failure.message
        )?;
    }

    let done = format!("Test downloaded for {name}!");
    writeln!(out, "{}", palette.bold(&done, Color::Green))?;
    Ok(())
}

/// `normino --clean`: remove everything the last download recorded.
///
/// # Errors
/// Returns an error if there is no manifest or a path cannot be removed.
pub fn run_clean(cli: &Cli) -> Result<i32> {
    let config = resolve_config(cli)?;
    let palette = Palette::stdout(color_choice_to_mode(cli.color));
    let cwd = std::env::current_dir()?;

    let mut stdout = io::stdout().lock();
    clean_impl(&cwd, &config.fixtures.manifest, palette, &mut stdout)?;
    Ok(EXIT_SUCCESS)
}

/// # Errors
/// Returns an error if there is no manifest, a path cannot be removed or `out` fails.
pub fn clean_impl<W: Write>(
    base: &Path,
    manifest_name: &str,
    palette: Palette,
    out: &mut W,
) -> Result<()> {
    for entry in clean_manifest(base, manifest_name)? {
        match entry {
            CleanEntry::Deleted(path) => {
                let line = format!("Deleted: {}", path.display());
                writeln!(out, "{}", palette.paint(&line, Color::Green))?;
            }
            CleanEntry::Missing(path) => {
                let line = format!("Path not found, skipping: {}", path.display());
                writeln!(out, "{}", palette.paint(&line, Color::Yellow))?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "fixtures_tests.rs"]
mod tests;
