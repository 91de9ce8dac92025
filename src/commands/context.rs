use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::checker::{ChildRegistry, NorminetteChecker};
use crate::cli::{Cli, ColorChoice};
use crate::config::{Config, ConfigLoader, FileConfigLoader, validate_config};
use crate::error::Result;
use crate::fixtures::manifest_exclusions;
use crate::output::ColorMode;
use crate::scanner::{DirectoryScanner, ExclusionFilter, discover_files};

#[must_use]
pub const fn color_choice_to_mode(choice: ColorChoice) -> ColorMode {
    match choice {
        ColorChoice::Auto => ColorMode::Auto,
        ColorChoice::Always => ColorMode::Always,
        ColorChoice::Never => ColorMode::Never,
    }
}

/// Load configuration from the filesystem.
///
/// # Errors
/// Returns an error if the config file cannot be read or parsed.
pub fn load_config(config_path: Option<&Path>, no_config: bool) -> Result<Config> {
    if no_config {
        return Ok(Config::default());
    }

    let loader = FileConfigLoader::new();
    match config_path {
        Some(path) => loader.load_from_path(path),
        None => loader.load(),
    }
}

/// Apply command-line overrides on top of the loaded configuration.
///
/// # Errors
/// Returns an error if the result no longer validates (for example `--jobs 0`).
pub fn apply_cli_overrides(config: &mut Config, cli: &Cli) -> Result<()> {
    if let Some(jobs) = cli.jobs {
        config.checker.jobs = jobs;
    }
    if let Some(timeout) = cli.timeout {
        config.checker.timeout_secs = timeout;
    }
    if let Some(checker) = &cli.checker {
        config.checker.command.clone_from(checker);
    }
    config.scan.exclude.extend(cli.exclude.iter().cloned());
    validate_config(config)
}

/// Configuration for a command: file, then flags.
///
/// # Errors
/// Returns an error if loading or validation fails.
pub fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = load_config(cli.config.as_deref(), cli.no_config)?;
    apply_cli_overrides(&mut config, cli)?;
    Ok(config)
}

/// Every exclusion in effect under `base`: configured patterns plus the fixture manifest.
#[must_use]
pub fn scan_exclusions(config: &Config, base: &Path) -> Vec<String> {
    let mut exclusions = config.scan.exclude.clone();
    if config.scan.respect_manifest {
        exclusions.extend(manifest_exclusions(base, &config.fixtures.manifest));
    }
    exclusions
}

/// Discover the files under `roots` that the checker should see.
///
/// # Errors
/// Returns an error if an exclusion or root pattern is invalid.
pub fn discover(config: &Config, roots: &[String], base: &Path) -> Result<Vec<PathBuf>> {
    let exclusions = scan_exclusions(config, base);
    let filter = ExclusionFilter::new(config.checker.extensions.clone(), &exclusions, base)?;
    let scanner = DirectoryScanner::new(filter);
    discover_files(&scanner, roots, base)
}

#[must_use]
pub fn build_checker(config: &Config, registry: Arc<ChildRegistry>) -> NorminetteChecker {
    tracing::debug!(
        command = %config.checker.command,
        timeout_secs = config.checker.timeout_secs,
        "configured checker"
    );
    NorminetteChecker::from_config(&config.checker, registry)
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
