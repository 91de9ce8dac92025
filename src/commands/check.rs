use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::checker::{Checker, ChildRegistry};
use crate::cli::Cli;
use crate::engine::Engine;
use crate::error::Result;
use crate::output::{
    CheckProgress, Color, Palette, ReportOptions, TextReporter, display_path, terminal_width,
};
use crate::report::RunReport;
use crate::EXIT_SUCCESS;

use super::context::{build_checker, color_choice_to_mode, discover, resolve_config};

/// Presentation settings for one check run.
pub struct CheckSettings {
    pub palette: Palette,
    pub width: usize,
    pub options: ReportOptions,
    /// Paths under this directory are shown relative to it.
    pub root: PathBuf,
    pub hide_progress: bool,
}

/// `normino [PATHS...]`: check every discovered file and print the report.
///
/// Style errors are reported, not fatal, so a finished run exits 0.
///
/// # Errors
/// Returns an error if configuration, discovery or the worker pool fails.
pub fn run_check(cli: &Cli, registry: Arc<ChildRegistry>) -> Result<i32> {
    let config = resolve_config(cli)?;
    let cwd = dunce::canonicalize(std::env::current_dir()?)?;
    let files = discover(&config, &cli.paths, &cwd)?;

    let engine = Engine::new(build_checker(&config, registry), config.checker.jobs);
    let settings = CheckSettings {
        palette: Palette::stdout(color_choice_to_mode(cli.color)),
        width: terminal_width(),
        options: ReportOptions {
            error_only: cli.error_only,
            summary_only: cli.summary_only,
            detailed: cli.detailed,
        },
        root: cwd,
        hide_progress: cli.quiet,
    };

    let mut stdout = io::stdout().lock();
    run_check_impl(&engine, &files, &settings, &mut stdout)?;
    Ok(EXIT_SUCCESS)
}

/// Check `files`, write the report and the elapsed time to `out`.
///
/// # Errors
/// Returns an error if the worker pool cannot be built or `out` fails.
pub fn run_check_impl<C: Checker, W: Write>(
    engine: &Engine<C>,
    files: &[PathBuf],
    settings: &CheckSettings,
    out: &mut W,
) -> Result<RunReport> {
    let started = Instant::now();
    let report = collect_report(engine, files, settings.options.detailed, settings.hide_progress)?;

    let reporter = TextReporter::new(settings.palette, settings.width, settings.options)
        .with_root(&settings.root);
    write!(out, "{}", reporter.render(&report))?;

    let elapsed = format!(
        "Execution time: {:.2} seconds",
        started.elapsed().as_secs_f64()
    );
    writeln!(out, "{}", settings.palette.paint(&elapsed, Color::Blue))?;

    tracing::info!(
        ok = report.ok.len(),
        warnings = report.warnings.len(),
        errors = report.errors.len(),
        failed = report.failed.len(),
        "check run finished"
    );
    Ok(report)
}

/// Run the engine behind a progress spinner and bucket the outcomes.
///
/// # Errors
/// Returns an error if the worker pool cannot be built.
pub fn collect_report<C: Checker>(
    engine: &Engine<C>,
    files: &[PathBuf],
    detailed: bool,
    hide_progress: bool,
) -> Result<RunReport> {
    let progress = CheckProgress::new(files.len() as u64, hide_progress);
    let outcomes = engine.run(files, detailed, |_| progress.inc());
    progress.finish();
    Ok(RunReport::from_outcomes(outcomes?))
}

/// `normino --list_files`: print the discovered files, sorted, one per line.
///
/// # Errors
/// Returns an error if configuration or discovery fails.
pub fn run_list_files(cli: &Cli) -> Result<i32> {
    let config = resolve_config(cli)?;
    let cwd = dunce::canonicalize(std::env::current_dir()?)?;
    let files = discover(&config, &cli.paths, &cwd)?;

    let mut stdout = io::stdout().lock();
    run_list_files_impl(&files, &cwd, &mut stdout)?;
    Ok(EXIT_SUCCESS)
}

/// # Errors
/// Returns an error if `out` fails.
pub fn run_list_files_impl<W: Write>(files: &[PathBuf], root: &Path, out: &mut W) -> Result<()> {
    let mut shown: Vec<String> = files.iter().map(|f| display_path(f, Some(root))).collect();
    shown.sort();
    for path in shown {
        writeln!(out, "{path}")?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
