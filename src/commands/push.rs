//! `normino --push`: check the repository, ask before pushing anything dubious, then push.

use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use crate::checker::ChildRegistry;
use crate::cli::Cli;
use crate::engine::Engine;
use crate::error::{NorminoError, Result};
use crate::git::{GitCli, GitContext, GitOps, find_unwanted_files, has_git_dir};
use crate::output::{Color, DEFAULT_WIDTH, Palette, ReportOptions, TextReporter};
use crate::EXIT_SUCCESS;

use super::check::collect_report;
use super::context::{build_checker, color_choice_to_mode, discover, resolve_config};

const PUSH_ABORTED: &str = "Push aborted!";

/// Source of answers to interactive questions.
pub trait Prompt {
    /// Show `question` and return the answer line without its newline.
    ///
    /// # Errors
    /// Returns an error if no answer can be read.
    fn ask(&mut self, question: &str) -> Result<String>;
}

/// Asks on stdout and reads answers from stdin.
pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn ask(&mut self, question: &str) -> Result<String> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{question}")?;
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            // closed stdin can never say yes
            writeln!(stdout)?;
            return Err(NorminoError::Aborted(PUSH_ABORTED.to_string()));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// One push attempt: the confirmation gates followed by the git steps.
pub struct PushSession<'a, G: GitOps, P: Prompt, W: Write> {
    git: &'a G,
    prompt: &'a mut P,
    out: &'a mut W,
    palette: Palette,
}

impl<'a, G: GitOps, P: Prompt, W: Write> PushSession<'a, G, P, W> {
    pub fn new(git: &'a G, prompt: &'a mut P, out: &'a mut W, palette: Palette) -> Self {
        Self {
            git,
            prompt,
            out,
            palette,
        }
    }

    /// Ask a y/n question until the answer is one of the two.
    ///
    /// # Errors
    /// Returns an error if the prompt or output fails.
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        let question = self.palette.paint(question, Color::Orange);
        loop {
            match self.prompt.ask(&question)?.trim().to_lowercase().as_str() {
                "y" => return Ok(true),
                "n" => return Ok(false),
                _ => writeln!(self.out, "Invalid input. Please enter 'y' or 'n'.")?,
            }
        }
    }

    /// List directories with norm errors and ask whether to push anyway.
    ///
    /// `counts` includes files that timed out or crashed the checker; they
    /// are reported under the same "error(s)" heading.
    ///
    /// # Errors
    /// Returns [`NorminoError::Aborted`] if the operator declines.
    pub fn gate_norm_errors(&mut self, counts: &BTreeMap<PathBuf, usize>) -> Result<()> {
        if counts.values().sum::<usize>() == 0 {
            return Ok(());
        }

        let reporter = TextReporter::new(self.palette, DEFAULT_WIDTH, ReportOptions::default());
        write!(self.out, "{}", reporter.render_directory_summary(counts))?;
        self.gate(
            "There are norm errors! Are you sure you want to push? (y/n): ",
            "Proceeding with push despite norm errors.",
        )
    }

    /// List files that look unintended and ask whether to push anyway.
    ///
    /// # Errors
    /// Returns [`NorminoError::Aborted`] if the operator declines.
    pub fn gate_unwanted(&mut self, files: &[PathBuf]) -> Result<()> {
        if files.is_empty() {
            return Ok(());
        }

        let p = self.palette;
        writeln!(
            self.out,
            "{}",
            p.bold("Potential unwanted files detected:", Color::Red)
        )?;
        for file in files {
            let line = format!(" - {}", file.display());
            writeln!(self.out, "{}", p.paint(&line, Color::Yellow))?;
        }
        self.gate(
            "Unwanted files detected! Are you sure you want to push? (y/n): ",
            "Proceeding with push despite unwanted files.",
        )
    }

    fn gate(&mut self, question: &str, proceeding: &str) -> Result<()> {
        if self.confirm(question)? {
            writeln!(self.out, "{}", self.palette.paint(proceeding, Color::Blue))?;
            Ok(())
        } else {
            Err(NorminoError::Aborted(PUSH_ABORTED.to_string()))
        }
    }

    /// Stage, commit and push everything, unless the tree is clean.
    ///
    /// # Errors
    /// Returns [`NorminoError::Aborted`] carrying the git failure.
    pub fn commit_and_push(&mut self, message: &str) -> Result<()> {
        let p = self.palette;

        let status = self.git.status_porcelain().map_err(bare)?;
        if status.trim().is_empty() {
            writeln!(
                self.out,
                "{}",
                p.paint("Nothing to commit, working tree clean.", Color::Green)
            )?;
            return Ok(());
        }

        self.git.add_all().map_err(bare)?;
        self.git.commit(message).map_err(bare)?;
        let committed = format!("Committed changes with message: '{message}'");
        writeln!(self.out, "{}", p.paint(&committed, Color::Green))?;

        let branch = self.git.current_branch().map_err(|e| {
            tracing::debug!(error = %e, "branch lookup failed");
            NorminoError::Aborted("Failed to retrieve current branch.".to_string())
        })?;
        self.git.push(&branch).map_err(bare)?;
        writeln!(self.out, "{}", p.paint("Push successful.", Color::Green))?;
        Ok(())
    }
}

/// Git failures already carry a complete sentence; print them as-is.
fn bare(error: NorminoError) -> NorminoError {
    match error {
        NorminoError::Git(message) => NorminoError::Aborted(message),
        other => other,
    }
}

/// Use `message` if given, otherwise ask for one.
///
/// # Errors
/// Returns [`NorminoError::Aborted`] if the message ends up empty.
pub fn resolve_message<P: Prompt>(
    prompt: &mut P,
    message: Option<&str>,
    palette: Palette,
) -> Result<String> {
    let message = match message {
        Some(m) if !m.trim().is_empty() => m.to_string(),
        _ => prompt
            .ask(&palette.paint("Enter commit message: ", Color::Green))?
            .trim()
            .to_string(),
    };
    if message.is_empty() {
        return Err(NorminoError::Aborted(
            "Commit message cannot be empty.".to_string(),
        ));
    }
    Ok(message)
}

/// # Errors
/// Returns an error if the push is blocked, declined or git fails.
pub fn run_push(cli: &Cli, message: Option<&str>, registry: Arc<ChildRegistry>) -> Result<i32> {
    let palette = Palette::stdout(color_choice_to_mode(cli.color));
    let mut prompt = StdinPrompt;
    let message = resolve_message(&mut prompt, message, palette)?;

    let cwd = std::env::current_dir()?;
    if !has_git_dir(&cwd) {
        return Err(NorminoError::Aborted(
            "Current directory is not a Git repository.".to_string(),
        ));
    }
    let repo = GitContext::discover(&cwd)?;
    std::env::set_current_dir(&repo.root)?;

    let config = resolve_config(cli)?;
    let files = discover(&config, &[".".to_string()], &repo.root)?;
    let engine = Engine::new(build_checker(&config, registry), config.checker.jobs);
    let report = collect_report(&engine, &files, false, true)?;

    let git = GitCli::new(&repo.root, repo.branch.clone());
    let mut stdout = io::stdout();
    let mut session = PushSession::new(&git, &mut prompt, &mut stdout, palette);
    session.gate_norm_errors(&report.per_directory_failures())?;
    session.gate_unwanted(&find_unwanted_files(&repo.root))?;
    session.commit_and_push(&message)?;
    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
#[path = "push_tests.rs"]
mod tests;
