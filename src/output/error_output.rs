//! Fatal error reporting on stderr.
//!
//! Format: `✖ {error_type}: {message}`, optionally followed by `  help: {suggestion}`.
//! An operator abort prints its message alone.

use std::io::Write;

use crate::error::NorminoError;

use super::color::{Color, ColorMode, Palette};

pub struct ErrorOutput {
    palette: Palette,
}

impl ErrorOutput {
    #[must_use]
    pub fn stderr(mode: ColorMode) -> Self {
        Self {
            palette: Palette::stderr(mode),
        }
    }

    #[cfg(test)]
    pub const fn with_colors(use_colors: bool) -> Self {
        Self {
            palette: Palette::new(use_colors),
        }
    }

    /// Print a fatal error to stderr.
    pub fn print(&self, error: &NorminoError) {
        let mut stderr = std::io::stderr().lock();
        self.write_error(&mut stderr, error);
    }

    pub fn write_error<W: Write>(&self, w: &mut W, error: &NorminoError) {
        // stderr may already be gone; nothing useful to do about it here
        if let NorminoError::Aborted(message) = error {
            let _ = writeln!(w, "{}", self.palette.bold(message, Color::Red));
            return;
        }
        let _ = writeln!(
            w,
            "{} {error}",
            self.palette
                .bold(&format!("✖ {}:", error.error_type()), Color::Red)
        );
        if let Some(hint) = suggestion(error) {
            let _ = writeln!(w, "  {} {hint}", self.palette.paint("help:", Color::Cyan));
        }
    }
}

fn suggestion(error: &NorminoError) -> Option<&'static str> {
    match error {
        NorminoError::TomlParse(_) | NorminoError::Config(_) => {
            Some("check .normino.toml or pass --no-config")
        }
        NorminoError::InvalidPattern { .. } => Some("quote glob patterns so the shell leaves them alone"),
        NorminoError::NotGitRepository(_) => Some("run the push from the root of a git repository"),
        NorminoError::ManifestNotFound(_) => Some("nothing was downloaded here with --test"),
        _ => None,
    }
}

#[cfg(test)]
#[path = "error_output_tests.rs"]
mod tests;
