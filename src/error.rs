use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NorminoError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid glob pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Failed to start worker pool: {0}")]
    ThreadPool(String),

    #[error("Git error: {0}")]
    Git(String),

    #[error("Not a git repository: {}", .0.display())]
    NotGitRepository(PathBuf),

    #[error("Request to {url} failed: {message}")]
    Http { url: String, message: String },

    #[error("No downloaded tests manifest found at {}", .0.display())]
    ManifestNotFound(PathBuf),

    #[error("{0}")]
    Script(String),

    #[error("{0}")]
    Aborted(String),
}

impl NorminoError {
    /// Short category name, stable across message wording changes.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) | Self::TomlParse(_) => "Config",
            Self::FileRead { .. } => "FileRead",
            Self::InvalidPattern { .. } => "Pattern",
            Self::Io(_) => "IO",
            Self::ThreadPool(_) => "ThreadPool",
            Self::Git(_) | Self::NotGitRepository(_) => "Git",
            Self::Http { .. } => "Http",
            Self::ManifestNotFound(_) => "Manifest",
            Self::Script(_) => "Script",
            Self::Aborted(_) => "Aborted",
        }
    }

    /// Exit code for the process when this error ends a command.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Git(_)
            | Self::NotGitRepository(_)
            | Self::Http { .. }
            | Self::ManifestNotFound(_)
            | Self::Script(_)
            | Self::Aborted(_) => crate::EXIT_FAILURE,
            _ => crate::EXIT_CONFIG_ERROR,
        }
    }
}

pub type Result<T> = std::result::Result<T, NorminoError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
