use std::path::PathBuf;

use clap::{ArgGroup, Parser, ValueEnum};

/// Color output control
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal capability
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Parser, Debug)]
#[command(name = "normino")]
#[command(author, version, about = "Run norminette but better!")]
#[command(long_about = "Run norminette over many files at once and get one readable report.\n\n\
    Exit codes:\n  \
    0 - Check finished (style errors are reported, not fatal)\n  \
    1 - Push blocked or aborted, git, download or script failure\n  \
    2 - Configuration or runtime error\n  \
    130 - Cancelled with Ctrl-C")]
#[command(group(
    ArgGroup::new("action")
        .args(["test", "clean", "run", "update", "push"])
        .multiple(false)
))]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Files, directories or shell patterns like '*.c'
    #[arg(default_value = ".")]
    pub paths: Vec<String>,

    /// Paths or glob patterns to skip, e.g. -x tests 'bonus/*'
    #[arg(short = 'x', long, num_args = 1.., value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Display only errors
    #[arg(short = 'e', long = "error_only", visible_alias = "error-only")]
    pub error_only: bool,

    /// Display only the summary
    #[arg(short = 's', long = "summary_only", visible_alias = "summary-only")]
    pub summary_only: bool,

    /// Display detailed error messages
    #[arg(short = 'd', long)]
    pub detailed: bool,

    /// List all found .c and .h files and exit
    #[arg(short = 'l', long = "list_files", visible_alias = "list-files")]
    pub list_files: bool,

    /// Download tests with the given name (lists available tests without one)
    #[arg(short = 't', long, num_args = 0.., value_name = "NAME")]
    pub test: Option<Vec<String>>,

    /// Remove previously downloaded tests
    #[arg(short = 'c', long)]
    pub clean: bool,

    /// Run the installation script
    #[arg(short = 'r', long)]
    pub run: bool,

    /// Update normino
    #[arg(short = 'u', long)]
    pub update: bool,

    /// Check, then commit and push to git
    #[arg(short = 'p', long, num_args = 0..=1, value_name = "MESSAGE")]
    pub push: Option<Option<String>>,

    /// Number of checker processes to run at once
    #[arg(short = 'j', long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Per-file checker timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Checker executable to run instead of norminette
    #[arg(long, value_name = "CMD")]
    pub checker: Option<String>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Skip loading configuration file
    #[arg(long)]
    pub no_config: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto")]
    pub color: ColorChoice,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress output and non-essential logs
    #[arg(short, long)]
    pub quiet: bool,
}

/// What the invocation asks for, derived from the mutually exclusive flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Check,
    ListFiles,
    Test(Option<String>),
    Clean,
    Run,
    Update,
    Push(Option<String>),
}

impl Cli {
    #[must_use]
    pub fn action(&self) -> Action {
        if let Some(words) = &self.test {
            let name = words.join(" ");
            let name = name.trim();
            return Action::Test((!name.is_empty()).then(|| name.to_string()));
        }
        if self.clean {
            return Action::Clean;
        }
        if self.run {
            return Action::Run;
        }
        if self.update {
            return Action::Update;
        }
        if let Some(message) = &self.push {
            return Action::Push(message.clone());
        }
        if self.list_files {
            return Action::ListFiles;
        }
        Action::Check
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
