use serde::{Deserialize, Serialize};

pub const DEFAULT_CHECKER: &str = "norminette";
pub const DEFAULT_JOBS: usize = 7;
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_BASE_URL: &str = "https://smasse.xyz";
pub const DEFAULT_MANIFEST: &str = "downloaded.tests";

/// Top-level `.normino.toml` document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub checker: CheckerConfig,

    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub fixtures: FixturesConfig,
}

/// How the external checker is invoked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CheckerConfig {
    /// Executable name or path.
    #[serde(default = "default_command")]
    pub command: String,

    /// Extra arguments placed before the file path.
    #[serde(default)]
    pub args: Vec<String>,

    /// Per-file deadline in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Number of checker processes allowed to run at once.
    #[serde(default = "default_jobs")]
    pub jobs: usize,

    /// File extensions handed to the checker.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
            args: Vec::new(),
            timeout_secs: default_timeout_secs(),
            jobs: default_jobs(),
            extensions: default_extensions(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ScanConfig {
    /// Paths or glob patterns never handed to the checker.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Skip everything listed in the fixture manifest.
    #[serde(default = "default_true")]
    pub respect_manifest: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            exclude: Vec::new(),
            respect_manifest: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FixturesConfig {
    /// Server hosting `available.txt`, the fixture listings and the install script.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Manifest file written next to downloaded fixtures.
    #[serde(default = "default_manifest")]
    pub manifest: String,
}

impl Default for FixturesConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            manifest: default_manifest(),
        }
    }
}

fn default_command() -> String {
    DEFAULT_CHECKER.to_string()
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

const fn default_jobs() -> usize {
    DEFAULT_JOBS
}

fn default_extensions() -> Vec<String> {
    vec!["c".to_string(), "h".to_string()]
}

const fn default_true() -> bool {
    true
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_manifest() -> String {
    DEFAULT_MANIFEST.to_string()
}
