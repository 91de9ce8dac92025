mod loader;
mod model;

pub use loader::{
    ConfigLoader, FileConfigLoader, FileSystem, LOCAL_CONFIG_NAME, RealFileSystem, validate_config,
};
pub use model::{
    CheckerConfig, Config, DEFAULT_BASE_URL, DEFAULT_CHECKER, DEFAULT_JOBS, DEFAULT_MANIFEST,
    DEFAULT_TIMEOUT_SECS, FixturesConfig, ScanConfig,
};
