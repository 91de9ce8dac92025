mod context;
mod ops;
mod unwanted;

pub use context::{GitContext, has_git_dir};
pub use ops::{GitCli, GitOps};
pub use unwanted::find_unwanted_files;
