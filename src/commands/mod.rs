pub mod check;
pub mod context;
pub mod fixtures;
pub mod push;
pub mod script;

pub use check::{CheckSettings, collect_report, run_check, run_list_files};
pub use context::{apply_cli_overrides, color_choice_to_mode, load_config, resolve_config};
pub use fixtures::{run_clean, run_test};
pub use push::{Prompt, PushSession, StdinPrompt, run_push};
pub use script::{run_script, run_update};
