mod color;
mod error_output;
mod path;
mod progress;
mod terminal;
mod text;

pub use color::{Color, ColorMode, Palette};
pub use error_output::ErrorOutput;
pub use path::display_path;
pub use progress::CheckProgress;
pub use terminal::{DEFAULT_WIDTH, terminal_width};
pub use text::{
    DIVIDER, FAIL_HEADER, FAILED_HEADER, PASS_HEADER, ReportOptions, TextReporter, WARN_HEADER,
    WARNING_ADVICE,
};
