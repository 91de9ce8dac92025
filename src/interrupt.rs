//! Ctrl-C handling: stop every running checker and leave with a clean line.

use std::io::{self, Write};
use std::sync::Arc;

use crate::checker::ChildRegistry;
use crate::error::Result;
use crate::output::{Color, Palette};
use crate::EXIT_INTERRUPTED;

pub const CANCELLED_MESSAGE: &str = "Operation cancelled by user.";

/// Carriage return plus erase-line, so the notice replaces a half-drawn spinner.
const CLEAR_LINE: &str = "\r\x1b[2K";

/// Install the process-wide Ctrl-C handler.
///
/// Can only succeed once per process.
///
/// # Errors
/// Returns an error if a handler is already installed or the signal cannot be hooked.
pub fn install(registry: Arc<ChildRegistry>, palette: Palette) -> Result<()> {
    ctrlc::set_handler(move || {
        let killed = registry.kill_all();
        tracing::debug!(killed, "interrupted");

        let mut stderr = io::stderr().lock();
        let _ = write!(stderr, "{}", cancel_notice(palette));
        let _ = stderr.flush();
        std::process::exit(EXIT_INTERRUPTED);
    })
    .map_err(io::Error::other)?;
    Ok(())
}

fn cancel_notice(palette: Palette) -> String {
    let clear = if palette.is_enabled() { CLEAR_LINE } else { "" };
    format!("{clear}{}\n", palette.paint(CANCELLED_MESSAGE, Color::Orange))
}
