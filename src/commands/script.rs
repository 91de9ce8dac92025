use std::io::{self, Write};
use std::process::Command;

use crate::cli::Cli;
use crate::error::{NorminoError, Result};
use crate::fixtures::{HttpClient, ReqwestClient};
use crate::output::{Color, Palette};
use crate::{EXIT_FAILURE, EXIT_SUCCESS};

use super::context::{color_choice_to_mode, resolve_config};

const UPDATE_PROGRAM: &str = "cargo";
const UPDATE_ARGS: &[&str] = &["install", "--force", "normino"];

/// `normino --run`: fetch the installer script and run it with bash.
///
/// # Errors
/// Returns [`NorminoError::Script`] if the script cannot be fetched or fails.
pub fn run_script(cli: &Cli) -> Result<i32> {
    let config = resolve_config(cli)?;
    let http = ReqwestClient::new()?;
    run_script_impl(&http, &config.fixtures.base_url, "bash")?;
    Ok(EXIT_SUCCESS)
}

/// Download the script at `url` into a temporary `.sh` file and run it with `shell`.
///
/// The temporary file is removed afterwards, whatever the outcome.
///
/// # Errors
/// Returns [`NorminoError::Script`] on download, write or execution failure.
pub fn run_script_impl<H: HttpClient>(http: &H, url: &str, shell: &str) -> Result<()> {
    let body = http
        .get_bytes(url)
        .map_err(|e| NorminoError::Script(format!("Failed to download script: {e}")))?;

    let mut script = tempfile::Builder::new()
        .prefix("normino-")
        .suffix(".sh")
        .tempfile()?;
    script.write_all(&body)?;
    script.flush()?;

    tracing::debug!(path = %script.path().display(), shell, "running script");
    let status = Command::new(shell)
        .arg(script.path())
        .status()
        .map_err(|e| NorminoError::Script(format!("Failed to execute script: {e}")))?;

    if status.success() {
        Ok(())
    } else {
        Err(NorminoError::Script(format!(
            "Failed to execute script: {status}"
        )))
    }
}

/// `normino --update`: reinstall the latest release.
///
/// # Errors
/// Returns an error only if the outcome cannot be printed.
pub fn run_update(cli: &Cli) -> Result<i32> {
    let palette = Palette::stdout(color_choice_to_mode(cli.color));
    let mut stdout = io::stdout().lock();
    update_impl(UPDATE_PROGRAM, UPDATE_ARGS, palette, &mut stdout)
}

/// Run `program` and report its captured output as the update outcome.
///
/// # Errors
/// Returns an error if `out` fails.
pub fn update_impl<W: Write>(
    program: &str,
    args: &[&str],
    palette: Palette,
    out: &mut W,
) -> Result<i32> {
    let (succeeded, detail) = match Command::new(program).args(args).output() {
        Ok(output) if output.status.success() => {
            let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
            text.push_str(&String::from_utf8_lossy(&output.stderr));
            (true, text)
        }
        Ok(output) => (false, String::from_utf8_lossy(&output.stderr).into_owned()),
        Err(e) => (false, format!("failed to run {program}: {e}")),
    };

    if succeeded {
        let message = format!("Update successful:\n{detail}");
        writeln!(out, "{}", palette.paint(&message, Color::Green))?;
        Ok(EXIT_SUCCESS)
    } else {
        let message = format!("Update failed:\n{detail}");
        writeln!(out, "{}", palette.paint(&message, Color::Red))?;
        Ok(EXIT_FAILURE)
    }
}
