//! Shell completion scripts

use anyhow::{Context, Result};
use clap::Command;
use clap_complete::{generate, Shell};

/// Execute the completions command
///
/// Renders the completion script for `shell` so the front end can print it,
/// e.g. `strichliste-cli completions zsh > ~/.zsh/completions/_strichliste-cli`.
///
/// # Errors
/// Returns an error if the generated script is not valid UTF-8
pub fn execute(shell: Shell, mut cmd: Command) -> Result<String> {
    let bin_name = cmd.get_name().to_string();
    let mut script = Vec::new();
    generate(shell, &mut cmd, bin_name, &mut script);

    let script = String::from_utf8(script).context("Completion script is not valid UTF-8")?;
    Ok(script.trim_end().to_string())
}
