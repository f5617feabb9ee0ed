//! Show the effective client configuration

use crate::config::Context;
use crate::utils::colors::Theme;
use anyhow::Result;
use std::fmt::Write as _;
use std::path::PathBuf;

/// Execute the config command
///
/// Lists where each ambient value came from as far as the client knows it,
/// without contacting the backend.
///
/// # Errors
/// Returns an error only if formatting fails
pub fn execute(context: &Context, search_dirs: &[PathBuf]) -> Result<String> {
    let acting_user = if context.acting_user.is_empty() {
        Theme::warning("(none)")
    } else {
        Theme::value(&context.acting_user)
    };
    let source = context.config_source.as_ref().map_or_else(
        || Theme::dim("(no config file found)"),
        |path| Theme::value(&path.display().to_string()),
    );

    let mut output = String::new();
    writeln!(&mut output, "{}", Theme::header("Client Configuration"))?;
    writeln!(&mut output, "{:<14} {}", Theme::info("user:"), acting_user)?;
    writeln!(&mut output, "{:<14} {}", Theme::info("api-url:"), Theme::value(&context.api_url))?;
    writeln!(&mut output, "{:<14} {}", Theme::info("config file:"), source)?;
    write!(&mut output, "{}", Theme::info("search path:"))?;
    for dir in search_dirs {
        write!(&mut output, "\n  {}", Theme::dim(&dir.display().to_string()))?;
    }

    Ok(output)
}
