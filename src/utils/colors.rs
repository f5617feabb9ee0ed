//! Color theme for terminal output
//!
//! Respects `NO_COLOR` environment variable and --no-color CLI flag, and stays
//! plain when stdout is not a terminal so piped output is script-friendly.

use colored::{ColoredString, Colorize};
use std::sync::OnceLock;

/// Global color state - initialized once based on environment and CLI flags
static COLOR_ENABLED: OnceLock<bool> = OnceLock::new();

fn detect() -> bool {
    std::env::var("NO_COLOR").is_err() && atty::is(atty::Stream::Stdout)
}

/// Initialize color support based on environment and CLI flags
pub fn init_colors(no_color_flag: bool) {
    let should_enable = !no_color_flag && detect();

    COLOR_ENABLED.get_or_init(|| should_enable);

    // Disable colored crate if colors are disabled
    if !should_enable {
        colored::control::set_override(false);
    }
}

/// Check if colors are enabled
#[must_use]
pub fn colors_enabled() -> bool {
    *COLOR_ENABLED.get_or_init(detect)
}

fn paint(text: &str, style: fn(&str) -> ColoredString) -> ColoredString {
    if colors_enabled() {
        style(text)
    } else {
        text.normal()
    }
}

/// Color theme for CLI output
pub struct Theme;

impl Theme {
    /// Completed mutations (green)
    #[must_use]
    pub fn success(text: &str) -> ColoredString {
        paint(text, |t| t.green().bold())
    }

    /// Dry-run notices and empty results (yellow)
    #[must_use]
    pub fn warning(text: &str) -> ColoredString {
        paint(text, |t| t.yellow().bold())
    }

    /// Field labels (blue)
    #[must_use]
    pub fn info(text: &str) -> ColoredString {
        paint(text, |t| t.blue())
    }

    /// Record headings such as `#042 Club-Mate` (bold white)
    #[must_use]
    pub fn header(text: &str) -> ColoredString {
        paint(text, |t| t.white().bold())
    }

    /// Secondary information (dark gray)
    #[must_use]
    pub fn dim(text: &str) -> ColoredString {
        paint(text, |t| t.bright_black())
    }

    /// Amounts and other values (magenta)
    #[must_use]
    pub fn value(text: &str) -> ColoredString {
        paint(text, |t| t.magenta())
    }

    /// A boolean flag, green when set and red otherwise
    #[must_use]
    pub fn flag(enabled: bool) -> ColoredString {
        let text = enabled.to_string();
        if enabled {
            paint(&text, |t| t.green())
        } else {
            paint(&text, |t| t.red())
        }
    }
}
