//! Error helpers with actionable recovery suggestions
//!
//! Identifiers given on the command line are parsed here so that a typo
//! produces guidance instead of a bare parse error.

use anyhow::{anyhow, Result};
use thiserror::Error;

/// Parse a numeric identifier, explaining how to look one up on failure
fn parse_id(kind: &str, value: &str, suggestion: &str) -> Result<u64> {
    value.trim().parse::<u64>().map_err(|e| {
        anyhow!(
            "Invalid {kind} id: '{value}'\n\n\
             Ids are positive whole numbers, as shown in front of each search result (e.g. #042).\n\n\
             Did you mean to:\n  \
             • {suggestion}\n\n\
             Original error: {e}"
        )
    })
}

/// Parse a user id argument
///
/// # Errors
/// Returns enhanced error with lookup suggestions if parsing fails
pub fn parse_user_id(value: &str) -> Result<u64> {
    parse_id("user", value, "Search users by name with: strichliste-cli user <name>")
}

/// Parse an article id argument
///
/// # Errors
/// Returns enhanced error with lookup suggestions if parsing fails
pub fn parse_article_id(value: &str) -> Result<u64> {
    parse_id(
        "article",
        value,
        "Search articles with: strichliste-cli article <name or barcode>",
    )
}

/// Parse a transaction id argument
///
/// # Errors
/// Returns enhanced error with lookup suggestions if parsing fails
pub fn parse_transaction_id(value: &str) -> Result<u64> {
    parse_id(
        "transaction",
        value,
        "Use the id printed as 'created transaction #<id>' when it was booked",
    )
}

/// An update command was invoked without any field to change
///
/// The front end reacts to this by printing the subcommand's usage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no updates requested for {kind} #{id} ({name})")]
pub struct NoUpdatesRequested {
    /// Resource kind, e.g. "user" or "article"
    pub kind: &'static str,
    pub id: u64,
    pub name: String,
}
