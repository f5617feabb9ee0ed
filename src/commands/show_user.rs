//! Show user accounts by id or name

use crate::api::StrichlisteApi;
use crate::config::Context;
use crate::lookup::find_users;
use crate::utils::colors::Theme;
use crate::utils::formatting::format_users;
use anyhow::Result;
use tracing::info;

/// Execute the user lookup command
///
/// Without a query the acting user is shown.
///
/// # Errors
/// Returns an error if a backend request fails
pub async fn execute<A: StrichlisteApi + ?Sized>(
    api: &A,
    context: &Context,
    query: Option<&str>,
) -> Result<String> {
    let query = query.unwrap_or(&context.acting_user);
    info!("Looking up users matching '{}'", query);

    let users = find_users(api, query).await?;
    let settings = api.get_settings().await?;

    if users.is_empty() {
        return Ok(format!(
            "{}",
            Theme::warning(&format!("No users found matching '{query}'"))
        ));
    }

    Ok(format_users(&users, settings.currency_symbol()))
}
