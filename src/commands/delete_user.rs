//! Disable a user account

use crate::api::StrichlisteApi;
use crate::errors::parse_user_id;
use crate::utils::colors::Theme;
use anyhow::{anyhow, Result};
use tracing::info;

/// Execute the delete user command
///
/// Accounts are never removed, only disabled. Without `confirm` nothing is
/// submitted and the command fails with a description of what would happen.
///
/// # Errors
/// Returns an error if:
/// - The id is invalid or unknown
/// - The account is already disabled
/// - `confirm` is not set (dry run)
/// - The backend call fails or leaves the account active
pub async fn execute<A: StrichlisteApi + ?Sized>(
    api: &A,
    id_str: &str,
    confirm: bool,
) -> Result<String> {
    let id = parse_user_id(id_str)?;
    let user = api.get_user(id).await?;

    if !user.is_active {
        return Err(anyhow!("user #{} ({}) is already disabled", user.id, user.name));
    }

    if !confirm {
        return Err(anyhow!(
            "dry-run: would disable user #{} ({}), pass --confirm to proceed",
            user.id,
            user.name
        ));
    }

    info!("Disabling user #{}", user.id);
    let disabled = api.deactivate_user(user.id).await?;
    if disabled.is_active {
        return Err(anyhow!(
            "failed to disable user #{} ({}): backend still reports it as active",
            disabled.id,
            disabled.name
        ));
    }

    Ok(format!(
        "{}",
        Theme::success(&format!("disabled user #{} ({})", disabled.id, disabled.name))
    ))
}
