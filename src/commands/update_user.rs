//! Update the acting user's metadata

use crate::api::{StrichlisteApi, UserUpdateRequest};
use crate::config::Context;
use crate::errors::NoUpdatesRequested;
use crate::lookup::user_by_name;
use crate::utils::colors::Theme;
use anyhow::Result;
use tracing::info;

/// Execute the update user command
///
/// Empty values count as not given. When nothing is left to change the
/// command fails with [`NoUpdatesRequested`] and submits nothing.
///
/// # Errors
/// Returns an error if the acting user cannot be resolved, nothing is to be
/// changed, or the backend rejects the update
pub async fn execute<A: StrichlisteApi + ?Sized>(
    api: &A,
    context: &Context,
    set_name: Option<&str>,
    set_email: Option<&str>,
) -> Result<String> {
    let user = user_by_name(api, &context.acting_user).await?;

    let request = UserUpdateRequest {
        name: set_name.filter(|s| !s.is_empty()).map(str::to_string),
        email: set_email.filter(|s| !s.is_empty()).map(str::to_string),
    };

    if request.is_empty() {
        return Err(NoUpdatesRequested {
            kind: "user",
            id: user.id,
            name: user.name,
        }
        .into());
    }

    info!("Updating user #{} with {:?}", user.id, request);
    let updated = api.update_user(user.id, &request).await?;

    Ok(format!(
        "{}",
        Theme::success(&format!("updated user #{} ({})", updated.id, updated.name))
    ))
}
