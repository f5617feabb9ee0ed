//! Disable an article

use crate::api::StrichlisteApi;
use crate::errors::parse_article_id;
use crate::utils::colors::Theme;
use anyhow::{anyhow, Result};
use tracing::info;

/// Execute the delete article command
///
/// Mirrors user deletion: dry run unless `confirm`, and success only when the
/// backend reports the article as inactive afterwards.
///
/// # Errors
/// Returns an error if the id is invalid or unknown, the article is already
/// disabled, `confirm` is not set, or the backend leaves it active
pub async fn execute<A: StrichlisteApi + ?Sized>(
    api: &A,
    id_str: &str,
    confirm: bool,
) -> Result<String> {
    let id = parse_article_id(id_str)?;
    let article = api.get_article(id).await?;

    if !article.is_active {
        return Err(anyhow!(
            "article #{} ({}) is already disabled",
            article.id,
            article.name
        ));
    }

    if !confirm {
        return Err(anyhow!(
            "dry-run: would disable article #{} ({}), pass --confirm to proceed",
            article.id,
            article.name
        ));
    }

    info!("Disabling article #{}", article.id);
    let disabled = api.deactivate_article(article.id).await?;
    if disabled.is_active {
        return Err(anyhow!(
            "failed to disable article #{} ({}): backend still reports it as active",
            disabled.id,
            disabled.name
        ));
    }

    Ok(format!(
        "{}",
        Theme::success(&format!("disabled article #{} ({})", disabled.id, disabled.name))
    ))
}
