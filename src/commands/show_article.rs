//! Show articles by id, name, or barcode

use crate::api::StrichlisteApi;
use crate::lookup::find_articles;
use crate::utils::colors::Theme;
use crate::utils::formatting::format_articles;
use anyhow::Result;
use tracing::info;

/// Execute the article lookup command
///
/// # Errors
/// Returns an error if a backend request fails
pub async fn execute<A: StrichlisteApi + ?Sized>(api: &A, query: &str) -> Result<String> {
    info!("Looking up articles matching '{}'", query);

    let articles = find_articles(api, query).await?;
    let settings = api.get_settings().await?;

    if articles.is_empty() {
        return Ok(format!(
            "{}",
            Theme::warning(&format!("No articles found matching '{query}'"))
        ));
    }

    Ok(format_articles(&articles, settings.currency_symbol()))
}
