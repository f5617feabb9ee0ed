//! Add an article to the catalog

use crate::api::{ArticleCreateRequest, StrichlisteApi};
use crate::currency::from_display;
use crate::utils::colors::Theme;
use anyhow::Result;
use rust_decimal::Decimal;
use tracing::info;

/// Execute the create article command
///
/// # Errors
/// Returns an error if the price is out of range or the backend rejects the article
pub async fn execute<A: StrichlisteApi + ?Sized>(
    api: &A,
    name: &str,
    value: Decimal,
    barcode: Option<&str>,
) -> Result<String> {
    let request = ArticleCreateRequest {
        name: name.to_string(),
        value: from_display(value)?,
        barcode: barcode.filter(|b| !b.is_empty()).map(str::to_string),
    };

    info!("Creating article {:?}", request);
    let article = api.create_article(&request).await?;

    Ok(format!(
        "{}",
        Theme::success(&format!("created article #{} ({})", article.id, article.name))
    ))
}
