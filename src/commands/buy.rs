//! Buy an article on the acting user's tab

use crate::api::StrichlisteApi;
use crate::config::Context;
use crate::errors::parse_article_id;
use crate::lookup::user_by_name;
use crate::utils::formatting::format_transaction_report;
use anyhow::{anyhow, Result};
use tracing::info;

/// Execute the buy command
///
/// # Errors
/// Returns an error if:
/// - The article id is invalid
/// - `count` is not positive (checked before any request)
/// - The acting user cannot be resolved
/// - The backend rejects the purchase
pub async fn execute<A: StrichlisteApi + ?Sized>(
    api: &A,
    context: &Context,
    article_str: &str,
    count: i64,
    comment: Option<&str>,
) -> Result<String> {
    let article_id = parse_article_id(article_str)?;
    if count <= 0 {
        return Err(anyhow!("count must be positive, got {count}"));
    }
    let quantity =
        u32::try_from(count).map_err(|_| anyhow!("count {count} is too large"))?;

    let user = user_by_name(api, &context.acting_user).await?;
    let settings = api.get_settings().await?;

    info!(
        "Buying {} x article #{} for user #{}",
        quantity, article_id, user.id
    );
    let transaction = api
        .create_purchase(
            user.id,
            article_id,
            quantity,
            comment.filter(|c| !c.is_empty()),
        )
        .await?;

    Ok(format_transaction_report(
        &transaction,
        settings.currency_symbol(),
    ))
}
