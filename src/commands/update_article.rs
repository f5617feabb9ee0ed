//! Update an existing article

use crate::api::{ArticleUpdateRequest, StrichlisteApi};
use crate::currency::from_display;
use crate::errors::{parse_article_id, NoUpdatesRequested};
use crate::utils::colors::Theme;
use anyhow::Result;
use rust_decimal::Decimal;
use tracing::info;

/// Fields to change; `None` and empty strings leave the current value
#[derive(Debug, Default)]
pub struct ArticleChanges<'a> {
    pub name: Option<&'a str>,
    pub value: Option<Decimal>,
    pub barcode: Option<&'a str>,
}

impl ArticleChanges<'_> {
    const fn is_empty(&self) -> bool {
        self.name.is_none() && self.value.is_none() && self.barcode.is_none()
    }
}

/// Execute the update article command
///
/// The backend only accepts complete updates, so the current article is
/// fetched first and its name and price are resubmitted unless changed.
///
/// # Errors
/// Returns an error if:
/// - The id is invalid or unknown
/// - No field is to be changed ([`NoUpdatesRequested`])
/// - The new price is out of range
/// - The backend rejects the update
pub async fn execute<A: StrichlisteApi + ?Sized>(
    api: &A,
    id_str: &str,
    changes: &ArticleChanges<'_>,
) -> Result<String> {
    let id = parse_article_id(id_str)?;
    let current = api.get_article(id).await?;

    let changes = ArticleChanges {
        name: changes.name.filter(|s| !s.is_empty()),
        value: changes.value,
        barcode: changes.barcode.filter(|s| !s.is_empty()),
    };
    if changes.is_empty() {
        return Err(NoUpdatesRequested {
            kind: "article",
            id: current.id,
            name: current.name,
        }
        .into());
    }

    let request = ArticleUpdateRequest {
        name: changes.name.map_or(current.name, str::to_string),
        value: changes.value.map(from_display).transpose()?.unwrap_or(current.value),
        barcode: changes.barcode.map(str::to_string),
    };

    info!("Updating article #{} with {:?}", id, request);
    let updated = api.update_article(id, &request).await?;

    Ok(format!(
        "{}",
        Theme::success(&format!("updated article #{} ({})", updated.id, updated.name))
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{Call, FakeApi};
    use crate::utils::colors::init_colors;
    use rust_decimal_macros::dec;

    fn api() -> FakeApi {
        FakeApi::new().with_article(3, "Mate", 150, Some("123"))
    }

    #[tokio::test]
    async fn test_barcode_only_resubmits_name_and_value() {
        init_colors(true);
        let api = api();
        let changes = ArticleChanges {
            barcode: Some("456"),
            ..ArticleChanges::default()
        };

        let output = execute(&api, "3", &changes).await.unwrap();
        assert_eq!(output, "updated article #3 (Mate)");
        assert_eq!(
            api.calls(),
            vec![Call::UpdateArticle(
                3,
                ArticleUpdateRequest {
                    name: "Mate".to_string(),
                    value: 150,
                    barcode: Some("456".to_string()),
                }
            )]
        );
    }

    #[tokio::test]
    async fn test_zero_price_is_a_change() {
        init_colors(true);
        let api = api();
        let changes = ArticleChanges {
            value: Some(dec!(0)),
            ..ArticleChanges::default()
        };

        execute(&api, "3", &changes).await.unwrap();
        assert_eq!(api.article(3).unwrap().value, 0);
        assert_eq!(api.article(3).unwrap().barcode.as_deref(), Some("123"));
    }

    #[tokio::test]
    async fn test_rename_and_reprice() {
        init_colors(true);
        let api = api();
        let changes = ArticleChanges {
            name: Some("Club-Mate"),
            value: Some(dec!(1.75)),
            barcode: None,
        };

        let output = execute(&api, "3", &changes).await.unwrap();
        assert_eq!(output, "updated article #3 (Club-Mate)");
        assert_eq!(api.article(3).unwrap().value, 175);
    }

    #[tokio::test]
    async fn test_nothing_to_update() {
        let api = api();
        let changes = ArticleChanges {
            name: Some(""),
            ..ArticleChanges::default()
        };

        let error = execute(&api, "3", &changes).await.unwrap_err();
        assert_eq!(error.to_string(), "no updates requested for article #3 (Mate)");
        assert!(error.downcast_ref::<NoUpdatesRequested>().is_some());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_article() {
        let api = api();
        let changes = ArticleChanges {
            name: Some("x"),
            ..ArticleChanges::default()
        };

        let error = execute(&api, "9", &changes).await.unwrap_err();
        assert_eq!(error.to_string(), "Article '9' not found (HTTP 404)");
    }
}
