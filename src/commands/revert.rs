//! Revert a transaction of the acting user

use crate::api::StrichlisteApi;
use crate::config::Context;
use crate::errors::parse_transaction_id;
use crate::lookup::user_by_name;
use crate::utils::colors::Theme;
use anyhow::{anyhow, Result};
use tracing::info;

/// Execute the revert command
///
/// # Errors
/// Returns an error if:
/// - The transaction id is invalid or unknown
/// - The transaction is already reversed or no longer reversible
/// - `confirm` is not set (dry run)
/// - The backend does not mark the transaction as reversed
pub async fn execute<A: StrichlisteApi + ?Sized>(
    api: &A,
    context: &Context,
    transaction_str: &str,
    confirm: bool,
) -> Result<String> {
    let transaction_id = parse_transaction_id(transaction_str)?;
    let user = user_by_name(api, &context.acting_user).await?;
    let transaction = api.get_transaction(user.id, transaction_id).await?;

    if transaction.is_reversed {
        return Err(anyhow!("transaction #{transaction_id} is already reversed"));
    }
    if !transaction.is_reversible {
        return Err(anyhow!("transaction #{transaction_id} can no longer be reversed"));
    }

    if !confirm {
        return Err(anyhow!(
            "dry-run: would revert transaction #{} of user #{} ({}), pass --confirm to proceed",
            transaction_id,
            user.id,
            user.name
        ));
    }

    info!("Reverting transaction #{} of user #{}", transaction_id, user.id);
    let reverted = api.revert_transaction(user.id, transaction_id).await?;
    if !reverted.is_reversed {
        return Err(anyhow!(
            "failed to revert transaction #{transaction_id}: backend does not report it as reversed"
        ));
    }

    Ok(format!(
        "{}",
        Theme::success(&format!("reversed transaction #{}", reverted.id))
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{Call, FakeApi};
    use crate::api::{Transaction, User};
    use crate::utils::colors::init_colors;

    fn transaction(id: u64, is_reversed: bool, is_reversible: bool) -> Transaction {
        Transaction {
            id,
            amount: -150,
            comment: None,
            issuer: User {
                id: 1,
                name: "alice".to_string(),
                email: None,
                balance: 0,
                is_active: true,
            },
            recipient: None,
            article: None,
            quantity: None,
            is_reversed,
            is_reversible,
        }
    }

    fn api(transaction: Transaction) -> FakeApi {
        FakeApi::new()
            .with_user(1, "alice", 0)
            .with_transaction(transaction)
    }

    #[tokio::test]
    async fn test_dry_run_by_default() {
        let api = api(transaction(12, false, true));

        let error = execute(&api, &Context::for_user("alice"), "12", false)
            .await
            .unwrap_err();
        assert_eq!(
            error.to_string(),
            "dry-run: would revert transaction #12 of user #1 (alice), pass --confirm to proceed"
        );
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_confirmed_revert() {
        init_colors(true);
        let api = api(transaction(12, false, true));

        let output = execute(&api, &Context::for_user("alice"), "12", true)
            .await
            .unwrap();
        assert_eq!(output, "reversed transaction #12");
        assert_eq!(
            api.calls(),
            vec![Call::Revert {
                user_id: 1,
                transaction_id: 12,
            }]
        );
    }

    #[tokio::test]
    async fn test_already_reversed() {
        let api = api(transaction(12, true, false));

        let error = execute(&api, &Context::for_user("alice"), "12", true)
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), "transaction #12 is already reversed");
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_not_reversible() {
        let api = api(transaction(12, false, false));

        let error = execute(&api, &Context::for_user("alice"), "12", true)
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), "transaction #12 can no longer be reversed");
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_backend_ignoring_revert_is_a_failure() {
        let api = api(transaction(12, false, true)).with_inert_mutations();

        let error = execute(&api, &Context::for_user("alice"), "12", true)
            .await
            .unwrap_err();
        assert!(error.to_string().starts_with("failed to revert transaction #12"));
        assert_eq!(api.calls().len(), 1);
    }
}
