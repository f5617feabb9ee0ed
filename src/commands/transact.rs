//! Credit and debit commands
//!
//! Both book either a single-account delta or a transfer between two
//! accounts, depending on which sides [`accounts::resolve`] fills in.

use crate::accounts::{self, Role, TransactionPlan};
use crate::api::StrichlisteApi;
use crate::config::Context;
use crate::currency::from_display;
use crate::lookup::user_by_name;
use crate::utils::formatting::format_transaction_report;
use anyhow::Result;
use rust_decimal::Decimal;
use tracing::info;

/// Flags shared by `credit` and `debit`
#[derive(Debug, Clone, Copy)]
pub struct TransactRequest<'a> {
    pub role: Role,
    pub from: Option<&'a str>,
    pub to: Option<&'a str>,
    pub comment: Option<&'a str>,
    /// Display amount; the sign is derived from the role
    pub amount: Decimal,
}

/// Execute a credit or debit command
///
/// The amount and the resolved accounts are validated before any request
/// is made.
///
/// # Errors
/// Returns an error if:
/// - The amount is zero or out of range
/// - Source and destination resolve to the same account
/// - An account name cannot be resolved
/// - The backend rejects the transaction
pub async fn execute<A: StrichlisteApi + ?Sized>(
    api: &A,
    context: &Context,
    request: &TransactRequest<'_>,
) -> Result<String> {
    let amount = from_display(request.amount)?;
    let endpoints = accounts::resolve(
        request.role,
        &context.acting_user,
        request.from,
        request.to,
    );
    let plan = accounts::plan_transaction(request.role, endpoints, amount)?;
    let comment = request.comment.filter(|c| !c.is_empty());
    let settings = api.get_settings().await?;

    let transaction = match plan {
        TransactionPlan::Delta { account, amount } => {
            let user = user_by_name(api, &account).await?;
            info!("Booking {} on user #{}", amount, user.id);
            api.create_delta(user.id, amount, comment).await?
        }
        TransactionPlan::Transfer {
            source,
            destination,
            amount,
        } => {
            let sender = user_by_name(api, &source).await?;
            let recipient = user_by_name(api, &destination).await?;
            info!(
                "Transferring {} from user #{} to user #{}",
                -amount, sender.id, recipient.id
            );
            api.create_transfer(sender.id, recipient.id, amount, comment)
                .await?
        }
    };

    Ok(format_transaction_report(
        &transaction,
        settings.currency_symbol(),
    ))
}
