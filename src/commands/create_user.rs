//! Open a new user account

use crate::api::{StrichlisteApi, UserCreateRequest};
use crate::currency::from_display;
use crate::utils::colors::Theme;
use crate::utils::formatting::format_transaction_report;
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::fmt::Write as _;
use tracing::info;

/// Comment attached to the transaction that books an initial balance
const INITIAL_BALANCE_COMMENT: &str = "initial balance";

/// Request parameters for creating a user
pub struct CreateUserRequest<'a> {
    pub name: &'a str,
    pub email: Option<&'a str>,
    /// Starting balance as a display value; booked as a separate transaction
    pub balance: Option<Decimal>,
}

/// Execute the create user command
///
/// The backend has no notion of an opening balance, so a non-zero
/// `balance` is booked as a deposit right after the account is created.
///
/// # Errors
///
/// Returns an error if:
/// - The balance is out of range
/// - Creating the account or booking the initial balance fails
pub async fn execute<A: StrichlisteApi + ?Sized>(
    api: &A,
    request: &CreateUserRequest<'_>,
) -> Result<String> {
    let balance = request.balance.map(from_display).transpose()?.unwrap_or(0);
    let settings = if balance == 0 {
        None
    } else {
        Some(api.get_settings().await?)
    };

    info!("Creating user '{}'", request.name);
    let user = api
        .create_user(&UserCreateRequest {
            name: request.name.to_string(),
            email: request.email.filter(|e| !e.is_empty()).map(str::to_string),
        })
        .await?;

    let mut output = String::new();
    write!(
        &mut output,
        "{}",
        Theme::success(&format!("created user #{} ({})", user.id, user.name))
    )?;

    if let Some(settings) = settings {
        info!("Booking initial balance of {} for user #{}", balance, user.id);
        let transaction = api
            .create_delta(user.id, balance, Some(INITIAL_BALANCE_COMMENT))
            .await
            .with_context(|| {
                format!(
                    "created user #{} ({}), but booking the initial balance failed",
                    user.id, user.name
                )
            })?;
        write!(
            &mut output,
            "\n{}",
            format_transaction_report(&transaction, settings.currency_symbol())
        )?;
    }

    Ok(output)
}
