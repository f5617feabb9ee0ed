//! Show the backend's settings

use crate::api::model::{AmountSettings, Limit};
use crate::api::StrichlisteApi;
use crate::currency::format_money;
use crate::utils::colors::Theme;
use anyhow::Result;
use std::fmt::Write as _;

fn format_limit(limit: Limit, symbol: &str) -> String {
    format!(
        "[{}, {}]",
        format_money(limit.lower, symbol),
        format_money(limit.upper, symbol)
    )
}

fn format_amounts(label: &str, amounts: &AmountSettings, symbol: &str) -> String {
    let steps: Vec<String> = amounts
        .preset_amounts
        .iter()
        .map(|step| format_money(*step, symbol))
        .collect();
    format!(
        "  {} {} (custom: {}) (steps: [{}])",
        Theme::info(label),
        Theme::flag(amounts.is_enabled),
        Theme::flag(amounts.allow_custom_amount),
        steps.join(", ")
    )
}

/// Execute the settings command
///
/// # Errors
/// Returns an error if the settings cannot be fetched
pub async fn execute<A: StrichlisteApi + ?Sized>(api: &A) -> Result<String> {
    let settings = api.get_settings().await?;
    let symbol = settings.currency_symbol();
    let payment = &settings.payment;

    let mut output = String::new();
    writeln!(
        &mut output,
        "{} {}",
        Theme::info("currency:"),
        settings.i18n.currency.name
    )?;
    writeln!(
        &mut output,
        "{} {}",
        Theme::info("account balance limits:"),
        Theme::value(&format_limit(settings.account.limit, symbol))
    )?;
    writeln!(
        &mut output,
        "{} {}",
        Theme::info("transaction size limits:"),
        Theme::value(&format_limit(payment.limit, symbol))
    )?;

    if settings.paypal.is_enabled {
        writeln!(
            &mut output,
            "{} {} ({:02}% fee)",
            Theme::info("paypal:"),
            settings.paypal.recipient,
            settings.paypal.percent_fee
        )?;
    }

    writeln!(&mut output, "{}", Theme::header("payment features:"))?;
    writeln!(
        &mut output,
        "  {} {}",
        Theme::info("user-to-user transfers:"),
        Theme::flag(payment.transfer_funds.is_enabled)
    )?;
    writeln!(
        &mut output,
        "  {} {} (within {})",
        Theme::info("transaction undoing:"),
        Theme::flag(payment.reverse.is_enabled),
        payment.reverse.timeout
    )?;
    writeln!(&mut output, "{}", format_amounts("deposits:", &payment.deposit, symbol))?;
    write!(&mut output, "{}", format_amounts("withdrawals:", &payment.withdraw, symbol))?;

    Ok(output)
}
