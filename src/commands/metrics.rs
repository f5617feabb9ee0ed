//! Show user or system metrics

use crate::api::{StrichlisteApi, SystemMetrics, UserMetrics};
use crate::config::Context;
use crate::currency::format_money;
use crate::lookup::user_by_name;
use crate::utils::colors::Theme;
use anyhow::Result;
use std::fmt::Write as _;
use tracing::info;

/// Execute the metrics command
///
/// Shows the acting user's metrics, or installation-wide numbers with `system`.
///
/// # Errors
/// Returns an error if the acting user cannot be resolved or a request fails
pub async fn execute<A: StrichlisteApi + ?Sized>(
    api: &A,
    context: &Context,
    system: bool,
) -> Result<String> {
    let settings = api.get_settings().await?;
    let symbol = settings.currency_symbol();

    if system {
        info!("Fetching system metrics");
        let metrics = api.system_metrics().await?;
        return format_system_metrics(&metrics, symbol);
    }

    let user = user_by_name(api, &context.acting_user).await?;
    info!("Fetching metrics for user #{}", user.id);
    let metrics = api.user_metrics(user.id).await?;
    format_user_metrics(metrics, symbol)
}

fn format_user_metrics(mut metrics: UserMetrics, symbol: &str) -> Result<String> {
    let mut output = String::new();
    let transactions = &metrics.transactions;

    writeln!(
        &mut output,
        "{} {}",
        Theme::info("current user balance:"),
        Theme::value(&format_money(metrics.balance, symbol))
    )?;
    writeln!(
        &mut output,
        "{} {}",
        Theme::info("total number of transactions:"),
        transactions.count
    )?;
    writeln!(
        &mut output,
        "{} {}",
        Theme::info("total funds sent to other users:"),
        Theme::value(&format_money(transactions.outgoing.cashflow, symbol))
    )?;
    write!(
        &mut output,
        "{} {}",
        Theme::info("total funds received from other users:"),
        Theme::value(&format_money(transactions.incoming.cashflow, symbol))
    )?;

    if !metrics.articles.is_empty() {
        // Most bought first
        metrics.articles.sort_by(|a, b| b.count.cmp(&a.count));

        write!(&mut output, "\n{}", Theme::header("user's most popular articles:"))?;
        for entry in &metrics.articles {
            write!(
                &mut output,
                "\n\t{:3} x {} ~= {}",
                entry.count,
                entry.article.name,
                Theme::value(&format_money(entry.spent, symbol))
            )?;
        }
    }

    Ok(output)
}

fn format_system_metrics(metrics: &SystemMetrics, symbol: &str) -> Result<String> {
    let mut output = String::new();
    writeln!(
        &mut output,
        "{} {}",
        Theme::info("current system balance:"),
        Theme::value(&format_money(metrics.balance, symbol))
    )?;
    writeln!(
        &mut output,
        "{} {}",
        Theme::info("total number of transactions:"),
        metrics.transactions
    )?;
    write!(
        &mut output,
        "{} {}",
        Theme::info("total number of users:"),
        metrics.users
    )?;
    Ok(output)
}
