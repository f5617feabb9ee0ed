//! Output formatting shared by several commands

use crate::api::{Article, Transaction, User};
use crate::currency::format_money;
use crate::utils::colors::Theme;
use std::fmt::Write as _;

/// `#042 name` heading used for search results
#[must_use]
pub fn record_heading(id: u64, name: &str) -> String {
    format!("#{id:03} {name}")
}

/// Human-readable listing of users
#[must_use]
pub fn format_users(users: &[User], symbol: &str) -> String {
    let mut output = String::new();
    for user in users {
        let _ = writeln!(output, "{}", Theme::header(&record_heading(user.id, &user.name)));
        let _ = writeln!(
            output,
            "\t{} {}",
            Theme::info("balance:"),
            Theme::value(&format_money(user.balance, symbol))
        );
        let _ = writeln!(output, "\t{} {}", Theme::info("active:"), Theme::flag(user.is_active));
        if let Some(email) = &user.email {
            let _ = writeln!(output, "\t{} {email}", Theme::info("email:"));
        }
    }
    output.trim_end().to_string()
}

/// Human-readable listing of articles
#[must_use]
pub fn format_articles(articles: &[Article], symbol: &str) -> String {
    let mut output = String::new();
    for article in articles {
        let _ = writeln!(output, "{}", Theme::header(&record_heading(article.id, &article.name)));
        let _ = writeln!(
            output,
            "\t{} {}",
            Theme::info("value:"),
            Theme::value(&format_money(article.value, symbol))
        );
        let _ = writeln!(output, "\t{} {}", Theme::info("active:"), Theme::flag(article.is_active));
        if let Some(barcode) = &article.barcode {
            let _ = writeln!(output, "\t{} '{barcode}'", Theme::info("barcode:"));
        }
        if article.usage_count > 0 {
            let _ = writeln!(output, "\t{} {}", Theme::info("sold:"), article.usage_count);
        }
    }
    output.trim_end().to_string()
}

/// `new balance for user #1 (alice): 3.50€`
#[must_use]
pub fn format_new_balance(user: &User, symbol: &str) -> String {
    format!(
        "new balance for user #{} ({}): {}",
        user.id,
        user.name,
        Theme::value(&format_money(user.balance, symbol))
    )
}

/// Report for a freshly booked transaction, with every touched balance
#[must_use]
pub fn format_transaction_report(transaction: &Transaction, symbol: &str) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "{}",
        Theme::success(&format!("created transaction #{}", transaction.id))
    );
    let _ = write!(output, "{}", format_new_balance(&transaction.issuer, symbol));
    if let Some(recipient) = &transaction.recipient {
        let _ = write!(output, "\n{}", format_new_balance(recipient, symbol));
    }
    output
}
