//! Source/destination resolution for credit and debit commands
//!
//! `credit` and `debit` address up to two accounts. Which side defaults to the
//! acting user depends on the command's role; explicit `--from`/`--to` always
//! win:
//!
//! | command            | source  | destination |
//! |--------------------|---------|-------------|
//! | credit             |         | user        |
//! | credit --from --to | from    | to          |
//! | credit --from      | from    | user        |
//! | credit --to        |         | to          |
//! | debit              | user    |             |
//! | debit --from --to  | from    | to          |
//! | debit --from       | from    |             |
//! | debit --to         | user    | to          |

use anyhow::{anyhow, Result};

/// Which side of a transaction defaults to the acting user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Adds to an account (`credit`, `deposit`)
    Credit,
    /// Deducts from an account (`debit`, `withdraw`)
    Debit,
}

/// Resolved account names; `None` means no account on that side
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Endpoints {
    pub source: Option<String>,
    pub destination: Option<String>,
}

/// What a credit/debit command will submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionPlan {
    /// Change one account's balance by `amount`
    Delta { account: String, amount: i64 },
    /// Move funds; `amount` is negative from the source's perspective
    Transfer {
        source: String,
        destination: String,
        amount: i64,
    },
}

fn non_empty(name: Option<&str>) -> Option<String> {
    name.filter(|n| !n.is_empty()).map(str::to_string)
}

/// Resolve source and destination accounts from role, acting user and overrides
#[must_use]
pub fn resolve(role: Role, acting_user: &str, from: Option<&str>, to: Option<&str>) -> Endpoints {
    let mut endpoints = Endpoints::default();

    match role {
        Role::Credit => endpoints.destination = non_empty(Some(acting_user)),
        Role::Debit => endpoints.source = non_empty(Some(acting_user)),
    }

    if let Some(from) = non_empty(from) {
        endpoints.source = Some(from);
    }
    if let Some(to) = non_empty(to) {
        endpoints.destination = Some(to);
    }

    endpoints
}

/// Validate resolved endpoints and an amount in minor units, and fix the sign
///
/// # Errors
/// Returns an error if the amount is zero or source and destination coincide
pub fn plan_transaction(role: Role, endpoints: Endpoints, amount: i64) -> Result<TransactionPlan> {
    if amount == 0 {
        return Err(anyhow!("amount must not be zero"));
    }

    if endpoints.source == endpoints.destination {
        return Err(anyhow!(
            "source and destination must be different when sending funds"
        ));
    }

    match (endpoints.source, endpoints.destination) {
        (Some(source), Some(destination)) => Ok(TransactionPlan::Transfer {
            source,
            destination,
            amount: -amount,
        }),
        (Some(account), None) | (None, Some(account)) => {
            let amount = if role == Role::Debit { -amount } else { amount };
            Ok(TransactionPlan::Delta { account, amount })
        }
        (None, None) => Err(anyhow!(
            "no account to book against; pass --user, --from or --to"
        )),
    }
}
