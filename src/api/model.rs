//! Records exchanged with the strichliste backend
//!
//! Field names follow the backend's camelCase JSON. Amounts are always
//! integer minor units.

use serde::{Deserialize, Serialize};

/// A user account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Signed balance in minor units
    pub balance: i64,
    pub is_active: bool,
}

/// A catalog item that can be purchased
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: u64,
    pub name: String,
    /// Price in minor units
    #[serde(rename = "amount")]
    pub value: i64,
    #[serde(default)]
    pub barcode: Option<String>,
    pub is_active: bool,
    #[serde(default)]
    pub usage_count: u64,
}

/// A booked transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: u64,
    /// Signed amount in minor units, from the issuer's perspective
    pub amount: i64,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(rename = "user")]
    pub issuer: User,
    #[serde(default)]
    pub recipient: Option<User>,
    #[serde(default)]
    pub article: Option<Article>,
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(rename = "isDeleted", default)]
    pub is_reversed: bool,
    #[serde(rename = "isDeletable", default)]
    pub is_reversible: bool,
}

/// Payload for opening a user account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserCreateRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Payload for changing a user's metadata; absent fields stay unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserUpdateRequest {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

/// Payload for creating an article
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleCreateRequest {
    pub name: String,
    #[serde(rename = "amount")]
    pub value: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
}

/// Payload for updating an article
///
/// The backend rejects updates that omit name or price, so both are always sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleUpdateRequest {
    pub name: String,
    #[serde(rename = "amount")]
    pub value: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
}

/// Currency labels
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct I18n {
    #[serde(default)]
    pub currency: Currency,
}

/// Inclusive lower/upper bound in minor units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limit {
    #[serde(default)]
    pub lower: i64,
    #[serde(default)]
    pub upper: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSettings {
    #[serde(rename = "boundary", default)]
    pub limit: Limit,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toggle {
    #[serde(rename = "enabled", default)]
    pub is_enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReverseSettings {
    #[serde(rename = "enabled", default)]
    pub is_enabled: bool,
    /// Window during which a transaction may be reverted, as the backend phrases it
    #[serde(default)]
    pub timeout: String,
}

/// Deposit or withdrawal configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountSettings {
    #[serde(rename = "enabled", default)]
    pub is_enabled: bool,
    #[serde(rename = "custom", default)]
    pub allow_custom_amount: bool,
    /// Preset amounts offered by the frontend, in minor units
    #[serde(rename = "steps", default)]
    pub preset_amounts: Vec<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSettings {
    #[serde(rename = "boundary", default)]
    pub limit: Limit,
    #[serde(rename = "undo", default)]
    pub reverse: ReverseSettings,
    #[serde(rename = "transactions", default)]
    pub transfer_funds: Toggle,
    #[serde(default)]
    pub deposit: AmountSettings,
    #[serde(rename = "dispense", default)]
    pub withdraw: AmountSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaypalSettings {
    #[serde(rename = "enabled", default)]
    pub is_enabled: bool,
    #[serde(default)]
    pub recipient: String,
    /// Fee charged on top of deposits, in percent
    #[serde(rename = "fee", default)]
    pub percent_fee: u32,
}

/// Server-wide configuration snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub i18n: I18n,
    #[serde(default)]
    pub account: AccountSettings,
    #[serde(default)]
    pub payment: PaymentSettings,
    #[serde(default)]
    pub paypal: PaypalSettings,
}

impl Settings {
    /// Currency symbol appended to every displayed amount
    #[must_use]
    pub fn currency_symbol(&self) -> &str {
        &self.i18n.currency.symbol
    }
}

/// Count and sum of one direction of cashflow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flow {
    #[serde(default)]
    pub count: u64,
    #[serde(rename = "amount", default)]
    pub cashflow: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionMetrics {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub outgoing: Flow,
    #[serde(default)]
    pub incoming: Flow,
}

/// Purchases of one article by one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleMetrics {
    pub article: Article,
    pub count: u64,
    #[serde(rename = "amount", default)]
    pub spent: i64,
}

/// Aggregates for a single user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMetrics {
    pub balance: i64,
    #[serde(default)]
    pub transactions: TransactionMetrics,
    #[serde(default)]
    pub articles: Vec<ArticleMetrics>,
}

/// Aggregates across the whole installation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemMetrics {
    pub balance: i64,
    #[serde(rename = "transactionCount", default)]
    pub transactions: u64,
    #[serde(rename = "userCount", default)]
    pub users: u64,
}
