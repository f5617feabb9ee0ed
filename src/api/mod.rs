//! Client facade for the strichliste REST backend
//!
//! Command handlers talk to the backend exclusively through [`StrichlisteApi`],
//! which keeps them independent of the transport. [`http::HttpClient`] is the
//! network-backed implementation used by the binary.

pub mod http;
pub mod model;

#[cfg(test)]
pub mod fake;

use async_trait::async_trait;
use thiserror::Error;

pub use model::{
    Article, ArticleCreateRequest, ArticleUpdateRequest, Settings, SystemMetrics, Transaction,
    User, UserCreateRequest, UserMetrics, UserUpdateRequest,
};

/// Maximum number of hits requested from the search endpoints
pub const SEARCH_LIMIT: usize = 5;

/// Errors surfaced by the backend or the transport underneath it
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// The backend answered with a non-success status
    #[error("{message} (HTTP {status})")]
    Status { status: u16, message: String },

    /// The response body did not have the expected shape
    #[error("unexpected response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl ApiError {
    /// Whether the backend reported the resource as missing
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Resource operations offered by the strichliste backend
///
/// Every call is a single request/response round trip. Implementations must
/// not retry.
#[async_trait]
pub trait StrichlisteApi: Send + Sync {
    async fn get_user(&self, id: u64) -> ApiResult<User>;
    async fn search_users(&self, query: &str, limit: usize) -> ApiResult<Vec<User>>;
    async fn create_user(&self, request: &UserCreateRequest) -> ApiResult<User>;
    async fn update_user(&self, id: u64, request: &UserUpdateRequest) -> ApiResult<User>;
    async fn deactivate_user(&self, id: u64) -> ApiResult<User>;

    async fn get_article(&self, id: u64) -> ApiResult<Article>;
    async fn search_articles_by_name(&self, query: &str, limit: usize)
        -> ApiResult<Vec<Article>>;
    async fn search_articles_by_barcode(
        &self,
        barcode: &str,
        limit: usize,
    ) -> ApiResult<Vec<Article>>;
    async fn create_article(&self, request: &ArticleCreateRequest) -> ApiResult<Article>;
    async fn update_article(&self, id: u64, request: &ArticleUpdateRequest)
        -> ApiResult<Article>;
    async fn deactivate_article(&self, id: u64) -> ApiResult<Article>;

    /// Change a single account's balance by `amount`
    async fn create_delta(
        &self,
        user_id: u64,
        amount: i64,
        comment: Option<&str>,
    ) -> ApiResult<Transaction>;

    /// Move funds between two accounts; `amount` is negative from the sender's view
    async fn create_transfer(
        &self,
        user_id: u64,
        recipient_id: u64,
        amount: i64,
        comment: Option<&str>,
    ) -> ApiResult<Transaction>;

    async fn create_purchase(
        &self,
        user_id: u64,
        article_id: u64,
        quantity: u32,
        comment: Option<&str>,
    ) -> ApiResult<Transaction>;

    async fn get_transaction(&self, user_id: u64, transaction_id: u64)
        -> ApiResult<Transaction>;
    async fn revert_transaction(
        &self,
        user_id: u64,
        transaction_id: u64,
    ) -> ApiResult<Transaction>;

    async fn get_settings(&self) -> ApiResult<Settings>;
    async fn user_metrics(&self, user_id: u64) -> ApiResult<UserMetrics>;
    async fn system_metrics(&self) -> ApiResult<SystemMetrics>;
}
