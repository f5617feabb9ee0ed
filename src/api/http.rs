//! Reqwest-backed implementation of the strichliste facade
//!
//! Owns transport details only: URL construction, JSON envelopes of the
//! backend, and mapping of HTTP failures onto [`ApiError`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use super::{
    ApiError, ApiResult, Article, ArticleCreateRequest, ArticleUpdateRequest, Settings,
    StrichlisteApi, SystemMetrics, Transaction, User, UserCreateRequest, UserMetrics,
    UserUpdateRequest,
};

const USER_AGENT: &str = concat!("strichliste-cli/", env!("CARGO_PKG_VERSION"));

#[derive(Deserialize)]
struct UserEnvelope {
    user: User,
}

#[derive(Deserialize)]
struct UsersEnvelope {
    #[serde(default)]
    users: Vec<User>,
}

#[derive(Deserialize)]
struct ArticleEnvelope {
    article: Article,
}

#[derive(Deserialize)]
struct ArticlesEnvelope {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Deserialize)]
struct TransactionEnvelope {
    transaction: Transaction,
}

#[derive(Deserialize)]
struct SettingsEnvelope {
    settings: Settings,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Body of `POST user/{id}/transaction`
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct TransactionBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recipient_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    article_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<&'a str>,
}

/// Facade implementation that performs HTTP requests against one backend
pub struct HttpClient {
    client: Client,
    base: Url,
}

impl HttpClient {
    /// Build a client for the given API endpoint
    ///
    /// `api_url` may point at the backend root or at its `/api` prefix.
    ///
    /// # Errors
    /// Returns an error if the URL is invalid or the reqwest client cannot be constructed
    pub fn new(api_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let base = normalize_base_url(api_url)?;
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, base })
    }

    /// Base URL every resource path is resolved against
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base
    }

    fn url(&self, path: &str) -> ApiResult<Url> {
        self.base.join(path).map_err(|e| ApiError::Transport {
            url: format!("{}{path}", self.base),
            message: e.to_string(),
        })
    }

    fn request(&self, method: Method, url: &Url) -> RequestBuilder {
        self.client
            .request(method, url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder, url: &Url) -> ApiResult<T> {
        debug!(%url, "sending request");
        let response = request.send().await.map_err(|e| map_transport_error(url, &e))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| map_transport_error(url, &e))?;
        debug!(%url, status = status.as_u16(), bytes = body.len(), "received response");

        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        serde_json::from_slice(body.as_ref()).map_err(|e| ApiError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> ApiResult<T> {
        let url = self.url(path)?;
        let request = self.request(Method::GET, &url).query(query);
        self.execute(request, &url).await
    }

    async fn post<B: Serialize + Sync, T: DeserializeOwned>(&self, path: &str, body: &B) -> ApiResult<T> {
        let url = self.url(path)?;
        let request = self.request(Method::POST, &url).json(body);
        self.execute(request, &url).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.url(path)?;
        let request = self.request(Method::DELETE, &url);
        self.execute(request, &url).await
    }

    async fn create_transaction(&self, user_id: u64, body: &TransactionBody<'_>) -> ApiResult<Transaction> {
        let envelope: TransactionEnvelope = self
            .post(&format!("user/{user_id}/transaction"), body)
            .await?;
        Ok(envelope.transaction)
    }
}

#[async_trait]
impl StrichlisteApi for HttpClient {
    async fn get_user(&self, id: u64) -> ApiResult<User> {
        let envelope: UserEnvelope = self.get(&format!("user/{id}"), &[]).await?;
        Ok(envelope.user)
    }

    async fn search_users(&self, query: &str, limit: usize) -> ApiResult<Vec<User>> {
        let envelope: UsersEnvelope = self
            .get(
                "user/search",
                &[("query", query.to_string()), ("limit", limit.to_string())],
            )
            .await?;
        Ok(envelope.users)
    }

    async fn create_user(&self, request: &UserCreateRequest) -> ApiResult<User> {
        let envelope: UserEnvelope = self.post("user", request).await?;
        Ok(envelope.user)
    }

    async fn update_user(&self, id: u64, request: &UserUpdateRequest) -> ApiResult<User> {
        let envelope: UserEnvelope = self.post(&format!("user/{id}"), request).await?;
        Ok(envelope.user)
    }

    async fn deactivate_user(&self, id: u64) -> ApiResult<User> {
        let envelope: UserEnvelope = self.delete(&format!("user/{id}")).await?;
        Ok(envelope.user)
    }

    async fn get_article(&self, id: u64) -> ApiResult<Article> {
        let envelope: ArticleEnvelope = self.get(&format!("article/{id}"), &[]).await?;
        Ok(envelope.article)
    }

    async fn search_articles_by_name(&self, query: &str, limit: usize) -> ApiResult<Vec<Article>> {
        let envelope: ArticlesEnvelope = self
            .get(
                "article/search",
                &[("query", query.to_string()), ("limit", limit.to_string())],
            )
            .await?;
        Ok(envelope.articles)
    }

    async fn search_articles_by_barcode(&self, barcode: &str, limit: usize) -> ApiResult<Vec<Article>> {
        let envelope: ArticlesEnvelope = self
            .get(
                "article/search",
                &[("barcode", barcode.to_string()), ("limit", limit.to_string())],
            )
            .await?;
        Ok(envelope.articles)
    }

    async fn create_article(&self, request: &ArticleCreateRequest) -> ApiResult<Article> {
        let envelope: ArticleEnvelope = self.post("article", request).await?;
        Ok(envelope.article)
    }

    async fn update_article(&self, id: u64, request: &ArticleUpdateRequest) -> ApiResult<Article> {
        let envelope: ArticleEnvelope = self.post(&format!("article/{id}"), request).await?;
        Ok(envelope.article)
    }

    async fn deactivate_article(&self, id: u64) -> ApiResult<Article> {
        let envelope: ArticleEnvelope = self.delete(&format!("article/{id}")).await?;
        Ok(envelope.article)
    }

    async fn create_delta(&self, user_id: u64, amount: i64, comment: Option<&str>) -> ApiResult<Transaction> {
        let body = TransactionBody {
            amount: Some(amount),
            comment,
            ..TransactionBody::default()
        };
        self.create_transaction(user_id, &body).await
    }

    async fn create_transfer(
        &self,
        user_id: u64,
        recipient_id: u64,
        amount: i64,
        comment: Option<&str>,
    ) -> ApiResult<Transaction> {
        let body = TransactionBody {
            amount: Some(amount),
            recipient_id: Some(recipient_id),
            comment,
            ..TransactionBody::default()
        };
        self.create_transaction(user_id, &body).await
    }

    async fn create_purchase(
        &self,
        user_id: u64,
        article_id: u64,
        quantity: u32,
        comment: Option<&str>,
    ) -> ApiResult<Transaction> {
        let body = TransactionBody {
            article_id: Some(article_id),
            quantity: Some(quantity),
            comment,
            ..TransactionBody::default()
        };
        self.create_transaction(user_id, &body).await
    }

    async fn get_transaction(&self, user_id: u64, transaction_id: u64) -> ApiResult<Transaction> {
        let envelope: TransactionEnvelope = self
            .get(&format!("user/{user_id}/transaction/{transaction_id}"), &[])
            .await?;
        Ok(envelope.transaction)
    }

    async fn revert_transaction(&self, user_id: u64, transaction_id: u64) -> ApiResult<Transaction> {
        let envelope: TransactionEnvelope = self
            .delete(&format!("user/{user_id}/transaction/{transaction_id}"))
            .await?;
        Ok(envelope.transaction)
    }

    async fn get_settings(&self) -> ApiResult<Settings> {
        let envelope: SettingsEnvelope = self.get("settings", &[]).await?;
        Ok(envelope.settings)
    }

    async fn user_metrics(&self, user_id: u64) -> ApiResult<UserMetrics> {
        self.get(&format!("user/{user_id}/metrics"), &[]).await
    }

    async fn system_metrics(&self) -> ApiResult<SystemMetrics> {
        self.get("metrics", &[]).await
    }
}

/// Ensure the base URL ends in `/api/` so relative resource paths resolve below it
fn normalize_base_url(api_url: &str) -> anyhow::Result<Url> {
    let mut base = Url::parse(api_url.trim())
        .map_err(|e| anyhow::anyhow!("Invalid API URL '{api_url}': {e}"))?;
    if base.cannot_be_a_base() {
        anyhow::bail!("Invalid API URL '{api_url}': not a base URL");
    }

    let trimmed = base.path().trim_end_matches('/').to_string();
    let path = if trimmed.ends_with("/api") {
        format!("{trimmed}/")
    } else {
        format!("{trimmed}/api/")
    };
    base.set_path(&path);
    Ok(base)
}

fn map_transport_error(url: &Url, error: &reqwest::Error) -> ApiError {
    let message = if error.is_timeout() {
        format!("timed out ({error})")
    } else {
        error.to_string()
    };
    ApiError::Transport {
        url: url.to_string(),
        message,
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ApiError {
    let message = serde_json::from_slice::<ErrorEnvelope>(body).map_or_else(
        |_| {
            let preview = body_preview(body);
            if preview.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                preview
            }
        },
        |envelope| envelope.error.message,
    );
    ApiError::Status {
        status: status.as_u16(),
        message,
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
