//! Deterministic in-memory backend for command tests
//!
//! Behaves like a tiny strichliste server and records every mutating call so
//! tests can assert on exactly what a handler submitted.

use std::sync::Mutex;

use async_trait::async_trait;

use super::model::{ArticleMetrics, Currency, Flow, I18n, TransactionMetrics};
use super::{
    ApiError, ApiResult, Article, ArticleCreateRequest, ArticleUpdateRequest, Settings,
    StrichlisteApi, SystemMetrics, Transaction, User, UserCreateRequest, UserMetrics,
    UserUpdateRequest,
};

/// A mutating request received by the fake
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CreateUser(UserCreateRequest),
    UpdateUser(u64, UserUpdateRequest),
    DeactivateUser(u64),
    CreateArticle(ArticleCreateRequest),
    UpdateArticle(u64, ArticleUpdateRequest),
    DeactivateArticle(u64),
    Delta {
        user_id: u64,
        amount: i64,
        comment: Option<String>,
    },
    Transfer {
        user_id: u64,
        recipient_id: u64,
        amount: i64,
        comment: Option<String>,
    },
    Purchase {
        user_id: u64,
        article_id: u64,
        quantity: u32,
        comment: Option<String>,
    },
    Revert {
        user_id: u64,
        transaction_id: u64,
    },
}

#[derive(Debug, Default)]
struct State {
    users: Vec<User>,
    articles: Vec<Article>,
    transactions: Vec<Transaction>,
    purchases: Vec<ArticleMetrics>,
    calls: Vec<Call>,
    requests: usize,
}

/// In-memory stand-in for the strichliste backend
#[derive(Debug)]
pub struct FakeApi {
    state: Mutex<State>,
    settings: Settings,
    /// When set, deactivate and revert calls succeed without changing anything
    inert_mutations: bool,
    /// When set, reading the settings fails with a transport error
    settings_unavailable: bool,
    /// When set, delta transactions are rejected by the backend
    reject_deltas: bool,
}

impl FakeApi {
    pub fn new() -> Self {
        let settings = Settings {
            i18n: I18n {
                currency: Currency {
                    name: "Euro".to_string(),
                    symbol: "€".to_string(),
                },
            },
            ..Settings::default()
        };
        Self {
            state: Mutex::new(State::default()),
            settings,
            inert_mutations: false,
            settings_unavailable: false,
            reject_deltas: false,
        }
    }

    pub fn with_user(self, id: u64, name: &str, balance: i64) -> Self {
        self.state.lock().unwrap().users.push(User {
            id,
            name: name.to_string(),
            email: None,
            balance,
            is_active: true,
        });
        self
    }

    pub fn with_article(self, id: u64, name: &str, value: i64, barcode: Option<&str>) -> Self {
        self.state.lock().unwrap().articles.push(Article {
            id,
            name: name.to_string(),
            value,
            barcode: barcode.map(str::to_string),
            is_active: true,
            usage_count: 0,
        });
        self
    }

    pub fn with_transaction(self, transaction: Transaction) -> Self {
        self.state.lock().unwrap().transactions.push(transaction);
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_inert_mutations(mut self) -> Self {
        self.inert_mutations = true;
        self
    }

    pub fn with_settings_unavailable(mut self) -> Self {
        self.settings_unavailable = true;
        self
    }

    pub fn with_rejected_deltas(mut self) -> Self {
        self.reject_deltas = true;
        self
    }

    /// Mark an existing user or article as already disabled
    pub fn disable_user(self, id: u64) -> Self {
        if let Some(user) = self.state.lock().unwrap().users.iter_mut().find(|u| u.id == id) {
            user.is_active = false;
        }
        self
    }

    pub fn disable_article(self, id: u64) -> Self {
        if let Some(article) = self
            .state
            .lock()
            .unwrap()
            .articles
            .iter_mut()
            .find(|a| a.id == id)
        {
            article.is_active = false;
        }
        self
    }

    /// Mutating calls received so far, in order
    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Number of requests of any kind received so far
    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests
    }

    pub fn user(&self, id: u64) -> Option<User> {
        self.state.lock().unwrap().users.iter().find(|u| u.id == id).cloned()
    }

    pub fn article(&self, id: u64) -> Option<Article> {
        self.state
            .lock()
            .unwrap()
            .articles
            .iter()
            .find(|a| a.id == id)
            .cloned()
    }

    fn begin(&self) -> std::sync::MutexGuard<'_, State> {
        let mut state = self.state.lock().unwrap();
        state.requests += 1;
        state
    }
}

impl Default for FakeApi {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(kind: &str, id: u64) -> ApiError {
    ApiError::Status {
        status: 404,
        message: format!("{kind} '{id}' not found"),
    }
}

fn find_user(state: &State, id: u64) -> ApiResult<User> {
    state
        .users
        .iter()
        .find(|u| u.id == id)
        .cloned()
        .ok_or_else(|| not_found("User", id))
}

fn adjust_balance(state: &mut State, id: u64, delta: i64) -> ApiResult<User> {
    let user = state
        .users
        .iter_mut()
        .find(|u| u.id == id)
        .ok_or_else(|| not_found("User", id))?;
    user.balance += delta;
    Ok(user.clone())
}

fn book(state: &mut State, transaction: Transaction) -> Transaction {
    state.transactions.push(transaction.clone());
    transaction
}

fn next_transaction_id(state: &State) -> u64 {
    state.transactions.iter().map(|t| t.id).max().unwrap_or(0) + 1
}

#[async_trait]
impl StrichlisteApi for FakeApi {
    async fn get_user(&self, id: u64) -> ApiResult<User> {
        find_user(&self.begin(), id)
    }

    async fn search_users(&self, query: &str, limit: usize) -> ApiResult<Vec<User>> {
        let needle = query.to_lowercase();
        Ok(self
            .begin()
            .users
            .iter()
            .filter(|u| u.name.to_lowercase().contains(&needle))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn create_user(&self, request: &UserCreateRequest) -> ApiResult<User> {
        let mut state = self.begin();
        state.calls.push(Call::CreateUser(request.clone()));
        let user = User {
            id: state.users.iter().map(|u| u.id).max().unwrap_or(0) + 1,
            name: request.name.clone(),
            email: request.email.clone(),
            balance: 0,
            is_active: true,
        };
        state.users.push(user.clone());
        Ok(user)
    }

    async fn update_user(&self, id: u64, request: &UserUpdateRequest) -> ApiResult<User> {
        let mut state = self.begin();
        state.calls.push(Call::UpdateUser(id, request.clone()));
        let user = state
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| not_found("User", id))?;
        if let Some(name) = &request.name {
            user.name.clone_from(name);
        }
        if let Some(email) = &request.email {
            user.email = Some(email.clone());
        }
        Ok(user.clone())
    }

    async fn deactivate_user(&self, id: u64) -> ApiResult<User> {
        let inert = self.inert_mutations;
        let mut state = self.begin();
        state.calls.push(Call::DeactivateUser(id));
        let user = state
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| not_found("User", id))?;
        if !inert {
            user.is_active = false;
        }
        Ok(user.clone())
    }

    async fn get_article(&self, id: u64) -> ApiResult<Article> {
        self.begin()
            .articles
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| not_found("Article", id))
    }

    async fn search_articles_by_name(&self, query: &str, limit: usize) -> ApiResult<Vec<Article>> {
        let needle = query.to_lowercase();
        Ok(self
            .begin()
            .articles
            .iter()
            .filter(|a| a.name.to_lowercase().contains(&needle))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn search_articles_by_barcode(&self, barcode: &str, limit: usize) -> ApiResult<Vec<Article>> {
        Ok(self
            .begin()
            .articles
            .iter()
            .filter(|a| a.barcode.as_deref() == Some(barcode))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn create_article(&self, request: &ArticleCreateRequest) -> ApiResult<Article> {
        let mut state = self.begin();
        state.calls.push(Call::CreateArticle(request.clone()));
        let article = Article {
            id: state.articles.iter().map(|a| a.id).max().unwrap_or(0) + 1,
            name: request.name.clone(),
            value: request.value,
            barcode: request.barcode.clone(),
            is_active: true,
            usage_count: 0,
        };
        state.articles.push(article.clone());
        Ok(article)
    }

    async fn update_article(&self, id: u64, request: &ArticleUpdateRequest) -> ApiResult<Article> {
        let mut state = self.begin();
        state.calls.push(Call::UpdateArticle(id, request.clone()));
        let article = state
            .articles
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| not_found("Article", id))?;
        article.name.clone_from(&request.name);
        article.value = request.value;
        if request.barcode.is_some() {
            article.barcode.clone_from(&request.barcode);
        }
        Ok(article.clone())
    }

    async fn deactivate_article(&self, id: u64) -> ApiResult<Article> {
        let inert = self.inert_mutations;
        let mut state = self.begin();
        state.calls.push(Call::DeactivateArticle(id));
        let article = state
            .articles
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| not_found("Article", id))?;
        if !inert {
            article.is_active = false;
        }
        Ok(article.clone())
    }

    async fn create_delta(&self, user_id: u64, amount: i64, comment: Option<&str>) -> ApiResult<Transaction> {
        let mut state = self.begin();
        state.calls.push(Call::Delta {
            user_id,
            amount,
            comment: comment.map(str::to_string),
        });
        if self.reject_deltas {
            return Err(ApiError::Status {
                status: 400,
                message: "Transaction rejected".to_string(),
            });
        }
        let issuer = adjust_balance(&mut state, user_id, amount)?;
        let transaction = Transaction {
            id: next_transaction_id(&state),
            amount,
            comment: comment.map(str::to_string),
            issuer,
            recipient: None,
            article: None,
            quantity: None,
            is_reversed: false,
            is_reversible: true,
        };
        Ok(book(&mut state, transaction))
    }

    async fn create_transfer(
        &self,
        user_id: u64,
        recipient_id: u64,
        amount: i64,
        comment: Option<&str>,
    ) -> ApiResult<Transaction> {
        let mut state = self.begin();
        state.calls.push(Call::Transfer {
            user_id,
            recipient_id,
            amount,
            comment: comment.map(str::to_string),
        });
        find_user(&state, recipient_id)?;
        let issuer = adjust_balance(&mut state, user_id, amount)?;
        let recipient = adjust_balance(&mut state, recipient_id, -amount)?;
        let transaction = Transaction {
            id: next_transaction_id(&state),
            amount,
            comment: comment.map(str::to_string),
            issuer,
            recipient: Some(recipient),
            article: None,
            quantity: None,
            is_reversed: false,
            is_reversible: true,
        };
        Ok(book(&mut state, transaction))
    }

    async fn create_purchase(
        &self,
        user_id: u64,
        article_id: u64,
        quantity: u32,
        comment: Option<&str>,
    ) -> ApiResult<Transaction> {
        let mut state = self.begin();
        state.calls.push(Call::Purchase {
            user_id,
            article_id,
            quantity,
            comment: comment.map(str::to_string),
        });
        let article = state
            .articles
            .iter()
            .find(|a| a.id == article_id)
            .cloned()
            .ok_or_else(|| not_found("Article", article_id))?;
        let amount = -article.value * i64::from(quantity);
        let issuer = adjust_balance(&mut state, user_id, amount)?;
        state.purchases.push(ArticleMetrics {
            article: article.clone(),
            count: u64::from(quantity),
            spent: -amount,
        });
        let transaction = Transaction {
            id: next_transaction_id(&state),
            amount,
            comment: comment.map(str::to_string),
            issuer,
            recipient: None,
            article: Some(article),
            quantity: Some(quantity),
            is_reversed: false,
            is_reversible: true,
        };
        Ok(book(&mut state, transaction))
    }

    async fn get_transaction(&self, _user_id: u64, transaction_id: u64) -> ApiResult<Transaction> {
        self.begin()
            .transactions
            .iter()
            .find(|t| t.id == transaction_id)
            .cloned()
            .ok_or_else(|| not_found("Transaction", transaction_id))
    }

    async fn revert_transaction(&self, user_id: u64, transaction_id: u64) -> ApiResult<Transaction> {
        let inert = self.inert_mutations;
        let mut state = self.begin();
        state.calls.push(Call::Revert {
            user_id,
            transaction_id,
        });
        let transaction = state
            .transactions
            .iter_mut()
            .find(|t| t.id == transaction_id)
            .ok_or_else(|| not_found("Transaction", transaction_id))?;
        if !inert {
            transaction.is_reversed = true;
            transaction.is_reversible = false;
        }
        Ok(transaction.clone())
    }

    async fn get_settings(&self) -> ApiResult<Settings> {
        drop(self.begin());
        if self.settings_unavailable {
            return Err(ApiError::Transport {
                url: "settings".to_string(),
                message: "timed out".to_string(),
            });
        }
        Ok(self.settings.clone())
    }

    async fn user_metrics(&self, user_id: u64) -> ApiResult<UserMetrics> {
        let state = self.begin();
        let user = find_user(&state, user_id)?;
        let mine: Vec<&Transaction> = state
            .transactions
            .iter()
            .filter(|t| t.issuer.id == user_id || t.recipient.as_ref().map(|r| r.id) == Some(user_id))
            .collect();
        let outgoing: Vec<i64> = mine
            .iter()
            .filter(|t| t.issuer.id == user_id && t.recipient.is_some())
            .map(|t| -t.amount)
            .collect();
        let incoming: Vec<i64> = mine
            .iter()
            .filter(|t| t.recipient.as_ref().map(|r| r.id) == Some(user_id))
            .map(|t| -t.amount)
            .collect();
        Ok(UserMetrics {
            balance: user.balance,
            transactions: TransactionMetrics {
                count: mine.len() as u64,
                outgoing: Flow {
                    count: outgoing.len() as u64,
                    cashflow: outgoing.iter().sum(),
                },
                incoming: Flow {
                    count: incoming.len() as u64,
                    cashflow: incoming.iter().sum(),
                },
            },
            articles: state.purchases.clone(),
        })
    }

    async fn system_metrics(&self) -> ApiResult<SystemMetrics> {
        let state = self.begin();
        Ok(SystemMetrics {
            balance: state.users.iter().map(|u| u.balance).sum(),
            transactions: state.transactions.len() as u64,
            users: state.users.len() as u64,
        })
    }
}
