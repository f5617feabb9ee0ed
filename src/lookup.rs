//! Id-or-name lookup of users and articles
//!
//! A query that parses as an integer is tried as an id first. Anything else,
//! or an id that does not exist, falls back to the search endpoints.

use crate::api::{Article, StrichlisteApi, User, SEARCH_LIMIT};
use anyhow::{anyhow, Result};
use tracing::debug;

/// Find users matching an id or a name fragment
///
/// # Errors
/// Returns an error if a backend request fails for a reason other than "not found"
pub async fn find_users<A: StrichlisteApi + ?Sized>(api: &A, query: &str) -> Result<Vec<User>> {
    if let Ok(id) = query.parse::<u64>() {
        match api.get_user(id).await {
            Ok(user) => return Ok(vec![user]),
            Err(e) if e.is_not_found() => debug!("No user with id {id}, searching by name"),
            Err(e) => return Err(e.into()),
        }
    }

    Ok(api.search_users(query, SEARCH_LIMIT).await?)
}

/// Find articles matching an id, a name fragment, or a barcode
///
/// # Errors
/// Returns an error if a backend request fails for a reason other than "not found"
pub async fn find_articles<A: StrichlisteApi + ?Sized>(api: &A, query: &str) -> Result<Vec<Article>> {
    if let Ok(id) = query.parse::<u64>() {
        match api.get_article(id).await {
            Ok(article) => return Ok(vec![article]),
            Err(e) if e.is_not_found() => debug!("No article with id {id}, searching by name"),
            Err(e) => return Err(e.into()),
        }
    }

    let by_name = api.search_articles_by_name(query, SEARCH_LIMIT).await?;
    if !by_name.is_empty() {
        return Ok(by_name);
    }

    debug!("No article named like '{query}', searching by barcode");
    Ok(api.search_articles_by_barcode(query, SEARCH_LIMIT).await?)
}

/// Resolve exactly one user by id or exact name
///
/// # Errors
/// Returns an error if no user matches or a backend request fails
pub async fn user_by_name<A: StrichlisteApi + ?Sized>(api: &A, name: &str) -> Result<User> {
    if name.is_empty() {
        return Err(anyhow!(
            "No user given. Pass --user <name> or set 'user' in the config file"
        ));
    }

    let candidates = find_users(api, name).await?;
    let by_id = name.parse::<u64>().ok();

    candidates
        .into_iter()
        .find(|user| user.name == name || Some(user.id) == by_id)
        .ok_or_else(|| anyhow!("User '{name}' not found"))
}
