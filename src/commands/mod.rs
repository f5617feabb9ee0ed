//! Command implementations for the strichliste CLI
//!
//! Each command lives in its own file and returns its report as a `String`;
//! the binary decides how to print it.

pub mod buy;
pub mod completions;
pub mod create_article;
pub mod create_user;
pub mod delete_article;
pub mod delete_user;
pub mod metrics;
pub mod revert;
pub mod settings;
pub mod show_article;
pub mod show_config;
pub mod show_user;
pub mod transact;
pub mod update_article;
pub mod update_user;

// Re-export command execution functions for easy access
pub use buy::execute as execute_buy;
pub use completions::execute as execute_completions;
pub use create_article::execute as execute_create_article;
pub use create_user::execute as execute_create_user;
pub use delete_article::execute as execute_delete_article;
pub use delete_user::execute as execute_delete_user;
pub use metrics::execute as execute_metrics;
pub use revert::execute as execute_revert;
pub use settings::execute as execute_settings;
pub use show_article::execute as execute_show_article;
pub use show_config::execute as execute_show_config;
pub use show_user::execute as execute_show_user;
pub use transact::execute as execute_transact;
pub use update_article::execute as execute_update_article;
pub use update_user::execute as execute_update_user;
