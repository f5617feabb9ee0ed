//! strichliste CLI library
//!
//! Command handlers, the backend facade and configuration layering, exported
//! for the binary and for tests.

#![forbid(unsafe_code)]

pub mod accounts;
pub mod api;
pub mod commands;
pub mod config;
pub mod config_file;
pub mod currency;
pub mod errors;
pub mod lookup;
pub mod utils;

// Re-export for easy access
pub use commands::*;
pub use config::*;
pub use errors::*;
