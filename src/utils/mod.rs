//! Utility modules for the strichliste CLI
//!
//! Shared terminal styling and report formatting.

pub mod colors;
pub mod formatting;
