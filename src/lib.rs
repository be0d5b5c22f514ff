//! String analysis service
//!
//! Computes derived metrics for input strings (length, palindrome status,
//! character frequency, word count, SHA-256 identity), persists them by value
//! and serves structured and natural-language filter queries over HTTP.

pub mod analysis;
pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod processing;
pub mod state;

pub use error::{AppError, Result};
