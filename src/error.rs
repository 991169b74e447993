//! Error types for Askdoc
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Askdoc operations
///
/// This enum encompasses all possible errors that can occur during
/// workflow transitions, configuration loading, and service interactions.
///
/// Two variants carry the workflow's failure taxonomy: [`Rejected`] for
/// precondition failures reported synchronously with no state change, and
/// [`Service`] for ingestion/query calls that could not complete.
///
/// [`Rejected`]: AskdocError::Rejected
/// [`Service`]: AskdocError::Service
#[derive(Error, Debug)]
pub enum AskdocError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A requested workflow action's precondition failed (nothing selected,
    /// not yet ingested, blank question, request already in flight)
    #[error("Rejected: {0}")]
    Rejected(String),

    /// The ingestion or query call could not complete (network failure,
    /// non-success status, response marked as failure, malformed body)
    #[error("Service error: {0}")]
    Service(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Askdoc operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
