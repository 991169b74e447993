//! Query endpoint client
//!
//! Sends a question to the service's `/ask` endpoint and returns the raw
//! answer text plus the uninterpreted source-metadata payload. The workflow
//! guard keeps questions from reaching this client before ingestion; the
//! blank-question check is re-applied here defensively.

use crate::config::ServiceConfig;
use crate::error::{AskdocError, Result};
use crate::service::{extract_message, QueryService, RawAnswer};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// HTTP client for the query endpoint
///
/// # Examples
///
/// ```no_run
/// use askdoc::config::ServiceConfig;
/// use askdoc::service::{QueryClient, QueryService};
///
/// # async fn example() -> askdoc::error::Result<()> {
/// let client = QueryClient::new(&ServiceConfig::default())?;
/// let raw = client.ask("What is the main topic?").await?;
/// println!("{}", raw.text);
/// # Ok(())
/// # }
/// ```
pub struct QueryClient {
    client: Client,
    base_url: String,
}

/// Request body for the `/ask` endpoint
#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    question: &'a str,
}

/// Response envelope from the `/ask` endpoint
#[derive(Debug, Deserialize)]
struct QueryResponse {
    status: String,
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    sources: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<String>,
}

impl QueryClient {
    /// Create a new query client
    ///
    /// # Arguments
    ///
    /// * `config` - Service configuration with base URL and timeout
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("askdoc/0.2.0")
            .build()
            .map_err(|e| AskdocError::Service(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/ask", self.base_url)
    }
}

#[async_trait]
impl QueryService for QueryClient {
    async fn ask(&self, question: &str) -> Result<RawAnswer> {
        if question.trim().is_empty() {
            return Err(AskdocError::Rejected("question is blank".to_string()).into());
        }

        let url = self.endpoint();
        tracing::debug!("Sending question to {}", url);

        let response = self
            .client
            .post(&url)
            .json(&QueryRequest { question })
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Query request failed: {}", e);
                AskdocError::Service(format!("Failed to reach document service: {}", e))
            })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            let message = extract_message(&body)
                .unwrap_or_else(|| "document service request failed".to_string());
            tracing::error!("Query returned {}: {}", status, message);
            return Err(AskdocError::Service(message).into());
        }

        let envelope: QueryResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse query response: {}", e);
            AskdocError::Service(format!("Failed to parse query response: {}", e))
        })?;

        if envelope.status != "success" {
            let message = envelope
                .message
                .unwrap_or_else(|| "document service reported a query failure".to_string());
            return Err(AskdocError::Service(message).into());
        }

        let text = envelope.answer.ok_or_else(|| {
            AskdocError::Service("Query response is missing its answer".to_string())
        })?;

        tracing::debug!(
            "Received answer ({} chars, sources: {})",
            text.len(),
            envelope.sources.is_some()
        );

        Ok(RawAnswer {
            text,
            sources: envelope.sources,
        })
    }
}
