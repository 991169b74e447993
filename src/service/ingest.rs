//! Ingestion endpoint client
//!
//! Uploads a batch of document files to the service's `/ingest` endpoint as
//! one multipart request and reports the accepted filenames. Failures are
//! surfaced immediately with the service's own message when the response
//! body carries one; the client never retries.

use crate::config::ServiceConfig;
use crate::error::{AskdocError, Result};
use crate::service::{extract_message, FilePayload, IngestReceipt, IngestService};

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// HTTP client for the ingestion endpoint
///
/// # Examples
///
/// ```no_run
/// use askdoc::config::ServiceConfig;
/// use askdoc::service::{FilePayload, IngestClient, IngestService};
///
/// # async fn example() -> askdoc::error::Result<()> {
/// let client = IngestClient::new(&ServiceConfig::default())?;
/// let files = vec![FilePayload::new("report.pdf", vec![0x25, 0x50])];
/// let receipt = client.ingest(&files).await?;
/// assert!(receipt.filenames.contains("report.pdf"));
/// # Ok(())
/// # }
/// ```
pub struct IngestClient {
    client: Client,
    base_url: String,
}

/// Response envelope from the `/ingest` endpoint
#[derive(Debug, Deserialize)]
struct IngestResponse {
    status: String,
    #[serde(default)]
    data: Option<IngestData>,
    #[serde(default)]
    message: Option<String>,
}

/// Success payload: accepted-file count and filename list
#[derive(Debug, Deserialize)]
struct IngestData {
    #[serde(default)]
    count: usize,
    filenames: Vec<String>,
}

impl IngestClient {
    /// Create a new ingestion client
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
        format!("{}/ingest", self.base_url)
    }
}

#[async_trait]
impl IngestService for IngestClient {
    async fn ingest(&self, files: &[FilePayload]) -> Result<IngestReceipt> {
        if files.is_empty() {
            return Err(AskdocError::Rejected("no file selected".to_string()).into());
        }

        let mut form = Form::new();
        for file in files {
            form = form.part(
                "files",
                Part::bytes(file.bytes.clone()).file_name(file.name.clone()),
            );
        }

        let url = self.endpoint();
        tracing::debug!("Uploading {} file(s) to {}", files.len(), url);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Ingestion request failed: {}", e);
                AskdocError::Service(format!("Failed to reach document service: {}", e))
            })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            let message = extract_message(&body)
                .unwrap_or_else(|| "document service request failed".to_string());
            tracing::error!("Ingestion returned {}: {}", status, message);
            return Err(AskdocError::Service(message).into());
        }

        let envelope: IngestResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse ingestion response: {}", e);
            AskdocError::Service(format!("Failed to parse ingestion response: {}", e))
        })?;

        if envelope.status != "success" {
            let message = envelope
                .message
                .unwrap_or_else(|| "document service reported an ingestion failure".to_string());
            return Err(AskdocError::Service(message).into());
        }

        let data = envelope.data.ok_or_else(|| {
            AskdocError::Service("Ingestion response is missing its payload".to_string())
        })?;

        let receipt = IngestReceipt {
            filenames: data.filenames.into_iter().collect(),
            count: data.count,
        };

        tracing::info!(
            "Ingested {} file(s): {:?}",
            receipt.count,
            receipt.filenames
        );
        Ok(receipt)
    }
}
