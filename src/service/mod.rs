//! Document service module for Askdoc
//!
//! This module contains the service abstraction and the HTTP client
//! implementations for the remote ingestion and query endpoints.

pub mod ingest;
pub mod query;

pub use ingest::IngestClient;
pub use query::QueryClient;

use crate::config::ServiceConfig;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashSet;

/// An opaque document payload: binary content plus its filename
///
/// The client never inspects the bytes; parsing happens on the service side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePayload {
    /// Filename sent to the service and echoed back on success
    pub name: String,
    /// Raw file content
    pub bytes: Vec<u8>,
}

impl FilePayload {
    /// Create a payload from a name and raw bytes
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Read a payload from a file on disk
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read
    pub fn from_path(path: &std::path::Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { name, bytes })
    }
}

/// Result of a successful ingestion call
#[derive(Debug, Clone, Default)]
pub struct IngestReceipt {
    /// Accepted filenames; order not guaranteed, duplicates impossible
    pub filenames: HashSet<String>,
    /// Accepted-file count as reported by the service
    pub count: usize,
}

/// Raw result of a successful query call
///
/// The payload is uninterpreted: normalization and source parsing are the
/// answer module's job.
#[derive(Debug, Clone)]
pub struct RawAnswer {
    /// Raw answer text as produced by the model
    pub text: String,
    /// Raw source-metadata object, when the service provided one
    pub sources: Option<serde_json::Value>,
}

/// Ingestion endpoint abstraction
///
/// Implemented by [`IngestClient`] over HTTP and by fakes in tests so the
/// workflow can be driven without a network.
#[async_trait]
pub trait IngestService: Send + Sync {
    /// Submit a batch of files for indexing
    ///
    /// Issues exactly one upload request; never retries.
    ///
    /// # Errors
    ///
    /// Returns error if the request cannot complete or the service reports
    /// a failure
    async fn ingest(&self, files: &[FilePayload]) -> Result<IngestReceipt>;
}

/// Query endpoint abstraction
#[async_trait]
pub trait QueryService: Send + Sync {
    /// Ask a single question against the ingested documents
    ///
    /// Issues exactly one request; never retries.
    ///
    /// # Errors
    ///
    /// Returns error if the question is blank, the request cannot complete,
    /// or the service reports a failure
    async fn ask(&self, question: &str) -> Result<RawAnswer>;
}

/// Create both HTTP clients from service configuration
///
/// # Errors
///
/// Returns error if HTTP client initialization fails
pub fn create_clients(config: &ServiceConfig) -> Result<(IngestClient, QueryClient)> {
    Ok((IngestClient::new(config)?, QueryClient::new(config)?))
}

/// Best-effort extraction of a human-readable message from an error body
///
/// Checks the `message` field used by the service envelope and the `detail`
/// field emitted by common HTTP frameworks. Returns `None` when the body is
/// not JSON or carries neither field.
pub(crate) fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "detail"]
        .iter()
        .find_map(|key| value.get(key))
        .and_then(|m| m.as_str())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_payload_new() {
        let payload = FilePayload::new("report.pdf", vec![1, 2, 3]);
        assert_eq!(payload.name, "report.pdf");
        assert_eq!(payload.bytes, vec![1, 2, 3]);
    }

    #[test]
    fn test_file_payload_from_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("notes.pdf");
        std::fs::write(&path, b"binary content").unwrap();

        let payload = FilePayload::from_path(&path).unwrap();
        assert_eq!(payload.name, "notes.pdf");
        assert_eq!(payload.bytes, b"binary content");
    }

    #[test]
    fn test_file_payload_from_missing_path() {
        let result = FilePayload::from_path(std::path::Path::new("/nonexistent/x.pdf"));
        assert!(result.is_err());
    }

    #[test]
    fn test_extract_message_from_envelope() {
        assert_eq!(
            extract_message(r#"{"status":"error","message":"ingestion failed"}"#),
            Some("ingestion failed".to_string())
        );
    }

    #[test]
    fn test_extract_message_from_detail() {
        assert_eq!(
            extract_message(r#"{"detail":"Ingestion failed: bad file"}"#),
            Some("Ingestion failed: bad file".to_string())
        );
    }

    #[test]
    fn test_extract_message_absent() {
        assert_eq!(extract_message(r#"{"status":"error"}"#), None);
        assert_eq!(extract_message("not json"), None);
    }

    #[test]
    fn test_create_clients() {
        let config = crate::config::ServiceConfig::default();
        assert!(create_clients(&config).is_ok());
    }
}
