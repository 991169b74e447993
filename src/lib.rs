//! Askdoc - document question-answering client library
//!
//! This library provides the core functionality for the Askdoc client:
//! the session workflow state machine, the service clients, and the
//! answer-normalization pipeline.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `workflow`: The session state machine governing select/ingest/ask
//! - `service`: Document-service abstraction and HTTP client implementations
//! - `answer`: Answer text normalization and source-summary parsing
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//! - `commands`: Interactive and one-shot command handlers
//!
//! # Example
//!
//! ```no_run
//! use askdoc::config::ServiceConfig;
//! use askdoc::service::{create_clients, FilePayload};
//! use askdoc::workflow::Workflow;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let (ingest, query) = create_clients(&ServiceConfig::default())?;
//!     let mut workflow = Workflow::new(Box::new(ingest), Box::new(query));
//!
//!     workflow.select_files(vec![FilePayload::new("report.pdf", vec![0x25])])?;
//!     workflow.ingest().await?;
//!     workflow.set_question("What is the main topic?");
//!     workflow.ask().await?;
//!
//!     if let Some(answer) = workflow.answer() {
//!         println!("{}", answer.text);
//!     }
//!     Ok(())
//! }
//! ```

pub mod answer;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod service;
pub mod workflow;

// Re-export commonly used types
pub use answer::{normalize_answer, parse_source_summary, NormalizedAnswer, SourceSummary};
pub use config::Config;
pub use error::{AskdocError, Result};
pub use service::{FilePayload, IngestClient, QueryClient, RawAnswer};
pub use workflow::{Phase, Workflow};
