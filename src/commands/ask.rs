//! One-shot ask handler
//!
//! Drives the full workflow once: select the given files, ingest them, ask
//! the question, and print the normalized answer. Exits non-zero on any
//! rejection or service failure, which makes the command usable from
//! scripts.

use crate::commands::print_answer;
use crate::config::Config;
use crate::error::{AskdocError, Result};
use crate::service::{create_clients, FilePayload};
use crate::workflow::Workflow;

use std::path::PathBuf;

/// Ingest the given files and ask a single question
///
/// # Arguments
///
/// * `config` - Global configuration (consumed)
/// * `files` - Paths of the documents to upload
/// * `question` - The question to ask once ingestion succeeds
///
/// # Errors
///
/// Returns error if any file cannot be read, or if ingestion or the query
/// fails
pub async fn run_ask(config: Config, files: Vec<PathBuf>, question: String) -> Result<()> {
    tracing::info!("One-shot ask over {} file(s)", files.len());

    let mut payloads = Vec::with_capacity(files.len());
    for path in &files {
        payloads.push(FilePayload::from_path(path)?);
    }

    let (ingest, query) = create_clients(&config.service)?;
    let mut workflow = Workflow::new(Box::new(ingest), Box::new(query));

    workflow.select_files(payloads)?;
    workflow.ingest().await?;
    workflow.set_question(question);
    workflow.ask().await?;

    let answer = workflow
        .answer()
        .ok_or_else(|| AskdocError::Service("No answer was produced".to_string()))?;
    print_answer(answer);

    Ok(())
}
