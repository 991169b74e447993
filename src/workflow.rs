//! Session workflow state machine
//!
//! This module owns the single source of truth for a session: the current
//! phase, the active file selection, the ingested-filename set, the typed
//! question, and the latest normalized answer. All mutation goes through
//! named, guarded transitions, so inconsistent combinations (an answer
//! surviving a file-selection reset, a query against a replaced document
//! set) cannot be represented.
//!
//! Each network call splits into a synchronous `begin_*` transition that
//! runs the guards and enters the busy phase, and a `complete_*` transition
//! that applies the outcome. The async `ingest`/`ask` methods compose the
//! two around the service call; a `begin_*` rejection means the request was
//! never issued.

use crate::answer::NormalizedAnswer;
use crate::error::{AskdocError, Result};
use crate::service::{FilePayload, IngestReceipt, IngestService, QueryService, RawAnswer};
use std::collections::HashSet;
use std::fmt;

/// Position in the session workflow
///
/// Exactly one phase is active at a time and fully determines which
/// operations are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Choosing files; nothing ingested yet
    SelectingFiles,
    /// An upload request is outstanding
    Ingesting,
    /// Documents are indexed; questions may be asked
    ReadyToQuery,
    /// A question request is outstanding
    Querying,
}

impl Phase {
    /// Whether a network request is outstanding in this phase
    ///
    /// Busy phases reject every new trigger until the call resolves, so at
    /// most one request is outstanding at any time.
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Ingesting | Self::Querying)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelectingFiles => write!(f, "SELECTING"),
            Self::Ingesting => write!(f, "INGESTING"),
            Self::ReadyToQuery => write!(f, "READY"),
            Self::Querying => write!(f, "QUERYING"),
        }
    }
}

/// The session workflow controller
///
/// Drives the select → ingest → ask cycle against the injected service
/// clients. Guard failures are reported as [`AskdocError::Rejected`] with a
/// specific reason and mutate no state; service failures revert to the
/// pre-call phase preserving the user's selection and question so the
/// action can be retried without re-entry.
///
/// # Examples
///
/// ```no_run
/// use askdoc::config::ServiceConfig;
/// use askdoc::service::{create_clients, FilePayload};
/// use askdoc::workflow::Workflow;
///
/// # async fn example() -> askdoc::error::Result<()> {
/// let (ingest, query) = create_clients(&ServiceConfig::default())?;
/// let mut workflow = Workflow::new(Box::new(ingest), Box::new(query));
///
/// workflow.select_files(vec![FilePayload::new("report.pdf", vec![0x25])])?;
/// workflow.ingest().await?;
/// workflow.set_question("What is the main topic?");
/// workflow.ask().await?;
/// if let Some(answer) = workflow.answer() {
///     println!("{}", answer.text);
/// }
/// # Ok(())
/// # }
/// ```
pub struct Workflow {
    phase: Phase,
    selected_files: Vec<FilePayload>,
    ingested_filenames: HashSet<String>,
    question: String,
    answer: Option<NormalizedAnswer>,
    ingest_service: Box<dyn IngestService>,
    query_service: Box<dyn QueryService>,
}

impl Workflow {
    /// Create a workflow in the file-selection phase
    pub fn new(
        ingest_service: Box<dyn IngestService>,
        query_service: Box<dyn QueryService>,
    ) -> Self {
        Self {
            phase: Phase::SelectingFiles,
            selected_files: Vec::new(),
            ingested_filenames: HashSet::new(),
            question: String::new(),
            answer: None,
            ingest_service,
            query_service,
        }
    }

    /// Current workflow phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether a request is outstanding
    pub fn is_busy(&self) -> bool {
        self.phase.is_busy()
    }

    /// The active file selection
    pub fn selected_files(&self) -> &[FilePayload] {
        &self.selected_files
    }

    /// Filenames accepted by the last successful ingestion
    ///
    /// Non-empty exactly when the phase is `ReadyToQuery` or `Querying`.
    pub fn ingested_filenames(&self) -> &HashSet<String> {
        &self.ingested_filenames
    }

    /// The current question text
    pub fn question(&self) -> &str {
        &self.question
    }

    /// The latest normalized answer, if a query has succeeded
    pub fn answer(&self) -> Option<&NormalizedAnswer> {
        self.answer.as_ref()
    }

    /// Replace the file selection
    ///
    /// Clears the full dependent chain (ingested filenames, question,
    /// answer) so no stale citation can point at a replaced document set,
    /// and returns to the selection phase. Legal whenever no request is
    /// outstanding.
    ///
    /// # Errors
    ///
    /// Returns [`AskdocError::Rejected`] while a request is in flight
    pub fn select_files(&mut self, files: Vec<FilePayload>) -> Result<()> {
        self.reject_if_busy()?;

        tracing::debug!("Selected {} file(s)", files.len());
        self.selected_files = files;
        self.ingested_filenames.clear();
        self.question.clear();
        self.answer = None;
        self.phase = Phase::SelectingFiles;
        Ok(())
    }

    /// Update the question text
    ///
    /// A plain edit with no side effects; permitted in any phase.
    pub fn set_question(&mut self, question: impl Into<String>) {
        self.question = question.into();
    }

    /// Discard everything and return to file selection
    ///
    /// Clears selection, ingested filenames, question, and answer.
    pub fn reset(&mut self) {
        tracing::debug!("Starting over: clearing session state");
        self.selected_files.clear();
        self.ingested_filenames.clear();
        self.question.clear();
        self.answer = None;
        self.phase = Phase::SelectingFiles;
    }

    /// Submit the selected files for ingestion
    ///
    /// Issues one upload request. On success the accepted filenames are
    /// recorded and questions become legal; on failure the selection is
    /// kept and the workflow returns to file selection so the upload can be
    /// retried without re-choosing files.
    ///
    /// # Errors
    ///
    /// Returns [`AskdocError::Rejected`] if nothing is selected, documents
    /// are already ingested, or a request is in flight; propagates
    /// [`AskdocError::Service`] from the upload itself
    pub async fn ingest(&mut self) -> Result<()> {
        self.begin_ingest()?;
        let outcome = self.ingest_service.ingest(&self.selected_files).await;
        self.complete_ingest(outcome)
    }

    /// Ask the current question against the ingested documents
    ///
    /// Issues one query request and, on success, stores the normalized
    /// answer with its citation summary. On failure any partial answer is
    /// discarded and the workflow returns to the ready phase with the
    /// question preserved.
    ///
    /// # Errors
    ///
    /// Returns [`AskdocError::Rejected`] if nothing is ingested, the
    /// question is blank, or a request is in flight; propagates
    /// [`AskdocError::Service`] from the query itself
    pub async fn ask(&mut self) -> Result<()> {
        self.begin_ask()?;
        let outcome = self.query_service.ask(&self.question).await;
        self.complete_ask(outcome)
    }

    /// Guard and enter the ingesting phase
    fn begin_ingest(&mut self) -> Result<()> {
        self.reject_if_busy()?;
        if self.phase == Phase::ReadyToQuery {
            return Err(AskdocError::Rejected(
                "already ingested; start a new upload first".to_string(),
            )
            .into());
        }
        if self.selected_files.is_empty() {
            return Err(AskdocError::Rejected("no file selected".to_string()).into());
        }

        self.phase = Phase::Ingesting;
        Ok(())
    }

    /// Apply an ingestion outcome and leave the busy phase
    fn complete_ingest(&mut self, outcome: Result<IngestReceipt>) -> Result<()> {
        match outcome {
            Ok(receipt) => {
                tracing::info!("Ingestion accepted {} file(s)", receipt.count);
                self.ingested_filenames = receipt.filenames;
                self.phase = Phase::ReadyToQuery;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Ingestion failed: {}", e);
                self.phase = Phase::SelectingFiles;
                Err(e)
            }
        }
    }

    /// Guard and enter the querying phase
    fn begin_ask(&mut self) -> Result<()> {
        self.reject_if_busy()?;
        if self.ingested_filenames.is_empty() {
            return Err(AskdocError::Rejected("not yet ingested".to_string()).into());
        }
        if self.question.trim().is_empty() {
            return Err(AskdocError::Rejected("question is blank".to_string()).into());
        }

        self.phase = Phase::Querying;
        Ok(())
    }

    /// Apply a query outcome and leave the busy phase
    ///
    /// Both arms return to `ReadyToQuery`: the ingested set is untouched by
    /// a failed question.
    fn complete_ask(&mut self, outcome: Result<RawAnswer>) -> Result<()> {
        match outcome {
            Ok(raw) => {
                self.answer = Some(NormalizedAnswer::from_raw(&raw));
                self.phase = Phase::ReadyToQuery;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Query failed: {}", e);
                self.phase = Phase::ReadyToQuery;
                Err(e)
            }
        }
    }

    fn reject_if_busy(&self) -> Result<()> {
        if self.is_busy() {
            return Err(AskdocError::Rejected(
                "a request is already in flight".to_string(),
            )
            .into());
        }
        Ok(())
    }
}
