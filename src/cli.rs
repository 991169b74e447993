//! Command-line interface definition for Askdoc
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for the interactive session and one-shot questions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Askdoc - document question-answering client CLI
///
/// Select document files, ingest them into the remote index, then ask
/// natural-language questions and receive citation-annotated answers.
#[derive(Parser, Debug, Clone)]
#[command(name = "askdoc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the document service base URL from config
    #[arg(short, long, env = "ASKDOC_SERVICE_URL")]
    pub endpoint: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Askdoc
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive session: select, ingest, ask
    Session,

    /// Ingest files and ask a single question, then exit
    Ask {
        /// Document file to upload (repeatable)
        #[arg(short, long = "file", required = true)]
        files: Vec<PathBuf>,

        /// Question to ask once ingestion succeeds
        #[arg(short, long)]
        question: String,
    },
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
