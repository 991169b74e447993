//! Interactive session handler
//!
//! Runs a readline-based loop over the workflow state machine. Lines
//! prefixed with `/` are session commands (select files, ingest, status,
//! start over); any other input is treated as a question and asked
//! immediately. Rejections and service failures are printed and the loop
//! continues, so a failed upload or query can simply be retried.

use crate::commands::print_answer;
use crate::config::Config;
use crate::error::Result;
use crate::service::{create_clients, FilePayload};
use crate::workflow::Workflow;

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when parsing session commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// Session commands entered during the interactive loop
///
/// Commands are prefixed with `/` and are case-insensitive; everything else
/// is treated as a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Replace the file selection with the given paths
    Select(Vec<PathBuf>),

    /// Upload the current selection to the indexing service
    Ingest,

    /// Display phase, selection, ingested files, and the current question
    Status,

    /// Discard everything and start a new upload
    StartOver,

    /// Display help information
    Help,

    /// Exit the interactive session
    Exit,

    /// Not a session command; treat the input as a question
    None,
}

/// Parse a user input line into a session command
///
/// # Arguments
///
/// * `input` - The trimmed user input
///
/// # Returns
///
/// Returns the parsed command, `SessionCommand::None` for plain questions,
/// or a `CommandError` for a malformed `/` command.
pub fn parse_session_command(input: &str) -> std::result::Result<SessionCommand, CommandError> {
    if !input.starts_with('/') {
        return Ok(SessionCommand::None);
    }

    let mut parts = input.split_whitespace();
    let command = parts.next().unwrap_or("").to_lowercase();
    let args: Vec<&str> = parts.collect();

    match command.as_str() {
        "/select" | "/files" => {
            if args.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "/select".to_string(),
                    usage: "/select <path> [path ...]".to_string(),
                });
            }
            Ok(SessionCommand::Select(
                args.iter().map(PathBuf::from).collect(),
            ))
        }
        "/ingest" => Ok(SessionCommand::Ingest),
        "/status" => Ok(SessionCommand::Status),
        "/new" | "/reset" => Ok(SessionCommand::StartOver),
        "/help" => Ok(SessionCommand::Help),
        "/exit" | "/quit" => Ok(SessionCommand::Exit),
        other => Err(CommandError::UnknownCommand(other.to_string())),
    }
}

/// Start the interactive session
///
/// # Arguments
///
/// * `config` - Global configuration (consumed)
///
/// # Errors
///
/// Returns error if client or readline initialization fails; workflow
/// rejections and service failures are printed, not propagated.
pub async fn run_session(config: Config) -> Result<()> {
    tracing::info!("Starting interactive session");

    let (ingest, query) = create_clients(&config.service)?;
    let mut workflow = Workflow::new(Box::new(ingest), Box::new(query));

    let mut rl = DefaultEditor::new()?;

    print_welcome_banner(&config.service.base_url);

    loop {
        let prompt = format!("[{}] > ", workflow.phase());
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                rl.add_history_entry(trimmed)?;

                let command = match parse_session_command(trimmed) {
                    Ok(command) => command,
                    Err(e) => {
                        eprintln!("{}", format!("{}", e).red());
                        continue;
                    }
                };

                match command {
                    SessionCommand::Select(paths) => {
                        handle_select(&mut workflow, &paths);
                    }
                    SessionCommand::Ingest => match workflow.ingest().await {
                        Ok(()) => {
                            let mut names: Vec<&str> = workflow
                                .ingested_filenames()
                                .iter()
                                .map(String::as_str)
                                .collect();
                            names.sort_unstable();
                            println!(
                                "{}",
                                format!("Ingested: {}", names.join(", ")).green()
                            );
                        }
                        Err(e) => eprintln!("{}", format!("{}", e).red()),
                    },
                    SessionCommand::Status => print_status(&workflow),
                    SessionCommand::StartOver => {
                        workflow.reset();
                        println!("Session cleared; select new files to begin.\n");
                    }
                    SessionCommand::Help => print_help(),
                    SessionCommand::Exit => break,
                    SessionCommand::None => {
                        workflow.set_question(trimmed);
                        match workflow.ask().await {
                            Ok(()) => {
                                if let Some(answer) = workflow.answer() {
                                    print_answer(answer);
                                }
                            }
                            Err(e) => eprintln!("{}", format!("{}", e).red()),
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                eprintln!("Readline error: {}", err);
                break;
            }
        }
    }

    Ok(())
}

/// Read the given paths and hand them to the workflow as the new selection
fn handle_select(workflow: &mut Workflow, paths: &[PathBuf]) {
    let mut payloads = Vec::with_capacity(paths.len());
    for path in paths {
        match FilePayload::from_path(path) {
            Ok(payload) => payloads.push(payload),
            Err(e) => {
                eprintln!("{}", format!("Cannot read {}: {}", path.display(), e).red());
                return;
            }
        }
    }

    let names: Vec<String> = payloads.iter().map(|p| p.name.clone()).collect();
    match workflow.select_files(payloads) {
        Ok(()) => println!(
            "{}",
            format!("Selected: {} — run /ingest to index", names.join(", ")).green()
        ),
        Err(e) => eprintln!("{}", format!("{}", e).red()),
    }
}

fn print_welcome_banner(base_url: &str) {
    println!("{}", "askdoc — document question answering".bold());
    println!("Service: {}", base_url);
    println!("Type '/help' for commands, or '/select <path>' to begin.\n");
}

fn print_status(workflow: &Workflow) {
    println!("Phase: {}", workflow.phase());
    let selected: Vec<&str> = workflow
        .selected_files()
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    println!("Selected: {}", join_or_dash(&selected));
    let mut ingested: Vec<&str> = workflow
        .ingested_filenames()
        .iter()
        .map(String::as_str)
        .collect();
    ingested.sort_unstable();
    println!("Ingested: {}", join_or_dash(&ingested));
    let question = workflow.question();
    println!(
        "Question: {}\n",
        if question.is_empty() { "-" } else { question }
    );
}

fn join_or_dash(items: &[&str]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

fn print_help() {
    println!("Available commands:");
    println!("  /select <path> [path ...]  Choose files to upload (replaces selection)");
    println!("  /ingest                    Upload the selection to the indexing service");
    println!("  /status                    Show phase, selection, ingested files, question");
    println!("  /new                       Discard everything and start over");
    println!("  /help                      Show this help");
    println!("  /exit                      Leave the session");
    println!();
    println!("Any other input is asked as a question against the ingested documents.\n");
}
