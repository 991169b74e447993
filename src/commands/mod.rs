/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes two top-level command modules:

- `session` — Interactive select/ingest/ask loop
- `ask`     — One-shot: ingest the given files and ask a single question

Both are thin presentation layers over the library components: the service
clients, the workflow state machine, and the answer pipeline.
*/

pub mod ask;
pub mod session;

use crate::answer::NormalizedAnswer;
use colored::Colorize;

/// Print a normalized answer with its citation summary, when present
pub(crate) fn print_answer(answer: &NormalizedAnswer) {
    println!("\n{}\n", answer.text);

    let Some(summary) = &answer.source_summary else {
        return;
    };

    println!(
        "{}",
        format!("Backed by {} segment(s)", summary.total_chunks_used).cyan()
    );
    for (page, detail) in summary
        .page_references
        .iter()
        .zip(summary.segment_details.iter())
    {
        match detail.relevance {
            Some(relevance) => {
                println!(
                    "{}",
                    format!("  page {} ({}% relevant)", page, relevance).cyan()
                )
            }
            None => println!("{}", format!("  page {}", page).cyan()),
        }
    }
    if !summary.referenced_files.is_empty() {
        println!(
            "{}",
            format!("Files: {}", summary.referenced_files.join(", ")).cyan()
        );
    }
    println!();
}
