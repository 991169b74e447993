//! Askdoc - document question-answering client CLI
//!
//! Main entry point for the Askdoc application.

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use askdoc::cli::{Cli, Commands};
use askdoc::commands;
use askdoc::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Session => {
            tracing::info!("Starting interactive session");
            commands::session::run_session(config).await?;
            Ok(())
        }
        Commands::Ask { files, question } => {
            tracing::info!("Starting one-shot ask");
            commands::ask::run_ask(config, files, question).await?;
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "askdoc=debug" } else { "askdoc=info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
