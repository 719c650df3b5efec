//! Main entry point for the NLLB client CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nllb_client::cli::commands::{self, Commands};
use nllb_client::{NllbClient, NllbConfig};

/// NLLB Client - talk to a remote NLLB translation service
#[derive(Parser, Debug)]
#[command(name = "nllb-client", version, about, long_about = None)]
struct Args {
    /// Configuration file (JSON or YAML); defaults to NLLB_* env vars
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Endpoint for this invocation, overriding the configured default
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("nllb_client={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let client = match &args.config {
        Some(path) => NllbClient::new(NllbConfig::from_file(path)?)?,
        None => NllbClient::from_env()?,
    };
    let endpoint = args.endpoint.as_deref();

    match args.command {
        Commands::Translate {
            texts,
            file,
            source_lang,
            target_lang,
        } => {
            commands::handle_translate(&client, endpoint, texts, file, source_lang, target_lang).await?;
        }
        Commands::Languages => {
            commands::handle_languages(&client, endpoint).await?;
        }
        Commands::Health => {
            commands::handle_health(&client, endpoint).await?;
        }
    }

    Ok(())
}
