//! CLI command definitions and handlers

use clap::Subcommand;
use std::path::PathBuf;
use tracing::info;

use crate::core::client::NllbClient;

/// Commands for the NLLB client
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate a batch of texts
    Translate {
        /// Texts to translate, in order
        #[arg(conflicts_with = "file")]
        texts: Vec<String>,

        /// Read texts from a file, one per line
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Source language code (e.g. eng_Latn)
        #[arg(short, long)]
        source_lang: String,

        /// Target language code (e.g. zho_Hans)
        #[arg(short, long)]
        target_lang: String,
    },

    /// List languages supported by the service
    Languages,

    /// Check service health
    Health,
}

/// Collect the batch from arguments or from a file
fn load_texts(texts: Vec<String>, file: Option<PathBuf>) -> anyhow::Result<Vec<String>> {
    match file {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .map_err(|e| anyhow::anyhow!("failed to read {}: {}", path.display(), e))?;
            Ok(content.lines().map(str::to_string).collect())
        }
        None => Ok(texts),
    }
}

/// Handle the translate command
pub async fn handle_translate(
    client: &NllbClient,
    endpoint: Option<&str>,
    texts: Vec<String>,
    file: Option<PathBuf>,
    source_lang: String,
    target_lang: String,
) -> anyhow::Result<()> {
    let texts = load_texts(texts, file)?;

    info!("Translating {} texts: {} -> {}", texts.len(), source_lang, target_lang);
    info!("Endpoint: {}", client.resolve_endpoint(endpoint));

    let translations = client
        .translate(&texts, &source_lang, &target_lang, endpoint)
        .await?;

    println!("{}", serde_json::to_string_pretty(&translations)?);
    Ok(())
}

/// Handle the languages command
pub async fn handle_languages(client: &NllbClient, endpoint: Option<&str>) -> anyhow::Result<()> {
    match client.fetch_languages(endpoint).await? {
        Some(languages) => {
            info!("Service reports {} languages", languages.len());
            println!("{}", serde_json::to_string_pretty(&languages)?);
            Ok(())
        }
        None => anyhow::bail!(
            "NLLB service unavailable at {}",
            client.resolve_endpoint(endpoint)
        ),
    }
}

/// Handle the health command
pub async fn handle_health(client: &NllbClient, endpoint: Option<&str>) -> anyhow::Result<()> {
    match client.check_health(endpoint).await? {
        Some(status) => {
            println!("{}", serde_json::to_string_pretty(&status)?);
            Ok(())
        }
        None => anyhow::bail!(
            "NLLB service unavailable at {}",
            client.resolve_endpoint(endpoint)
        ),
    }
}
