//! GenQ CLI
//!
//! Runs the interactive session. Pass a PDF path to pre-load it on the Home
//! page; everything else happens through /commands inside the app.

use anyhow::{Context, Result};
use clap::Parser;
use genq::config::{self, Config, GeminiModel, API_KEY_VAR};
use genq::llm::{GeminiProvider, TextProvider};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "genq")]
#[command(about = "Generate study material from a PDF")]
#[command(version)]
struct Cli {
    /// PDF document to load on startup
    pdf: Option<PathBuf>,

    /// Gemini model to use (persisted to ~/.genq/config.toml)
    #[arg(short, long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load()?.unwrap_or_default();
    if let Some(name) = cli.model.as_deref() {
        let model = GeminiModel::from_name(name).with_context(|| {
            let known: Vec<&str> = GeminiModel::all().iter().map(|m| m.name()).collect();
            format!("Unknown model '{}'. Known models: {}", name, known.join(", "))
        })?;
        config.model = model;
        config.save()?;
    }

    let api_key = config::api_key_from_env().with_context(|| {
        format!(
            "{} is not set. Export your Gemini API key before running.",
            API_KEY_VAR
        )
    })?;

    let provider: Arc<dyn TextProvider> = Arc::new(GeminiProvider::new(
        api_key,
        config.model.api_id().to_string(),
    ));

    genq::app::run(provider, cli.pdf).await
}
