use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use deck_quiz::{Quiz, config, logging};
use tracing::info;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Presentation files (.pptx or .ppt) to start with
    files: Vec<PathBuf>,

    /// TOML settings file (defaults to ./deck-quiz.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Model identifier to request questions from
    #[arg(short, long)]
    model: Option<String>,

    /// Where to write the log
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut settings =
        config::load_settings(args.config.as_deref()).context("failed to load settings")?;
    if let Some(model) = args.model {
        settings.model = model;
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = log_file;
    }

    logging::init(&settings.log_file, &settings.log_level)?;
    info!(model = %settings.model, endpoint = %settings.api_url, "starting deck-quiz");
    if settings.api_key.is_none() {
        info!("no API key configured; requests are sent unauthenticated");
    }

    let mut quiz = Quiz::from_settings(&settings)?;
    for path in &args.files {
        quiz.add_path(path);
    }

    quiz.run().await.context("quiz terminated with an error")
}
