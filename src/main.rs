//! ttychat - entry point

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use ttychat::client::OpenAiClient;
use ttychat::store::ConversationStore;

/// Terminal chat client for OpenAI-compatible backends
#[derive(Parser, Debug)]
#[command(name = "ttychat")]
#[command(version)]
#[command(about = "Terminal chat client with persistent conversations")]
struct Args {
    /// Path to configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Model identifier sent with completion requests
    #[arg(short, long)]
    model: Option<String>,

    /// Directory holding the conversation files
    #[arg(long)]
    conversations_dir: Option<PathBuf>,

    /// Path for tracing output
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Display language (en, de, fr)
    #[arg(short, long)]
    language: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Precedence chain: defaults -> config file -> env vars -> CLI args.
    let config_file = ttychat::config::load_config(args.config.clone())?;
    let merged = ttychat::config::merge_config(config_file);
    let with_env = ttychat::config::apply_env_overrides(merged);
    let config = ttychat::config::apply_cli_overrides(
        with_env,
        args.model,
        args.conversations_dir,
        args.log_file,
        args.language,
    );

    ttychat::logging::init(&config.log_file_path)?;
    info!(config = ?config, "starting ttychat");

    let client = OpenAiClient::from_env(&config.model, &config.api_base)?;
    let store = ConversationStore::open(&config.conversations_dir, Box::new(client))?;

    ttychat::ui::run(store, &config)?;
    Ok(())
}
