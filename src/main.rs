use anyhow::{Context, Result};
use clap::Parser;
use offcloud::config::{default_config_path, load_config};
use offcloud::OffcloudClient;
use tracing::debug;

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Install color-eyre for better error messages
    color_eyre::install().ok(); // Ignore error if already installed

    // Parse CLI arguments first so --help works without logs
    let args = Args::parse();

    // RUST_LOG wins over -q/-v
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(args.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => default_config_path()?,
    };
    debug!(path = %config_path.display(), "Loading config");

    let mut config = load_config(&config_path)?;
    if let Some(key) = &args.api_key {
        config.api_key = Some(key.clone());
    }

    let client = OffcloudClient::from_config(&config).context("Failed to create API client")?;
    let response = args.command.run(&client).await?;

    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
