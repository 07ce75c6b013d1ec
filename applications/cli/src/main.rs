/// Cadenza - terminal client for the Cadenza streaming backend
use cadenza_server_client::{CadenzaClient, FileTokenStore, TokenStore};
use cadenza_session::AppContext;
use clap::{Parser, Subcommand};
use std::{path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod media;
mod shell;

use config::ClientConfig;
use media::SimulatedMediaElement;

const DEFAULT_LOG_FILTER: &str =
    "cadenza=info,cadenza_session=info,cadenza_server_client=info,cadenza_playback=info";

#[derive(Parser)]
#[command(name = "cadenza")]
#[command(about = "Cadenza streaming client", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./cadenza.toml when present)
    #[arg(short, long, env = "CADENZA_CONFIG")]
    config: Option<PathBuf>,

    /// Backend URL, overriding the configuration
    #[arg(short, long)]
    server: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive session (default)
    Shell,
    /// Probe the backend and exit
    Health,
    /// Print the effective configuration and exit
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::load(cli.config.as_deref())?;
    if let Some(url) = cli.server {
        config.server.url = url;
    }
    config.validate()?;

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => shell(config).await?,
        Commands::Health => health(&config).await?,
        Commands::Config => println!("{config:#?}"),
    }

    Ok(())
}

async fn shell(config: ClientConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Cadenza");
    tracing::info!("Backend: {}", config.server.url);

    let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(&config.storage.token_file));
    let client = CadenzaClient::new(config.server_config(), Arc::clone(&tokens))?;

    let context = Arc::new(AppContext::new(
        client,
        tokens,
        Box::new(SimulatedMediaElement::new()),
        config.playback_config(),
    ));

    let (media_sender, media_receiver) = AppContext::media_channel();
    let pump = {
        let context = Arc::clone(&context);
        tokio::spawn(async move { context.run_media_events(media_receiver).await })
    };

    context.spawn_restore();

    shell::run(Arc::clone(&context), media_sender).await?;

    // The shell dropped its sender; let the pump finish what is queued
    pump.await?;
    tracing::info!("Goodbye");

    Ok(())
}

async fn health(config: &ClientConfig) -> anyhow::Result<()> {
    let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(&config.storage.token_file));
    let client = CadenzaClient::new(config.server_config(), tokens)?;

    let health = client.health().await?;
    if health.is_healthy() {
        println!("{} is healthy", client.url());
        Ok(())
    } else {
        anyhow::bail!("{} reported status {}", client.url(), health.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_log_filter_covers_every_crate() {
        for target in [
            "cadenza",
            "cadenza_session",
            "cadenza_server_client",
            "cadenza_playback",
        ] {
            assert!(
                DEFAULT_LOG_FILTER
                    .split(',')
                    .any(|directive| directive == format!("{target}=info")),
                "{target} missing from default filter"
            );
        }
        assert!(tracing_subscriber::EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
    }
}
