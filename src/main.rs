mod bot;
mod commands;
mod config;
mod lyrics;
mod platform;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use teloxide::Bot;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::CommandDispatcher;
use crate::config::Config;
use crate::lyrics::LyricsClient;
use crate::platform::telegram;

#[tokio::main]
async fn main() -> Result<()> {
    // Variables from .env, if present; RUST_LOG may be set there too
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,slyrics=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let explicit_path = std::env::args().nth(1).map(PathBuf::from);
    let config_path = explicit_path
        .clone()
        .unwrap_or_else(|| PathBuf::from("config.toml"));

    info!("Loading configuration from: {}", config_path.display());
    let config = Config::load(&config_path, explicit_path.is_some())
        .context("Failed to load configuration")?;

    info!("Configuration loaded successfully");
    info!("  Lyrics API: {}", config.search.address);

    let bot = Bot::new(&config.telegram.bot_token);
    telegram::authorize(&bot).await?;
    telegram::register_commands(&bot).await;

    let commands = Arc::new(CommandDispatcher::new(Arc::new(LyricsClient::new(
        config.search.clone(),
    ))));

    bot::run(bot, commands).await?;

    Ok(())
}
