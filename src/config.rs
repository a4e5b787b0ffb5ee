use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::warn;

pub const BOT_TOKEN_VAR: &str = "TELEGRAM_API_TOKEN";
pub const SEARCH_ADDRESS_VAR: &str = "SEARCH_API_ADDRESS";
pub const SEARCH_KEY_VAR: &str = "SEARCH_API_KEY";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub search: SearchApiConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct TelegramConfig {
    #[serde(default)]
    pub bot_token: String,
}

/// Where the lyrics API lives and how to authenticate against it.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SearchApiConfig {
    /// Base address; `songName` and `artistName` are appended to its query string.
    #[serde(default)]
    pub address: String,
    /// Sent verbatim in the `api-key` header.
    #[serde(default)]
    pub api_key: String,
}

impl Config {
    /// Load the optional TOML file, then let environment variables override it.
    ///
    /// A missing file is only an error when `required` is set, i.e. when the
    /// path was given explicitly on the command line.
    pub fn load(path: &Path, required: bool) -> Result<Self> {
        let config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            Self::parse(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else if required {
            anyhow::bail!("Config file not found: {}", path.display());
        } else {
            Config::default()
        };

        let config = config.with_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid TOML")
    }

    /// Apply values from `lookup` (normally the process environment).
    /// Empty values are ignored so a blank variable cannot wipe the file setting.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = get(BOT_TOKEN_VAR) {
            self.telegram.bot_token = token;
        }
        if let Some(address) = get(SEARCH_ADDRESS_VAR) {
            self.search.address = address;
        }
        if let Some(key) = get(SEARCH_KEY_VAR) {
            self.search.api_key = key;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.telegram.bot_token.trim().is_empty() {
            anyhow::bail!(
                "Telegram bot token is missing: set {} or [telegram] bot_token",
                BOT_TOKEN_VAR
            );
        }
        if self.search.address.trim().is_empty() {
            warn!(
                "{} is not set, every search will report the service as unavailable",
                SEARCH_ADDRESS_VAR
            );
        }
        Ok(())
    }
}
