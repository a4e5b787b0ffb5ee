use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::config::SearchApiConfig;

/// Song and artist extracted from `/search song, artist`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub song: String,
    pub artist: String,
}

impl SearchQuery {
    /// Split `args` on a comma. Exactly two parts are required and both must
    /// be non-empty once trimmed.
    pub fn parse(args: &str) -> Option<Self> {
        let parts: Vec<&str> = args.split(',').collect();
        let [song, artist] = parts.as_slice() else {
            return None;
        };

        let song = song.trim();
        let artist = artist.trim();
        if song.is_empty() || artist.is_empty() {
            return None;
        }

        Some(Self {
            song: song.to_string(),
            artist: artist.to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct LyricsResponse {
    /// `null` and a missing field both mean no lyrics
    #[serde(rename = "Lines", default)]
    lines: Option<Vec<String>>,
}

/// Anything that can look up lyrics for a query.
///
/// `Ok` with an empty vector means the service knows nothing about the song;
/// `Err` means the service could not be asked at all.
#[async_trait]
pub trait LyricsSearch: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<String>>;
}

pub struct LyricsClient {
    client: reqwest::Client,
    config: SearchApiConfig,
}

impl LyricsClient {
    pub fn new(config: SearchApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl LyricsSearch for LyricsClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<String>> {
        let url = reqwest::Url::parse(&self.config.address).with_context(|| {
            format!("Invalid lyrics API address: {:?}", self.config.address)
        })?;

        debug!(
            "Searching lyrics for '{}' by '{}' at {}",
            query.song, query.artist, url
        );

        let response = self
            .client
            .post(url)
            .query(&[
                ("artistName", query.artist.as_str()),
                ("songName", query.song.as_str()),
            ])
            .header("api-key", &self.config.api_key)
            .send()
            .await
            .context("Failed to send request to lyrics API")?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!("Lyrics API error ({}): {}", status, error_body);
        }

        let body: LyricsResponse = response
            .json()
            .await
            .context("Failed to parse lyrics API response")?;

        let lines = body.lines.unwrap_or_default();
        debug!("Lyrics API returned {} line(s)", lines.len());
        Ok(lines)
    }
}
