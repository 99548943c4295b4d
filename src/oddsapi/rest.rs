//! REST client for the odds provider

use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

use super::messages::GameRecord;
use crate::common::errors::{BotError, Result};
use crate::config::types::OddsConfig;

/// Client for the odds provider's event-odds endpoint
#[derive(Debug, Clone)]
pub struct OddsApiClient {
    /// HTTP client
    client: Client,
    /// Base URL for the odds API
    base_url: String,
    /// Provider API key
    api_key: String,
    /// Sport to fetch
    sport_key: String,
    /// Bookmaker regions
    regions: String,
    /// Market type
    market: String,
}

impl OddsApiClient {
    /// Create a new client with an explicit request timeout
    pub fn new(config: &OddsConfig, timeout: Duration) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| BotError::Configuration("odds API key is not set".to_string()))?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BotError::Internal(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            sport_key: config.sport_key.clone(),
            regions: config.regions.clone(),
            market: config.market.clone(),
        })
    }

    /// Fetch the current odds for the configured sport.
    ///
    /// Returns the provider's game records in provider order. Any
    /// transport failure, non-2xx status or unparsable body is an error;
    /// the caller treats it as "no picks this run". No retries here.
    #[instrument(skip(self))]
    pub async fn fetch_odds(&self) -> Result<Vec<GameRecord>> {
        let url = format!("{}/v4/sports/{}/odds", self.base_url, self.sport_key);
        debug!("Fetching odds from: {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("regions", self.regions.as_str()),
                ("markets", self.market.as_str()),
                ("oddsFormat", "decimal"),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(BotError::InvalidResponse(format!(
                "Odds API returned status {}: {}",
                status,
                truncate(&body, 200)
            )));
        }

        if let Some(remaining) = response
            .headers()
            .get("x-requests-remaining")
            .and_then(|v| v.to_str().ok())
        {
            debug!("Odds API requests remaining: {}", remaining);
        }

        let body = response.text().await?;
        let games: Vec<GameRecord> = serde_json::from_str(&body)?;
        debug!("Fetched {} game records", games.len());
        Ok(games)
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
