//! Client for the Telegram Bot API send-message endpoint

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::common::errors::{BotError, Result};
use crate::config::types::TelegramConfig;

/// Client for delivering rendered messages to one Telegram chat
#[derive(Debug, Clone)]
pub struct TelegramClient {
    /// HTTP client
    client: Client,
    /// Base URL for the Bot API
    base_url: String,
    /// Bot access token
    bot_token: String,
    /// Destination chat identifier
    chat_id: String,
}

/// Envelope every Bot API method returns
#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    result: Option<serde_json::Value>,
}

impl TelegramClient {
    /// Create a new client with an explicit request timeout
    pub fn new(config: &TelegramConfig, timeout: Duration) -> Result<Self> {
        let bot_token = config
            .bot_token
            .clone()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| BotError::Configuration("Telegram bot token is not set".to_string()))?;
        let chat_id = config
            .chat_id
            .clone()
            .filter(|c| !c.is_empty())
            .ok_or_else(|| BotError::Configuration("Telegram chat id is not set".to_string()))?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BotError::Internal(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            bot_token,
            chat_id,
        })
    }

    /// Deliver one rendered message to the configured chat.
    ///
    /// Markdown parse mode, matching the bold/italic markup the
    /// templates emit. A rejection by the platform is a
    /// [`BotError::Delivery`]; the caller decides whether later sends
    /// still go out.
    #[instrument(skip(self, text))]
    pub async fn send_message(&self, text: &str) -> Result<()> {
        let url = format!("{}/bot{}/sendMessage", self.base_url, self.bot_token);
        let body = serde_json::json!({
            "chat_id": self.chat_id,
            "text": text,
            "parse_mode": "Markdown",
        });

        let response = self.client.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(BotError::Delivery(format!(
                "sendMessage returned status {}: {}",
                status, body
            )));
        }

        let parsed: ApiResponse = response.json().await?;
        if !parsed.ok {
            return Err(BotError::Delivery(format!(
                "sendMessage rejected: {}",
                parsed.description.unwrap_or_else(|| "no description".to_string())
            )));
        }

        debug!("Message delivered to chat {}", self.chat_id);
        Ok(())
    }

    /// Probe the bot credentials and return the bot's user id.
    ///
    /// Used once at startup so a bad token is reported immediately
    /// rather than at the first scheduled run.
    #[instrument(skip(self))]
    pub async fn get_me(&self) -> Result<i64> {
        let url = format!("{}/bot{}/getMe", self.base_url, self.bot_token);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(BotError::InvalidResponse(format!(
                "getMe returned status {}: {}",
                status, body
            )));
        }

        let parsed: ApiResponse = response.json().await?;
        if !parsed.ok {
            return Err(BotError::InvalidResponse(format!(
                "getMe rejected: {}",
                parsed.description.unwrap_or_else(|| "no description".to_string())
            )));
        }

        parsed
            .result
            .as_ref()
            .and_then(|r| r.get("id"))
            .and_then(|id| id.as_i64())
            .ok_or_else(|| BotError::InvalidResponse("getMe result missing bot id".to_string()))
    }
}
