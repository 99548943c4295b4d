//! Configuration types

use serde::{Deserialize, Serialize};

use crate::common::errors::{BotError, Result};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Odds provider configuration
    #[serde(default)]
    pub odds: OddsConfig,
    /// Telegram delivery configuration
    #[serde(default)]
    pub telegram: TelegramConfig,
    /// General application settings
    #[serde(default)]
    pub settings: AppSettings,
}

impl AppConfig {
    /// Check that every required secret is present.
    ///
    /// Called once at startup, before any scheduling begins. A missing
    /// credential aborts the process instead of failing at first use.
    pub fn validate(&self) -> Result<()> {
        if self.odds.api_key.as_deref().unwrap_or("").is_empty() {
            return Err(BotError::Configuration("ODDS_API_KEY is not set".to_string()));
        }
        if self.telegram.bot_token.as_deref().unwrap_or("").is_empty() {
            return Err(BotError::Configuration(
                "TELEGRAM_BOT_TOKEN is not set".to_string(),
            ));
        }
        if self.telegram.chat_id.as_deref().unwrap_or("").is_empty() {
            return Err(BotError::Configuration(
                "TELEGRAM_CHAT_ID is not set".to_string(),
            ));
        }
        Ok(())
    }
}

/// Odds provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OddsConfig {
    /// API key for the odds provider
    #[serde(default)]
    pub api_key: Option<String>,
    /// Base URL for the odds API
    #[serde(default = "default_odds_base_url")]
    pub base_url: String,
    /// Sport to fetch odds for
    #[serde(default = "default_sport_key")]
    pub sport_key: String,
    /// Bookmaker regions to include
    #[serde(default = "default_regions")]
    pub regions: String,
    /// Market type to request
    #[serde(default = "default_market")]
    pub market: String,
}

impl Default for OddsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_odds_base_url(),
            sport_key: default_sport_key(),
            regions: default_regions(),
            market: default_market(),
        }
    }
}

fn default_odds_base_url() -> String {
    "https://api.the-odds-api.com".to_string()
}

fn default_sport_key() -> String {
    "baseball_mlb".to_string()
}

fn default_regions() -> String {
    "us".to_string()
}

fn default_market() -> String {
    "h2h".to_string()
}

/// Telegram delivery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot access token
    #[serde(default)]
    pub bot_token: Option<String>,
    /// Destination chat identifier
    #[serde(default)]
    pub chat_id: Option<String>,
    /// Base URL for the Bot API (overridable for tests)
    #[serde(default = "default_telegram_base_url")]
    pub base_url: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            chat_id: None,
            base_url: default_telegram_base_url(),
        }
    }
}

fn default_telegram_base_url() -> String {
    "https://api.telegram.org".to_string()
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Local wall-clock time of the daily run, "HH:MM"
    #[serde(default = "default_run_at")]
    pub run_at: String,
    /// UTC offset in hours used for scheduling and start-time display
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i32,
    /// Number of picks selected per run
    #[serde(default = "default_pick_count")]
    pub pick_count: usize,
    /// Leg count of the combined parlay message (3 = main, 2 = mini)
    #[serde(default = "default_parlay_legs")]
    pub parlay_legs: usize,
    /// Lower bound of the displayed confidence percentage
    #[serde(default = "default_confidence_min")]
    pub confidence_min: u8,
    /// Upper bound of the displayed confidence percentage
    #[serde(default = "default_confidence_max")]
    pub confidence_max: u8,
    /// Request timeout in seconds for outbound HTTP calls
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Port for the liveness/trigger HTTP server
    #[serde(default = "default_server_port")]
    pub server_port: u16,
    /// Number of run reports retained in memory
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            run_at: default_run_at(),
            utc_offset_hours: default_utc_offset_hours(),
            pick_count: default_pick_count(),
            parlay_legs: default_parlay_legs(),
            confidence_min: default_confidence_min(),
            confidence_max: default_confidence_max(),
            request_timeout_seconds: default_request_timeout(),
            server_port: default_server_port(),
            history_limit: default_history_limit(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_run_at() -> String {
    "11:00".to_string()
}

fn default_utc_offset_hours() -> i32 {
    -5
}

fn default_pick_count() -> usize {
    3
}

fn default_parlay_legs() -> usize {
    3
}

fn default_confidence_min() -> u8 {
    70
}

fn default_confidence_max() -> u8 {
    90
}

fn default_request_timeout() -> u64 {
    30
}

fn default_server_port() -> u16 {
    8080
}

fn default_history_limit() -> usize {
    30
}
