//! Configuration loader

use config::{Config, Environment, File};
use std::path::Path;

use super::types::AppConfig;
use crate::common::errors::{BotError, Result};

/// Load configuration from file and environment variables
///
/// Priority (highest to lowest):
/// 1. Environment variables (prefixed with APP_)
/// 2. Configuration file (TOML format)
/// 3. Default values
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let mut builder = Config::builder();

    // Add default config file if it exists
    if let Some(path) = config_path {
        if Path::new(path).exists() {
            builder = builder.add_source(File::with_name(path).required(false));
        }
    }

    // Add environment variables with APP_ prefix
    builder = builder.add_source(
        Environment::with_prefix("APP")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder
        .build()
        .map_err(|e| BotError::Configuration(e.to_string()))?;

    let mut app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| BotError::Configuration(e.to_string()))?;

    apply_env_overrides(&mut app_config);
    Ok(app_config)
}

/// Load configuration from environment variables only
pub fn load_from_env() -> Result<AppConfig> {
    // Try to load from .env file
    dotenvy::dotenv().ok();

    let mut config = AppConfig::default();
    apply_env_overrides(&mut config);
    Ok(config)
}

/// Overlay the well-known environment variables on top of a config.
///
/// These are the names the deployment environment provides, without the
/// APP_ prefix, so they are read explicitly.
fn apply_env_overrides(config: &mut AppConfig) {
    if let Some(key) = non_empty_var("ODDS_API_KEY") {
        config.odds.api_key = Some(key);
    }
    if let Some(sport) = non_empty_var("ODDS_SPORT_KEY") {
        config.odds.sport_key = sport;
    }
    if let Some(regions) = non_empty_var("ODDS_REGIONS") {
        config.odds.regions = regions;
    }
    if let Some(token) = non_empty_var("TELEGRAM_BOT_TOKEN") {
        config.telegram.bot_token = Some(token);
    }
    if let Some(chat_id) = non_empty_var("TELEGRAM_CHAT_ID") {
        config.telegram.chat_id = Some(chat_id);
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
