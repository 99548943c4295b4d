//! Shared helpers for integration tests

use std::time::Duration;

use serde_json::{json, Value};
use wiremock::MockServer;

use parlay_bot::config::types::{OddsConfig, TelegramConfig};
use parlay_bot::oddsapi::rest::OddsApiClient;
use parlay_bot::picks::selector::PickSelector;
use parlay_bot::picks::strategy::UniformRandomStrategy;
use parlay_bot::pipeline::Pipeline;
use parlay_bot::telegram::client::TelegramClient;

pub const BOT_TOKEN: &str = "test-token";
pub const SEND_MESSAGE_PATH: &str = "/bottest-token/sendMessage";

/// One well-formed game record with a single outcome, so the random
/// strategy has exactly one legal draw and the run is deterministic.
pub fn valid_game(home: &str, away: &str, price: f64) -> Value {
    json!({
        "id": format!("{}-{}", away, home),
        "sport_key": "baseball_mlb",
        "commence_time": "2024-07-04T23:05:00Z",
        "home_team": home,
        "away_team": away,
        "bookmakers": [{
            "key": "draftkings",
            "title": "DraftKings",
            "markets": [{
                "key": "h2h",
                "outcomes": [{"name": home, "price": price}]
            }]
        }]
    })
}

/// A record missing its bookmakers entirely
pub fn game_without_bookmakers(home: &str, away: &str) -> Value {
    json!({
        "commence_time": "2024-07-04T23:05:00Z",
        "home_team": home,
        "away_team": away
    })
}

/// Five records where the 2nd and 4th are malformed; valid prices are
/// 1.91, 2.05 and 1.50
pub fn mixed_games() -> Value {
    json!([
        valid_game("Yankees", "Red Sox", 1.91),
        game_without_bookmakers("Cubs", "Cardinals"),
        valid_game("Mets", "Braves", 2.05),
        game_without_bookmakers("Astros", "Rangers"),
        valid_game("Dodgers", "Giants", 1.50),
    ])
}

/// Build a pipeline wired against mock odds and Telegram servers
pub fn build_pipeline(
    odds_server: &MockServer,
    telegram_server: &MockServer,
    pick_count: usize,
    parlay_legs: usize,
) -> Pipeline {
    let odds_config = OddsConfig {
        api_key: Some("test-odds-key".to_string()),
        base_url: odds_server.uri(),
        sport_key: "baseball_mlb".to_string(),
        regions: "us".to_string(),
        market: "h2h".to_string(),
    };
    let telegram_config = TelegramConfig {
        bot_token: Some(BOT_TOKEN.to_string()),
        chat_id: Some("42".to_string()),
        base_url: telegram_server.uri(),
    };

    let odds_client = OddsApiClient::new(&odds_config, Duration::from_secs(5)).unwrap();
    let telegram = TelegramClient::new(&telegram_config, Duration::from_secs(5)).unwrap();
    let selector = PickSelector::new("h2h", -5, Box::new(UniformRandomStrategy::new(70, 90)));

    Pipeline::new(odds_client, telegram, selector, pick_count, parlay_legs)
}

/// The text body of every message the Telegram mock received, in order
pub async fn sent_texts(telegram_server: &MockServer) -> Vec<String> {
    telegram_server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|request| {
            let body: Value = serde_json::from_slice(&request.body).unwrap();
            body["text"].as_str().unwrap().to_string()
        })
        .collect()
}
