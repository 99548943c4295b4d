//! Wire types for the odds provider response
//!
//! Third-party payloads are only partially trustworthy: any field or
//! nesting level may be absent. Everything is therefore optional or
//! defaulted so a malformed record deserializes instead of failing the
//! whole response. Filtering happens later, per record, in the selector.

use serde::{Deserialize, Serialize};

/// One game as returned by the odds provider
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub sport_key: Option<String>,
    /// Scheduled start, ISO-8601
    #[serde(default)]
    pub commence_time: Option<String>,
    #[serde(default)]
    pub home_team: Option<String>,
    #[serde(default)]
    pub away_team: Option<String>,
    #[serde(default)]
    pub bookmakers: Vec<BookmakerRecord>,
}

/// One bookmaker's entry for a game
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookmakerRecord {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub markets: Vec<MarketRecord>,
}

/// One market (e.g. head-to-head) within a bookmaker entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketRecord {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub outcomes: Vec<OutcomeRecord>,
}

/// One priced outcome within a market
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutcomeRecord {
    #[serde(default)]
    pub name: Option<String>,
    /// Decimal odds price
    #[serde(default)]
    pub price: Option<f64>,
}
