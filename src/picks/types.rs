//! Pick and parlay entities

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One recommended outcome for one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pick {
    /// Matchup label, "{away} vs {home}"
    pub matchup: String,
    /// Selected outcome name
    pub outcome: String,
    /// Decimal price, rounded to 2 places at construction and never
    /// re-rounded afterwards
    pub price: Decimal,
    /// Human-readable start time, e.g. "07:05 PM EST"
    pub start_time: String,
    /// Illustrative confidence percentage
    pub confidence: u8,
}

/// A combined multi-leg bet derived from an ordered pick sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parlay {
    pub legs: Vec<Pick>,
    /// Net payout multiplier on a one-unit stake if every leg wins:
    /// product of leg prices minus one, rounded to 2 places
    pub multiplier: Decimal,
}

impl Parlay {
    /// Build a parlay only when the leg count matches exactly.
    ///
    /// A short sequence yields `None`, not an error: the caller simply
    /// omits the parlay message for that run. The multiplier is computed
    /// over the already-rounded per-leg prices.
    pub fn from_legs(legs: &[Pick], required: usize) -> Option<Self> {
        if required < 2 || legs.len() != required {
            return None;
        }
        let product = legs.iter().fold(Decimal::ONE, |acc, leg| acc * leg.price);
        let multiplier = (product - Decimal::ONE).round_dp(2);
        Some(Self {
            legs: legs.to_vec(),
            multiplier,
        })
    }
}
