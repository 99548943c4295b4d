//! Pick selection over raw provider game records

use chrono::{DateTime, FixedOffset, Offset, Utc};
use rust_decimal::Decimal;
use tracing::debug;

use super::strategy::BoxedPickStrategy;
use super::types::Pick;
use crate::oddsapi::messages::{GameRecord, MarketRecord};

/// Builds picks from game records, skipping anything malformed.
///
/// Records are consumed in provider order. A record missing any of the
/// required fields or nesting levels is skipped at record granularity;
/// nothing a single record contains can fail a run.
pub struct PickSelector {
    /// Preferred market key within a bookmaker entry
    market_key: String,
    /// UTC offset applied before rendering the start time
    display_offset: FixedOffset,
    strategy: BoxedPickStrategy,
}

impl PickSelector {
    pub fn new(market_key: &str, utc_offset_hours: i32, strategy: BoxedPickStrategy) -> Self {
        // Out-of-range offsets fall back to UTC rather than failing the run
        let display_offset =
            FixedOffset::east_opt(utc_offset_hours * 3600).unwrap_or_else(|| Utc.fix());
        Self {
            market_key: market_key.to_string(),
            display_offset,
            strategy,
        }
    }

    /// Select up to `k` picks from `games`.
    ///
    /// Stops scanning as soon as `k` picks are accumulated. Returns a
    /// shorter sequence when fewer structurally-valid games exist;
    /// callers tolerate under-full results.
    pub fn select_picks(&mut self, games: &[GameRecord], k: usize) -> Vec<Pick> {
        let mut picks = Vec::with_capacity(k);
        if k == 0 {
            return picks;
        }

        for game in games {
            match self.pick_from_game(game) {
                Some(pick) => {
                    picks.push(pick);
                    if picks.len() == k {
                        break;
                    }
                }
                None => {
                    debug!(
                        "Skipping game record without usable odds: {:?} vs {:?}",
                        game.away_team, game.home_team
                    );
                }
            }
        }

        picks
    }

    /// Extract one pick from one game record, or `None` if the record
    /// does not have the expected structure.
    fn pick_from_game(&mut self, game: &GameRecord) -> Option<Pick> {
        let home = game.home_team.as_deref()?;
        let away = game.away_team.as_deref()?;
        let start = game.commence_time.as_deref()?;

        let bookmaker = game.bookmakers.first()?;
        let market = self.preferred_market(&bookmaker.markets)?;

        let idx = self.strategy.choose_outcome(&market.outcomes)?;
        let outcome = market.outcomes.get(idx)?;
        let name = outcome.name.as_deref()?;

        // Rounded exactly once here; every later rendering reuses this value
        let price = Decimal::from_f64_retain(outcome.price?)?.round_dp(2);
        if price < Decimal::ONE {
            // Not a decimal-odds price; treat the record as malformed
            return None;
        }

        let start_time = format_start_time(start, self.display_offset)?;

        Some(Pick {
            matchup: format!("{} vs {}", away, home),
            outcome: name.to_string(),
            price,
            start_time,
            confidence: self.strategy.confidence(),
        })
    }

    /// The market matching the configured key, or the bookmaker's first
    /// market when the key is absent.
    fn preferred_market<'a>(&self, markets: &'a [MarketRecord]) -> Option<&'a MarketRecord> {
        markets
            .iter()
            .find(|m| m.key.as_deref() == Some(self.market_key.as_str()))
            .or_else(|| markets.first())
    }
}

/// Render an ISO-8601 start timestamp as a local wall-clock string.
///
/// Returns `None` on unparsable input so the surrounding record is
/// skipped like any other shape mismatch.
fn format_start_time(raw: &str, offset: FixedOffset) -> Option<String> {
    let parsed: DateTime<FixedOffset> = DateTime::parse_from_rfc3339(raw).ok()?;
    Some(
        parsed
            .with_timezone(&offset)
            .format("%I:%M %p EST")
            .to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oddsapi::messages::{BookmakerRecord, OutcomeRecord};
    use crate::picks::strategy::PickStrategy;
    use rust_decimal_macros::dec;

    /// Deterministic strategy: always the first outcome, fixed confidence
    struct FirstOutcome;

    impl PickStrategy for FirstOutcome {
        fn name(&self) -> &str {
            "first_outcome"
        }

        fn choose_outcome(&mut self, outcomes: &[OutcomeRecord]) -> Option<usize> {
            if outcomes.is_empty() {
                None
            } else {
                Some(0)
            }
        }

        fn confidence(&mut self) -> u8 {
            75
        }
    }

    fn selector() -> PickSelector {
        PickSelector::new("h2h", -5, Box::new(FirstOutcome))
    }

    fn game(home: &str, away: &str, price: f64) -> GameRecord {
        GameRecord {
            id: Some(format!("{}-{}", away, home)),
            sport_key: Some("baseball_mlb".to_string()),
            commence_time: Some("2024-07-04T23:05:00Z".to_string()),
            home_team: Some(home.to_string()),
            away_team: Some(away.to_string()),
            bookmakers: vec![BookmakerRecord {
                key: Some("draftkings".to_string()),
                title: Some("DraftKings".to_string()),
                markets: vec![MarketRecord {
                    key: Some("h2h".to_string()),
                    outcomes: vec![
                        OutcomeRecord {
                            name: Some(home.to_string()),
                            price: Some(price),
                        },
                        OutcomeRecord {
                            name: Some(away.to_string()),
                            price: Some(price + 0.2),
                        },
                    ],
                }],
            }],
        }
    }

    fn game_without_bookmakers(home: &str, away: &str) -> GameRecord {
        GameRecord {
            commence_time: Some("2024-07-04T23:05:00Z".to_string()),
            home_team: Some(home.to_string()),
            away_team: Some(away.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_games_become_picks_in_order() {
        let games = vec![
            game("Yankees", "Red Sox", 1.91),
            game("Mets", "Braves", 2.05),
            game("Dodgers", "Giants", 1.50),
        ];
        let picks = selector().select_picks(&games, 3);

        assert_eq!(picks.len(), 3);
        assert_eq!(picks[0].matchup, "Red Sox vs Yankees");
        assert_eq!(picks[0].outcome, "Yankees");
        assert_eq!(picks[0].price, dec!(1.91));
        assert_eq!(picks[1].matchup, "Braves vs Mets");
        assert_eq!(picks[2].matchup, "Giants vs Dodgers");
    }

    #[test]
    fn test_malformed_records_skipped_not_fatal() {
        // Records 2 and 4 are missing bookmakers; 1, 3, 5 are valid
        let games = vec![
            game("Yankees", "Red Sox", 1.91),
            game_without_bookmakers("Cubs", "Cardinals"),
            game("Mets", "Braves", 2.05),
            game_without_bookmakers("Astros", "Rangers"),
            game("Dodgers", "Giants", 1.50),
        ];
        let picks = selector().select_picks(&games, 3);

        assert_eq!(picks.len(), 3);
        assert_eq!(picks[0].matchup, "Red Sox vs Yankees");
        assert_eq!(picks[1].matchup, "Braves vs Mets");
        assert_eq!(picks[2].matchup, "Giants vs Dodgers");
    }

    #[test]
    fn test_stops_at_k() {
        let games: Vec<GameRecord> = (0..10)
            .map(|i| game(&format!("Home{}", i), &format!("Away{}", i), 1.80))
            .collect();
        let picks = selector().select_picks(&games, 3);

        assert_eq!(picks.len(), 3);
        assert_eq!(picks[2].matchup, "Away2 vs Home2");
    }

    #[test]
    fn test_underfull_input_returns_shorter_sequence() {
        let games = vec![
            game("Yankees", "Red Sox", 1.91),
            game_without_bookmakers("Cubs", "Cardinals"),
            game("Mets", "Braves", 2.05),
        ];
        let picks = selector().select_picks(&games, 3);
        assert_eq!(picks.len(), 2);

        assert!(selector().select_picks(&[], 3).is_empty());
        assert!(selector().select_picks(&games, 0).is_empty());
    }

    #[test]
    fn test_never_panics_on_missing_fields() {
        let mut missing_home = game("Yankees", "Red Sox", 1.91);
        missing_home.home_team = None;
        let mut missing_away = game("Yankees", "Red Sox", 1.91);
        missing_away.away_team = None;
        let mut missing_start = game("Yankees", "Red Sox", 1.91);
        missing_start.commence_time = None;
        let mut bad_start = game("Yankees", "Red Sox", 1.91);
        bad_start.commence_time = Some("not-a-timestamp".to_string());
        let mut empty_markets = game("Yankees", "Red Sox", 1.91);
        empty_markets.bookmakers[0].markets.clear();
        let mut empty_outcomes = game("Yankees", "Red Sox", 1.91);
        empty_outcomes.bookmakers[0].markets[0].outcomes.clear();
        let mut unnamed_outcome = game("Yankees", "Red Sox", 1.91);
        unnamed_outcome.bookmakers[0].markets[0].outcomes[0].name = None;
        let mut unpriced_outcome = game("Yankees", "Red Sox", 1.91);
        unpriced_outcome.bookmakers[0].markets[0].outcomes[0].price = None;

        let games = vec![
            missing_home,
            missing_away,
            missing_start,
            bad_start,
            empty_markets,
            empty_outcomes,
            unnamed_outcome,
            unpriced_outcome,
            GameRecord::default(),
        ];
        let picks = selector().select_picks(&games, 3);
        assert!(picks.is_empty());
    }

    #[test]
    fn test_price_rounded_once_at_construction() {
        let games = vec![game("Yankees", "Red Sox", 1.9099)];
        let picks = selector().select_picks(&games, 1);
        assert_eq!(picks[0].price, dec!(1.91));
    }

    #[test]
    fn test_sub_one_price_treated_as_malformed() {
        let games = vec![game("Yankees", "Red Sox", 0.91)];
        assert!(selector().select_picks(&games, 1).is_empty());
    }

    #[test]
    fn test_start_time_rendered_in_display_offset() {
        // 23:05 UTC at offset -5 is 06:05 PM
        let games = vec![game("Yankees", "Red Sox", 1.91)];
        let picks = selector().select_picks(&games, 1);
        assert_eq!(picks[0].start_time, "06:05 PM EST");
    }

    #[test]
    fn test_preferred_market_falls_back_to_first() {
        let mut spreads_only = game("Yankees", "Red Sox", 1.91);
        spreads_only.bookmakers[0].markets[0].key = Some("spreads".to_string());
        let picks = selector().select_picks(&[spreads_only], 1);
        assert_eq!(picks.len(), 1);
    }
}
