//! One end-to-end fetch → select → format → deliver run

use chrono::Utc;
use tracing::{info, instrument, warn};

use crate::common::types::RunReport;
use crate::message;
use crate::oddsapi::rest::OddsApiClient;
use crate::picks::selector::PickSelector;
use crate::telegram::client::TelegramClient;

/// The pick-and-publish pipeline.
///
/// Owns every collaborator a run needs. A run is strictly sequential:
/// fetch, select, format, deliver. All entities created during a run are
/// discarded when its [`RunReport`] has been produced.
pub struct Pipeline {
    odds_client: OddsApiClient,
    telegram: TelegramClient,
    selector: PickSelector,
    /// Picks selected per run
    pick_count: usize,
    /// Leg count of the combined parlay message
    parlay_legs: usize,
}

impl Pipeline {
    pub fn new(
        odds_client: OddsApiClient,
        telegram: TelegramClient,
        selector: PickSelector,
        pick_count: usize,
        parlay_legs: usize,
    ) -> Self {
        Self {
            odds_client,
            telegram,
            selector,
            pick_count,
            parlay_legs,
        }
    }

    /// Execute one full run and report what happened.
    ///
    /// Never returns an error: a failed odds fetch ends the run early
    /// with the failure recorded in the report, and a rejected delivery
    /// is counted without stopping the remaining sends.
    #[instrument(skip(self))]
    pub async fn run_once(&mut self) -> RunReport {
        let mut report = RunReport::new(Utc::now());

        let games = match self.odds_client.fetch_odds().await {
            Ok(games) => games,
            Err(e) => {
                warn!("Odds fetch failed, no picks this run: {}", e);
                report.fetch_error = Some(e.to_string());
                return report;
            }
        };
        report.games_fetched = games.len();

        let picks = self.selector.select_picks(&games, self.pick_count);
        report.picks_selected = picks.len();
        info!(
            "Selected {} of {} requested picks from {} games",
            picks.len(),
            self.pick_count,
            games.len()
        );

        for pick in &picks {
            self.deliver(&message::format_pick(pick), &mut report).await;
        }

        let parlay_input = &picks[..self.parlay_legs.min(picks.len())];
        if let Some(text) = message::format_parlay(parlay_input, self.parlay_legs) {
            report.parlay_text = Some(text.clone());
            self.deliver(&text, &mut report).await;
        } else {
            info!(
                "Skipping parlay message: {} picks available, {} legs required",
                picks.len(),
                self.parlay_legs
            );
        }

        info!(
            "Run finished: {} sent, {} failed",
            report.messages_sent, report.messages_failed
        );
        report
    }

    /// Fire-and-forget delivery: failures are counted, never retried,
    /// and never stop later sends.
    async fn deliver(&self, text: &str, report: &mut RunReport) {
        match self.telegram.send_message(text).await {
            Ok(()) => report.messages_sent += 1,
            Err(e) => {
                warn!("Message delivery failed: {}", e);
                report.messages_failed += 1;
            }
        }
    }
}
