//! Telegram message templates for picks and parlays
//!
//! Pure template substitution over already-constructed entities: the
//! same input always renders the same bytes. Markup is Telegram
//! Markdown (bold/italic).

use std::fmt::Write;

use crate::picks::types::{Parlay, Pick};

/// Render one pick into the fixed promotional template.
pub fn format_pick(pick: &Pick) -> String {
    format!(
        "\u{26be}\u{fe0f} *AI MLB Pick*\n\n\
         *Game:* {}\n\
         *Pick:* {} ({}) \u{26be}\u{fe0f}\n\
         *Start Time:* {}\n\
         *Confidence:* {}%\n\n\
         _Backed by real-time odds_",
        pick.matchup, pick.outcome, pick.price, pick.start_time, pick.confidence
    )
}

/// Render the combined parlay message for an exact leg count.
///
/// Returns `None` when `picks` does not contain exactly `legs` entries;
/// the caller checks before attempting delivery.
pub fn format_parlay(picks: &[Pick], legs: usize) -> Option<String> {
    let parlay = Parlay::from_legs(picks, legs)?;

    let mut leg_lines = String::new();
    for (i, leg) in parlay.legs.iter().enumerate() {
        let _ = writeln!(
            leg_lines,
            "*Leg {}:* {} ({}) - {}",
            i + 1,
            leg.outcome,
            leg.price,
            leg.matchup
        );
    }

    Some(format!(
        "\u{1f525} *AI {}-Leg MLB Parlay*\n\n\
         {}\n\
         *Combined Odds:* {}x\n\n\
         _One unit pays {} in profit if every leg hits_",
        legs, leg_lines, parlay.multiplier, parlay.multiplier
    ))
}
