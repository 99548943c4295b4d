//! Odds provider client
//!
//! Wraps the one outbound request the pipeline makes against the odds
//! API and the untrusted wire types it returns.

pub mod messages;
pub mod rest;

pub use messages::{BookmakerRecord, GameRecord, MarketRecord, OutcomeRecord};
pub use rest::OddsApiClient;
