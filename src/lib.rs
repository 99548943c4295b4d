//! ParlayBot Library
//!
//! A Rust service that fetches sports betting odds, selects a handful
//! of daily picks, and posts formatted pick and parlay messages to a
//! Telegram chat.

pub mod common;
pub mod config;
pub mod message;
pub mod oddsapi;
pub mod picks;
pub mod pipeline;
pub mod scheduler;
pub mod server;
pub mod telegram;

// Re-export commonly used types
pub use common::errors::{BotError, Result};
pub use common::types::{RunHistory, RunReport};
pub use config::types::AppConfig;
pub use oddsapi::messages::{BookmakerRecord, GameRecord, MarketRecord, OutcomeRecord};
pub use oddsapi::rest::OddsApiClient;
pub use pipeline::Pipeline;
pub use scheduler::Scheduler;
pub use telegram::client::TelegramClient;

// Pick selection types
pub use picks::selector::PickSelector;
pub use picks::strategy::{BoxedPickStrategy, PickStrategy, UniformRandomStrategy};
pub use picks::types::{Parlay, Pick};
