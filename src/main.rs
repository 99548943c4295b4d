//! ParlayBot - Main Entry Point
//!
//! A Rust service that fetches sports betting odds once a day, selects
//! a handful of picks, and posts them to a Telegram chat.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use tokio::sync::{Mutex, RwLock};
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use parlay_bot::common::types::RunHistory;
use parlay_bot::config::loader::load_config;
use parlay_bot::oddsapi::rest::OddsApiClient;
use parlay_bot::picks::selector::PickSelector;
use parlay_bot::picks::strategy::UniformRandomStrategy;
use parlay_bot::pipeline::Pipeline;
use parlay_bot::scheduler::Scheduler;
use parlay_bot::server::{self, ServerState};
use parlay_bot::telegram::client::TelegramClient;

/// CLI arguments for the application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Run the pipeline once and exit instead of starting the scheduler
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting ParlayBot");

    // Load environment variables from .env file if present
    dotenvy::dotenv().ok();

    let config = load_config(Some(&args.config))?;
    // Missing secrets abort here, before any scheduling begins
    config.validate()?;

    let timeout = Duration::from_secs(config.settings.request_timeout_seconds);
    let odds_client = OddsApiClient::new(&config.odds, timeout)?;
    let telegram = TelegramClient::new(&config.telegram, timeout)?;

    // Probe the bot credentials so a bad token shows up immediately.
    // A transient network failure here is not fatal.
    match telegram.get_me().await {
        Ok(bot_id) => info!("Telegram credentials verified (bot id {})", bot_id),
        Err(e) => warn!("Telegram credential probe failed: {}", e),
    }

    let strategy = UniformRandomStrategy::new(
        config.settings.confidence_min,
        config.settings.confidence_max,
    );
    let selector = PickSelector::new(
        &config.odds.market,
        config.settings.utc_offset_hours,
        Box::new(strategy),
    );
    let mut pipeline = Pipeline::new(
        odds_client,
        telegram,
        selector,
        config.settings.pick_count,
        config.settings.parlay_legs,
    );

    if args.once {
        let report = pipeline.run_once().await;
        info!(
            "Single run complete: {} picks, {} sent, {} failed",
            report.picks_selected, report.messages_sent, report.messages_failed
        );
        return Ok(());
    }

    let pipeline = Arc::new(Mutex::new(pipeline));
    let history = Arc::new(RwLock::new(RunHistory::new(config.settings.history_limit)));

    let scheduler = Scheduler::new(
        &config.settings.run_at,
        config.settings.utc_offset_hours,
        pipeline.clone(),
        history.clone(),
    )?;
    tokio::spawn(scheduler.run());

    let state = Arc::new(ServerState {
        started_at: Utc::now(),
        pipeline,
        history,
    });
    let port = config.settings.server_port;
    tokio::spawn(async move {
        if let Err(e) = server::serve(state, port).await {
            error!("HTTP server exited: {}", e);
        }
    });

    info!("Scheduler and HTTP server started");

    // Keep the application running
    tokio::signal::ctrl_c().await?;
    info!("Received shutdown signal, cleaning up...");

    Ok(())
}
