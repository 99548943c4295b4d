//! Daily wall-clock trigger for the pipeline

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, FixedOffset, NaiveTime, TimeZone, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::{info, instrument};

use crate::common::errors::{BotError, Result};
use crate::common::types::RunHistory;
use crate::pipeline::Pipeline;

/// Fires the pipeline once a day at a fixed local time.
///
/// The pipeline lives behind a `Mutex` shared with the HTTP server's
/// manual trigger, so at most one run executes at a time regardless of
/// which trigger fires first.
pub struct Scheduler {
    run_at: NaiveTime,
    offset: FixedOffset,
    pipeline: Arc<Mutex<Pipeline>>,
    history: Arc<RwLock<RunHistory>>,
}

impl Scheduler {
    pub fn new(
        run_at: &str,
        utc_offset_hours: i32,
        pipeline: Arc<Mutex<Pipeline>>,
        history: Arc<RwLock<RunHistory>>,
    ) -> Result<Self> {
        let run_at = NaiveTime::parse_from_str(run_at, "%H:%M")
            .map_err(|e| BotError::Scheduler(format!("invalid run_at time '{}': {}", run_at, e)))?;
        let offset = FixedOffset::east_opt(utc_offset_hours * 3600).ok_or_else(|| {
            BotError::Scheduler(format!("invalid UTC offset: {} hours", utc_offset_hours))
        })?;

        Ok(Self {
            run_at,
            offset,
            pipeline,
            history,
        })
    }

    /// Run forever: sleep until the next trigger instant, execute one
    /// pipeline run, record its report, repeat.
    #[instrument(skip(self))]
    pub async fn run(self) {
        loop {
            let next = next_run_after(Utc::now(), self.run_at, self.offset);
            let wait = (next - Utc::now()).to_std().unwrap_or(StdDuration::ZERO);
            info!(
                "Next scheduled run at {} (in {}s)",
                next.with_timezone(&self.offset),
                wait.as_secs()
            );
            tokio::time::sleep(wait).await;

            let report = {
                let mut pipeline = self.pipeline.lock().await;
                pipeline.run_once().await
            };
            self.history.write().await.push(report);
        }
    }
}

/// The first trigger instant strictly after `now`.
///
/// `run_at` is interpreted in the given fixed offset; the result is the
/// same wall-clock time today, or tomorrow when that has already passed.
fn next_run_after(now: DateTime<Utc>, run_at: NaiveTime, offset: FixedOffset) -> DateTime<Utc> {
    let local_now = now.with_timezone(&offset);
    let mut candidate = local_now.date_naive().and_time(run_at);
    if candidate <= local_now.naive_local() {
        candidate += Duration::days(1);
    }
    match offset.from_local_datetime(&candidate).single() {
        Some(target) => target.with_timezone(&Utc),
        // Fixed offsets are unambiguous; keep a sane fallback anyway
        None => now + Duration::days(1),
    }
}
