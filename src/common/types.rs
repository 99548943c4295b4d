//! Run-scoped result types shared by the pipeline, scheduler and HTTP server

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Summary of one full fetch → select → format → deliver run.
///
/// Built fresh for every run and pushed into [`RunHistory`] afterwards,
/// so no module-level state survives between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// Number of game records returned by the odds provider
    pub games_fetched: usize,
    /// Number of picks selected from those records
    pub picks_selected: usize,
    /// Messages accepted by the messaging platform
    pub messages_sent: usize,
    /// Messages the platform rejected or that failed in transit
    pub messages_failed: usize,
    /// Rendered parlay message, when the run produced one
    pub parlay_text: Option<String>,
    /// Error string when the odds fetch aborted the run early
    pub fetch_error: Option<String>,
}

impl RunReport {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            games_fetched: 0,
            picks_selected: 0,
            messages_sent: 0,
            messages_failed: 0,
            parlay_text: None,
            fetch_error: None,
        }
    }
}

/// Bounded append-only store of recent run reports.
///
/// Oldest reports are dropped once the capacity is reached.
#[derive(Debug)]
pub struct RunHistory {
    reports: VecDeque<RunReport>,
    capacity: usize,
}

impl RunHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            reports: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, report: RunReport) {
        if self.reports.len() == self.capacity {
            self.reports.pop_front();
        }
        self.reports.push_back(report);
    }

    /// Most recently recorded report
    pub fn latest(&self) -> Option<&RunReport> {
        self.reports.back()
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_with_picks(picks: usize) -> RunReport {
        let mut report = RunReport::new(Utc::now());
        report.picks_selected = picks;
        report
    }

    #[test]
    fn test_history_retains_most_recent() {
        let mut history = RunHistory::new(2);
        history.push(report_with_picks(1));
        history.push(report_with_picks(2));
        history.push(report_with_picks(3));

        assert_eq!(history.len(), 2);
        assert_eq!(history.latest().unwrap().picks_selected, 3);
    }

    #[test]
    fn test_empty_history() {
        let history = RunHistory::new(5);
        assert!(history.is_empty());
        assert!(history.latest().is_none());
    }

    #[test]
    fn test_zero_capacity_still_stores_one() {
        let mut history = RunHistory::new(0);
        history.push(report_with_picks(1));
        assert_eq!(history.len(), 1);
    }
}
