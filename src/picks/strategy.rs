//! Pluggable pick selection strategies

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::oddsapi::messages::OutcomeRecord;

/// Decides which outcome of a game to recommend and what confidence
/// figure to attach.
///
/// The selector calls `choose_outcome` once per game, so the same
/// outcome is never drawn twice for one game within a run. Implementors
/// own whatever internal state they need (an RNG here, a model
/// elsewhere).
pub trait PickStrategy: Send + Sync {
    /// Strategy identifier used in logs
    fn name(&self) -> &str;

    /// Index of the outcome to recommend, or `None` to skip the game
    fn choose_outcome(&mut self, outcomes: &[OutcomeRecord]) -> Option<usize>;

    /// Confidence percentage attached to the resulting pick
    fn confidence(&mut self) -> u8;
}

/// Boxed strategy for dynamic dispatch
pub type BoxedPickStrategy = Box<dyn PickStrategy>;

/// Uniform random selection.
///
/// Each call is an independent draw; the confidence figure is drawn from
/// a fixed range and carries no real signal.
pub struct UniformRandomStrategy {
    rng: StdRng,
    confidence_min: u8,
    confidence_max: u8,
}

impl UniformRandomStrategy {
    pub fn new(confidence_min: u8, confidence_max: u8) -> Self {
        Self::with_rng(StdRng::from_entropy(), confidence_min, confidence_max)
    }

    /// Construct with a caller-supplied RNG (seeded in tests)
    pub fn with_rng(rng: StdRng, confidence_min: u8, confidence_max: u8) -> Self {
        Self {
            rng,
            confidence_min: confidence_min.min(confidence_max),
            confidence_max: confidence_min.max(confidence_max),
        }
    }
}

impl PickStrategy for UniformRandomStrategy {
    fn name(&self) -> &str {
        "uniform_random"
    }

    fn choose_outcome(&mut self, outcomes: &[OutcomeRecord]) -> Option<usize> {
        if outcomes.is_empty() {
            None
        } else {
            Some(self.rng.gen_range(0..outcomes.len()))
        }
    }

    fn confidence(&mut self) -> u8 {
        self.rng.gen_range(self.confidence_min..=self.confidence_max)
    }
}
