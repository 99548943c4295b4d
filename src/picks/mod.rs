//! Pick selection
//!
//! Turns the provider's untrusted game records into a bounded, ordered
//! sequence of [`Pick`]s. Which outcome of a game gets recommended is
//! delegated to a [`PickStrategy`], so the uniform-random default can be
//! swapped for a real scoring model without touching the selector.

pub mod selector;
pub mod strategy;
pub mod types;

pub use selector::PickSelector;
pub use strategy::{BoxedPickStrategy, PickStrategy, UniformRandomStrategy};
pub use types::{Parlay, Pick};
