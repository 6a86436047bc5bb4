//! Q-learning agent for search-space problems
//!
//! This crate provides the episodic trainer built on `qlearn-core`:
//! - Temporal-difference updates over a greedy random-restart walk
//! - Coverage tracking and model acceptance
//! - Deterministic greedy rollout on a trained model

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod episode;
pub mod report;
pub mod select;
pub mod trainer;

// Re-export the trainer
pub use trainer::{Prediction, QLearning};

// Re-export utilities
pub use episode::{EpisodeOutcome, TrainingState};
pub use report::TrainingReport;
pub use select::select_best;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{EpisodeOutcome, Prediction, QLearning, TrainingReport, TrainingState};
    pub use qlearn_core::prelude::*;
}
