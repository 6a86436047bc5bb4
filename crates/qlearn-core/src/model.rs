//! Trained model

use serde::{Deserialize, Serialize};

use crate::Policy;

/// Outcome of a training run that met its coverage threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QLModel {
    /// Policy learned during training
    pub best_policy: Policy,
    /// Fraction of episodes that reached a goal
    pub coverage: f64,
}

impl QLModel {
    /// Create a new model
    #[must_use]
    pub fn new(best_policy: Policy, coverage: f64) -> Self {
        Self {
            best_policy,
            coverage,
        }
    }
}
