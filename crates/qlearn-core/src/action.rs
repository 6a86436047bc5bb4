//! Actions (directed edges between states) and the edge records they are built from

use serde::{Deserialize, Serialize};

use crate::{RLError, Result, StateId};

fn default_reward() -> f64 {
    1.0
}

fn default_probability() -> f64 {
    1.0
}

/// Edge record used to build a search space and its policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QLInput {
    /// Source state id
    pub from: StateId,
    /// Destination state id
    pub to: StateId,
    /// Reward for taking the edge
    #[serde(default = "default_reward")]
    pub reward: f64,
    /// Transition probability
    #[serde(default = "default_probability")]
    pub probability: f64,
}

impl QLInput {
    /// Create an edge record with the default reward and probability
    #[must_use]
    pub fn new(from: StateId, to: StateId) -> Self {
        Self {
            from,
            to,
            reward: default_reward(),
            probability: default_probability(),
        }
    }

    /// Set the reward
    #[must_use]
    pub fn with_reward(mut self, reward: f64) -> Self {
        self.reward = reward;
        self
    }

    /// Set the transition probability
    #[must_use]
    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = probability;
        self
    }

    /// Check the record against a space of `num_states` states
    pub fn validate(&self, num_states: usize) -> Result<()> {
        if self.from >= num_states || self.to >= num_states {
            return Err(RLError::InvalidAction(format!(
                "edge {} -> {} references a state outside [0, {num_states})",
                self.from, self.to
            )));
        }
        if !self.reward.is_finite() {
            return Err(RLError::InvalidAction(format!(
                "edge {} -> {} has non-finite reward {}",
                self.from, self.to, self.reward
            )));
        }
        if !(0.0..=1.0).contains(&self.probability) {
            return Err(RLError::InvalidAction(format!(
                "edge {} -> {} has probability {} outside [0, 1]",
                self.from, self.to, self.probability
            )));
        }
        Ok(())
    }
}

/// Directed edge from one state to another
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Source state id
    pub from: StateId,
    /// Destination state id
    pub to: StateId,
    /// Reward attached to the transition
    pub reward: f64,
    /// Transition probability, not used by the update rule
    pub probability: f64,
}

impl Action {
    /// Create an action with the default reward and probability
    #[must_use]
    pub fn new(from: StateId, to: StateId) -> Self {
        QLInput::new(from, to).into()
    }
}

impl From<QLInput> for Action {
    fn from(input: QLInput) -> Self {
        Self {
            from: input.from,
            to: input.to,
            reward: input.reward,
            probability: input.probability,
        }
    }
}

impl From<&QLInput> for Action {
    fn from(input: &QLInput) -> Self {
        Self::from(*input)
    }
}
