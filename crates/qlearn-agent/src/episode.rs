//! Episode outcomes and the training state machine

use serde::{Deserialize, Serialize};

use qlearn_core::StateId;

/// How a single training episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EpisodeOutcome {
    /// A goal state was reached
    Goal {
        /// Start state
        start: StateId,
        /// Goal state reached
        goal: StateId,
        /// Transitions taken, including the move into the goal
        steps: usize,
    },
    /// The walk hit a state with no reachable successor
    DeadEnd {
        /// Start state
        start: StateId,
        /// State where the walk stopped
        at: StateId,
        /// Transitions taken
        steps: usize,
    },
    /// The step budget ran out before reaching a goal
    Exhausted {
        /// Start state
        start: StateId,
        /// State where the walk stopped
        at: StateId,
        /// Transitions taken
        steps: usize,
    },
}

impl EpisodeOutcome {
    /// Check if the episode counts toward coverage
    #[must_use]
    pub fn reached_goal(&self) -> bool {
        matches!(self, Self::Goal { .. })
    }

    /// Number of transitions taken
    #[must_use]
    pub fn steps(&self) -> usize {
        match *self {
            Self::Goal { steps, .. } | Self::DeadEnd { steps, .. } | Self::Exhausted { steps, .. } => {
                steps
            }
        }
    }

    /// Start state of the episode
    #[must_use]
    pub fn start(&self) -> StateId {
        match *self {
            Self::Goal { start, .. } | Self::DeadEnd { start, .. } | Self::Exhausted { start, .. } => {
                start
            }
        }
    }
}

/// Lifecycle of a training run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrainingState {
    /// No training run yet
    #[default]
    Idle,
    /// Training in progress
    Running {
        /// Index of the current episode
        episode: usize,
    },
    /// Last run met the coverage threshold and produced a model
    Converged,
    /// Last run fell short of the coverage threshold
    Exhausted,
}

impl TrainingState {
    /// Check if the last run finished, with or without a model
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Converged | Self::Exhausted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_accessors() {
        let outcome = EpisodeOutcome::Exhausted { start: 4, at: 2, steps: 10 };
        assert!(!outcome.reached_goal());
        assert_eq!(outcome.steps(), 10);
        assert_eq!(outcome.start(), 4);
    }

    #[test]
    fn test_training_state_finished() {
        assert!(!TrainingState::default().is_finished());
        assert!(!TrainingState::Running { episode: 3 }.is_finished());
        assert!(TrainingState::Converged.is_finished());
        assert!(TrainingState::Exhausted.is_finished());
    }
}
