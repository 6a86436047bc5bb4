//! Q-learning trainer
//!
//! Runs episodes of random-restart greedy search over a [`SearchSpace`],
//! updating the [`Policy`] with the temporal-difference rule
//!
//! `Q(s, s') += alpha * (R(s, s') + gamma * maxQ(s') - Q(s, s'))`
//!
//! and accepts the result as a [`QLModel`] when enough episodes reach a goal.

use chrono::Utc;
use metrics::{counter, gauge};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, info_span, trace};
use uuid::Uuid;

use qlearn_core::{
    BoundedDistance, Policy, QLConfig, QLInput, QLModel, RLError, Result, SearchSpace, State,
    StateId,
};

use crate::report::coverage;
use crate::{select_best, EpisodeOutcome, TrainingReport, TrainingState};

/// Result of a greedy rollout
#[derive(Debug, PartialEq)]
pub struct Prediction<'a, T> {
    /// State where the rollout stopped
    pub state: &'a State<T>,
    /// Transitions taken
    pub steps: usize,
}

/// Tabular Q-learning engine
#[derive(Debug)]
pub struct QLearning<T> {
    config: QLConfig,
    space: SearchSpace<T>,
    policy: Policy,
    model: Option<QLModel>,
    state: TrainingState,
}

impl<T> QLearning<T> {
    /// Create a trainer from a prebuilt search space and policy
    pub fn new(config: QLConfig, space: SearchSpace<T>, policy: Policy) -> Result<Self> {
        config.validate()?;
        if policy.num_states() != space.num_states() {
            return Err(RLError::DimensionMismatch {
                expected: space.num_states(),
                actual: policy.num_states(),
            });
        }

        Ok(Self {
            config,
            space,
            policy,
            model: None,
            state: TrainingState::Idle,
        })
    }

    /// Create a trainer from raw construction parameters
    ///
    /// The search space connects states whose ids differ by at most
    /// `config.neighbors`.
    pub fn from_input(
        config: QLConfig,
        num_states: usize,
        goals: &[StateId],
        input: &[QLInput],
        features: Vec<T>,
    ) -> Result<Self> {
        config.validate()?;
        if num_states <= 2 {
            return Err(RLError::InvalidConfig(format!(
                "num_states must be greater than 2, got {num_states}"
            )));
        }
        if goals.is_empty() {
            return Err(RLError::InvalidConfig("goals must not be empty".to_string()));
        }
        if input.is_empty() {
            return Err(RLError::InvalidConfig("input must not be empty".to_string()));
        }
        if features.is_empty() {
            return Err(RLError::InvalidConfig("features must not be empty".to_string()));
        }
        if features.len() != num_states {
            return Err(RLError::DimensionMismatch {
                expected: num_states,
                actual: features.len(),
            });
        }

        let space = SearchSpace::new(features, goals, input, BoundedDistance(config.neighbors))?;
        let policy = Policy::new(num_states, input)?;
        Self::new(config, space, policy)
    }

    /// Training configuration
    #[must_use]
    pub fn config(&self) -> &QLConfig {
        &self.config
    }

    /// Search space being explored
    #[must_use]
    pub fn space(&self) -> &SearchSpace<T> {
        &self.space
    }

    /// Current policy, including Q-values learned so far
    #[must_use]
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Model from the last training run, if it met the coverage threshold
    #[must_use]
    pub fn model(&self) -> Option<&QLModel> {
        self.model.as_ref()
    }

    /// Where the trainer is in its lifecycle
    #[must_use]
    pub fn state(&self) -> TrainingState {
        self.state
    }

    /// Run `num_episodes` episodes with randomness drawn from `rng`
    ///
    /// Q-values carry over between runs; the model is replaced by each run.
    pub fn train<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<TrainingReport> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let num_episodes = self.config.num_episodes;

        let span = info_span!("train", %run_id, num_episodes);
        let _guard = span.enter();
        info!(
            alpha = self.config.alpha,
            gamma = self.config.gamma,
            episode_length = self.config.episode_length,
            "training started"
        );

        self.model = None;
        let mut outcomes = Vec::with_capacity(num_episodes);
        for episode in 0..num_episodes {
            self.state = TrainingState::Running { episode };
            let outcome = self.run_episode(rng)?;
            debug!(episode, ?outcome, "episode finished");

            counter!("qlearn_episodes_total", 1);
            if outcome.reached_goal() {
                counter!("qlearn_episodes_completed", 1);
            }
            outcomes.push(outcome);
        }

        let completed = outcomes.iter().filter(|o| o.reached_goal()).count();
        let coverage = coverage(completed, num_episodes);
        gauge!("qlearn_coverage", coverage);

        if coverage >= self.config.min_coverage {
            self.model = Some(QLModel::new(self.policy.clone(), coverage));
            self.state = TrainingState::Converged;
            info!(completed, coverage, "training converged");
        } else {
            self.state = TrainingState::Exhausted;
            info!(
                completed,
                coverage,
                min_coverage = self.config.min_coverage,
                "coverage below threshold, no model"
            );
        }

        Ok(TrainingReport::new(
            run_id,
            started_at,
            outcomes,
            self.model.is_some(),
        ))
    }

    /// Run a training pass with a generator seeded from `seed`
    pub fn train_seeded(&mut self, seed: u64) -> Result<TrainingReport> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.train(&mut rng)
    }

    fn run_episode<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<EpisodeOutcome> {
        let space = &self.space;
        let policy = &mut self.policy;
        let QLConfig {
            alpha,
            gamma,
            episode_length,
            ..
        } = self.config;

        let start = space.init(rng);
        let mut current = start;
        let mut steps = 0;

        while steps < episode_length {
            let from = current.id;
            let Some(next) = select_best(space.next_states(current), |s| policy.r(from, s.id))
            else {
                return Ok(EpisodeOutcome::DeadEnd {
                    start: start.id,
                    at: from,
                    steps,
                });
            };

            if space.is_goal(next) {
                return Ok(EpisodeOutcome::Goal {
                    start: start.id,
                    goal: next.id,
                    steps: steps + 1,
                });
            }

            let r = policy.r(from, next.id);
            let q = policy.q(from, next.id);
            let updated = q + alpha * (r + gamma * space.max_q(next, policy) - q);
            policy.set_q(from, next.id, updated)?;
            trace!(from, to = next.id, q, updated, "q-value updated");

            current = next;
            steps += 1;
        }

        Ok(EpisodeOutcome::Exhausted {
            start: start.id,
            at: current.id,
            steps,
        })
    }

    /// Greedy rollout from `probe` using the trained model
    ///
    /// Follows the highest-reward successor for at most `episode_length`
    /// steps, stopping early at a state without successors (goals included).
    /// No learning happens and no randomness is involved.
    ///
    /// The probe must have at least one outgoing action. This checks the
    /// action list, not goal-set membership, so a goal that has actions is
    /// accepted (its rollout takes zero steps) and a non-goal dead end is
    /// rejected with [`RLError::InvalidState`].
    pub fn predict(&self, probe: &State<T>) -> Result<Prediction<'_, T>> {
        let model = self.model.as_ref().ok_or(RLError::ModelUnavailable)?;
        if !self.space.contains(probe) {
            return Err(RLError::InvalidState(format!(
                "state {} does not belong to the search space",
                probe.id
            )));
        }
        if !probe.has_actions() {
            return Err(RLError::InvalidState(format!(
                "state {} has no outgoing action",
                probe.id
            )));
        }

        let policy = &model.best_policy;
        let mut current = self
            .space
            .state(probe.id)
            .ok_or_else(|| RLError::InvalidState(format!("unknown state {}", probe.id)))?;
        let mut steps = 0;
        while steps < self.config.episode_length {
            let from = current.id;
            match select_best(self.space.next_states(current), |s| policy.r(from, s.id)) {
                Some(next) => {
                    current = next;
                    steps += 1;
                }
                None => break,
            }
        }

        debug!(probe = probe.id, reached = current.id, steps, "rollout finished");
        Ok(Prediction {
            state: current,
            steps,
        })
    }

    /// Greedy rollout from the state with id `id`
    pub fn predict_id(&self, id: StateId) -> Result<Prediction<'_, T>> {
        let probe = self
            .space
            .state(id)
            .ok_or_else(|| RLError::InvalidState(format!("unknown state {id}")))?;
        self.predict(probe)
    }
}
