//! Search space: the state graph, its goal states and its connectivity rule

use indexmap::IndexSet;
use rand::Rng;
use std::fmt;
use tracing::{debug, warn};

use crate::{Action, NeighborRule, Policy, QLInput, RLError, Result, State, StateId};

/// Smallest number of states a search space accepts
pub const MIN_STATES: usize = 3;

/// State graph explored by the trainer
///
/// Structure is fixed at construction; only the policy values change while
/// training.
pub struct SearchSpace<T> {
    states: Vec<State<T>>,
    goals: IndexSet<StateId>,
    starts: Vec<StateId>,
    rule: Box<dyn NeighborRule>,
}

impl<T> SearchSpace<T> {
    /// Build a search space from one feature per state and a list of edges
    pub fn new<N>(features: Vec<T>, goals: &[StateId], input: &[QLInput], rule: N) -> Result<Self>
    where
        N: NeighborRule + 'static,
    {
        let num_states = features.len();
        if num_states == 0 {
            return Err(RLError::InvalidConfig(
                "search space has no states".to_string(),
            ));
        }
        if num_states < MIN_STATES {
            return Err(RLError::InvalidConfig(format!(
                "search space needs more than {} states, got {num_states}",
                MIN_STATES - 1
            )));
        }
        if goals.is_empty() {
            return Err(RLError::InvalidConfig("goal set is empty".to_string()));
        }
        if let Some(&bad) = goals.iter().find(|&&g| g >= num_states) {
            return Err(RLError::InvalidConfig(format!(
                "goal state {bad} outside [0, {num_states})"
            )));
        }

        let goals: IndexSet<StateId> = goals.iter().copied().collect();
        let starts: Vec<StateId> = (0..num_states).filter(|id| !goals.contains(id)).collect();
        if starts.is_empty() {
            return Err(RLError::InvalidConfig(
                "every state is a goal, no episode can start".to_string(),
            ));
        }

        let mut states: Vec<State<T>> = features
            .into_iter()
            .enumerate()
            .map(|(id, property)| State::new(id, property))
            .collect();
        for edge in input {
            edge.validate(num_states)?;
            states[edge.from].actions.push(Action::from(edge));
        }

        for id in &starts {
            if !states[*id].has_actions() {
                warn!(state = *id, "non-goal state has no outgoing action");
            }
        }
        debug!(
            num_states,
            goals = goals.len(),
            edges = input.len(),
            "search space built"
        );

        Ok(Self {
            states,
            goals,
            starts,
            rule: Box::new(rule),
        })
    }

    /// Build a search space whose actions link every admissible pair of states
    ///
    /// Goal states get no outgoing actions. Returns the generated edges too, so
    /// a matching policy can be built from them.
    pub fn from_neighbors<N>(
        features: Vec<T>,
        goals: &[StateId],
        rule: N,
        reward: f64,
    ) -> Result<(Self, Vec<QLInput>)>
    where
        N: NeighborRule + 'static,
    {
        let num_states = features.len();
        let input: Vec<QLInput> = (0..num_states)
            .filter(|from| !goals.contains(from))
            .flat_map(|from| {
                (0..num_states)
                    .filter(move |&to| to != from)
                    .map(move |to| (from, to))
            })
            .filter(|&(from, to)| rule.connects(from, to))
            .map(|(from, to)| QLInput::new(from, to).with_reward(reward))
            .collect();

        let space = Self::new(features, goals, &input, rule)?;
        Ok((space, input))
    }

    /// Number of states
    #[must_use]
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// All states, indexed by id
    #[must_use]
    pub fn states(&self) -> &[State<T>] {
        &self.states
    }

    /// State with the given id
    #[must_use]
    pub fn state(&self, id: StateId) -> Option<&State<T>> {
        self.states.get(id)
    }

    /// Goal state ids, in the order they were given
    #[must_use]
    pub fn goals(&self) -> &IndexSet<StateId> {
        &self.goals
    }

    /// Check if a state is a goal
    #[must_use]
    pub fn is_goal(&self, state: &State<T>) -> bool {
        self.is_goal_id(state.id)
    }

    /// Check if a state id is a goal
    #[must_use]
    pub fn is_goal_id(&self, id: StateId) -> bool {
        self.goals.contains(&id)
    }

    /// Check if a state belongs to this space
    #[must_use]
    pub fn contains(&self, state: &State<T>) -> bool {
        self.state(state.id)
            .is_some_and(|own| own.actions == state.actions)
    }

    /// States reachable from `state` through its actions and the neighbor rule
    ///
    /// Results follow the order of the state's action list. Goal states and
    /// states without actions have no successors.
    #[must_use]
    pub fn next_states(&self, state: &State<T>) -> Vec<&State<T>> {
        if self.is_goal(state) {
            return Vec::new();
        }
        state
            .actions
            .iter()
            .filter(|a| self.rule.connects(state.id, a.to))
            .filter_map(|a| self.states.get(a.to))
            .collect()
    }

    /// Uniformly random non-goal state
    pub fn init<R: Rng + ?Sized>(&self, rng: &mut R) -> &State<T> {
        let pick = rng.gen_range(0..self.starts.len());
        &self.states[self.starts[pick]]
    }

    /// Largest Q-value over the successors of `state`, zero without successors
    #[must_use]
    pub fn max_q(&self, state: &State<T>, policy: &Policy) -> f64 {
        self.next_states(state)
            .into_iter()
            .map(|next| policy.q(state.id, next.id))
            .reduce(f64::max)
            .unwrap_or(0.0)
    }
}

impl<T: fmt::Debug> fmt::Debug for SearchSpace<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchSpace")
            .field("states", &self.states)
            .field("goals", &self.goals)
            .finish_non_exhaustive()
    }
}
