//! Problem definitions: the raw parameters a trainer is built from

use serde::{Deserialize, Serialize};

use qlearn_core::{NeighborRule, Policy, QLInput, RLError, Result, SearchSpace, StateId};

/// Raw construction parameters of a search-space problem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem<T> {
    /// Number of states
    pub num_states: usize,
    /// Goal state ids
    pub goals: Vec<StateId>,
    /// Edges between states
    pub input: Vec<QLInput>,
    /// One domain property per state
    pub features: Vec<T>,
}

impl<T: Clone> Problem<T> {
    /// Build the search space and a fresh policy for this problem
    pub fn build<N>(&self, rule: N) -> Result<(SearchSpace<T>, Policy)>
    where
        N: NeighborRule + 'static,
    {
        let space = SearchSpace::new(self.features.clone(), &self.goals, &self.input, rule)?;
        let policy = Policy::new(self.num_states, &self.input)?;
        Ok((space, policy))
    }
}

/// Parameters handed to a problem builder
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProblemConfig {
    /// Number of states, for builders that take one
    pub num_states: usize,
    /// Reward on edges that make progress
    pub reward: f64,
    /// Builder-specific parameters
    #[serde(flatten)]
    pub params: serde_json::Map<String, serde_json::Value>,
}

impl Default for ProblemConfig {
    fn default() -> Self {
        Self {
            num_states: 4,
            reward: 1.0,
            params: serde_json::Map::new(),
        }
    }
}

impl ProblemConfig {
    /// Config with the given number of states and default reward
    #[must_use]
    pub fn with_states(num_states: usize) -> Self {
        Self {
            num_states,
            ..Self::default()
        }
    }

    /// Set a builder-specific parameter
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Read a required unsigned parameter
    pub fn usize_param(&self, key: &str) -> Result<usize> {
        self.params
            .get(key)
            .and_then(serde_json::Value::as_u64)
            .and_then(|v| usize::try_from(v).ok())
            .ok_or_else(|| {
                RLError::Environment(format!("missing or invalid parameter `{key}`"))
            })
    }
}
