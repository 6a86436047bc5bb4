//! Problem registry for creating problems by name

use std::collections::HashMap;
use tracing::debug;

use qlearn_core::{RLError, Result};

use crate::{classic, Problem, ProblemConfig};

type ProblemConstructor = Box<dyn Fn(&ProblemConfig) -> Result<Problem<f64>> + Send + Sync>;

lazy_static::lazy_static! {
    static ref BUILTINS: ProblemRegistry = ProblemRegistry::with_builtins();
}

/// Named problem builders
pub struct ProblemRegistry {
    /// Registered builders
    problems: HashMap<String, ProblemConstructor>,
}

impl ProblemRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            problems: HashMap::new(),
        }
    }

    /// Create a registry holding the classic problems
    ///
    /// `grid` reads its dimensions from the `rows` and `cols` parameters.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("chain", |config| {
            classic::chain(config.num_states, config.reward)
        });
        registry.register("star", |config| {
            classic::star(config.num_states, config.reward)
        });
        registry.register("dead-end", |config| classic::dead_end(config.num_states));
        registry.register("grid", |config| {
            classic::grid(
                config.usize_param("rows")?,
                config.usize_param("cols")?,
                config.reward,
            )
        });
        registry
    }

    /// Register a problem builder, replacing any builder with the same name
    pub fn register<F>(&mut self, name: impl Into<String>, constructor: F)
    where
        F: Fn(&ProblemConfig) -> Result<Problem<f64>> + Send + Sync + 'static,
    {
        self.problems.insert(name.into(), Box::new(constructor));
    }

    /// Create a problem by name
    pub fn make(&self, name: &str, config: &ProblemConfig) -> Result<Problem<f64>> {
        let constructor = self
            .problems
            .get(name)
            .ok_or_else(|| RLError::Environment(format!("Unknown problem: {name}")))?;
        let problem = constructor(config)?;
        debug!(
            name,
            num_states = problem.num_states,
            edges = problem.input.len(),
            "problem built"
        );
        Ok(problem)
    }

    /// List registered problems, sorted by name
    #[must_use]
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.problems.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for ProblemRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Create one of the built-in problems by name
pub fn make_problem(name: &str, config: &ProblemConfig) -> Result<Problem<f64>> {
    BUILTINS.make(name, config)
}

/// List the built-in problems
#[must_use]
pub fn list_problems() -> Vec<String> {
    BUILTINS.list()
}

#[cfg(test)]
mod tests {
    use super::*;
    use qlearn_core::Unbounded;

    #[test]
    fn test_builtins() {
        assert_eq!(list_problems(), vec!["chain", "dead-end", "grid", "star"]);

        let problem = make_problem("chain", &ProblemConfig::with_states(6)).unwrap();
        assert_eq!(problem.num_states, 6);

        let config = ProblemConfig::default().param("rows", 3).param("cols", 4);
        let problem = make_problem("grid", &config).unwrap();
        assert_eq!(problem.num_states, 12);
        let (space, policy) = problem.build(Unbounded).unwrap();
        assert_eq!(space.num_states(), policy.num_states());
    }

    #[test]
    fn test_unknown_problem_and_missing_params() {
        assert!(matches!(
            make_problem("cartpole", &ProblemConfig::default()),
            Err(RLError::Environment(_))
        ));
        assert!(matches!(
            make_problem("grid", &ProblemConfig::default()),
            Err(RLError::Environment(_))
        ));
    }

    #[test]
    fn test_custom_registration() {
        let mut registry = ProblemRegistry::new();
        registry.register("tiny-chain", |_| classic::chain(3, 1.0));
        assert_eq!(registry.list(), vec!["tiny-chain"]);
        assert_eq!(registry.make("tiny-chain", &ProblemConfig::default()).unwrap().goals, vec![2]);
    }

    #[test]
    fn test_config_from_json() {
        let config: ProblemConfig =
            serde_json::from_str(r#"{"reward": 2.5, "rows": 2, "cols": 2}"#).unwrap();
        assert_eq!(config.num_states, 4);
        assert_eq!(config.usize_param("rows").unwrap(), 2);
        let problem = make_problem("grid", &config).unwrap();
        assert!(problem.input.iter().any(|e| e.reward == 2.5));
    }
}
