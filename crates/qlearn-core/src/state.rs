//! States of the search graph

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Action;

/// Identifier of a state, unique within a search space
pub type StateId = usize;

/// Node of the search graph
///
/// A state carries its outgoing actions in input order and an opaque domain
/// property. Whether it is a goal is decided by the search space, not by the
/// state itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State<T> {
    /// State identifier
    pub id: StateId,
    /// Outgoing actions
    pub actions: Vec<Action>,
    /// Domain property
    pub property: T,
}

impl<T> State<T> {
    /// Create a state without outgoing actions
    pub fn new(id: StateId, property: T) -> Self {
        Self {
            id,
            actions: Vec::new(),
            property,
        }
    }

    /// Check if the state has any outgoing action
    #[must_use]
    pub fn has_actions(&self) -> bool {
        !self.actions.is_empty()
    }

    /// Iterate over the destination ids of the outgoing actions
    pub fn targets(&self) -> impl Iterator<Item = StateId> + '_ {
        self.actions.iter().map(|a| a.to)
    }
}

impl<T: fmt::Debug> fmt::Display for State<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "state {} ({:?})", self.id, self.property)?;
        if self.has_actions() {
            let targets: Vec<String> = self.targets().map(|t| t.to_string()).collect();
            write!(f, " -> [{}]", targets.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QLInput;

    #[test]
    fn test_display_lists_targets() {
        let mut state = State::new(2, 0.5);
        assert!(!state.has_actions());
        assert_eq!(state.to_string(), "state 2 (0.5)");

        state.actions.push(Action::from(QLInput::new(2, 3)));
        state.actions.push(Action::from(QLInput::new(2, 0)));
        assert_eq!(state.targets().collect::<Vec<_>>(), vec![3, 0]);
        assert_eq!(state.to_string(), "state 2 (0.5) -> [3, 0]");
    }
}
