//! Reward and action-value table indexed by (from, to) state pairs

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{QLInput, RLError, Result, StateId};

/// Single cell of the policy table
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyEntry {
    /// Reward of the transition
    pub reward: f64,
    /// Transition probability
    pub probability: f64,
    /// Action value Q(from, to)
    pub value: f64,
}

impl PolicyEntry {
    /// Q-value weighted by the transition probability
    #[must_use]
    pub fn estimate(&self) -> f64 {
        self.value * self.probability
    }
}

/// Mutable table of rewards and Q-values
///
/// Pairs that were never registered read as zero. Only Q-values change after
/// construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    table: Array2<PolicyEntry>,
}

impl Policy {
    /// Build a policy for `num_states` states from edge records
    ///
    /// A later record for the same pair overwrites an earlier one.
    pub fn new(num_states: usize, input: &[QLInput]) -> Result<Self> {
        if num_states == 0 {
            return Err(RLError::InvalidConfig(
                "policy needs at least one state".to_string(),
            ));
        }

        let mut table = Array2::<PolicyEntry>::default((num_states, num_states));
        for edge in input {
            edge.validate(num_states)?;
            table[[edge.from, edge.to]] = PolicyEntry {
                reward: edge.reward,
                probability: edge.probability,
                value: 0.0,
            };
        }

        Ok(Self { table })
    }

    /// Number of states covered by the table
    #[must_use]
    pub fn num_states(&self) -> usize {
        self.table.nrows()
    }

    /// Entry for a pair, if it lies inside the table
    #[must_use]
    pub fn entry(&self, from: StateId, to: StateId) -> Option<&PolicyEntry> {
        self.table.get((from, to))
    }

    /// Reward for the edge (from, to), zero if never registered
    #[must_use]
    pub fn r(&self, from: StateId, to: StateId) -> f64 {
        self.entry(from, to).map_or(0.0, |e| e.reward)
    }

    /// Transition probability for the edge (from, to), zero if never registered
    #[must_use]
    pub fn p(&self, from: StateId, to: StateId) -> f64 {
        self.entry(from, to).map_or(0.0, |e| e.probability)
    }

    /// Q-value for the edge (from, to), zero if never set
    #[must_use]
    pub fn q(&self, from: StateId, to: StateId) -> f64 {
        self.entry(from, to).map_or(0.0, |e| e.value)
    }

    /// Q-value weighted by the transition probability
    #[must_use]
    pub fn expected_q(&self, from: StateId, to: StateId) -> f64 {
        self.entry(from, to).map_or(0.0, PolicyEntry::estimate)
    }

    /// Overwrite the Q-value for the edge (from, to)
    pub fn set_q(&mut self, from: StateId, to: StateId, value: f64) -> Result<()> {
        let size = self.num_states();
        let entry = self
            .table
            .get_mut((from, to))
            .ok_or(RLError::IndexOutOfRange { from, to, size })?;
        entry.value = value;
        Ok(())
    }

    /// Largest Q-value stored in the table
    #[must_use]
    pub fn max_q(&self) -> f64 {
        self.table
            .iter()
            .map(|e| e.value)
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (from, row) in self.table.outer_iter().enumerate() {
            let cells: Vec<String> = row
                .iter()
                .enumerate()
                .filter(|(_, e)| e.value != 0.0)
                .map(|(to, e)| format!("{to}:{:.4}", e.value))
                .collect();
            if !cells.is_empty() {
                writeln!(f, "{from:>4} | {}", cells.join(" "))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample_policy() -> Policy {
        let input = vec![
            QLInput::new(0, 1).with_reward(2.0).with_probability(0.5),
            QLInput::new(1, 2),
            QLInput::new(2, 3).with_reward(5.0),
        ];
        Policy::new(4, &input).unwrap()
    }

    #[test]
    fn test_registered_edges() {
        let policy = sample_policy();
        assert_eq!(policy.num_states(), 4);
        assert_eq!(policy.r(0, 1), 2.0);
        assert_eq!(policy.p(0, 1), 0.5);
        assert_eq!(policy.r(2, 3), 5.0);
        assert_eq!(policy.q(0, 1), 0.0);
    }

    #[test]
    fn test_unregistered_edges_are_zero() {
        let policy = sample_policy();
        assert_eq!(policy.r(1, 0), 0.0);
        assert_eq!(policy.q(3, 3), 0.0);
        assert_eq!(policy.r(9, 9), 0.0);
    }

    #[test]
    fn test_set_q_out_of_range() {
        let mut policy = sample_policy();
        let err = policy.set_q(4, 0, 1.0).unwrap_err();
        assert!(matches!(
            err,
            RLError::IndexOutOfRange { from: 4, to: 0, size: 4 }
        ));
    }

    #[test]
    fn test_expected_q_and_display() {
        let mut policy = sample_policy();
        policy.set_q(0, 1, 3.0).unwrap();
        assert_eq!(policy.expected_q(0, 1), 1.5);
        assert_eq!(policy.max_q(), 3.0);

        let rendered = policy.to_string();
        assert!(rendered.contains("1:3.0000"));
        assert_eq!(rendered.lines().count(), 1);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(Policy::new(0, &[]).is_err());
        assert!(Policy::new(3, &[QLInput::new(0, 3)]).is_err());
    }

    #[test]
    fn test_duplicate_edge_overwrites() {
        let input = vec![QLInput::new(0, 1).with_reward(1.0), QLInput::new(0, 1).with_reward(4.0)];
        let policy = Policy::new(3, &input).unwrap();
        assert_eq!(policy.r(0, 1), 4.0);
    }

    proptest! {
        #[test]
        fn prop_read_after_write(from in 0usize..6, to in 0usize..6, value in -1e6f64..1e6) {
            let mut policy = Policy::new(6, &[]).unwrap();
            policy.set_q(from, to, value).unwrap();
            prop_assert_eq!(policy.q(from, to), value);
            prop_assert_eq!(policy.r(from, to), 0.0);
        }
    }
}
