//! Connectivity rules restricting which states are reachable from a state

use serde::{Deserialize, Serialize};

use crate::StateId;

/// Decides whether a transition between two states is admissible
pub trait NeighborRule: Send + Sync {
    /// Check if `to` is a neighbor of `from`
    fn connects(&self, from: StateId, to: StateId) -> bool;
}

/// States are neighbors when their ids differ by at most `radius`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundedDistance(pub usize);

impl NeighborRule for BoundedDistance {
    fn connects(&self, from: StateId, to: StateId) -> bool {
        from.abs_diff(to) <= self.0
    }
}

/// Every pair of states is connected
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unbounded;

impl NeighborRule for Unbounded {
    fn connects(&self, _from: StateId, _to: StateId) -> bool {
        true
    }
}

impl<F> NeighborRule for F
where
    F: Fn(StateId, StateId) -> bool + Send + Sync,
{
    fn connects(&self, from: StateId, to: StateId) -> bool {
        self(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded_distance() {
        let rule = BoundedDistance(2);
        assert!(rule.connects(3, 5));
        assert!(rule.connects(5, 3));
        assert!(!rule.connects(0, 3));
        assert!(BoundedDistance(usize::MAX).connects(0, usize::MAX));
    }

    #[test]
    fn test_closure_rule() {
        let forward_only = |from: StateId, to: StateId| to > from;
        assert!(forward_only.connects(1, 2));
        assert!(!forward_only.connects(2, 1));
        assert!(Unbounded.connects(7, 0));
    }
}
