//! Core types for tabular Q-learning
//!
//! This crate provides the search space (states, actions, goal set and
//! connectivity rule), the policy table of rewards and Q-values, the training
//! configuration and the trained model.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod action;
pub mod config;
pub mod error;
pub mod model;
pub mod neighbors;
pub mod policy;
pub mod space;
pub mod state;

// Re-export core types
pub use action::{Action, QLInput};
pub use config::QLConfig;
pub use error::{RLError, Result};
pub use model::QLModel;
pub use neighbors::{BoundedDistance, NeighborRule, Unbounded};
pub use policy::{Policy, PolicyEntry};
pub use space::{SearchSpace, MIN_STATES};
pub use state::{State, StateId};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Action, BoundedDistance, NeighborRule, Policy, QLConfig, QLInput, QLModel, Result,
        SearchSpace, State, StateId,
    };
}
