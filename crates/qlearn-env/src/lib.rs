//! Search-space problems for the Q-learning trainer
//!
//! This crate provides ready-made problems including:
//! - Linear chains and star graphs
//! - Grid worlds
//! - Problems with no path to the goal
//! - A registry to create them by name

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod classic;
pub mod problem;
pub mod registry;

// Re-export problems
pub use classic::{chain, dead_end, grid, star};
pub use problem::{Problem, ProblemConfig};
pub use registry::{list_problems, make_problem, ProblemRegistry};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{make_problem, Problem, ProblemConfig, ProblemRegistry};
    pub use qlearn_core::prelude::*;
}
