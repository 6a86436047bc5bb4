//! Error types for the Q-learning core library

use thiserror::Error;

use crate::StateId;

/// Core error type for Q-learning operations
#[derive(Error, Debug)]
pub enum RLError {
    /// Invalid training or search-space configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Malformed edge record
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// State not acceptable for the requested operation
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Dimension mismatch
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Size the operation required
        expected: usize,
        /// Size that was supplied
        actual: usize,
    },

    /// Policy table access outside its bounds
    #[error("Index out of range: ({from}, {to}) in a {size}x{size} policy")]
    IndexOutOfRange {
        /// Row of the rejected access
        from: StateId,
        /// Column of the rejected access
        to: StateId,
        /// Number of states in the policy
        size: usize,
    },

    /// Prediction requested before a model was trained
    #[error("No trained model available")]
    ModelUnavailable,

    /// Problem builder errors
    #[error("Environment error: {0}")]
    Environment(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl RLError {
    /// Check whether this error was raised while validating configuration
    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfig(_) | Self::InvalidAction(_) | Self::DimensionMismatch { .. }
        )
    }
}

/// Result type alias for Q-learning operations
pub type Result<T> = std::result::Result<T, RLError>;
