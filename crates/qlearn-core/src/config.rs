//! Training configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{RLError, Result};

/// Configuration for a Q-learning training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QLConfig {
    /// Learning rate, in (0, 1]
    pub alpha: f64,
    /// Discount factor, in (0, 1]
    pub gamma: f64,
    /// Maximum number of steps per episode
    pub episode_length: usize,
    /// Number of episodes per training run
    pub num_episodes: usize,
    /// Fraction of successful episodes required to accept the model, in [0, 1]
    pub min_coverage: f64,
    /// Largest id distance between two connected states
    pub neighbors: usize,
}

impl Default for QLConfig {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            gamma: 0.9,
            episode_length: 10,
            num_episodes: 50,
            min_coverage: 0.9,
            neighbors: usize::MAX,
        }
    }
}

impl QLConfig {
    /// Parse and validate a configuration from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a configuration from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check every parameter against its documented range
    pub fn validate(&self) -> Result<()> {
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(RLError::InvalidConfig(format!(
                "alpha {} outside (0, 1]",
                self.alpha
            )));
        }
        if !(self.gamma > 0.0 && self.gamma <= 1.0) {
            return Err(RLError::InvalidConfig(format!(
                "gamma {} outside (0, 1]",
                self.gamma
            )));
        }
        if self.episode_length == 0 {
            return Err(RLError::InvalidConfig(
                "episode_length must be positive".to_string(),
            ));
        }
        if self.num_episodes == 0 {
            return Err(RLError::InvalidConfig(
                "num_episodes must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.min_coverage) {
            return Err(RLError::InvalidConfig(format!(
                "min_coverage {} outside [0, 1]",
                self.min_coverage
            )));
        }
        if self.neighbors == 0 {
            return Err(RLError::InvalidConfig(
                "neighbors must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_is_valid() {
        assert!(QLConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = QLConfig::from_json_str(r#"{"alpha": 0.5, "num_episodes": 200}"#).unwrap();
        assert_eq!(config.alpha, 0.5);
        assert_eq!(config.num_episodes, 200);
        assert_eq!(config.gamma, 0.9);
    }

    #[test]
    fn test_out_of_range_parameters() {
        let cases = [
            QLConfig { alpha: 0.0, ..QLConfig::default() },
            QLConfig { alpha: 1.5, ..QLConfig::default() },
            QLConfig { gamma: f64::NAN, ..QLConfig::default() },
            QLConfig { episode_length: 0, ..QLConfig::default() },
            QLConfig { num_episodes: 0, ..QLConfig::default() },
            QLConfig { min_coverage: 1.01, ..QLConfig::default() },
            QLConfig { neighbors: 0, ..QLConfig::default() },
        ];
        for config in cases {
            assert!(matches!(config.validate(), Err(RLError::InvalidConfig(_))), "{config:?}");
        }
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"gamma": 0.5, "neighbors": 2}}"#).unwrap();
        let config = QLConfig::from_path(file.path()).unwrap();
        assert_eq!(config.gamma, 0.5);
        assert_eq!(config.neighbors, 2);

        assert!(matches!(
            QLConfig::from_json_str("{not json"),
            Err(RLError::Serialization(_))
        ));
    }
}
