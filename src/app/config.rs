//! Configuration types for agent creation.

use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    error::Error,
    q_learning::Hyperparameters,
};

/// Configuration for creating a Q-learning agent.
///
/// Every field can be set independently, either through the builder methods
/// or by deserializing a JSON document (missing fields take their defaults).
///
/// # Examples
///
/// ```
/// use qlearner::app::AgentConfig;
///
/// let config = AgentConfig::default()
///     .with_alpha(0.5)
///     .with_epsilon(0.1)
///     .with_num_training(200)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Learning rate α
    pub alpha: f64,
    /// Exploration rate ε
    pub epsilon: f64,
    /// Discount factor γ
    pub gamma: f64,
    /// Episodes to train before freezing the policy
    pub num_training: usize,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
    /// Emit per-turn debug diagnostics
    pub debug: bool,
}

impl AgentConfig {
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    pub fn with_num_training(mut self, num_training: usize) -> Self {
        self.num_training = num_training;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Validated hyperparameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for out-of-range rates.
    pub fn hyperparameters(&self) -> Result<Hyperparameters> {
        Hyperparameters::new(self.alpha, self.epsilon, self.gamma, self.num_training)
    }

    pub fn validate(&self) -> Result<()> {
        self.hyperparameters().map(|_| ())
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open config {path:?}"),
            source,
        })?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        let params = Hyperparameters::default();
        Self {
            alpha: params.alpha,
            epsilon: params.epsilon,
            gamma: params.gamma,
            num_training: params.num_training,
            seed: None,
            debug: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AgentConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.hyperparameters().unwrap(), Hyperparameters::default());
    }

    #[test]
    fn test_out_of_range_rates_are_rejected() {
        assert!(AgentConfig::default().with_alpha(-0.5).validate().is_err());
        assert!(AgentConfig::default().with_epsilon(1.2).validate().is_err());
        assert!(AgentConfig::default().with_gamma(-0.1).validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "alpha": 0.4, "num_training": 50, "seed": 3 }}"#).unwrap();

        let config = AgentConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.alpha, 0.4);
        assert_eq!(config.num_training, 50);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.epsilon, Hyperparameters::DEFAULT_EPSILON);
        assert_eq!(config.gamma, Hyperparameters::DEFAULT_GAMMA);
        assert!(!config.debug);
    }

    #[test]
    fn test_invalid_json_config_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "epsilon": 2.0 }}"#).unwrap();
        assert!(matches!(
            AgentConfig::from_json_file(file.path()),
            Err(Error::InvalidConfiguration { .. })
        ));
    }
}
