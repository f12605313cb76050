//! Dependency injection container for the agent application.
//!
//! The container owns infrastructure dependencies and provides factory
//! methods for creating domain objects.

use std::{path::Path, sync::Arc};

use super::config::AgentConfig;
use crate::{
    Result,
    adapters::MsgPackRepository,
    ports::AgentRepository,
    q_learning::{QLearnAgent, SavedAgent},
};

/// Application with dependency injection.
///
/// # Examples
///
/// ## Production usage
///
/// ```
/// use qlearner::app::{App, AgentConfig};
///
/// let app = App::new();
/// let agent = app.create_agent(AgentConfig::default().with_seed(42))?;
/// assert_eq!(agent.num_training(), 10);
/// # Ok::<(), qlearner::Error>(())
/// ```
///
/// ## Testing with dependency injection
///
/// ```
/// use qlearner::app::App;
/// use qlearner::adapters::InMemoryRepository;
///
/// let app = App::for_testing()
///     .with_repository(InMemoryRepository::new())
///     .with_default_seed(42)
///     .build();
/// ```
pub struct App {
    /// Repository for agent persistence
    agent_repository: Arc<dyn AgentRepository + Send + Sync>,
    /// Default random seed (None = non-deterministic)
    default_seed: Option<u64>,
}

impl App {
    /// Create a new app with production defaults.
    ///
    /// Uses `MsgPackRepository` and no default seed.
    pub fn new() -> Self {
        Self {
            agent_repository: Arc::new(MsgPackRepository::new()),
            default_seed: None,
        }
    }

    /// Create a builder for constructing app with custom dependencies.
    pub fn for_testing() -> AppBuilder {
        AppBuilder::new()
    }

    /// Get the agent repository.
    pub fn agent_repository(&self) -> Arc<dyn AgentRepository + Send + Sync> {
        Arc::clone(&self.agent_repository)
    }

    /// Create a new agent with the given configuration.
    ///
    /// The config seed wins over the container default.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] when the configured
    /// rates are out of range.
    pub fn create_agent(&self, config: AgentConfig) -> Result<QLearnAgent> {
        let params = config.hyperparameters()?;
        let mut agent = QLearnAgent::new(params)?.with_debug(config.debug);

        if let Some(seed) = config.seed.or(self.default_seed) {
            agent = agent.with_seed(seed);
        }

        Ok(agent)
    }

    /// Load an agent from persistent storage.
    ///
    /// The stored seed is kept; the container default only applies when the
    /// snapshot has none.
    ///
    /// ```no_run
    /// use qlearner::app::App;
    /// use std::path::Path;
    ///
    /// let app = App::new();
    /// let agent = app.load_agent(Path::new("trained_agent.msgpack"))?;
    /// # Ok::<(), qlearner::Error>(())
    /// ```
    pub fn load_agent(&self, path: &Path) -> Result<QLearnAgent> {
        let agent = self.agent_repository.load(path)?.to_agent()?;

        match (agent.rng_seed(), self.default_seed) {
            (None, Some(seed)) => Ok(agent.with_seed(seed)),
            _ => Ok(agent),
        }
    }

    /// Save an agent to persistent storage.
    pub fn save_agent(&self, agent: &QLearnAgent, path: &Path) -> Result<()> {
        self.agent_repository
            .save(&SavedAgent::from_agent(agent), path)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing app with custom dependencies.
///
/// Primarily used for testing to inject in-memory repositories and control
/// randomness.
pub struct AppBuilder {
    agent_repository: Option<Arc<dyn AgentRepository + Send + Sync>>,
    default_seed: Option<u64>,
}

impl AppBuilder {
    /// Create a new app builder.
    pub fn new() -> Self {
        Self {
            agent_repository: None,
            default_seed: None,
        }
    }

    /// Set a custom agent repository.
    pub fn with_repository<R: AgentRepository + Send + Sync + 'static>(mut self, repo: R) -> Self {
        self.agent_repository = Some(Arc::new(repo));
        self
    }

    /// Set a default random seed for all agents created by this container.
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    /// Build the app with the configured dependencies.
    ///
    /// If no repository was specified, uses `MsgPackRepository` by default.
    pub fn build(self) -> App {
        App {
            agent_repository: self
                .agent_repository
                .unwrap_or_else(|| Arc::new(MsgPackRepository::new())),
            default_seed: self.default_seed,
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{adapters::InMemoryRepository, error::Error};

    #[test]
    fn test_app_creates_agent() {
        let app = App::new();
        let agent = app.create_agent(AgentConfig::default()).unwrap();
        assert_eq!(agent.alpha(), 0.2);
        assert_eq!(agent.episodes_so_far(), 0);
    }

    #[test]
    fn test_app_rejects_invalid_config() {
        let app = App::new();
        let result = app.create_agent(AgentConfig::default().with_epsilon(-1.0));
        assert!(matches!(result, Err(Error::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_app_applies_seed() {
        let app = App::for_testing().with_default_seed(42).build();
        let agent = app.create_agent(AgentConfig::default()).unwrap();
        assert_eq!(agent.rng_seed(), Some(42));
    }

    #[test]
    fn test_config_seed_overrides_app_default() {
        let app = App::for_testing().with_default_seed(42).build();
        let agent = app
            .create_agent(AgentConfig::default().with_seed(123))
            .unwrap();
        assert_eq!(agent.rng_seed(), Some(123));
    }

    #[test]
    fn test_save_and_load_through_repository() {
        let repo = InMemoryRepository::new();
        let app = App::for_testing().with_repository(repo.clone()).build();
        let agent = app
            .create_agent(AgentConfig::default().with_num_training(3).with_debug(true))
            .unwrap();

        app.save_agent(&agent, Path::new("agent")).unwrap();
        assert_eq!(repo.count(), 1);

        let loaded = app.load_agent(Path::new("agent")).unwrap();
        assert_eq!(loaded.num_training(), 3);
        assert!(loaded.is_debug());
    }
}
