//! MessagePack implementation of the agent repository.
//!
//! This adapter implements the AgentRepository port using rmp_serde for
//! compact binary serialization.

use std::{fs::File, path::Path};

use crate::{Result, error::Error, ports::AgentRepository, q_learning::SavedAgent};

/// MessagePack-based agent repository.
///
/// # Examples
///
/// ```no_run
/// use qlearner::adapters::MsgPackRepository;
/// use qlearner::ports::AgentRepository;
/// use qlearner::q_learning::{Hyperparameters, QLearnAgent, SavedAgent};
/// use std::path::Path;
///
/// let repo = MsgPackRepository;
/// let agent = QLearnAgent::new(Hyperparameters::default())?;
///
/// repo.save(&SavedAgent::from_agent(&agent), Path::new("agent.msgpack"))?;
/// let restored = repo.load(Path::new("agent.msgpack"))?.to_agent()?;
/// # Ok::<(), qlearner::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    /// Create a new MessagePack repository.
    pub fn new() -> Self {
        Self
    }
}

impl AgentRepository for MsgPackRepository {
    fn save(&self, agent: &SavedAgent, path: &Path) -> Result<()> {
        let mut file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;

        rmp_serde::encode::write(&mut file, agent).map_err(|e| Error::SerializationContext {
            operation: "serialize agent to MessagePack".to_string(),
            message: e.to_string(),
        })?;

        Ok(())
    }

    fn load(&self, path: &Path) -> Result<SavedAgent> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;

        let agent = rmp_serde::decode::from_read(&file).map_err(|e| Error::SerializationContext {
            operation: "deserialize agent from MessagePack".to_string(),
            message: e.to_string(),
        })?;

        Ok(agent)
    }
}
