//! In-memory agent repository for testing.
//!
//! This adapter keeps serialized agents in a shared map, so tests can exercise
//! save/load paths without touching the file system.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{Result, error::Error, ports::AgentRepository, q_learning::SavedAgent};

/// In-memory repository for testing.
///
/// Agents are stored as MessagePack bytes keyed by path, so a round trip goes
/// through the same serialization as [`super::MsgPackRepository`].
///
/// # Examples
///
/// ```
/// use qlearner::adapters::InMemoryRepository;
/// use qlearner::ports::AgentRepository;
/// use qlearner::q_learning::{Hyperparameters, QLearnAgent, SavedAgent};
/// use std::path::Path;
///
/// let repo = InMemoryRepository::new();
/// let agent = QLearnAgent::new(Hyperparameters::default())?;
///
/// repo.save(&SavedAgent::from_agent(&agent), Path::new("checkpoint"))?;
/// let loaded = repo.load(Path::new("checkpoint"))?;
/// assert_eq!(loaded.episodes_so_far(), 0);
/// # Ok::<(), qlearner::Error>(())
/// ```
///
/// # Thread Safety
///
/// Clones share the same underlying storage.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of agents currently stored.
    pub fn count(&self) -> usize {
        self.storage().len()
    }

    /// Clear all stored agents.
    pub fn clear(&self) {
        self.storage().clear();
    }

    /// Check if an agent exists at the given path.
    pub fn contains(&self, path: &Path) -> bool {
        self.storage().contains_key(&key(path))
    }

    fn storage(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.storage.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn key(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

impl AgentRepository for InMemoryRepository {
    fn save(&self, agent: &SavedAgent, path: &Path) -> Result<()> {
        let bytes = rmp_serde::to_vec(agent).map_err(|e| Error::SerializationContext {
            operation: "serialize agent for in-memory storage".to_string(),
            message: e.to_string(),
        })?;

        self.storage().insert(key(path), bytes);
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<SavedAgent> {
        let storage = self.storage();

        let bytes = storage.get(&key(path)).ok_or_else(|| Error::Io {
            operation: format!("load agent from in-memory storage at {path:?}"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "key not found in memory"),
        })?;

        rmp_serde::from_slice(bytes).map_err(|e| Error::SerializationContext {
            operation: "deserialize agent from in-memory storage".to_string(),
            message: e.to_string(),
        })
    }
}
