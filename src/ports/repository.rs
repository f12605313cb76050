//! Repository port for agent persistence.
//!
//! The agent keeps its table in memory only; storing it between processes is
//! left to implementations of this trait.

use std::path::Path;

use crate::{Result, q_learning::SavedAgent};

/// Port for persisting and loading saved agents.
///
/// # Examples
///
/// ```no_run
/// use qlearner::ports::AgentRepository;
/// use qlearner::q_learning::SavedAgent;
/// use std::path::Path;
///
/// fn checkpoint<R: AgentRepository>(
///     repo: &R,
///     saved: &SavedAgent,
///     path: &Path,
/// ) -> qlearner::Result<()> {
///     repo.save(saved, path)
/// }
/// ```
pub trait AgentRepository {
    /// Save an agent snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the destination cannot be written or
    /// serialization fails.
    fn save(&self, agent: &SavedAgent, path: &Path) -> Result<()>;

    /// Load an agent snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is stored at `path` or the stored bytes
    /// cannot be decoded.
    fn load(&self, path: &Path) -> Result<SavedAgent>;
}
