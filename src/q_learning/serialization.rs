//! Serialization support for Q-learning agents.

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    q_learning::{
        agent::{AgentState, QLearnAgent},
        q_table::{QTable, TableEntry},
    },
};

/// Versioned snapshot of an agent: hyperparameters, counters and table.
///
/// The in-flight transition is not part of the snapshot; a restored agent
/// always starts awaiting the first move of an episode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedAgent {
    pub version: u32,
    state: AgentState,
    table: Vec<TableEntry>,
}

impl SavedAgent {
    pub const VERSION: u32 = 1;

    pub fn from_agent(agent: &QLearnAgent) -> Self {
        Self {
            version: Self::VERSION,
            state: agent.export_state(),
            table: agent.q_table().entries(),
        }
    }

    /// Rebuild the agent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedVersion`] for snapshots written by another
    /// format version, and [`Error::InvalidConfiguration`] if the stored
    /// hyperparameters are out of range.
    pub fn to_agent(&self) -> Result<QLearnAgent> {
        if self.version != Self::VERSION {
            return Err(Error::UnsupportedVersion {
                found: self.version,
                expected: Self::VERSION,
            });
        }
        self.state.params.validate()?;

        let q_table = QTable::from_entries(self.table.iter().cloned());
        Ok(QLearnAgent::from_state(self.state.clone(), q_table))
    }

    pub fn episodes_so_far(&self) -> usize {
        self.state.episodes_so_far
    }

    pub fn num_entries(&self) -> usize {
        self.table.iter().map(|entry| entry.values.len()).sum()
    }
}
