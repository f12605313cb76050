//! Canonical state keys for tabular lookup

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    ports::Environment,
    types::{Action, Position, Snapshot},
};

/// Hashable projection of an environment observation.
///
/// Built from the legal actions, the agent's cell, the adversary cells and
/// the remaining targets. Every collection is sorted on construction, so two
/// observationally identical snapshots always produce equal keys regardless of
/// the order the environment reported them in. Score never participates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateKey {
    legal: Vec<Action>,
    agent: Position,
    adversaries: Vec<Position>,
    targets: Vec<Position>,
}

impl StateKey {
    /// Encode a snapshot together with the legal actions offered in it.
    ///
    /// `Stop` is dropped from the legal set; duplicate actions collapse.
    /// Adversaries keep their multiplicity (two on one cell differ from one).
    pub fn encode(legal_actions: &[Action], snapshot: &Snapshot) -> Self {
        let mut legal: Vec<Action> = legal_actions
            .iter()
            .copied()
            .filter(|action| !action.is_stop())
            .collect();
        legal.sort_unstable();
        legal.dedup();

        let mut adversaries = snapshot.adversaries.clone();
        adversaries.sort_unstable();

        let mut targets = snapshot.targets.clone();
        targets.sort_unstable();
        targets.dedup();

        Self {
            legal,
            agent: snapshot.agent,
            adversaries,
            targets,
        }
    }

    /// Encode whatever the environment currently shows.
    pub fn observe<E: Environment + ?Sized>(env: &E) -> Self {
        Self::encode(&env.legal_actions(), &env.snapshot())
    }

    /// Legal actions in canonical order (never contains `Stop`).
    pub fn legal_actions(&self) -> &[Action] {
        &self.legal
    }

    pub fn agent(&self) -> Position {
        self.agent
    }

    pub fn adversaries(&self) -> &[Position] {
        &self.adversaries
    }

    pub fn targets(&self) -> &[Position] {
        &self.targets
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    f.write_str("[")?;
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str("]")
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("legal=")?;
        write_list(f, &self.legal)?;
        write!(f, " agent={} adversaries=", self.agent)?;
        write_list(f, &self.adversaries)?;
        write!(f, " targets={}", self.targets.len())
    }
}
