//! ε-greedy action selection

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    error::{Error, Result},
    q_learning::{q_table::QTable, state_key::StateKey},
    types::Action,
};

pub(crate) fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// ε-greedy selector over a [`QTable`].
///
/// With probability ε a uniformly random legal action is returned; otherwise
/// the greedy action, with ties going to the first action in the legal list.
/// The only side effect is consuming the random source.
#[derive(Debug, Clone)]
pub struct EpsilonGreedy {
    rng: StdRng,
    seed: Option<u64>,
}

impl EpsilonGreedy {
    /// Selector seeded from the thread RNG
    pub fn new() -> Self {
        Self::from_seed(None)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::from_seed(Some(seed))
    }

    pub(crate) fn from_seed(seed: Option<u64>) -> Self {
        Self {
            rng: build_rng(seed),
            seed,
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Re-seed the random source, restarting its sequence.
    pub fn reseed(&mut self, seed: Option<u64>) {
        self.rng = build_rng(seed);
        self.seed = seed;
    }

    /// Pick an action for `state` among `legal_actions`.
    ///
    /// # Errors
    ///
    /// [`Error::NoLegalActions`] if `legal_actions` is empty, and
    /// [`Error::UninitializedValue`] if the greedy branch meets a pair the
    /// table has never seen.
    pub fn select(
        &mut self,
        table: &QTable,
        state: &StateKey,
        legal_actions: &[Action],
        epsilon: f64,
    ) -> Result<Action> {
        if legal_actions.is_empty() {
            return Err(Error::NoLegalActions {
                state: state.to_string(),
            });
        }

        if self.rng.random::<f64>() < epsilon {
            // Explore: random action
            legal_actions
                .choose(&mut self.rng)
                .copied()
                .ok_or_else(|| Error::NoLegalActions {
                    state: state.to_string(),
                })
        } else {
            table.greedy_action(state, legal_actions)
        }
    }
}

impl Default for EpsilonGreedy {
    fn default() -> Self {
        Self::new()
    }
}
