//! Tabular Q-learning
//!
//! The pieces, leaves first:
//!
//! - [`StateKey`]: canonical, hashable projection of an observation
//! - [`QTable`]: lazily initialized (state, action) → value map
//! - [`EpsilonGreedy`]: exploration/exploitation trade-off
//! - [`TemporalDifference`]: the one-step update
//!   `Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]`
//! - [`QLearnAgent`]: the per-turn and end-of-episode cycles, including the
//!   one-way switch from training to evaluation
//!
//! ## Usage Example
//!
//! ```no_run
//! use qlearner::q_learning::{Hyperparameters, QLearnAgent};
//!
//! let agent = QLearnAgent::new(Hyperparameters::new(
//!     0.2,  // alpha (learning rate)
//!     0.05, // epsilon (exploration)
//!     0.8,  // gamma (discount)
//!     10,   // training episodes
//! )?)?
//! .with_seed(42);
//! # Ok::<(), qlearner::Error>(())
//! ```

pub mod agent;
pub mod policy;
pub mod q_table;
pub mod serialization;
pub mod state_key;
pub mod update;

// Public re-exports
pub use agent::{EpisodeState, Hyperparameters, Phase, QLearnAgent, Transition};
pub use policy::EpsilonGreedy;
pub use q_table::{ActionValues, QTable, TableEntry};
pub use serialization::SavedAgent;
pub use state_key::StateKey;
pub use update::{Successor, TdStep, TemporalDifference};
