//! Tabular Q-learning control agent
//!
//! This crate provides:
//! - Canonical state encoding of game observations
//! - A lazily initialized Q-table with the one-step Q-learning update
//! - ε-greedy action selection with deterministic tie-breaking
//! - An agent that learns turn by turn and freezes into pure exploitation
//!   after a fixed number of training episodes
//! - Ports for plugging in environments, observers and persistence

pub mod adapters;
pub mod app;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod types;

pub use error::{Error, Result};
pub use q_learning::{Hyperparameters, Phase, QLearnAgent, StateKey};
pub use types::{Action, Outcome, Position, Snapshot};
