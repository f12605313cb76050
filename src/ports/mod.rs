//! Ports (trait boundaries) for external dependencies.
//!
//! This module defines the interfaces between the learning core and the
//! outside world. Following hexagonal architecture, these traits are owned by
//! the domain and implemented by adapters.

pub mod agent;
pub mod environment;
pub mod observer;
pub mod repository;

pub use agent::Agent;
pub use environment::{Environment, EpisodicEnvironment};
pub use observer::Observer;
pub use repository::AgentRepository;
