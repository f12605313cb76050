//! Adapters implementing domain ports.
//!
//! Infrastructure implementations of the traits defined in the ports module.
//! Adapters depend on domain ports, not the other way around.

pub mod in_memory_repository;
pub mod msgpack_repository;
pub mod scripted_environment;

pub use in_memory_repository::InMemoryRepository;
pub use msgpack_repository::MsgPackRepository;
pub use scripted_environment::{ScriptedEnvironment, ScriptedObservation};
