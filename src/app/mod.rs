//! Application layer with dependency injection container.
//!
//! ```text
//! App (container) ── owns ──▶ adapters (MsgPackRepository, InMemoryRepository)
//!        │                          │ implement
//!        │ creates                  ▼
//!        └────────────▶ QLearnAgent   ports (AgentRepository)
//! ```
//!
//! # Usage
//!
//! ```
//! use qlearner::app::{App, AgentConfig};
//!
//! let app = App::new();
//! let agent = app.create_agent(AgentConfig::default().with_seed(42))?;
//! # Ok::<(), qlearner::Error>(())
//! ```

pub mod config;
pub mod container;

pub use config::AgentConfig;
pub use container::{App, AppBuilder};
