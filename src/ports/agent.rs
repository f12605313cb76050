//! Agent port - what an environment's game loop calls into
//!
//! The environment owns the loop: it signals the start of each episode, asks
//! for one action per turn, and signals the end of each episode exactly once.

use crate::{Result, ports::Environment, types::Action};

/// Agent trait - unified interface for anything that plays the game
///
/// Implemented by the learning agent, its mutex-shared handle, and baselines,
/// so pipelines can compare them without knowing which is which.
pub trait Agent: Send {
    /// Choose the move for the current turn.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment offers no legal action.
    fn act(&mut self, env: &dyn Environment) -> Result<Action>;

    /// Called after the environment is reset, before the first turn.
    ///
    /// Learning agents drop any move left over from an abandoned episode.
    ///
    /// # Default Implementation
    ///
    /// Does nothing and returns `Ok(())`.
    fn episode_start(&mut self) -> Result<()> {
        Ok(())
    }

    /// Called once after the environment reports a win or a loss.
    ///
    /// # Default Implementation
    ///
    /// Does nothing, suitable for agents that do not learn.
    fn episode_end(&mut self, _env: &dyn Environment) -> Result<()> {
        Ok(())
    }

    /// Agent name, used in logs and summaries.
    fn name(&self) -> &str;

    /// Seed the agent's random source for reproducible runs.
    ///
    /// # Default Implementation
    ///
    /// Does nothing and returns `Ok(())`.
    fn set_rng_seed(&mut self, _seed: u64) -> Result<()> {
        Ok(())
    }

    /// Enable downcasting to concrete types.
    fn as_any(&self) -> &dyn std::any::Any;
}
