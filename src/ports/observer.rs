//! Observer port - abstraction for training observation and data collection
//!
//! This port defines the interface for observing training events,
//! allowing composable data collection without coupling the training
//! loop to specific output formats or metrics.

use crate::{Result, pipeline::EpisodeSummary, types::Action};

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// 1. `on_training_start(total_episodes)` - once at the beginning
/// 2. For each episode:
///    - `on_episode_start(episode)`
///    - `on_turn(...)` - for each action the agent takes
///    - `on_episode_end(summary)`
/// 3. `on_training_end()` - once at the end
///
/// Observers see events after the agent has acted; they cannot influence
/// what it learns.
///
/// # Examples
///
/// ```no_run
/// use qlearner::pipeline::EpisodeSummary;
/// use qlearner::ports::Observer;
///
/// struct WinCounter {
///     wins: usize,
/// }
///
/// impl Observer for WinCounter {
///     fn on_episode_end(&mut self, summary: &EpisodeSummary) -> qlearner::Result<()> {
///         if summary.won() {
///             self.wins += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called when training starts.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called when an episode starts (`episode` is 0-based).
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        Ok(())
    }

    /// Called for each action the agent takes.
    ///
    /// # Parameters
    ///
    /// * `episode` - Index of the current episode
    /// * `step` - Turn number within the episode (0-based)
    /// * `action` - Action the agent chose
    /// * `score` - Score observed before the action was applied
    fn on_turn(&mut self, _episode: usize, _step: usize, _action: Action, _score: f64) -> Result<()> {
        Ok(())
    }

    /// Called after the agent has been told the episode ended.
    fn on_episode_end(&mut self, _summary: &EpisodeSummary) -> Result<()> {
        Ok(())
    }

    /// Called when training completes.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
