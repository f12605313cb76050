//! Environment port - the game the agent is plugged into
//!
//! The agent only ever queries the environment: legal actions, the current
//! score and a structured snapshot. Running the game (applying moves, moving
//! adversaries, deciding when an episode is over) belongs to the environment.

use crate::{
    Result,
    types::{Action, Outcome, Snapshot},
};

/// Read-only view of the game the agent needs on every turn.
///
/// # Examples
///
/// ```
/// use qlearner::ports::Environment;
/// use qlearner::types::{Action, Position, Snapshot};
///
/// struct StandStill;
///
/// impl Environment for StandStill {
///     fn legal_actions(&self) -> Vec<Action> {
///         vec![Action::Stop, Action::East]
///     }
///
///     fn snapshot(&self) -> Snapshot {
///         Snapshot::new(Position::new(0, 0), vec![], vec![Position::new(1, 0)])
///     }
///
///     fn score(&self) -> f64 {
///         0.0
///     }
/// }
/// ```
pub trait Environment {
    /// Actions available this turn. May include `Action::Stop`; the agent
    /// filters it out.
    fn legal_actions(&self) -> Vec<Action>;

    /// Positions of the agent, the adversaries and the remaining targets.
    fn snapshot(&self) -> Snapshot;

    /// Current score. Not monotonic: time penalties and captures lower it.
    fn score(&self) -> f64;
}

/// An environment that can also be stepped through whole episodes.
///
/// Training pipelines drive agents through this trait; the agent itself only
/// needs [`Environment`].
pub trait EpisodicEnvironment: Environment {
    /// Start a new episode.
    fn reset(&mut self) -> Result<()>;

    /// Apply the agent's move and advance the game by one turn.
    ///
    /// # Errors
    ///
    /// Returns an error if `action` is not legal in the current position.
    fn apply(&mut self, action: Action) -> Result<()>;

    /// Terminal result, or `None` while the episode is still running.
    fn outcome(&self) -> Option<Outcome>;

    /// Whether the episode has ended.
    fn is_terminal(&self) -> bool {
        self.outcome().is_some()
    }
}
