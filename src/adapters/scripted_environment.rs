//! Scripted environment that replays fixed observations.
//!
//! Stands in for a real game wherever the exact sequence of observations must
//! be controlled: unit tests, regression fixtures, and replays of recorded
//! episodes.

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    error::Error,
    ports::{Environment, EpisodicEnvironment},
    types::{Action, Outcome, Snapshot},
};

/// One scripted turn: what the environment reports before the agent acts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptedObservation {
    pub legal_actions: Vec<Action>,
    pub snapshot: Snapshot,
    pub score: f64,
}

impl ScriptedObservation {
    pub fn new(legal_actions: Vec<Action>, snapshot: Snapshot, score: f64) -> Self {
        Self {
            legal_actions,
            snapshot,
            score,
        }
    }
}

/// Environment that walks through a fixed list of observations.
///
/// Every legal [`EpisodicEnvironment::apply`] advances to the next
/// observation, whatever the action was. The last observation is terminal
/// and carries the scripted outcome.
///
/// # Examples
///
/// ```
/// use qlearner::adapters::{ScriptedEnvironment, ScriptedObservation};
/// use qlearner::ports::{Environment, EpisodicEnvironment};
/// use qlearner::types::{Action, Outcome, Position, Snapshot};
///
/// let start = Snapshot::new(Position::new(0, 0), vec![], vec![Position::new(1, 0)]);
/// let end = Snapshot::new(Position::new(1, 0), vec![], vec![]);
/// let mut env = ScriptedEnvironment::from_script(
///     vec![
///         ScriptedObservation::new(vec![Action::East], start, 0.0),
///         ScriptedObservation::new(vec![], end, 9.0),
///     ],
///     Outcome::Win,
/// )?;
///
/// env.apply(Action::East)?;
/// assert_eq!(env.score(), 9.0);
/// assert_eq!(env.outcome(), Some(Outcome::Win));
/// # Ok::<(), qlearner::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedEnvironment {
    script: Vec<ScriptedObservation>,
    cursor: usize,
    outcome: Outcome,
    applied: Vec<Action>,
}

impl ScriptedEnvironment {
    /// Single-observation environment, convenient for driving the agent by
    /// hand with [`ScriptedEnvironment::set_observation`].
    pub fn new(legal_actions: Vec<Action>, snapshot: Snapshot, score: f64) -> Self {
        Self {
            script: vec![ScriptedObservation::new(legal_actions, snapshot, score)],
            cursor: 0,
            outcome: Outcome::Loss,
            applied: Vec::new(),
        }
    }

    /// Environment replaying `script`, ending with `outcome`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EnvironmentExhausted`] for an empty script.
    pub fn from_script(script: Vec<ScriptedObservation>, outcome: Outcome) -> Result<Self> {
        if script.is_empty() {
            return Err(Error::EnvironmentExhausted);
        }
        Ok(Self {
            script,
            cursor: 0,
            outcome,
            applied: Vec::new(),
        })
    }

    /// Replace what the environment currently reports.
    pub fn set_observation(&mut self, legal_actions: Vec<Action>, snapshot: Snapshot, score: f64) {
        self.script[self.cursor] = ScriptedObservation::new(legal_actions, snapshot, score);
    }

    /// Actions applied since the last reset, in order.
    pub fn applied(&self) -> &[Action] {
        &self.applied
    }

    fn current(&self) -> &ScriptedObservation {
        &self.script[self.cursor]
    }
}

impl Environment for ScriptedEnvironment {
    fn legal_actions(&self) -> Vec<Action> {
        self.current().legal_actions.clone()
    }

    fn snapshot(&self) -> Snapshot {
        self.current().snapshot.clone()
    }

    fn score(&self) -> f64 {
        self.current().score
    }
}

impl EpisodicEnvironment for ScriptedEnvironment {
    fn reset(&mut self) -> Result<()> {
        self.cursor = 0;
        self.applied.clear();
        Ok(())
    }

    fn apply(&mut self, action: Action) -> Result<()> {
        if self.is_terminal() {
            return Err(Error::EnvironmentExhausted);
        }
        if !self.current().legal_actions.contains(&action) {
            return Err(Error::IllegalAction { action });
        }
        self.applied.push(action);
        self.cursor += 1;
        Ok(())
    }

    fn outcome(&self) -> Option<Outcome> {
        (self.cursor + 1 == self.script.len()).then_some(self.outcome)
    }
}
