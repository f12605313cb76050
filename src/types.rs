//! Core domain types shared by the agent and its environments

use std::fmt;

use serde::{Deserialize, Serialize};

/// A discrete move available to the controlled character.
///
/// `Stop` is the no-op move. Environments may offer it, but the agent filters
/// it out before any learning or selection logic sees the legal set.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    North,
    South,
    East,
    West,
    Stop,
}

impl Action {
    /// All actions in their canonical order.
    pub const ALL: [Action; 5] = [
        Action::North,
        Action::South,
        Action::East,
        Action::West,
        Action::Stop,
    ];

    /// Whether this is the no-op move.
    pub fn is_stop(self) -> bool {
        self == Action::Stop
    }

    /// Grid displacement `(dx, dy)` produced by this action (north is +y).
    pub fn delta(self) -> (i32, i32) {
        match self {
            Action::North => (0, 1),
            Action::South => (0, -1),
            Action::East => (1, 0),
            Action::West => (-1, 0),
            Action::Stop => (0, 0),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::North => "North",
            Action::South => "South",
            Action::East => "East",
            Action::West => "West",
            Action::Stop => "Stop",
        };
        f.write_str(name)
    }
}

/// Integer grid cell.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell reached by taking `action` from here (walls are not considered).
    pub fn step(self, action: Action) -> Self {
        let (dx, dy) = action.delta();
        Self::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Structured view of the board that the state encoder consumes.
///
/// The score is deliberately absent: it feeds the reward, never the state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Cell occupied by the controlled character
    pub agent: Position,
    /// Cells occupied by adversaries (order is not significant)
    pub adversaries: Vec<Position>,
    /// Cells that still hold a target (order is not significant)
    pub targets: Vec<Position>,
}

impl Snapshot {
    pub fn new(agent: Position, adversaries: Vec<Position>, targets: Vec<Position>) -> Self {
        Self {
            agent,
            adversaries,
            targets,
        }
    }
}

/// Terminal result of an episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Win,
    Loss,
}
