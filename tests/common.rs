//! Common test fixtures for the qlearner test suite.
//!
//! Provides a small corridor game implementing the environment ports, so
//! agents can be trained end to end without a real game engine.

#![allow(dead_code)]

use qlearner::{
    Action, Outcome, Position, Result, Snapshot,
    error::Error,
    ports::{Environment, EpisodicEnvironment},
};

/// Score lost on every turn.
pub const STEP_PENALTY: f64 = 1.0;
/// Score gained by eating the food.
pub const FOOD_REWARD: f64 = 10.0;
/// Score lost when the turn limit runs out.
pub const TIMEOUT_PENALTY: f64 = 5.0;

/// One-row corridor with a single piece of food at the west end.
///
/// The agent starts at `start` and wins by reaching cell 0. An adversary sits
/// idle on the row above the east wall. Every move (including `Stop`) costs
/// [`STEP_PENALTY`]; running out of turns loses the episode.
#[derive(Debug, Clone)]
pub struct Corridor {
    length: i32,
    start: i32,
    max_turns: usize,
    agent: i32,
    turns: usize,
    score: f64,
    outcome: Option<Outcome>,
}

impl Corridor {
    pub fn new(length: i32, start: i32, max_turns: usize) -> Self {
        assert!(length >= 2 && (1..length).contains(&start));
        Self {
            length,
            start,
            max_turns,
            agent: start,
            turns: 0,
            score: 0.0,
            outcome: None,
        }
    }

    /// Minimum number of turns needed to win from the start cell.
    pub fn shortest_path(&self) -> usize {
        self.start as usize
    }

    fn food(&self) -> Position {
        Position::new(0, 0)
    }
}

impl Environment for Corridor {
    fn legal_actions(&self) -> Vec<Action> {
        let mut legal = vec![Action::Stop];
        if self.agent < self.length - 1 {
            legal.push(Action::East);
        }
        if self.agent > 0 {
            legal.push(Action::West);
        }
        legal
    }

    fn snapshot(&self) -> Snapshot {
        let targets = if self.outcome == Some(Outcome::Win) {
            vec![]
        } else {
            vec![self.food()]
        };
        Snapshot::new(
            Position::new(self.agent, 0),
            vec![Position::new(self.length - 1, 1)],
            targets,
        )
    }

    fn score(&self) -> f64 {
        self.score
    }
}

impl EpisodicEnvironment for Corridor {
    fn reset(&mut self) -> Result<()> {
        self.agent = self.start;
        self.turns = 0;
        self.score = 0.0;
        self.outcome = None;
        Ok(())
    }

    fn apply(&mut self, action: Action) -> Result<()> {
        if self.outcome.is_some() || !self.legal_actions().contains(&action) {
            return Err(Error::IllegalAction { action });
        }

        self.agent = Position::new(self.agent, 0).step(action).x;
        self.turns += 1;
        self.score -= STEP_PENALTY;

        if self.agent == self.food().x {
            self.score += FOOD_REWARD;
            self.outcome = Some(Outcome::Win);
        } else if self.turns >= self.max_turns {
            self.score -= TIMEOUT_PENALTY;
            self.outcome = Some(Outcome::Loss);
        }
        Ok(())
    }

    fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }
}
