//! One-step Q-learning update

use crate::{
    error::Result,
    q_learning::{q_table::QTable, state_key::StateKey},
    types::Action,
};

/// What followed the action being credited.
#[derive(Debug, Clone, Copy)]
pub enum Successor<'a> {
    /// The episode ended; no future value is obtainable.
    Terminal,
    /// The episode continues in `state`, where `legal_actions` are available.
    State {
        state: &'a StateKey,
        legal_actions: &'a [Action],
    },
}

/// Values involved in one applied update, reported for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TdStep {
    pub previous: f64,
    pub target: f64,
    pub updated: f64,
}

/// Off-policy TD control with a fixed discount factor.
///
/// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
///
/// Plain floating point throughout: no clamping and no normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemporalDifference {
    discount_factor: f64,
}

impl TemporalDifference {
    pub fn new(discount_factor: f64) -> Self {
        Self { discount_factor }
    }

    pub fn discount_factor(&self) -> f64 {
        self.discount_factor
    }

    /// `r + γ max_a' Q(s',a')`, with the future term zero for terminals.
    pub fn target(&self, table: &QTable, reward: f64, successor: Successor<'_>) -> Result<f64> {
        let future = match successor {
            Successor::Terminal => 0.0,
            Successor::State {
                state,
                legal_actions,
            } => table.max_over(state, legal_actions)?,
        };
        Ok(reward + self.discount_factor * future)
    }

    /// Move Q(`state`, `action`) toward the TD target by `learning_rate`.
    pub fn update(
        &self,
        table: &mut QTable,
        state: &StateKey,
        action: Action,
        reward: f64,
        successor: Successor<'_>,
        learning_rate: f64,
    ) -> Result<TdStep> {
        let previous = table.get(state, action)?;
        let target = self.target(table, reward, successor)?;
        let updated = previous + learning_rate * (target - previous);
        table.set(state, action, updated);
        Ok(TdStep {
            previous,
            target,
            updated,
        })
    }
}
