//! Q-table implementation for temporal difference learning

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    q_learning::state_key::StateKey,
    types::Action,
};

/// Stored values for every action seen in one state.
pub type ActionValues = BTreeMap<Action, f64>;

/// Q-table mapping (state, action) pairs to value estimates
///
/// Entries are created lazily per state and never removed, so the table only
/// grows. Reads of pairs that were never initialized are errors rather than
/// silent defaults: they mean the encoder and the table disagree.
#[derive(Debug, Clone, Default)]
pub struct QTable {
    values: HashMap<StateKey, ActionValues>,
}

/// Flattened form of one state's row, used for persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableEntry {
    pub state: StateKey,
    pub values: Vec<(Action, f64)>,
}

impl QTable {
    /// Create an empty Q-table
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure every action in `legal_actions` has an entry for `state`.
    ///
    /// New pairs start at 0.0. Existing values are never touched, so calling
    /// this again (or with a superset of actions) only adds what is missing.
    pub fn ensure_initialized(&mut self, state: &StateKey, legal_actions: &[Action]) {
        if let Some(row) = self.values.get_mut(state) {
            for &action in legal_actions {
                row.entry(action).or_insert(0.0);
            }
            return;
        }
        let row = legal_actions.iter().map(|&action| (action, 0.0)).collect();
        self.values.insert(state.clone(), row);
    }

    /// Whether `state` has been seen before.
    pub fn contains(&self, state: &StateKey) -> bool {
        self.values.contains_key(state)
    }

    /// Get the stored value for a state-action pair
    ///
    /// # Errors
    ///
    /// Returns [`Error::UninitializedValue`] when the pair was never
    /// initialized.
    pub fn get(&self, state: &StateKey, action: Action) -> Result<f64> {
        self.values
            .get(state)
            .and_then(|row| row.get(&action))
            .copied()
            .ok_or_else(|| Error::UninitializedValue {
                state: state.to_string(),
                action,
            })
    }

    /// Overwrite the value for a state-action pair
    pub fn set(&mut self, state: &StateKey, action: Action, value: f64) {
        if let Some(row) = self.values.get_mut(state) {
            row.insert(action, value);
            return;
        }
        self.values
            .insert(state.clone(), ActionValues::from([(action, value)]));
    }

    /// Maximum value over `actions` in `state`.
    ///
    /// An empty action set is worth 0.0: nothing more can be collected.
    pub fn max_over(&self, state: &StateKey, actions: &[Action]) -> Result<f64> {
        if actions.is_empty() {
            return Ok(0.0);
        }
        actions.iter().try_fold(f64::NEG_INFINITY, |best, &action| {
            Ok(best.max(self.get(state, action)?))
        })
    }

    /// Select greedy action (highest value) from legal actions
    ///
    /// Ties go to the action listed first: a later action only replaces the
    /// current best when its value is strictly greater.
    pub fn greedy_action(&self, state: &StateKey, legal_actions: &[Action]) -> Result<Action> {
        let (&first, rest) = legal_actions
            .split_first()
            .ok_or_else(|| Error::NoLegalActions {
                state: state.to_string(),
            })?;

        let mut best = (first, self.get(state, first)?);
        for &action in rest {
            let value = self.get(state, action)?;
            if value > best.1 {
                best = (action, value);
            }
        }
        Ok(best.0)
    }

    /// All stored values for `state`, if it has been seen.
    pub fn action_values(&self, state: &StateKey) -> Option<&ActionValues> {
        self.values.get(state)
    }

    /// Number of distinct states seen
    pub fn num_states(&self) -> usize {
        self.values.len()
    }

    /// Get total number of state-action values stored
    pub fn size(&self) -> usize {
        self.values.values().map(BTreeMap::len).sum()
    }

    /// Rows sorted by state key, for deterministic persistence.
    pub fn entries(&self) -> Vec<TableEntry> {
        let mut entries: Vec<TableEntry> = self
            .values
            .iter()
            .map(|(state, row)| TableEntry {
                state: state.clone(),
                values: row.iter().map(|(&action, &value)| (action, value)).collect(),
            })
            .collect();
        entries.sort_by(|a, b| a.state.cmp(&b.state));
        entries
    }

    /// Rebuild a table from persisted rows.
    pub fn from_entries(entries: impl IntoIterator<Item = TableEntry>) -> Self {
        let values = entries
            .into_iter()
            .map(|entry| (entry.state, entry.values.into_iter().collect()))
            .collect();
        Self { values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Position, Snapshot};

    fn state(x: i32) -> StateKey {
        StateKey::encode(
            &[Action::North, Action::East, Action::West],
            &Snapshot::new(Position::new(x, 0), vec![Position::new(4, 4)], vec![]),
        )
    }

    #[test]
    fn test_qtable_initialization() {
        let mut qtable = QTable::new();
        let s = state(0);
        qtable.ensure_initialized(&s, s.legal_actions());

        assert!(qtable.contains(&s));
        assert_eq!(qtable.size(), 3);
        for &action in s.legal_actions() {
            assert_eq!(qtable.get(&s, action).unwrap(), 0.0);
        }
    }

    #[test]
    fn test_reinitialization_keeps_learned_values() {
        let mut qtable = QTable::new();
        let s = state(0);
        qtable.ensure_initialized(&s, &[Action::North, Action::East]);
        qtable.set(&s, Action::East, 1.5);

        qtable.ensure_initialized(&s, &[Action::North, Action::East]);
        assert_eq!(qtable.get(&s, Action::East).unwrap(), 1.5);

        qtable.ensure_initialized(&s, &[Action::North, Action::East, Action::West]);
        assert_eq!(qtable.get(&s, Action::East).unwrap(), 1.5);
        assert_eq!(qtable.get(&s, Action::West).unwrap(), 0.0);
        assert_eq!(qtable.size(), 3);
    }

    #[test]
    fn test_uninitialized_lookup_fails() {
        let mut qtable = QTable::new();
        let s = state(0);
        assert!(matches!(
            qtable.get(&s, Action::North),
            Err(Error::UninitializedValue { .. })
        ));

        qtable.ensure_initialized(&s, &[Action::North]);
        assert!(matches!(
            qtable.get(&s, Action::South),
            Err(Error::UninitializedValue {
                action: Action::South,
                ..
            })
        ));
    }

    #[test]
    fn test_qtable_set_get() {
        let mut qtable = QTable::new();
        let s = state(1);
        qtable.set(&s, Action::West, -2.25);
        assert_eq!(qtable.get(&s, Action::West).unwrap(), -2.25);
    }

    #[test]
    fn test_max_over() {
        let mut qtable = QTable::new();
        let s = state(0);
        qtable.ensure_initialized(&s, s.legal_actions());
        qtable.set(&s, Action::North, 0.5);
        qtable.set(&s, Action::East, 1.5);
        qtable.set(&s, Action::West, -0.8);

        assert_eq!(qtable.max_over(&s, s.legal_actions()).unwrap(), 1.5);
        assert_eq!(qtable.max_over(&s, &[Action::West]).unwrap(), -0.8);
    }

    #[test]
    fn test_max_over_empty_is_zero() {
        let qtable = QTable::new();
        assert_eq!(qtable.max_over(&state(9), &[]).unwrap(), 0.0);
    }

    #[test]
    fn test_greedy_action() {
        let mut qtable = QTable::new();
        let s = state(0);
        qtable.ensure_initialized(&s, s.legal_actions());
        qtable.set(&s, Action::East, 1.5);
        qtable.set(&s, Action::West, 0.8);

        assert_eq!(
            qtable.greedy_action(&s, s.legal_actions()).unwrap(),
            Action::East
        );
    }

    #[test]
    fn test_greedy_ties_go_to_first_listed() {
        let mut qtable = QTable::new();
        let s = state(0);
        qtable.ensure_initialized(&s, s.legal_actions());
        qtable.set(&s, Action::East, 2.0);
        qtable.set(&s, Action::West, 2.0);

        assert_eq!(
            qtable
                .greedy_action(&s, &[Action::West, Action::East, Action::North])
                .unwrap(),
            Action::West
        );
        assert_eq!(
            qtable
                .greedy_action(&s, &[Action::North, Action::East, Action::West])
                .unwrap(),
            Action::East
        );
    }

    #[test]
    fn test_greedy_with_no_actions_fails() {
        let qtable = QTable::new();
        assert!(matches!(
            qtable.greedy_action(&state(0), &[]),
            Err(Error::NoLegalActions { .. })
        ));
    }

    #[test]
    fn test_entries_rebuild_the_table() {
        let mut qtable = QTable::new();
        for x in 0..3 {
            let s = state(x);
            qtable.ensure_initialized(&s, s.legal_actions());
            qtable.set(&s, Action::East, f64::from(x));
        }

        let rebuilt = QTable::from_entries(qtable.entries());
        assert_eq!(rebuilt.num_states(), 3);
        assert_eq!(rebuilt.get(&state(2), Action::East).unwrap(), 2.0);
        assert_eq!(rebuilt.entries(), qtable.entries());
    }
}
