//! Q-table mapping (perspective state, move) pairs to values

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::q_learning::perspective::PerspectiveState;

/// One logical table entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QEntry {
    pub state: PerspectiveState,
    pub action: usize,
    pub value: f64,
}

/// Q-table keyed by canonical state and move position
///
/// Unseen pairs read as `0.0`. The table carries no hyper-parameters; the
/// learner owning it decides how values move.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<QEntry>", into = "Vec<QEntry>")]
pub struct QTable {
    q_values: HashMap<(PerspectiveState, usize), f64>,
}

impl QTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of a state-action pair, `0.0` when unseen.
    pub fn get(&self, state: &PerspectiveState, action: usize) -> f64 {
        self.q_values
            .get(&(*state, action))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn contains(&self, state: &PerspectiveState, action: usize) -> bool {
        self.q_values.contains_key(&(*state, action))
    }

    pub fn set(&mut self, state: PerspectiveState, action: usize, value: f64) {
        self.q_values.insert((state, action), value);
    }

    /// Move the stored value towards `target` by `learning_rate`.
    ///
    /// Q(s,a) ← Q(s,a) + α[target - Q(s,a)]
    ///
    /// Unseen pairs are inserted starting from `0.0`. Returns the new value.
    pub fn update_towards(
        &mut self,
        state: PerspectiveState,
        action: usize,
        target: f64,
        learning_rate: f64,
    ) -> f64 {
        let q = self.q_values.entry((state, action)).or_insert(0.0);
        *q += learning_rate * (target - *q);
        *q
    }

    /// Legal actions sharing the maximum value, in the order given.
    pub fn best_actions(&self, state: &PerspectiveState, legal_actions: &[usize]) -> Vec<usize> {
        let max_q = legal_actions
            .iter()
            .map(|&action| self.get(state, action))
            .fold(f64::NEG_INFINITY, f64::max);

        legal_actions
            .iter()
            .copied()
            .filter(|&action| self.get(state, action) == max_q)
            .collect()
    }

    /// All entries, sorted by state then action.
    pub fn entries(&self) -> Vec<QEntry> {
        let mut entries: Vec<QEntry> = self
            .q_values
            .iter()
            .map(|(&(state, action), &value)| QEntry {
                state,
                action,
                value,
            })
            .collect();
        entries.sort_by(|a, b| (a.state, a.action).cmp(&(b.state, b.action)));
        entries
    }

    /// Rebuild a table from entries. Later duplicates overwrite earlier ones.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = QEntry>,
    {
        Self {
            q_values: entries
                .into_iter()
                .map(|entry| ((entry.state, entry.action), entry.value))
                .collect(),
        }
    }

    /// Number of distinct states with at least one stored action.
    pub fn state_count(&self) -> usize {
        let mut states: Vec<_> = self.q_values.keys().map(|(state, _)| *state).collect();
        states.sort_unstable();
        states.dedup();
        states.len()
    }

    pub fn len(&self) -> usize {
        self.q_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q_values.is_empty()
    }

    pub fn clear(&mut self) {
        self.q_values.clear();
    }
}

impl From<Vec<QEntry>> for QTable {
    fn from(entries: Vec<QEntry>) -> Self {
        Self::from_entries(entries)
    }
}

impl From<QTable> for Vec<QEntry> {
    fn from(table: QTable) -> Self {
        table.entries()
    }
}
