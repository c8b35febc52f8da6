use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::hash::Hash;

use super::StateKey;

/// Read and write access to learned `(state, action)` values. Unknown pairs are worth `0.0`.
pub trait ValueStore<A> {
    fn values(&self, state: &StateKey, actions: &[A]) -> Result<Vec<f32>>;

    fn set_value(&mut self, state: StateKey, action: A, value: f32) -> Result<()>;

    fn value(&self, state: &StateKey, action: &A) -> Result<f32> {
        self.values(state, std::slice::from_ref(action))?
            .first()
            .copied()
            .ok_or_else(|| anyhow!("Expected a value for the requested action"))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TableStats {
    pub entries: usize,
    pub mean: f32,
}

/// Tabular store of `(state, action)` estimates. Grows with every newly visited pair and never shrinks.
#[derive(Clone, Debug, PartialEq)]
pub struct QTable<A: Hash + Eq> {
    values: HashMap<(StateKey, A), f32>,
}

impl<A: Hash + Eq> Default for QTable<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Hash + Eq> QTable<A> {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    pub fn get(&self, state: &StateKey, action: A) -> f32 {
        self.values.get(&(*state, action)).copied().unwrap_or(0.0)
    }

    pub fn insert(&mut self, state: StateKey, action: A, value: f32) {
        self.values.insert((state, action), value);
    }

    /// Applies updates written elsewhere. The last write for a pair wins.
    pub fn merge<I: IntoIterator<Item = (StateKey, A, f32)>>(&mut self, updates: I) {
        for (state, action, value) in updates {
            self.insert(state, action, value);
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn stats(&self) -> TableStats {
        TableStats {
            entries: self.len(),
            mean: common::mean(self.values.values().copied()),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StateKey, &A, f32)> {
        self.values
            .iter()
            .map(|((state, action), value)| (state, action, *value))
    }
}

impl<A: Hash + Eq> FromIterator<(StateKey, A, f32)> for QTable<A> {
    fn from_iter<I: IntoIterator<Item = (StateKey, A, f32)>>(iter: I) -> Self {
        let mut table = QTable::new();
        table.merge(iter);
        table
    }
}

impl<A: Hash + Eq + Clone> ValueStore<A> for QTable<A> {
    fn values(&self, state: &StateKey, actions: &[A]) -> Result<Vec<f32>> {
        Ok(actions
            .iter()
            .map(|action| self.get(state, action.clone()))
            .collect())
    }

    fn set_value(&mut self, state: StateKey, action: A, value: f32) -> Result<()> {
        self.insert(state, action, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwritten_pairs_are_zero() {
        let table: QTable<u8> = QTable::new();

        for action in 0..64 {
            assert_eq!(table.get(&StateKey::new(1, 2), action), 0.0);
        }
    }

    #[test]
    fn test_values_defaults_missing_entries() {
        let mut table = QTable::new();
        let state = StateKey::new(1, 2);
        table.insert(state, 5u8, 0.5);

        assert_eq!(table.values(&state, &[4, 5, 6]).unwrap(), vec![0.0, 0.5, 0.0]);
    }

    #[test]
    fn test_insert_overwrites_pair() {
        let mut table = QTable::new();
        let state = StateKey::new(1, 2);
        table.set_value(state, 5u8, 0.5).unwrap();
        table.set_value(state, 5u8, -1.5).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.value(&state, &5).unwrap(), -1.5);
    }

    #[test]
    fn test_stats() {
        let table: QTable<u8> = vec![
            (StateKey::new(1, 2), 3, 1.0),
            (StateKey::new(1, 2), 4, 2.0),
            (StateKey::new(2, 1), 3, 6.0),
        ]
        .into_iter()
        .collect();

        assert_eq!(table.stats(), TableStats { entries: 3, mean: 3.0 });
    }

    #[test]
    fn test_stats_of_empty_table() {
        let table: QTable<u8> = QTable::new();

        assert_eq!(table.stats(), TableStats { entries: 0, mean: 0.0 });
    }

    #[test]
    fn test_merge_last_write_wins() {
        let mut table = QTable::new();
        let state = StateKey::new(8, 16);
        table.merge(vec![(state, 1u8, 1.0), (state, 2, 2.0), (state, 1, 3.0)]);

        assert_eq!(table.get(&state, 1), 3.0);
        assert_eq!(table.get(&state, 2), 2.0);
    }
}
