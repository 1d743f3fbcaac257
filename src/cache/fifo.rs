use indexmap::IndexMap;
use parking_lot::Mutex;
use tracing::trace;

use super::{CacheStats, Counters};

#[derive(Debug)]
struct FifoState<V> {
    entries: IndexMap<String, V>,
    counters: Counters,
}

/// Bounded map evicting in insertion order.
///
/// Reads do not refresh an entry's position; re-inserting an existing key
/// replaces the value in place.
#[derive(Debug)]
pub struct FifoCache<V> {
    capacity: usize,
    state: Mutex<FifoState<V>>,
}

impl<V: Clone> FifoCache<V> {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            state: Mutex::new(FifoState {
                entries: IndexMap::new(),
                counters: Counters::default(),
            }),
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get(&self, key: &str) -> Option<V> {
        let mut state = self.state.lock();
        let value = state.entries.get(key).cloned();
        state.counters.record(value.is_some());
        value
    }

    pub fn insert(&self, key: String, value: V) {
        if self.capacity == 0 {
            return;
        }
        let mut state = self.state.lock();
        if let Some(slot) = state.entries.get_mut(&key) {
            *slot = value;
            return;
        }
        while state.entries.len() >= self.capacity {
            if let Some((evicted, _)) = state.entries.shift_remove_index(0) {
                trace!(key = %evicted, "fifo eviction");
            }
        }
        state.entries.insert(key, value);
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.state.lock().entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every entry and resets the counters.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.entries.clear();
        state.counters = Counters::default();
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let state = self.state.lock();
        state.counters.stats(state.entries.len())
    }
}
