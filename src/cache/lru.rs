use indexmap::IndexMap;
use parking_lot::Mutex;
use tracing::trace;

use super::{CacheStats, Counters};

#[derive(Debug)]
struct LruState<V> {
    // Front is least recently used.
    entries: IndexMap<String, V>,
    counters: Counters,
}

/// Bounded map evicting the least recently read or written entry.
#[derive(Debug)]
pub struct LruCache<V> {
    capacity: usize,
    state: Mutex<LruState<V>>,
}

impl<V: Clone> LruCache<V> {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            state: Mutex::new(LruState {
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
        let value = match state.entries.get_index_of(key) {
            Some(index) => {
                let last = state.entries.len() - 1;
                state.entries.move_index(index, last);
                state.entries.get_index(last).map(|(_, value)| value.clone())
            }
            None => None,
        };
        state.counters.record(value.is_some());
        value
    }

    pub fn insert(&self, key: String, value: V) {
        if self.capacity == 0 {
            return;
        }
        let mut state = self.state.lock();
        if let Some(index) = state.entries.get_index_of(&key) {
            let last = state.entries.len() - 1;
            state.entries.move_index(index, last);
            if let Some((_, slot)) = state.entries.get_index_mut(last) {
                *slot = value;
            }
            return;
        }
        while state.entries.len() >= self.capacity {
            if let Some((evicted, _)) = state.entries.shift_remove_index(0) {
                trace!(key = %evicted, "lru eviction");
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

#[cfg(test)]
mod tests {
    use super::LruCache;

    #[test]
    fn reading_an_entry_protects_it_from_eviction() {
        let cache = LruCache::new(2);
        cache.insert("a".to_owned(), 1);
        cache.insert("b".to_owned(), 2);
        assert_eq!(cache.get("a"), Some(1));
        cache.insert("c".to_owned(), 3);

        assert!(cache.contains_key("a"));
        assert!(!cache.contains_key("b"));
        assert!(cache.contains_key("c"));
    }
}
