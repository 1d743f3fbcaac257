use std::collections::HashMap;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;
use tracing::trace;

use super::{CacheStats, Counters};

#[derive(Debug, Clone)]
struct Stamped<V> {
    value: V,
    inserted_at: Instant,
}

#[derive(Debug)]
struct TtlState<V> {
    entries: HashMap<String, Stamped<V>>,
    counters: Counters,
}

/// Map whose entries expire a fixed time after insertion.
///
/// Expired entries are dropped lazily on read, or eagerly through
/// [`purge_expired`](Self::purge_expired). Time comes from the tokio clock,
/// so a paused runtime controls expiry.
#[derive(Debug)]
pub struct TtlCache<V> {
    ttl: Duration,
    state: Mutex<TtlState<V>>,
}

impl<V: Clone> TtlCache<V> {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            state: Mutex::new(TtlState {
                entries: HashMap::new(),
                counters: Counters::default(),
            }),
        }
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        let mut state = self.state.lock();
        let fresh = state
            .entries
            .get(key)
            .map(|entry| now.duration_since(entry.inserted_at) < self.ttl);
        let value = match fresh {
            Some(true) => state.entries.get(key).map(|entry| entry.value.clone()),
            Some(false) => {
                trace!(key, "ttl entry expired");
                state.entries.remove(key);
                None
            }
            None => None,
        };
        state.counters.record(value.is_some());
        value
    }

    /// Stores `value`, restarting the entry's lifetime.
    pub fn insert(&self, key: String, value: V) {
        if self.ttl.is_zero() {
            return;
        }
        self.state.lock().entries.insert(
            key,
            Stamped {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Removes every expired entry; returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut state = self.state.lock();
        let before = state.entries.len();
        state
            .entries
            .retain(|_, entry| now.duration_since(entry.inserted_at) < self.ttl);
        before - state.entries.len()
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
