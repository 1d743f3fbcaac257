//! In-process caches shared by the ingestion and configuration stages.
//!
//! Every cache is internally synchronized and safe to share behind an `Arc`.
//! Hit/miss counters follow the same `hits`/`misses`/`size` shape for every
//! policy so callers can report them uniformly.

mod fifo;
mod fingerprint;
mod lru;
mod single_flight;
mod ttl;

pub use fifo::FifoCache;
pub use fingerprint::{fingerprint, prompt_key};
pub use lru::LruCache;
pub use single_flight::SingleFlight;
pub use ttl::TtlCache;

use crate::config::ChartConfig;
use crate::core::ParsedEntry;

/// Runtime metrics exposed by every cache in this module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
}

/// Prompt text to extracted entries, evicting the oldest insert first.
pub type PromptCache = FifoCache<Vec<ParsedEntry>>;

/// Successful read-only responses, expiring after a fixed time-to-live.
pub type ResponseCache = TtlCache<serde_json::Value>;

/// Built chart configurations, evicting the least recently used.
pub type ConfigMemo = LruCache<ChartConfig>;

#[derive(Debug, Default)]
struct Counters {
    hits: u64,
    misses: u64,
}

impl Counters {
    fn record(&mut self, hit: bool) {
        if hit {
            self.hits = self.hits.saturating_add(1);
        } else {
            self.misses = self.misses.saturating_add(1);
        }
    }

    fn stats(&self, size: usize) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            size,
        }
    }
}
