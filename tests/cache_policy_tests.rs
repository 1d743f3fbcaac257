use std::time::Duration;

use chart_pipeline::cache::{
    CacheStats, FifoCache, LruCache, PromptCache, TtlCache, fingerprint, prompt_key,
};
use chart_pipeline::core::{ChartKind, ParsedEntry};
use serde_json::json;

#[test]
fn fifo_evicts_oldest_insert_regardless_of_reads() {
    let cache = FifoCache::new(2);
    cache.insert("a".to_owned(), 1);
    cache.insert("b".to_owned(), 2);
    assert_eq!(cache.get("a"), Some(1));
    cache.insert("c".to_owned(), 3);

    assert!(!cache.contains_key("a"));
    assert_eq!(cache.get("b"), Some(2));
    assert_eq!(cache.get("c"), Some(3));
    assert_eq!(cache.len(), 2);
}

#[test]
fn fifo_reinsert_replaces_in_place() {
    let cache = FifoCache::new(2);
    cache.insert("a".to_owned(), 1);
    cache.insert("b".to_owned(), 2);
    cache.insert("a".to_owned(), 10);
    cache.insert("c".to_owned(), 3);

    // `a` kept its original slot, so it is still the oldest.
    assert!(!cache.contains_key("a"));
    assert!(cache.contains_key("b"));
}

#[test]
fn lru_evicts_least_recently_used() {
    let cache = LruCache::new(3);
    for key in ["a", "b", "c"] {
        cache.insert(key.to_owned(), key.len());
    }
    cache.get("a");
    cache.insert("b".to_owned(), 20);
    cache.insert("d".to_owned(), 4);

    assert!(cache.contains_key("a"));
    assert!(cache.contains_key("b"));
    assert!(!cache.contains_key("c"));
    assert_eq!(cache.get("b"), Some(20));
}

#[test]
fn zero_capacity_stores_nothing() {
    let fifo = FifoCache::new(0);
    fifo.insert("a".to_owned(), 1);
    let lru = LruCache::new(0);
    lru.insert("a".to_owned(), 1);

    assert!(fifo.is_empty());
    assert!(lru.is_empty());
}

#[test]
fn stats_track_hits_misses_and_size_and_clear_resets() {
    let cache: PromptCache = FifoCache::new(4);
    let entries: Vec<ParsedEntry> = ParsedEntry::new("a", 1.0).into_iter().collect();
    let key = prompt_key(ChartKind::Bar, "a is 1");

    assert_eq!(cache.get(&key), None);
    cache.insert(key.clone(), entries.clone());
    assert_eq!(cache.get(&key), Some(entries));
    assert_eq!(
        cache.stats(),
        CacheStats {
            hits: 1,
            misses: 1,
            size: 1
        }
    );

    cache.clear();
    assert_eq!(cache.stats(), CacheStats::default());
}

#[tokio::test(start_paused = true)]
async fn ttl_entries_expire_after_time_to_live() {
    let cache = TtlCache::new(Duration::from_secs(300));
    cache.insert("k".to_owned(), json!({"ok": true}));

    tokio::time::advance(Duration::from_secs(299)).await;
    assert_eq!(cache.get("k"), Some(json!({"ok": true})));

    tokio::time::advance(Duration::from_secs(1)).await;
    assert_eq!(cache.get("k"), None);
    assert!(cache.is_empty());
}

#[tokio::test(start_paused = true)]
async fn ttl_purge_drops_only_expired_entries() {
    let cache = TtlCache::new(Duration::from_secs(10));
    cache.insert("old".to_owned(), 1);
    tokio::time::advance(Duration::from_secs(6)).await;
    cache.insert("new".to_owned(), 2);
    tokio::time::advance(Duration::from_secs(5)).await;

    assert_eq!(cache.purge_expired(), 1);
    assert_eq!(cache.get("new"), Some(2));
}

#[tokio::test(start_paused = true)]
async fn ttl_reinsert_restarts_lifetime() {
    let cache = TtlCache::new(Duration::from_secs(10));
    cache.insert("k".to_owned(), 1);
    tokio::time::advance(Duration::from_secs(8)).await;
    cache.insert("k".to_owned(), 2);
    tokio::time::advance(Duration::from_secs(8)).await;

    assert_eq!(cache.get("k"), Some(2));
}

#[test]
fn fingerprints_are_stable_and_content_addressed() {
    let a = fingerprint(&json!({"method": "GET", "endpoint": "/x"})).expect("fingerprint");
    let b = fingerprint(&json!({"method": "GET", "endpoint": "/x"})).expect("fingerprint");
    let c = fingerprint(&json!({"method": "GET", "endpoint": "/y"})).expect("fingerprint");
    assert_eq!(a, b);
    assert_ne!(a, c);
}
