//! In-memory scan result cache
//!
//! Thread-safe TTL cache for completed RiskResults, keyed by chain plus
//! lower-cased address. Purely a response cache: entries are immutable and
//! expire; the engine never reads scores back out of it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tracing::debug;

use crate::models::{Chain, RiskResult};
use crate::utils::constants::DEFAULT_CACHE_TTL_SECS;

/// Cache entry with its creation time for TTL validation
#[derive(Clone, Debug)]
struct CacheEntry {
    result: RiskResult,
    created_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() > ttl
    }
}

/// Concurrent scan-result cache (DashMap, no explicit locking)
#[derive(Clone)]
pub struct ScanCache {
    store: Arc<DashMap<String, CacheEntry>>,
    ttl: Duration,
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
}

impl Default for ScanCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_CACHE_TTL_SECS))
    }
}

impl ScanCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            store: Arc::new(DashMap::new()),
            ttl,
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
        }
    }

    fn key(chain: Chain, contract_address: &str) -> String {
        format!("{}:{}", chain.as_str(), contract_address.trim().to_lowercase())
    }

    /// Look up a fresh cached result. Expired entries count as misses and
    /// are dropped on access.
    pub fn get(&self, chain: Chain, contract_address: &str) -> Option<RiskResult> {
        let key = Self::key(chain, contract_address);

        if let Some(entry) = self.store.get(&key) {
            if !entry.is_expired(self.ttl) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!("💾 Cache HIT for {}", key);
                return Some(entry.result.clone());
            }
        }
        // Drop the stale entry outside the read guard
        self.store.remove_if(&key, |_, entry| entry.is_expired(self.ttl));

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!("💾 Cache MISS for {}", key);
        None
    }

    pub fn insert(&self, result: RiskResult) {
        let key = Self::key(result.chain, &result.contract_address);
        self.store.insert(
            key,
            CacheEntry {
                result,
                created_at: Instant::now(),
            },
        );
    }

    /// Remove expired entries, returning how many were dropped
    pub fn cleanup_expired(&self) -> usize {
        let before = self.store.len();
        self.store.retain(|_, entry| !entry.is_expired(self.ttl));
        before - self.store.len()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.store.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

/// Cache statistics snapshot
#[derive(Debug, Clone, serde::Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RiskLabel;

    fn result(chain: Chain, address: &str) -> RiskResult {
        RiskResult {
            chain,
            contract_address: address.to_string(),
            project_name: None,
            symbol: None,
            global_score: 42.0,
            label: RiskLabel::Medium,
            components: Vec::new(),
            reputation_links: None,
        }
    }

    #[test]
    fn test_hit_after_insert_with_case_insensitive_key() {
        let cache = ScanCache::new(Duration::from_secs(60));
        cache.insert(result(Chain::Ethereum, "0xAbCd"));

        assert!(cache.get(Chain::Ethereum, "0xabcd").is_some());
        assert!(cache.get(Chain::Bsc, "0xabcd").is_none());

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_expired_entries_are_misses() {
        let cache = ScanCache::new(Duration::from_secs(0));
        cache.insert(result(Chain::Ethereum, "0xdead"));
        std::thread::sleep(Duration::from_millis(5));

        assert!(cache.get(Chain::Ethereum, "0xdead").is_none());
        assert_eq!(cache.stats().entries, 0);
    }

    #[test]
    fn test_cleanup_expired() {
        let cache = ScanCache::new(Duration::from_secs(0));
        cache.insert(result(Chain::Ethereum, "0x1"));
        cache.insert(result(Chain::Bsc, "0x2"));
        std::thread::sleep(Duration::from_millis(5));

        assert_eq!(cache.cleanup_expired(), 2);
        assert_eq!(cache.stats().entries, 0);
    }
}
