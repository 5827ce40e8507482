use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use lru::LruCache;
use parking_lot::Mutex;

use crate::core::SearchConfig;
use crate::db::Record;
use crate::utils::{normalize_text, NormalizedText};


/// "Remember my last search" state for the presentation layer.
///
/// Entries are keyed by an explicit caller scope (a session id, a browser
/// tab...), one entry per scope. The search core never reads from it.
pub struct LastSearchCache {
    cache: Mutex<LruCache<String, CachedSearch>>,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

#[derive(Debug, Clone)]
pub struct CachedSearch {
    pub term: String,
    pub records: Vec<Record>,
    normalized_term: NormalizedText,
    stored_at: Instant,
}

#[derive(Debug, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
    pub hit_rate: f64,
}

impl LastSearchCache {
    /// A zero capacity is bumped to one.
    pub fn new(capacity: usize, ttl_secs: u64) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: Mutex::new(LruCache::new(capacity)),
            ttl: Duration::from_secs(ttl_secs),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }


    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.cache_capacity, config.cache_ttl_secs)
    }


    pub fn remember(&self, scope: &str, term: &str, records: Vec<Record>) {
        let entry = CachedSearch {
            term: term.trim().to_string(),
            records,
            normalized_term: normalize_text(term),
            stored_at: Instant::now(),
        };
        self.cache.lock().put(scope.to_string(), entry);
    }

    /// Last search stored for `scope`, if still fresh.
    pub fn last(&self, scope: &str) -> Option<CachedSearch> {
        let mut cache = self.cache.lock();
        let fresh = cache
            .get(scope)
            .map(|entry| entry.stored_at.elapsed() < self.ttl);

        match fresh {
            Some(true) => cache.get(scope).cloned(),
            Some(false) => {
                cache.pop(scope);
                None
            }
            None => None,
        }
    }

    /// Cached records when `term` is the same search (after normalization)
    /// as the one last stored for `scope`.
    pub fn lookup(&self, scope: &str, term: &str) -> Option<Vec<Record>> {
        let wanted = normalize_text(term);
        let found = self
            .last(scope)
            .filter(|entry| entry.normalized_term == wanted)
            .map(|entry| entry.records);

        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        found
    }


    pub fn forget(&self, scope: &str) {
        self.cache.lock().pop(scope);
    }

    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 { hits as f64 / total as f64 } else { 0.0 };

        CacheStats {
            hits,
            misses,
            size: self.cache.lock().len(),
            hit_rate,
        }
    }

    pub fn clear(&self) {
        self.cache.lock().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}
