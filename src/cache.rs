//! Intelligent Cache Implementation
//!
//! A byte-budgeted key-value store whose eviction policy can be switched at
//! runtime. Every entry is charged `size_kb * 1024` bytes; whenever the sum
//! exceeds the budget the active [`EvictionStrategy`] removes one entry at a
//! time until the cache fits again.
//!
//! # Operations
//!
//! - `put`: insert or overwrite. An overwrite replaces the value and size and
//!   counts as an access. Eviction runs afterwards, so a freshly inserted
//!   entry can be its own victim.
//! - `get`: returns the value or `None`. Hits update the entry's access
//!   metadata; hits and misses are both counted and timed.
//! - `evict`: removes exactly one entry chosen by the strategy. There is no
//!   explicit delete; entries only leave through eviction or `clear`.
//! - `stats`: derived statistics, no side effects.
//!
//! # Oversized Entries
//!
//! A single entry larger than the whole budget is accepted without error.
//! Eviction keeps running while the cache is over budget, so every other
//! entry and finally the oversized one itself are evicted and the cache ends
//! up empty. The eviction loop stops on an empty cache, so `put` always
//! terminates.
//!
//! # Thread Safety
//!
//! This implementation is single-threaded. Reads mutate access metadata, so
//! every operation takes `&mut self`.
//!
//! # Example
//!
//! ```
//! use intelligent_cache::clock::ManualClock;
//! use intelligent_cache::config::IntelligentCacheConfig;
//! use intelligent_cache::{EvictionStrategy, IntelligentCache};
//!
//! let clock = ManualClock::new(0);
//! let config = IntelligentCacheConfig {
//!     max_size_bytes: 2 * 1024,
//!     strategy: EvictionStrategy::Lru,
//!     ..Default::default()
//! };
//! let mut cache = IntelligentCache::with_clock(config, clock.clone());
//!
//! cache.put("a", 1, 1);
//! clock.advance(10);
//! cache.put("b", 2, 1);
//! clock.advance(10);
//! cache.get(&"a");        // "a" is now more recent than "b"
//! clock.advance(10);
//! cache.put("c", 3, 1);   // over budget: "b" is evicted
//!
//! assert!(cache.get(&"b").is_none());
//! assert_eq!(cache.current_size_bytes(), 2 * 1024);
//! ```

use core::borrow::Borrow;
use core::fmt;
use core::hash::Hash;
use std::collections::{BTreeMap, VecDeque};
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

use crate::clock::{Clock, SystemClock};
use crate::config::IntelligentCacheConfig;
use crate::entry::CacheEntry;
use crate::metrics::{
    AccessCounters, AccessSnapshot, CacheMetrics, CacheStats, EvictionRecord, MemoryUsage,
};
use crate::strategy::{self, EvictionStrategy};

/// Bounded key-value store with pluggable eviction.
///
/// `C` is the time source used for all access metadata; it defaults to the
/// system wall clock.
pub struct IntelligentCache<K, V, C = SystemClock> {
    /// Byte budget, eviction strategy and history limit.
    config: IntelligentCacheConfig,

    /// Sum of `size_bytes()` over all entries. Wide enough that the sum
    /// never overflows even when single entries saturate `u64`.
    charged_bytes: u128,

    entries: HashMap<K, CacheEntry<K, V>>,

    counters: AccessCounters,

    /// Most recent snapshots, oldest first, capped at `config.history_limit`.
    access_history: VecDeque<AccessSnapshot>,

    eviction_history: Vec<EvictionRecord<K>>,

    /// Next insertion sequence number.
    next_sequence: u64,

    clock: C,

    /// Drives the random strategy.
    rng: StdRng,
}

impl<K: Hash + Eq + Clone + fmt::Debug, V> IntelligentCache<K, V, SystemClock> {
    /// Creates a cache that reads time from the system clock.
    pub fn new(config: IntelligentCacheConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<K: Hash + Eq + Clone + fmt::Debug, V, C: Clock> IntelligentCache<K, V, C> {
    /// Creates a cache that reads time from `clock`.
    pub fn with_clock(config: IntelligentCacheConfig, clock: C) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            charged_bytes: 0,
            entries: HashMap::new(),
            counters: AccessCounters::default(),
            access_history: VecDeque::with_capacity(config.history_limit.min(1024)),
            eviction_history: Vec::new(),
            next_sequence: 0,
            clock,
            rng,
        }
    }

    /// Inserts or overwrites `key` with a declared size of `size_kb` kilobytes.
    ///
    /// Overwriting replaces value and size, and records an access on the
    /// existing entry. Afterwards entries are evicted one at a time until the
    /// cache is within budget or empty.
    pub fn put(&mut self, key: K, value: V, size_kb: u64) {
        let now = self.clock.now_millis();

        if let Some(existing) = self.entries.get_mut(&key) {
            self.charged_bytes -= u128::from(existing.size_bytes());
            existing.value = value;
            existing.size_kb = size_kb;
            existing.access(now);
            self.charged_bytes += u128::from(existing.size_bytes());
        } else {
            let mut entry = CacheEntry::new(key.clone(), value, size_kb, now);
            entry.sequence = self.next_sequence;
            self.next_sequence += 1;
            self.charged_bytes += u128::from(entry.size_bytes());
            self.entries.insert(key, entry);
        }

        while self.over_budget() && !self.entries.is_empty() {
            self.evict();
        }

        self.record_snapshot(now);
    }

    /// Looks up `key`.
    ///
    /// On a hit the entry's access metadata is updated. Hits and misses are
    /// both counted, timed and recorded in the access history.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq + fmt::Debug,
    {
        let start = Instant::now();
        let now = self.clock.now_millis();

        let hit = match self.entries.get_mut(key) {
            Some(entry) => {
                entry.access(now);
                log::trace!("[HIT] Cache hit for key: {:?}", entry.key);
                true
            }
            None => false,
        };

        if hit {
            self.counters.record_hit();
        } else {
            self.counters.record_miss();
            log::trace!("[MISS] Cache miss for key: {key:?}");
        }

        self.counters
            .record_access_time(start.elapsed().as_secs_f64() * 1000.0);
        self.record_snapshot(now);

        if hit {
            self.entries.get(key).map(|entry| &entry.value)
        } else {
            None
        }
    }

    /// Returns the value for `key` without recording an access.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.entries.get(key).map(|entry| &entry.value)
    }

    /// Returns `true` if `key` is stored, without recording an access.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.entries.contains_key(key)
    }

    /// Returns the stored entry for `key`, without recording an access.
    pub fn entry<Q>(&self, key: &Q) -> Option<&CacheEntry<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.entries.get(key)
    }

    /// Removes one entry chosen by the active strategy.
    ///
    /// Returns the evicted key and value, or `None` if the cache is empty.
    pub fn evict(&mut self) -> Option<(K, V)> {
        let now = self.clock.now_millis();
        let strategy = self.config.strategy;

        let victim = strategy::select_victim(strategy, self.entries.values(), now, &mut self.rng)
            .map(|entry| entry.key.clone())?;

        let entry = self.entries.remove(&victim)?;
        self.charged_bytes -= u128::from(entry.size_bytes());

        log::debug!(
            "[EVICTION] Evicted {:?} ({}), accesses={}, relevance={:.1}",
            entry.key,
            strategy.reason(),
            entry.access_count(),
            entry.relevance_score()
        );

        self.eviction_history.push(EvictionRecord {
            key: victim,
            reason: strategy.reason(),
            timestamp: now,
            access_count: entry.access_count(),
            relevance_score: entry.relevance_score(),
        });

        Some((entry.key, entry.value))
    }

    /// Switches the eviction strategy. Stored entries are untouched; only
    /// future evictions use the new policy.
    pub fn set_eviction_strategy(&mut self, strategy: EvictionStrategy) {
        if self.config.strategy != strategy {
            log::info!(
                "Eviction strategy changed from {} to {}",
                self.config.strategy,
                strategy
            );
        }
        self.config.strategy = strategy;
    }

    /// Returns the active eviction strategy.
    #[inline]
    pub fn eviction_strategy(&self) -> EvictionStrategy {
        self.config.strategy
    }

    /// Changes the byte budget, evicting immediately if the cache no longer fits.
    pub fn set_max_size_bytes(&mut self, max_size_bytes: u64) {
        log::info!(
            "Cache budget changed from {} to {} bytes",
            self.config.max_size_bytes,
            max_size_bytes
        );
        self.config.max_size_bytes = max_size_bytes;
        while self.over_budget() && !self.entries.is_empty() {
            self.evict();
        }
    }

    /// Returns the byte budget.
    #[inline]
    pub fn max_size_bytes(&self) -> u64 {
        self.config.max_size_bytes
    }

    /// Returns the bytes currently charged by entries, saturating at
    /// `u64::MAX`.
    #[inline]
    pub fn current_size_bytes(&self) -> u64 {
        u64::try_from(self.charged_bytes).unwrap_or(u64::MAX)
    }

    fn over_budget(&self) -> bool {
        self.charged_bytes > u128::from(self.config.max_size_bytes)
    }

    /// Returns the number of stored entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over stored entries in unspecified order.
    pub fn entries(&self) -> impl Iterator<Item = &CacheEntry<K, V>> {
        self.entries.values()
    }

    /// Derived statistics. Calling this twice without a mutation in between
    /// returns equal values.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hit_ratio: self.counters.hit_ratio(),
            average_access_time: self.counters.average_access_time(),
            memory_usage: MemoryUsage::new(self.current_size_bytes(), self.config.max_size_bytes),
            entry_count: self.entries.len(),
            eviction_count: self.eviction_history.len(),
            total_accesses: self.counters.total_accesses(),
        }
    }

    /// Raw hit/miss/latency counters.
    #[inline]
    pub fn counters(&self) -> &AccessCounters {
        &self.counters
    }

    /// Number of lookups that hit.
    #[inline]
    pub fn hit_count(&self) -> u64 {
        self.counters.hit_count
    }

    /// Number of lookups that missed.
    #[inline]
    pub fn miss_count(&self) -> u64 {
        self.counters.miss_count
    }

    /// Snapshots taken after each `get`/`put`, oldest first.
    pub fn access_history(&self) -> &VecDeque<AccessSnapshot> {
        &self.access_history
    }

    /// Every eviction since the last clear, in order.
    pub fn eviction_history(&self) -> &[EvictionRecord<K>] {
        &self.eviction_history
    }

    /// Current time according to the cache's clock.
    #[inline]
    pub fn now_millis(&self) -> u64 {
        self.clock.now_millis()
    }

    /// Empties the cache and zeros every counter and history.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.charged_bytes = 0;
        self.counters.reset();
        self.access_history.clear();
        self.eviction_history.clear();
        log::info!("Cache cleared");
    }

    fn record_snapshot(&mut self, now: u64) {
        if self.config.history_limit == 0 {
            return;
        }
        self.access_history.push_back(AccessSnapshot {
            timestamp: now,
            hit_ratio: self.counters.hit_ratio(),
            entry_count: self.entries.len(),
            current_size_bytes: self.current_size_bytes(),
        });
        while self.access_history.len() > self.config.history_limit {
            self.access_history.pop_front();
        }
    }
}

impl<K: Hash + Eq + Clone + fmt::Debug, V, C: Clock> CacheMetrics for IntelligentCache<K, V, C> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.stats().to_btreemap();
        metrics.insert("hit_count".to_string(), self.counters.hit_count as f64);
        metrics.insert("miss_count".to_string(), self.counters.miss_count as f64);
        metrics
    }

    fn algorithm_name(&self) -> &'static str {
        self.config.strategy.as_str()
    }
}

impl<K: fmt::Debug, V, C> fmt::Debug for IntelligentCache<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntelligentCache")
            .field("strategy", &self.config.strategy)
            .field("max_size_bytes", &self.config.max_size_bytes)
            .field("current_size_bytes", &self.charged_bytes)
            .field("len", &self.entries.len())
            .field("counters", &self.counters)
            .field("evictions", &self.eviction_history.len())
            .finish()
    }
}
