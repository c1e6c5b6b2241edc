//! Cache Entry Type
//!
//! This module provides the `CacheEntry<K, V>` record stored by
//! [`IntelligentCache`](crate::IntelligentCache). Besides the key and value,
//! each entry carries the access-tracking metadata that the eviction
//! strategies inspect:
//!
//! - `access_count`: incremented on every read hit or overwrite
//! - `creation_time`: set once at insertion
//! - `last_access_time`: updated on every access
//! - `relevance_score`: 0-100 blend of access frequency and recency
//! - `temperature`: hot / warm / cold classification of idle time
//!
//! # Derived Fields
//!
//! `relevance_score` and `temperature` are recomputed only inside
//! [`CacheEntry::access`]. They describe the entry as of its last touch, not
//! as of the current wall-clock time. Because temperature is classified from
//! the time since the access that was just recorded, an entry is always `Hot`
//! right after `access()`.
//!
//! # Time
//!
//! Entries never read a clock themselves. All timestamps are milliseconds
//! supplied by the owning cache from its [`Clock`](crate::clock::Clock).
//!
//! ```
//! use intelligent_cache::entry::{CacheEntry, Temperature};
//!
//! let mut entry = CacheEntry::new("key", "value", 4, 1_000);
//! assert_eq!(entry.access_count(), 0);
//! assert_eq!(entry.temperature(), Temperature::Cold);
//! assert_eq!(entry.relevance_score(), 50.0);
//!
//! entry.access(3_000);
//! assert_eq!(entry.access_count(), 1);
//! assert_eq!(entry.temperature(), Temperature::Hot);
//! assert_eq!(entry.size_bytes(), 4 * 1024);
//! ```

use core::fmt;

/// Idle time below which an entry is classified as hot.
pub const HOT_THRESHOLD_MS: u64 = 5_000;

/// Idle time below which an entry is classified as warm.
pub const WARM_THRESHOLD_MS: u64 = 30_000;

/// Relevance score given to freshly inserted entries.
pub const INITIAL_RELEVANCE: f64 = 50.0;

/// Coarse recency classification of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Temperature {
    /// Accessed within the last 5 seconds.
    Hot,
    /// Accessed within the last 30 seconds.
    Warm,
    /// Idle for 30 seconds or more.
    Cold,
}

impl Temperature {
    /// Classifies an idle duration in milliseconds.
    ///
    /// ```
    /// use intelligent_cache::entry::Temperature;
    ///
    /// assert_eq!(Temperature::classify(4_999), Temperature::Hot);
    /// assert_eq!(Temperature::classify(5_000), Temperature::Warm);
    /// assert_eq!(Temperature::classify(30_000), Temperature::Cold);
    /// ```
    pub fn classify(idle_millis: u64) -> Self {
        if idle_millis < HOT_THRESHOLD_MS {
            Temperature::Hot
        } else if idle_millis < WARM_THRESHOLD_MS {
            Temperature::Warm
        } else {
            Temperature::Cold
        }
    }

    /// Lowercase name of the temperature.
    pub fn as_str(&self) -> &'static str {
        match self {
            Temperature::Hot => "hot",
            Temperature::Warm => "warm",
            Temperature::Cold => "cold",
        }
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cached key/value pair with its access-tracking metadata.
///
/// `size_kb` is declared by the caller at insertion time and is never
/// inferred from the value.
pub struct CacheEntry<K, V> {
    /// The cached key
    pub key: K,

    /// The cached value
    pub value: V,

    /// Declared size in kilobytes.
    pub size_kb: u64,

    access_count: u64,

    /// Insertion timestamp (milliseconds).
    creation_time: u64,

    /// Timestamp of the most recent access (milliseconds).
    last_access_time: u64,

    relevance_score: f64,

    temperature: Temperature,

    /// Insertion order within the owning cache; breaks ties between
    /// otherwise equal eviction candidates.
    pub(crate) sequence: u64,
}

impl<K, V> CacheEntry<K, V> {
    /// Creates an entry inserted at `now`.
    ///
    /// New entries start with zero accesses, a neutral relevance of 50 and
    /// a `Cold` temperature.
    #[inline]
    pub fn new(key: K, value: V, size_kb: u64, now: u64) -> Self {
        Self {
            key,
            value,
            size_kb,
            access_count: 0,
            creation_time: now,
            last_access_time: now,
            relevance_score: INITIAL_RELEVANCE,
            temperature: Temperature::Cold,
            sequence: 0,
        }
    }

    /// Records an access at `now`.
    ///
    /// Increments the access count, moves `last_access_time` forward and
    /// recomputes temperature and relevance.
    pub fn access(&mut self, now: u64) {
        self.access_count += 1;
        // A clock that went backwards must not break creation <= last access.
        self.last_access_time = now.max(self.creation_time);
        self.update_temperature(now);
        self.update_relevance(now);
    }

    fn update_temperature(&mut self, now: u64) {
        self.temperature = Temperature::classify(self.idle_millis(now));
    }

    fn update_relevance(&mut self, now: u64) {
        let age_secs = self.age_millis(now) as f64 / 1000.0;
        let access_frequency = self.access_count as f64 / age_secs.max(1.0);
        let recency_score = (100.0 - self.idle_millis(now) as f64 / 1000.0).max(0.0);

        self.relevance_score = (access_frequency * 20.0 + recency_score * 0.8).min(100.0);
    }

    /// Milliseconds elapsed since insertion.
    #[inline]
    pub fn age_millis(&self, now: u64) -> u64 {
        now.saturating_sub(self.creation_time)
    }

    /// Milliseconds elapsed since the last access.
    #[inline]
    pub fn idle_millis(&self, now: u64) -> u64 {
        now.saturating_sub(self.last_access_time)
    }

    /// Number of accesses recorded so far.
    #[inline]
    pub fn access_count(&self) -> u64 {
        self.access_count
    }

    /// Insertion timestamp in milliseconds.
    #[inline]
    pub fn creation_time(&self) -> u64 {
        self.creation_time
    }

    /// Timestamp of the last access in milliseconds.
    #[inline]
    pub fn last_access_time(&self) -> u64 {
        self.last_access_time
    }

    /// Relevance as of the last access, in `[0, 100]`.
    #[inline]
    pub fn relevance_score(&self) -> f64 {
        self.relevance_score
    }

    /// Temperature as of the last access.
    #[inline]
    pub fn temperature(&self) -> Temperature {
        self.temperature
    }

    /// Position of this entry in the owning cache's insertion order.
    #[inline]
    pub fn insertion_order(&self) -> u64 {
        self.sequence
    }

    /// Footprint charged against the cache budget, saturating at `u64::MAX`.
    #[inline]
    pub fn size_bytes(&self) -> u64 {
        self.size_kb.saturating_mul(1024)
    }
}

impl<K: Clone, V: Clone> Clone for CacheEntry<K, V> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            value: self.value.clone(),
            size_kb: self.size_kb,
            access_count: self.access_count,
            creation_time: self.creation_time,
            last_access_time: self.last_access_time,
            relevance_score: self.relevance_score,
            temperature: self.temperature,
            sequence: self.sequence,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for CacheEntry<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheEntry")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("size_kb", &self.size_kb)
            .field("access_count", &self.access_count)
            .field("creation_time", &self.creation_time)
            .field("last_access_time", &self.last_access_time)
            .field("relevance_score", &self.relevance_score)
            .field("temperature", &self.temperature)
            .finish()
    }
}
