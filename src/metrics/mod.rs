//! Cache Metrics System
//!
//! Provides the counters and derived statistics reported by
//! [`IntelligentCache`](crate::IntelligentCache):
//!
//! - [`AccessCounters`]: hit/miss/latency counters updated on every `get`
//! - [`CacheStats`] and [`MemoryUsage`]: the snapshot returned by `stats()`
//! - [`AccessSnapshot`] and [`EvictionRecord`]: history elements
//! - [`CacheMetrics`]: uniform `BTreeMap` reporting for simulations
//!
//! # Why BTreeMap over HashMap?
//!
//! BTreeMap is used for metric reports so that keys always come out in the
//! same order, which keeps CSV exports and test output reproducible.

use std::collections::BTreeMap;

mod history;

pub use history::{AccessSnapshot, EvictionRecord};

/// Hit, miss and access-time counters.
///
/// All counters are monotonic and only go back to zero through
/// [`AccessCounters::reset`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AccessCounters {
    /// Number of `get` calls that found an entry
    pub hit_count: u64,

    /// Number of `get` calls that found nothing
    pub miss_count: u64,

    /// Accumulated `get` latency in milliseconds
    pub total_access_time: f64,

    /// Number of `get` calls timed
    pub access_count: u64,
}

impl AccessCounters {
    /// Records a cache hit.
    pub fn record_hit(&mut self) {
        self.hit_count += 1;
    }

    /// Records a cache miss.
    pub fn record_miss(&mut self) {
        self.miss_count += 1;
    }

    /// Records the latency of one `get` call, hit or miss.
    pub fn record_access_time(&mut self, millis: f64) {
        self.total_access_time += millis;
        self.access_count += 1;
    }

    /// Hit ratio as a percentage, 0 when nothing has been requested.
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hit_count + self.miss_count;
        if total > 0 {
            (self.hit_count as f64 / total as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Mean `get` latency in milliseconds, 0 when nothing has been timed.
    pub fn average_access_time(&self) -> f64 {
        if self.access_count > 0 {
            self.total_access_time / self.access_count as f64
        } else {
            0.0
        }
    }

    /// Total number of lookups (hits + misses).
    pub fn total_accesses(&self) -> u64 {
        self.hit_count + self.miss_count
    }

    /// Zeros every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Byte usage against the configured budget.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct MemoryUsage {
    /// Bytes currently charged by entries
    pub used: u64,
    /// Configured budget in bytes
    pub total: u64,
    /// `used / total * 100`
    pub percentage: f64,
}

impl MemoryUsage {
    /// Builds a usage report; percentage is 0 for a zero budget.
    pub fn new(used: u64, total: u64) -> Self {
        let percentage = if total > 0 {
            (used as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        Self {
            used,
            total,
            percentage,
        }
    }
}

/// Derived statistics of a cache at one point in time.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CacheStats {
    /// Percentage of lookups that hit
    pub hit_ratio: f64,
    /// Mean lookup latency in milliseconds
    pub average_access_time: f64,
    /// Byte usage against the budget
    pub memory_usage: MemoryUsage,
    /// Number of stored entries
    pub entry_count: usize,
    /// Number of evictions since the last clear
    pub eviction_count: usize,
    /// Hits plus misses
    pub total_accesses: u64,
}

impl CacheStats {
    /// Convert stats to a BTreeMap for reporting
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        metrics.insert("average_access_time_ms".to_string(), self.average_access_time);
        metrics.insert("entry_count".to_string(), self.entry_count as f64);
        metrics.insert("eviction_count".to_string(), self.eviction_count as f64);
        metrics.insert("hit_ratio".to_string(), self.hit_ratio);
        metrics.insert(
            "memory_total_bytes".to_string(),
            self.memory_usage.total as f64,
        );
        metrics.insert("memory_used_bytes".to_string(), self.memory_usage.used as f64);
        metrics.insert(
            "memory_utilization".to_string(),
            self.memory_usage.percentage,
        );
        metrics.insert("total_accesses".to_string(), self.total_accesses as f64);

        if self.total_accesses > 0 {
            metrics.insert(
                "eviction_rate".to_string(),
                self.eviction_count as f64 / self.total_accesses as f64,
            );
        }

        metrics
    }
}

/// Trait for caches that report metrics to the simulator
///
/// The trait uses BTreeMap to ensure deterministic ordering of metrics, which is essential
/// for reproducible comparisons and consistent test results.
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs in deterministic order
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Name of the eviction policy currently in effect (e.g., "lru", "intelligent")
    fn algorithm_name(&self) -> &'static str;
}
