#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Strategy Selection Guide
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                Which Eviction Strategy Should I Use?                │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │                                                                     │
//! │  Recent keys come back soon?        ──Yes──▶  lru                   │
//! │  A few keys dominate forever?       ──Yes──▶  lfu                   │
//! │  Insertion order is all you know?   ──Yes──▶  fifo                  │
//! │  Need a baseline?                   ──Yes──▶  random                │
//! │  Blend of age, use and idle time?   ──Yes──▶  intelligent-corrected │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Reference
//!
//! | Strategy | Victim | Cost per eviction |
//! |----------|--------|-------------------|
//! | [`EvictionStrategy::Lru`] | oldest `last_access_time` | O(n) |
//! | [`EvictionStrategy::Lfu`] | lowest `access_count` | O(n) |
//! | [`EvictionStrategy::Fifo`] | oldest `creation_time` | O(n) |
//! | [`EvictionStrategy::Random`] | uniform | O(n log n) |
//! | [`EvictionStrategy::Intelligent`] | lowest composite score | O(n) |
//! | [`EvictionStrategy::IntelligentCorrected`] | highest composite score | O(n) |
//!
//! ## Driving a Cache with a Synthetic Workload
//!
//! ```rust
//! use intelligent_cache::config::IntelligentCacheConfig;
//! use intelligent_cache::{AccessPattern, AccessPatternGenerator, EvictionStrategy, IntelligentCache};
//!
//! let config = IntelligentCacheConfig {
//!     max_size_bytes: 64 * 1024,
//!     strategy: EvictionStrategy::Lru,
//!     seed: Some(1),
//!     ..Default::default()
//! };
//! let mut cache: IntelligentCache<String, u64> = IntelligentCache::new(config);
//!
//! let mut generator = AccessPatternGenerator::with_seed(1);
//! generator.set_pattern(AccessPattern::Zipfian);
//! generator.generate_keys(200);
//!
//! for i in 0..1_000 {
//!     let key = generator.next_access().unwrap().to_string();
//!     if cache.get(key.as_str()).is_none() {
//!         cache.put(key, i, 4);
//!     }
//! }
//!
//! let stats = cache.stats();
//! assert!(stats.hit_ratio > 0.0);
//! assert!(stats.memory_usage.used <= 64 * 1024);
//! ```
//!
//! ## Modules
//!
//! - [`cache`]: the byte-budgeted cache
//! - [`entry`]: stored entries and their access metadata
//! - [`strategy`]: eviction strategies and the intelligent score
//! - [`pattern`]: synthetic access-pattern generation
//! - [`config`]: configuration structures
//! - [`metrics`]: statistics, history records and metric reporting
//! - [`clock`]: time sources
//! - [`error`]: configuration errors

/// Time sources.
///
/// All access metadata is computed from a [`Clock`](clock::Clock); tests use
/// [`ManualClock`](clock::ManualClock) to control time exactly.
pub mod clock;

/// Cached entry type with access-tracking metadata.
pub mod entry;

/// Cache configuration structures.
pub mod config;

/// Eviction strategies.
///
/// Provides the [`EvictionStrategy`] enum, victim selection and the
/// composite score used by the intelligent strategies.
pub mod strategy;

/// Error types for configuration parsing and validation.
pub mod error;

/// Cache metrics system.
///
/// Hit/miss counters, derived statistics, history records and the
/// [`CacheMetrics`](metrics::CacheMetrics) reporting trait.
pub mod metrics;

/// Byte-budgeted cache with pluggable eviction.
pub mod cache;

/// Synthetic workload generation.
pub mod pattern;

pub use cache::IntelligentCache;
pub use entry::{CacheEntry, Temperature};
pub use error::{CacheError, Result};
pub use metrics::{CacheMetrics, CacheStats, MemoryUsage};
pub use pattern::{AccessPattern, AccessPatternGenerator};
pub use strategy::EvictionStrategy;
