//! Cache Configuration Module
//!
//! Configuration structs have all public fields for simple instantiation,
//! with a `Default` that matches the stock simulation setup.
//!
//! # Sizing
//!
//! The cache enforces a single limit, `max_size_bytes`. Every entry is
//! charged `size_kb * 1024` bytes against it, where `size_kb` is declared by
//! the caller on `put`. There is no entry-count limit.
//!
//! ```text
//! 100 MB budget, 1-10 KB entries  ->  roughly 18,000 entries at steady state
//! ```
//!
//! # Examples
//!
//! ```
//! use intelligent_cache::config::IntelligentCacheConfig;
//! use intelligent_cache::{EvictionStrategy, IntelligentCache};
//!
//! let config = IntelligentCacheConfig {
//!     max_size_bytes: 10 * 1024,
//!     strategy: EvictionStrategy::Fifo,
//!     seed: Some(7),
//!     ..Default::default()
//! };
//! let cache: IntelligentCache<String, String> = IntelligentCache::new(config);
//! assert_eq!(cache.max_size_bytes(), 10 * 1024);
//! ```

use core::fmt;

use crate::error::{CacheError, Result};
use crate::strategy::EvictionStrategy;

/// Default cache budget in megabytes.
pub const DEFAULT_MAX_SIZE_MB: u64 = 100;

/// Default number of access snapshots retained.
pub const DEFAULT_HISTORY_LIMIT: usize = 1000;

/// Configuration for an [`IntelligentCache`](crate::IntelligentCache).
#[derive(Clone, Copy, PartialEq)]
pub struct IntelligentCacheConfig {
    /// Byte budget for the sum of all entry footprints.
    pub max_size_bytes: u64,
    /// Eviction strategy in effect at construction.
    pub strategy: EvictionStrategy,
    /// Seed for the random strategy. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Maximum number of access snapshots kept; older ones are dropped.
    pub history_limit: usize,
}

impl IntelligentCacheConfig {
    /// Configuration with a budget given in megabytes, saturating at
    /// `u64::MAX` bytes.
    pub fn from_megabytes(max_size_mb: u64) -> Self {
        Self {
            max_size_bytes: max_size_mb.saturating_mul(1024 * 1024),
            ..Default::default()
        }
    }

    /// Checks that the configuration describes a usable cache.
    pub fn validate(&self) -> Result<()> {
        if self.max_size_bytes == 0 {
            return Err(CacheError::InvalidConfig(
                "max_size_bytes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for IntelligentCacheConfig {
    fn default() -> Self {
        Self {
            max_size_bytes: DEFAULT_MAX_SIZE_MB * 1024 * 1024,
            strategy: EvictionStrategy::default(),
            seed: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl fmt::Debug for IntelligentCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntelligentCacheConfig")
            .field("max_size_bytes", &self.max_size_bytes)
            .field("strategy", &self.strategy)
            .field("seed", &self.seed)
            .field("history_limit", &self.history_limit)
            .finish()
    }
}
