// Data models for cache simulation

use intelligent_cache::{AccessPattern, CacheStats, EvictionStrategy};
use serde::Serialize;
use std::fmt;

/// One operation issued by the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Lookup of `key`; `hit` tells whether it was found
    Get { key: String, hit: bool },
    /// Insert or overwrite of `key` with a declared size
    Put { key: String, size_kb: u64 },
}

impl Operation {
    pub fn key(&self) -> &str {
        match self {
            Operation::Get { key, .. } | Operation::Put { key, .. } => key,
        }
    }

    pub fn is_put(&self) -> bool {
        matches!(self, Operation::Put { .. })
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Get { key, hit: true } => write!(f, "GET {key} (hit)"),
            Operation::Get { key, hit: false } => write!(f, "GET {key} (miss)"),
            Operation::Put { key, size_kb } => write!(f, "PUT {key} ({size_kb}KB)"),
        }
    }
}

/// Direction of a metric between two consecutive stats snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Up,
    Down,
    Neutral,
}

/// Change of one metric between two consecutive snapshots
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trend {
    pub direction: TrendDirection,
    /// Signed change
    pub change: f64,
}

/// Changes smaller than this in either direction count as neutral
pub const TREND_NEUTRAL_BAND: f64 = 0.1;

impl Trend {
    pub fn from_change(change: f64) -> Self {
        let direction = if change > TREND_NEUTRAL_BAND {
            TrendDirection::Up
        } else if change < -TREND_NEUTRAL_BAND {
            TrendDirection::Down
        } else {
            TrendDirection::Neutral
        };
        Self { direction, change }
    }

    /// Renders the trend with a unit suffix, e.g. `↑ +1.5%`
    pub fn format(&self, unit: &str) -> String {
        let magnitude = self.change.abs();
        match self.direction {
            TrendDirection::Up => format!("↑ +{magnitude:.1}{unit}"),
            TrendDirection::Down => format!("↓ {magnitude:.1}{unit}"),
            TrendDirection::Neutral => format!("- {magnitude:.1}{unit}"),
        }
    }
}

/// Trends of the headline metrics between two operations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trends {
    pub hit_ratio: Trend,
    pub access_time: Trend,
    pub evictions: Trend,
}

impl Trends {
    pub fn between(previous: &CacheStats, current: &CacheStats) -> Self {
        Self {
            hit_ratio: Trend::from_change(current.hit_ratio - previous.hit_ratio),
            access_time: Trend::from_change(
                current.average_access_time - previous.average_access_time,
            ),
            evictions: Trend::from_change(
                current.eviction_count as f64 - previous.eviction_count as f64,
            ),
        }
    }
}

/// Configuration for a strategy comparison run
#[derive(Debug, Clone)]
pub struct ComparisonConfig {
    /// Strategies to compare
    pub strategies: Vec<EvictionStrategy>,
    /// Workload shape shared by every strategy
    pub pattern: AccessPattern,
    /// Size of the key universe
    pub key_count: usize,
    /// Operations issued per strategy
    pub operations: usize,
    /// Cache budget in megabytes
    pub cache_size_mb: u64,
    /// Seed shared by every run so all strategies see the same workload
    pub seed: u64,
    /// Simulated milliseconds between two operations
    pub tick_ms: u64,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            strategies: EvictionStrategy::all(),
            pattern: AccessPattern::Zipfian,
            key_count: 500,
            operations: 10_000,
            cache_size_mb: 1,
            seed: 42,
            tick_ms: 100,
        }
    }
}

/// Statistics for a single strategy
#[derive(Debug, Default, Clone)]
pub struct StrategyStats {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of put operations issued
    pub puts: u64,
    /// Number of evictions
    pub evictions: usize,
    /// Bytes charged at the end of the run
    pub final_bytes: u64,
    /// Highest byte usage observed after any operation
    pub peak_bytes: u64,
    /// Entries left at the end of the run
    pub final_entries: usize,
    /// Mean `get` latency reported by the cache, in milliseconds
    pub average_access_time_ms: f64,
    /// Wall-clock duration of the run in milliseconds
    pub simulation_time_ms: u64,
}

impl StrategyStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculate hit rate as percentage
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total > 0 {
            (self.hits as f64 / total as f64) * 100.0
        } else {
            0.0
        }
    }
}

/// CSV export row for comparison results
#[derive(Debug, Serialize)]
pub struct CsvResultRow {
    pub strategy: String,
    pub pattern: String,
    pub hits: u64,
    pub misses: u64,
    pub puts: u64,
    pub hit_rate: f64,
    pub evictions: usize,
    pub final_bytes: u64,
    pub peak_bytes: u64,
    pub final_entries: usize,
    pub average_access_time_ms: f64,
    pub simulation_time_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use intelligent_cache::MemoryUsage;

    #[test]
    fn test_trend_neutral_band() {
        assert_eq!(Trend::from_change(0.1).direction, TrendDirection::Neutral);
        assert_eq!(Trend::from_change(-0.1).direction, TrendDirection::Neutral);
        assert_eq!(Trend::from_change(0.11).direction, TrendDirection::Up);
        assert_eq!(Trend::from_change(-2.0).direction, TrendDirection::Down);
    }

    #[test]
    fn test_trend_format() {
        assert_eq!(Trend::from_change(1.5).format("%"), "↑ +1.5%");
        assert_eq!(Trend::from_change(-0.3).format("ms"), "↓ 0.3ms");
        assert_eq!(Trend::from_change(0.0).format(""), "- 0.0");
    }

    #[test]
    fn test_trends_between() {
        let previous = CacheStats {
            hit_ratio: 50.0,
            average_access_time: 0.01,
            memory_usage: MemoryUsage::new(0, 1024),
            eviction_count: 3,
            ..Default::default()
        };
        let current = CacheStats {
            hit_ratio: 48.0,
            average_access_time: 0.02,
            eviction_count: 4,
            ..previous.clone()
        };
        let trends = Trends::between(&previous, &current);
        assert_eq!(trends.hit_ratio.direction, TrendDirection::Down);
        assert_eq!(trends.access_time.direction, TrendDirection::Neutral);
        assert_eq!(trends.evictions.direction, TrendDirection::Up);
        assert_eq!(trends.evictions.change, 1.0);
    }

    #[test]
    fn test_hit_rate() {
        let stats = StrategyStats {
            hits: 3,
            misses: 1,
            ..StrategyStats::new()
        };
        assert_eq!(stats.hit_rate(), 75.0);
        assert_eq!(StrategyStats::new().hit_rate(), 0.0);
    }

    #[test]
    fn test_operation_display() {
        let get = Operation::Get {
            key: "key_0001".to_string(),
            hit: false,
        };
        let put = Operation::Put {
            key: "key_0002".to_string(),
            size_kb: 4,
        };
        assert_eq!(get.to_string(), "GET key_0001 (miss)");
        assert_eq!(put.to_string(), "PUT key_0002 (4KB)");
        assert_eq!(put.key(), "key_0002");
        assert!(put.is_put());
    }
}
