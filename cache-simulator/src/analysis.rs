//! Cache analysis and insights
//!
//! Read-only summaries of a cache's contents and statistics: which keys are
//! most and least used, which key is likely to be requested next, how the
//! entries split by temperature, and a plain-language verdict on how well
//! the current strategy is doing.

use std::cmp::Reverse;
use std::fmt;
use std::hash::Hash;

use intelligent_cache::clock::Clock;
use intelligent_cache::{CacheStats, IntelligentCache, Temperature};

/// Weight of the hit ratio in the efficiency score
const EFFICIENCY_HIT_WEIGHT: f64 = 0.7;
/// Weight of memory utilisation in the efficiency score
const EFFICIENCY_MEMORY_WEIGHT: f64 = 0.3;

/// Entry counts per temperature
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TemperatureDistribution {
    pub hot: usize,
    pub warm: usize,
    pub cold: usize,
}

impl FromIterator<Temperature> for TemperatureDistribution {
    fn from_iter<I: IntoIterator<Item = Temperature>>(iter: I) -> Self {
        iter.into_iter().fold(Self::default(), |mut dist, temperature| {
            match temperature {
                Temperature::Hot => dist.hot += 1,
                Temperature::Warm => dist.warm += 1,
                Temperature::Cold => dist.cold += 1,
            }
            dist
        })
    }
}

impl fmt::Display for TemperatureDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Hot: {}, Warm: {}, Cold: {} entries",
            self.hot, self.warm, self.cold
        )
    }
}

/// Verdict on the hit ratio of the active strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effectiveness {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Effectiveness {
    pub fn from_hit_ratio(hit_ratio: f64) -> Self {
        if hit_ratio > 80.0 {
            Effectiveness::Excellent
        } else if hit_ratio > 60.0 {
            Effectiveness::Good
        } else if hit_ratio > 40.0 {
            Effectiveness::Fair
        } else {
            Effectiveness::Poor
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Effectiveness::Excellent => "Excellent performance - optimal caching",
            Effectiveness::Good => "Good performance - effective caching",
            Effectiveness::Fair => "Fair performance - room for improvement",
            Effectiveness::Poor => "Poor performance - consider different strategy",
        }
    }
}

/// Suggested next step, first matching rule wins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    /// Hit ratio below 50%
    GrowCacheOrChangeStrategy,
    /// More evictions than half the resident entries
    HighEvictionRate,
    /// Mean lookup slower than 10 ms
    SlowAccess,
    Monitor,
}

impl Recommendation {
    pub fn from_stats(stats: &CacheStats) -> Self {
        if stats.hit_ratio < 50.0 {
            Recommendation::GrowCacheOrChangeStrategy
        } else if stats.eviction_count as f64 > stats.entry_count as f64 * 0.5 {
            Recommendation::HighEvictionRate
        } else if stats.average_access_time > 10.0 {
            Recommendation::SlowAccess
        } else {
            Recommendation::Monitor
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Recommendation::GrowCacheOrChangeStrategy => {
                "Consider increasing cache size or changing eviction strategy"
            }
            Recommendation::HighEvictionRate => {
                "High eviction rate - consider larger cache or different access patterns"
            }
            Recommendation::SlowAccess => {
                "Slow access times - review data structure or consider optimization"
            }
            Recommendation::Monitor => "Monitor performance trends",
        }
    }
}

/// Coarse band of an entry's relevance score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelevanceBand {
    High,
    Medium,
    Low,
}

impl RelevanceBand {
    pub fn from_score(score: f64) -> Self {
        if score > 70.0 {
            RelevanceBand::High
        } else if score > 40.0 {
            RelevanceBand::Medium
        } else {
            RelevanceBand::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RelevanceBand::High => "high",
            RelevanceBand::Medium => "medium",
            RelevanceBand::Low => "low",
        }
    }
}

/// Everything the analysis panel reports about one cache
#[derive(Debug, Clone, PartialEq)]
pub struct CacheAnalysis<K> {
    pub most_accessed: Option<K>,
    pub least_accessed: Option<K>,
    pub predicted_next: Option<K>,
    pub efficiency: f64,
    pub distribution: TemperatureDistribution,
    pub effectiveness: Effectiveness,
    pub recommendation: Recommendation,
}

/// Key with the highest access count; the earliest inserted wins ties
pub fn most_accessed_key<K, V, C>(cache: &IntelligentCache<K, V, C>) -> Option<&K>
where
    K: Hash + Eq + Clone + fmt::Debug,
    C: Clock,
{
    cache
        .entries()
        .max_by_key(|e| (e.access_count(), Reverse(e.insertion_order())))
        .map(|e| &e.key)
}

/// Key with the lowest access count; the latest inserted wins ties
pub fn least_accessed_key<K, V, C>(cache: &IntelligentCache<K, V, C>) -> Option<&K>
where
    K: Hash + Eq + Clone + fmt::Debug,
    C: Clock,
{
    cache
        .entries()
        .min_by_key(|e| (e.access_count(), Reverse(e.insertion_order())))
        .map(|e| &e.key)
}

/// Most recently accessed key, used as a naive next-access prediction
pub fn predicted_next_access<K, V, C>(cache: &IntelligentCache<K, V, C>) -> Option<&K>
where
    K: Hash + Eq + Clone + fmt::Debug,
    C: Clock,
{
    cache
        .entries()
        .max_by_key(|e| (e.last_access_time(), Reverse(e.insertion_order())))
        .map(|e| &e.key)
}

/// `hit_ratio * 0.7 + (memory percentage / 100) * 0.3`
///
/// The hit ratio enters as a percentage while memory enters as a fraction,
/// so the score is dominated by the hit ratio.
pub fn cache_efficiency(stats: &CacheStats) -> f64 {
    stats.hit_ratio * EFFICIENCY_HIT_WEIGHT
        + (stats.memory_usage.percentage / 100.0) * EFFICIENCY_MEMORY_WEIGHT
}

/// Counts entries by the temperature recorded at their last access
///
/// Entries that have never been read keep the `Cold` they were created with.
pub fn temperature_distribution<K, V, C>(
    cache: &IntelligentCache<K, V, C>,
) -> TemperatureDistribution
where
    K: Hash + Eq + Clone + fmt::Debug,
    C: Clock,
{
    cache.entries().map(|entry| entry.temperature()).collect()
}

/// Classifies every entry by its idle time as of the cache's current time
pub fn temperature_distribution_as_of_now<K, V, C>(
    cache: &IntelligentCache<K, V, C>,
) -> TemperatureDistribution
where
    K: Hash + Eq + Clone + fmt::Debug,
    C: Clock,
{
    let now = cache.now_millis();
    cache
        .entries()
        .map(|entry| Temperature::classify(entry.idle_millis(now)))
        .collect()
}

/// Runs every analysis over `cache`
///
/// An empty cache reports no keys and an efficiency of 0.
pub fn analyze<K, V, C>(cache: &IntelligentCache<K, V, C>) -> CacheAnalysis<K>
where
    K: Hash + Eq + Clone + fmt::Debug,
    C: Clock,
{
    let stats = cache.stats();
    let efficiency = if cache.is_empty() {
        0.0
    } else {
        cache_efficiency(&stats)
    };

    CacheAnalysis {
        most_accessed: most_accessed_key(cache).cloned(),
        least_accessed: least_accessed_key(cache).cloned(),
        predicted_next: predicted_next_access(cache).cloned(),
        efficiency,
        distribution: temperature_distribution(cache),
        effectiveness: Effectiveness::from_hit_ratio(stats.hit_ratio),
        recommendation: Recommendation::from_stats(&stats),
    }
}
