//! Eviction Strategies
//!
//! Each strategy picks exactly one victim among the current entries when the
//! cache is over its byte budget. All strategies scan every entry, so a
//! single eviction is O(n); the cache is meant for policy comparison, not for
//! hot-path serving.
//!
//! | Strategy | Victim | Reason recorded |
//! |----------|--------|-----------------|
//! | `lru` | smallest `last_access_time` | Least Recently Used |
//! | `lfu` | smallest `access_count` | Least Frequently Used |
//! | `fifo` | smallest `creation_time` | First In, First Out |
//! | `random` | uniform among entries | Random Selection |
//! | `intelligent` | lowest composite score | Intelligent Analysis |
//! | `intelligent-corrected` | highest composite score | Intelligent Analysis (corrected) |
//!
//! Ties are broken by insertion order: the earliest inserted candidate wins,
//! which keeps eviction deterministic regardless of hash map iteration order.
//!
//! # Intelligent Score
//!
//! ```text
//! score = 0.3 * age_secs
//!       + 0.3 * (100 - access_count)
//!       + 0.2 * idle_secs
//!       + 0.2 * (100 - relevance_score)
//! ```
//!
//! The `intelligent` strategy evicts the entry with the LOWEST score. Old,
//! idle, rarely used entries score high and are therefore kept, while young
//! and frequently used entries score low and go first. The
//! `intelligent-corrected` strategy evicts the HIGHEST score instead.

use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

use rand::Rng;

use crate::entry::CacheEntry;
use crate::error::CacheError;

/// Policy used to choose which entry to remove when over capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum EvictionStrategy {
    /// Least recently accessed entry.
    Lru,
    /// Least frequently accessed entry.
    Lfu,
    /// Oldest inserted entry.
    Fifo,
    /// Uniformly random entry.
    Random,
    /// Lowest multi-factor score.
    #[default]
    Intelligent,
    /// Highest multi-factor score.
    IntelligentCorrected,
}

impl EvictionStrategy {
    /// Configuration name of the strategy.
    pub fn as_str(&self) -> &'static str {
        match self {
            EvictionStrategy::Lru => "lru",
            EvictionStrategy::Lfu => "lfu",
            EvictionStrategy::Fifo => "fifo",
            EvictionStrategy::Random => "random",
            EvictionStrategy::Intelligent => "intelligent",
            EvictionStrategy::IntelligentCorrected => "intelligent-corrected",
        }
    }

    /// Reason recorded in the eviction history.
    pub fn reason(&self) -> &'static str {
        match self {
            EvictionStrategy::Lru => "Least Recently Used",
            EvictionStrategy::Lfu => "Least Frequently Used",
            EvictionStrategy::Fifo => "First In, First Out",
            EvictionStrategy::Random => "Random Selection",
            EvictionStrategy::Intelligent => "Intelligent Analysis",
            EvictionStrategy::IntelligentCorrected => "Intelligent Analysis (corrected)",
        }
    }

    /// Get all available strategies
    pub fn all() -> Vec<EvictionStrategy> {
        vec![
            EvictionStrategy::Lru,
            EvictionStrategy::Lfu,
            EvictionStrategy::Fifo,
            EvictionStrategy::Random,
            EvictionStrategy::Intelligent,
            EvictionStrategy::IntelligentCorrected,
        ]
    }
}

impl fmt::Display for EvictionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvictionStrategy {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lru" => Ok(EvictionStrategy::Lru),
            "lfu" => Ok(EvictionStrategy::Lfu),
            "fifo" => Ok(EvictionStrategy::Fifo),
            "random" => Ok(EvictionStrategy::Random),
            "intelligent" => Ok(EvictionStrategy::Intelligent),
            "intelligent-corrected" | "intelligent_corrected" => {
                Ok(EvictionStrategy::IntelligentCorrected)
            }
            _ => Err(CacheError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Composite score used by the intelligent strategies, evaluated at `now`.
///
/// Age and idle time are recomputed from `now`; relevance is the value
/// stored at the entry's last access.
pub fn intelligent_score<K, V>(entry: &CacheEntry<K, V>, now: u64) -> f64 {
    let age_score = entry.age_millis(now) as f64 / 1000.0;
    let access_score = 100.0 - entry.access_count() as f64;
    let recency_score = entry.idle_millis(now) as f64 / 1000.0;
    let relevance_score = 100.0 - entry.relevance_score();

    age_score * 0.3 + access_score * 0.3 + recency_score * 0.2 + relevance_score * 0.2
}

/// Picks the entry to evict, or `None` when there are no entries.
pub(crate) fn select_victim<'a, K, V, I, R>(
    strategy: EvictionStrategy,
    entries: I,
    now: u64,
    rng: &mut R,
) -> Option<&'a CacheEntry<K, V>>
where
    K: 'a,
    V: 'a,
    I: Iterator<Item = &'a CacheEntry<K, V>>,
    R: Rng,
{
    match strategy {
        EvictionStrategy::Lru => entries.min_by_key(|e| (e.last_access_time(), e.sequence)),
        EvictionStrategy::Lfu => entries.min_by_key(|e| (e.access_count(), e.sequence)),
        EvictionStrategy::Fifo => entries.min_by_key(|e| (e.creation_time(), e.sequence)),
        EvictionStrategy::Random => {
            let mut candidates: Vec<_> = entries.collect();
            if candidates.is_empty() {
                return None;
            }
            // Map iteration order is unspecified; sort so a seeded RNG
            // always picks the same victim.
            candidates.sort_unstable_by_key(|e| e.sequence);
            let idx = rng.gen_range(0..candidates.len());
            Some(candidates[idx])
        }
        EvictionStrategy::Intelligent => entries
            .map(|e| (intelligent_score(e, now), e))
            .min_by(|(a, ea), (b, eb)| by_score_then_sequence(*a, ea, *b, eb))
            .map(|(_, e)| e),
        EvictionStrategy::IntelligentCorrected => entries
            .map(|e| (intelligent_score(e, now), e))
            .min_by(|(a, ea), (b, eb)| by_score_then_sequence(*b, ea, *a, eb))
            .map(|(_, e)| e),
    }
}

fn by_score_then_sequence<K, V>(
    a: f64,
    ea: &CacheEntry<K, V>,
    b: f64,
    eb: &CacheEntry<K, V>,
) -> Ordering {
    a.total_cmp(&b).then(ea.sequence.cmp(&eb.sequence))
}
