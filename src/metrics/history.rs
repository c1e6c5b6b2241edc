//! History records kept by the cache for analysis.

/// State of the cache right after one `get` or `put`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccessSnapshot {
    /// Time of the operation in milliseconds
    pub timestamp: u64,
    /// Hit ratio percentage after the operation
    pub hit_ratio: f64,
    /// Number of entries after the operation
    pub entry_count: usize,
    /// Bytes charged after the operation
    pub current_size_bytes: u64,
}

/// One eviction decision.
#[derive(Debug, Clone, PartialEq)]
pub struct EvictionRecord<K> {
    /// Key of the evicted entry
    pub key: K,
    /// Human readable strategy reason, e.g. "First In, First Out"
    pub reason: &'static str,
    /// Time of the eviction in milliseconds
    pub timestamp: u64,
    /// Access count of the entry when it was evicted
    pub access_count: u64,
    /// Relevance of the entry when it was evicted
    pub relevance_score: f64,
}
