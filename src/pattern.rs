//! Synthetic Access Patterns
//!
//! [`AccessPatternGenerator`] precomputes a fixed-length sequence of key
//! references drawn from a chosen distribution and replays it cyclically.
//! Keys are named `key_0000`, `key_0001`, ... and the sequence stores indices
//! into that key list, so replaying never allocates.
//!
//! | Pattern | Draw |
//! |---------|------|
//! | `random` | uniform over all keys |
//! | `temporal` | 70% from a window of the 10 most recently introduced keys, otherwise a fresh uniform key |
//! | `spatial` | uniform base index plus an offset in `[-10, +10]`, clamped |
//! | `zipfian` | rank `j` with probability proportional to `1/j` |
//! | `sequential` | `keys[i % n]` |
//!
//! Changing the pattern or the key set regenerates the sequence but leaves
//! the replay cursor where it was; [`AccessPatternGenerator::reset`] rewinds
//! it without regenerating.
//!
//! ```
//! use intelligent_cache::pattern::{AccessPattern, AccessPatternGenerator, SEQUENCE_LENGTH};
//!
//! let mut generator = AccessPatternGenerator::with_seed(7);
//! generator.set_pattern(AccessPattern::Sequential);
//! generator.generate_keys(3);
//!
//! assert_eq!(generator.sequence().len(), SEQUENCE_LENGTH);
//! assert_eq!(generator.next_access(), Some("key_0000"));
//! assert_eq!(generator.next_access(), Some("key_0001"));
//! generator.reset();
//! assert_eq!(generator.next_access(), Some("key_0000"));
//! ```

use core::fmt;
use core::str::FromStr;
use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::CacheError;

/// Number of references produced by every regeneration.
pub const SEQUENCE_LENGTH: usize = 10_000;

/// Size of the recently-introduced window used by the temporal pattern.
pub const TEMPORAL_WINDOW: usize = 10;

/// Probability that a temporal draw reuses a key from the window.
pub const TEMPORAL_REUSE_PROBABILITY: f64 = 0.7;

/// Maximum index distance of a spatial draw from its base.
pub const SPATIAL_RADIUS: i64 = 10;

/// Statistical shape of a generated workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AccessPattern {
    /// Every key equally likely on every draw.
    #[default]
    Random,
    /// Mostly re-references one of the last few keys drawn.
    Temporal,
    /// Draws near a random base index.
    Spatial,
    /// Key `i` drawn with probability proportional to `1 / (i + 1)`.
    Zipfian,
    /// Walks the keys in order, wrapping around.
    Sequential,
}

impl AccessPattern {
    /// Lowercase name, as accepted by `FromStr`.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessPattern::Random => "random",
            AccessPattern::Temporal => "temporal",
            AccessPattern::Spatial => "spatial",
            AccessPattern::Zipfian => "zipfian",
            AccessPattern::Sequential => "sequential",
        }
    }

    /// Every pattern, in declaration order.
    pub fn all() -> Vec<AccessPattern> {
        vec![
            AccessPattern::Random,
            AccessPattern::Temporal,
            AccessPattern::Spatial,
            AccessPattern::Zipfian,
            AccessPattern::Sequential,
        ]
    }
}

impl fmt::Display for AccessPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessPattern {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "random" => Ok(AccessPattern::Random),
            "temporal" => Ok(AccessPattern::Temporal),
            "spatial" => Ok(AccessPattern::Spatial),
            "zipfian" | "zipf" => Ok(AccessPattern::Zipfian),
            "sequential" => Ok(AccessPattern::Sequential),
            _ => Err(CacheError::UnknownPattern(s.to_string())),
        }
    }
}

/// Formats the synthetic key for index `i`.
pub fn key_name(i: usize) -> String {
    format!("key_{i:04}")
}

/// Precomputed, cyclic stream of key references.
pub struct AccessPatternGenerator {
    pattern: AccessPattern,
    keys: Vec<String>,
    /// Indices into `keys`.
    sequence: Vec<usize>,
    current_index: usize,
    rng: StdRng,
}

impl AccessPatternGenerator {
    /// Creates an empty generator seeded from OS entropy.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Creates an empty generator whose sequences are reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            pattern: AccessPattern::default(),
            keys: Vec::new(),
            sequence: Vec::new(),
            current_index: 0,
            rng,
        }
    }

    /// Replaces the key universe with `key_0000..key_{count-1}` and regenerates.
    pub fn generate_keys(&mut self, count: usize) {
        self.keys = (0..count).map(key_name).collect();
        self.generate_sequence();
    }

    /// Switches the pattern and regenerates.
    pub fn set_pattern(&mut self, pattern: AccessPattern) {
        self.pattern = pattern;
        self.generate_sequence();
    }

    /// Rebuilds the sequence for the current pattern and keys.
    ///
    /// Produces exactly [`SEQUENCE_LENGTH`] references, or none when there
    /// are no keys.
    pub fn generate_sequence(&mut self) {
        self.sequence.clear();
        let n = self.keys.len();
        if n == 0 {
            return;
        }
        self.sequence.reserve(SEQUENCE_LENGTH);

        match self.pattern {
            AccessPattern::Random => {
                for _ in 0..SEQUENCE_LENGTH {
                    let idx = self.rng.gen_range(0..n);
                    self.sequence.push(idx);
                }
            }
            AccessPattern::Temporal => {
                let mut recent: VecDeque<usize> = VecDeque::with_capacity(TEMPORAL_WINDOW + 1);
                for _ in 0..SEQUENCE_LENGTH {
                    let idx = if !recent.is_empty()
                        && self.rng.gen::<f64>() < TEMPORAL_REUSE_PROBABILITY
                    {
                        recent[self.rng.gen_range(0..recent.len())]
                    } else {
                        let fresh = self.rng.gen_range(0..n);
                        recent.push_front(fresh);
                        if recent.len() > TEMPORAL_WINDOW {
                            recent.pop_back();
                        }
                        fresh
                    };
                    self.sequence.push(idx);
                }
            }
            AccessPattern::Spatial => {
                let last = n as i64 - 1;
                for _ in 0..SEQUENCE_LENGTH {
                    let base = self.rng.gen_range(0..n) as i64;
                    let offset = self.rng.gen_range(-SPATIAL_RADIUS..=SPATIAL_RADIUS);
                    self.sequence.push((base + offset).clamp(0, last) as usize);
                }
            }
            AccessPattern::Zipfian => {
                for _ in 0..SEQUENCE_LENGTH {
                    let draw = self.rng.gen::<f64>();
                    self.sequence.push(zipf_index(draw, n));
                }
            }
            AccessPattern::Sequential => {
                self.sequence.extend((0..SEQUENCE_LENGTH).map(|i| i % n));
            }
        }

        log::debug!(
            "Generated {} {} accesses over {} keys",
            self.sequence.len(),
            self.pattern,
            n
        );
    }

    /// Returns the next key, wrapping to the start after the last one.
    ///
    /// `None` only when no keys have been generated.
    pub fn next_access(&mut self) -> Option<&str> {
        if self.current_index >= self.sequence.len() {
            self.current_index = 0;
        }
        let idx = *self.sequence.get(self.current_index)?;
        self.current_index += 1;
        self.keys.get(idx).map(String::as_str)
    }

    /// Rewinds the replay cursor without regenerating.
    pub fn reset(&mut self) {
        self.current_index = 0;
    }

    /// Pattern used by the next `generate_sequence`.
    pub fn pattern(&self) -> AccessPattern {
        self.pattern
    }

    /// The key universe.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// The generated references, in replay order.
    pub fn sequence(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.sequence.iter().map(move |&idx| self.keys[idx].as_str())
    }

    /// Position of the replay cursor.
    pub fn current_index(&self) -> usize {
        self.current_index
    }
}

impl Default for AccessPatternGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AccessPatternGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessPatternGenerator")
            .field("pattern", &self.pattern)
            .field("keys", &self.keys.len())
            .field("sequence", &self.sequence.len())
            .field("current_index", &self.current_index)
            .finish()
    }
}

/// Maps a uniform draw in `[0, 1)` to a zipfian rank index over `n` keys.
///
/// The harmonic normaliser is recomputed for every draw. If rounding leaves
/// the draw above the last cumulative threshold, index 0 is returned.
fn zipf_index(draw: f64, n: usize) -> usize {
    let harmonic: f64 = (1..=n).map(|j| 1.0 / j as f64).sum();

    let mut threshold = 0.0;
    for j in 1..=n {
        threshold += (1.0 / j as f64) / harmonic;
        if draw <= threshold {
            return j - 1;
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn generator(pattern: AccessPattern, keys: usize) -> AccessPatternGenerator {
        let mut g = AccessPatternGenerator::with_seed(1234);
        g.set_pattern(pattern);
        g.generate_keys(keys);
        g
    }

    #[test]
    fn test_parse_patterns() {
        for pattern in AccessPattern::all() {
            assert_eq!(pattern.as_str().parse::<AccessPattern>(), Ok(pattern));
        }
        assert_eq!("ZIPFIAN".parse::<AccessPattern>(), Ok(AccessPattern::Zipfian));
        assert_eq!(
            "bursty".parse::<AccessPattern>(),
            Err(CacheError::UnknownPattern("bursty".to_string()))
        );
    }

    #[test]
    fn test_key_names() {
        assert_eq!(key_name(0), "key_0000");
        assert_eq!(key_name(42), "key_0042");
        assert_eq!(key_name(12345), "key_12345");
    }

    #[test]
    fn test_empty_generator() {
        let mut g = AccessPatternGenerator::with_seed(1);
        assert_eq!(g.sequence().len(), 0);
        assert_eq!(g.next_access(), None);
        g.set_pattern(AccessPattern::Zipfian);
        assert_eq!(g.next_access(), None);
    }

    #[test]
    fn test_every_pattern_has_fixed_length_and_valid_keys() {
        for pattern in AccessPattern::all() {
            let g = generator(pattern, 50);
            assert_eq!(g.sequence().len(), SEQUENCE_LENGTH, "{pattern}");
            let keys: HashSet<&str> = g.keys().iter().map(String::as_str).collect();
            assert!(g.sequence().all(|k| keys.contains(k)), "{pattern}");
        }
    }

    #[test]
    fn test_sequential_wraps() {
        let g = generator(AccessPattern::Sequential, 3);
        let first: Vec<&str> = g.sequence().take(7).collect();
        assert_eq!(
            first,
            vec![
                "key_0000", "key_0001", "key_0002", "key_0000", "key_0001", "key_0002",
                "key_0000"
            ]
        );
    }

    #[test]
    fn test_next_access_cycles() {
        let mut g = generator(AccessPattern::Random, 10);
        let first = g.next_access().map(str::to_string);
        for _ in 1..SEQUENCE_LENGTH {
            assert!(g.next_access().is_some());
        }
        assert_eq!(g.current_index(), SEQUENCE_LENGTH);
        assert_eq!(g.next_access().map(str::to_string), first);
        assert_eq!(g.current_index(), 1);
    }

    #[test]
    fn test_regeneration_keeps_cursor() {
        let mut g = generator(AccessPattern::Random, 10);
        g.next_access();
        g.next_access();
        g.set_pattern(AccessPattern::Sequential);
        assert_eq!(g.current_index(), 2);
        assert_eq!(g.next_access(), Some("key_0002"));
    }

    #[test]
    fn test_seed_reproducibility() {
        let a: Vec<String> = generator(AccessPattern::Temporal, 100)
            .sequence()
            .map(str::to_string)
            .collect();
        let b: Vec<String> = generator(AccessPattern::Temporal, 100)
            .sequence()
            .map(str::to_string)
            .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_temporal_reuses_recent_keys() {
        let g = generator(AccessPattern::Temporal, 1000);
        let seq: Vec<&str> = g.sequence().collect();
        // Each draw reuses a given window key with probability 0.7 / 10, so a
        // key comes back within the next 10 draws about 1 - 0.93^10 = 47% of
        // the time. Uniform draws over 1000 keys repeat about 1% of the time.
        let repeats = seq
            .windows(TEMPORAL_WINDOW + 1)
            .filter(|w| w[1..].contains(&w[0]))
            .count();
        assert!(repeats > SEQUENCE_LENGTH / 3, "repeats = {repeats}");

        let baseline = generator(AccessPattern::Random, 1000);
        let uniform: Vec<&str> = baseline.sequence().collect();
        let uniform_repeats = uniform
            .windows(TEMPORAL_WINDOW + 1)
            .filter(|w| w[1..].contains(&w[0]))
            .count();
        assert!(
            uniform_repeats < SEQUENCE_LENGTH / 20,
            "uniform repeats = {uniform_repeats}"
        );
    }

    #[test]
    fn test_spatial_stays_in_range() {
        let g = generator(AccessPattern::Spatial, 5);
        // Radius exceeds the key count: clamping must keep everything valid
        // and both ends get hit.
        let seen: HashSet<&str> = g.sequence().collect();
        assert!(seen.contains("key_0000"));
        assert!(seen.contains("key_0004"));
    }

    #[test]
    fn test_zipf_index_boundaries() {
        assert_eq!(zipf_index(0.0, 100), 0);
        assert_eq!(zipf_index(0.1, 1), 0);
        // Rank 1 holds 1/H(2) = 2/3 of the mass over two keys.
        assert_eq!(zipf_index(0.6, 2), 0);
        assert_eq!(zipf_index(0.7, 2), 1);
        // Above every threshold falls back to the first key.
        assert_eq!(zipf_index(2.0, 10), 0);
    }

    #[test]
    fn test_zipfian_prefers_low_ranks() {
        let g = generator(AccessPattern::Zipfian, 100);
        let top = g.sequence().filter(|k| *k == "key_0000").count();
        let tail = g.sequence().filter(|k| *k == "key_0099").count();
        assert!(top > tail * 10, "top = {top}, tail = {tail}");
    }
}
