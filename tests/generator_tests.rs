//! Access Pattern Generator Tests
//!
//! Statistical and structural checks on the generated workloads. Every
//! generator is seeded so the assertions are reproducible; the statistical
//! bounds are loose enough to hold for any reasonable seed.

use intelligent_cache::pattern::{AccessPattern, AccessPatternGenerator, SEQUENCE_LENGTH};
use std::collections::HashMap;

fn seeded(pattern: AccessPattern, keys: usize, seed: u64) -> AccessPatternGenerator {
    let mut generator = AccessPatternGenerator::with_seed(seed);
    generator.generate_keys(keys);
    generator.set_pattern(pattern);
    generator
}

fn frequencies(generator: &mut AccessPatternGenerator, draws: usize) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for _ in 0..draws {
        let key = generator
            .next_access()
            .expect("generator has keys")
            .to_string();
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

#[test]
fn test_sequence_length_is_fixed() {
    for pattern in AccessPattern::all() {
        for keys in [1, 7, 500] {
            let generator = seeded(pattern, keys, 3);
            assert_eq!(
                generator.sequence().len(),
                SEQUENCE_LENGTH,
                "{pattern} with {keys} keys"
            );
        }
    }
}

#[test]
fn test_next_access_never_runs_out() {
    let mut generator = seeded(AccessPattern::Spatial, 25, 11);
    let first_pass: Vec<String> = (0..SEQUENCE_LENGTH)
        .map(|_| generator.next_access().unwrap().to_string())
        .collect();
    let second_pass: Vec<String> = (0..SEQUENCE_LENGTH)
        .map(|_| generator.next_access().unwrap().to_string())
        .collect();
    assert_eq!(first_pass, second_pass);
}

#[test]
fn test_zipfian_skew() {
    const KEYS: usize = 100;
    const DRAWS: usize = 100_000;

    let mut generator = seeded(AccessPattern::Zipfian, KEYS, 2024);
    let counts = frequencies(&mut generator, DRAWS);

    let harmonic: f64 = (1..=KEYS).map(|j| 1.0 / j as f64).sum();
    let expected_top = 1.0 / harmonic;

    let top = counts.get("key_0000").copied().unwrap_or(0);
    let bottom = counts.get("key_0099").copied().unwrap_or(0);
    let top_freq = top as f64 / DRAWS as f64;

    // Rank 1 should be close to 1/H(100), about 19%.
    assert!(
        (top_freq - expected_top).abs() < 0.02,
        "rank-1 frequency {top_freq:.4} vs expected {expected_top:.4}"
    );
    // Rank 1 is 100 times as likely as rank 100 in theory.
    assert!(top > bottom * 20, "top = {top}, bottom = {bottom}");
}

#[test]
fn test_random_is_roughly_uniform() {
    let mut generator = seeded(AccessPattern::Random, 10, 5);
    let counts = frequencies(&mut generator, SEQUENCE_LENGTH);

    assert_eq!(counts.len(), 10);
    for (key, count) in counts {
        assert!((800..1200).contains(&count), "{key} drawn {count} times");
    }
}

#[test]
fn test_spatial_clusters_around_base() {
    let mut generator = seeded(AccessPattern::Spatial, 1_000, 8);
    let counts = frequencies(&mut generator, SEQUENCE_LENGTH);

    // Clamping piles extra mass onto the first and last keys.
    let first = counts.get("key_0000").copied().unwrap_or(0);
    let middle = counts.get("key_0500").copied().unwrap_or(0);
    assert!(first > middle, "first = {first}, middle = {middle}");
}

#[test]
fn test_temporal_has_small_working_set_locally() {
    let generator = seeded(AccessPattern::Temporal, 1_000, 21);
    let sequence: Vec<&str> = generator.sequence().collect();

    // Any window of 50 consecutive draws touches far fewer distinct keys than
    // a uniform stream over 1 000 keys would.
    let distinct_per_window: Vec<usize> = sequence
        .chunks(50)
        .map(|w| {
            let mut keys = w.to_vec();
            keys.sort_unstable();
            keys.dedup();
            keys.len()
        })
        .collect();
    let mean = distinct_per_window.iter().sum::<usize>() as f64 / distinct_per_window.len() as f64;
    assert!(mean < 30.0, "mean distinct keys per window = {mean:.1}");
}

#[test]
fn test_key_regeneration_changes_universe() {
    let mut generator = seeded(AccessPattern::Sequential, 5, 1);
    assert_eq!(generator.keys().len(), 5);

    generator.generate_keys(2);
    assert_eq!(generator.keys(), &["key_0000".to_string(), "key_0001".to_string()]);
    assert!(generator
        .sequence()
        .all(|k| k == "key_0000" || k == "key_0001"));
}
