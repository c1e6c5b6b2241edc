//! Simulation controller
//!
//! The controller owns one cache and one access-pattern generator and turns
//! them into a stream of operations: each step reads the next key from the
//! generator and issues either a `put` (with probability `put_probability`,
//! random size between `min_put_kb` and `max_put_kb`) or a `get`. A run
//! stops by itself after `max_operations` steps.
//!
//! Runs can be driven in a tight loop with [`CacheController::run_to_completion`]
//! or paced with [`CacheController::run_paced`], which sleeps
//! `simulation_speed_ms` between steps for live output.

use std::thread;
use std::time::Duration;

use intelligent_cache::clock::{Clock, SystemClock};
use intelligent_cache::config::IntelligentCacheConfig;
use intelligent_cache::{
    AccessPattern, AccessPatternGenerator, CacheError, CacheStats, EvictionStrategy,
    IntelligentCache,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::{Operation, Trends};

const VALUE_SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const VALUE_SUFFIX_LEN: usize = 9;

/// Controller configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerConfig {
    /// Operations issued before a run stops by itself
    pub max_operations: usize,
    /// Delay between operations in paced mode
    pub simulation_speed_ms: u64,
    /// Size of the generated key universe
    pub key_count: usize,
    /// Probability that an operation is a put
    pub put_probability: f64,
    /// Smallest put size in KB
    pub min_put_kb: u64,
    /// Largest put size in KB
    pub max_put_kb: u64,
    /// Cache budget in megabytes
    pub cache_size_mb: u64,
    /// Initial eviction strategy
    pub strategy: EvictionStrategy,
    /// Initial access pattern
    pub pattern: AccessPattern,
    /// Seed for the workload, the operation mix and the random strategy.
    /// `None` seeds everything from OS entropy.
    pub seed: Option<u64>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            max_operations: 1000,
            simulation_speed_ms: 100,
            key_count: 500,
            put_probability: 0.3,
            min_put_kb: 1,
            max_put_kb: 10,
            cache_size_mb: 100,
            strategy: EvictionStrategy::default(),
            pattern: AccessPattern::default(),
            seed: None,
        }
    }
}

impl ControllerConfig {
    /// Rejects configurations that cannot produce a sensible run
    pub fn validate(&self) -> Result<(), CacheError> {
        if !(0.0..=1.0).contains(&self.put_probability) {
            return Err(CacheError::InvalidConfig(format!(
                "put_probability must be within [0, 1], got {}",
                self.put_probability
            )));
        }
        if self.min_put_kb == 0 || self.min_put_kb > self.max_put_kb {
            return Err(CacheError::InvalidConfig(format!(
                "put size range {}..={} KB is empty or zero",
                self.min_put_kb, self.max_put_kb
            )));
        }
        if self.key_count == 0 {
            return Err(CacheError::InvalidConfig(
                "key_count must be greater than zero".to_string(),
            ));
        }
        if self.cache_size_mb == 0 {
            return Err(CacheError::InvalidConfig(
                "cache_size_mb must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Drives one cache with one generated workload
#[derive(Debug)]
pub struct CacheController<C: Clock = SystemClock> {
    config: ControllerConfig,
    cache: IntelligentCache<String, String, C>,
    generator: AccessPatternGenerator,
    rng: StdRng,
    running: bool,
    current_operation: usize,
    previous_stats: Option<CacheStats>,
    trends: Option<Trends>,
}

impl CacheController<SystemClock> {
    /// Create a controller whose cache reads the system clock
    pub fn new(config: ControllerConfig) -> Result<Self, CacheError> {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> CacheController<C> {
    /// Create a controller whose cache reads `clock`
    pub fn with_clock(config: ControllerConfig, clock: C) -> Result<Self, CacheError> {
        config.validate()?;

        let cache_config = IntelligentCacheConfig {
            strategy: config.strategy,
            seed: config.seed,
            ..IntelligentCacheConfig::from_megabytes(config.cache_size_mb)
        };
        cache_config.validate()?;

        // Separate streams so that changing the strategy never shifts the
        // workload or the operation mix.
        let (mut generator, rng) = match config.seed {
            Some(seed) => (
                AccessPatternGenerator::with_seed(seed.wrapping_add(1)),
                StdRng::seed_from_u64(seed.wrapping_add(2)),
            ),
            None => (AccessPatternGenerator::new(), StdRng::from_entropy()),
        };
        generator.set_pattern(config.pattern);

        Ok(Self {
            cache: IntelligentCache::with_clock(cache_config, clock),
            generator,
            rng,
            running: false,
            current_operation: 0,
            previous_stats: None,
            trends: None,
            config,
        })
    }

    /// Generate the key universe and start issuing operations
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.generator.generate_keys(self.config.key_count);
        self.current_operation = 0;
        log::info!(
            "Simulation started: strategy={}, pattern={}, keys={}",
            self.cache.eviction_strategy(),
            self.generator.pattern(),
            self.config.key_count
        );
    }

    pub fn pause(&mut self) {
        if self.running {
            self.running = false;
            log::info!("Simulation paused");
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Issue one operation
    ///
    /// Returns `None` and stops the run when it is not running or when
    /// `max_operations` have been issued.
    pub fn step(&mut self) -> Option<Operation> {
        if !self.running || self.current_operation >= self.config.max_operations {
            if self.running {
                self.pause();
                log::info!(
                    "Simulation completed after {} operations",
                    self.current_operation
                );
            }
            return None;
        }

        let key = self.generator.next_access()?.to_string();

        let operation = if self.rng.gen::<f64>() < self.config.put_probability {
            let size_kb = self
                .rng
                .gen_range(self.config.min_put_kb..=self.config.max_put_kb);
            let value = self.make_value();
            self.cache.put(key.clone(), value, size_kb);
            log::debug!("PUT {key} ({size_kb}KB)");
            Operation::Put { key, size_kb }
        } else {
            let hit = self.cache.get(key.as_str()).is_some();
            Operation::Get { key, hit }
        };

        self.current_operation += 1;
        self.update_trends();
        Some(operation)
    }

    /// Run until `max_operations` in a tight loop and return the final stats
    pub fn run_to_completion(&mut self) -> CacheStats {
        self.start();
        while self.step().is_some() {}
        self.cache.stats()
    }

    /// Run until `max_operations`, sleeping `simulation_speed_ms` between
    /// operations and handing each operation to `on_step`
    pub fn run_paced<F>(&mut self, mut on_step: F) -> CacheStats
    where
        F: FnMut(&Self, &Operation),
    {
        let delay = Duration::from_millis(self.config.simulation_speed_ms);
        self.start();
        while let Some(operation) = self.step() {
            on_step(self, &operation);
            thread::sleep(delay);
        }
        self.cache.stats()
    }

    /// Empty the cache and rewind the workload
    pub fn reset(&mut self) {
        self.cache.clear();
        self.generator.reset();
        self.current_operation = 0;
        self.previous_stats = None;
        self.trends = None;
        log::info!("Cache reset");
    }

    /// Same as [`CacheController::reset`]
    pub fn clear_stats(&mut self) {
        self.reset();
        log::info!("Statistics cleared");
    }

    pub fn set_strategy(&mut self, strategy: EvictionStrategy) {
        self.cache.set_eviction_strategy(strategy);
        self.config.strategy = strategy;
    }

    pub fn set_pattern(&mut self, pattern: AccessPattern) {
        self.generator.set_pattern(pattern);
        self.config.pattern = pattern;
        log::info!("Access pattern changed to {pattern}");
    }

    pub fn set_cache_size_mb(&mut self, cache_size_mb: u64) {
        self.cache
            .set_max_size_bytes(cache_size_mb.saturating_mul(1024 * 1024));
        self.config.cache_size_mb = cache_size_mb;
    }

    pub fn cache(&self) -> &IntelligentCache<String, String, C> {
        &self.cache
    }

    pub fn generator(&self) -> &AccessPatternGenerator {
        &self.generator
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Operations issued in the current run
    pub fn current_operation(&self) -> usize {
        self.current_operation
    }

    /// Trends between the last two operations, once two have been issued
    pub fn trends(&self) -> Option<&Trends> {
        self.trends.as_ref()
    }

    fn update_trends(&mut self) {
        let stats = self.cache.stats();
        if let Some(previous) = &self.previous_stats {
            self.trends = Some(Trends::between(previous, &stats));
        }
        self.previous_stats = Some(stats);
    }

    fn make_value(&mut self) -> String {
        let suffix: String = (0..VALUE_SUFFIX_LEN)
            .map(|_| {
                let idx = self.rng.gen_range(0..VALUE_SUFFIX_ALPHABET.len());
                VALUE_SUFFIX_ALPHABET[idx] as char
            })
            .collect();
        format!("value_{}_{}", self.cache.now_millis(), suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intelligent_cache::clock::ManualClock;

    fn seeded_config() -> ControllerConfig {
        ControllerConfig {
            max_operations: 200,
            simulation_speed_ms: 0,
            key_count: 50,
            cache_size_mb: 1,
            pattern: AccessPattern::Zipfian,
            seed: Some(17),
            ..Default::default()
        }
    }

    #[test]
    fn test_step_before_start_is_none() {
        let mut controller = CacheController::new(seeded_config()).unwrap();
        assert!(controller.step().is_none());
        assert_eq!(controller.current_operation(), 0);
    }

    #[test]
    fn test_run_stops_at_max_operations() {
        let mut controller = CacheController::new(seeded_config()).unwrap();
        let stats = controller.run_to_completion();

        assert!(!controller.is_running());
        assert_eq!(controller.current_operation(), 200);
        // Every get and put leaves one snapshot.
        assert_eq!(controller.cache().access_history().len(), 200);
        assert!(stats.total_accesses < 200, "expected some put operations");

        // Further steps stay stopped.
        assert!(controller.step().is_none());
    }

    #[test]
    fn test_operation_mix_and_sizes() {
        let mut controller = CacheController::new(ControllerConfig {
            max_operations: 2_000,
            ..seeded_config()
        })
        .unwrap();
        controller.start();

        let mut puts = 0;
        while let Some(op) = controller.step() {
            if let Operation::Put { size_kb, .. } = op {
                assert!((1..=10).contains(&size_kb));
                puts += 1;
            }
        }
        // 30% of 2000 with generous slack
        assert!((450..750).contains(&puts), "puts = {puts}");
    }

    #[test]
    fn test_values_have_expected_shape() {
        let clock = ManualClock::new(1_234);
        let mut controller = CacheController::with_clock(
            ControllerConfig {
                put_probability: 1.0,
                max_operations: 1,
                ..seeded_config()
            },
            clock,
        )
        .unwrap();
        controller.start();
        let op = controller.step().unwrap();

        let value = controller.cache().peek(op.key()).unwrap();
        let suffix = value.strip_prefix("value_1234_").unwrap();
        assert_eq!(suffix.len(), 9);
        assert!(suffix
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let ops = || {
            let mut controller = CacheController::new(seeded_config()).unwrap();
            controller.start();
            std::iter::from_fn(|| controller.step().map(|op| op.key().to_string()))
                .collect::<Vec<_>>()
        };
        assert_eq!(ops(), ops());
    }

    #[test]
    fn test_reset_clears_cache_and_rewinds() {
        let mut controller = CacheController::new(seeded_config()).unwrap();
        controller.start();
        let first = controller.step().unwrap();
        for _ in 0..10 {
            controller.step();
        }

        controller.reset();
        assert!(controller.cache().is_empty());
        assert_eq!(controller.cache().stats().total_accesses, 0);
        assert_eq!(controller.current_operation(), 0);
        assert!(controller.trends().is_none());
        assert_eq!(controller.generator().current_index(), 0);

        // Still running: the next step replays the first key.
        let replayed = controller.step().unwrap();
        assert_eq!(replayed.key(), first.key());
    }

    #[test]
    fn test_trends_appear_after_second_operation() {
        let mut controller = CacheController::new(seeded_config()).unwrap();
        controller.start();
        controller.step();
        assert!(controller.trends().is_none());
        controller.step();
        assert!(controller.trends().is_some());
    }

    #[test]
    fn test_setters_forward_to_core() {
        let mut controller = CacheController::new(seeded_config()).unwrap();
        controller.set_strategy(EvictionStrategy::Fifo);
        controller.set_pattern(AccessPattern::Sequential);
        controller.set_cache_size_mb(2);

        assert_eq!(controller.cache().eviction_strategy(), EvictionStrategy::Fifo);
        assert_eq!(controller.generator().pattern(), AccessPattern::Sequential);
        assert_eq!(controller.cache().max_size_bytes(), 2 * 1024 * 1024);

        controller.set_cache_size_mb(u64::MAX);
        assert_eq!(controller.cache().max_size_bytes(), u64::MAX);
    }

    #[test]
    fn test_enormous_sizes_do_not_panic() {
        let config = ControllerConfig {
            cache_size_mb: u64::MAX,
            max_put_kb: u64::MAX,
            put_probability: 1.0,
            max_operations: 20,
            ..seeded_config()
        };
        let mut controller = CacheController::new(config).unwrap();
        let stats = controller.run_to_completion();
        assert_eq!(controller.current_operation(), 20);
        assert_eq!(stats.memory_usage.total, u64::MAX);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let bad_probability = ControllerConfig {
            put_probability: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            CacheController::new(bad_probability),
            Err(CacheError::InvalidConfig(_))
        ));

        let bad_sizes = ControllerConfig {
            min_put_kb: 8,
            max_put_kb: 2,
            ..Default::default()
        };
        assert!(CacheController::new(bad_sizes).is_err());
    }

    #[test]
    fn test_paced_run_reports_every_operation() {
        let mut controller = CacheController::new(ControllerConfig {
            max_operations: 5,
            ..seeded_config()
        })
        .unwrap();
        let mut seen = 0;
        controller.run_paced(|_, _| seen += 1);
        assert_eq!(seen, 5);
    }
}
