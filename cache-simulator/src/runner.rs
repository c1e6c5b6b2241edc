//! Strategy comparison runner
//!
//! Runs the same seeded workload once per eviction strategy and collects
//! per-strategy statistics. Each run gets a fresh controller built from the
//! same seed, so the key sequence and the get/put mix are identical across
//! strategies; only the eviction decisions differ.
//!
//! Time is simulated: every run reads a manual clock that advances by
//! `tick_ms` before each operation, which reproduces the timeline of a paced
//! run without sleeping. Recency, relevance and the intelligent score are
//! therefore identical from one run to the next.
//!
//! ## Storage Tracking
//!
//! Peak storage is sampled after every operation from the cache's byte
//! accounting, which counts declared entry sizes rather than the memory used
//! by the data structures.

use std::time::Instant;

use intelligent_cache::clock::ManualClock;
use intelligent_cache::CacheError;

use crate::controller::{CacheController, ControllerConfig};
use crate::models::{ComparisonConfig, StrategyStats};
use crate::stats::SimulationStats;

/// Runs one workload against several strategies
#[derive(Debug)]
pub struct ComparisonRunner {
    config: ComparisonConfig,
}

impl ComparisonRunner {
    pub fn new(config: ComparisonConfig) -> Self {
        Self { config }
    }

    /// Run every configured strategy and collect the results
    pub fn run(&self) -> Result<SimulationStats, CacheError> {
        let mut stats = SimulationStats::new(self.config.pattern, self.config.operations);

        for &strategy in &self.config.strategies {
            let controller_config = ControllerConfig {
                max_operations: self.config.operations,
                key_count: self.config.key_count,
                cache_size_mb: self.config.cache_size_mb,
                strategy,
                pattern: self.config.pattern,
                seed: Some(self.config.seed),
                ..ControllerConfig::default()
            };
            let clock = ManualClock::new(0);
            let mut controller = CacheController::with_clock(controller_config, clock.clone())?;

            log::info!("Running {} over {} operations", strategy, self.config.operations);

            let start = Instant::now();
            let mut result = StrategyStats::new();
            controller.start();
            loop {
                clock.advance(self.config.tick_ms);
                let Some(operation) = controller.step() else {
                    break;
                };
                if operation.is_put() {
                    result.puts += 1;
                }
                result.peak_bytes = result
                    .peak_bytes
                    .max(controller.cache().current_size_bytes());
            }
            result.simulation_time_ms = start.elapsed().as_millis() as u64;

            let cache = controller.cache();
            let cache_stats = cache.stats();
            result.hits = cache.hit_count();
            result.misses = cache.miss_count();
            result.evictions = cache_stats.eviction_count;
            result.final_bytes = cache.current_size_bytes();
            result.final_entries = cache_stats.entry_count;
            result.average_access_time_ms = cache_stats.average_access_time;

            stats.record(strategy, result);
        }

        Ok(stats)
    }
}
