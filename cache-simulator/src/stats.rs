// Statistics collection and reporting for strategy comparisons

use crate::models::{CsvResultRow, StrategyStats};
use intelligent_cache::{AccessPattern, EvictionStrategy};
use std::collections::BTreeMap;
use std::path::Path;

/// Collects and reports per-strategy results of one comparison
#[derive(Debug)]
pub struct SimulationStats {
    /// Results keyed by strategy, in a stable order
    stats: BTreeMap<EvictionStrategy, StrategyStats>,
    /// Workload shape shared by every strategy
    pattern: AccessPattern,
    /// Operations issued per strategy
    operations: usize,
}

impl SimulationStats {
    pub fn new(pattern: AccessPattern, operations: usize) -> Self {
        Self {
            stats: BTreeMap::new(),
            pattern,
            operations,
        }
    }

    /// Record the results of one strategy, replacing earlier ones
    pub fn record(&mut self, strategy: EvictionStrategy, stats: StrategyStats) {
        self.stats.insert(strategy, stats);
    }

    pub fn get(&self, strategy: EvictionStrategy) -> Option<&StrategyStats> {
        self.stats.get(&strategy)
    }

    /// Results in strategy order
    pub fn iter(&self) -> impl Iterator<Item = (EvictionStrategy, &StrategyStats)> {
        self.stats.iter().map(|(strategy, stats)| (*strategy, stats))
    }

    pub fn pattern(&self) -> AccessPattern {
        self.pattern
    }

    /// Strategy with the highest hit rate; the first in strategy order wins ties
    pub fn best(&self) -> Option<(EvictionStrategy, &StrategyStats)> {
        self.iter().fold(None, |best, (strategy, stats)| match best {
            Some((_, current)) if current.hit_rate() >= stats.hit_rate() => best,
            _ => Some((strategy, stats)),
        })
    }

    /// Print a summary report of the comparison
    pub fn print_summary(&self) {
        println!("\nStrategy Comparison Summary");
        println!("===========================");
        println!("Access pattern: {}", self.pattern);
        println!("Operations per strategy: {}", self.operations);

        println!(
            "\n{:<22} {:>8} {:>8} {:>8} {:>10} {:>12} {:>12} {:>10}",
            "Strategy", "HitRate", "Hits", "Misses", "Evictions", "Final KB", "Peak KB", "Time"
        );
        println!("{}", "-".repeat(98));

        for (strategy, stats) in self.iter() {
            println!(
                "{:<22} {:>7.2}% {:>8} {:>8} {:>10} {:>12.1} {:>12.1} {:>8}ms",
                strategy.as_str(),
                stats.hit_rate(),
                stats.hits,
                stats.misses,
                stats.evictions,
                stats.final_bytes as f64 / 1024.0,
                stats.peak_bytes as f64 / 1024.0,
                stats.simulation_time_ms
            );
        }

        if let Some((strategy, stats)) = self.best() {
            println!(
                "\nBest hit rate: {} ({:.2}%)",
                strategy.as_str(),
                stats.hit_rate()
            );
        }
    }

    /// Export one row per strategy to a CSV file
    pub fn export_csv(&self, path: &Path) -> Result<(), std::io::Error> {
        let mut writer = csv::Writer::from_path(path)?;

        for (strategy, stats) in self.iter() {
            let row = CsvResultRow {
                strategy: strategy.as_str().to_string(),
                pattern: self.pattern.as_str().to_string(),
                hits: stats.hits,
                misses: stats.misses,
                puts: stats.puts,
                hit_rate: stats.hit_rate(),
                evictions: stats.evictions,
                final_bytes: stats.final_bytes,
                peak_bytes: stats.peak_bytes,
                final_entries: stats.final_entries,
                average_access_time_ms: stats.average_access_time_ms,
                simulation_time_ms: stats.simulation_time_ms,
            };
            writer.serialize(row)?;
        }

        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    /// Helper function to create a temp directory for tests
    fn create_temp_dir(test_name: &str) -> PathBuf {
        let temp_dir = std::env::temp_dir().join(format!("cache_simulator_stats_{}", test_name));
        let _ = fs::remove_dir_all(&temp_dir);
        fs::create_dir_all(&temp_dir).expect("Failed to create temp directory");
        temp_dir
    }

    fn sample() -> SimulationStats {
        let mut stats = SimulationStats::new(AccessPattern::Temporal, 10);
        stats.record(
            EvictionStrategy::Fifo,
            StrategyStats {
                hits: 2,
                misses: 6,
                puts: 2,
                ..StrategyStats::new()
            },
        );
        stats.record(
            EvictionStrategy::Lru,
            StrategyStats {
                hits: 6,
                misses: 2,
                puts: 2,
                evictions: 1,
                ..StrategyStats::new()
            },
        );
        stats
    }

    #[test]
    fn test_iteration_order_is_stable() {
        let stats = sample();
        let order: Vec<_> = stats.iter().map(|(s, _)| s).collect();
        assert_eq!(order, vec![EvictionStrategy::Lru, EvictionStrategy::Fifo]);
    }

    #[test]
    fn test_best_strategy() {
        let stats = sample();
        let (strategy, best) = stats.best().unwrap();
        assert_eq!(strategy, EvictionStrategy::Lru);
        assert_eq!(best.hit_rate(), 75.0);
        assert!(SimulationStats::new(AccessPattern::Random, 0).best().is_none());
    }

    #[test]
    fn test_lookup_by_strategy() {
        let mut stats = sample();
        assert_eq!(stats.get(EvictionStrategy::Fifo).map(|s| s.hits), Some(2));
        assert!(stats.get(EvictionStrategy::Random).is_none());

        stats.record(
            EvictionStrategy::Fifo,
            StrategyStats {
                hits: 9,
                ..StrategyStats::new()
            },
        );
        assert_eq!(stats.get(EvictionStrategy::Fifo).map(|s| s.hits), Some(9));
        assert_eq!(stats.iter().count(), 2);
    }

    #[test]
    fn test_export_csv() {
        let dir = create_temp_dir("export");
        let path = dir.join("results.csv");
        sample().export_csv(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("strategy,pattern,hits,misses,puts,hit_rate"));
        assert!(lines.next().unwrap().starts_with("lru,temporal,6,2,2,75"));
        assert!(lines.next().unwrap().starts_with("fifo,temporal,2,6,2,25"));
        assert!(lines.next().is_none());

        let _ = fs::remove_dir_all(&dir);
    }
}
