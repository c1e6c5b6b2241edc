use cache_simulator::analysis::{self, RelevanceBand};
use cache_simulator::controller::{CacheController, ControllerConfig};
use cache_simulator::models::ComparisonConfig;
use cache_simulator::runner::ComparisonRunner;
use clap::{Parser, Subcommand};
use intelligent_cache::{AccessPattern, EvictionStrategy};
use std::path::PathBuf;

/// Number of resident entries listed after a simulation
const TOP_ENTRIES: usize = 10;

/// Cache eviction simulator CLI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Subcommands for the CLI
#[derive(Subcommand, Debug)]
enum Commands {
    /// Drive one cache with a generated workload and report what happened
    Simulate {
        /// Eviction strategy (lru, lfu, fifo, random, intelligent, intelligent-corrected)
        #[arg(short, long, default_value = "intelligent")]
        strategy: String,

        /// Access pattern (random, temporal, spatial, zipfian, sequential)
        #[arg(short, long, default_value = "random")]
        pattern: String,

        /// Number of distinct keys
        #[arg(short, long, default_value = "500")]
        keys: usize,

        /// Operations to issue
        #[arg(short, long, default_value = "1000")]
        operations: usize,

        /// Cache budget in megabytes
        #[arg(long, default_value = "100")]
        cache_size_mb: u64,

        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Issue one operation every --speed-ms and print it
        #[arg(long)]
        paced: bool,

        /// Delay between operations in paced mode
        #[arg(long, default_value = "100")]
        speed_ms: u64,
    },

    /// Run the same workload against several strategies
    Compare {
        /// Strategies to compare (comma separated); all when omitted
        #[arg(short, long, value_name = "STRATEGIES", num_args = 1.., value_delimiter = ',')]
        strategies: Option<Vec<String>>,

        /// Access pattern (random, temporal, spatial, zipfian, sequential)
        #[arg(short, long, default_value = "zipfian")]
        pattern: String,

        /// Number of distinct keys
        #[arg(short, long, default_value = "500")]
        keys: usize,

        /// Operations per strategy
        #[arg(short, long, default_value = "10000")]
        operations: usize,

        /// Cache budget in megabytes
        #[arg(long, default_value = "1")]
        cache_size_mb: u64,

        /// Seed shared by every strategy
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Export results to CSV file
        #[arg(long, value_name = "PATH")]
        output_csv: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env().init();

    let args = Args::parse();

    match args.command {
        Commands::Simulate {
            strategy,
            pattern,
            keys,
            operations,
            cache_size_mb,
            seed,
            paced,
            speed_ms,
        } => {
            let config = ControllerConfig {
                max_operations: operations,
                simulation_speed_ms: speed_ms,
                key_count: keys,
                cache_size_mb,
                strategy: strategy.parse()?,
                pattern: pattern.parse()?,
                seed,
                ..ControllerConfig::default()
            };
            run_simulation(config, paced)
        }

        Commands::Compare {
            strategies,
            pattern,
            keys,
            operations,
            cache_size_mb,
            seed,
            output_csv,
        } => {
            let strategies = match strategies {
                Some(names) if !names.is_empty() => names
                    .iter()
                    .map(|name| name.parse::<EvictionStrategy>())
                    .collect::<Result<Vec<_>, _>>()?,
                _ => EvictionStrategy::all(),
            };
            let config = ComparisonConfig {
                strategies,
                pattern: pattern.parse::<AccessPattern>()?,
                key_count: keys,
                operations,
                cache_size_mb,
                seed,
                ..ComparisonConfig::default()
            };
            run_comparison(config, output_csv)
        }
    }
}

/// Run one controller and print stats, trends and analysis
fn run_simulation(config: ControllerConfig, paced: bool) -> Result<(), Box<dyn std::error::Error>> {
    println!("Cache Simulation");
    println!("================");
    println!("Strategy: {}", config.strategy);
    println!("Pattern: {}", config.pattern);
    println!("Keys: {}", config.key_count);
    println!("Operations: {}", config.max_operations);
    println!("Cache size: {} MB", config.cache_size_mb);
    println!();

    let mut controller = CacheController::new(config)?;
    let stats = if paced {
        controller.run_paced(|controller, operation| {
            println!(
                "[{:>5}] {:<28} hit ratio {:>6.2}%",
                controller.current_operation(),
                operation.to_string(),
                controller.cache().stats().hit_ratio
            );
        })
    } else {
        controller.run_to_completion()
    };

    println!("\nResults");
    println!("-------");
    println!("Hit ratio: {:.2}%", stats.hit_ratio);
    println!("Average access time: {:.4}ms", stats.average_access_time);
    println!(
        "Memory: {:.1}/{:.1} MB ({:.1}%)",
        stats.memory_usage.used as f64 / (1024.0 * 1024.0),
        stats.memory_usage.total as f64 / (1024.0 * 1024.0),
        stats.memory_usage.percentage
    );
    println!("Entries: {}", stats.entry_count);
    println!("Evictions: {}", stats.eviction_count);

    if let Some(trends) = controller.trends() {
        println!(
            "Last step trends: hit ratio {}, access time {}, evictions {}",
            trends.hit_ratio.format("%"),
            trends.access_time.format("ms"),
            trends.evictions.format("")
        );
    }

    let report = analysis::analyze(controller.cache());
    println!("\nAnalysis");
    println!("--------");
    println!(
        "Most accessed key: {}",
        report.most_accessed.as_deref().unwrap_or("None")
    );
    println!(
        "Least accessed key: {}",
        report.least_accessed.as_deref().unwrap_or("None")
    );
    println!(
        "Predicted next access: {}",
        report.predicted_next.as_deref().unwrap_or("N/A")
    );
    println!("Cache efficiency: {:.1}%", report.efficiency);
    println!("Data distribution: {}", report.distribution);
    println!("Strategy effectiveness: {}", report.effectiveness.description());
    println!("Recommendation: {}", report.recommendation.message());

    let mut entries: Vec<_> = controller.cache().entries().collect();
    entries.sort_by(|a, b| b.relevance_score().total_cmp(&a.relevance_score()));
    if !entries.is_empty() {
        let now = controller.cache().now_millis();
        println!("\nTop entries by relevance");
        println!(
            "{:<10} {:>8} {:>10} {:>10} {:>6} {:>5} {:>6}",
            "Key", "Accesses", "Idle", "Relevance", "Band", "Temp", "Size"
        );
        println!("{}", "-".repeat(62));
        for entry in entries.into_iter().take(TOP_ENTRIES) {
            println!(
                "{:<10} {:>8} {:>9}s {:>10.0} {:>6} {:>5} {:>4}KB",
                entry.key,
                entry.access_count(),
                entry.idle_millis(now) / 1000,
                entry.relevance_score(),
                RelevanceBand::from_score(entry.relevance_score()).as_str(),
                entry.temperature().as_str(),
                entry.size_kb
            );
        }
    }

    let evictions = controller.cache().eviction_history();
    if !evictions.is_empty() {
        println!("\nRecent evictions");
        for record in evictions.iter().rev().take(TOP_ENTRIES) {
            println!(
                "  {} ({}) accesses={} relevance={:.1}",
                record.key, record.reason, record.access_count, record.relevance_score
            );
        }
    }

    Ok(())
}

/// Run a comparison and optionally export it
fn run_comparison(
    config: ComparisonConfig,
    output_csv: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Strategy Comparison");
    println!("===================");
    println!(
        "Strategies: {:?}",
        config.strategies.iter().map(|s| s.as_str()).collect::<Vec<_>>()
    );
    println!("Pattern: {}", config.pattern);
    println!("Keys: {}", config.key_count);
    println!("Cache size: {} MB", config.cache_size_mb);

    let stats = ComparisonRunner::new(config).run()?;
    stats.print_summary();

    if let Some(csv_path) = output_csv {
        match stats.export_csv(&csv_path) {
            Ok(()) => println!("\nResults exported to: {}", csv_path.display()),
            Err(e) => eprintln!("Failed to export CSV: {e}"),
        }
    }

    Ok(())
}
