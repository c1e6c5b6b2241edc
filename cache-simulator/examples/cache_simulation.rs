use std::env;

use cache_simulator::models::ComparisonConfig;
use cache_simulator::runner::ComparisonRunner;
use intelligent_cache::{AccessPattern, CacheError};

fn main() -> Result<(), CacheError> {
    // Pattern comes from the first argument, zipfian otherwise
    let pattern = match env::args().nth(1) {
        Some(name) => name.parse()?,
        None => AccessPattern::Zipfian,
    };

    let operations = env::args()
        .nth(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(5_000);

    println!("Comparing every strategy on a {pattern} workload ({operations} operations)");

    let config = ComparisonConfig {
        pattern,
        operations,
        key_count: 1_000,
        ..ComparisonConfig::default()
    };

    let stats = ComparisonRunner::new(config).run()?;
    stats.print_summary();

    Ok(())
}
