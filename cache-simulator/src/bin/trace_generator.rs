use clap::Parser;
use intelligent_cache::pattern::SEQUENCE_LENGTH;
use intelligent_cache::{AccessPattern, AccessPatternGenerator};
use serde::Serialize;
use std::path::PathBuf;

/// Dumps a generated access sequence to CSV
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Access pattern (random, temporal, spatial, zipfian, sequential)
    #[arg(short, long, default_value = "zipfian")]
    pattern: String,

    /// Number of distinct keys
    #[arg(short, long, default_value = "1000")]
    keys: usize,

    /// Number of accesses to write; the sequence repeats past its length
    #[arg(short, long, default_value_t = SEQUENCE_LENGTH)]
    count: usize,

    /// Seed for a reproducible trace
    #[arg(long)]
    seed: Option<u64>,

    /// Output file
    #[arg(short, long, default_value = "trace.csv")]
    output: PathBuf,
}

#[derive(Debug, Serialize)]
struct TraceRow<'a> {
    index: usize,
    key: &'a str,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env().init();

    let args = Args::parse();
    let pattern: AccessPattern = args.pattern.parse()?;

    let mut generator = match args.seed {
        Some(seed) => AccessPatternGenerator::with_seed(seed),
        None => AccessPatternGenerator::new(),
    };
    generator.set_pattern(pattern);
    generator.generate_keys(args.keys);

    println!("Trace Generator");
    println!("===============");
    println!("Pattern: {pattern}");
    println!("Keys: {}", args.keys);

    let mut writer = csv::Writer::from_path(&args.output)?;
    for index in 0..args.count {
        let Some(key) = generator.next_access() else {
            break;
        };
        writer.serialize(TraceRow { index, key })?;
    }
    writer.flush()?;

    println!("Wrote {} accesses to {}", args.count, args.output.display());
    Ok(())
}
