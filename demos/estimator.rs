//! Estimate number of distinct lines read from stdin.
//!
//! ```text
//! seq 1 1000000 | cargo run --release --example estimator -- --epsilon 0.1 --delta 0.01
//! ```
use std::io;

use clap::Parser;
use cvm_estimator::{
    try_estimate, try_estimate_with_rng, Params, DEFAULT_DELTA, DEFAULT_EPSILON,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(about = "Estimate number of distinct lines in stdin")]
struct Args {
    /// Maximum number of retained lines, overrides epsilon and delta
    #[arg(long)]
    threshold: Option<usize>,
    /// Relative accuracy
    #[arg(long, default_value_t = DEFAULT_EPSILON)]
    epsilon: f64,
    /// Probability of exceeding the accuracy
    #[arg(long, default_value_t = DEFAULT_DELTA)]
    delta: f64,
    /// Seed for reproducible estimates, entropy-seeded when omitted
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut params = Params::new().with_epsilon(args.epsilon).with_delta(args.delta);
    params.threshold = args.threshold;

    let estimate = match args.seed {
        Some(seed) => {
            let rng = StdRng::seed_from_u64(seed);
            try_estimate_with_rng(io::stdin().lines(), &params, rng)?
        }
        None => try_estimate(io::stdin().lines(), &params)?,
    };
    println!("{estimate:.0}");
    Ok(())
}
