//! Emit a synthetic simulation log on stdout.
//!
//! ```sh
//! cargo run --example emit_log -- --generations 2000 | survival-trend --pacing-ms 20
//! ```

use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

#[derive(Parser, Debug)]
struct EmitArgs {
    /// Number of generations to emit.
    #[clap(long, default_value_t = 1000)]
    generations: u64,

    /// Entities per generation.
    #[clap(long, default_value_t = 200, value_parser = clap::value_parser!(u64).range(1..))]
    population: u64,

    /// Delay between two lines in milliseconds.
    #[clap(long, default_value_t = 0)]
    delay_ms: u64,

    /// Also emit unrelated log lines.
    #[clap(long)]
    noise: bool,

    #[clap(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> io::Result<()> {
    let args = EmitArgs::parse();
    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut stdout = io::stdout().lock();

    // survival probability drifts upwards as the population adapts
    let mut fitness: f64 = 0.2;
    for generation in 0..args.generations {
        fitness = (fitness + rng.random_range(-0.01..0.012)).clamp(0.0, 1.0);
        let survivors = (0..args.population)
            .filter(|_| rng.random_bool(fitness))
            .count() as u64;
        let rate = 100.0 * survivors as f64 / args.population as f64;

        if args.noise && rng.random_bool(0.05) {
            writeln!(stdout, "Generation completed. Survivors:")?;
        }
        writeln!(
            stdout,
            "Generation {generation} over. Survivors {survivors}/{} ({rate:.2}%)",
            args.population
        )?;
        stdout.flush()?;

        if args.delay_ms > 0 {
            thread::sleep(Duration::from_millis(args.delay_ms));
        }
    }
    Ok(())
}
