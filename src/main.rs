use clap::Parser;
use survival_trend::args::Args;
use survival_trend::runner::Runner;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut runner = Runner::new(args)?;
    runner.start()?;
    Ok(())
}
