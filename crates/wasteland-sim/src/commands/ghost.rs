use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use wasteland_walk::{simulate_lockstep, synchronize};

use crate::config::RunConfig;
use crate::load_network;

#[derive(Args, Debug)]
pub struct GhostArgs {
    /// Puzzle input: instruction line followed by `LABEL = (LEFT, RIGHT)` lines.
    #[arg(long)]
    pub input: PathBuf,
    /// Optional YAML run configuration.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Last character of start labels.
    #[arg(long)]
    pub start_suffix: Option<String>,
    /// Last character of terminal labels.
    #[arg(long)]
    pub terminal_suffix: Option<String>,
    /// Per-walker step budget.
    #[arg(long)]
    pub max_steps: Option<u64>,
    /// Discover walker periods on a thread pool.
    #[arg(long)]
    pub parallel: bool,
    /// Worker threads for `--parallel` (0 = automatic).
    #[arg(long)]
    pub concurrency: Option<usize>,
    /// Cross-check the result by stepping all walkers together, up to this many steps.
    #[arg(long, value_name = "STEPS")]
    pub verify: Option<u64>,
    /// Print every walker's first terminal hit.
    #[arg(long)]
    pub periods: bool,
}

pub fn run(args: &GhostArgs) -> Result<(), Box<dyn Error>> {
    let mut config = RunConfig::load(args.config.as_deref())?;
    if let Some(suffix) = &args.start_suffix {
        config.start_suffix = suffix.clone();
    }
    if let Some(suffix) = &args.terminal_suffix {
        config.terminal_suffix = suffix.clone();
    }
    if args.max_steps.is_some() {
        config.walk.max_steps = args.max_steps;
    }
    if args.parallel {
        config.walk.parallel = true;
    }
    if let Some(concurrency) = args.concurrency {
        config.walk.concurrency = concurrency;
    }
    let (start_suffix, terminal_suffix) = config.suffixes()?;

    let store = load_network(&args.input)?;
    let outcome = synchronize(&store, start_suffix, terminal_suffix, &config.walk)?;

    if let Some(budget) = args.verify {
        let brute = simulate_lockstep(&store, start_suffix, terminal_suffix, budget)?;
        if brute != outcome.steps {
            return Err(format!(
                "period shortcut gave {} but lockstep simulation gave {brute}",
                outcome.steps
            )
            .into());
        }
        tracing::info!(steps = brute, "lockstep simulation confirms result");
    }

    if args.periods {
        for period in &outcome.periods {
            println!("{} -> {}: {}", period.start, period.terminal, period.steps);
        }
    }
    println!("{}", outcome.steps);
    Ok(())
}
