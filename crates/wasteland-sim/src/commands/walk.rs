use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use wasteland_walk::walk;

use crate::config::RunConfig;
use crate::load_network;

#[derive(Args, Debug)]
pub struct WalkArgs {
    /// Puzzle input: instruction line followed by `LABEL = (LEFT, RIGHT)` lines.
    #[arg(long)]
    pub input: PathBuf,
    /// Optional YAML run configuration.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Start label (overrides the configuration).
    #[arg(long)]
    pub start: Option<String>,
    /// End label (overrides the configuration).
    #[arg(long)]
    pub end: Option<String>,
    /// Fail instead of looping past this many steps.
    #[arg(long)]
    pub max_steps: Option<u64>,
}

pub fn run(args: &WalkArgs) -> Result<(), Box<dyn Error>> {
    let mut config = RunConfig::load(args.config.as_deref())?;
    if let Some(start) = &args.start {
        config.start_label = start.clone();
    }
    if let Some(end) = &args.end {
        config.end_label = end.clone();
    }
    if args.max_steps.is_some() {
        config.walk.max_steps = args.max_steps;
    }

    let store = load_network(&args.input)?;
    let steps = walk(&store, &config.start_label, &config.end_label, &config.walk)?;
    println!("{steps}");
    Ok(())
}
