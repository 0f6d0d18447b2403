use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use wasteland_core::errors::WastelandError;
use wasteland_graph::GraphStore;
use wasteland_walk::{build_provenance, synchronize, walk, GhostSummary, SolveReport, WalkSummary};

use crate::config::RunConfig;
use crate::{load_network, write_json};

#[derive(Args, Debug)]
pub struct SolveArgs {
    /// Puzzle input: instruction line followed by `LABEL = (LEFT, RIGHT)` lines.
    #[arg(long)]
    pub input: PathBuf,
    /// Optional YAML run configuration.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Expected single-walker step count.
    #[arg(long)]
    pub expect_walk: Option<u64>,
    /// Expected synchronisation step.
    #[arg(long)]
    pub expect_ghost: Option<u64>,
    /// Skip the single-walker part (inputs without the start label).
    #[arg(long)]
    pub skip_walk: bool,
    /// Skip the multi-walker part.
    #[arg(long)]
    pub skip_ghost: bool,
    /// Write the JSON report to this path.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Expected answers to compare against.
#[derive(Debug, Clone, Copy, Default)]
pub struct Expectations {
    pub walk: Option<u64>,
    pub ghost: Option<u64>,
}

pub fn build_report(
    store: &GraphStore,
    config: &RunConfig,
    parts: (bool, bool),
    expect: Expectations,
) -> Result<SolveReport, WastelandError> {
    let (run_walk, run_ghost) = parts;
    let walk_summary = if run_walk {
        let steps = walk(store, &config.start_label, &config.end_label, &config.walk)?;
        Some(WalkSummary {
            start: config.start_label.clone(),
            end: config.end_label.clone(),
            steps,
            expected: expect.walk,
        })
    } else {
        None
    };

    let ghost_summary = if run_ghost {
        let (start_suffix, terminal_suffix) = config.suffixes()?;
        let outcome = synchronize(store, start_suffix, terminal_suffix, &config.walk)?;
        Some(GhostSummary {
            start_suffix,
            terminal_suffix,
            periods: outcome.periods,
            steps: outcome.steps,
            expected: expect.ghost,
        })
    } else {
        None
    };

    Ok(SolveReport {
        provenance: build_provenance(store),
        walk: walk_summary,
        ghost: ghost_summary,
    })
}

fn verdict(label: &str, steps: u64, expected: Option<u64>) -> String {
    match expected {
        Some(expected) if expected == steps => format!("{label}: {steps} => Pass"),
        Some(expected) => format!("{label}: {steps} (expected {expected}) => Fail"),
        None => format!("{label}: {steps}"),
    }
}

pub fn run(args: &SolveArgs) -> Result<(), Box<dyn Error>> {
    let config = RunConfig::load(args.config.as_deref())?;
    let store = load_network(&args.input)?;
    let expect = Expectations {
        walk: args.expect_walk,
        ghost: args.expect_ghost,
    };
    let report = build_report(&store, &config, (!args.skip_walk, !args.skip_ghost), expect)?;

    if let Some(walk) = &report.walk {
        println!("{}", verdict("walk", walk.steps, walk.expected));
    }
    if let Some(ghost) = &report.ghost {
        println!("{}", verdict("ghost", ghost.steps, ghost.expected));
    }
    if let Some(out) = &args.out {
        write_json(out, &report)?;
        tracing::info!(path = %out.display(), "report written");
    }

    if !report.passed() {
        std::process::exit(1);
    }
    Ok(())
}
