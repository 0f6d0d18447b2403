use std::error::Error;
use std::fs;
use std::path::Path;

use clap::{ArgAction, Parser, Subcommand};
use commands::{
    ghost::{self, GhostArgs},
    solve::{self, SolveArgs},
    walk::{self, WalkArgs},
};
use wasteland_graph::{parse_network, GraphStore};

mod commands;
mod config;
mod logging;

#[derive(Parser, Debug)]
#[command(name = "wasteland", about = "Walk a labelled left/right network")]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Count the steps a single walker needs from the start to the end label.
    Walk(WalkArgs),
    /// Find the step at which every start-suffixed walker is on a terminal.
    Ghost(GhostArgs),
    /// Run both parts and compare against optional expected answers.
    Solve(SolveArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    match cli.command {
        Command::Walk(args) => walk::run(&args),
        Command::Ghost(args) => ghost::run(&args),
        Command::Solve(args) => solve::run(&args),
    }
}

pub(crate) fn load_network(path: &Path) -> Result<GraphStore, Box<dyn Error>> {
    let text = fs::read_to_string(path)
        .map_err(|err| format!("failed to read {}: {err}", path.display()))?;
    let store = parse_network(&text)?;
    let dangling = store.dangling_targets();
    if !dangling.is_empty() {
        tracing::warn!(count = dangling.len(), first = dangling[0], "network has unresolved edge targets");
    }
    tracing::info!(
        path = %path.display(),
        nodes = store.len(),
        sequence_len = store.instructions().len(),
        "network loaded"
    );
    Ok(store)
}

pub(crate) fn write_json<P: AsRef<Path>, T: serde::Serialize>(
    path: P,
    value: &T,
) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}
