//! Multi-walker traversal.
//!
//! Every node whose label ends with the start suffix spawns a walker. The
//! engine does not simulate all walkers until they agree; it records the step
//! at which each walker *first* lands on a terminal-suffixed label and takes
//! the least common multiple of those counts.
//!
//! That shortcut is only sound when each walker's first terminal hit is also
//! its cycle length, i.e. the walker returns to a terminal exactly every
//! `period` steps. Nothing here checks that assumption. Use
//! [`simulate_lockstep`] with a budget to confirm a result on small inputs.

use std::sync::atomic::{AtomicU64, Ordering};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use wasteland_core::errors::{ErrorInfo, WastelandError};
use wasteland_core::{label_ends_with, Network};

use crate::lcm::lcm_all;
use crate::opts::WalkOpts;
use crate::single::advance;
use crate::walk_error;

/// First terminal hit of one walker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkerPeriod {
    /// Position of the walker in the start set.
    pub walker: usize,
    /// Label the walker started from.
    pub start: String,
    /// Terminal label it first landed on.
    pub terminal: String,
    /// Step count of that first landing.
    pub steps: u64,
}

/// Result of [`synchronize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GhostOutcome {
    /// Per-walker first-hit counts in start order.
    pub periods: Vec<WalkerPeriod>,
    /// Least common multiple of all periods.
    pub steps: u64,
}

struct Walker<'a> {
    start: &'a str,
    current: &'a str,
    hit: Option<u64>,
}

fn ensure_distinct_suffixes(start_suffix: char, terminal_suffix: char) -> Result<(), WastelandError> {
    if start_suffix == terminal_suffix {
        return Err(WastelandError::Walk(
            ErrorInfo::new(
                "suffix-collision",
                "start and terminal suffix must differ",
            )
            .with_context("suffix", start_suffix),
        ));
    }
    Ok(())
}

fn start_labels<N: Network + ?Sized>(
    network: &N,
    start_suffix: char,
) -> Result<Vec<&str>, WastelandError> {
    let starts: Vec<&str> = network
        .nodes_ending_with(start_suffix)
        .into_iter()
        .map(|node| node.label())
        .collect();
    if starts.is_empty() {
        return Err(WastelandError::Walk(
            ErrorInfo::new("no-start-nodes", "no label ends with the start suffix")
                .with_context("suffix", start_suffix),
        ));
    }
    Ok(starts)
}

/// Records the first terminal hit of every walker in `starts`.
///
/// Walkers use the global step index for instruction selection, so each one
/// sees exactly the instructions it would see when walking alongside the
/// others. With `opts.parallel` the walkers are simulated independently on a
/// rayon pool; the result is identical and in start order either way. When
/// walkers fail, both modes report the failure at the lowest step, breaking
/// ties by walker position.
pub fn walk_nodes<'a, N: Network + ?Sized>(
    network: &'a N,
    starts: &[&'a str],
    terminal_suffix: char,
    opts: &WalkOpts,
) -> Result<Vec<WalkerPeriod>, WastelandError> {
    if starts.is_empty() {
        return Err(walk_error("no-start-nodes", "walker set is empty"));
    }
    if opts.parallel {
        walk_nodes_parallel(network, starts, terminal_suffix, opts)
    } else {
        walk_nodes_lockstep(network, starts, terminal_suffix, opts)
    }
}

fn walk_nodes_lockstep<'a, N: Network + ?Sized>(
    network: &'a N,
    starts: &[&'a str],
    terminal_suffix: char,
    opts: &WalkOpts,
) -> Result<Vec<WalkerPeriod>, WastelandError> {
    let mut walkers: Vec<Walker<'a>> = starts
        .iter()
        .map(|&start| Walker {
            start,
            current: start,
            hit: None,
        })
        .collect();
    let mut pending = walkers.len();
    let mut step = 0u64;

    while pending > 0 {
        for (index, walker) in walkers.iter_mut().enumerate() {
            if walker.hit.is_some() {
                continue;
            }
            opts.check_budget(step, walker.start)?;
            walker.current = advance(network, walker.current, step)
                .map_err(|err| err.with_context("walker", index))?;
            if label_ends_with(walker.current, terminal_suffix) {
                walker.hit = Some(step + 1);
                pending -= 1;
                tracing::debug!(
                    walker = index,
                    start = walker.start,
                    terminal = walker.current,
                    steps = step + 1,
                    "walker reached terminal"
                );
            }
        }
        step += 1;
    }

    Ok(walkers
        .into_iter()
        .enumerate()
        .filter_map(|(index, walker)| {
            walker.hit.map(|steps| WalkerPeriod {
                walker: index,
                start: walker.start.to_string(),
                terminal: walker.current.to_string(),
                steps,
            })
        })
        .collect())
}

enum Discovery {
    Hit(WalkerPeriod),
    Failed { step: u64, error: WastelandError },
    Abandoned,
}

fn walk_nodes_parallel<N: Network + ?Sized>(
    network: &N,
    starts: &[&str],
    terminal_suffix: char,
    opts: &WalkOpts,
) -> Result<Vec<WalkerPeriod>, WastelandError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(opts.concurrency)
        .build()
        .map_err(|err| {
            WastelandError::Walk(ErrorInfo::new("thread-pool", err.to_string()))
        })?;

    // Earliest step at which any walker has failed so far.
    let cutoff = AtomicU64::new(u64::MAX);
    let outcomes: Vec<Discovery> = pool.install(|| {
        starts
            .par_iter()
            .enumerate()
            .map(|(index, start)| first_hit(network, index, start, terminal_suffix, opts, &cutoff))
            .collect()
    });

    // Report the failure lockstep would have hit first: lowest step, then
    // lowest walker index.
    let mut periods = Vec::with_capacity(outcomes.len());
    let mut earliest: Option<(u64, WastelandError)> = None;
    for outcome in outcomes {
        match outcome {
            Discovery::Hit(period) => periods.push(period),
            Discovery::Failed { step, error } => {
                if earliest.as_ref().map_or(true, |(best, _)| step < *best) {
                    earliest = Some((step, error));
                }
            }
            Discovery::Abandoned => {}
        }
    }
    match earliest {
        Some((_, error)) => Err(error),
        None => Ok(periods),
    }
}

fn first_hit<N: Network + ?Sized>(
    network: &N,
    index: usize,
    start: &str,
    terminal_suffix: char,
    opts: &WalkOpts,
    cutoff: &AtomicU64,
) -> Discovery {
    let mut current = start;
    let mut step = 0u64;
    loop {
        if step > cutoff.load(Ordering::Relaxed) {
            return Discovery::Abandoned;
        }
        let advanced = opts.check_budget(step, start).and_then(|()| {
            advance(network, current, step).map_err(|err| err.with_context("walker", index))
        });
        current = match advanced {
            Ok(next) => next,
            Err(error) => {
                cutoff.fetch_min(step, Ordering::Relaxed);
                return Discovery::Failed { step, error };
            }
        };
        step += 1;
        if label_ends_with(current, terminal_suffix) {
            tracing::debug!(walker = index, start, terminal = current, steps = step, "walker reached terminal");
            return Discovery::Hit(WalkerPeriod {
                walker: index,
                start: start.to_string(),
                terminal: current.to_string(),
                steps: step,
            });
        }
    }
}

/// Finds the step at which every start-suffixed walker sits on a
/// terminal-suffixed label, via the first-hit LCM shortcut.
pub fn synchronize<N: Network + ?Sized>(
    network: &N,
    start_suffix: char,
    terminal_suffix: char,
    opts: &WalkOpts,
) -> Result<GhostOutcome, WastelandError> {
    ensure_distinct_suffixes(start_suffix, terminal_suffix)?;
    let starts = start_labels(network, start_suffix)?;
    let periods = walk_nodes(network, &starts, terminal_suffix, opts)?;
    let steps = lcm_all(periods.iter().map(|period| period.steps))?;
    tracing::info!(walkers = periods.len(), steps, "walkers synchronised");
    Ok(GhostOutcome { periods, steps })
}

/// Advances all walkers together until they are simultaneously terminal.
///
/// This is the brute-force counterpart of [`synchronize`]; it always needs a
/// budget because the answer is typically far beyond what can be stepped.
pub fn simulate_lockstep<N: Network + ?Sized>(
    network: &N,
    start_suffix: char,
    terminal_suffix: char,
    max_steps: u64,
) -> Result<u64, WastelandError> {
    ensure_distinct_suffixes(start_suffix, terminal_suffix)?;
    let mut current = start_labels(network, start_suffix)?;
    let mut step = 0u64;
    loop {
        if current
            .iter()
            .all(|label| label_ends_with(label, terminal_suffix))
        {
            return Ok(step);
        }
        if step >= max_steps {
            return Err(walk_error(
                "step-budget-exceeded",
                "walkers did not land on terminals together within the step budget",
            )
            .with_context("budget", max_steps)
            .with_context("walkers", current.len())
            .with_context("start_suffix", start_suffix)
            .with_context("terminal_suffix", terminal_suffix));
        }
        for label in current.iter_mut() {
            *label = advance(network, *label, step)?;
        }
        step += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasteland_graph::parse_network;

    const GHOSTS: &str = "LR\n\n11A = (11B, XXX)\n11B = (XXX, 11Z)\n11Z = (11B, XXX)\n22A = (22B, XXX)\n22B = (22C, 22C)\n22C = (22Z, 22Z)\n22Z = (22B, 22B)\nXXX = (XXX, XXX)\n";

    #[test]
    fn lockstep_walkers_record_first_hits() {
        let store = parse_network(GHOSTS).unwrap();
        let periods = walk_nodes(&store, &["11A", "22A"], 'Z', &WalkOpts::default()).unwrap();
        let steps: Vec<u64> = periods.iter().map(|p| p.steps).collect();
        assert_eq!(steps, [2, 3]);
        assert_eq!(periods[1].terminal, "22Z");
    }

    #[test]
    fn empty_walker_set_is_rejected() {
        let store = parse_network(GHOSTS).unwrap();
        let err = walk_nodes(&store, &[], 'Z', &WalkOpts::default()).unwrap_err();
        assert_eq!(err.code(), "no-start-nodes");
    }

    #[test]
    fn equal_suffixes_are_rejected() {
        let store = parse_network(GHOSTS).unwrap();
        let err = synchronize(&store, 'A', 'A', &WalkOpts::default()).unwrap_err();
        assert_eq!(err.code(), "suffix-collision");
    }

    #[test]
    fn unknown_label_names_the_walker() {
        let store = parse_network("L\n11A = (11B, 11B)\n22A = (QQQ, QQQ)\n11B = (11Z, 11Z)\n").unwrap();
        let err = synchronize(&store, 'A', 'Z', &WalkOpts::default()).unwrap_err();
        assert_eq!(err.code(), "unknown-label");
        assert_eq!(err.info().context["walker"], "1");
        assert_eq!(err.info().context["label"], "QQQ");
    }

    #[test]
    fn lockstep_simulation_agrees_on_example() {
        let store = parse_network(GHOSTS).unwrap();
        assert_eq!(simulate_lockstep(&store, 'A', 'Z', 100).unwrap(), 6);
    }

    #[test]
    fn lockstep_simulation_budget_names_the_walker_set() {
        let store = parse_network(GHOSTS).unwrap();
        let err = simulate_lockstep(&store, 'A', 'Z', 4).unwrap_err();
        assert_eq!(err.code(), "step-budget-exceeded");
        let context = &err.info().context;
        assert_eq!(context["walkers"], "2");
        assert_eq!(context["start_suffix"], "A");
        assert!(!context.contains_key("label"));
    }

    #[test]
    fn lockstep_simulation_rejects_equal_suffixes() {
        let store = parse_network(GHOSTS).unwrap();
        let err = simulate_lockstep(&store, 'Z', 'Z', 100).unwrap_err();
        assert_eq!(err.code(), "suffix-collision");
    }

    #[test]
    fn lockstep_simulation_requires_start_nodes() {
        let store = parse_network(GHOSTS).unwrap();
        let err = simulate_lockstep(&store, 'Q', 'Z', 100).unwrap_err();
        assert_eq!(err.code(), "no-start-nodes");
    }

    // 11A dead-ends on QQQ at step 3; 22A loops forever on itself.
    const MIXED_FAILURES: &str = "L\n11A = (11B, 11B)\n11B = (11C, 11C)\n11C = (QQQ, QQQ)\n22A = (22A, 22A)\n";

    fn both_modes(opts: WalkOpts) -> (WastelandError, WastelandError) {
        let store = parse_network(MIXED_FAILURES).unwrap();
        let parallel = WalkOpts {
            parallel: true,
            concurrency: 2,
            ..opts.clone()
        };
        let lockstep = walk_nodes(&store, &["11A", "22A"], 'Z', &opts).unwrap_err();
        let threaded = walk_nodes(&store, &["11A", "22A"], 'Z', &parallel).unwrap_err();
        (lockstep, threaded)
    }

    #[test]
    fn earlier_budget_failure_wins_in_both_modes() {
        let (lockstep, threaded) = both_modes(WalkOpts::with_budget(2));
        assert_eq!(lockstep.code(), "step-budget-exceeded");
        assert_eq!(lockstep.info().context["label"], "11A");
        assert_eq!(lockstep, threaded);
    }

    #[test]
    fn earlier_unknown_label_wins_in_both_modes() {
        let (lockstep, threaded) = both_modes(WalkOpts::with_budget(10));
        assert_eq!(lockstep.code(), "unknown-label");
        assert_eq!(lockstep.info().context["walker"], "0");
        assert_eq!(lockstep.info().context["step"], "3");
        assert_eq!(lockstep, threaded);
    }

    #[test]
    fn parallel_failure_does_not_wait_for_unbounded_walkers() {
        let store = parse_network(MIXED_FAILURES).unwrap();
        let opts = WalkOpts {
            parallel: true,
            concurrency: 2,
            ..WalkOpts::default()
        };
        let err = walk_nodes(&store, &["11A", "22A"], 'Z', &opts).unwrap_err();
        assert_eq!(err.code(), "unknown-label");
    }
}
