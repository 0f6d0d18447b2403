//! Single-walker traversal with exact terminal matching.

use wasteland_core::errors::WastelandError;
use wasteland_core::Network;

use crate::opts::WalkOpts;
use crate::walk_error;

/// Follows the edge selected by the instruction at `step` out of `label`.
pub(crate) fn advance<'n, N: Network + ?Sized>(
    network: &'n N,
    label: &str,
    step: u64,
) -> Result<&'n str, WastelandError> {
    let node = network.lookup(label).ok_or_else(|| {
        walk_error("unknown-label", "walker reached a label with no node definition")
            .with_context("label", label)
            .with_context("step", step)
    })?;
    let next = node.target(network.instruction_at(step));
    tracing::trace!(step, from = label, to = next, "advance");
    Ok(next)
}

/// Counts the steps needed to travel from `start` to `end`.
///
/// Returns `Ok(0)` when `start == end`. A label without a node definition
/// fails with `unknown-label`; with `opts.max_steps` set, an unreachable end
/// fails with `step-budget-exceeded` instead of looping forever.
pub fn walk<N: Network + ?Sized>(
    network: &N,
    start: &str,
    end: &str,
    opts: &WalkOpts,
) -> Result<u64, WastelandError> {
    let mut current = start;
    let mut step = 0u64;
    while current != end {
        opts.check_budget(step, current)?;
        current = advance(network, current, step)?;
        step += 1;
    }
    tracing::debug!(start, end, steps = step, "walk finished");
    Ok(step)
}
