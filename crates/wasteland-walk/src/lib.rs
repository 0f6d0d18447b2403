#![deny(missing_docs)]

//! Walk engine: single-walker traversal and the multi-walker synchronisation
//! shortcut built on per-walker period discovery.

pub mod ghost;
pub mod lcm;
pub mod opts;
pub mod report;
pub mod single;

pub use ghost::{simulate_lockstep, synchronize, walk_nodes, GhostOutcome, WalkerPeriod};
pub use lcm::{gcd, lcm, lcm_all};
pub use opts::WalkOpts;
pub use report::{build_provenance, report_to_json, GhostSummary, SolveReport, WalkSummary};
pub use single::walk;

use wasteland_core::errors::{ErrorInfo, WastelandError};

pub(crate) fn walk_error(code: &str, message: &str) -> WastelandError {
    WastelandError::Walk(ErrorInfo::new(code, message))
}
