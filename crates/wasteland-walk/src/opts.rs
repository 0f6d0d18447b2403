//! Options shared by every traversal entry point.

use serde::{Deserialize, Serialize};
use wasteland_core::errors::WastelandError;

use crate::walk_error;

/// Tuning knobs for a traversal call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkOpts {
    /// Upper bound on the steps a single walker may take before the call fails
    /// with `step-budget-exceeded`. `None` walks until the target is reached.
    #[serde(default)]
    pub max_steps: Option<u64>,
    /// Discover per-walker periods on a thread pool instead of in lockstep.
    #[serde(default)]
    pub parallel: bool,
    /// Worker threads for parallel discovery; `0` lets rayon decide.
    #[serde(default)]
    pub concurrency: usize,
}

impl WalkOpts {
    /// Options with a step budget and everything else at its default.
    pub fn with_budget(max_steps: u64) -> Self {
        Self {
            max_steps: Some(max_steps),
            ..Self::default()
        }
    }

    pub(crate) fn check_budget(&self, step: u64, label: &str) -> Result<(), WastelandError> {
        match self.max_steps {
            Some(max) if step >= max => Err(walk_error(
                "step-budget-exceeded",
                "walker did not reach its target within the step budget",
            )
            .with_context("budget", max)
            .with_context("label", label)),
            _ => Ok(()),
        }
    }
}
