//! Serializable run reports.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use wasteland_core::errors::{ErrorInfo, WastelandError};
use wasteland_core::provenance::{RunProvenance, SchemaVersion};
use wasteland_graph::{canonical_hash, GraphStore};

use crate::ghost::WalkerPeriod;

/// Schema version written into every [`SolveReport`].
pub const REPORT_SCHEMA: SchemaVersion = SchemaVersion::new(1, 0, 0);

/// Outcome of the single-walker part of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkSummary {
    /// Start label.
    pub start: String,
    /// End label.
    pub end: String,
    /// Steps taken.
    pub steps: u64,
    /// Expected step count supplied by the caller, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<u64>,
}

/// Outcome of the multi-walker part of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GhostSummary {
    /// Suffix marking start labels.
    pub start_suffix: char,
    /// Suffix marking terminal labels.
    pub terminal_suffix: char,
    /// Per-walker first-hit counts.
    pub periods: Vec<WalkerPeriod>,
    /// Synchronisation step.
    pub steps: u64,
    /// Expected synchronisation step supplied by the caller, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<u64>,
}

/// Full report emitted by the `solve` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveReport {
    /// Where the numbers came from.
    pub provenance: RunProvenance,
    /// Single-walker result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub walk: Option<WalkSummary>,
    /// Multi-walker result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ghost: Option<GhostSummary>,
}

impl SolveReport {
    /// Returns false when any supplied expectation does not match its result.
    pub fn passed(&self) -> bool {
        let walk_ok = self
            .walk
            .as_ref()
            .map_or(true, |walk| walk.expected.map_or(true, |e| e == walk.steps));
        let ghost_ok = self
            .ghost
            .as_ref()
            .map_or(true, |ghost| ghost.expected.map_or(true, |e| e == ghost.steps));
        walk_ok && ghost_ok
    }
}

/// Describes the network a report was computed from.
pub fn build_provenance(store: &GraphStore) -> RunProvenance {
    let mut tool_versions = BTreeMap::new();
    tool_versions.insert(
        "wasteland-walk".to_string(),
        env!("CARGO_PKG_VERSION").to_string(),
    );
    RunProvenance {
        schema_version: REPORT_SCHEMA,
        graph_hash: canonical_hash(store),
        sequence_len: store.instructions().len(),
        node_count: store.len(),
        tool_versions,
    }
}

/// Serializes a report as pretty-printed JSON.
pub fn report_to_json(report: &SolveReport) -> Result<String, WastelandError> {
    serde_json::to_string_pretty(report)
        .map_err(|err| WastelandError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
}
