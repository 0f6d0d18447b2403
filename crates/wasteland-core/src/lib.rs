#![deny(missing_docs)]
#![doc = "Core traits and data types for the Wasteland walk engine."]

use serde::{Deserialize, Serialize};

pub mod errors;
pub mod provenance;
pub mod rng;

pub use errors::{ErrorInfo, WastelandError};
pub use provenance::{RunProvenance, SchemaVersion};
pub use rng::RngHandle;

/// One binary instruction of the cyclic instruction sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Follow the node's left edge.
    Left,
    /// Follow the node's right edge.
    Right,
}

impl Direction {
    /// Maps an input symbol to a direction.
    ///
    /// `l` and `L` select [`Direction::Left`]; every other symbol falls back to
    /// [`Direction::Right`].
    pub fn from_symbol(symbol: char) -> Self {
        if symbol.eq_ignore_ascii_case(&'l') {
            Direction::Left
        } else {
            Direction::Right
        }
    }

    /// Returns the canonical upper-case symbol for the direction.
    pub fn symbol(self) -> char {
        match self {
            Direction::Left => 'L',
            Direction::Right => 'R',
        }
    }
}

/// A labelled node with its two outgoing edges.
///
/// Edges reference other nodes by label and are resolved by lookup, so a node
/// may point at a label that has not been registered yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    label: String,
    left: String,
    right: String,
}

impl Node {
    /// Creates a node from its label and edge targets.
    pub fn new(label: impl Into<String>, left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            left: left.into(),
            right: right.into(),
        }
    }

    /// Returns the node label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the label reached through the left edge.
    pub fn left(&self) -> &str {
        &self.left
    }

    /// Returns the label reached through the right edge.
    pub fn right(&self) -> &str {
        &self.right
    }

    /// Returns the edge target selected by `direction`.
    pub fn target(&self, direction: Direction) -> &str {
        match direction {
            Direction::Left => &self.left,
            Direction::Right => &self.right,
        }
    }

    /// Returns whether the label ends with `suffix`.
    pub fn ends_with(&self, suffix: char) -> bool {
        label_ends_with(&self.label, suffix)
    }
}

/// Returns whether the last character of `label` equals `suffix`.
pub fn label_ends_with(label: &str, suffix: char) -> bool {
    label.chars().next_back() == Some(suffix)
}

/// Describes the read-only contract the walk engine needs from a network.
pub trait Network: Send + Sync {
    /// Returns the node registered under `label`, or `None` when absent.
    fn lookup(&self, label: &str) -> Option<&Node>;

    /// Returns the instruction applied at the given global step.
    fn instruction_at(&self, step: u64) -> Direction;

    /// Returns every registered node in first-insertion order.
    fn all_nodes(&self) -> &[Node];

    /// Returns the nodes whose label ends with `suffix`, in first-insertion order.
    fn nodes_ending_with(&self, suffix: char) -> Vec<&Node> {
        self.all_nodes()
            .iter()
            .filter(|node| node.ends_with(suffix))
            .collect()
    }
}
