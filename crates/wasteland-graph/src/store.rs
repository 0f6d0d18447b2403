use std::collections::BTreeMap;

use wasteland_core::errors::WastelandError;
use wasteland_core::{Direction, Network, Node};

use crate::instructions::InstructionSequence;

/// Label-keyed node table plus the instruction sequence that drives walks.
///
/// Nodes are kept in first-insertion order; that order is the enumeration
/// returned by [`GraphStore::all_nodes`] and is what makes multi-walker start
/// sets deterministic.
#[derive(Debug, Clone)]
pub struct GraphStore {
    instructions: InstructionSequence,
    nodes: Vec<Node>,
    index: BTreeMap<String, usize>,
}

impl GraphStore {
    /// Creates an empty store driven by `instructions`.
    pub fn new(instructions: InstructionSequence) -> Self {
        Self {
            instructions,
            nodes: Vec::new(),
            index: BTreeMap::new(),
        }
    }

    /// Creates an empty store from instruction symbols such as `"LRL"`.
    pub fn from_symbols(symbols: &str) -> Result<Self, WastelandError> {
        Ok(Self::new(InstructionSequence::from_symbols(symbols)?))
    }

    /// Registers a node unless `label` is already present.
    ///
    /// The first definition of a label wins; later inserts are ignored.
    pub fn insert(
        &mut self,
        label: impl Into<String>,
        left: impl Into<String>,
        right: impl Into<String>,
    ) -> &mut Self {
        let label = label.into();
        if self.index.contains_key(&label) {
            tracing::trace!(%label, "ignoring duplicate node definition");
            return self;
        }
        self.index.insert(label.clone(), self.nodes.len());
        self.nodes.push(Node::new(label, left, right));
        self
    }

    /// Returns the node registered under `label`.
    pub fn lookup(&self, label: &str) -> Option<&Node> {
        self.index.get(label).map(|&idx| &self.nodes[idx])
    }

    /// Returns the instruction applied at `step`.
    pub fn instruction_at(&self, step: u64) -> Direction {
        self.instructions.at(step)
    }

    /// Returns the instruction sequence.
    pub fn instructions(&self) -> &InstructionSequence {
        &self.instructions
    }

    /// Returns all nodes in first-insertion order.
    pub fn all_nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns nodes whose label ends with `suffix`, in first-insertion order.
    pub fn nodes_ending_with(&self, suffix: char) -> Vec<&Node> {
        self.nodes.iter().filter(|node| node.ends_with(suffix)).collect()
    }

    /// Returns the number of registered nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns whether no node has been registered.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns edge targets that do not resolve to a registered node.
    pub fn dangling_targets(&self) -> Vec<&str> {
        let mut dangling: Vec<&str> = self
            .nodes
            .iter()
            .flat_map(|node| [node.left(), node.right()])
            .filter(|target| !self.index.contains_key(*target))
            .collect();
        dangling.sort_unstable();
        dangling.dedup();
        dangling
    }
}

impl Network for GraphStore {
    fn lookup(&self, label: &str) -> Option<&Node> {
        GraphStore::lookup(self, label)
    }

    fn instruction_at(&self, step: u64) -> Direction {
        GraphStore::instruction_at(self, step)
    }

    fn all_nodes(&self) -> &[Node] {
        GraphStore::all_nodes(self)
    }

    fn nodes_ending_with(&self, suffix: char) -> Vec<&Node> {
        GraphStore::nodes_ending_with(self, suffix)
    }
}
