#![deny(missing_docs)]

//! Graph store for the Wasteland walk engine: the cyclic instruction sequence,
//! the label-keyed node table and the text format both are parsed from.

mod generators;
mod hash;
mod instructions;
mod parse;
mod store;

pub use generators::{gen_ghost_rings, gen_random_network, ghost_start_label, ghost_terminal_label};
pub use hash::canonical_hash;
pub use instructions::InstructionSequence;
pub use parse::{parse_network, parse_node_line};
pub use store::GraphStore;
