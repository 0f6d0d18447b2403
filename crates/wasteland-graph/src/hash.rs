use sha2::{Digest, Sha256};
use wasteland_core::Direction;

use crate::store::GraphStore;

/// Computes the canonical structural hash for the provided network.
///
/// The digest covers the instruction sequence and every node in insertion
/// order, so two stores built from the same definitions hash identically.
pub fn canonical_hash(store: &GraphStore) -> String {
    let mut hasher = Sha256::new();

    let directions = store.instructions().directions();
    hasher.update((directions.len() as u64).to_le_bytes());
    for direction in directions {
        hasher.update(match direction {
            Direction::Left => b"L",
            Direction::Right => b"R",
        });
    }

    hasher.update((store.len() as u64).to_le_bytes());
    for node in store.all_nodes() {
        update_str(node.label(), &mut hasher);
        update_str(node.left(), &mut hasher);
        update_str(node.right(), &mut hasher);
    }

    format!("{:x}", hasher.finalize())
}

fn update_str(value: &str, hasher: &mut Sha256) {
    hasher.update((value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}
