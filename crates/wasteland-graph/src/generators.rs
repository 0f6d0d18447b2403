use rand::Rng;
use wasteland_core::errors::{ErrorInfo, WastelandError};
use wasteland_core::rng::RngHandle;
use wasteland_core::Direction;

use crate::instructions::InstructionSequence;
use crate::store::GraphStore;

const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const MAX_RANDOM_NODES: usize = 26 * 26 * 26;

/// Label of the start node of ring `ring` built by [`gen_ghost_rings`].
pub fn ghost_start_label(ring: usize) -> String {
    format!("G{ring}A")
}

/// Label of the terminal node of ring `ring` built by [`gen_ghost_rings`].
pub fn ghost_terminal_label(ring: usize) -> String {
    format!("G{ring}Z")
}

fn ghost_label(ring: usize, position: u64, period: u64) -> String {
    if position == 0 {
        ghost_start_label(ring)
    } else if position == period {
        ghost_terminal_label(ring)
    } else {
        format!("G{ring}N{position}X")
    }
}

/// Generates one ring per entry of `periods`.
///
/// Ring `i` starts at a label ending in `A`, reaches its `Z` terminal after
/// exactly `periods[i]` steps and returns to it every `periods[i]` steps
/// afterwards, whatever the instructions. The synchronisation step of the
/// network is therefore the least common multiple of `periods`.
pub fn gen_ghost_rings(periods: &[u64]) -> Result<GraphStore, WastelandError> {
    if periods.is_empty() {
        return Err(WastelandError::Graph(ErrorInfo::new(
            "empty-generator",
            "ghost ring generator requires at least one period",
        )));
    }
    if let Some(ring) = periods.iter().position(|&period| period == 0) {
        return Err(WastelandError::Graph(
            ErrorInfo::new("invalid-period", "ring periods must be positive")
                .with_context("ring", ring),
        ));
    }

    let mut store = GraphStore::new(InstructionSequence::new(vec![
        Direction::Left,
        Direction::Right,
    ])?);
    for (ring, &period) in periods.iter().enumerate() {
        for position in 0..=period {
            let next = if position == period { 1 } else { position + 1 };
            let target = ghost_label(ring, next, period);
            store.insert(ghost_label(ring, position, period), target.clone(), target);
        }
    }
    Ok(store)
}

/// Generates a fully resolved random network of three-letter labels.
pub fn gen_random_network(
    n_nodes: usize,
    sequence_len: usize,
    rng: &mut RngHandle,
) -> Result<GraphStore, WastelandError> {
    if n_nodes == 0 || n_nodes > MAX_RANDOM_NODES {
        return Err(WastelandError::Graph(
            ErrorInfo::new("invalid-node-count", "random networks need 1..=17576 nodes")
                .with_context("nodes", n_nodes),
        ));
    }
    let directions = (0..sequence_len)
        .map(|_| {
            if rng.gen_bool(0.5) {
                Direction::Left
            } else {
                Direction::Right
            }
        })
        .collect();
    let mut store = GraphStore::new(InstructionSequence::new(directions)?);

    let labels: Vec<String> = (0..n_nodes).map(three_letter_label).collect();
    for label in &labels {
        let left = &labels[rng.gen_range(0..n_nodes)];
        let right = &labels[rng.gen_range(0..n_nodes)];
        store.insert(label.as_str(), left.as_str(), right.as_str());
    }
    Ok(store)
}

fn three_letter_label(index: usize) -> String {
    let digits = [index / (26 * 26), (index / 26) % 26, index % 26];
    digits.iter().map(|&d| ALPHABET[d] as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_cover_three_letter_space() {
        assert_eq!(three_letter_label(0), "AAA");
        assert_eq!(three_letter_label(25), "AAZ");
        assert_eq!(three_letter_label(26), "ABA");
        assert_eq!(three_letter_label(MAX_RANDOM_NODES - 1), "ZZZ");
    }

    #[test]
    fn single_step_ring_loops_on_its_terminal() {
        let store = gen_ghost_rings(&[1]).unwrap();
        let terminal = store.lookup(&ghost_terminal_label(0)).unwrap();
        assert_eq!(terminal.left(), terminal.label());
        assert_eq!(store.lookup(&ghost_start_label(0)).unwrap().right(), "G0Z");
    }

    #[test]
    fn zero_period_is_rejected() {
        let err = gen_ghost_rings(&[3, 0]).unwrap_err();
        assert_eq!(err.code(), "invalid-period");
        assert_eq!(err.info().context["ring"], "1");
    }
}
