use serde::{Deserialize, Serialize};
use wasteland_core::errors::{ErrorInfo, WastelandError};
use wasteland_core::Direction;

/// Cyclic, non-empty sequence of directions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionSequence {
    directions: Vec<Direction>,
}

impl InstructionSequence {
    /// Creates a sequence, rejecting an empty one.
    pub fn new(directions: Vec<Direction>) -> Result<Self, WastelandError> {
        if directions.is_empty() {
            return Err(WastelandError::Graph(
                ErrorInfo::new("empty-sequence", "instruction sequence must not be empty")
                    .with_hint("the first input line should look like `LRRL`"),
            ));
        }
        Ok(Self { directions })
    }

    /// Parses a sequence from its symbols, one direction per character.
    pub fn from_symbols(symbols: &str) -> Result<Self, WastelandError> {
        Self::new(symbols.chars().map(Direction::from_symbol).collect())
    }

    /// Returns the direction applied at the given global step.
    pub fn at(&self, step: u64) -> Direction {
        let index = step % self.directions.len() as u64;
        self.directions[index as usize]
    }

    /// Returns the number of directions in one period.
    pub fn len(&self) -> usize {
        self.directions.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.directions.is_empty()
    }

    /// Returns the directions of one period.
    pub fn directions(&self) -> &[Direction] {
        &self.directions
    }

    /// Renders the sequence back to its canonical `L`/`R` symbols.
    pub fn to_symbols(&self) -> String {
        self.directions.iter().map(|d| d.symbol()).collect()
    }
}
