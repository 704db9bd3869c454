//! Search space and the single state/register bit-order convention
//!
//! Every conversion between a domain [`State`] and register positions goes
//! through [`SearchSpace`]. The oracle builder uses [`SearchSpace::positions`]
//! and the decoder uses [`SearchSpace::state_from_positions`]; both read the
//! same [`BitOrder`], so the two directions cannot drift apart.

use std::fmt;

use ampsearch_core::state::MAX_QUBITS;
use ampsearch_core::types::QubitIndex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};

/// A candidate value in `[0, 2^width)`.
pub type State = u64;

/// Which end of the state value register position 0 holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BitOrder {
    /// Position 0 holds the most significant bit. A target written as the
    /// bit-string `b0 b1 ... b(n-1)` puts `b_i` on position `i`.
    #[default]
    MsbFirst,
    /// Position 0 holds the least significant bit.
    LsbFirst,
}

impl fmt::Display for BitOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitOrder::MsbFirst => write!(f, "msb-first"),
            BitOrder::LsbFirst => write!(f, "lsb-first"),
        }
    }
}

/// An enumerable space of `2^width` states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchSpace {
    width: u32,
    bit_order: BitOrder,
}

impl SearchSpace {
    pub fn new(width: u32, bit_order: BitOrder) -> Result<Self> {
        if width == 0 || width > MAX_QUBITS {
            return Err(SearchError::InvalidWidth {
                width,
                maximum: MAX_QUBITS,
            });
        }
        Ok(Self { width, bit_order })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn bit_order(&self) -> BitOrder {
        self.bit_order
    }

    /// Number of states, `2^width`.
    pub fn size(&self) -> u64 {
        1u64 << self.width
    }

    pub fn contains(&self, state: State) -> bool {
        state < self.size()
    }

    pub fn states(&self) -> impl Iterator<Item = State> {
        0..self.size()
    }

    /// Register position that carries bit `bit` (0 = least significant) of a
    /// state value.
    pub fn position_of_bit(&self, bit: u32) -> QubitIndex {
        match self.bit_order {
            BitOrder::MsbFirst => self.width - 1 - bit,
            BitOrder::LsbFirst => bit,
        }
    }

    /// Per-position bits of `state`: element `q` is the value on position `q`.
    pub fn positions(&self, state: State) -> Vec<bool> {
        let mut bits = vec![false; self.width as usize];
        for bit in 0..self.width {
            bits[self.position_of_bit(bit) as usize] = (state >> bit) & 1 == 1;
        }
        bits
    }

    /// Inverse of [`positions`](Self::positions).
    ///
    /// Positions beyond `width` are ignored.
    pub fn state_from_positions(&self, positions: &[bool]) -> State {
        (0..self.width)
            .filter(|&bit| {
                positions
                    .get(self.position_of_bit(bit) as usize)
                    .copied()
                    .unwrap_or(false)
            })
            .fold(0u64, |acc, bit| acc | (1u64 << bit))
    }

    /// Amplitude index of `state` in a state vector whose index bit `q` is
    /// position `q`.
    pub fn register_index(&self, state: State) -> usize {
        self.positions(state)
            .iter()
            .enumerate()
            .filter(|(_, &set)| set)
            .fold(0usize, |acc, (q, _)| acc | (1usize << q))
    }

    /// Human-readable binary form, most significant bit first.
    pub fn bitstring(&self, state: State) -> String {
        format!("{:0width$b}", state, width = self.width as usize)
    }
}

impl fmt::Display for SearchSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} positions, {} states, {}",
            self.width,
            self.size(),
            self.bit_order
        )
    }
}
