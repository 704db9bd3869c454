//! Phase-marking oracle builder
//!
//! For each marked state the oracle applies X to every position whose bit is
//! 0, a multi-controlled Z over the whole register, and the same X gates
//! again. That negates the amplitude of exactly that state. Blocks for
//! different states commute, so each marked state gets one independent sign
//! flip and every other state is left alone.

use ampsearch_core::circuit::QuantumCircuit;
use ampsearch_core::operator::Operator;
use tracing::debug;

use crate::error::Result;
use crate::predicate::Predicate;
use crate::space::{SearchSpace, State};

/// A built oracle and the marked states it flips.
#[derive(Debug, Clone)]
pub struct Oracle {
    operator: Operator,
    marked: Vec<State>,
}

impl Oracle {
    pub fn operator(&self) -> &Operator {
        &self.operator
    }

    pub fn marked_count(&self) -> usize {
        self.marked.len()
    }

    pub fn marked_states(&self) -> &[State] {
        &self.marked
    }

    /// True when nothing is marked; the oracle then has no effect and no
    /// number of rounds can amplify anything.
    pub fn is_identity(&self) -> bool {
        self.marked.is_empty()
    }
}

/// Append "negate zeros, flip |1...1>, un-negate zeros" for one register
/// pattern. Shared with the diffuser, which flips the all-zero pattern.
pub(crate) fn append_phase_flip(circuit: &mut QuantumCircuit, positions: &[bool]) {
    let zeros: Vec<u32> = positions
        .iter()
        .enumerate()
        .filter(|(_, &bit)| !bit)
        .map(|(q, _)| q as u32)
        .collect();

    for &q in &zeros {
        circuit.x(q);
    }
    circuit.mcz_all();
    for &q in &zeros {
        circuit.x(q);
    }
}

/// Build the phase-marking operator for `predicate` over `space`.
///
/// Enumerated sets are validated first (non-empty, in range). A closure that
/// matches nothing yields the identity oracle.
pub fn build_oracle(space: &SearchSpace, predicate: &Predicate) -> Result<Oracle> {
    predicate.validate(space)?;
    let marked = predicate.marked_states(space);

    let mut circuit = QuantumCircuit::new(space.width());
    for &state in &marked {
        append_phase_flip(&mut circuit, &space.positions(state));
    }

    let operator = Operator::from_circuit("oracle", circuit);
    debug!(
        marked = marked.len(),
        gates = operator.gate_count(),
        depth = operator.depth(),
        "oracle built"
    );

    Ok(Oracle { operator, marked })
}
