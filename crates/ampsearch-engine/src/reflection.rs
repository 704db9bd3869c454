//! Reflection (diffuser) builder
//!
//! The diffuser is `P · F0 · P†`, where `P` prepares the reference state from
//! |0...0> and `F0` flips the phase of |0...0>. That is a reflection about the
//! reference state (up to an unobservable global phase of -1).

use ampsearch_core::circuit::QuantumCircuit;
use ampsearch_core::operator::Operator;
use tracing::debug;

use crate::oracle::append_phase_flip;
use crate::space::SearchSpace;

/// Initial distribution the search starts from and reflects about.
#[derive(Debug, Clone, Default)]
pub enum Reference {
    /// Equal superposition: Hadamard on every position.
    #[default]
    Uniform,
    /// Caller-supplied preparation circuit, e.g. a biased prior.
    Custom(QuantumCircuit),
}

impl Reference {
    /// Circuit preparing the reference state from |0...0>.
    pub fn preparation_circuit(&self, space: &SearchSpace) -> QuantumCircuit {
        match self {
            Reference::Uniform => {
                let mut c = QuantumCircuit::new(space.width());
                c.h_all();
                c
            }
            Reference::Custom(circuit) => circuit.clone(),
        }
    }

    /// Operator handle for the preparation step, placed first in every
    /// execution sequence.
    pub fn preparation(&self, space: &SearchSpace) -> Operator {
        Operator::from_circuit("reference", self.preparation_circuit(space))
    }
}

/// Build the diffuser for `space` relative to `reference`.
pub fn build_reflection(space: &SearchSpace, reference: &Reference) -> Operator {
    let prepare = reference.preparation_circuit(space);
    let zeros = vec![false; space.width() as usize];

    let mut circuit = QuantumCircuit::new(space.width());
    circuit.append(&prepare.inverse());
    append_phase_flip(&mut circuit, &zeros);
    circuit.append(&prepare);

    let operator = Operator::from_circuit("diffuser", circuit);
    debug!(
        gates = operator.gate_count(),
        depth = operator.depth(),
        custom_reference = matches!(reference, Reference::Custom(_)),
        "diffuser built"
    );
    operator
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::BitOrder;
    use ampsearch_core::gate::Gate;

    #[test]
    fn test_uniform_diffuser_layout() {
        let space = SearchSpace::new(2, BitOrder::MsbFirst).unwrap();
        let op = build_reflection(&space, &Reference::Uniform);
        assert_eq!(
            op.gates(),
            &[
                Gate::H(1),
                Gate::H(0),
                Gate::X(0),
                Gate::X(1),
                Gate::Mcz(vec![0, 1]),
                Gate::X(0),
                Gate::X(1),
                Gate::H(0),
                Gate::H(1),
            ]
        );
    }

    #[test]
    fn test_custom_reference_wraps_inverse_then_preparation() {
        let space = SearchSpace::new(1, BitOrder::MsbFirst).unwrap();
        let mut prep = QuantumCircuit::new(1);
        prep.ry(0, 0.3);
        let op = build_reflection(&space, &Reference::Custom(prep));
        let gates = op.gates();
        assert_eq!(gates.first(), Some(&Gate::Ry(0, -0.3)));
        assert_eq!(gates.last(), Some(&Gate::Ry(0, 0.3)));
    }
}
