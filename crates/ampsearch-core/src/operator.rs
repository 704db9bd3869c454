//! Opaque, shareable operator handles
//!
//! An [`Operator`] is a frozen, named gate sequence. Builders produce them
//! once; callers clone the handle (an `Arc` bump) to place the same operator
//! many times in an execution sequence. Only backends look inside.

use std::fmt;
use std::sync::Arc;

use crate::circuit::QuantumCircuit;
use crate::gate::Gate;

struct OperatorInner {
    name: String,
    num_qubits: u32,
    gates: Vec<Gate>,
    depth: u32,
}

/// Immutable, reference-counted operator over a register.
#[derive(Clone)]
pub struct Operator {
    inner: Arc<OperatorInner>,
}

impl Operator {
    /// Freeze a circuit into a named operator.
    pub fn from_circuit(name: impl Into<String>, circuit: QuantumCircuit) -> Self {
        let depth = circuit.depth();
        let num_qubits = circuit.num_qubits();
        Self {
            inner: Arc::new(OperatorInner {
                name: name.into(),
                num_qubits,
                gates: circuit.into_gates(),
                depth,
            }),
        }
    }

    /// The operator that leaves every state unchanged.
    pub fn identity(name: impl Into<String>, num_qubits: u32) -> Self {
        Self::from_circuit(name, QuantumCircuit::new(num_qubits))
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Register width the operator was built for.
    pub fn num_qubits(&self) -> u32 {
        self.inner.num_qubits
    }

    pub fn is_identity(&self) -> bool {
        self.inner.gates.is_empty()
    }

    pub fn gate_count(&self) -> usize {
        self.inner.gates.len()
    }

    pub fn depth(&self) -> u32 {
        self.inner.depth
    }

    /// Gate-level view, for backends.
    pub fn gates(&self) -> &[Gate] {
        &self.inner.gates
    }

    /// Whether two handles share the same underlying operator.
    pub fn ptr_eq(&self, other: &Operator) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operator")
            .field("name", &self.inner.name)
            .field("num_qubits", &self.inner.num_qubits)
            .field("gates", &self.inner.gates.len())
            .field("depth", &self.inner.depth)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_shares_storage() {
        let mut c = QuantumCircuit::new(2);
        c.h_all();
        let op = Operator::from_circuit("prep", c);
        let copy = op.clone();
        assert!(op.ptr_eq(&copy));
        assert_eq!(copy.name(), "prep");
        assert_eq!(copy.gate_count(), 2);
        assert_eq!(copy.depth(), 1);
    }

    #[test]
    fn test_identity_has_no_gates() {
        let id = Operator::identity("oracle", 4);
        assert!(id.is_identity());
        assert_eq!(id.num_qubits(), 4);
    }
}
