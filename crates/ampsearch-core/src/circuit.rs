//! Fluent builder for ordered gate sequences

use crate::gate::Gate;
use crate::types::QubitIndex;

/// Gates in application order on a register of `num_qubits` positions.
///
/// Mutable while being built; freeze it into an
/// [`Operator`](crate::operator::Operator) to share it.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantumCircuit {
    gates: Vec<Gate>,
    num_qubits: u32,
}

impl QuantumCircuit {
    pub fn new(num_qubits: u32) -> Self {
        Self {
            gates: Vec::new(),
            num_qubits,
        }
    }

    pub fn h(&mut self, q: QubitIndex) -> &mut Self {
        self.add_gate(Gate::H(q))
    }

    pub fn x(&mut self, q: QubitIndex) -> &mut Self {
        self.add_gate(Gate::X(q))
    }

    pub fn z(&mut self, q: QubitIndex) -> &mut Self {
        self.add_gate(Gate::Z(q))
    }

    pub fn ry(&mut self, q: QubitIndex, angle: f64) -> &mut Self {
        self.add_gate(Gate::Ry(q, angle))
    }

    pub fn rz(&mut self, q: QubitIndex, angle: f64) -> &mut Self {
        self.add_gate(Gate::Rz(q, angle))
    }

    /// `H` on every position: |0...0> to the uniform superposition.
    pub fn h_all(&mut self) -> &mut Self {
        (0..self.num_qubits).for_each(|q| self.gates.push(Gate::H(q)));
        self
    }

    pub fn x_all(&mut self) -> &mut Self {
        (0..self.num_qubits).for_each(|q| self.gates.push(Gate::X(q)));
        self
    }

    pub fn cnot(&mut self, control: QubitIndex, target: QubitIndex) -> &mut Self {
        self.add_gate(Gate::Cnot { control, target })
    }

    /// Phase flip conditioned on every listed position being |1>.
    pub fn mcz(&mut self, qubits: &[QubitIndex]) -> &mut Self {
        self.add_gate(Gate::Mcz(qubits.to_vec()))
    }

    /// Phase flip of |1...1> only.
    pub fn mcz_all(&mut self) -> &mut Self {
        let all: Vec<QubitIndex> = (0..self.num_qubits).collect();
        self.add_gate(Gate::Mcz(all))
    }

    pub fn add_gate(&mut self, gate: Gate) -> &mut Self {
        self.gates.push(gate);
        self
    }

    /// Append every gate of `other`, in order.
    pub fn append(&mut self, other: &QuantumCircuit) -> &mut Self {
        self.gates.extend_from_slice(&other.gates);
        self
    }

    /// Adjoint: gates reversed, each one inverted.
    pub fn inverse(&self) -> QuantumCircuit {
        QuantumCircuit {
            gates: self.gates.iter().rev().map(Gate::inverse).collect(),
            num_qubits: self.num_qubits,
        }
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    pub fn into_gates(self) -> Vec<Gate> {
        self.gates
    }

    /// Layers needed when gates on disjoint positions run side by side.
    pub fn depth(&self) -> u32 {
        let mut layer = vec![0u32; self.num_qubits as usize];
        for gate in &self.gates {
            let touched = gate.qubits();
            let next = touched
                .iter()
                .filter_map(|&q| layer.get(q as usize))
                .max()
                .map_or(1, |d| d + 1);
            for q in touched {
                if let Some(d) = layer.get_mut(q as usize) {
                    *d = next;
                }
            }
        }
        layer.into_iter().max().unwrap_or(0)
    }
}
