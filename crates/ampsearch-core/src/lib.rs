//! # ampsearch-core -- State-Vector Backend for Amplitude Amplification
//!
//! Pure Rust simulation layer under the `ampsearch-engine` amplification
//! engine. It provides:
//!
//! - a fluent [`QuantumCircuit`](circuit::QuantumCircuit) builder over a
//!   small gate set (including a multi-controlled Z),
//! - immutable, `Arc`-shared [`Operator`](operator::Operator) handles,
//! - a dense [`QuantumState`](state::QuantumState) (up to 32 positions),
//! - per-gate-class [`NoiseProfile`](noise::NoiseProfile)s,
//! - the [`SimulationBackend`](backend::SimulationBackend) trait and its
//!   [`StateVectorBackend`](backend::StateVectorBackend) implementation.
//!
//! ## Quick Start
//!
//! ```
//! use ampsearch_core::prelude::*;
//!
//! // Uniform superposition over 2 positions, sampled 100 times.
//! let mut circuit = QuantumCircuit::new(2);
//! circuit.h_all();
//! let prep = Operator::from_circuit("uniform", circuit);
//! let mut backend = StateVectorBackend::with_seed(7);
//! let result = backend.execute(2, &[prep], 100, None).unwrap();
//! assert_eq!(result.counts.values().sum::<usize>(), 100);
//! ```

pub mod backend;
pub mod circuit;
pub mod error;
pub mod gate;
pub mod noise;
pub mod operator;
pub mod simulator;
pub mod state;
pub mod types;

/// Re-exports of the most commonly used items.
pub mod prelude {
    pub use crate::backend::{SimulationBackend, StateVectorBackend};
    pub use crate::circuit::QuantumCircuit;
    pub use crate::error::{QuantumError, Result};
    pub use crate::gate::{Gate, GateClass};
    pub use crate::noise::{NoiseChannel, NoiseProfile};
    pub use crate::operator::Operator;
    pub use crate::simulator::{ShotResult, Simulator};
    pub use crate::state::{QuantumState, MAX_QUBITS};
    pub use crate::types::*;
}
