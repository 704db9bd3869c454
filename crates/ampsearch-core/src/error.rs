//! Error types for the simulation backend

use crate::types::QubitIndex;
use thiserror::Error;

/// Errors raised while building or executing an operator sequence
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuantumError {
    #[error("register width {requested} exceeds the backend limit of {maximum}")]
    QubitLimitExceeded { requested: u32, maximum: u32 },

    #[error("position {index} is outside a {num_qubits}-position register")]
    InvalidQubitIndex { index: QubitIndex, num_qubits: u32 },

    #[error("state vector of length {length} does not describe {num_qubits} positions")]
    InvalidStateVector { length: usize, num_qubits: u32 },

    #[error("shot count must be positive")]
    InvalidShots,

    #[error("invalid noise rate {rate} for {channel}: must lie in [0, 1]")]
    InvalidNoise { channel: &'static str, rate: f64 },

    #[error("malformed operator sequence: {0}")]
    CircuitError(String),
}

pub type Result<T> = std::result::Result<T, QuantumError>;
