//! Simulation backend seam.
//!
//! The amplification engine orders [`Operator`] handles and asks a
//! [`SimulationBackend`] for samples; it never touches a state vector.
//!
//! | Backend | Positions | Notes |
//! |---------|-----------|-------|
//! | [`StateVectorBackend`] | up to 32 | exact evolution, per-shot trajectories under noise |

use tracing::debug;

use crate::error::{QuantumError, Result};
use crate::noise::NoiseProfile;
use crate::operator::Operator;
use crate::simulator::{ShotResult, Simulator};
use crate::state::MAX_QUBITS;

/// Executes an ordered operator sequence and samples the final register.
///
/// Contract:
/// - the register starts in |0...0>; any reference preparation is the first
///   operator of the sequence,
/// - shots are independent, identically distributed projective measurements
///   of every position,
/// - a noise profile perturbs gates but the result is still a histogram
///   whose counts sum to `shots`,
/// - malformed sequences (positions outside the register) and resource
///   limits are reported as errors, never silently truncated.
pub trait SimulationBackend {
    /// Short human-readable backend name.
    fn name(&self) -> &str;

    /// Largest register width this backend accepts.
    fn max_qubits(&self) -> u32;

    /// Run `operators` on a `num_qubits` register and sample it `shots` times.
    fn execute(
        &mut self,
        num_qubits: u32,
        operators: &[Operator],
        shots: u32,
        noise: Option<&NoiseProfile>,
    ) -> Result<ShotResult>;
}

impl<B: SimulationBackend + ?Sized> SimulationBackend for &mut B {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn max_qubits(&self) -> u32 {
        (**self).max_qubits()
    }

    fn execute(
        &mut self,
        num_qubits: u32,
        operators: &[Operator],
        shots: u32,
        noise: Option<&NoiseProfile>,
    ) -> Result<ShotResult> {
        (**self).execute(num_qubits, operators, shots, noise)
    }
}

/// Dense state-vector backend.
///
/// With a base seed every execution is reproducible: execution `k` uses a
/// seed derived from `(seed, k)`, so repeated attempts in one search see
/// fresh but deterministic randomness.
#[derive(Debug, Clone, Default)]
pub struct StateVectorBackend {
    seed: Option<u64>,
    executions: u64,
}

impl StateVectorBackend {
    /// Backend drawing randomness from OS entropy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend with reproducible sampling.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            executions: 0,
        }
    }

    /// Number of completed `execute` calls.
    pub fn executions(&self) -> u64 {
        self.executions
    }

    fn next_seed(&self) -> Option<u64> {
        // splitmix64 step so consecutive executions are decorrelated
        self.seed.map(|s| {
            let mut z = s.wrapping_add(self.executions.wrapping_mul(0x9E37_79B9_7F4A_7C15));
            z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
            z ^ (z >> 31)
        })
    }
}

impl SimulationBackend for StateVectorBackend {
    fn name(&self) -> &str {
        "state-vector"
    }

    fn max_qubits(&self) -> u32 {
        MAX_QUBITS
    }

    fn execute(
        &mut self,
        num_qubits: u32,
        operators: &[Operator],
        shots: u32,
        noise: Option<&NoiseProfile>,
    ) -> Result<ShotResult> {
        if num_qubits > MAX_QUBITS {
            return Err(QuantumError::QubitLimitExceeded {
                requested: num_qubits,
                maximum: MAX_QUBITS,
            });
        }
        if let Some(op) = operators.iter().find(|op| op.num_qubits() > num_qubits) {
            return Err(QuantumError::CircuitError(format!(
                "operator '{}' spans {} qubits but the register has {}",
                op.name(),
                op.num_qubits(),
                num_qubits
            )));
        }

        let seed = self.next_seed();
        debug!(
            backend = self.name(),
            execution = self.executions,
            operators = operators.len(),
            num_qubits,
            shots,
            noisy = noise.map_or(false, |p| !p.is_silent()),
            "executing operator sequence"
        );
        let result = Simulator::run_shots(num_qubits, operators, shots, seed, noise)?;
        self.executions += 1;
        Ok(result)
    }
}
