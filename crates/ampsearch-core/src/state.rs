//! Dense state vector
//!
//! `2^n` complex amplitudes. Bit `q` of an amplitude index is the value of
//! register position `q`, so index `0b101` on three positions means
//! positions 0 and 2 read 1.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{QuantumError, Result};
use crate::gate::{Gate, Unitary2};
use crate::types::*;

/// Widest register a state vector may hold.
pub const MAX_QUBITS: u32 = 32;

/// State vector plus the RNG used by measurement and noise.
pub struct QuantumState {
    amplitudes: Vec<Complex>,
    num_qubits: u32,
    rng: StdRng,
}

impl QuantumState {
    /// |0...0> with an entropy-seeded RNG.
    pub fn new(num_qubits: u32) -> Result<Self> {
        Self::zeroed(num_qubits, StdRng::from_entropy())
    }

    /// |0...0> with a reproducible RNG.
    pub fn new_with_seed(num_qubits: u32, seed: u64) -> Result<Self> {
        Self::zeroed(num_qubits, StdRng::seed_from_u64(seed))
    }

    /// Computational basis state |index>.
    pub fn basis_state(num_qubits: u32, index: usize) -> Result<Self> {
        let mut state = Self::new_with_seed(num_qubits, 0)?;
        if index >= state.amplitudes.len() {
            return Err(QuantumError::CircuitError(format!(
                "basis index {} does not fit in {} positions",
                index, num_qubits
            )));
        }
        state.amplitudes.swap(0, index);
        Ok(state)
    }

    /// Wrap an explicit amplitude vector of length `2^num_qubits`.
    pub fn from_amplitudes(amplitudes: Vec<Complex>, num_qubits: u32) -> Result<Self> {
        Self::check_width(num_qubits)?;
        if amplitudes.len() != 1usize << num_qubits {
            return Err(QuantumError::InvalidStateVector {
                length: amplitudes.len(),
                num_qubits,
            });
        }
        Ok(Self {
            amplitudes,
            num_qubits,
            rng: StdRng::from_entropy(),
        })
    }

    fn zeroed(num_qubits: u32, rng: StdRng) -> Result<Self> {
        Self::check_width(num_qubits)?;
        let mut amplitudes = vec![Complex::ZERO; 1usize << num_qubits];
        amplitudes[0] = Complex::ONE;
        Ok(Self {
            amplitudes,
            num_qubits,
            rng,
        })
    }

    fn check_width(num_qubits: u32) -> Result<()> {
        match num_qubits {
            0 => Err(QuantumError::CircuitError(
                "a state needs at least one position".into(),
            )),
            n if n > MAX_QUBITS => Err(QuantumError::QubitLimitExceeded {
                requested: n,
                maximum: MAX_QUBITS,
            }),
            _ => Ok(()),
        }
    }

    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    pub fn state_vector(&self) -> &[Complex] {
        &self.amplitudes
    }

    /// Born-rule probability of every basis state, in index order.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex::norm_sq).collect()
    }

    /// Bytes held by the amplitude vector of a `num_qubits` state.
    pub fn estimate_memory(num_qubits: u32) -> usize {
        std::mem::size_of::<Complex>() << num_qubits
    }

    pub(crate) fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Apply one gate after checking its positions against the register.
    pub fn apply_gate(&mut self, gate: &Gate) -> Result<()> {
        match gate {
            Gate::Mcz(qubits) => self.apply_mcz(qubits),
            Gate::Cnot { control, target } => self.apply_cnot(*control, *target),
            single => {
                let qubit = single.qubits()[0];
                self.check_qubit(qubit)?;
                let matrix = single.unitary().ok_or_else(|| {
                    QuantumError::CircuitError(format!("no matrix for {:?}", single))
                })?;
                self.apply_unitary(qubit, &matrix);
                Ok(())
            }
        }
    }

    /// Apply a 2x2 unitary to `qubit`, pairing each index whose bit `qubit`
    /// is clear with its partner that has it set.
    pub fn apply_unitary(&mut self, qubit: QubitIndex, m: &Unitary2) {
        let bit = 1usize << qubit;
        for low in (0..self.amplitudes.len()).filter(|i| i & bit == 0) {
            let high = low | bit;
            let (a, b) = (self.amplitudes[low], self.amplitudes[high]);
            self.amplitudes[low] = m[0][0] * a + m[0][1] * b;
            self.amplitudes[high] = m[1][0] * a + m[1][1] * b;
        }
    }

    /// Swap the `target` pairs of every index whose `control` bit is set.
    pub fn apply_cnot(&mut self, control: QubitIndex, target: QubitIndex) -> Result<()> {
        self.check_qubit(control)?;
        self.check_qubit(target)?;
        if control == target {
            return Err(QuantumError::CircuitError(format!(
                "CNOT control and target are both position {}",
                control
            )));
        }
        let (c, t) = (1usize << control, 1usize << target);
        for i in 0..self.amplitudes.len() {
            if i & c != 0 && i & t == 0 {
                self.amplitudes.swap(i, i | t);
            }
        }
        Ok(())
    }

    /// Negate every amplitude whose index has all of `qubits` set.
    ///
    /// An empty list is rejected rather than treated as a global phase.
    pub fn apply_mcz(&mut self, qubits: &[QubitIndex]) -> Result<()> {
        if qubits.is_empty() {
            return Err(QuantumError::CircuitError(
                "multi-controlled Z needs at least one position".into(),
            ));
        }
        let mut mask = 0usize;
        for &q in qubits {
            self.check_qubit(q)?;
            if mask & (1usize << q) != 0 {
                return Err(QuantumError::CircuitError(format!(
                    "multi-controlled Z lists position {} twice",
                    q
                )));
            }
            mask |= 1usize << q;
        }
        self.amplitudes
            .iter_mut()
            .enumerate()
            .filter(|(i, _)| i & mask == mask)
            .for_each(|(_, amp)| *amp = -*amp);
        Ok(())
    }

    /// Projective measurement of one position; collapses and renormalises.
    pub fn measure(&mut self, qubit: QubitIndex) -> Result<MeasurementOutcome> {
        self.check_qubit(qubit)?;
        let bit = 1usize << qubit;

        let p_one: f64 = self
            .amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & bit != 0)
            .map(|(_, a)| a.norm_sq())
            .sum();

        let result = self.rng.gen::<f64>() < p_one;
        let probability = if result { p_one } else { 1.0 - p_one };
        let scale = if probability > 0.0 {
            probability.sqrt().recip()
        } else {
            0.0
        };

        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            *amp = if (i & bit != 0) == result {
                *amp * scale
            } else {
                Complex::ZERO
            };
        }

        Ok(MeasurementOutcome {
            qubit,
            result,
            probability,
        })
    }

    /// Measure positions `0..n` in order.
    pub fn measure_all(&mut self) -> Result<Vec<MeasurementOutcome>> {
        (0..self.num_qubits).map(|q| self.measure(q)).collect()
    }

    /// Rescale so the probabilities sum to 1. A zero vector is left alone.
    pub fn normalize(&mut self) {
        let total: f64 = self.amplitudes.iter().map(Complex::norm_sq).sum();
        if total > 0.0 {
            let scale = total.sqrt().recip();
            self.amplitudes.iter_mut().for_each(|a| *a = *a * scale);
        }
    }

    /// `|<self|other>|^2`; 0 for states of different width.
    pub fn fidelity(&self, other: &QuantumState) -> f64 {
        if self.num_qubits != other.num_qubits {
            return 0.0;
        }
        let mut overlap = Complex::ZERO;
        for (a, b) in self.amplitudes.iter().zip(&other.amplitudes) {
            overlap += a.conj() * *b;
        }
        overlap.norm_sq()
    }

    fn check_qubit(&self, qubit: QubitIndex) -> Result<()> {
        if qubit < self.num_qubits {
            Ok(())
        } else {
            Err(QuantumError::InvalidQubitIndex {
                index: qubit,
                num_qubits: self.num_qubits,
            })
        }
    }
}
