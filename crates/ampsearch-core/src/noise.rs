//! Stochastic gate-noise channels
//!
//! A [`NoiseProfile`] holds one [`NoiseChannel`] per gate class. After every
//! gate, the channel for that gate's class fires independently on each
//! position the gate touches. Noisy execution therefore evolves one random
//! trajectory per shot; the sampling contract is unchanged.

use serde::{Deserialize, Serialize};

use crate::error::{QuantumError, Result};
use crate::gate::{Gate, GateClass};
use crate::state::QuantumState;

use rand::Rng;

/// Pauli error rates applied after a gate, per touched position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NoiseChannel {
    /// With this probability apply a uniformly random X, Y or Z.
    #[serde(default)]
    pub depolarizing_rate: f64,
    /// With this probability apply X.
    #[serde(default)]
    pub bit_flip_rate: f64,
    /// With this probability apply Z.
    #[serde(default)]
    pub phase_flip_rate: f64,
}

impl NoiseChannel {
    pub fn depolarizing(rate: f64) -> Self {
        Self {
            depolarizing_rate: rate,
            ..Self::default()
        }
    }

    pub fn is_silent(&self) -> bool {
        self.depolarizing_rate == 0.0 && self.bit_flip_rate == 0.0 && self.phase_flip_rate == 0.0
    }

    fn validate(&self) -> Result<()> {
        for (channel, rate) in [
            ("depolarizing_rate", self.depolarizing_rate),
            ("bit_flip_rate", self.bit_flip_rate),
            ("phase_flip_rate", self.phase_flip_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(QuantumError::InvalidNoise { channel, rate });
            }
        }
        Ok(())
    }
}

/// Gate-fidelity perturbation, keyed by gate class.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NoiseProfile {
    #[serde(default)]
    pub single_qubit: NoiseChannel,
    #[serde(default)]
    pub multi_qubit: NoiseChannel,
}

impl NoiseProfile {
    /// Pure depolarizing noise with separate single- and multi-qubit rates.
    ///
    /// `NoiseProfile::depolarizing(0.02, 0.03)` is the profile the demo
    /// binary uses for `--noisy`.
    pub fn depolarizing(single_qubit: f64, multi_qubit: f64) -> Self {
        Self {
            single_qubit: NoiseChannel::depolarizing(single_qubit),
            multi_qubit: NoiseChannel::depolarizing(multi_qubit),
        }
    }

    pub fn is_silent(&self) -> bool {
        self.single_qubit.is_silent() && self.multi_qubit.is_silent()
    }

    /// Check that every rate is a probability.
    pub fn validate(&self) -> Result<()> {
        self.single_qubit.validate()?;
        self.multi_qubit.validate()
    }

    pub fn channel(&self, class: GateClass) -> &NoiseChannel {
        match class {
            GateClass::SingleQubit => &self.single_qubit,
            GateClass::MultiQubit => &self.multi_qubit,
        }
    }
}

/// Apply the profile's channel for `gate` to the state.
pub(crate) fn apply_noise(state: &mut QuantumState, gate: &Gate, profile: &NoiseProfile) {
    let channel = *profile.channel(gate.class());
    if channel.is_silent() {
        return;
    }

    for qubit in gate.qubits() {
        if channel.depolarizing_rate > 0.0 {
            let r: f64 = state.rng_mut().gen();
            if r < channel.depolarizing_rate {
                let choice: f64 = state.rng_mut().gen();
                let pauli = if choice < 1.0 / 3.0 {
                    Gate::X(qubit)
                } else if choice < 2.0 / 3.0 {
                    Gate::Y(qubit)
                } else {
                    Gate::Z(qubit)
                };
                apply_pauli(state, &pauli);
            }
        }

        if channel.bit_flip_rate > 0.0 {
            let r: f64 = state.rng_mut().gen();
            if r < channel.bit_flip_rate {
                apply_pauli(state, &Gate::X(qubit));
            }
        }

        if channel.phase_flip_rate > 0.0 {
            let r: f64 = state.rng_mut().gen();
            if r < channel.phase_flip_rate {
                apply_pauli(state, &Gate::Z(qubit));
            }
        }
    }
}

fn apply_pauli(state: &mut QuantumState, pauli: &Gate) {
    if let Some(m) = pauli.unitary() {
        state.apply_unitary(pauli.qubits()[0], &m);
    }
}
