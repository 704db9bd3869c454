//! Operator-sequence executor and shot sampler

use std::collections::HashMap;
use std::time::Instant;

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::error::{QuantumError, Result};
use crate::noise::{apply_noise, NoiseProfile};
use crate::operator::Operator;
use crate::state::QuantumState;
use crate::types::*;

/// Histogram of full-register measurements.
///
/// Keys are bit vectors indexed by register position: `key[q]` is the
/// measured value of position `q`.
#[derive(Debug, Clone)]
pub struct ShotResult {
    pub counts: HashMap<Vec<bool>, usize>,
    pub shots: u32,
    pub metrics: SimulationMetrics,
}

/// Stateless simulator entry-point.
pub struct Simulator;

impl Simulator {
    /// Apply `operators` in order to `state`, returning the number of gates
    /// applied.
    pub fn evolve(
        state: &mut QuantumState,
        operators: &[Operator],
        noise: Option<&NoiseProfile>,
    ) -> Result<usize> {
        let mut gate_count = 0usize;
        for op in operators {
            for gate in op.gates() {
                state.apply_gate(gate)?;
                if let Some(profile) = noise {
                    apply_noise(state, gate, profile);
                }
                gate_count += 1;
            }
        }
        Ok(gate_count)
    }

    /// Run `operators` on |0...0> and measure every position `shots` times.
    ///
    /// Without noise the state is evolved once and every shot is drawn from
    /// the final distribution. With a non-silent noise profile each shot is
    /// an independent trajectory seeded from `seed + shot`.
    pub fn run_shots(
        num_qubits: u32,
        operators: &[Operator],
        shots: u32,
        seed: Option<u64>,
        noise: Option<&NoiseProfile>,
    ) -> Result<ShotResult> {
        if shots == 0 {
            return Err(QuantumError::InvalidShots);
        }
        if let Some(profile) = noise {
            profile.validate()?;
        }

        let start = Instant::now();
        let noise = noise.filter(|p| !p.is_silent());
        let mut counts: HashMap<Vec<bool>, usize> = HashMap::new();

        let (gate_count, trajectories) = match noise {
            None => {
                let mut state = new_state(num_qubits, seed)?;
                let gates = Self::evolve(&mut state, operators, None)?;
                let probs = state.probabilities();
                let dist = WeightedIndex::new(&probs).map_err(|e| {
                    QuantumError::CircuitError(format!("degenerate final distribution: {e}"))
                })?;
                let mut rng = match seed {
                    Some(s) => StdRng::seed_from_u64(s),
                    None => StdRng::from_entropy(),
                };
                for _ in 0..shots {
                    let index = dist.sample(&mut rng);
                    *counts.entry(index_to_bits(index, num_qubits)).or_insert(0) += 1;
                }
                (gates, 1)
            }
            Some(profile) => {
                let mut total_gates = 0usize;
                for shot in 0..shots {
                    let shot_seed = seed.map(|s| s.wrapping_add(shot as u64));
                    let mut state = new_state(num_qubits, shot_seed)?;
                    total_gates += Self::evolve(&mut state, operators, Some(profile))?;
                    let outcomes = state.measure_all()?;
                    let mut bits = vec![false; num_qubits as usize];
                    for m in &outcomes {
                        bits[m.qubit as usize] = m.result;
                    }
                    *counts.entry(bits).or_insert(0) += 1;
                }
                (total_gates, shots)
            }
        };

        let elapsed = start.elapsed();
        debug!(
            num_qubits,
            shots,
            gate_count,
            trajectories,
            distinct_outcomes = counts.len(),
            elapsed_us = elapsed.as_micros() as u64,
            "shots sampled"
        );

        Ok(ShotResult {
            counts,
            shots,
            metrics: SimulationMetrics {
                num_qubits,
                gate_count,
                trajectories,
                execution_time_ns: elapsed.as_nanos() as u64,
                peak_memory_bytes: QuantumState::estimate_memory(num_qubits),
            },
        })
    }
}

fn new_state(num_qubits: u32, seed: Option<u64>) -> Result<QuantumState> {
    match seed {
        Some(s) => QuantumState::new_with_seed(num_qubits, s),
        None => QuantumState::new(num_qubits),
    }
}

/// Split an amplitude index into per-position bits (position `q` = bit `q`).
pub fn index_to_bits(index: usize, num_qubits: u32) -> Vec<bool> {
    (0..num_qubits).map(|q| (index >> q) & 1 == 1).collect()
}
