//! Sampling & verification loop

use ampsearch_core::backend::SimulationBackend;
use ampsearch_core::noise::NoiseProfile;
use ampsearch_core::operator::Operator;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decode::{decode, SampleOutcome};
use crate::error::{Result, SearchError};
use crate::predicate::Predicate;
use crate::round::AmplificationRound;
use crate::space::{SearchSpace, State};

/// When a decoded candidate is accepted.
///
/// The candidate must always satisfy the predicate; the policy adds a
/// confidence requirement on its empirical probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum SuccessPolicy {
    /// Most frequent sample satisfies the predicate; no threshold.
    MostFrequent,
    /// Empirical probability strictly greater than `min_probability`.
    Threshold { min_probability: f64 },
}

impl Default for SuccessPolicy {
    /// Strict majority.
    fn default() -> Self {
        SuccessPolicy::Threshold {
            min_probability: 0.5,
        }
    }
}

impl SuccessPolicy {
    pub fn validate(&self) -> Result<()> {
        match *self {
            SuccessPolicy::MostFrequent => Ok(()),
            SuccessPolicy::Threshold { min_probability } => {
                if (0.0..1.0).contains(&min_probability) {
                    Ok(())
                } else {
                    Err(SearchError::InvalidThreshold(min_probability))
                }
            }
        }
    }

    pub fn accepts(&self, empirical_probability: f64) -> bool {
        match *self {
            SuccessPolicy::MostFrequent => true,
            SuccessPolicy::Threshold { min_probability } => empirical_probability > min_probability,
        }
    }
}

/// Outcome of one or more executions.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationResult {
    pub success: bool,
    /// Most frequent state of the last execution; `None` when nothing was
    /// executed or the backend returned no samples.
    pub decoded_state: Option<State>,
    pub empirical_probability: f64,
    /// Round count of the last execution.
    pub rounds_used: u64,
    /// Backend executions performed.
    pub attempts: u32,
}

impl VerificationResult {
    /// Result for a search that could not run any execution.
    pub fn not_attempted() -> Self {
        Self {
            success: false,
            decoded_state: None,
            empirical_probability: 0.0,
            rounds_used: 0,
            attempts: 0,
        }
    }
}

/// Everything about an execution that stays the same across attempts.
#[derive(Debug, Clone, Copy)]
pub struct Execution<'a> {
    pub space: &'a SearchSpace,
    pub predicate: &'a Predicate,
    pub preparation: &'a Operator,
    pub round: &'a AmplificationRound,
    pub shots: u32,
    pub policy: SuccessPolicy,
    pub noise: Option<&'a NoiseProfile>,
}

/// A verification result together with the outcome it was decoded from.
#[derive(Debug, Clone)]
pub struct Verified {
    pub result: VerificationResult,
    pub outcome: SampleOutcome,
}

/// Prepare, apply `rounds` rounds, sample, decode and judge.
pub fn run_and_verify<B: SimulationBackend + ?Sized>(
    backend: &mut B,
    execution: &Execution<'_>,
    rounds: u64,
) -> Result<VerificationResult> {
    sample_and_verify(backend, execution, rounds).map(|v| v.result)
}

/// Like [`run_and_verify`], also returning the decoded histogram.
pub fn sample_and_verify<B: SimulationBackend + ?Sized>(
    backend: &mut B,
    execution: &Execution<'_>,
    rounds: u64,
) -> Result<Verified> {
    if execution.shots == 0 {
        return Err(SearchError::InvalidShots);
    }

    let sequence = execution.round.unroll(execution.preparation, rounds);
    let shots = backend.execute(
        execution.space.width(),
        &sequence,
        execution.shots,
        execution.noise,
    )?;
    let outcome = SampleOutcome::from_shots(execution.space, &shots);

    let decoded = decode(&outcome);
    let success = decoded.is_some_and(|(state, probability)| {
        execution.predicate.matches(state) && execution.policy.accepts(probability)
    });

    debug!(
        rounds,
        decoded = ?decoded.map(|(s, _)| s),
        probability = decoded.map_or(0.0, |(_, p)| p),
        success,
        gates = shots.metrics.gate_count,
        "execution verified"
    );

    Ok(Verified {
        result: VerificationResult {
            success,
            decoded_state: decoded.map(|(s, _)| s),
            empirical_probability: decoded.map_or(0.0, |(_, p)| p),
            rounds_used: rounds,
            attempts: 1,
        },
        outcome,
    })
}
