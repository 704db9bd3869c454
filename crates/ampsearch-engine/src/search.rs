//! Top-level search driver
//!
//! [`AmplitudeSearch`] builds the oracle, diffuser and preparation operators
//! once, then executes either a single fixed-round run or an adaptive series
//! of runs against a [`SimulationBackend`].

use ampsearch_core::backend::SimulationBackend;
use ampsearch_core::operator::Operator;
use tracing::{info, instrument, warn};

use crate::config::SearchConfig;
use crate::decode::SampleOutcome;
use crate::error::{Result, SearchError};
use crate::oracle::{build_oracle, Oracle};
use crate::predicate::Predicate;
use crate::reflection::{build_reflection, Reference};
use crate::round::{compose_round, AmplificationRound};
use crate::schedule::{max_useful_rounds, plan_iterations, IterationPlan, SchedulingMode};
use crate::space::SearchSpace;
use crate::verify::{sample_and_verify, Execution, VerificationResult, Verified};

/// Full record of a search run.
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub plan: IterationPlan,
    /// Final verdict. Its `attempts` equals `history.len()`.
    pub result: VerificationResult,
    /// One entry per backend execution, in order; `attempts` counts up from 1.
    pub history: Vec<VerificationResult>,
    /// Histogram of the last execution, if any ran.
    pub outcome: Option<SampleOutcome>,
}

/// A configured amplitude-amplification search.
///
/// Construction validates everything that can be checked without a backend,
/// so [`AmplitudeSearch::run`] only fails on backend errors.
#[derive(Debug, Clone)]
pub struct AmplitudeSearch {
    space: SearchSpace,
    predicate: Predicate,
    config: SearchConfig,
    oracle: Oracle,
    round: AmplificationRound,
    preparation: Operator,
}

impl AmplitudeSearch {
    pub fn new(
        space: SearchSpace,
        predicate: Predicate,
        reference: Reference,
        config: SearchConfig,
    ) -> Result<Self> {
        config.validate()?;
        if let Reference::Custom(circuit) = &reference {
            if circuit.num_qubits() != space.width() {
                return Err(SearchError::ReferenceWidthMismatch {
                    expected: space.width(),
                    actual: circuit.num_qubits(),
                });
            }
        }

        let oracle = build_oracle(&space, &predicate)?;
        let reflection = build_reflection(&space, &reference);
        let round = compose_round(oracle.operator().clone(), reflection);
        let preparation = reference.preparation(&space);

        Ok(Self {
            space,
            predicate,
            config,
            oracle,
            round,
            preparation,
        })
    }

    /// Uniform reference over a space whose bit order comes from `config`.
    pub fn uniform(width: u32, predicate: Predicate, config: SearchConfig) -> Result<Self> {
        let space = SearchSpace::new(width, config.bit_order)?;
        Self::new(space, predicate, Reference::Uniform, config)
    }

    pub fn space(&self) -> &SearchSpace {
        &self.space
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn oracle(&self) -> &Oracle {
        &self.oracle
    }

    pub fn round(&self) -> &AmplificationRound {
        &self.round
    }

    pub fn preparation(&self) -> &Operator {
        &self.preparation
    }

    /// Plan chosen for this search given the configured mode.
    pub fn plan(&self) -> IterationPlan {
        let marked_count = match self.config.mode {
            SchedulingMode::Auto => self.predicate.known_count(),
            SchedulingMode::Fixed => Some(self.oracle.marked_count()),
            SchedulingMode::Adaptive => None,
        };
        plan_iterations(
            &self.space,
            marked_count,
            self.config.schedule,
            self.config.max_attempts,
        )
    }

    /// Run the search and return the final verdict.
    pub fn run<B: SimulationBackend + ?Sized>(&self, backend: &mut B) -> Result<VerificationResult> {
        self.run_report(backend).map(|report| report.result)
    }

    /// Run the search, keeping every attempt and the last histogram.
    ///
    /// Adaptive runs stop once the schedule asks for more than
    /// [`max_useful_rounds`].
    #[instrument(skip(self, backend), fields(width = self.space.width(), backend = backend.name()))]
    pub fn run_report<B: SimulationBackend + ?Sized>(&self, backend: &mut B) -> Result<SearchReport> {
        let plan = self.plan();

        if self.oracle.is_identity() {
            warn!("predicate matches no state in the space; skipping execution");
            return Ok(SearchReport {
                plan,
                result: VerificationResult::not_attempted(),
                history: Vec::new(),
                outcome: None,
            });
        }

        let execution = Execution {
            space: &self.space,
            predicate: &self.predicate,
            preparation: &self.preparation,
            round: &self.round,
            shots: self.config.shots,
            policy: self.config.success,
            noise: self.config.noise.as_ref(),
        };

        match plan {
            IterationPlan::Fixed { rounds } => {
                let Verified { result, outcome } = sample_and_verify(backend, &execution, rounds)?;
                info!(
                    rounds,
                    success = result.success,
                    decoded = ?result.decoded_state,
                    probability = result.empirical_probability,
                    "fixed search finished"
                );
                Ok(SearchReport {
                    plan,
                    history: vec![result.clone()],
                    result,
                    outcome: Some(outcome),
                })
            }
            IterationPlan::Adaptive {
                schedule,
                max_attempts,
            } => {
                let cap = max_useful_rounds(&self.space);
                let mut history = Vec::new();
                let mut last: Option<Verified> = None;

                for (attempt, rounds) in schedule.rounds().take(max_attempts as usize).enumerate() {
                    if rounds > cap {
                        warn!(attempt, rounds, cap, "schedule passed the useful round count; stopping");
                        break;
                    }
                    let mut verified = sample_and_verify(backend, &execution, rounds)?;
                    verified.result.attempts = attempt as u32 + 1;
                    info!(
                        attempt,
                        rounds,
                        success = verified.result.success,
                        decoded = ?verified.result.decoded_state,
                        probability = verified.result.empirical_probability,
                        "adaptive attempt"
                    );
                    history.push(verified.result.clone());
                    let done = verified.result.success;
                    last = Some(verified);
                    if done {
                        break;
                    }
                }

                let attempts = history.len() as u32;
                let (result, outcome) = match last {
                    Some(Verified { result, outcome }) => (result, Some(outcome)),
                    None => (VerificationResult::not_attempted(), None),
                };
                if !result.success {
                    warn!(attempts, "adaptive search exhausted its attempts without success");
                }

                Ok(SearchReport {
                    plan,
                    result,
                    history,
                    outcome,
                })
            }
        }
    }
}

/// Build and run a uniform-reference search in one call.
pub fn search<B: SimulationBackend + ?Sized>(
    width: u32,
    predicate: Predicate,
    config: SearchConfig,
    backend: &mut B,
) -> Result<VerificationResult> {
    AmplitudeSearch::uniform(width, predicate, config)?.run(backend)
}
