//! End-to-end tests for ampsearch_engine::search: fixed and adaptive runs,
//! verification, error handling.

use ampsearch_core::error::QuantumError;
use ampsearch_core::operator::Operator;
use ampsearch_core::simulator::ShotResult;
use ampsearch_engine::prelude::*;

/// Delegates to a seeded state-vector backend and counts executions.
struct CountingBackend {
    inner: StateVectorBackend,
    calls: usize,
    rounds_seen: Vec<usize>,
}

impl CountingBackend {
    fn new(seed: u64) -> Self {
        Self {
            inner: StateVectorBackend::with_seed(seed),
            calls: 0,
            rounds_seen: Vec::new(),
        }
    }
}

impl SimulationBackend for CountingBackend {
    fn name(&self) -> &str {
        "counting"
    }

    fn max_qubits(&self) -> u32 {
        self.inner.max_qubits()
    }

    fn execute(
        &mut self,
        num_qubits: u32,
        operators: &[Operator],
        shots: u32,
        noise: Option<&NoiseProfile>,
    ) -> ampsearch_core::error::Result<ShotResult> {
        self.calls += 1;
        // preparation + 2 operators per round
        self.rounds_seen.push((operators.len() - 1) / 2);
        self.inner.execute(num_qubits, operators, shots, noise)
    }
}

/// Always fails.
struct BrokenBackend;

impl SimulationBackend for BrokenBackend {
    fn name(&self) -> &str {
        "broken"
    }

    fn max_qubits(&self) -> u32 {
        32
    }

    fn execute(
        &mut self,
        _num_qubits: u32,
        _operators: &[Operator],
        _shots: u32,
        _noise: Option<&NoiseProfile>,
    ) -> ampsearch_core::error::Result<ShotResult> {
        Err(QuantumError::CircuitError("device unavailable".into()))
    }
}

// ---------------------------------------------------------------------------
// Fixed mode
// ---------------------------------------------------------------------------

#[test]
fn test_fixed_search_finds_single_target() {
    let config = SearchConfig::default().with_shots(1024);
    let search = AmplitudeSearch::uniform(7, Predicate::single(85), config).unwrap();
    assert_eq!(search.plan(), IterationPlan::Fixed { rounds: 8 });

    let mut backend = CountingBackend::new(17);
    let result = search.run(&mut backend).unwrap();

    assert!(result.success);
    assert_eq!(result.decoded_state, Some(85));
    assert!(result.empirical_probability > 0.9, "{}", result.empirical_probability);
    assert_eq!(result.rounds_used, 8);
    assert_eq!(result.attempts, 1);
    assert_eq!(backend.calls, 1);
    assert_eq!(backend.rounds_seen, vec![8]);
}

#[test]
fn test_fixed_search_with_lsb_first_order() {
    // 0b0000110 reads differently in the two orders; both must decode to 6.
    let config = SearchConfig::default().with_bit_order(BitOrder::LsbFirst);
    let search = AmplitudeSearch::uniform(7, Predicate::single(6), config).unwrap();
    let result = search.run(&mut StateVectorBackend::with_seed(3)).unwrap();
    assert!(result.success);
    assert_eq!(result.decoded_state, Some(6));
}

#[test]
fn test_fixed_search_with_two_targets() {
    let search = AmplitudeSearch::uniform(
        6,
        Predicate::from_states([5, 40]),
        SearchConfig::default().with_success(SuccessPolicy::MostFrequent),
    )
    .unwrap();
    // floor(pi/4 * sqrt(64 / 2)) = 4
    assert_eq!(search.plan(), IterationPlan::Fixed { rounds: 4 });

    let report = search.run_report(&mut StateVectorBackend::with_seed(11)).unwrap();
    assert!(report.result.success);
    let decoded = report.result.decoded_state.unwrap();
    assert!(decoded == 5 || decoded == 40);

    let outcome = report.outcome.unwrap();
    let marked_mass = outcome.probability(5) + outcome.probability(40);
    assert!(marked_mass > 0.9, "{}", marked_mass);
}

#[test]
fn test_forced_fixed_mode_enumerates_closure() {
    let config = SearchConfig::default().with_mode(SchedulingMode::Fixed);
    let search = AmplitudeSearch::uniform(5, Predicate::from_fn(|x| x == 19), config).unwrap();
    assert_eq!(search.plan(), IterationPlan::Fixed { rounds: 4 });

    let result = search.run(&mut StateVectorBackend::with_seed(5)).unwrap();
    assert!(result.success);
    assert_eq!(result.decoded_state, Some(19));
}

// ---------------------------------------------------------------------------
// Adaptive mode
// ---------------------------------------------------------------------------

#[test]
fn test_adaptive_search_finds_target() {
    let config = SearchConfig::default()
        .with_mode(SchedulingMode::Adaptive)
        .with_max_attempts(12);
    let search = AmplitudeSearch::uniform(7, Predicate::single(73), config).unwrap();

    let mut backend = CountingBackend::new(99);
    let report = search.run_report(&mut backend).unwrap();

    assert!(report.result.success);
    assert_eq!(report.result.decoded_state, Some(73));
    assert!(report.result.attempts <= 7);
    assert_eq!(report.result.attempts as usize, backend.calls);
    assert_eq!(report.history.len(), backend.calls);

    // 1, 2, 4, ... and nothing after the first success
    let expected: Vec<usize> = (0..backend.calls).map(|i| 1 << i).collect();
    assert_eq!(backend.rounds_seen, expected);
    for earlier in &report.history[..report.history.len() - 1] {
        assert!(!earlier.success);
    }
    assert_eq!(report.result.rounds_used, *expected.last().unwrap() as u64);
}

#[test]
fn test_adaptive_closure_predicate() {
    let search = AmplitudeSearch::uniform(
        6,
        Predicate::from_fn(|x| x == 42),
        SearchConfig::default(),
    )
    .unwrap();
    assert!(matches!(search.plan(), IterationPlan::Adaptive { .. }));

    let result = search.run(&mut StateVectorBackend::with_seed(8)).unwrap();
    assert!(result.success);
    assert_eq!(result.decoded_state, Some(42));
}

#[test]
fn test_adaptive_linear_schedule() {
    let config = SearchConfig::default()
        .with_mode(SchedulingMode::Adaptive)
        .with_schedule(Schedule::Linear { start: 1, step: 1 })
        .with_max_attempts(10);
    let search = AmplitudeSearch::uniform(5, Predicate::single(7), config).unwrap();

    let mut backend = CountingBackend::new(4);
    let result = search.run(&mut backend).unwrap();
    assert!(result.success);
    let expected: Vec<usize> = (1..=backend.calls).collect();
    assert_eq!(backend.rounds_seen, expected);
}

#[test]
fn test_adaptive_respects_attempt_limit() {
    // One or two rounds over 2^7 states stay far below a 0.99 threshold.
    let config = SearchConfig::default()
        .with_mode(SchedulingMode::Adaptive)
        .with_schedule(Schedule::Linear { start: 1, step: 1 })
        .with_max_attempts(2)
        .with_success(SuccessPolicy::Threshold {
            min_probability: 0.99,
        });
    let search = AmplitudeSearch::uniform(7, Predicate::single(12), config).unwrap();

    let mut backend = CountingBackend::new(1);
    let result = search.run(&mut backend).unwrap();
    assert!(!result.success);
    assert_eq!(result.attempts, 2);
    assert_eq!(result.rounds_used, 2);
    assert_eq!(backend.calls, 2);
}

#[test]
fn test_adaptive_stops_at_round_cap() {
    // Doubling with 64 attempts would reach 2^63 rounds; 2^3 states cap at 6.
    let config = SearchConfig::default()
        .with_mode(SchedulingMode::Adaptive)
        .with_max_attempts(64)
        .with_success(SuccessPolicy::Threshold {
            min_probability: 0.999,
        });
    let search = AmplitudeSearch::uniform(3, Predicate::single(5), config).unwrap();
    assert_eq!(max_useful_rounds(search.space()), 6);

    let mut backend = CountingBackend::new(3);
    let report = search.run_report(&mut backend).unwrap();
    assert!(!report.result.success);
    assert_eq!(report.result.attempts, 3);
    assert_eq!(report.result.rounds_used, 4);
    assert_eq!(backend.rounds_seen, vec![1, 2, 4]);
    assert_eq!(report.history.len(), 3);
}

#[test]
fn test_linear_start_beyond_cap_runs_nothing() {
    let config = SearchConfig::default()
        .with_mode(SchedulingMode::Adaptive)
        .with_schedule(Schedule::Linear { start: 1000, step: 1 });
    let search = AmplitudeSearch::uniform(4, Predicate::single(9), config).unwrap();

    let mut backend = CountingBackend::new(0);
    let report = search.run_report(&mut backend).unwrap();
    assert!(!report.result.success);
    assert_eq!(report.result.attempts, 0);
    assert!(report.outcome.is_none());
    assert_eq!(backend.calls, 0);
}

#[test]
fn test_predicate_matching_nothing_fails_without_executing() {
    let search = AmplitudeSearch::uniform(
        4,
        Predicate::from_fn(|_| false),
        SearchConfig::default().with_mode(SchedulingMode::Adaptive),
    )
    .unwrap();

    let mut backend = CountingBackend::new(0);
    let result = search.run(&mut backend).unwrap();
    assert!(!result.success);
    assert_eq!(result.decoded_state, None);
    assert_eq!(result.attempts, 0);
    assert_eq!(backend.calls, 0);
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

#[test]
fn test_unmatched_decoded_state_is_not_success() {
    // Zero rounds leaves the distribution uniform: whatever wins the
    // histogram is almost never the target, and never above 0.5.
    let space = SearchSpace::new(5, BitOrder::MsbFirst).unwrap();
    let predicate = Predicate::single(3);
    let oracle = build_oracle(&space, &predicate).unwrap();
    let round = compose_round(
        oracle.operator().clone(),
        build_reflection(&space, &Reference::Uniform),
    );
    let prep = Reference::Uniform.preparation(&space);
    let execution = Execution {
        space: &space,
        predicate: &predicate,
        preparation: &prep,
        round: &round,
        shots: 512,
        policy: SuccessPolicy::default(),
        noise: None,
    };
    let result = run_and_verify(&mut StateVectorBackend::with_seed(6), &execution, 0).unwrap();
    assert!(!result.success);
    assert!(result.empirical_probability < 0.5);
    assert_eq!(result.rounds_used, 0);
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn test_empty_marked_set_is_rejected_before_execution() {
    let err = AmplitudeSearch::uniform(
        4,
        Predicate::from_states(Vec::<State>::new()),
        SearchConfig::default(),
    )
    .unwrap_err();
    assert_eq!(err, SearchError::EmptyMarkedSet);
    assert!(err.is_configuration());

    let mut backend = CountingBackend::new(0);
    let outcome = search(
        4,
        Predicate::from_states(Vec::<State>::new()),
        SearchConfig::default(),
        &mut backend,
    );
    assert!(outcome.is_err());
    assert_eq!(backend.calls, 0);
}

#[test]
fn test_configuration_errors() {
    assert!(matches!(
        AmplitudeSearch::uniform(0, Predicate::single(0), SearchConfig::default()),
        Err(SearchError::InvalidWidth { width: 0, .. })
    ));
    assert!(matches!(
        AmplitudeSearch::uniform(3, Predicate::single(8), SearchConfig::default()),
        Err(SearchError::StateOutOfRange { state: 8, size: 8 })
    ));
    assert!(matches!(
        AmplitudeSearch::uniform(3, Predicate::single(1), SearchConfig::default().with_shots(0)),
        Err(SearchError::InvalidShots)
    ));
    assert!(matches!(
        AmplitudeSearch::uniform(
            3,
            Predicate::single(1),
            SearchConfig::default().with_success(SuccessPolicy::Threshold {
                min_probability: 1.5
            })
        ),
        Err(SearchError::InvalidThreshold(_))
    ));
}

#[test]
fn test_zero_shot_execution_is_rejected() {
    let search = AmplitudeSearch::uniform(3, Predicate::single(2), SearchConfig::default()).unwrap();
    let execution = Execution {
        space: search.space(),
        predicate: search.predicate(),
        preparation: search.preparation(),
        round: search.round(),
        shots: 0,
        policy: SuccessPolicy::default(),
        noise: None,
    };

    let mut backend = CountingBackend::new(0);
    assert_eq!(
        run_and_verify(&mut backend, &execution, 2),
        Err(SearchError::InvalidShots)
    );
    assert_eq!(backend.calls, 0);
}

#[test]
fn test_backend_failure_propagates() {
    let search = AmplitudeSearch::uniform(3, Predicate::single(2), SearchConfig::default()).unwrap();
    let err = search.run(&mut BrokenBackend).unwrap_err();
    assert!(matches!(err, SearchError::Backend(QuantumError::CircuitError(_))));
    assert!(!err.is_configuration());
}

// ---------------------------------------------------------------------------
// Noise
// ---------------------------------------------------------------------------

#[test]
fn test_noisy_search_returns_full_histogram() {
    let config = SearchConfig::default()
        .with_shots(200)
        .with_noise(NoiseProfile::depolarizing(0.02, 0.03));
    let search = AmplitudeSearch::uniform(3, Predicate::single(5), config).unwrap();

    let report = search.run_report(&mut StateVectorBackend::with_seed(12)).unwrap();
    let outcome = report.outcome.unwrap();
    assert_eq!(outcome.shots(), 200);
    assert_eq!(outcome.counts().values().sum::<u64>(), 200);
    assert!(outcome.counts().keys().all(|&s| s < 8));
}

#[test]
fn test_dyn_backend_is_accepted() {
    let search = AmplitudeSearch::uniform(3, Predicate::single(4), SearchConfig::default()).unwrap();
    let mut inner = StateVectorBackend::with_seed(30);
    let backend: &mut dyn SimulationBackend = &mut inner;
    let result = search.run(backend).unwrap();
    assert!(result.success);
}
