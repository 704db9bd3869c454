//! Result decoding: raw register histograms to domain states

use std::collections::BTreeMap;

use ampsearch_core::simulator::ShotResult;

use crate::space::{SearchSpace, State};

/// Observed counts per state for one backend execution.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SampleOutcome {
    counts: BTreeMap<State, u64>,
    shots: u64,
}

impl SampleOutcome {
    /// Build from explicit counts; `shots` is their sum.
    pub fn new(counts: BTreeMap<State, u64>) -> Self {
        let shots = counts.values().sum();
        Self { counts, shots }
    }

    /// Translate a backend histogram (keyed by per-position bits) into states
    /// using the space's bit order.
    pub fn from_shots(space: &SearchSpace, result: &ShotResult) -> Self {
        let mut counts = BTreeMap::new();
        for (bits, &count) in &result.counts {
            *counts.entry(space.state_from_positions(bits)).or_insert(0) += count as u64;
        }
        Self::new(counts)
    }

    pub fn counts(&self) -> &BTreeMap<State, u64> {
        &self.counts
    }

    pub fn shots(&self) -> u64 {
        self.shots
    }

    pub fn frequency(&self, state: State) -> u64 {
        self.counts.get(&state).copied().unwrap_or(0)
    }

    /// Observed frequency divided by total shots.
    pub fn probability(&self, state: State) -> f64 {
        if self.shots == 0 {
            return 0.0;
        }
        self.frequency(state) as f64 / self.shots as f64
    }

    pub fn is_empty(&self) -> bool {
        self.shots == 0
    }
}

/// Most frequent state and its empirical probability.
///
/// Ties go to the lowest state value. Returns `None` for an empty outcome.
pub fn decode(outcome: &SampleOutcome) -> Option<(State, f64)> {
    let mut best: Option<(State, u64)> = None;
    // BTreeMap iterates in ascending state order; only a strictly larger
    // count replaces the incumbent.
    for (&state, &count) in outcome.counts() {
        match best {
            Some((_, c)) if count <= c => {}
            _ => best = Some((state, count)),
        }
    }
    best.filter(|&(_, c)| c > 0)
        .map(|(state, _)| (state, outcome.probability(state)))
}
