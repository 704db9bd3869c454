//! Iteration scheduling: how many amplification rounds to apply
//!
//! With `m` marked states out of `N`, the success probability after `k`
//! rounds is `sin²((2k+1)θ)` with `sin θ = sqrt(m/N)`. It peaks near
//! `k = (π/4)·sqrt(N/m)` and falls again afterwards, so more rounds are not
//! always better. When `m` is known the fixed count is used; otherwise the
//! adaptive plan walks an increasing schedule and stops at the first
//! verified success.

use std::f64::consts::FRAC_PI_4;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};
use crate::space::SearchSpace;

/// Strictly increasing sequence of round counts for adaptive search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Schedule {
    /// `2^attempt`: 1, 2, 4, 8, ...
    #[default]
    Doubling,
    /// `start + attempt * step`.
    Linear { start: u64, step: u64 },
}

impl Schedule {
    pub fn validate(&self) -> Result<()> {
        match self {
            Schedule::Doubling => Ok(()),
            Schedule::Linear { step: 0, .. } => Err(SearchError::InvalidSchedule(
                "linear step must be at least 1".into(),
            )),
            Schedule::Linear { .. } => Ok(()),
        }
    }

    /// Round count for a given attempt, or `None` once it would overflow.
    pub fn rounds_at(&self, attempt: u32) -> Option<u64> {
        match *self {
            Schedule::Doubling => 1u64.checked_shl(attempt),
            Schedule::Linear { start, step } => step
                .checked_mul(u64::from(attempt))
                .and_then(|offset| start.checked_add(offset)),
        }
    }

    /// Lazy iterator over the schedule, attempt 0 first.
    pub fn rounds(&self) -> Rounds {
        Rounds {
            schedule: *self,
            attempt: 0,
        }
    }
}

/// Iterator returned by [`Schedule::rounds`].
#[derive(Debug, Clone)]
pub struct Rounds {
    schedule: Schedule,
    attempt: u32,
}

impl Iterator for Rounds {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        let rounds = self.schedule.rounds_at(self.attempt)?;
        self.attempt = self.attempt.checked_add(1)?;
        Some(rounds)
    }
}

/// How the search picks between fixed and adaptive plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulingMode {
    /// Fixed when the marked count is known up front, adaptive otherwise.
    #[default]
    Auto,
    /// Always use the closed-form count (enumerating closures if needed).
    Fixed,
    /// Always search adaptively.
    Adaptive,
}

/// The scheduler's decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationPlan {
    /// Apply exactly `rounds` rounds, once.
    Fixed { rounds: u64 },
    /// Try `schedule` round counts, at most `max_attempts` times.
    Adaptive { schedule: Schedule, max_attempts: u32 },
}

/// `floor((π/4) · sqrt(size / max(marked_count, 1)))`.
pub fn optimal_rounds(space: &SearchSpace, marked_count: usize) -> u64 {
    let ratio = space.size() as f64 / marked_count.max(1) as f64;
    (FRAC_PI_4 * ratio.sqrt()).floor() as u64
}

/// Largest round count an adaptive attempt may use on `space`.
///
/// `sin²((2k+1)θ)` has period `π/(2θ)` in `k`, at most `(π/2)·sqrt(N)` for
/// one or more marked states. The cap covers one full period.
pub fn max_useful_rounds(space: &SearchSpace) -> u64 {
    2 * (optimal_rounds(space, 1) + 1)
}

/// Decide the plan: fixed when `marked_count` is known, adaptive otherwise.
pub fn plan_iterations(
    space: &SearchSpace,
    marked_count: Option<usize>,
    schedule: Schedule,
    max_attempts: u32,
) -> IterationPlan {
    match marked_count {
        Some(m) => IterationPlan::Fixed {
            rounds: optimal_rounds(space, m),
        },
        None => IterationPlan::Adaptive {
            schedule,
            max_attempts,
        },
    }
}

/// Probability of measuring a marked state after `rounds` rounds from the
/// uniform reference, `sin²((2k+1)·asin(sqrt(marked/size)))`.
pub fn theoretical_success_probability(rounds: u64, marked: usize, size: u64) -> f64 {
    if marked == 0 || size == 0 {
        return 0.0;
    }
    let p = (marked as f64 / size as f64).min(1.0);
    let theta = p.sqrt().asin();
    ((2 * rounds + 1) as f64 * theta).sin().powi(2)
}
