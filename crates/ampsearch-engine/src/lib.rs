//! # ampsearch-engine -- Amplitude-Amplification Search
//!
//! Finds states satisfying a membership predicate over a space of `2^n`
//! candidates in `O(sqrt(N))` oracle applications. The engine builds the
//! phase oracle and diffuser once, chooses how many amplification rounds to
//! apply, executes them on a [`SimulationBackend`](ampsearch_core::backend::SimulationBackend)
//! and verifies the sampled answer against the predicate.
//!
//! | Module | Role |
//! |--------|------|
//! | [`space`] | state values, register width, bit order |
//! | [`predicate`] | marked-set membership |
//! | [`oracle`] | phase-marking operator |
//! | [`reflection`] | diffuser about the reference state |
//! | [`round`] | oracle + diffuser unit, sequence unrolling |
//! | [`schedule`] | fixed and adaptive round counts |
//! | [`decode`] | histograms to states |
//! | [`verify`] | execute, decode, accept or reject |
//! | [`search`] | the end-to-end driver |
//!
//! ## Quick Start
//!
//! ```
//! use ampsearch_engine::prelude::*;
//!
//! let config = SearchConfig::default().with_shots(256);
//! let search = AmplitudeSearch::uniform(4, Predicate::single(11), config).unwrap();
//! let mut backend = StateVectorBackend::with_seed(42);
//! let result = search.run(&mut backend).unwrap();
//!
//! assert!(result.success);
//! assert_eq!(result.decoded_state, Some(11));
//! assert_eq!(result.rounds_used, 3);
//! ```

pub mod config;
pub mod decode;
pub mod error;
pub mod oracle;
pub mod predicate;
pub mod reflection;
pub mod round;
pub mod schedule;
pub mod search;
pub mod space;
pub mod verify;

pub use ampsearch_core;

/// Re-exports of the most commonly used items.
pub mod prelude {
    pub use crate::config::SearchConfig;
    pub use crate::decode::{decode, SampleOutcome};
    pub use crate::error::{Result, SearchError};
    pub use crate::oracle::{build_oracle, Oracle};
    pub use crate::predicate::Predicate;
    pub use crate::reflection::{build_reflection, Reference};
    pub use crate::round::{compose_round, AmplificationRound};
    pub use crate::schedule::{
        max_useful_rounds, optimal_rounds, plan_iterations, theoretical_success_probability,
        IterationPlan, Schedule, SchedulingMode,
    };
    pub use crate::search::{search, AmplitudeSearch, SearchReport};
    pub use crate::space::{BitOrder, SearchSpace, State};
    pub use crate::verify::{run_and_verify, Execution, SuccessPolicy, VerificationResult};

    pub use ampsearch_core::backend::{SimulationBackend, StateVectorBackend};
    pub use ampsearch_core::noise::{NoiseChannel, NoiseProfile};
}
