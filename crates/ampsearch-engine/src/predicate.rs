//! Membership predicates over a search space

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::error::{Result, SearchError};
use crate::space::{SearchSpace, State};

type MembershipFn = dyn Fn(State) -> bool + Send + Sync;

/// Which states are marked.
///
/// A `Set` knows its size up front, so the scheduler can compute the
/// closed-form round count. A `Closure` does not: its marked set is found by
/// enumerating the space when the oracle is built, and the scheduler treats
/// its size as unknown.
#[derive(Clone)]
pub enum Predicate {
    Set(BTreeSet<State>),
    Closure(Arc<MembershipFn>),
}

impl Predicate {
    /// Exactly one marked state.
    pub fn single(target: State) -> Self {
        Predicate::Set(BTreeSet::from([target]))
    }

    pub fn from_states(states: impl IntoIterator<Item = State>) -> Self {
        Predicate::Set(states.into_iter().collect())
    }

    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(State) -> bool + Send + Sync + 'static,
    {
        Predicate::Closure(Arc::new(f))
    }

    pub fn matches(&self, state: State) -> bool {
        match self {
            Predicate::Set(states) => states.contains(&state),
            Predicate::Closure(f) => f(state),
        }
    }

    /// Marked-set size when known without enumeration.
    pub fn known_count(&self) -> Option<usize> {
        match self {
            Predicate::Set(states) => Some(states.len()),
            Predicate::Closure(_) => None,
        }
    }

    /// Marked states in ascending order.
    pub fn marked_states(&self, space: &SearchSpace) -> Vec<State> {
        match self {
            Predicate::Set(states) => states.iter().copied().filter(|&s| space.contains(s)).collect(),
            Predicate::Closure(f) => space.states().filter(|&s| f(s)).collect(),
        }
    }

    /// Reject empty or out-of-range enumerated sets.
    ///
    /// Closures are not checked here: a closure that matches nothing is a
    /// legal input that simply cannot succeed.
    pub fn validate(&self, space: &SearchSpace) -> Result<()> {
        if let Predicate::Set(states) = self {
            if states.is_empty() {
                return Err(SearchError::EmptyMarkedSet);
            }
            if let Some(&state) = states.iter().find(|&&s| !space.contains(s)) {
                return Err(SearchError::StateOutOfRange {
                    state,
                    size: space.size(),
                });
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Set(states) => f.debug_tuple("Set").field(states).finish(),
            Predicate::Closure(_) => f.write_str("Closure(..)"),
        }
    }
}
