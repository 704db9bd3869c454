//! Error types for the amplification engine

use ampsearch_core::error::QuantumError;
use thiserror::Error;

use crate::space::State;

/// Errors returned by search construction and execution.
///
/// Every variant except [`SearchError::Backend`] is a configuration error,
/// raised before the backend is called.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error("search space width must be in 1..={maximum}, got {width}")]
    InvalidWidth { width: u32, maximum: u32 },

    #[error("marked set is empty: nothing can be amplified")]
    EmptyMarkedSet,

    #[error("marked state {state} is outside the search space of size {size}")]
    StateOutOfRange { state: State, size: u64 },

    #[error("shot count must be positive")]
    InvalidShots,

    #[error("success threshold must lie in [0, 1), got {0}")]
    InvalidThreshold(f64),

    #[error("max_attempts must be positive")]
    InvalidMaxAttempts,

    #[error("invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("reference preparation spans {actual} positions, search space has {expected}")]
    ReferenceWidthMismatch { expected: u32, actual: u32 },

    #[error("invalid noise profile: {0}")]
    InvalidNoise(String),

    #[error("backend execution failed: {0}")]
    Backend(#[from] QuantumError),
}

impl SearchError {
    /// True for input errors detected before any backend call.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, SearchError::Backend(_))
    }
}

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, SearchError>;
