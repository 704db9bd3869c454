//! Search configuration

use ampsearch_core::noise::NoiseProfile;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};
use crate::schedule::{Schedule, SchedulingMode};
use crate::space::BitOrder;
use crate::verify::SuccessPolicy;

/// Tunables for one search run.
///
/// Deserializes from a table where every field is optional, e.g.
///
/// ```toml
/// shots = 2048
/// bit_order = "lsb_first"
/// mode = "adaptive"
/// max_attempts = 8
/// success = { policy = "threshold", min_probability = 0.6 }
/// schedule = { kind = "linear", start = 1, step = 2 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Samples drawn per backend execution
    #[serde(default = "default_shots")]
    pub shots: u32,

    /// Mapping between state values and register positions
    #[serde(default)]
    pub bit_order: BitOrder,

    /// When a decoded sample counts as a success
    #[serde(default)]
    pub success: SuccessPolicy,

    /// Fixed vs adaptive selection
    #[serde(default)]
    pub mode: SchedulingMode,

    /// Round counts tried by adaptive search
    #[serde(default)]
    pub schedule: Schedule,

    /// Upper bound on adaptive executions
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Gate noise forwarded to the backend
    #[serde(default)]
    pub noise: Option<NoiseProfile>,
}

fn default_shots() -> u32 {
    1024
}

fn default_max_attempts() -> u32 {
    12
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            shots: default_shots(),
            bit_order: BitOrder::default(),
            success: SuccessPolicy::default(),
            mode: SchedulingMode::default(),
            schedule: Schedule::default(),
            max_attempts: default_max_attempts(),
            noise: None,
        }
    }
}

impl SearchConfig {
    pub fn with_shots(mut self, shots: u32) -> Self {
        self.shots = shots;
        self
    }

    pub fn with_bit_order(mut self, bit_order: BitOrder) -> Self {
        self.bit_order = bit_order;
        self
    }

    pub fn with_success(mut self, success: SuccessPolicy) -> Self {
        self.success = success;
        self
    }

    pub fn with_mode(mut self, mode: SchedulingMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_noise(mut self, noise: NoiseProfile) -> Self {
        self.noise = Some(noise);
        self
    }

    /// Reject values that would make a run meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.shots == 0 {
            return Err(SearchError::InvalidShots);
        }
        if self.max_attempts == 0 {
            return Err(SearchError::InvalidMaxAttempts);
        }
        self.success.validate()?;
        self.schedule.validate()?;
        if let Some(noise) = &self.noise {
            noise
                .validate()
                .map_err(|e| SearchError::InvalidNoise(e.to_string()))?;
        }
        Ok(())
    }
}
