//! Configuration management for the ampsearch CLI

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use ampsearch_engine::config::SearchConfig;
use ampsearch_engine::schedule::Schedule;
use ampsearch_engine::verify::SuccessPolicy;
use ampsearch_core::noise::NoiseProfile;

use crate::SearchArgs;

/// ampsearch CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Engine tunables
    #[serde(default)]
    pub search: SearchConfig,

    /// Backend options
    #[serde(default)]
    pub backend: BackendConfig,

    /// Output options
    #[serde(default)]
    pub output: OutputConfig,
}

/// Backend configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Sampling seed; entropy-seeded when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Print a histogram after the summary
    #[serde(default)]
    pub histogram: bool,

    /// Most frequent states shown in the histogram
    #[serde(default = "default_histogram_rows")]
    pub histogram_rows: usize,

    /// Width of the longest histogram bar, in characters
    #[serde(default = "default_bar_width")]
    pub bar_width: usize,
}

fn default_histogram_rows() -> usize {
    16
}

fn default_bar_width() -> usize {
    40
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            histogram: false,
            histogram_rows: default_histogram_rows(),
            bar_width: default_bar_width(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Load configuration with precedence: CLI args > config file > defaults
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        match config_path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Override file values with whatever was given on the command line.
    pub fn apply_args(&mut self, args: &SearchArgs) {
        let search = &mut self.search;
        if let Some(shots) = args.shots {
            search.shots = shots;
        }
        if let Some(order) = args.bit_order {
            search.bit_order = order.into();
        }
        if let Some(min_probability) = args.threshold {
            search.success = SuccessPolicy::Threshold { min_probability };
        }
        if args.most_frequent {
            search.success = SuccessPolicy::MostFrequent;
        }
        if let Some(max_attempts) = args.max_attempts {
            search.max_attempts = max_attempts;
        }
        if let Some(step) = args.linear_step {
            search.schedule = Schedule::Linear { start: 1, step };
        }
        if args.noisy && search.noise.is_none() {
            search.noise = Some(NoiseProfile::depolarizing(0.02, 0.03));
        }
        if args.seed.is_some() {
            self.backend.seed = args.seed;
        }
        if args.histogram {
            self.output.histogram = true;
        }
    }
}
