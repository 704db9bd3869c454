//! ampsearch CLI
//!
//! Command-line driver for the amplitude-amplification engine.
//!
//! # Usage
//!
//! ```bash
//! # Known marked set: closed-form round count, one execution
//! ampsearch fixed --width 7 --target 85
//!
//! # Unknown marked count: doubling schedule, stop at the first success
//! ampsearch adaptive --width 7 --multiple-of 19 --histogram
//!
//! # Gate noise and a config file
//! ampsearch adaptive --width 7 --target 73 --noisy --config ampsearch.toml
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use ampsearch_engine::space::BitOrder;

pub mod commands;
pub mod config;
pub mod report;

/// Amplitude-amplification search over 2^n candidate states
#[derive(Parser, Debug)]
#[command(name = "ampsearch")]
#[command(author, version, about = "Amplitude-amplification (Grover) search on a state-vector simulator")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply the closed-form optimal round count once
    Fixed(SearchArgs),

    /// Try increasing round counts until a verified success
    Adaptive(SearchArgs),

    /// Display version information
    Version,
}

/// Arguments shared by both search commands
#[derive(Args, Debug, Clone, Default)]
pub struct SearchArgs {
    /// Number of register positions; the space holds 2^width states
    #[arg(short, long)]
    pub width: u32,

    /// Marked state (repeatable)
    #[arg(short, long = "target", value_name = "STATE")]
    pub targets: Vec<u64>,

    /// Mark every state divisible by K instead of listing targets
    #[arg(long, value_name = "K", conflicts_with = "targets")]
    pub multiple_of: Option<u64>,

    /// Samples per execution
    #[arg(short, long)]
    pub shots: Option<u32>,

    /// Which end of a state value lands on register position 0
    #[arg(long, value_enum)]
    pub bit_order: Option<BitOrderArg>,

    /// Accept a decoded state only above this empirical probability
    #[arg(long, conflicts_with = "most_frequent")]
    pub threshold: Option<f64>,

    /// Accept the most frequent state whenever it is marked
    #[arg(long)]
    pub most_frequent: bool,

    /// Adaptive attempt limit
    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// Use a linear schedule 1, 1+S, 1+2S, ... instead of doubling
    #[arg(long, value_name = "S")]
    pub linear_step: Option<u64>,

    /// Seed for reproducible sampling
    #[arg(long)]
    pub seed: Option<u64>,

    /// Apply the depolarizing preset (0.02 single-qubit, 0.03 multi-qubit)
    #[arg(long)]
    pub noisy: bool,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print a text histogram of the last execution
    #[arg(long)]
    pub histogram: bool,
}

/// Bit order argument enum for CLI
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BitOrderArg {
    Msb,
    Lsb,
}

impl From<BitOrderArg> for BitOrder {
    fn from(val: BitOrderArg) -> Self {
        match val {
            BitOrderArg::Msb => BitOrder::MsbFirst,
            BitOrderArg::Lsb => BitOrder::LsbFirst,
        }
    }
}
