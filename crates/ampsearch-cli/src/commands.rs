//! Search command execution

use anyhow::{bail, Context, Result};
use tracing::info;

use ampsearch_core::backend::StateVectorBackend;
use ampsearch_engine::predicate::Predicate;
use ampsearch_engine::schedule::SchedulingMode;
use ampsearch_engine::search::AmplitudeSearch;

use crate::config::Config;
use crate::report;
use crate::SearchArgs;

/// Run one search command and return the rendered report.
pub fn execute(args: &SearchArgs, mode: SchedulingMode) -> Result<String> {
    let mut config = Config::load(args.config.as_ref())?;
    config.apply_args(args);
    config.search.mode = mode;

    let predicate = predicate_from_args(args)?;
    let search = AmplitudeSearch::uniform(args.width, predicate, config.search.clone())
        .context("Invalid search configuration")?;

    let mut backend = match config.backend.seed {
        Some(seed) => StateVectorBackend::with_seed(seed),
        None => StateVectorBackend::new(),
    };

    info!(
        space = %search.space(),
        marked = search.oracle().marked_count(),
        shots = config.search.shots,
        noisy = config.search.noise.is_some(),
        "starting search"
    );
    let outcome = search
        .run_report(&mut backend)
        .context("Search execution failed")?;

    Ok(report::render(&search, &outcome, &config.output))
}

/// Marked set from `--target` values or `--multiple-of`.
pub fn predicate_from_args(args: &SearchArgs) -> Result<Predicate> {
    match (args.targets.is_empty(), args.multiple_of) {
        (false, None) => Ok(Predicate::from_states(args.targets.iter().copied())),
        (true, Some(0)) => bail!("--multiple-of must be at least 1"),
        (true, Some(k)) => Ok(Predicate::from_fn(move |state| state % k == 0)),
        (true, None) => bail!("either --target or --multiple-of is required"),
        (false, Some(_)) => bail!("--target and --multiple-of cannot be combined"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicate_from_targets() {
        let args = SearchArgs {
            width: 4,
            targets: vec![3, 9],
            ..SearchArgs::default()
        };
        let predicate = predicate_from_args(&args).unwrap();
        assert_eq!(predicate.known_count(), Some(2));
        assert!(predicate.matches(9));
    }

    #[test]
    fn test_predicate_from_multiple() {
        let args = SearchArgs {
            width: 4,
            multiple_of: Some(5),
            ..SearchArgs::default()
        };
        let predicate = predicate_from_args(&args).unwrap();
        assert_eq!(predicate.known_count(), None);
        assert!(predicate.matches(10));
        assert!(!predicate.matches(11));
    }

    #[test]
    fn test_predicate_required() {
        let args = SearchArgs {
            width: 4,
            ..SearchArgs::default()
        };
        assert!(predicate_from_args(&args).is_err());
        let zero = SearchArgs {
            multiple_of: Some(0),
            ..args
        };
        assert!(predicate_from_args(&zero).is_err());
    }
}
