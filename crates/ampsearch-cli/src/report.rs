//! Plain-text rendering of search results

use std::fmt::{self, Write};

use ampsearch_engine::decode::SampleOutcome;
use ampsearch_engine::schedule::{theoretical_success_probability, IterationPlan, Schedule};
use ampsearch_engine::search::{AmplitudeSearch, SearchReport};
use ampsearch_engine::space::{SearchSpace, State};
use ampsearch_engine::verify::VerificationResult;

use crate::config::OutputConfig;

/// Marked states listed inline before the summary switches to a count.
const MAX_LISTED_TARGETS: usize = 8;

/// Summary block followed by the per-attempt log and, if enabled, a histogram.
pub fn render(search: &AmplitudeSearch, report: &SearchReport, output: &OutputConfig) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut out, search, report, output);
    out
}

fn write_report(
    out: &mut String,
    search: &AmplitudeSearch,
    report: &SearchReport,
    output: &OutputConfig,
) -> fmt::Result {
    let space = search.space();
    let marked = search.oracle().marked_states();
    let result = &report.result;

    writeln!(out, "search space : {}", space)?;
    if marked.len() <= MAX_LISTED_TARGETS {
        writeln!(out, "marked       : {} {:?}", marked.len(), marked)?;
    } else {
        writeln!(out, "marked       : {}", marked.len())?;
    }
    writeln!(out, "plan         : {}", describe_plan(&report.plan))?;

    if report.history.len() > 1 {
        for attempt in &report.history {
            writeln!(out, "  {}", describe_attempt(space, attempt))?;
        }
    }

    writeln!(out, "attempts     : {}", result.attempts)?;
    writeln!(out, "rounds used  : {}", result.rounds_used)?;
    match result.decoded_state {
        Some(state) => writeln!(out, "decoded      : {} ({})", space.bitstring(state), state)?,
        None => writeln!(out, "decoded      : none")?,
    }
    writeln!(out, "probability  : {:.4}", result.empirical_probability)?;
    if !marked.is_empty() && result.attempts > 0 {
        let expected =
            theoretical_success_probability(result.rounds_used, marked.len(), space.size());
        writeln!(out, "theoretical  : {:.4}", expected)?;
    }
    writeln!(
        out,
        "result       : {}",
        if result.success { "FOUND" } else { "NOT FOUND" }
    )?;

    if output.histogram {
        if let Some(outcome) = &report.outcome {
            writeln!(out)?;
            write_histogram(out, space, outcome, output.histogram_rows, output.bar_width)?;
        }
    }
    Ok(())
}

fn describe_plan(plan: &IterationPlan) -> String {
    match plan {
        IterationPlan::Fixed { rounds } => format!("fixed, {} rounds", rounds),
        IterationPlan::Adaptive {
            schedule,
            max_attempts,
        } => {
            let kind = match schedule {
                Schedule::Doubling => "doubling".to_string(),
                Schedule::Linear { start, step } => format!("linear from {} by {}", start, step),
            };
            format!("adaptive, {} schedule, up to {} attempts", kind, max_attempts)
        }
    }
}

fn describe_attempt(space: &SearchSpace, attempt: &VerificationResult) -> String {
    let decoded = attempt
        .decoded_state
        .map(|s| format!("{} ({})", space.bitstring(s), s))
        .unwrap_or_else(|| "none".to_string());
    format!(
        "attempt {:>2}: {:>5} rounds -> {} p={:.3} {}",
        attempt.attempts,
        attempt.rounds_used,
        decoded,
        attempt.empirical_probability,
        if attempt.success { "hit" } else { "miss" }
    )
}

/// Most frequent states first, ties by state value, bars scaled to the top count.
pub fn write_histogram<W: Write>(
    out: &mut W,
    space: &SearchSpace,
    outcome: &SampleOutcome,
    rows: usize,
    bar_width: usize,
) -> fmt::Result {
    let mut entries: Vec<(State, u64)> = outcome
        .counts()
        .iter()
        .map(|(&s, &c)| (s, c))
        .filter(|&(_, c)| c > 0)
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let top = entries.first().map_or(1, |&(_, c)| c.max(1));
    for &(state, count) in entries.iter().take(rows) {
        let bar = (count as f64 / top as f64 * bar_width as f64).round() as usize;
        writeln!(
            out,
            "{} {:>6} {:>7.4} {}",
            space.bitstring(state),
            count,
            outcome.probability(state),
            "#".repeat(bar)
        )?;
    }
    if entries.len() > rows {
        writeln!(out, "... {} more states", entries.len() - rows)?;
    }
    Ok(())
}
