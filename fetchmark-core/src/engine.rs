//! Benchmark Engine
//!
//! Drives the trial loop: one discarded warm-up pass, then `trials` timed
//! passes over all targets. Strictly sequential by design - one trial in
//! flight at a time keeps network and disk contention comparable across
//! runs and keeps progress reporting monotonic.
//!
//! ## Data Flow
//!
//! ```text
//! [Target] list + RunConfig
//!        │
//!        ▼
//! ┌──────────────┐   run_trial per (target, run)
//! │    engine    │──────────────────────────────▶ TrialRunner
//! │              │◀─ Duration | TrialError ──────
//! └──────┬───────┘
//!        │ fraction + status          ProgressSink (cancellation polled
//!        ▼                            before every trial)
//!    RunOutcome (raw samples, failures, cancelled flag)
//! ```

use crate::progress::ProgressSink;
use crate::trial::{TrialError, TrialRunner};
use crate::{RunConfig, Target};
use std::collections::BTreeMap;
use std::time::Duration;

/// Raw per-target duration samples, in trial order. A full run holds exactly
/// `trials` samples per target; the warm-up sample is never inserted.
pub type RawResults = BTreeMap<Target, Vec<Duration>>;

/// Record of one failed trial. `run` is the 1-based run index; 0 marks the
/// warm-up pass.
#[derive(Debug)]
pub struct TrialFailure {
    /// Target the trial ran against.
    pub target: Target,
    /// Run index (0 = warm-up).
    pub run: u32,
    /// What went wrong.
    pub error: TrialError,
}

/// Everything a run produces, complete or cancelled.
#[derive(Debug)]
pub struct RunOutcome {
    /// Collected duration samples per target.
    pub raw: RawResults,
    /// Trials skipped under the skip-and-record policy.
    pub failures: Vec<TrialFailure>,
    /// Highest run index that finished for all targets.
    pub completed_runs: u32,
    /// Whether the run stopped early on a cancellation request.
    pub cancelled: bool,
}

impl RunOutcome {
    /// Total number of samples across all targets.
    pub fn sample_count(&self) -> usize {
        self.raw.values().map(Vec::len).sum()
    }
}

/// Run the benchmark: warm-up pass, then `config.trials` timed passes.
///
/// Targets are visited in list order within each run, and run `k + 1` never
/// starts before run `k` has finished for all targets. A failed trial is
/// recorded and skipped; it never aborts measurement of other targets. The
/// sink's cancellation flag is polled before every trial, and a cancelled
/// run returns whatever was collected so far.
pub fn run(
    targets: &[Target],
    config: &RunConfig,
    runner: &dyn TrialRunner,
    progress: &dyn ProgressSink,
) -> RunOutcome {
    let mut raw: RawResults = targets
        .iter()
        .map(|t| (t.clone(), Vec::with_capacity(config.trials as usize)))
        .collect();
    let mut failures = Vec::new();
    let mut completed_runs = 0;
    let mut cancelled = false;

    if targets.is_empty() {
        return RunOutcome {
            raw,
            failures,
            completed_runs,
            cancelled,
        };
    }

    // Warm-up: one discarded fetch per target, so connection setup and cold
    // caches never skew the measured population.
    progress.report(0.0, "First cold fetch...");
    for target in targets {
        if progress.cancel_requested() {
            cancelled = true;
            break;
        }
        if let Err(error) = runner.run_trial(target) {
            failures.push(TrialFailure {
                target: target.clone(),
                run: 0,
                error,
            });
        }
    }

    if !cancelled {
        'runs: for run in 1..=config.trials {
            let before = (run - 1) as f64 / config.trials as f64;
            for target in targets {
                if progress.cancel_requested() {
                    cancelled = true;
                    break 'runs;
                }
                progress.report(before, &format!("Fetching #{} in {}...", run, target.name()));
                match runner.run_trial(target) {
                    Ok(elapsed) => {
                        // Entry exists for every configured target.
                        if let Some(samples) = raw.get_mut(target) {
                            samples.push(elapsed);
                        }
                    }
                    Err(error) => failures.push(TrialFailure {
                        target: target.clone(),
                        run,
                        error,
                    }),
                }
            }
            completed_runs = run;
            progress.report(
                run as f64 / config.trials as f64,
                &format!("Completed run {}/{}", run, config.trials),
            );
        }
    }

    RunOutcome {
        raw,
        failures,
        completed_runs,
        cancelled,
    }
}
