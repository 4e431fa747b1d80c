//! Report Data Structures

use chrono::{DateTime, Utc};
use fetchmark_core::{RunConfig, RunOutcome};
use fetchmark_stats::trimmed_mean;
use serde::{Deserialize, Serialize};

/// Complete benchmark report for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Run metadata.
    pub meta: ReportMeta,
    /// Per-root aggregated results, in deterministic root order.
    pub roots: Vec<RootResult>,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    /// Fetchmark version that produced the report.
    pub version: String,
    /// UTC time the report was generated.
    pub timestamp: DateTime<Utc>,
    /// Commit of the repository fetchmark was run from, if available.
    pub git_commit: Option<String>,
    /// Configured number of timed runs per root.
    pub trials: u32,
    /// Invocation method name ("simple", "streaming", "notify").
    pub method: String,
    /// Highest run index that finished for all roots.
    pub completed_runs: u32,
    /// Trials skipped because the fetch failed.
    pub skipped_trials: usize,
    /// Whether the run was cancelled before completing.
    pub cancelled: bool,
}

/// Aggregated result for a single root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResult {
    /// Short display name (last path component).
    pub name: String,
    /// Full root path.
    pub path: String,
    /// Number of raw samples collected.
    pub samples: usize,
    /// Trimmed-mean fetch time in whole milliseconds, if aggregation
    /// succeeded for this root.
    pub average_ms: Option<u64>,
    /// Aggregation error for this root only; other roots are unaffected.
    pub error: Option<String>,
}

/// Build a report from a run outcome. Aggregation runs per root; an empty
/// sample set fails only that root's line.
pub fn build_report(outcome: &RunOutcome, config: &RunConfig) -> Report {
    let roots = outcome
        .raw
        .iter()
        .map(|(target, samples)| {
            let (average_ms, error) = match trimmed_mean(samples) {
                Ok(mean) => (Some(mean.as_millis() as u64), None),
                Err(e) => (None, Some(e.to_string())),
            };
            RootResult {
                name: target.name(),
                path: target.to_string(),
                samples: samples.len(),
                average_ms,
                error,
            }
        })
        .collect();

    Report {
        meta: ReportMeta {
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
            git_commit: current_git_commit(),
            trials: config.trials,
            method: config.method.to_string(),
            completed_runs: outcome.completed_runs,
            skipped_trials: outcome.failures.len(),
            cancelled: outcome.cancelled,
        },
        roots,
    }
}

/// Commit hash of the surrounding repository, if git is available.
fn current_git_commit() -> Option<String> {
    std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
}
