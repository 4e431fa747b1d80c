#![warn(missing_docs)]
//! Fetchmark Core - Benchmark Engine
//!
//! This crate provides the measurement harness for repeated fetch trials:
//! - `Target` identity for each benchmarked repository root
//! - `TrialRunner` and `ProgressSink` capability traits
//! - The sequential engine: warm-up pass, timed passes, cancellation,
//!   skip-and-record failure handling
//!
//! The core never invokes git itself. Callers supply a `TrialRunner` that
//! performs one timed fetch and a `ProgressSink` that receives progress
//! fractions and may request cancellation.

mod engine;
mod progress;
mod trial;

pub use engine::{RawResults, RunOutcome, TrialFailure, run};
pub use progress::{ChannelSink, NullSink, ProgressEvent, ProgressSink};
pub use trial::{TrialError, TrialRunner};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Default number of timed runs per root.
pub const DEFAULT_TRIAL_COUNT: u32 = 100;

/// One independently benchmarked unit: a repository root.
///
/// Identity is the root path; `name()` is the short form used for display.
/// `Ord` on the path keeps result maps deterministic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Target {
    path: PathBuf,
}

impl Target {
    /// Create a target for a repository root directory.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The root directory this target measures.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Short display name: the last path component, or the full path when
    /// there is none (e.g. the scan root itself given as ".").
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Fetch invocation strategy.
///
/// The engine is agnostic to how a trial is executed; these variants name
/// the pluggable `TrialRunner` implementations the CLI provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FetchMethod {
    /// Direct `git fetch`, output discarded.
    #[default]
    Simple,
    /// Line-oriented `git fetch --progress --verbose`, stderr streamed.
    Streaming,
    /// Simple fetch wrapped with a per-trial status notification.
    Notify,
}

impl FetchMethod {
    /// Stable lowercase name, used in reports and config files.
    pub fn as_str(self) -> &'static str {
        match self {
            FetchMethod::Simple => "simple",
            FetchMethod::Streaming => "streaming",
            FetchMethod::Notify => "notify",
        }
    }
}

impl fmt::Display for FetchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FetchMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "simple" => Ok(FetchMethod::Simple),
            "streaming" => Ok(FetchMethod::Streaming),
            "notify" => Ok(FetchMethod::Notify),
            other => Err(format!("Unknown fetch method: {}", other)),
        }
    }
}

/// Configuration for one benchmark run. Immutable once the run starts.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Number of timed runs per root (the warm-up pass is extra).
    pub trials: u32,
    /// Which trial-runner strategy the caller selected.
    pub method: FetchMethod,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIAL_COUNT,
            method: FetchMethod::default(),
        }
    }
}
