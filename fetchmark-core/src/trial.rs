//! Trial Runner Capability
//!
//! One trial = one timed fetch against one target. The engine consumes this
//! interface and places no constraint on the implementation beyond returning
//! a monotonic, non-negative duration.

use crate::{FetchMethod, Target};
use std::time::Duration;
use thiserror::Error;

/// Failure of a single trial. Local to one (target, run) pair; the engine
/// records it and continues with the other targets.
#[derive(Debug, Error)]
pub enum TrialError {
    /// The fetch command could not be launched.
    #[error("failed to launch fetch command: {0}")]
    Spawn(#[from] std::io::Error),
    /// Reading the fetch command's output failed mid-stream.
    #[error("failed to read fetch output: {0}")]
    Io(std::io::Error),
    /// The fetch command exited with a non-zero status.
    #[error("fetch exited with status {code}: {stderr}")]
    Exit {
        /// Process exit code.
        code: i32,
        /// Trailing stderr output, trimmed.
        stderr: String,
    },
    /// The fetch command was killed by a signal before exiting.
    #[error("fetch terminated by signal")]
    Terminated,
}

/// Executes one timed trial for one target.
pub trait TrialRunner {
    /// Run a single fetch against `target`, returning its wall-clock duration.
    fn run_trial(&self, target: &Target) -> Result<Duration, TrialError>;

    /// Which invocation strategy this runner implements.
    fn method(&self) -> FetchMethod;
}
