//! Symmetric Trimmed Mean
//!
//! Sorts the samples, drops `max(2, n / 10)` values from each end, and
//! averages the remainder in whole milliseconds. When trimming would leave
//! nothing, the trim count is clamped so at least one sample survives.

use crate::{MIN_TRIM, TRIM_DIVISOR};
use std::time::Duration;
use thiserror::Error;

/// Aggregation failure. Local to one target; other targets' results are
/// unaffected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AggregateError {
    /// Aggregation was attempted on zero samples.
    #[error("cannot aggregate an empty sample set")]
    EmptySamples,
}

/// Compute the trimmed mean of duration samples, truncated to whole
/// milliseconds.
///
/// The result always lies within `[min, max]` of the input and is invariant
/// under permutation. Any non-empty input succeeds; only `n == 0` fails.
pub fn trimmed_mean(samples: &[Duration]) -> Result<Duration, AggregateError> {
    if samples.is_empty() {
        return Err(AggregateError::EmptySamples);
    }

    let mut millis: Vec<u64> = samples.iter().map(|d| d.as_millis() as u64).collect();
    millis.sort_unstable();

    let n = millis.len();
    let mut trim = (n / TRIM_DIVISOR).max(MIN_TRIM);
    if 2 * trim >= n {
        // Clamp so at least one sample survives.
        trim = (n - 1) / 2;
    }

    let kept = &millis[trim..n - trim];
    let sum: u64 = kept.iter().sum();
    Ok(Duration::from_millis(sum / kept.len() as u64))
}
