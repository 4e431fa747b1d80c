#![warn(missing_docs)]
//! Fetchmark Statistical Engine
//!
//! Provides the per-target aggregation for fetch duration samples: a
//! symmetric trimmed mean that suppresses both transient slow trials (a
//! paused scheduler tick, a network blip) and freak fast ones (a result
//! served from a warm OS cache) without requiring a distribution model.

mod trimmed;

pub use trimmed::{AggregateError, trimmed_mean};

/// Minimum number of extreme values dropped from each end of the sorted
/// samples, guarding small runs against a single dominating outlier.
pub const MIN_TRIM: usize = 2;

/// Divisor for the percentile trim band: one tenth of the samples are
/// dropped from each end for large runs.
pub const TRIM_DIVISOR: usize = 10;
