//! Progress Sink Capability
//!
//! The progress channel is the only concurrent interaction with a running
//! benchmark: a control thread may observe progress and request cancellation
//! while the engine's trial loop runs elsewhere. Raw results are only ever
//! touched by the engine itself, so no locking is needed beyond the atomic
//! cancellation flag.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, Sender, channel};

/// Receives progress fractions and may request cancellation.
///
/// `report` is called with a fraction in `[0.0, 1.0]` and a status string;
/// `cancel_requested` is polled by the engine before every trial.
pub trait ProgressSink {
    /// Report progress. `fraction` counts completed run indices.
    fn report(&self, fraction: f64, status: &str);

    /// Whether the caller has asked the engine to stop launching trials.
    fn cancel_requested(&self) -> bool {
        false
    }
}

/// Sink that discards all progress. Useful for tests and non-interactive use.
pub struct NullSink;

impl ProgressSink for NullSink {
    fn report(&self, _fraction: f64, _status: &str) {}
}

/// A progress update emitted by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressEvent {
    /// Fraction of completed run indices in `[0.0, 1.0]`.
    pub fraction: f64,
    /// Human-readable status, e.g. which root is being fetched.
    pub status: String,
}

/// Channel-backed sink: progress events flow to a receiver on another
/// thread, cancellation flows back through a shared atomic flag.
pub struct ChannelSink {
    tx: Sender<ProgressEvent>,
    cancelled: Arc<AtomicBool>,
}

impl ChannelSink {
    /// Create a sink plus the receiver and cancellation handle for the
    /// controlling side. Setting the flag to `true` stops the engine before
    /// its next trial.
    pub fn new() -> (Self, Receiver<ProgressEvent>, Arc<AtomicBool>) {
        let (tx, rx) = channel();
        let cancelled = Arc::new(AtomicBool::new(false));
        let sink = Self {
            tx,
            cancelled: Arc::clone(&cancelled),
        };
        (sink, rx, cancelled)
    }
}

impl ProgressSink for ChannelSink {
    fn report(&self, fraction: f64, status: &str) {
        // A dropped receiver means nobody is watching; not an error.
        let _ = self.tx.send(ProgressEvent {
            fraction,
            status: status.to_string(),
        });
    }

    fn cancel_requested(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}
