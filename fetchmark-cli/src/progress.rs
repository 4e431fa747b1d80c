//! Terminal Progress and Cancellation
//!
//! An indicatif progress bar behind the `ProgressSink` capability, plus a
//! SIGINT handler so Ctrl-C cancels the run instead of killing it: the
//! engine stops before its next trial and the partial results are still
//! aggregated and reported.

use fetchmark_core::ProgressSink;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicBool, Ordering};

/// Set by the SIGINT handler to request a graceful stop.
static CANCEL_REQUESTED: AtomicBool = AtomicBool::new(false);

/// Whether a cancellation has been requested via Ctrl-C.
pub fn cancel_requested() -> bool {
    CANCEL_REQUESTED.load(Ordering::Relaxed)
}

/// Install a SIGINT handler that sets the cancellation flag. The handler is
/// async-signal-safe (only sets an atomic).
#[cfg(unix)]
pub fn install_sigint_handler() {
    unsafe {
        let mut sa: libc::sigaction = std::mem::zeroed();
        sa.sa_sigaction = sigint_handler as *const () as usize;
        sa.sa_flags = libc::SA_RESTART;
        libc::sigemptyset(&mut sa.sa_mask);
        libc::sigaction(libc::SIGINT, &sa, std::ptr::null_mut());
    }
}

#[cfg(unix)]
extern "C" fn sigint_handler(_sig: libc::c_int) {
    CANCEL_REQUESTED.store(true, Ordering::Relaxed);
}

/// No-op on non-Unix; the run completes normally.
#[cfg(not(unix))]
pub fn install_sigint_handler() {}

/// Console progress bar sink: one bar tick per completed run index.
pub struct ConsoleSink {
    bar: ProgressBar,
    trials: u32,
}

impl ConsoleSink {
    /// Create a progress bar spanning `trials` run indices.
    pub fn new(trials: u32) -> Self {
        let bar = ProgressBar::new(trials as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Self { bar, trials }
    }

    /// Finish the bar with a closing message.
    pub fn finish(&self, cancelled: bool) {
        if cancelled {
            self.bar.abandon_with_message("Cancelled");
        } else {
            self.bar.finish_with_message("Complete");
        }
    }
}

impl ProgressSink for ConsoleSink {
    fn report(&self, fraction: f64, status: &str) {
        let position = (fraction * self.trials as f64).round() as u64;
        self.bar.set_position(position.min(self.trials as u64));
        self.bar.set_message(status.to_string());
    }

    fn cancel_requested(&self) -> bool {
        cancel_requested()
    }
}
