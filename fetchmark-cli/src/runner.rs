//! Fetch Trial Runners
//!
//! Concrete `TrialRunner` strategies behind the `FetchMethod` selection:
//!
//! - `SimpleFetchRunner`: one `git fetch`, output discarded
//! - `StreamingFetchRunner`: `git fetch --progress --verbose` with stderr
//!   consumed line by line while the command runs
//! - `NotifyFetchRunner`: a simple fetch wrapped with a per-trial status
//!   notification through the log
//!
//! Each trial bounds its own duration only by git's own behavior; the
//! engine places no timeout on individual trials.

use fetchmark_core::{FetchMethod, Target, TrialError, TrialRunner};
use std::io::{BufRead, BufReader};
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

/// Build the runner for the selected invocation method.
pub fn make_runner(method: FetchMethod) -> Box<dyn TrialRunner> {
    match method {
        FetchMethod::Simple => Box::new(SimpleFetchRunner),
        FetchMethod::Streaming => Box::new(StreamingFetchRunner),
        FetchMethod::Notify => Box::new(NotifyFetchRunner::default()),
    }
}

fn exit_error(status: std::process::ExitStatus, stderr: &[u8]) -> TrialError {
    match status.code() {
        Some(code) => TrialError::Exit {
            code,
            stderr: String::from_utf8_lossy(stderr).trim().to_string(),
        },
        None => TrialError::Terminated,
    }
}

/// Direct `git fetch`; stdout and stderr are captured and discarded unless
/// the command fails.
#[derive(Default)]
pub struct SimpleFetchRunner;

impl TrialRunner for SimpleFetchRunner {
    fn run_trial(&self, target: &Target) -> Result<Duration, TrialError> {
        let start = Instant::now();
        let output = Command::new("git")
            .arg("fetch")
            .current_dir(target.path())
            .stdin(Stdio::null())
            .output()?;
        let elapsed = start.elapsed();

        if !output.status.success() {
            return Err(exit_error(output.status, &output.stderr));
        }
        Ok(elapsed)
    }

    fn method(&self) -> FetchMethod {
        FetchMethod::Simple
    }
}

/// Drain a stderr stream line by line, returning the last line seen.
fn drain_lines<R: BufRead>(reader: R, name: &str) -> std::io::Result<String> {
    let mut tail = String::new();
    for line in reader.lines() {
        let line = line?;
        tracing::trace!(root = %name, "{}", line);
        tail = line;
    }
    Ok(tail)
}

/// Reap a fetch whose output stream failed, so it cannot keep running
/// alongside the next trial.
fn abort_stream(child: &mut Child, err: std::io::Error) -> TrialError {
    let _ = child.kill();
    let _ = child.wait();
    TrialError::Io(err)
}

/// Line-oriented `git fetch --progress --verbose`: stderr is drained while
/// the command runs, so slow remotes report progress through the trace log.
pub struct StreamingFetchRunner;

impl TrialRunner for StreamingFetchRunner {
    fn run_trial(&self, target: &Target) -> Result<Duration, TrialError> {
        let start = Instant::now();
        let mut child = Command::new("git")
            .args(["fetch", "--progress", "--verbose"])
            .current_dir(target.path())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()?;

        let mut tail = String::new();
        if let Some(stderr) = child.stderr.take() {
            match drain_lines(BufReader::new(stderr), &target.name()) {
                Ok(last) => tail = last,
                Err(err) => return Err(abort_stream(&mut child, err)),
            }
        }

        let status = child.wait()?;
        let elapsed = start.elapsed();

        if !status.success() {
            return Err(exit_error(status, tail.as_bytes()));
        }
        Ok(elapsed)
    }

    fn method(&self) -> FetchMethod {
        FetchMethod::Streaming
    }
}

/// Higher-level fetch-and-notify: delegates to the simple runner and emits
/// a per-trial status through the log.
#[derive(Default)]
pub struct NotifyFetchRunner {
    inner: SimpleFetchRunner,
}

impl TrialRunner for NotifyFetchRunner {
    fn run_trial(&self, target: &Target) -> Result<Duration, TrialError> {
        match self.inner.run_trial(target) {
            Ok(elapsed) => {
                tracing::info!(
                    root = %target.name(),
                    ms = elapsed.as_millis() as u64,
                    "fetch completed"
                );
                Ok(elapsed)
            }
            Err(error) => {
                tracing::warn!(root = %target.name(), %error, "fetch failed");
                Err(error)
            }
        }
    }

    fn method(&self) -> FetchMethod {
        FetchMethod::Notify
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_runner_reports_its_method() {
        for method in [
            FetchMethod::Simple,
            FetchMethod::Streaming,
            FetchMethod::Notify,
        ] {
            assert_eq!(make_runner(method).method(), method);
        }
    }

    #[test]
    fn test_drain_lines_keeps_the_last_line() {
        let tail = drain_lines("remote: counting\nremote: done\n".as_bytes(), "repo").unwrap();
        assert_eq!(tail, "remote: done");
    }

    #[test]
    fn test_drain_lines_propagates_read_failures() {
        struct BrokenAfterOneLine {
            served: bool,
        }

        impl std::io::Read for BrokenAfterOneLine {
            fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
                if self.served {
                    return Err(std::io::Error::new(
                        std::io::ErrorKind::BrokenPipe,
                        "pipe closed",
                    ));
                }
                self.served = true;
                let line = b"remote: counting\n";
                buf[..line.len()].copy_from_slice(line);
                Ok(line.len())
            }
        }

        let reader = BufReader::new(BrokenAfterOneLine { served: false });
        let err = drain_lines(reader, "repo").unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::BrokenPipe);
    }

    #[cfg(unix)]
    #[test]
    fn test_abort_stream_reaps_the_child() {
        let mut child = Command::new("sleep")
            .arg("30")
            .stdin(Stdio::null())
            .spawn()
            .unwrap();

        let err = abort_stream(
            &mut child,
            std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed"),
        );
        assert!(matches!(err, TrialError::Io(_)));
        // Already waited on: a second wait must observe the recorded status
        // instead of blocking on a still-running fetch.
        assert!(child.try_wait().unwrap().is_some());
    }

    #[test]
    fn test_fetch_outside_a_repository_fails() {
        // Running git fetch in a non-repository directory must surface a
        // TrialError rather than a bogus duration.
        let tmp = tempfile::tempdir().unwrap();
        let target = Target::new(tmp.path());

        let result = SimpleFetchRunner.run_trial(&target);
        assert!(result.is_err());
    }
}
