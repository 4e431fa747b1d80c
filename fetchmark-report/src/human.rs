//! Human-Readable Output
//!
//! Renders the per-root averages plus run metadata as plain text. The
//! original dialog/clipboard delivery is out of scope; this only builds the
//! string.

use crate::report::Report;

/// Singular for exactly one, plural otherwise (0 or many).
fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

/// Format a report for terminal display.
///
/// One line per root: `<name>: <average> ms`, preceded by a summary line
/// with the trial count, root count, and the invocation method used.
pub fn format_human(report: &Report) -> String {
    let mut output = String::new();
    let count = report.roots.len();

    output.push_str(&format!(
        "Fetch was called {} times in {} {} (method: {})\n",
        report.meta.trials,
        count,
        pluralize("root", count),
        report.meta.method,
    ));
    output.push_str("Average times without the first cold fetch, 10/90 percentiles trimmed:\n");

    for root in &report.roots {
        match (root.average_ms, &root.error) {
            (Some(avg), _) => output.push_str(&format!("{}: {} ms\n", root.name, avg)),
            (None, Some(error)) => output.push_str(&format!("{}: {}\n", root.name, error)),
            (None, None) => output.push_str(&format!("{}: no result\n", root.name)),
        }
    }

    if report.meta.skipped_trials > 0 {
        output.push_str(&format!(
            "Skipped {} failed {}\n",
            report.meta.skipped_trials,
            pluralize("trial", report.meta.skipped_trials),
        ));
    }

    if report.meta.cancelled {
        output.push_str(&format!(
            "Run cancelled after {} of {} runs; averages cover the completed runs\n",
            report.meta.completed_runs, report.meta.trials,
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{ReportMeta, RootResult};
    use chrono::Utc;

    fn meta(trials: u32) -> ReportMeta {
        ReportMeta {
            version: "0.1.0".to_string(),
            timestamp: Utc::now(),
            git_commit: None,
            trials,
            method: "simple".to_string(),
            completed_runs: trials,
            skipped_trials: 0,
            cancelled: false,
        }
    }

    fn root(name: &str, average_ms: Option<u64>) -> RootResult {
        RootResult {
            name: name.to_string(),
            path: name.to_string(),
            samples: 10,
            average_ms,
            error: average_ms.is_none().then(|| "no samples".to_string()),
        }
    }

    #[test]
    fn test_singular_root() {
        let report = Report {
            meta: meta(100),
            roots: vec![root("community", Some(123))],
        };
        let text = format_human(&report);
        assert!(text.contains("Fetch was called 100 times in 1 root (method: simple)"));
        assert!(
            text.contains("Average times without the first cold fetch, 10/90 percentiles trimmed:")
        );
        assert!(text.contains("community: 123 ms\n"));
    }

    #[test]
    fn test_plural_roots() {
        let report = Report {
            meta: meta(50),
            roots: vec![root("a", Some(10)), root("b", Some(20))],
        };
        let text = format_human(&report);
        assert!(text.contains("in 2 roots"));
        assert!(text.contains("a: 10 ms\n"));
        assert!(text.contains("b: 20 ms\n"));
    }

    #[test]
    fn test_zero_roots_is_plural() {
        let report = Report {
            meta: meta(10),
            roots: Vec::new(),
        };
        assert!(format_human(&report).contains("in 0 roots"));
    }

    #[test]
    fn test_failed_root_line_shows_error() {
        let report = Report {
            meta: meta(10),
            roots: vec![root("broken", None)],
        };
        let text = format_human(&report);
        assert!(text.contains("broken: no samples"));
    }

    #[test]
    fn test_cancellation_note() {
        let mut m = meta(100);
        m.cancelled = true;
        m.completed_runs = 40;
        let report = Report {
            meta: m,
            roots: vec![root("a", Some(5))],
        };
        let text = format_human(&report);
        assert!(text.contains("cancelled after 40 of 100 runs"));
    }

    #[test]
    fn test_skipped_trials_note() {
        let mut m = meta(10);
        m.skipped_trials = 1;
        let report = Report {
            meta: m,
            roots: vec![root("a", Some(5))],
        };
        assert!(format_human(&report).contains("Skipped 1 failed trial\n"));

        let mut m = meta(10);
        m.skipped_trials = 3;
        let report = Report {
            meta: m,
            roots: vec![root("a", Some(5))],
        };
        assert!(format_human(&report).contains("Skipped 3 failed trials\n"));
    }
}
