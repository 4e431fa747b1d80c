#![warn(missing_docs)]
//! Fetchmark CLI
//!
//! Command-line harness around the benchmark engine: discovers repository
//! roots, selects a fetch runner, drives the run with a progress bar and
//! Ctrl-C cancellation, and prints the aggregated report.

mod config;
mod discover;
mod progress;
mod runner;

pub use config::{FetchmarkConfig, OutputConfig, RunnerConfig};
pub use discover::discover_roots;
pub use runner::{NotifyFetchRunner, SimpleFetchRunner, StreamingFetchRunner, make_runner};

use anyhow::Context;
use clap::Parser;
use fetchmark_core::{FetchMethod, RunConfig, Target};
use fetchmark_report::{OutputFormat, build_report, format_human, generate_json_report};
use regex::Regex;
use std::path::PathBuf;

/// Fetchmark CLI arguments
#[derive(Parser, Debug)]
#[command(name = "fetchmark")]
#[command(author, version, about = "Fetchmark - git fetch latency profiler")]
pub struct Cli {
    /// Directory to scan for repository roots
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Number of timed fetch runs per root
    #[arg(long, short = 'n')]
    pub runs: Option<u32>,

    /// Fetch invocation method: simple, streaming, notify
    #[arg(long)]
    pub method: Option<FetchMethod>,

    /// Maximum directory depth when scanning for roots
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Only benchmark roots whose name matches this regex
    #[arg(long)]
    pub filter: Option<String>,

    /// Output format: human, json
    #[arg(long)]
    pub format: Option<String>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// List discovered roots without fetching
    #[arg(long)]
    pub dry_run: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Run the fetchmark CLI. Entry point for the binary.
pub fn run() -> anyhow::Result<()> {
    run_with_cli(Cli::parse())
}

/// Run the fetchmark CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("fetchmark=debug")
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("fetchmark=info")
            .init();
    }

    // fetchmark.toml provides defaults; CLI flags override.
    let file_config = FetchmarkConfig::discover().unwrap_or_default();

    let runs = cli.runs.unwrap_or(file_config.runner.runs);
    anyhow::ensure!(runs > 0, "--runs must be a positive integer");
    let method = cli.method.unwrap_or(file_config.runner.method);
    let max_depth = cli.max_depth.unwrap_or(file_config.runner.max_depth);
    let format: OutputFormat = cli
        .format
        .as_deref()
        .unwrap_or(&file_config.output.format)
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let mut targets = discover_roots(&cli.root, max_depth)?;
    if let Some(pattern) = &cli.filter {
        targets = filter_targets(targets, pattern)?;
    }
    anyhow::ensure!(
        !targets.is_empty(),
        "no git repositories found under {}",
        cli.root.display()
    );

    if cli.dry_run {
        for target in &targets {
            println!("{}", target);
        }
        return Ok(());
    }

    tracing::info!(
        roots = targets.len(),
        runs,
        method = %method,
        "starting benchmark"
    );

    progress::install_sigint_handler();

    let run_config = RunConfig {
        trials: runs,
        method,
    };
    let trial_runner = make_runner(method);
    let sink = progress::ConsoleSink::new(runs);

    let outcome = fetchmark_core::run(&targets, &run_config, trial_runner.as_ref(), &sink);
    sink.finish(outcome.cancelled);

    if outcome.cancelled {
        tracing::warn!(
            completed_runs = outcome.completed_runs,
            "run cancelled; reporting partial results"
        );
    }
    for failure in &outcome.failures {
        tracing::warn!(
            root = %failure.target.name(),
            run = failure.run,
            error = %failure.error,
            "trial skipped"
        );
    }

    let report = build_report(&outcome, &run_config);
    let text = match format {
        OutputFormat::Human => format_human(&report),
        OutputFormat::Json => generate_json_report(&report)?,
    };

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => print!("{}", text),
    }

    Ok(())
}

/// Filter targets by a name regex.
fn filter_targets(targets: Vec<Target>, pattern: &str) -> anyhow::Result<Vec<Target>> {
    let re = Regex::new(pattern).context("invalid --filter regex")?;
    Ok(targets
        .into_iter()
        .filter(|t| re.is_match(&t.name()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_defaults() {
        let cli = Cli::parse_from(["fetchmark"]);
        assert_eq!(cli.root, PathBuf::from("."));
        assert_eq!(cli.runs, None);
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::parse_from([
            "fetchmark",
            "/work",
            "--runs",
            "25",
            "--method",
            "streaming",
            "--format",
            "json",
            "--dry-run",
        ]);
        assert_eq!(cli.root, PathBuf::from("/work"));
        assert_eq!(cli.runs, Some(25));
        assert_eq!(cli.method, Some(FetchMethod::Streaming));
        assert_eq!(cli.format.as_deref(), Some("json"));
        assert!(cli.dry_run);
    }

    #[test]
    fn test_filter_targets_by_name() {
        let targets = vec![
            Target::new("/work/community"),
            Target::new("/work/contrib"),
            Target::new("/work/cidr"),
        ];
        let kept = filter_targets(targets, "^c.*i").unwrap();
        let names: Vec<String> = kept.iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["community", "contrib", "cidr"]);

        let targets = vec![Target::new("/work/community"), Target::new("/work/cidr")];
        let kept = filter_targets(targets, "community").unwrap();
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_filter_rejects_bad_regex() {
        assert!(filter_targets(vec![], "(").is_err());
    }
}
