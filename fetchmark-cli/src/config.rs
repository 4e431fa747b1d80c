//! Configuration loading from fetchmark.toml
//!
//! Configuration can be specified in a `fetchmark.toml` file, discovered by
//! walking up from the current directory. CLI flags override file values.

use fetchmark_core::FetchMethod;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fetchmark configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FetchmarkConfig {
    /// Runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Runner configuration for benchmark execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Number of timed fetch runs per root
    #[serde(default = "default_runs")]
    pub runs: u32,
    /// Fetch invocation method: "simple", "streaming", or "notify"
    #[serde(default)]
    pub method: FetchMethod,
    /// Maximum directory depth when scanning for repository roots
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            runs: default_runs(),
            method: FetchMethod::default(),
            max_depth: default_max_depth(),
        }
    }
}

fn default_runs() -> u32 {
    fetchmark_core::DEFAULT_TRIAL_COUNT
}
fn default_max_depth() -> usize {
    6
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format: "human" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}

impl FetchmarkConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from the
    /// current directory
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join("fetchmark.toml");
            if config_path.exists() {
                return Self::load(&config_path).ok();
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }
}
