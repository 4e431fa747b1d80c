#![warn(missing_docs)]
//! Fetchmark Report - Result Presentation
//!
//! Builds the per-root summary from a run outcome and renders it:
//! - Human-readable text (one line per root plus a summary header)
//! - JSON (machine-readable)
//!
//! The formatter returns strings; delivery (stdout, file, clipboard) is the
//! caller's concern.

mod human;
mod json;
mod report;

pub use human::format_human;
pub use json::generate_json_report;
pub use report::{Report, ReportMeta, RootResult, build_report};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Human,
    /// JSON with full metadata
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "text" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse() {
        assert_eq!("human".parse::<OutputFormat>(), Ok(OutputFormat::Human));
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("html".parse::<OutputFormat>().is_err());
    }
}
