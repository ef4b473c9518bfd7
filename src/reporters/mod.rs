//! Output reporters for Credence results
//!
//! Supports two output formats:
//! - `text` - Terminal output with colors
//! - `json` - Machine-readable JSON

mod json;
mod text;

use crate::batch::VenueComparison;
use crate::pipeline::VenueReport;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Unknown format '{}'. Valid formats: text, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Render venue reports in the given format
pub fn render_reports(reports: &[VenueReport], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::render_reports(reports)),
        OutputFormat::Json => json::render(reports),
    }
}

/// Render a venue comparison in the given format
pub fn render_comparison(comparison: &VenueComparison, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::render_comparison(comparison)),
        OutputFormat::Json => json::render(comparison),
    }
}
