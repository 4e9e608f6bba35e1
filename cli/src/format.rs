//! Output rendering for compiled criteria.

use clap::ValueEnum;
use matq_core::Criteria;

/// How compiled criteria are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Single-line Mongo-style JSON.
    #[default]
    Json,
    /// Indented Mongo-style JSON.
    Pretty,
    /// Human-readable predicates with exact rationals.
    Text,
}

/// Render criteria in the requested format.
pub fn render(criteria: &Criteria, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => serde_json::to_string(criteria),
        OutputFormat::Pretty => serde_json::to_string_pretty(criteria),
        OutputFormat::Text => Ok(criteria.to_string()),
    }
}
