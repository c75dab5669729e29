//! JSON output

use super::formatter::OutputFormatter;
use crate::simulation::{SimulationReport, SlateView};
use groupgo_application::ConsensusError;
use groupgo_domain::DomainError;
use serde::Serialize;

/// Pretty-printed JSON documents for scripting
pub struct JsonFormatter;

impl JsonFormatter {
    fn render<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_slate(&self, slate: &SlateView) -> String {
        Self::render(slate)
    }

    fn format_report(&self, report: &SimulationReport) -> String {
        Self::render(report)
    }

    fn format_error(&self, error: &ConsensusError) -> String {
        Self::render(&serde_json::json!({
            "error": error.to_string(),
            "needs_new_input": error.as_domain().is_some_and(DomainError::needs_new_input),
        }))
    }
}
