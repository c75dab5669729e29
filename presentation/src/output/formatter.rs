//! Output formatter trait

use super::console::ConsoleFormatter;
use super::json::JsonFormatter;
use crate::simulation::{SimulationReport, SlateView};
use groupgo_application::ConsensusError;
use groupgo_domain::OutputFormat;

/// Trait for rendering command results
pub trait OutputFormatter {
    /// The options a new round opened with
    fn format_slate(&self, slate: &SlateView) -> String;

    /// Every step of a simulation and where it ended
    fn format_report(&self, report: &SimulationReport) -> String;

    /// A failure the user can act on
    fn format_error(&self, error: &ConsensusError) -> String;
}

/// Formatter for the selected output format
pub fn formatter_for(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(ConsoleFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}
