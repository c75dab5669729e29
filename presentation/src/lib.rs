//! Presentation layer for groupgo
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporting and the scripted vote simulation.

pub mod cli;
pub mod output;
pub mod progress;
pub mod simulation;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat, TripArgs};
pub use output::console::ConsoleFormatter;
pub use output::formatter::{OutputFormatter, formatter_for};
pub use output::json::JsonFormatter;
pub use progress::reporter::ProgressReporter;
pub use simulation::{SimulationReport, SimulationRunner, SimulationStep, SlateView};
