//! Scripted vote replay against a freshly generated slate

mod report;
mod runner;
mod step;

pub use report::{SimulationReport, SlateView, StepOutcome, StepRecord};
pub use runner::SimulationRunner;
pub use step::SimulationStep;
