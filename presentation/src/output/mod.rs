//! Output formatting for slates, simulation reports and errors

pub mod console;
pub mod formatter;
pub mod json;
