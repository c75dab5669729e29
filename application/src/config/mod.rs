//! Application-level configuration.
//!
//! - [`EngineConfig`] - generation and voting knobs read by the use cases

pub mod engine_config;

pub use engine_config::EngineConfig;
