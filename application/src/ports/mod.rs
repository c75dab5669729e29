//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod ballot_repository;
pub mod event_logger;
pub mod provider;
pub mod recommendation;
