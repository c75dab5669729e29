//! Logging infrastructure: structured consensus event logging.
//!
//! Provides [`JsonlConsensusLogger`], a JSONL file writer that implements
//! the [`ConsensusEventLogger`](groupgo_application::ConsensusEventLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlConsensusLogger;
