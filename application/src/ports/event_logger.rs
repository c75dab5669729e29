//! Port for structured consensus event logging.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port records each state change
//! of a round in a machine-readable form (JSONL).

use serde_json::Value;

/// A structured consensus event.
pub struct ConsensusEvent {
    /// Event type identifier (e.g., "vote_cast", "option_rejected").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConsensusEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for recording consensus events.
///
/// `log` is synchronous and infallible; adapters swallow their own write errors.
pub trait ConsensusEventLogger: Send + Sync {
    fn log(&self, event: ConsensusEvent);
}

/// No-op implementation for tests and when event logging is disabled.
pub struct NoEventLogger;

impl ConsensusEventLogger for NoEventLogger {
    fn log(&self, _event: ConsensusEvent) {}
}
