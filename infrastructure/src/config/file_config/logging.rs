//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL consensus event trail
    pub event_log: Option<PathBuf>,
    /// Diagnostic log file written alongside stderr
    pub file: Option<PathBuf>,
}
