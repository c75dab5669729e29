//! JSONL file writer for consensus events.
//!
//! Each [`ConsensusEvent`] is serialized as a single JSON line with a
//! `type` field and `timestamp`, appended to the file via a buffered writer.

use groupgo_application::ports::event_logger::{ConsensusEvent, ConsensusEventLogger};
use serde_json::Value;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL consensus logger that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`. Appends, so
/// one file can hold the trail of several runs.
pub struct JsonlConsensusLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlConsensusLogger {
    /// Open (or create) the log at the given path.
    ///
    /// Creates parent directories if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create event log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open event log file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConsensusEventLogger for JsonlConsensusLogger {
    fn log(&self, event: ConsensusEvent) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let record = if let Value::Object(mut map) = event.payload {
            map.insert("type".to_string(), Value::String(event.event_type.to_string()));
            map.insert("timestamp".to_string(), Value::String(timestamp));
            Value::Object(map)
        } else {
            serde_json::json!({
                "type": event.event_type,
                "timestamp": timestamp,
                "data": event.payload,
            })
        };

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlConsensusLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn read_lines(path: &Path) -> Vec<Value> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_jsonl_logger_writes_valid_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trip.events.jsonl");
        let logger = JsonlConsensusLogger::new(&path).unwrap();

        logger.log(ConsensusEvent::new(
            "vote_cast",
            serde_json::json!({
                "member_id": "ana",
                "choice": "yes",
                "letter": "A"
            }),
        ));
        logger.log(ConsensusEvent::new(
            "option_rejected",
            serde_json::json!({ "letter": "A", "yes": 1, "roll_again": 1 }),
        ));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        for value in &lines {
            assert!(value.get("type").is_some());
            assert!(value.get("timestamp").is_some());
        }
        assert_eq!(lines[0]["type"], "vote_cast");
        assert_eq!(lines[0]["member_id"], "ana");
        assert_eq!(lines[1]["type"], "option_rejected");
        assert_eq!(lines[1]["roll_again"], 1);
    }

    #[test]
    fn test_jsonl_logger_handles_non_object_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.jsonl");
        let logger = JsonlConsensusLogger::new(&path).unwrap();

        logger.log(ConsensusEvent::new(
            "options_exhausted",
            serde_json::json!("no inventory left"),
        ));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines[0]["type"], "options_exhausted");
        assert_eq!(lines[0]["data"], "no inventory left");
    }

    #[test]
    fn test_jsonl_logger_appends_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("events.jsonl");

        for event in ["consensus_started", "option_activated"] {
            let logger = JsonlConsensusLogger::new(&path).unwrap();
            logger.log(ConsensusEvent::new(event, serde_json::json!({})));
        }

        let types: Vec<_> = read_lines(&path)
            .into_iter()
            .map(|v| v["type"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(types, vec!["consensus_started", "option_activated"]);
    }

    #[test]
    fn test_jsonl_logger_returns_none_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        assert!(JsonlConsensusLogger::new(blocker.join("events.jsonl")).is_none());
    }
}
