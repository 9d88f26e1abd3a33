//! JSONL file writer for delivery events.
//!
//! Each [`DeliveryEvent`] is serialized as a single JSON line with a
//! `type` field and `timestamp`, appended to the file via a buffered
//! writer. The file is opened in append mode: it is the durable delivery
//! trail across runs, and the simulation transport's record of what would
//! have been sent.

use askedith_application::ports::delivery_log::{DeliveryEvent, DeliveryLogger};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL delivery log that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
pub struct JsonlDeliveryLog {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlDeliveryLog {
    /// Create a log appending to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create delivery log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().append(true).create(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open delivery log file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Create the log at its default location in the user data directory.
    pub fn in_data_dir() -> Option<Self> {
        let path = dirs::data_dir()?.join("askedith").join("delivery_log.jsonl");
        Self::new(path)
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DeliveryLogger for JsonlDeliveryLog {
    fn log(&self, event: DeliveryEvent) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        // Build the record: merge payload with type + timestamp
        let record = if let serde_json::Value::Object(mut map) = event.payload {
            map.insert(
                "type".to_string(),
                serde_json::Value::String(event.event_type.to_string()),
            );
            map.insert(
                "timestamp".to_string(),
                serde_json::Value::String(timestamp),
            );
            serde_json::Value::Object(map)
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
            // Flush per event for crash safety — JSONL is append-only
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlDeliveryLog {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        let mut content = String::new();
        File::open(path)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        content
            .trim()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_log_writes_valid_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("delivery_log.jsonl");
        let log = JsonlDeliveryLog::new(&path).unwrap();

        log.log(DeliveryEvent::new(
            "batch_started",
            serde_json::json!({ "total": 3 }),
        ));
        log.log(DeliveryEvent::new(
            "message_sent",
            serde_json::json!({
                "to": "intake@provider.example.com",
                "transport": "simulation",
                "message_id": "sim-1"
            }),
        ));

        // Flush
        drop(log);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);

        for line in &lines {
            assert!(line.get("type").is_some());
            assert!(line.get("timestamp").is_some());
        }

        assert_eq!(lines[0]["type"], "batch_started");
        assert_eq!(lines[0]["total"], 3);

        assert_eq!(lines[1]["type"], "message_sent");
        assert_eq!(lines[1]["to"], "intake@provider.example.com");
        assert_eq!(lines[1]["transport"], "simulation");
    }

    #[test]
    fn test_log_appends_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("delivery_log.jsonl");

        {
            let log = JsonlDeliveryLog::new(&path).unwrap();
            log.log(DeliveryEvent::new(
                "batch_started",
                serde_json::json!({ "total": 1 }),
            ));
        }
        {
            let log = JsonlDeliveryLog::new(&path).unwrap();
            log.log(DeliveryEvent::new(
                "batch_completed",
                serde_json::json!({ "sent": 1 }),
            ));
        }

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["type"], "batch_started");
        assert_eq!(lines[1]["type"], "batch_completed");
    }

    #[test]
    fn test_log_handles_non_object_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("delivery_log.jsonl");
        let log = JsonlDeliveryLog::new(&path).unwrap();

        log.log(DeliveryEvent::new(
            "note",
            serde_json::json!("just a string"),
        ));

        drop(log);

        let lines = read_lines(&path);
        assert_eq!(lines[0]["type"], "note");
        assert_eq!(lines[0]["data"], "just a string");
    }

    #[test]
    fn test_log_returns_none_for_invalid_path() {
        let result = JsonlDeliveryLog::new("/nonexistent/deeply/nested/path/file.jsonl");
        // On most systems this will fail — the exact behavior depends on permissions
        // Just verify it doesn't panic
        let _ = result;
    }
}
