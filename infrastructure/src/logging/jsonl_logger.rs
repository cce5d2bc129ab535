//! JSONL file writer for pipeline events.
//!
//! Every [`PipelineEvent`] becomes one line: the payload's fields plus
//! `type` and `timestamp`. Runs append to the same file, so one log can
//! hold the history of many invocations.

use score_application::{EventLog, PipelineEvent};
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Append-only JSONL event log.
///
/// Shared across replica tasks behind a `Mutex<BufWriter<File>>`; each line
/// is flushed as it is written and the buffer is flushed again on `Drop`.
pub struct JsonlEventLog {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
    run_id: String,
}

impl JsonlEventLog {
    /// Open (or create) the log at `path`.
    ///
    /// Returns `None` when the file cannot be opened; callers fall back to
    /// running without an event log.
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
                warn!("Could not open event log {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
            run_id: chrono::Utc::now().format("%Y%m%dT%H%M%S%.3fZ").to_string(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Identifier stamped on every line written by this instance
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    fn to_record(&self, event: PipelineEvent) -> Value {
        let mut map = match event.payload {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        map.insert("type".to_string(), Value::String(event.event_type.to_string()));
        map.insert(
            "timestamp".to_string(),
            Value::String(
                chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            ),
        );
        map.insert("run".to_string(), Value::String(self.run_id.clone()));
        Value::Object(map)
    }
}

impl EventLog for JsonlEventLog {
    fn record(&self, event: PipelineEvent) {
        let record = self.to_record(event);
        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlEventLog {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
