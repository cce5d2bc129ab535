//! Port for structured pipeline events.
//!
//! Defines the [`EventLog`] trait for recording what the pipeline decided
//! (replica outcomes, retries, consensus, dropped detections, written parts)
//! to a machine-readable log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures decisions
//! in a format that can be replayed and audited (JSONL).

use serde_json::Value;

/// Event type identifiers
pub mod event_types {
    pub const REPLICA_SUCCEEDED: &str = "replica_succeeded";
    pub const REPLICA_FAILED: &str = "replica_failed";
    pub const REPLICA_RETRY: &str = "replica_retry";
    pub const CONSENSUS_REACHED: &str = "consensus_reached";
    pub const DETECTION_DROPPED: &str = "detection_dropped";
    pub const PART_WRITTEN: &str = "part_written";
    pub const UPLOAD_REUSED: &str = "upload_reused";
    pub const UPLOAD_CREATED: &str = "upload_created";
    pub const ORIENTATION_PLANNED: &str = "orientation_planned";
}

/// A structured pipeline event.
///
/// Each event has a type string and a JSON payload containing
/// event-specific fields. Timestamps are added by the log implementation.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineEvent {
    pub event_type: &'static str,
    pub payload: Value,
}

impl PipelineEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging pipeline events.
///
/// `record` is synchronous and non-fallible; implementations swallow their
/// own write failures.
pub trait EventLog: Send + Sync {
    fn record(&self, event: PipelineEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoEventLog;

impl EventLog for NoEventLog {
    fn record(&self, _event: PipelineEvent) {}
}
