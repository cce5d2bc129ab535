//! Structured event logging.
//!
//! [`JsonlEventLog`] appends pipeline decisions to a JSONL file through the
//! [`EventLog`](score_application::EventLog) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlEventLog;
