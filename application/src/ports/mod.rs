//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod content_loader;
pub mod content_store;
pub mod event_log;
pub mod oracle_gateway;
pub mod pdf_engine;
pub mod progress;
