//! Presentation layer for score-quorum
//!
//! This crate contains CLI definitions, output formatters
//! and progress reporters.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{AnalyseArgs, Cli, Command, HashArgs, NormalizeArgs, SplitArgs, is_url};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
