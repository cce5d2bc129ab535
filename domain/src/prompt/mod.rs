//! Prompt domain
//!
//! Instruction text sent alongside the document on every oracle call.

mod template;

pub use template::AnalysisPrompt;
