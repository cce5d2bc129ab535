//! Page-range splitting rules
//!
//! Pure planning for the range splitter: which pages each output document
//! covers and what it is called. Copying pages is left to the PDF engine.

pub mod naming;
pub mod plan;
pub mod range;

pub use naming::{part_filename, sanitize};
pub use plan::{DroppedDetection, PlannedPart, SplitPlan};
pub use range::PageRange;
