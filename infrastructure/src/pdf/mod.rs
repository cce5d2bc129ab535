//! PDF engine backed by `lopdf`.

mod engine;

pub use engine::{LopdfDocument, LopdfEngine};

#[cfg(test)]
pub(crate) mod fixtures;
