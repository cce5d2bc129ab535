//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod analyse;
pub mod errors;
pub mod normalize_orientation;
pub mod prepare_content;
pub mod run_replicas;
pub mod split_parts;

#[cfg(test)]
pub(crate) mod testing;
