//! Source document identity.

pub mod digest;

pub use digest::ContentDigest;
