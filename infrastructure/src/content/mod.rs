//! Local content handling: loading documents and the digest cache.

mod cache;
mod loader;

pub use cache::DigestCache;
pub use loader::{FsContentLoader, PDF_MAGIC, has_pdf_magic};
