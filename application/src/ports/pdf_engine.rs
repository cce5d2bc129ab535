//! PDF engine port
//!
//! Page-level operations on an opened document. Mirrors the gateway/session
//! split: the engine opens bytes, the returned document answers questions
//! and produces new documents.

use score_domain::{PageRange, PageSize};
use thiserror::Error;

/// Errors reported by a PDF engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("Unreadable document: {0}")]
    Unreadable(String),

    #[error("Page {page} out of range (document has {total} pages)")]
    PageOutOfRange { page: u32, total: u32 },

    #[error("Page {page} has no usable media box")]
    MissingMediaBox { page: u32 },

    #[error("Failed to write document: {0}")]
    Write(String),
}

/// Opens documents
pub trait PdfEngine: Send + Sync {
    fn open(&self, bytes: &[u8]) -> Result<Box<dyn PdfDocument>, DocumentError>;
}

/// An opened document
///
/// Operations never modify the opened document; each returns the bytes of
/// a new one.
pub trait PdfDocument: Send {
    fn page_count(&self) -> u32;

    /// Media box size of every page, in page order
    fn page_sizes(&self) -> Result<Vec<PageSize>, DocumentError>;

    /// New document holding the pages of `range`, in order
    fn extract_pages(&self, range: PageRange) -> Result<Vec<u8>, DocumentError>;

    /// New document with `degrees` added to the rotation of each listed
    /// (1-based) page; all pages are kept in order
    fn rotate_pages(&self, pages: &[u32], degrees: i64) -> Result<Vec<u8>, DocumentError>;
}
