//! `lopdf` implementation of the PDF engine port
//!
//! Page attributes such as `MediaBox` and `Rotate` may be inherited from
//! the page tree, so lookups walk the `Parent` chain.

use lopdf::{Dictionary, Document, Object, ObjectId};
use score_application::{DocumentError, PdfDocument, PdfEngine};
use score_domain::{PageRange, PageSize};
use tracing::debug;

/// Upper bound on `Parent` hops when resolving inherited attributes
const MAX_TREE_DEPTH: usize = 32;

/// Opens documents with `lopdf`
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfEngine;

impl LopdfEngine {
    pub fn new() -> Self {
        Self
    }
}

impl PdfEngine for LopdfEngine {
    fn open(&self, bytes: &[u8]) -> Result<Box<dyn PdfDocument>, DocumentError> {
        Ok(Box::new(LopdfDocument::load(bytes)?))
    }
}

/// A parsed document and its pages in order
pub struct LopdfDocument {
    document: Document,
    pages: Vec<ObjectId>,
}

impl LopdfDocument {
    pub fn load(bytes: &[u8]) -> Result<Self, DocumentError> {
        let document =
            Document::load_mem(bytes).map_err(|e| DocumentError::Unreadable(e.to_string()))?;
        let pages = document.get_pages().into_values().collect();
        Ok(Self { document, pages })
    }

    /// Effective rotation of a 1-based page, in degrees
    pub fn rotation(&self, page: u32) -> Result<i64, DocumentError> {
        let id = self.page_id(page)?;
        Ok(self
            .inherited(id, b"Rotate")
            .and_then(|obj| obj.as_i64().ok())
            .unwrap_or(0))
    }

    fn total(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_id(&self, page: u32) -> Result<ObjectId, DocumentError> {
        page.checked_sub(1)
            .and_then(|i| self.pages.get(i as usize))
            .copied()
            .ok_or(DocumentError::PageOutOfRange {
                page,
                total: self.total(),
            })
    }

    fn resolve<'a>(&'a self, obj: &'a Object) -> Option<&'a Object> {
        match obj {
            Object::Reference(id) => self.document.get_object(*id).ok(),
            other => Some(other),
        }
    }

    /// Value of `key` on the page or the nearest ancestor that sets it
    fn inherited(&self, page_id: ObjectId, key: &[u8]) -> Option<&Object> {
        let mut node: &Dictionary = self.document.get_dictionary(page_id).ok()?;
        for _ in 0..MAX_TREE_DEPTH {
            if let Ok(value) = node.get(key) {
                return self.resolve(value);
            }
            let parent = node.get(b"Parent").ok()?.as_reference().ok()?;
            node = self.document.get_dictionary(parent).ok()?;
        }
        None
    }

    fn media_box(&self, page: u32) -> Result<PageSize, DocumentError> {
        let id = self.page_id(page)?;
        let missing = DocumentError::MissingMediaBox { page };

        let values = self
            .inherited(id, b"MediaBox")
            .and_then(|obj| obj.as_array().ok())
            .ok_or(missing.clone())?;
        let coords: Vec<f64> = values
            .iter()
            .filter_map(|v| self.resolve(v).and_then(number))
            .collect();

        match coords.as_slice() {
            [x0, y0, x1, y1] => Ok(PageSize::new((x1 - x0).abs(), (y1 - y0).abs())),
            _ => Err(missing),
        }
    }

    fn save(mut document: Document) -> Result<Vec<u8>, DocumentError> {
        let mut buf = Vec::new();
        document
            .save_to(&mut buf)
            .map_err(|e| DocumentError::Write(e.to_string()))?;
        Ok(buf)
    }
}

fn number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(f64::from(*r)),
        _ => None,
    }
}

impl PdfDocument for LopdfDocument {
    fn page_count(&self) -> u32 {
        self.total()
    }

    fn page_sizes(&self) -> Result<Vec<PageSize>, DocumentError> {
        (1..=self.total()).map(|page| self.media_box(page)).collect()
    }

    fn extract_pages(&self, range: PageRange) -> Result<Vec<u8>, DocumentError> {
        let total = self.total();
        if range.end() > total {
            return Err(DocumentError::PageOutOfRange {
                page: range.end(),
                total,
            });
        }

        let outside: Vec<u32> = (1..=total)
            .filter(|p| *p < range.start() || *p > range.end())
            .collect();

        let mut document = self.document.clone();
        document.delete_pages(&outside);
        document.prune_objects();
        debug!("Extracted pages {} of {}", range, total);

        Self::save(document)
    }

    fn rotate_pages(&self, pages: &[u32], degrees: i64) -> Result<Vec<u8>, DocumentError> {
        let mut updates = Vec::with_capacity(pages.len());
        for &page in pages {
            let id = self.page_id(page)?;
            let rotation = (self.rotation(page)? + degrees).rem_euclid(360);
            updates.push((id, rotation));
        }

        let mut document = self.document.clone();
        for (id, rotation) in updates {
            let dict = document
                .get_object_mut(id)
                .and_then(Object::as_dict_mut)
                .map_err(|e| DocumentError::Write(e.to_string()))?;
            dict.set("Rotate", rotation);
        }

        Self::save(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::DigestCache;
    use crate::pdf::fixtures::{A4_LANDSCAPE, A4_PORTRAIT, pdf_with_boxes, pdf_with_sizes};
    use score_application::{
        NormalizeInput, NormalizeOrientationUseCase, SourceDocument, SplitInput,
        SplitPartsUseCase, SplitTarget,
    };
    use score_domain::{InstrumentRecord, Orientation};
    use std::sync::Arc;

    fn open(bytes: &[u8]) -> LopdfDocument {
        LopdfDocument::load(bytes).unwrap()
    }

    #[test]
    fn test_page_count_and_sizes() {
        let doc = open(&pdf_with_sizes(&[A4_PORTRAIT, A4_LANDSCAPE, A4_PORTRAIT]));

        assert_eq!(doc.page_count(), 3);
        let sizes = doc.page_sizes().unwrap();
        assert_eq!(sizes[0], PageSize::new(595.0, 842.0));
        assert_eq!(sizes[1].orientation(), Orientation::Landscape);
    }

    #[test]
    fn test_media_box_inherited_from_page_tree() {
        let parent: Vec<Object> = vec![0.into(), 0.into(), 842.into(), 595.into()];
        let own = vec![
            Object::Real(10.0),
            Object::Real(10.0),
            Object::Real(305.5),
            Object::Real(410.0),
        ];
        let doc = open(&pdf_with_boxes(Some(parent), vec![None, Some(own)]));

        let sizes = doc.page_sizes().unwrap();
        assert_eq!(sizes[0], PageSize::new(842.0, 595.0));
        assert_eq!(sizes[1], PageSize::new(295.5, 400.0));
    }

    #[test]
    fn test_missing_media_box() {
        let doc = open(&pdf_with_boxes(None, vec![None]));
        assert_eq!(
            doc.page_sizes().unwrap_err(),
            DocumentError::MissingMediaBox { page: 1 }
        );
    }

    #[test]
    fn test_unreadable_bytes() {
        let err = LopdfEngine::new().open(b"%PDF-1.7 but not really").err().unwrap();
        assert!(matches!(err, DocumentError::Unreadable(_)));
    }

    #[test]
    fn test_extract_keeps_range_in_order() {
        let sizes: Vec<(i64, i64)> = (1..=6).map(|i| (100 * i, 900)).collect();
        let doc = open(&pdf_with_sizes(&sizes));

        let part = open(&doc.extract_pages(PageRange::normalize(2, Some(4), 6)).unwrap());

        assert_eq!(part.page_count(), 3);
        let widths: Vec<f64> = part.page_sizes().unwrap().iter().map(|s| s.width).collect();
        assert_eq!(widths, vec![200.0, 300.0, 400.0]);
        // Source is untouched
        assert_eq!(doc.page_count(), 6);
    }

    #[test]
    fn test_extract_past_end() {
        let doc = open(&pdf_with_sizes(&[A4_PORTRAIT; 2]));
        let range = PageRange::normalize(1, Some(5), 5);

        assert_eq!(
            doc.extract_pages(range).unwrap_err(),
            DocumentError::PageOutOfRange { page: 5, total: 2 }
        );
    }

    #[test]
    fn test_rotate_adds_to_existing_rotation() {
        let doc = open(&pdf_with_sizes(&[A4_PORTRAIT; 3]));

        let once = open(&doc.rotate_pages(&[2, 3], 90).unwrap());
        assert_eq!(once.page_count(), 3);
        assert_eq!(once.rotation(1).unwrap(), 0);
        assert_eq!(once.rotation(2).unwrap(), 90);

        let wrapped = open(&once.rotate_pages(&[2], 270).unwrap());
        assert_eq!(wrapped.rotation(2).unwrap(), 0);
        assert_eq!(wrapped.rotation(3).unwrap(), 90);
    }

    #[test]
    fn test_rotate_unknown_page() {
        let doc = open(&pdf_with_sizes(&[A4_PORTRAIT]));
        assert_eq!(
            doc.rotate_pages(&[0], 90).unwrap_err(),
            DocumentError::PageOutOfRange { page: 0, total: 1 }
        );
    }

    #[test]
    fn test_split_twelve_page_score_into_files() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = pdf_with_sizes(&[A4_PORTRAIT; 12]);
        let document = SourceDocument::new("march.pdf", bytes);
        let records = vec![
            InstrumentRecord::new("Trumpet", Some("1"), 1, 5),
            InstrumentRecord::new("Clarinet", None, 6, 12),
        ];

        let use_case = SplitPartsUseCase::new(
            Arc::new(LopdfEngine::new()),
            Arc::new(DigestCache::new(dir.path().join("cache"))),
        );
        let out_dir = dir.path().join("march_parts");
        let report = use_case
            .execute(&SplitInput::new(
                document,
                records,
                SplitTarget::Directory(out_dir.clone()),
            ))
            .unwrap();

        assert_eq!(report.outputs.len(), 2);
        assert!(report.dropped.is_empty());

        let trumpet = report.outputs[0].path().unwrap();
        assert_eq!(trumpet, out_dir.join("01 - Trumpet 1.pdf"));
        assert_eq!(open(&std::fs::read(trumpet).unwrap()).page_count(), 5);

        let clarinet = report.outputs[1].path().unwrap();
        assert_eq!(clarinet, out_dir.join("02 - Clarinet.pdf"));
        assert_eq!(open(&std::fs::read(clarinet).unwrap()).page_count(), 7);
    }

    #[test]
    fn test_normalize_mostly_landscape_score() {
        let dir = tempfile::tempdir().unwrap();
        let mut sizes = vec![A4_LANDSCAPE; 7];
        sizes.extend([A4_PORTRAIT; 3]);
        let document = SourceDocument::new("suite.pdf", pdf_with_sizes(&sizes));
        let output = dir.path().join("suite_normalized.pdf");

        let use_case = NormalizeOrientationUseCase::new(
            Arc::new(LopdfEngine::new()),
            Arc::new(DigestCache::new(dir.path())),
        );
        let result = use_case
            .execute(&NormalizeInput::new(document).with_output(&output))
            .unwrap();

        assert_eq!(result.path, output);
        assert_eq!(result.plan.target, Orientation::Landscape);

        let normalized = open(&std::fs::read(&output).unwrap());
        assert_eq!(normalized.page_count(), 10);
        assert_eq!(normalized.rotation(1).unwrap(), 0);
        for page in 8..=10 {
            assert_eq!(normalized.rotation(page).unwrap(), 90);
        }
    }
}
