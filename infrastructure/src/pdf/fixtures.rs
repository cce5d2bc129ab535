//! Small generated PDFs for tests

use lopdf::{Document, Object, Stream, dictionary};

pub const A4_PORTRAIT: (i64, i64) = (595, 842);
pub const A4_LANDSCAPE: (i64, i64) = (842, 595);

/// One page per size, each with its own media box
pub fn pdf_with_sizes(sizes: &[(i64, i64)]) -> Vec<u8> {
    let boxes: Vec<Option<Vec<Object>>> = sizes
        .iter()
        .map(|&(w, h)| Some(vec![0.into(), 0.into(), w.into(), h.into()]))
        .collect();
    pdf_with_boxes(None, boxes)
}

/// Pages under a single page tree node, which may carry its own media box
pub fn pdf_with_boxes(parent_box: Option<Vec<Object>>, page_boxes: Vec<Option<Vec<Object>>>) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let count = page_boxes.len() as i64;

    let mut kids: Vec<Object> = Vec::with_capacity(page_boxes.len());
    for (i, media_box) in page_boxes.into_iter().enumerate() {
        let content = format!("BT /F1 12 Tf 72 720 Td (Page {}) Tj ET", i + 1);
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        };
        if let Some(media_box) = media_box {
            page.set("MediaBox", media_box);
        }
        kids.push(doc.add_object(page).into());
    }

    let mut pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
    };
    if let Some(media_box) = parent_box {
        pages.set("MediaBox", media_box);
    }
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}
