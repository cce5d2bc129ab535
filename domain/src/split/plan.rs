//! Split planning: records in, placed parts and dropped detections out

use super::naming::part_filename;
use super::range::PageRange;
use crate::instrument::InstrumentRecord;
use serde::Serialize;

/// A part that will become one output document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedPart {
    /// 1-based position of the record in the input list
    pub index: usize,
    pub name: String,
    pub voice: Option<String>,
    pub range: PageRange,
    pub filename: String,
}

/// A record that could not be placed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedDetection {
    pub index: usize,
    pub name: Option<String>,
    pub missing: &'static str,
}

/// Result of planning a split over a document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SplitPlan {
    pub parts: Vec<PlannedPart>,
    pub dropped: Vec<DroppedDetection>,
}

impl SplitPlan {
    /// Plan one output per record, in input order.
    ///
    /// Indices follow input position, so a dropped record leaves a gap in
    /// the numbering rather than shifting later filenames.
    pub fn build(records: &[InstrumentRecord], total_pages: u32) -> Self {
        let mut plan = SplitPlan::default();

        for (i, record) in records.iter().enumerate() {
            let index = i + 1;
            match record.normalize(total_pages) {
                Ok(part) => {
                    let range = PageRange::normalize(
                        i64::from(part.start_page),
                        Some(i64::from(part.end_page)),
                        total_pages,
                    );
                    let filename = part_filename(index, &part.name, part.voice.as_deref());
                    plan.parts.push(PlannedPart {
                        index,
                        name: part.name,
                        voice: part.voice,
                        range,
                        filename,
                    });
                }
                Err(missing) => plan.dropped.push(DroppedDetection {
                    index,
                    name: record.name.clone(),
                    missing: missing.as_str(),
                }),
            }
        }

        plan
    }

    /// Total pages over all planned parts (overlaps counted twice)
    pub fn pages_covered(&self) -> u32 {
        self.parts.iter().map(|p| p.range.len()).sum()
    }
}
