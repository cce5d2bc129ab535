//! Per-identity accumulation of detections

use super::selection::pick_page;
use super::tally::Tally;
use crate::instrument::{IdentityKey, InstrumentPart, InstrumentRecord};

/// Name shown when no replica spelled the instrument out
pub const UNKNOWN_NAME: &str = "Unknown";

/// Everything the replicas said about one [`IdentityKey`].
///
/// Built fresh for each aggregation and discarded afterwards.
#[derive(Debug, Clone)]
pub struct AggregationBucket {
    key: IdentityKey,
    names: Tally<String>,
    voices: Tally<Option<String>>,
    starts: Vec<i64>,
    ends: Vec<i64>,
    count: usize,
}

impl AggregationBucket {
    pub fn new(key: IdentityKey) -> Self {
        Self {
            key,
            names: Tally::new(),
            voices: Tally::new(),
            starts: Vec::new(),
            ends: Vec::new(),
            count: 0,
        }
    }

    /// Fold one detection into the bucket.
    ///
    /// Page endpoints are only recorded when they were integers; a missing
    /// end page counts as the start page.
    pub fn observe(&mut self, record: &InstrumentRecord) {
        self.names.add(record.name.clone().unwrap_or_default());
        self.voices
            .add(record.voice.clone().filter(|v| !v.is_empty()));
        if let Some(start) = record.start_page {
            self.starts.push(start);
        }
        if let Some(end) = record.end_or_start() {
            self.ends.push(end);
        }
        self.count += 1;
    }

    pub fn key(&self) -> &IdentityKey {
        &self.key
    }

    /// Number of detections folded in
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn starts(&self) -> &[i64] {
        &self.starts
    }

    pub fn ends(&self) -> &[i64] {
        &self.ends
    }

    /// Resolve the bucket into one part: most common spellings, endpoints
    /// by mode with median tie-break.
    pub fn resolve(&self) -> InstrumentPart {
        let start = pick_page(&self.starts).unwrap_or(1);
        let end = pick_page(&self.ends).unwrap_or(start);

        let name = self
            .names
            .most_common()
            .map(|(n, _)| n.as_str())
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(UNKNOWN_NAME);
        let voice = self.voices.most_common().and_then(|(v, _)| v.clone());

        InstrumentPart {
            name: name.to_string(),
            voice,
            start_page: to_page(start),
            end_page: to_page(end),
        }
    }
}

fn to_page(value: i64) -> u32 {
    value.clamp(1, i64::from(u32::MAX)) as u32
}
