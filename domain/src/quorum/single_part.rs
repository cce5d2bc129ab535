//! Majority vote for single-part documents
//!
//! When the document is known to hold exactly one part the oracle is only
//! asked for a name and voice; the page range is the whole document.

use super::bucket::UNKNOWN_NAME;
use super::tally::Tally;
use crate::analysis::SinglePartAnswer;
use serde::{Deserialize, Serialize};

/// Majority answer for a single-part document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinglePartConsensus {
    pub name: String,
    pub voice: Option<String>,
    pub start_page: u32,
    pub end_page: u32,
    /// Page count of the local document, when it could be read
    pub pages: Option<u32>,
}

/// Vote on name and voice across replicas.
///
/// Blank names do not vote; an absent voice is a vote like any other.
pub fn aggregate_single_part(
    answers: &[SinglePartAnswer],
    total_pages: Option<u32>,
) -> SinglePartConsensus {
    let names: Tally<&str> = answers
        .iter()
        .filter_map(|a| a.name.as_deref())
        .filter(|n| !n.trim().is_empty())
        .collect();
    let voices: Tally<Option<&str>> = answers.iter().map(|a| a.voice.as_deref()).collect();

    SinglePartConsensus {
        name: names
            .most_common()
            .map(|(n, _)| n.to_string())
            .unwrap_or_else(|| UNKNOWN_NAME.to_string()),
        voice: voices
            .most_common()
            .and_then(|(v, _)| v.map(str::to_string)),
        start_page: 1,
        end_page: total_pages.filter(|p| *p > 0).unwrap_or(1),
        pages: total_pages,
    }
}
