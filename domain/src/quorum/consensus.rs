//! Consensus aggregation across replicas

use super::bucket::AggregationBucket;
use super::rule::QuorumRule;
use crate::analysis::AnalysisResult;
use crate::instrument::{IdentityKey, InstrumentPart, InstrumentRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Reconciled instrument list produced once per analysis session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusResult {
    /// One entry per identity that met quorum, in first-appearance order
    pub instruments: Vec<InstrumentPart>,
    /// Results that contributed at least one instrument
    #[serde(default)]
    pub contributing: usize,
    /// Occurrences required to retain an identity
    #[serde(default)]
    pub threshold: usize,
    /// Identities seen but not corroborated, with their occurrence counts
    #[serde(skip)]
    pub rejected: Vec<(IdentityKey, usize)>,
}

impl ConsensusResult {
    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    /// Parts in the record shape the splitter consumes
    pub fn records(&self) -> Vec<InstrumentRecord> {
        self.instruments.iter().map(InstrumentRecord::from).collect()
    }
}

/// Merge several analysis results into one consensus.
///
/// Every detection is folded into the bucket of its [`IdentityKey`]. A
/// bucket survives if its occurrence count satisfies `rule` relative to the
/// number of results that contributed any instrument at all; surviving
/// buckets are resolved by [`AggregationBucket::resolve`].
///
/// # Example
///
/// ```
/// use score_domain::{AnalysisResult, InstrumentRecord, QuorumRule, aggregate_instruments};
///
/// let runs = vec![
///     AnalysisResult::new(vec![InstrumentRecord::new("Flute", None, 1, 4)]),
///     AnalysisResult::new(vec![InstrumentRecord::new("flute", None, 1, 4)]),
///     AnalysisResult::new(vec![InstrumentRecord::new("Kazoo", None, 5, 6)]),
/// ];
/// let consensus = aggregate_instruments(&runs, QuorumRule::default());
/// assert_eq!(consensus.instruments.len(), 1);
/// assert_eq!(consensus.instruments[0].name, "Flute");
/// ```
pub fn aggregate_instruments(results: &[AnalysisResult], rule: QuorumRule) -> ConsensusResult {
    let mut buckets: Vec<AggregationBucket> = Vec::new();
    let mut index: HashMap<IdentityKey, usize> = HashMap::new();
    let mut contributing = 0usize;

    for result in results {
        if !result.instruments.is_empty() {
            contributing += 1;
        }
        for record in &result.instruments {
            let key = IdentityKey::new(record.name.as_deref(), record.voice.as_deref());
            let slot = *index.entry(key.clone()).or_insert_with(|| {
                buckets.push(AggregationBucket::new(key));
                buckets.len() - 1
            });
            buckets[slot].observe(record);
        }
    }

    if contributing == 0 {
        return ConsensusResult::default();
    }

    let threshold = rule.min_support(contributing);
    let mut consensus = ConsensusResult {
        contributing,
        threshold,
        ..Default::default()
    };

    for bucket in &buckets {
        if rule.is_satisfied(bucket.count(), contributing) {
            consensus.instruments.push(bucket.resolve());
        } else {
            consensus
                .rejected
                .push((bucket.key().clone(), bucket.count()));
        }
    }

    consensus
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(records: Vec<InstrumentRecord>) -> AnalysisResult {
        AnalysisResult::new(records)
    }

    #[test]
    fn test_quorum_retains_two_of_three() {
        let results = vec![
            run(vec![InstrumentRecord::new("Horn", None, 1, 3)]),
            run(vec![InstrumentRecord::new("Horn", None, 1, 3)]),
            run(vec![InstrumentRecord::new("Tuba", None, 4, 6)]),
        ];
        let consensus = aggregate_instruments(&results, QuorumRule::HalfRoundedUp);

        assert_eq!(consensus.threshold, 2);
        assert_eq!(consensus.contributing, 3);
        assert_eq!(consensus.instruments.len(), 1);
        assert_eq!(consensus.instruments[0].name, "Horn");
        assert_eq!(consensus.rejected.len(), 1);
        assert_eq!(consensus.rejected[0].1, 1);
    }

    #[test]
    fn test_quorum_drops_one_of_three() {
        let results = vec![
            run(vec![InstrumentRecord::new("Piccolo", None, 1, 2)]),
            run(vec![]),
            run(vec![InstrumentRecord::new("Flute", None, 1, 2)]),
            run(vec![InstrumentRecord::new("Flute", None, 1, 2)]),
        ];
        let consensus = aggregate_instruments(&results, QuorumRule::HalfRoundedUp);

        // the empty run does not contribute
        assert_eq!(consensus.contributing, 3);
        let names: Vec<_> = consensus.instruments.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Flute"]);
    }

    #[test]
    fn test_voice_variants_merge_into_one_bucket() {
        let results = vec![
            run(vec![InstrumentRecord::new("Trumpet", Some("1."), 1, 5)]),
            run(vec![InstrumentRecord::new("Trumpet", Some("1"), 1, 5)]),
        ];
        let consensus = aggregate_instruments(&results, QuorumRule::HalfRoundedUp);

        assert_eq!(consensus.instruments.len(), 1);
        assert!(consensus.rejected.is_empty());
    }

    #[test]
    fn test_endpoints_resolved_independently() {
        let results = vec![
            run(vec![InstrumentRecord::new("Violin", Some("2"), 5, 8)]),
            run(vec![InstrumentRecord::new("Violin", Some("2"), 5, 9)]),
            run(vec![InstrumentRecord::new("Violin", Some("2"), 6, 9)]),
        ];
        let consensus = aggregate_instruments(&results, QuorumRule::HalfRoundedUp);
        let part = &consensus.instruments[0];

        assert_eq!(part.start_page, 5);
        assert_eq!(part.end_page, 9);
    }

    #[test]
    fn test_two_way_tie_uses_median() {
        let results = vec![
            run(vec![InstrumentRecord::new("Cello", None, 2, 8)]),
            run(vec![InstrumentRecord::new("Cello", None, 4, 9)]),
        ];
        let consensus = aggregate_instruments(&results, QuorumRule::HalfRoundedUp);
        let part = &consensus.instruments[0];

        assert_eq!(part.start_page, 3);
        assert!(part.end_page == 8 || part.end_page == 9);
    }

    #[test]
    fn test_no_contributing_results() {
        let consensus = aggregate_instruments(&[run(vec![]), run(vec![])], QuorumRule::default());
        assert!(consensus.is_empty());
        assert_eq!(consensus.contributing, 0);

        assert!(aggregate_instruments(&[], QuorumRule::default()).is_empty());
    }

    #[test]
    fn test_first_appearance_order() {
        let results = vec![
            run(vec![
                InstrumentRecord::new("Oboe", None, 3, 4),
                InstrumentRecord::new("Flute", None, 1, 2),
            ]),
            run(vec![
                InstrumentRecord::new("Flute", None, 1, 2),
                InstrumentRecord::new("Oboe", None, 3, 4),
            ]),
        ];
        let consensus = aggregate_instruments(&results, QuorumRule::default());
        let names: Vec<_> = consensus.instruments.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Oboe", "Flute"]);
    }

    #[test]
    fn test_stricter_rule() {
        let results = vec![
            run(vec![InstrumentRecord::new("Horn", None, 1, 3)]),
            run(vec![InstrumentRecord::new("Horn", None, 1, 3)]),
            run(vec![InstrumentRecord::new("Bassoon", None, 4, 6)]),
        ];
        let consensus = aggregate_instruments(&results, QuorumRule::Unanimous);
        assert!(consensus.is_empty());
        assert_eq!(consensus.threshold, 3);
    }

    #[test]
    fn test_records_for_splitter() {
        let results = vec![run(vec![InstrumentRecord::new("Harp", None, 2, 3)])];
        let consensus = aggregate_instruments(&results, QuorumRule::default());
        let records = consensus.records();
        assert_eq!(records, vec![InstrumentRecord::new("Harp", None, 2, 3)]);
    }
}
