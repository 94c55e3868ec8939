//! Pair matcher - ties each DELETE ADJACENT DUPLICATES to its SELECT

use tracing::trace;

use super::extractor::{DeduplicationStatement, Extraction, StatementCandidate};

/// A non-DISTINCT SELECT followed by a deduplication of the same table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchedPair<'a> {
    pub query: &'a StatementCandidate,
    pub deduplication: &'a DeduplicationStatement,
}

/// The candidate on the same table that ends last before `dedup` starts
pub fn nearest_preceding<'a>(
    candidates: &'a [StatementCandidate],
    dedup: &DeduplicationStatement,
) -> Option<&'a StatementCandidate> {
    candidates
        .iter()
        .filter(|c| c.target == dedup.target && c.end < dedup.start)
        .max_by_key(|c| c.end)
}

/// Pair every deduplication with its nearest preceding SELECT
///
/// Candidates are not consumed, so one SELECT followed by several deletions
/// of the same table is reported once per deletion.
pub fn match_pairs(extraction: &Extraction) -> Vec<MatchedPair<'_>> {
    extraction
        .deduplications
        .iter()
        .filter_map(|dedup| {
            let query = nearest_preceding(&extraction.candidates, dedup)?;
            if query.has_distinct {
                trace!(
                    table = %dedup.target,
                    query = %query.text,
                    "DISTINCT SELECT, pair skipped"
                );
                return None;
            }
            trace!(table = %dedup.target, query = %query.text, "paired with deletion");
            Some(MatchedPair {
                query,
                deduplication: dedup,
            })
        })
        .collect()
}
