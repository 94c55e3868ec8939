//! Statement extraction - locates SELECT fills and DELETE ADJACENT DUPLICATES

use std::ops::Range;

use tracing::trace;

use super::patterns::{DELETE_DUPLICATES_STMT, FILL_TABLE, SELECT_DISTINCT, SELECT_STMT};
use super::target::{resolve_target, TargetName};

/// A SELECT statement that fills an internal table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementCandidate {
    pub target: TargetName,
    pub start: usize,
    pub end: usize,
    pub has_distinct: bool,
    pub text: String,
}

impl StatementCandidate {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// A DELETE ADJACENT DUPLICATES statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeduplicationStatement {
    pub target: TargetName,
    pub start: usize,
    pub end: usize,
}

/// Statements found in one unit, each list in source order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub candidates: Vec<StatementCandidate>,
    pub deduplications: Vec<DeduplicationStatement>,
}

/// Finds statement boundaries in raw source text
pub trait StatementExtractor: Send + Sync {
    fn extract(&self, source: &str) -> Extraction;
}

/// Regex-based extractor: a statement runs from its keyword to the next period
///
/// Periods inside string literals and comments end a statement too.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalExtractor;

impl LexicalExtractor {
    fn candidates(&self, source: &str) -> Vec<StatementCandidate> {
        SELECT_STMT
            .find_iter(source)
            .filter_map(|m| {
                let text = m.as_str();
                let Some(caps) = FILL_TABLE.captures(text) else {
                    trace!(offset = m.start(), "SELECT without table target skipped");
                    return None;
                };
                let target = resolve_target(&caps)?;
                Some(StatementCandidate {
                    target,
                    start: m.start(),
                    end: m.end(),
                    has_distinct: SELECT_DISTINCT.is_match(text),
                    text: text.to_string(),
                })
            })
            .collect()
    }

    fn deduplications(&self, source: &str) -> Vec<DeduplicationStatement> {
        DELETE_DUPLICATES_STMT
            .captures_iter(source)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let target = resolve_target(&caps)?;
                Some(DeduplicationStatement {
                    target,
                    start: whole.start(),
                    end: whole.end(),
                })
            })
            .collect()
    }
}

impl StatementExtractor for LexicalExtractor {
    fn extract(&self, source: &str) -> Extraction {
        Extraction {
            candidates: self.candidates(source),
            deduplications: self.deduplications(source),
        }
    }
}
