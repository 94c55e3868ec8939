//! Error, severity and location types

use miette::SourceSpan;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Source location span within a unit's code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Byte offset from start of the unit's code
    pub offset: usize,
    /// Length in bytes
    pub length: usize,
    /// Line number within the unit (1-indexed)
    pub line: usize,
}

impl Span {
    /// Create a span covering `[start, end)` of `source`, with its line resolved
    pub fn from_range(source: &str, start: usize, end: usize) -> Self {
        Self {
            offset: start,
            length: end.saturating_sub(start),
            line: line_of_offset(source, start),
        }
    }

    pub fn end(&self) -> usize {
        self.offset + self.length
    }
}

impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        SourceSpan::new(span.offset.into(), span.length)
    }
}

/// 1-based line number of `offset`: newlines strictly before it, plus one
pub(crate) fn line_of_offset(source: &str, offset: usize) -> usize {
    source.as_bytes()[..offset.min(source.len())]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
        + 1
}

/// Finding severity level; this rule only reports errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
}

impl Severity {
    /// SARIF `level` for this severity
    pub fn sarif_level(&self) -> &'static str {
        match self {
            Severity::Error => "error",
        }
    }
}

/// Classification of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueKind {
    /// SELECT fills a table that is later passed to DELETE ADJACENT DUPLICATES
    UseSelectDistinct,
}

impl IssueKind {
    pub fn name(&self) -> &'static str {
        match self {
            IssueKind::UseSelectDistinct => "UseSelectDistinct",
        }
    }
}

/// Errors raised while decoding analysis input
///
/// Scanning itself never fails; only turning raw bytes into units can.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("invalid unit JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("input is empty")]
    Empty,
}
