//! distinctlint-core: ABAP static analysis library
//!
//! Flags `SELECT` statements that fill an internal table which is later
//! deduplicated with `DELETE ADJACENT DUPLICATES`, where `SELECT DISTINCT`
//! would have done the job at the database.

pub mod analyzer;
pub mod error;
pub mod rule;
pub mod types;

pub use analyzer::{Analyzer, LexicalExtractor, StatementExtractor, TargetName};
pub use error::{InputError, IssueKind, Severity, Span};
pub use rule::{HealthStatus, RuleInfo};
pub use types::{Finding, ScanOutput, SourceUnit, UnitInput};
