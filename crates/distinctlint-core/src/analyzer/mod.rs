//! ABAP analyzer module

mod extractor;
mod finding;
mod matcher;
mod patterns;
mod target;

use rayon::prelude::*;
use tracing::debug;

use crate::types::{Finding, ScanOutput, SourceUnit, UnitInput};

pub use extractor::{
    DeduplicationStatement, Extraction, LexicalExtractor, StatementCandidate, StatementExtractor,
};
pub use finding::{build_finding, escape_snippet, line_at};
pub use matcher::{match_pairs, nearest_preceding, MatchedPair};
pub use target::{resolve_target, TargetName};

/// Analyzer - flags SELECTs whose result is deduplicated afterwards
///
/// Holds no per-scan state; one instance can serve any number of threads.
#[derive(Debug, Clone, Default)]
pub struct Analyzer<E = LexicalExtractor> {
    extractor: E,
}

impl Analyzer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: StatementExtractor> Analyzer<E> {
    /// Use a different statement extractor
    pub fn with_extractor(extractor: E) -> Self {
        Self { extractor }
    }

    /// Findings for one unit's code, in deletion order
    pub fn analyze(&self, unit: &SourceUnit) -> Vec<Finding> {
        let extraction = self.extractor.extract(&unit.code);
        debug!(
            program = %unit.pgm_name,
            include = %unit.inc_name,
            candidates = extraction.candidates.len(),
            deletions = extraction.deduplications.len(),
            "extracted statements"
        );

        match_pairs(&extraction)
            .iter()
            .map(|pair| build_finding(unit, pair))
            .collect()
    }

    /// Scan a single unit; the unit is always returned with its findings attached
    pub fn scan_unit(&self, unit: &SourceUnit) -> SourceUnit {
        let mut out = unit.clone();
        out.findings = Some(self.analyze(unit));
        out
    }

    /// Scan a batch, keeping only units with findings in input order
    pub fn scan_batch(&self, units: &[SourceUnit]) -> Vec<SourceUnit> {
        units
            .iter()
            .map(|u| self.scan_unit(u))
            .filter(SourceUnit::has_findings)
            .collect()
    }

    /// Same as [`Analyzer::scan_batch`], spread over the rayon pool
    pub fn scan_batch_parallel(&self, units: &[SourceUnit]) -> Vec<SourceUnit> {
        units
            .par_iter()
            .map(|u| self.scan_unit(u))
            .filter(SourceUnit::has_findings)
            .collect()
    }

    /// Apply single-unit or batch semantics depending on the input shape
    pub fn scan_input(&self, input: &UnitInput, parallel: bool) -> ScanOutput {
        match input {
            UnitInput::Single(unit) => ScanOutput::Single(Box::new(self.scan_unit(unit))),
            UnitInput::Batch(units) if parallel => {
                ScanOutput::Batch(self.scan_batch_parallel(units))
            }
            UnitInput::Batch(units) => ScanOutput::Batch(self.scan_batch(units)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{IssueKind, Severity};

    fn unit(code: &str) -> SourceUnit {
        SourceUnit::new("ZPROG", "ZPROG_F01", "FORM")
            .with_name("GET_DATA")
            .with_start_line(100)
            .with_code(code)
    }

    #[test]
    fn test_select_then_delete() {
        let analyzer = Analyzer::new();
        let findings = analyzer.analyze(&unit(
            "SELECT * FROM t INTO TABLE @lt_tab.\n\
             DELETE ADJACENT DUPLICATES FROM lt_tab COMPARING ALL FIELDS.",
        ));

        assert_eq!(findings.len(), 1);
        let f = &findings[0];
        assert_eq!(f.issues_type, IssueKind::UseSelectDistinct);
        assert_eq!(f.severity, Severity::Error);
        assert_eq!(f.starting_line, 101);
        assert_eq!(f.ending_line, 102);
        assert_eq!(f.snippet, "SELECT * FROM t INTO TABLE @lt_tab.");
        assert!(f.suggestion.contains("lt_tab"));
        assert_eq!(f.blockname.as_deref(), Some("GET_DATA"));
    }

    #[test]
    fn test_select_distinct_is_clean() {
        let analyzer = Analyzer::new();
        let findings = analyzer.analyze(&unit(
            "SELECT DISTINCT * FROM t INTO TABLE @lt_tab.\n\
             DELETE ADJACENT DUPLICATES FROM lt_tab COMPARING ALL FIELDS.",
        ));
        assert!(findings.is_empty());
    }

    #[test]
    fn test_delete_without_select() {
        let analyzer = Analyzer::new();
        let findings =
            analyzer.analyze(&unit("DELETE ADJACENT DUPLICATES FROM lt_tab COMPARING ALL FIELDS."));
        assert!(findings.is_empty());
    }

    #[test]
    fn test_scan_unit_always_returns_unit() {
        let analyzer = Analyzer::new();
        let out = analyzer.scan_unit(&unit("WRITE 'hello'."));
        assert_eq!(out.findings, Some(vec![]));
        assert_eq!(out.pgm_name, "ZPROG");
    }

    struct NoStatements;

    impl StatementExtractor for NoStatements {
        fn extract(&self, _source: &str) -> Extraction {
            Extraction::default()
        }
    }

    #[test]
    fn test_custom_extractor() {
        let analyzer = Analyzer::with_extractor(NoStatements);
        let findings = analyzer.analyze(&unit(
            "SELECT * FROM t INTO TABLE lt.\nDELETE ADJACENT DUPLICATES FROM lt.",
        ));
        assert!(findings.is_empty());
    }
}
