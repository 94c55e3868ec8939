//! Source units and findings

use serde::{Deserialize, Serialize};

use crate::error::{InputError, IssueKind, Severity, Span};

/// A block of ABAP source belonging to a program/include
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceUnit {
    pub pgm_name: String,
    pub inc_name: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Block name (method, form, ...), if any; copied to `Finding::blockname`
    /// as-is, so an absent name stays `null` rather than `""`
    #[serde(default)]
    pub name: Option<String>,
    /// Line of the full program at which this block starts
    #[serde(default)]
    pub start_line: Option<usize>,
    #[serde(default)]
    pub end_line: Option<usize>,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub findings: Option<Vec<Finding>>,
}

impl SourceUnit {
    pub fn new(
        pgm_name: impl Into<String>,
        inc_name: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            pgm_name: pgm_name.into(),
            inc_name: inc_name.into(),
            kind: kind.into(),
            name: None,
            start_line: None,
            end_line: None,
            code: String::new(),
            findings: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_start_line(mut self, line: usize) -> Self {
        self.start_line = Some(line);
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        let code = code.into();
        self.end_line = Some(self.line_offset() + code.lines().count());
        self.code = code;
        self
    }

    /// Starting line offset, treating an absent value as zero
    pub fn line_offset(&self) -> usize {
        self.start_line.unwrap_or(0)
    }

    /// Findings attached by a scan, or an empty slice
    pub fn findings(&self) -> &[Finding] {
        self.findings.as_deref().unwrap_or(&[])
    }

    pub fn has_findings(&self) -> bool {
        !self.findings().is_empty()
    }
}

/// A located rule violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub prog_name: String,
    pub incl_name: String,
    pub types: String,
    pub blockname: Option<String>,
    /// Absolute line in the full program
    pub starting_line: usize,
    pub ending_line: usize,
    pub issues_type: IssueKind,
    pub severity: Severity,
    pub message: String,
    pub suggestion: String,
    /// Source line of the offending SELECT, newlines escaped
    pub snippet: String,
    /// Location of the SELECT inside the unit's code
    #[serde(skip)]
    pub span: Option<Span>,
}

/// Analysis input: one unit or an ordered batch
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UnitInput {
    Batch(Vec<SourceUnit>),
    Single(Box<SourceUnit>),
}

impl UnitInput {
    /// Decode a JSON document holding either a unit object or an array of units
    pub fn from_json(text: &str) -> Result<Self, InputError> {
        if text.trim().is_empty() {
            return Err(InputError::Empty);
        }
        Ok(serde_json::from_str(text)?)
    }
}

/// Analysis output, shaped like the input it answers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ScanOutput {
    /// Only the units that produced findings, in input order
    Batch(Vec<SourceUnit>),
    /// The unit, always returned
    Single(Box<SourceUnit>),
}

impl ScanOutput {
    pub fn units(&self) -> &[SourceUnit] {
        match self {
            ScanOutput::Batch(units) => units,
            ScanOutput::Single(unit) => std::slice::from_ref(unit.as_ref()),
        }
    }

    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.units().iter().flat_map(|u| u.findings())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_single_unit() {
        let json = r#"{"pgm_name":"ZPROG","inc_name":"ZINC","type":"METH","code":"WRITE x."}"#;
        match UnitInput::from_json(json).unwrap() {
            UnitInput::Single(unit) => {
                assert_eq!(unit.pgm_name, "ZPROG");
                assert_eq!(unit.kind, "METH");
                assert_eq!(unit.name, None);
                assert_eq!(unit.line_offset(), 0);
            }
            other => panic!("expected single unit, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_batch_with_nulls() {
        let json = r#"[
            {"pgm_name":"A","inc_name":"A","type":"PROG","name":null,"start_line":null,"code":""},
            {"pgm_name":"B","inc_name":"B","type":"PROG","start_line":12}
        ]"#;
        match UnitInput::from_json(json).unwrap() {
            UnitInput::Batch(units) => {
                assert_eq!(units.len(), 2);
                assert_eq!(units[0].line_offset(), 0);
                assert_eq!(units[1].line_offset(), 12);
                assert!(units[1].code.is_empty());
            }
            other => panic!("expected batch, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(UnitInput::from_json("  "), Err(InputError::Empty)));
        assert!(matches!(
            UnitInput::from_json("{\"pgm_name\": 1}"),
            Err(InputError::Json(_))
        ));
    }

    #[test]
    fn test_unit_serializes_type_field() {
        let unit = SourceUnit::new("P", "I", "FORM").with_name("F1");
        let value = serde_json::to_value(&unit).unwrap();
        assert_eq!(value["type"], "FORM");
        assert_eq!(value["name"], "F1");
    }
}
