//! Output formatting

use distinctlint_core::{Finding, RuleInfo, SourceUnit};
use miette::{Diagnostic, IntoDiagnostic, NamedSource, Report, Result, SourceSpan};
use thiserror::Error;

use crate::args::OutputFormat;

/// Output formatter for findings of one input file
pub struct OutputFormatter {
    format: OutputFormat,
    file_name: String,
}

/// A finding rendered through miette's graphical handler
#[derive(Debug, Error, Diagnostic)]
#[error("{location}: {message}")]
#[diagnostic(code(distinctlint::use_select_distinct))]
struct FindingReport {
    location: String,
    message: String,
    #[source_code]
    source_code: NamedSource<String>,
    #[label("table filled here without DISTINCT")]
    span: Option<SourceSpan>,
    #[help]
    help: String,
}

impl FindingReport {
    fn new(file_name: &str, unit: &SourceUnit, finding: &Finding) -> Self {
        let mut location = format!("{}:{}", file_name, finding.starting_line);
        if let Some(block) = finding.blockname.as_deref().filter(|b| !b.is_empty()) {
            location.push_str(&format!(" ({} {})", finding.types, block));
        }
        Self {
            location,
            message: finding.message.clone(),
            source_code: NamedSource::new(&unit.inc_name, unit.code.clone()),
            span: finding.span.map(SourceSpan::from),
            help: finding.suggestion.trim_end().to_string(),
        }
    }
}

impl OutputFormatter {
    pub fn new(format: OutputFormat, file_name: String) -> Self {
        Self { format, file_name }
    }

    /// Print findings of the given units in the configured format
    pub fn print_findings(&self, units: &[SourceUnit]) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                self.print_human(units);
                Ok(())
            }
            OutputFormat::Json => self.print_json(units),
            OutputFormat::Sarif => self.print_sarif(units),
        }
    }

    fn print_human(&self, units: &[SourceUnit]) {
        for unit in units {
            for finding in unit.findings() {
                let report = Report::new(FindingReport::new(&self.file_name, unit, finding));
                eprintln!("{:?}", report);
            }
        }
    }

    fn print_json(&self, units: &[SourceUnit]) -> Result<()> {
        let findings: Vec<&Finding> = units.iter().flat_map(|u| u.findings()).collect();
        let output = serde_json::json!({
            "file": self.file_name,
            "findings": findings
        });
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
        Ok(())
    }

    fn print_sarif(&self, units: &[SourceUnit]) -> Result<()> {
        let results: Vec<serde_json::Value> = units
            .iter()
            .flat_map(|u| u.findings())
            .map(|f| {
                serde_json::json!({
                    "ruleId": f.issues_type.name(),
                    "level": f.severity.sarif_level(),
                    "message": {
                        "text": f.message
                    },
                    "locations": [{
                        "physicalLocation": {
                            "artifactLocation": {
                                "uri": self.file_name
                            },
                            "region": {
                                "startLine": f.starting_line,
                                "endLine": f.ending_line,
                                "snippet": { "text": f.snippet }
                            }
                        },
                        "logicalLocations": [{
                            "name": f.blockname.clone().unwrap_or_default(),
                            "fullyQualifiedName": format!("{}/{}", f.prog_name, f.incl_name)
                        }]
                    }],
                    "fixes": [{
                        "description": { "text": f.suggestion }
                    }]
                })
            })
            .collect();

        let rule = RuleInfo::current();
        let sarif = serde_json::json!({
            "$schema": "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json",
            "version": "2.1.0",
            "runs": [{
                "tool": {
                    "driver": {
                        "name": "distinctlint",
                        "version": env!("CARGO_PKG_VERSION"),
                        "rules": [sarif_rule(&rule)]
                    }
                },
                "results": results
            }]
        });

        println!("{}", serde_json::to_string_pretty(&sarif).into_diagnostic()?);
        Ok(())
    }
}

/// SARIF `reportingDescriptor` for the rule
fn sarif_rule(rule: &RuleInfo) -> serde_json::Value {
    serde_json::json!({
        "id": rule.issue.name(),
        "name": format!("rule-{}", rule.number),
        "shortDescription": { "text": rule.title },
        "defaultConfiguration": { "level": rule.severity.sarif_level() },
        "properties": { "version": rule.version }
    })
}
