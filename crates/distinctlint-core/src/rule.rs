//! Rule metadata and liveness acknowledgment

use serde::{Deserialize, Serialize};

use crate::error::{IssueKind, Severity};

/// Static description of the rule implemented by this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleInfo {
    pub number: u32,
    pub version: &'static str,
    pub title: &'static str,
    pub issue: IssueKind,
    pub severity: Severity,
}

impl RuleInfo {
    pub const fn current() -> Self {
        Self {
            number: 727,
            version: "2.1",
            title: "Replace DELETE ADJACENT DUPLICATES with SELECT DISTINCT",
            issue: IssueKind::UseSelectDistinct,
            severity: Severity::Error,
        }
    }

    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            ok: true,
            rule: self.number,
            version: self.version.to_string(),
        }
    }
}

/// Liveness probe answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub ok: bool,
    pub rule: u32,
    pub version: String,
}
