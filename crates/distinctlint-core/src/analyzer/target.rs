//! Target resolver - canonical internal table names

use std::fmt;

use regex::Captures;

/// Capture slots of the target token, in precedence order
const TARGET_SLOTS: [&str; 4] = ["data", "fs", "dyn", "plain"];

/// Case-folded internal table name used to compare statements
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetName(String);

impl TargetName {
    pub fn new(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            None
        } else {
            Some(Self(raw.to_lowercase()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolve the table named by a matched target token
///
/// Returns the first non-empty slot among inline declaration, field symbol,
/// dynamic and plain spellings. `None` means the token named nothing usable.
pub fn resolve_target(caps: &Captures<'_>) -> Option<TargetName> {
    TARGET_SLOTS
        .iter()
        .filter_map(|slot| caps.name(slot))
        .map(|m| m.as_str())
        .find(|s| !s.is_empty())
        .and_then(TargetName::new)
}
