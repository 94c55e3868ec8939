//! Finding builder - locates a matched pair and renders its remediation

use crate::error::{line_of_offset, IssueKind, Severity, Span};
use crate::types::{Finding, SourceUnit};

use super::matcher::MatchedPair;
use super::target::TargetName;

/// The physical line of `source` that contains `offset`, without its newline
pub fn line_at(source: &str, offset: usize) -> &str {
    let offset = offset.min(source.len());
    let line_start = source[..offset].rfind('\n').map_or(0, |i| i + 1);
    let line_end = source[offset..]
        .find('\n')
        .map_or(source.len(), |i| offset + i);
    &source[line_start..line_end]
}

/// Escape line breaks so a snippet renders on one line
pub fn escape_snippet(snippet: &str) -> String {
    snippet.replace('\n', "\\n")
}

pub fn message(target: &TargetName) -> String {
    format!(
        "SELECT fills '{}' followed by DELETE ADJACENT DUPLICATES. Prefer SELECT DISTINCT.",
        target
    )
}

pub fn suggestion(target: &TargetName) -> String {
    format!(
        "* Replace the SELECT that fills `{t}` with DISTINCT and remove the DELETE step.\n\n\
         Example rewrite:\n  \
         SELECT DISTINCT ...\n    \
         INTO TABLE {t}.\n  \
         \" DELETE ADJACENT DUPLICATES FROM {t}.  \" <-- remove\n",
        t = target
    )
}

/// Build the finding for a pair, anchored on the SELECT
pub fn build_finding(unit: &SourceUnit, pair: &MatchedPair<'_>) -> Finding {
    let source = unit.code.as_str();
    let query = pair.query;
    let target = &pair.deduplication.target;

    let line_in_unit = line_of_offset(source, query.start);
    let snippet = line_at(source, query.start);
    let snippet_lines = snippet.matches('\n').count() + 1;

    let starting_line = unit.line_offset() + line_in_unit;

    Finding {
        prog_name: unit.pgm_name.clone(),
        incl_name: unit.inc_name.clone(),
        types: unit.kind.clone(),
        blockname: unit.name.clone(),
        starting_line,
        ending_line: starting_line + snippet_lines,
        issues_type: IssueKind::UseSelectDistinct,
        severity: Severity::Error,
        message: message(target),
        suggestion: suggestion(target),
        snippet: escape_snippet(snippet),
        span: Some(Span::from_range(source, query.start, query.end)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_at_first_middle_last() {
        let src = "one\ntwo\nthree";
        assert_eq!(line_at(src, 0), "one");
        assert_eq!(line_at(src, 5), "two");
        assert_eq!(line_at(src, 9), "three");
        assert_eq!(line_at(src, src.len()), "three");
    }

    #[test]
    fn test_line_at_trailing_newline() {
        assert_eq!(line_at("abc\n", 1), "abc");
    }

    #[test]
    fn test_suggestion_template() {
        let t = TargetName::new("lt_tab").unwrap();
        let text = suggestion(&t);
        assert!(text.starts_with("* Replace the SELECT that fills `lt_tab` with DISTINCT"));
        assert!(text.contains("\n    INTO TABLE lt_tab.\n"));
        assert!(text.ends_with("\" DELETE ADJACENT DUPLICATES FROM lt_tab.  \" <-- remove\n"));
    }

    #[test]
    fn test_escape_snippet() {
        assert_eq!(escape_snippet("a\nb"), "a\\nb");
    }
}
