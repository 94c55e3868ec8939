//! Compiled statement patterns, shared read-only by every scan

use std::sync::LazyLock;

use regex::Regex;

/// Target itab token after `TABLE` / `FROM`:
/// `@lt_tab`, `lt_tab`, `@DATA(lt_tab)`, `DATA(lt_tab)`, `<lt_tab>`, `(lt_tab)`
macro_rules! target_token {
    () => {
        r"@?\s*
        (?:
            DATA\s*\(\s*(?P<data>\w+)\s*\)
            |
            <\s*(?P<fs>\w+)\s*>
            |
            \(\s*(?P<dyn>\w+)\s*\)
            |
            (?P<plain>\w+)
        )"
    };
}

/// One SELECT statement up to its terminating period
pub(crate) static SELECT_STMT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)\bSELECT\b[^.]*\.").expect("valid SELECT pattern"));

/// `SELECT DISTINCT` inside a statement
pub(crate) static SELECT_DISTINCT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bSELECT\b\s+DISTINCT\b").expect("valid DISTINCT pattern")
});

/// `INTO [CORRESPONDING FIELDS OF] TABLE <target>` or `INTO APPENDING TABLE <target>`
pub(crate) static FILL_TABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?isx)
        \bINTO\s+
        (?:
            (?:CORRESPONDING\s+FIELDS\s+OF\s+)?TABLE
            |
            APPENDING\s+TABLE
        )
        \s+",
        target_token!()
    ))
    .expect("valid fill clause pattern")
});

/// `DELETE ADJACENT DUPLICATES FROM <target> [COMPARING ...].`
pub(crate) static DELETE_DUPLICATES_STMT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?isx)
        \bDELETE\s+ADJACENT\s+DUPLICATES\s+FROM\s+",
        target_token!(),
        r"[^.]*\."
    ))
    .expect("valid DELETE ADJACENT DUPLICATES pattern")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_stops_at_period() {
        let src = "SELECT *\n  FROM t\n  INTO TABLE lt. WRITE x.";
        let m = SELECT_STMT.find(src).unwrap();
        assert_eq!(m.as_str(), "SELECT *\n  FROM t\n  INTO TABLE lt.");
    }

    #[test]
    fn test_select_keyword_needs_word_boundary() {
        assert!(SELECT_STMT.find("lv_selected = 1.").is_none());
    }

    #[test]
    fn test_fill_clause_variants() {
        for stmt in [
            "SELECT * FROM t INTO TABLE lt.",
            "select * from t into corresponding fields of table lt.",
            "SELECT * FROM t INTO APPENDING TABLE lt.",
        ] {
            assert!(FILL_TABLE.is_match(stmt), "no fill clause in {stmt}");
        }
        for stmt in [
            "SELECT SINGLE f FROM t INTO @lv_f.",
            "SELECT * FROM t APPENDING TABLE lt.",
            "SELECT * FROM t APPENDING CORRESPONDING FIELDS OF TABLE lt.",
        ] {
            assert!(!FILL_TABLE.is_match(stmt), "unexpected fill clause in {stmt}");
        }
    }

    #[test]
    fn test_distinct_detection() {
        assert!(SELECT_DISTINCT.is_match("select\n  distinct * from t."));
        assert!(!SELECT_DISTINCT.is_match("SELECT * FROM t WHERE distinct_flag = 'X'."));
    }

    #[test]
    fn test_delete_statement_spans_to_period() {
        let src = "DELETE ADJACENT DUPLICATES FROM lt\n COMPARING f1 f2.";
        let m = DELETE_DUPLICATES_STMT.find(src).unwrap();
        assert_eq!(m.end(), src.len());
    }
}
