//! Pattern search and status filtering.
//!
//! Search is evaluated on every keystroke, so it never mutates or caches:
//! each call walks the slice and returns matches in slice order.

use std::fmt;

use crate::error::CoreError;
use crate::pattern::Pattern;
use crate::status::PatternStatus;

/// Lower-case a query for matching. Returns `None` for blank input.
pub fn normalize_query(query: &str) -> Option<String> {
    if query.trim().is_empty() {
        None
    } else {
        Some(query.to_lowercase())
    }
}

/// Case-insensitive substring search over pattern id or part number.
///
/// A blank query matches everything.
pub fn search_patterns<'a>(patterns: &'a [Pattern], query: &str) -> Vec<&'a Pattern> {
    match normalize_query(query) {
        None => patterns.iter().collect(),
        Some(needle) => patterns
            .iter()
            .filter(|p| p.matches_lowercase(&needle))
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Status filter
// ---------------------------------------------------------------------------

/// Status filter offered next to the search box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(PatternStatus),
}

impl StatusFilter {
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        PatternStatus::from_str(s).map(Self::Only)
    }

    pub fn accepts(&self, pattern: &Pattern) -> bool {
        match self {
            Self::All => true,
            Self::Only(status) => pattern.status() == *status,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.pad("All"),
            Self::Only(status) => fmt::Display::fmt(status, f),
        }
    }
}

/// Keep only patterns accepted by `filter`, preserving order.
pub fn filter_by_status<'a>(patterns: Vec<&'a Pattern>, filter: StatusFilter) -> Vec<&'a Pattern> {
    patterns.into_iter().filter(|p| filter.accepts(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_patterns;
    use chrono::NaiveDate;

    fn patterns() -> Vec<Pattern> {
        seed_patterns(NaiveDate::from_ymd_opt(2024, 1, 25).unwrap()).unwrap()
    }

    fn ids(found: &[&Pattern]) -> Vec<String> {
        found.iter().map(|p| p.id().to_string()).collect()
    }

    #[test]
    fn blank_query_returns_everything_in_order() {
        let all = patterns();
        for query in ["", "   ", "\t"] {
            let found = search_patterns(&all, query);
            assert_eq!(found.len(), all.len());
            assert_eq!(found[0].id(), "PTN001");
            assert_eq!(found[9].id(), "PTN010");
        }
    }

    #[test]
    fn matches_id_case_insensitively() {
        let all = patterns();
        assert_eq!(ids(&search_patterns(&all, "ptn00")).len(), 9);
        assert_eq!(ids(&search_patterns(&all, "PTN010")), vec!["PTN010"]);
    }

    #[test]
    fn matches_part_number() {
        let all = patterns();
        assert_eq!(ids(&search_patterns(&all, "engine")), vec!["PTN009"]);
        assert_eq!(ids(&search_patterns(&all, "Gear-tr")), vec!["PTN002"]);
    }

    #[test]
    fn query_is_not_trimmed_before_matching() {
        let all = patterns();
        assert!(search_patterns(&all, " gear").is_empty());
    }

    #[test]
    fn no_match_is_empty() {
        assert!(search_patterns(&patterns(), "crankshaft").is_empty());
    }

    #[test]
    fn status_filter_parses() {
        assert_eq!(StatusFilter::from_str("ALL").unwrap(), StatusFilter::All);
        assert_eq!(
            StatusFilter::from_str("warning").unwrap(),
            StatusFilter::Only(PatternStatus::Warning)
        );
        assert!(StatusFilter::from_str("bad").is_err());
    }

    #[test]
    fn filter_applies_after_search() {
        let all = patterns();
        let found = filter_by_status(
            search_patterns(&all, "ptn"),
            StatusFilter::Only(PatternStatus::Good),
        );
        assert!(found.iter().all(|p| p.status() == PatternStatus::Good));
        assert_eq!(ids(&found), vec!["PTN001", "PTN004", "PTN005", "PTN007", "PTN009"]);
    }
}
