//! Filter view — the visible subset of the catalog for a search and status selector.

use std::fmt;

use serde::{Deserialize, Deserializer};

use super::catalog::{MockupRecord, MockupStatus};

/// Status selector: every record, or only one status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(MockupStatus),
}

impl StatusFilter {
    /// Parse `"All"` (any case) or a status label/slug. A blank selector means `All`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
            return Some(Self::All);
        }
        MockupStatus::parse(raw).map(Self::Only)
    }

    #[must_use]
    pub fn matches(self, status: MockupStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Only(status) => fmt::Display::fmt(status, f),
        }
    }
}

impl<'de> Deserialize<'de> for StatusFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("unknown status filter: {raw}")))
    }
}

/// Records matching both the status filter and the search term, in catalog order.
///
/// An empty search term matches everything; otherwise the term must appear in
/// the title or description, ignoring case.
#[must_use]
pub fn visible(records: &[MockupRecord], search_term: &str, status_filter: StatusFilter) -> Vec<MockupRecord> {
    let needle = search_term.to_lowercase();
    records
        .iter()
        .filter(|r| status_filter.matches(r.status))
        .filter(|r| {
            needle.is_empty()
                || r.title.to_lowercase().contains(&needle)
                || r.description.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
