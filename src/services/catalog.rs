//! Catalog service — mockup records, registration, and status changes.
//!
//! DESIGN
//! ======
//! The catalog is an ordered `Vec` with the most recently created record
//! first. Records are only ever prepended (on create) or edited in place
//! (on status change); nothing is removed. Both mutations take the current
//! date from the caller so they stay deterministic under test.
//!
//! Invalid input is a no-op, not an error: `create` without a title or URL
//! and `change_status` on an unknown id return `None` and leave the catalog
//! untouched.

use std::fmt;

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use tracing::{debug, info};
use uuid::Uuid;

pub const DEFAULT_DESCRIPTION: &str = "No description provided.";
pub const DEFAULT_TAG: &str = "General";
pub const DEFAULT_AUTHOR: &str = "Lead Architect";
pub const DEFAULT_VERSION: &str = "1.0.0";

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

// =============================================================================
// STATUS
// =============================================================================

/// Lifecycle stage of a mockup. Serialized as its display label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MockupStatus {
    #[default]
    #[serde(rename = "In Design", alias = "in_design")]
    InDesign,
    #[serde(rename = "In Review", alias = "in_review")]
    InReview,
    #[serde(rename = "In Development", alias = "in_development")]
    InDevelopment,
    #[serde(rename = "Archived", alias = "archived")]
    Archived,
}

impl MockupStatus {
    pub const ALL: [Self; 4] = [Self::InDesign, Self::InReview, Self::InDevelopment, Self::Archived];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::InDesign => "In Design",
            Self::InReview => "In Review",
            Self::InDevelopment => "In Development",
            Self::Archived => "Archived",
        }
    }

    /// Parse a display label (`"In Review"`) or slug (`in_review`, `in-review`),
    /// ignoring case.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized: String = raw
            .trim()
            .chars()
            .map(|c| if c == '_' || c == '-' { ' ' } else { c.to_ascii_lowercase() })
            .collect();
        Self::ALL
            .into_iter()
            .find(|s| s.label().to_ascii_lowercase() == normalized)
    }
}

impl fmt::Display for MockupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// RECORD
// =============================================================================

/// One mockup entry in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockupRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: MockupStatus,
    pub url: String,
    /// Linked work item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azure_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs_url: Option<String>,
    #[serde(with = "iso_date")]
    pub last_updated: Date,
    pub author: String,
    pub version: String,
    pub tags: Vec<String>,
}

/// Registration input. Optional fields may be absent or blank.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewMockup {
    pub title: String,
    pub description: Option<String>,
    pub status: MockupStatus,
    pub url: String,
    pub azure_url: Option<String>,
    pub docs_url: Option<String>,
    pub tags: Vec<String>,
}

/// Per-status record counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub total: usize,
    pub in_design: usize,
    pub in_review: usize,
    pub in_development: usize,
    pub archived: usize,
}

// =============================================================================
// CATALOG
// =============================================================================

/// Ordered collection of mockup records, newest first.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<MockupRecord>,
}

impl Catalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_records(records: Vec<MockupRecord>) -> Self {
        Self { records }
    }

    /// Catalog pre-populated with the demonstration records.
    #[must_use]
    pub fn seeded() -> Self {
        Self::with_records(seed_records())
    }

    #[must_use]
    pub fn records(&self) -> &[MockupRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&MockupRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Register a new mockup at the front of the catalog.
    ///
    /// Returns `None` without touching the catalog when `title` or `url` is blank.
    pub fn create(&mut self, input: NewMockup, today: Date) -> Option<MockupRecord> {
        let has_title = !input.title.trim().is_empty();
        let has_url = !input.url.trim().is_empty();
        if !has_title || !has_url {
            debug!(has_title, has_url, "catalog: create skipped");
            return None;
        }

        let mut tags: Vec<String> = input
            .tags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        if tags.is_empty() {
            tags.push(DEFAULT_TAG.to_string());
        }

        let record = MockupRecord {
            id: new_record_id(),
            title: input.title,
            description: non_blank(input.description).unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            status: input.status,
            url: input.url,
            azure_url: non_blank(input.azure_url),
            docs_url: non_blank(input.docs_url),
            last_updated: today,
            author: DEFAULT_AUTHOR.to_string(),
            version: DEFAULT_VERSION.to_string(),
            tags,
        };

        info!(id = %record.id, title = %record.title, status = %record.status, "catalog: record created");
        self.records.insert(0, record.clone());
        Some(record)
    }

    /// Move a record to `status`, refreshing its `last_updated` date.
    ///
    /// The date never moves backwards. Returns `None` for an unknown id.
    pub fn change_status(&mut self, id: &str, status: MockupStatus, today: Date) -> Option<MockupRecord> {
        let Some(record) = self.records.iter_mut().find(|r| r.id == id) else {
            debug!(%id, "catalog: status change for unknown record");
            return None;
        };

        let previous = record.status;
        record.status = status;
        record.last_updated = record.last_updated.max(today);

        info!(%id, from = %previous, to = %status, "catalog: status changed");
        Some(record.clone())
    }

    #[must_use]
    pub fn status_counts(&self) -> StatusCounts {
        let mut counts = StatusCounts { total: self.records.len(), ..StatusCounts::default() };
        for record in &self.records {
            match record.status {
                MockupStatus::InDesign => counts.in_design += 1,
                MockupStatus::InReview => counts.in_review += 1,
                MockupStatus::InDevelopment => counts.in_development += 1,
                MockupStatus::Archived => counts.archived += 1,
            }
        }
        counts
    }
}

/// Current UTC calendar date.
#[must_use]
pub fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

fn new_record_id() -> String {
    Uuid::new_v4().simple().to_string()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// =============================================================================
// SEED DATA
// =============================================================================

/// Demonstration records loaded at startup unless seeding is disabled.
#[must_use]
pub fn seed_records() -> Vec<MockupRecord> {
    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|t| (*t).to_string()).collect()
    }

    vec![
        MockupRecord {
            id: "1".into(),
            title: "VDC Global Dashboard".into(),
            description: "The main command center for visualizing spatial data and real-time sensor updates.".into(),
            status: MockupStatus::InDevelopment,
            url: "https://vdc-dashboard-mock.app".into(),
            azure_url: Some("https://dev.azure.com/vdc/project/_workitems/edit/101".into()),
            docs_url: Some("https://docs.vdc.internal/dashboard".into()),
            last_updated: time::macros::date!(2024 - 03 - 20),
            author: "Sarah Chen".into(),
            version: "2.4.0".into(),
            tags: tags(&["Dashboard", "Visualization", "Spatial"]),
        },
        MockupRecord {
            id: "2".into(),
            title: "Spatial Explorer v2".into(),
            description: "Revamped 3D explorer with better occlusion handling and point cloud rendering.".into(),
            status: MockupStatus::InReview,
            url: "https://vdc-spatial-v2.app".into(),
            azure_url: Some("https://dev.azure.com/vdc/project/_workitems/edit/105".into()),
            docs_url: Some("https://docs.vdc.internal/spatial-v2".into()),
            last_updated: time::macros::date!(2024 - 03 - 22),
            author: "Marco Rossi".into(),
            version: "1.2.0-beta".into(),
            tags: tags(&["3D", "Review", "Graphics"]),
        },
        MockupRecord {
            id: "3".into(),
            title: "Asset Management Portal".into(),
            description: "Interface for managing digital twins and physical assets within the VDC ecosystem.".into(),
            status: MockupStatus::InDesign,
            url: "https://vdc-assets.app".into(),
            azure_url: None,
            docs_url: None,
            last_updated: time::macros::date!(2024 - 03 - 24),
            author: "Emily White".into(),
            version: "0.8.0-alpha".into(),
            tags: tags(&["Assets", "Management", "CRUD"]),
        },
    ]
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
