//! Pieces shared by the movie and series engines.
//!
//! Both engines work strictly one entry at a time and never fail as a whole:
//! an entry that can't be matched or fetched lands in
//! [`Reconciled::skipped`] and the rest of the listing carries on.

use drivefin_core::listing::RawEntry;
use drivefin_core::types::{CatalogId, MediaKind};
use drivefin_scanner::{ParsedName, normalize, parse_name};
use serde::Serialize;
use tracing::{debug, warn};

use crate::provider::{CatalogProvider, LookupMode};
use crate::MetadataError;

pub const DEFAULT_API_PREFIX: &str = "/api/v1";

/// Settings the engines need from the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileConfig {
    /// Base path of the API that serves thumbnails.
    pub api_prefix: String,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            api_prefix: DEFAULT_API_PREFIX.to_string(),
        }
    }
}

impl ReconcileConfig {
    pub fn thumbnail_path(&self, file_id: &str) -> String {
        format!(
            "{}/assets/thumbnail/{file_id}",
            self.api_prefix.trim_end_matches('/')
        )
    }
}

/// Output of one engine run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reconciled<R> {
    pub records: Vec<R>,
    pub skipped: Vec<SkippedEntry>,
}

impl<R> Default for Reconciled<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

/// A listing entry that produced no record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEntry {
    /// Name as it appeared in the listing.
    pub name: String,
    /// Title that was searched for.
    pub title: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum SkipReason {
    NotFound,
    Provider(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => f.write_str("no catalog match"),
            Self::Provider(msg) => write!(f, "provider error: {msg}"),
        }
    }
}

impl From<MetadataError> for SkipReason {
    fn from(e: MetadataError) -> Self {
        match e {
            MetadataError::NotFound => Self::NotFound,
            other => Self::Provider(other.to_string()),
        }
    }
}

impl SkippedEntry {
    pub(crate) fn new(entry: &RawEntry, parsed: &ParsedName, reason: SkipReason) -> Self {
        Self {
            name: entry.name.clone(),
            title: parsed.title.clone(),
            reason,
        }
    }
}

/// Normalize and parse a listing name.
pub(crate) fn parse_entry(entry: &RawEntry, kind: MediaKind) -> ParsedName {
    let cleaned = normalize(&entry.name);
    let parsed = parse_name(&cleaned, kind);
    debug!(
        original = %entry.name,
        cleaned = %cleaned,
        title = %parsed.title,
        year = %parsed.year,
        "parsed listing name"
    );
    parsed
}

/// Look a title up, treating provider errors as a miss.
pub(crate) async fn find_id(
    provider: &dyn CatalogProvider,
    title: &str,
    kind: MediaKind,
    mode: LookupMode,
) -> Option<CatalogId> {
    match provider.find_media_id(title, kind, mode).await {
        Ok(id) => id,
        Err(e) => {
            warn!(
                provider = provider.name(),
                title,
                ?mode,
                error = %e,
                "catalog search failed"
            );
            None
        }
    }
}

/// Leading four digits of a `YYYY-MM-DD` date; absent for anything else.
pub(crate) fn year_from_date(date: &str) -> Option<i32> {
    date.get(..4)
        .filter(|y| y.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|y| y.parse().ok())
        .filter(|y| *y != 0)
}
