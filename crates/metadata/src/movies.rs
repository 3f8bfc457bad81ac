//! Movie reconciliation.
//!
//! Two passes over the listing. The first searches in API mode and fetches
//! details straight away. Titles it misses are queued and searched again in
//! lenient mode once the first pass is done. Records from both passes go
//! into one list, first pass first, without deduplication.

use drivefin_core::listing::RawEntry;
use drivefin_core::types::{CatalogId, MediaKind};
use drivefin_scanner::ParsedName;
use tracing::{debug, info, warn};

use crate::merge;
use crate::provider::{CatalogProvider, LookupMode};
use crate::reconcile::{self, ReconcileConfig, Reconciled, SkipReason, SkippedEntry};
use crate::record::MovieRecord;

/// Match each movie file to the catalog.
pub async fn reconcile_movies(
    provider: &dyn CatalogProvider,
    entries: &[RawEntry],
    config: &ReconcileConfig,
) -> Reconciled<MovieRecord> {
    let mut out = Reconciled::default();
    let mut deferred: Vec<(&RawEntry, ParsedName)> = Vec::new();

    for entry in entries {
        let parsed = reconcile::parse_entry(entry, MediaKind::Movies);
        match reconcile::find_id(provider, &parsed.title, MediaKind::Movies, LookupMode::Api).await
        {
            Some(id) => {
                debug!(title = %parsed.title, year = %parsed.year, tmdb_id = %id, "movie matched");
                fetch_into(provider, entry, &parsed, id, LookupMode::Api, config, &mut out).await;
            }
            None => deferred.push((entry, parsed)),
        }
    }

    if !deferred.is_empty() {
        info!(count = deferred.len(), "using lenient search for unmatched titles");
    }

    for (entry, parsed) in deferred {
        let found =
            reconcile::find_id(provider, &parsed.title, MediaKind::Movies, LookupMode::Lenient)
                .await;
        let Some(id) = found else {
            info!(title = %parsed.title, "could not find movie id, skipping");
            out.skipped
                .push(SkippedEntry::new(entry, &parsed, SkipReason::NotFound));
            continue;
        };
        debug!(title = %parsed.title, year = %parsed.year, tmdb_id = %id, "movie matched on lenient search");
        fetch_into(provider, entry, &parsed, id, LookupMode::Lenient, config, &mut out).await;
    }

    info!(
        matched = out.records.len(),
        skipped = out.skipped.len(),
        "movie reconciliation complete"
    );
    out
}

async fn fetch_into(
    provider: &dyn CatalogProvider,
    entry: &RawEntry,
    parsed: &ParsedName,
    id: CatalogId,
    mode: LookupMode,
    config: &ReconcileConfig,
    out: &mut Reconciled<MovieRecord>,
) {
    match provider.get_details(id, MediaKind::Movies, mode).await {
        Ok(detail) => out
            .records
            .push(merge::movie_record(entry, id, detail, config)),
        Err(e) => {
            warn!(title = %parsed.title, tmdb_id = %id, error = %e, "movie detail fetch failed, skipping");
            out.skipped.push(SkippedEntry::new(entry, parsed, e.into()));
        }
    }
}
