//! Listing-to-catalog pipeline behind the `drivefin` binary.

use drivefin_core::listing::{Category, RawEntry};
use drivefin_core::types::MediaKind;
use drivefin_metadata::{
    BucketedRecords, CanonicalRecord, CatalogProvider, ReconcileConfig, SkippedEntry,
    bucket_by_type, reconcile_movies, reconcile_series,
};
use serde::Deserialize;
use tracing::{info, warn};

/// One user-configured category of the input listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingCategory {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    #[serde(default)]
    pub entries: Vec<RawEntry>,
}

/// Run every category through its engine, then bucket the results by kind.
pub async fn reconcile_listing(
    provider: &dyn CatalogProvider,
    listing: Vec<ListingCategory>,
    config: &ReconcileConfig,
) -> BucketedRecords {
    let mut categories = Vec::with_capacity(listing.len());

    for category in listing {
        info!(
            category = %category.name,
            kind = %category.kind,
            entries = category.entries.len(),
            "reconciling category"
        );

        let (metadata, skipped): (Vec<CanonicalRecord>, Vec<SkippedEntry>) = match category.kind
        {
            MediaKind::Movies => {
                let out = reconcile_movies(provider, &category.entries, config).await;
                (out.records.into_iter().map(Into::into).collect(), out.skipped)
            }
            MediaKind::Series => {
                let out = reconcile_series(provider, &category.entries, config).await;
                (out.records.into_iter().map(Into::into).collect(), out.skipped)
            }
        };

        for entry in &skipped {
            warn!(
                category = %category.name,
                name = %entry.name,
                title = %entry.title,
                reason = %entry.reason,
                "entry skipped"
            );
        }

        categories.push(Category {
            id: category.id,
            name: category.name,
            kind: category.kind,
            metadata,
        });
    }

    bucket_by_type(categories)
}
