use std::collections::HashSet;

use drivefin_core::listing::Category;
use drivefin_core::types::{CatalogId, MediaKind};
use serde::Serialize;

use crate::record::{CanonicalRecord, CategoryTag};

/// Records of a combined multi-category listing, split by kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BucketedRecords {
    pub movies: Vec<CanonicalRecord>,
    pub series: Vec<CanonicalRecord>,
}

/// Tag every record with its category and route it by the category's kind.
///
/// A record whose `tmdb_id` is already in its bucket is dropped, so the first
/// occurrence in input order wins.
pub fn bucket_by_type(categories: Vec<Category<CanonicalRecord>>) -> BucketedRecords {
    let mut buckets = BucketedRecords::default();
    let mut seen_movies: HashSet<CatalogId> = HashSet::new();
    let mut seen_series: HashSet<CatalogId> = HashSet::new();

    for category in categories {
        let tag = CategoryTag {
            id: category.id,
            name: category.name,
        };
        let (bucket, seen) = match category.kind {
            MediaKind::Movies => (&mut buckets.movies, &mut seen_movies),
            MediaKind::Series => (&mut buckets.series, &mut seen_series),
        };

        for mut record in category.metadata {
            record.set_category(tag.clone());
            if seen.insert(record.tmdb_id()) {
                bucket.push(record);
            }
        }
    }

    buckets
}
