pub mod bucket;
pub mod catalog;
pub mod merge;
pub mod movies;
pub mod provider;
pub mod reconcile;
pub mod record;
pub mod series;
pub mod tmdb;

use thiserror::Error;

pub use bucket::{BucketedRecords, bucket_by_type};
pub use catalog::{CatalogDetail, ProviderEpisode};
pub use movies::reconcile_movies;
pub use provider::{CatalogProvider, LookupMode};
pub use reconcile::{ReconcileConfig, Reconciled, SkipReason, SkippedEntry};
pub use record::{CanonicalRecord, MovieRecord, SeriesRecord};
pub use series::reconcile_series;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("provider error: {0}")]
    Provider(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("not found")]
    NotFound,
    #[error("decode error: {0}")]
    Decode(String),
}
