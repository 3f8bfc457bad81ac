use drivefin_core::types::{CatalogId, MediaKind};

use crate::{CatalogDetail, MetadataError};

/// How hard the provider should try.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LookupMode {
    /// Straight API search and detail calls.
    #[default]
    Api,
    /// Looser matching used as a second attempt after an API miss.
    Lenient,
}

/// A catalog that can resolve titles to ids and fetch detail records.
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Resolve a free-text title. `Ok(None)` means "not in the catalog".
    async fn find_media_id(
        &self,
        title: &str,
        kind: MediaKind,
        mode: LookupMode,
    ) -> Result<Option<CatalogId>, MetadataError>;

    /// Fetch the full record. For series, per-season episode lists are
    /// available through [`CatalogDetail::episodes_for`].
    async fn get_details(
        &self,
        id: CatalogId,
        kind: MediaKind,
        mode: LookupMode,
    ) -> Result<CatalogDetail, MetadataError>;
}
