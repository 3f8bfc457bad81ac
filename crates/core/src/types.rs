use serde::{Deserialize, Serialize};

/// Which catalog a listing, category or record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    #[serde(alias = "movie")]
    Movies,
    #[serde(alias = "tv", alias = "tv_shows")]
    Series,
}

impl MediaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Movies => "movies",
            Self::Series => "series",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier assigned by the catalog provider (a TMDB numeric id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogId(pub u64);

impl std::fmt::Display for CatalogId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CatalogId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_kind_accepts_listing_aliases() {
        for (raw, kind) in [
            ("\"movie\"", MediaKind::Movies),
            ("\"tv\"", MediaKind::Series),
            ("\"tv_shows\"", MediaKind::Series),
        ] {
            assert_eq!(serde_json::from_str::<MediaKind>(raw).unwrap(), kind);
        }
        assert!(serde_json::from_str::<MediaKind>("\"music\"").is_err());
    }

    #[test]
    fn media_kind_serializes_as_plural_name() {
        let json = serde_json::to_string(&MediaKind::Movies).unwrap();
        assert_eq!(json, "\"movies\"");
        let kind: MediaKind = serde_json::from_str("\"series\"").unwrap();
        assert_eq!(kind, MediaKind::Series);
    }

    #[test]
    fn catalog_id_is_transparent() {
        let id: CatalogId = serde_json::from_str("82856").unwrap();
        assert_eq!(id, CatalogId(82856));
        assert_eq!(id.to_string(), "82856");
    }
}
