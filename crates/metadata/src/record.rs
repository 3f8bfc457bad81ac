//! Canonical records handed to downstream consumers.

use drivefin_core::types::CatalogId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::catalog::{CastMember, Genre, SeasonSummary};

/// Category a record was listed under, attached during bucketing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTag {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: String,
    pub tmdb_id: CatalogId,
    pub imdb_id: Option<String>,
    pub file_name: String,
    pub original_title: Option<String>,
    pub title: Option<String>,
    pub status: Option<String>,
    pub homepage: Option<String>,
    pub logo: Option<String>,
    pub modified_time: Option<String>,
    pub video_metadata: Option<Value>,
    pub thumbnail_path: Option<String>,
    pub popularity: Option<f64>,
    pub revenue: Option<u64>,
    pub rating: Option<f64>,
    pub release_date: Option<String>,
    pub year: Option<i32>,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub cast: Vec<CastMember>,
    pub backdrop_url: Option<String>,
    pub poster_url: Option<String>,
    pub collection: Option<Value>,
    pub genres: Vec<Genre>,
    pub subtitles: Option<Value>,
    pub external_ids: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryTag>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesRecord {
    pub id: String,
    pub tmdb_id: CatalogId,
    pub imdb_id: Option<String>,
    pub file_name: String,
    pub original_title: Option<String>,
    pub title: Option<String>,
    pub status: Option<String>,
    pub total_episodes: Option<u32>,
    pub total_seasons: Option<u32>,
    pub homepage: Option<String>,
    pub logo: Option<String>,
    pub modified_time: Option<String>,
    pub thumbnail_path: Option<String>,
    pub popularity: Option<f64>,
    pub rating: Option<f64>,
    pub year: Option<i32>,
    /// Empty, never absent, when the provider has no date.
    pub first_air_date: String,
    pub last_air_date: Option<String>,
    pub release_date: Option<String>,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub seasons: Vec<SeasonRecord>,
    pub last_episode_to_air: Option<Value>,
    pub next_episode_to_air: Option<Value>,
    pub cast: Vec<CastMember>,
    pub backdrop_url: Option<String>,
    pub poster_url: Option<String>,
    pub genres: Vec<Genre>,
    pub subtitles: Option<Value>,
    pub external_ids: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryTag>,
}

/// A provider season summary carrying the local episodes aligned to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonRecord {
    #[serde(flatten)]
    pub summary: SeasonSummary,
    pub episodes: Vec<EpisodeRecord>,
}

/// A local episode file with provider episode fields merged on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    pub id: Option<String>,
    pub file_name: String,
    pub modified_time: Option<String>,
    pub video_metadata: Option<Value>,
    pub thumbnail_path: Option<String>,
    pub subtitles: Option<Value>,
    pub name: Option<String>,
    pub episode_number: u32,
    pub air_date: Option<String>,
    pub overview: Option<String>,
    pub episode_thumbnail: Option<String>,
    pub rating: Option<f64>,
    pub vote_count: Option<u64>,
    pub runtime: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Either flavour of record, serialized without a tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CanonicalRecord {
    Movie(MovieRecord),
    Series(SeriesRecord),
}

impl CanonicalRecord {
    pub fn tmdb_id(&self) -> CatalogId {
        match self {
            Self::Movie(m) => m.tmdb_id,
            Self::Series(s) => s.tmdb_id,
        }
    }

    pub fn category(&self) -> Option<&CategoryTag> {
        match self {
            Self::Movie(m) => m.category.as_ref(),
            Self::Series(s) => s.category.as_ref(),
        }
    }

    pub fn set_category(&mut self, tag: CategoryTag) {
        match self {
            Self::Movie(m) => m.category = Some(tag),
            Self::Series(s) => s.category = Some(tag),
        }
    }
}

impl From<MovieRecord> for CanonicalRecord {
    fn from(record: MovieRecord) -> Self {
        Self::Movie(record)
    }
}

impl From<SeriesRecord> for CanonicalRecord {
    fn from(record: SeriesRecord) -> Self {
        Self::Series(record)
    }
}
