//! Detail records as returned by the catalog provider.
//!
//! Only the fields the merge reads are typed. Nested values that flow through
//! to the output untouched (external ids, collection, air summaries) stay as
//! JSON.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Full movie or series detail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogDetail {
    pub id: Option<u64>,
    pub imdb_id: Option<String>,
    // movies
    pub title: Option<String>,
    pub original_title: Option<String>,
    pub release_date: Option<String>,
    pub revenue: Option<u64>,
    pub belongs_to_collection: Option<Value>,
    // series
    pub name: Option<String>,
    pub original_name: Option<String>,
    pub first_air_date: Option<String>,
    pub last_air_date: Option<String>,
    pub number_of_episodes: Option<u32>,
    pub number_of_seasons: Option<u32>,
    pub last_episode_to_air: Option<Value>,
    pub next_episode_to_air: Option<Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub seasons: Vec<SeasonSummary>,
    // both
    pub status: Option<String>,
    pub homepage: Option<String>,
    pub popularity: Option<f64>,
    pub vote_average: Option<f64>,
    pub tagline: Option<String>,
    pub overview: Option<String>,
    pub backdrop_path: Option<String>,
    pub poster_path: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub genres: Vec<Genre>,
    #[serde(deserialize_with = "null_as_default")]
    pub credits: Credits,
    #[serde(deserialize_with = "null_as_default")]
    pub images: Images,
    pub external_ids: Option<Value>,
    /// Series only: episode lists keyed by season number.
    #[serde(skip)]
    pub season_episodes: BTreeMap<u32, Vec<ProviderEpisode>>,
}

impl CatalogDetail {
    /// The provider's episode list for one season, if it was fetched.
    pub fn episodes_for(&self, season_number: u32) -> Option<&[ProviderEpisode]> {
        self.season_episodes
            .get(&season_number)
            .map(|eps| eps.as_slice())
    }

    /// `file_path` of the first logo; absent when there are none.
    pub fn logo_path(&self) -> Option<String> {
        self.images.logos.first().and_then(|l| l.file_path.clone())
    }

    /// IMDb id from the top level (movies) or `external_ids` (series).
    pub fn imdb_id(&self) -> Option<String> {
        self.imdb_id.clone().or_else(|| {
            self.external_ids
                .as_ref()
                .and_then(|ids| ids["imdb_id"].as_str())
                .map(|s| s.to_string())
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credits {
    pub cast: Vec<CastMember>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CastMember {
    pub id: Option<u64>,
    pub name: String,
    pub character: Option<String>,
    pub profile_path: Option<String>,
    pub order: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Images {
    pub logos: Vec<ImageRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageRef {
    pub file_path: Option<String>,
    pub iso_639_1: Option<String>,
}

/// One entry of a series' top-level `seasons` list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonSummary {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub season_number: u32,
    pub episode_count: Option<u32>,
    pub air_date: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub vote_average: Option<f64>,
}

/// Fields of a provider episode that never reach the output record.
pub const INTERNAL_EPISODE_FIELDS: &[&str] =
    &["id", "crew", "guest_stars", "production_code", "season_number"];

/// One episode from a season's detail listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderEpisode {
    pub name: Option<String>,
    pub air_date: Option<String>,
    pub episode_number: Option<u32>,
    pub overview: Option<String>,
    pub still_path: Option<String>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u64>,
    pub runtime: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProviderEpisode {
    /// Stand-in for an episode the provider doesn't list.
    pub fn placeholder(episode_number: u32, year: Option<&str>) -> Self {
        Self {
            air_date: year.map(|y| format!("{y}-01-01")),
            episode_number: Some(episode_number),
            ..Default::default()
        }
    }

    /// Drop provider bookkeeping (ids, crew, guest stars).
    pub fn strip_internal(mut self) -> Self {
        for field in INTERNAL_EPISODE_FIELDS {
            self.extra.remove(*field);
        }
        self
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
