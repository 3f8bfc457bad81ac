//! Shapes produced by the storage-listing client.
//!
//! Field names follow the listing's camelCase JSON (`modifiedTime`,
//! `hasThumbnail`, `videoMediaMetadata`). Anything else the listing carries is
//! kept in `extra` and passed through untouched.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::MediaKind;

/// A movie file or a series folder from the remote listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub modified_time: Option<String>,
    #[serde(default)]
    pub has_thumbnail: bool,
    #[serde(default)]
    pub video_media_metadata: Option<Value>,
    #[serde(default)]
    pub subtitles: Option<Value>,
    /// Series only: season number as text (`"1"`, `"2"`) to the files found
    /// in that season folder.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub seasons: BTreeMap<String, RawSeason>,
}

impl RawEntry {
    /// Local episode files for a season, from every folder whose key names
    /// that season. Empty when there is none.
    pub fn season_episodes(&self, season_number: u32) -> Vec<&RawEpisode> {
        self.seasons
            .iter()
            .filter(|(key, _)| season_key_number(key) == Some(season_number))
            .flat_map(|(_, season)| &season.episodes)
            .collect()
    }
}

/// Season number named by a season folder key: `"2"`, `"02"` and `"Season 2"`
/// all give 2.
pub fn season_key_number(key: &str) -> Option<u32> {
    let key = key.trim();
    let digits = match key.get(..6) {
        Some(prefix) if prefix.eq_ignore_ascii_case("season") => &key[6..],
        _ => key,
    };
    digits.trim().parse().ok()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSeason {
    #[serde(default)]
    pub episodes: Vec<RawEpisode>,
}

/// A single episode file inside a season folder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEpisode {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub modified_time: Option<String>,
    #[serde(default)]
    pub has_thumbnail: bool,
    #[serde(default)]
    pub video_media_metadata: Option<Value>,
    #[serde(default)]
    pub subtitles: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A named group of records of one kind, as configured by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category<T> {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    #[serde(default = "Vec::new")]
    pub metadata: Vec<T>,
}
