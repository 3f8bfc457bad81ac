//! TMDB (The Movie Database) catalog client.
//!
//! Uses TMDB API v3: https://developer.themoviedb.org/docs
//!
//! Lenient lookups go through `/search/multi` with a handful of title
//! variations. Series details carry every season's episode list, appended in
//! batches of [`APPEND_LIMIT`] in API mode and fetched one season at a time in
//! lenient mode.

use std::collections::BTreeMap;

use drivefin_core::types::{CatalogId, MediaKind};
use tracing::{debug, warn};

use crate::catalog::{CatalogDetail, ProviderEpisode};
use crate::provider::{CatalogProvider, LookupMode};
use crate::MetadataError;

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// TMDB rejects more than 20 `append_to_response` entries per request.
const APPEND_LIMIT: usize = 20;
const DETAIL_APPENDS: &str = "credits,images,external_ids";

pub struct TmdbClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl TmdbClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    async fn get_json(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<serde_json::Value, MetadataError> {
        let mut all_params = vec![("api_key", self.api_key.as_str())];
        all_params.extend_from_slice(params);

        let url = format!("{}{path}", self.base_url);
        debug!(url = %url, "TMDB request");

        let resp = self
            .client
            .get(&url)
            .query(&all_params)
            .send()
            .await
            .map_err(|e| MetadataError::Network(e.to_string()))?;

        if let Some(err) = status_error(resp.status()) {
            return Err(err);
        }

        resp.json()
            .await
            .map_err(|e| MetadataError::Provider(format!("parse JSON: {e}")))
    }

    async fn search(&self, title: &str, kind: MediaKind) -> Result<Option<CatalogId>, MetadataError> {
        let path = match kind {
            MediaKind::Movies => "/search/movie",
            MediaKind::Series => "/search/tv",
        };
        let data = self.get_json(path, &[("query", title)]).await?;
        Ok(first_result_id(&data))
    }

    async fn search_lenient(
        &self,
        title: &str,
        kind: MediaKind,
    ) -> Result<Option<CatalogId>, MetadataError> {
        for variant in title_variations(title) {
            let data = self
                .get_json(
                    "/search/multi",
                    &[("query", variant.as_str()), ("include_adult", "false")],
                )
                .await?;
            if let Some(id) = first_result_of_kind(&data, kind) {
                debug!(title, variant = %variant, tmdb_id = %id, "lenient search hit");
                return Ok(Some(id));
            }
        }
        Ok(None)
    }

    /// A failed batch leaves its seasons without episode lists.
    async fn fetch_season_batches(
        &self,
        id: CatalogId,
        seasons: &[u32],
    ) -> BTreeMap<u32, Vec<ProviderEpisode>> {
        let mut episodes = BTreeMap::new();
        for appends in season_append_batches(seasons) {
            match self
                .get_json(&format!("/tv/{id}"), &[("append_to_response", appends.as_str())])
                .await
            {
                Ok(mut data) => episodes.extend(take_appended_seasons(&mut data)),
                Err(e) => {
                    warn!(tmdb_id = %id, seasons = %appends, error = %e, "season batch unavailable");
                }
            }
        }
        episodes
    }

    async fn fetch_seasons_one_by_one(
        &self,
        id: CatalogId,
        seasons: &[u32],
    ) -> BTreeMap<u32, Vec<ProviderEpisode>> {
        let mut episodes = BTreeMap::new();
        for &season in seasons {
            match self.get_json(&format!("/tv/{id}/season/{season}"), &[]).await {
                Ok(data) => {
                    episodes.insert(season, decode_episodes(&data));
                }
                Err(e) => {
                    warn!(tmdb_id = %id, season, error = %e, "season detail unavailable");
                }
            }
        }
        episodes
    }
}

#[async_trait::async_trait]
impl CatalogProvider for TmdbClient {
    fn name(&self) -> &str {
        "tmdb"
    }

    async fn find_media_id(
        &self,
        title: &str,
        kind: MediaKind,
        mode: LookupMode,
    ) -> Result<Option<CatalogId>, MetadataError> {
        if title.trim().is_empty() {
            return Ok(None);
        }
        match mode {
            LookupMode::Api => self.search(title, kind).await,
            LookupMode::Lenient => self.search_lenient(title, kind).await,
        }
    }

    async fn get_details(
        &self,
        id: CatalogId,
        kind: MediaKind,
        mode: LookupMode,
    ) -> Result<CatalogDetail, MetadataError> {
        let path = match kind {
            MediaKind::Movies => format!("/movie/{id}"),
            MediaKind::Series => format!("/tv/{id}"),
        };
        let mut params = vec![("append_to_response", DETAIL_APPENDS)];
        if mode == LookupMode::Api {
            params.push(("include_image_language", "en,null"));
        }

        let data = self.get_json(&path, &params).await?;
        let mut detail = decode_detail(data)?;

        if kind == MediaKind::Series {
            let numbers: Vec<u32> = detail.seasons.iter().map(|s| s.season_number).collect();
            detail.season_episodes = match mode {
                LookupMode::Api => self.fetch_season_batches(id, &numbers).await,
                LookupMode::Lenient => self.fetch_seasons_one_by_one(id, &numbers).await,
            };
        }

        Ok(detail)
    }
}

/// Map a non-success HTTP status to an error.
fn status_error(status: reqwest::StatusCode) -> Option<MetadataError> {
    if status == reqwest::StatusCode::NOT_FOUND {
        Some(MetadataError::NotFound)
    } else if !status.is_success() {
        Some(MetadataError::Provider(format!("TMDB returned {status}")))
    } else {
        None
    }
}

/// `append_to_response` values covering every season, at most
/// [`APPEND_LIMIT`] seasons each.
fn season_append_batches(seasons: &[u32]) -> Vec<String> {
    seasons
        .chunks(APPEND_LIMIT)
        .map(|batch| {
            batch
                .iter()
                .map(|n| format!("season/{n}"))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect()
}

fn first_result_id(data: &serde_json::Value) -> Option<CatalogId> {
    data["results"]
        .as_array()
        .and_then(|results| results.first())
        .and_then(|r| r["id"].as_u64())
        .map(CatalogId)
}

fn first_result_of_kind(data: &serde_json::Value, kind: MediaKind) -> Option<CatalogId> {
    let wanted = match kind {
        MediaKind::Movies => "movie",
        MediaKind::Series => "tv",
    };
    data["results"]
        .as_array()?
        .iter()
        .find(|r| r["media_type"].as_str() == Some(wanted))
        .and_then(|r| r["id"].as_u64())
        .map(CatalogId)
}

/// Decode a detail response, moving any appended `season/<n>` objects into
/// [`CatalogDetail::season_episodes`].
fn decode_detail(mut data: serde_json::Value) -> Result<CatalogDetail, MetadataError> {
    let seasons = take_appended_seasons(&mut data);
    let mut detail: CatalogDetail =
        serde_json::from_value(data).map_err(|e| MetadataError::Decode(e.to_string()))?;
    detail.season_episodes.extend(seasons);
    Ok(detail)
}

fn take_appended_seasons(data: &mut serde_json::Value) -> BTreeMap<u32, Vec<ProviderEpisode>> {
    let Some(obj) = data.as_object_mut() else {
        return BTreeMap::new();
    };
    let keys: Vec<String> = obj
        .keys()
        .filter(|k| k.starts_with("season/"))
        .cloned()
        .collect();

    keys.into_iter()
        .filter_map(|key| {
            let season = obj.remove(&key)?;
            let number = key.strip_prefix("season/")?.parse().ok()?;
            Some((number, decode_episodes(&season)))
        })
        .collect()
}

fn decode_episodes(season: &serde_json::Value) -> Vec<ProviderEpisode> {
    season
        .get("episodes")
        .cloned()
        .and_then(|eps| serde_json::from_value(eps).ok())
        .unwrap_or_default()
}

/// Alternative spellings tried by lenient search, most literal first.
fn title_variations(title: &str) -> Vec<String> {
    let title = title.trim();
    let mut variations = vec![title.to_string()];

    // "Title (Extended)" / "Title - GROUP"
    let head = title.rsplit_once(" - ").map_or(title, |(head, _)| head);
    let unbracketed = head.trim_end_matches([')', ']']);
    let trimmed = match unbracketed.rfind(['(', '[']) {
        Some(pos) if unbracketed.len() < head.len() => unbracketed[..pos].trim(),
        _ => head,
    }
    .to_string();
    variations.push(trimmed);

    for v in variations.clone() {
        let lower = v.to_lowercase();
        if lower.starts_with("the ") {
            if let Some(rest) = v.get(4..) {
                variations.push(rest.to_string());
            }
        }
        if v.contains('&') {
            variations.push(v.replace('&', "and"));
        }
        if lower.contains(" and ") {
            variations.push(v.replace(" and ", " & ").replace(" And ", " & "));
        }
    }

    let mut seen = std::collections::HashSet::new();
    variations.retain(|v| {
        let key = v.trim().to_lowercase();
        !key.is_empty() && seen.insert(key)
    });
    variations
}
