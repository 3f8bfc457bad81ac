//! Merge provider detail with local file facts.
//!
//! Merge rules:
//! 1. The provider owns what it knows about the title: names, dates, ids, art.
//! 2. The listing owns filesystem facts: file name, modified time, thumbnail,
//!    subtitles, video metadata.
//! 3. A provider field that is missing stays absent, it is never invented.
//!    The only exception is the series `first_air_date`, which is empty
//!    rather than absent.

use drivefin_core::listing::{RawEntry, RawEpisode};
use drivefin_core::types::CatalogId;

use crate::catalog::{CatalogDetail, ProviderEpisode};
use crate::reconcile::{ReconcileConfig, year_from_date};
use crate::record::{EpisodeRecord, MovieRecord, SeasonRecord, SeriesRecord};

fn thumbnail(config: &ReconcileConfig, has_thumbnail: bool, file_id: Option<&str>) -> Option<String> {
    match file_id {
        Some(id) if has_thumbnail => Some(config.thumbnail_path(id)),
        _ => None,
    }
}

/// Build a movie record. `id` is the id the search returned, used when the
/// detail lacks one.
pub fn movie_record(
    entry: &RawEntry,
    id: CatalogId,
    detail: CatalogDetail,
    config: &ReconcileConfig,
) -> MovieRecord {
    let logo = detail.logo_path();
    let imdb_id = detail.imdb_id();
    let year = detail.release_date.as_deref().and_then(year_from_date);

    MovieRecord {
        id: entry.id.clone(),
        tmdb_id: detail.id.map(CatalogId).unwrap_or(id),
        imdb_id,
        file_name: entry.name.clone(),
        original_title: detail.original_title,
        title: detail.title,
        status: detail.status,
        homepage: detail.homepage,
        logo,
        modified_time: entry.modified_time.clone(),
        video_metadata: entry.video_media_metadata.clone(),
        thumbnail_path: thumbnail(config, entry.has_thumbnail, Some(entry.id.as_str())),
        popularity: detail.popularity,
        revenue: detail.revenue,
        rating: detail.vote_average,
        release_date: detail.release_date,
        year,
        tagline: detail.tagline,
        description: detail.overview,
        cast: detail.credits.cast,
        backdrop_url: detail.backdrop_path,
        poster_url: detail.poster_path,
        collection: detail.belongs_to_collection,
        genres: detail.genres,
        subtitles: entry.subtitles.clone(),
        external_ids: detail.external_ids,
        category: None,
    }
}

/// Build a series record around seasons that were already aligned.
pub fn series_record(
    entry: &RawEntry,
    id: CatalogId,
    detail: CatalogDetail,
    seasons: Vec<SeasonRecord>,
    config: &ReconcileConfig,
) -> SeriesRecord {
    let logo = detail.logo_path();
    let imdb_id = detail.imdb_id();
    let first_air_date = detail.first_air_date.unwrap_or_default();

    SeriesRecord {
        id: entry.id.clone(),
        tmdb_id: detail.id.map(CatalogId).unwrap_or(id),
        imdb_id,
        file_name: entry.name.clone(),
        original_title: detail.original_name,
        title: detail.name,
        status: detail.status,
        total_episodes: detail.number_of_episodes,
        total_seasons: detail.number_of_seasons,
        homepage: detail.homepage,
        logo,
        modified_time: entry.modified_time.clone(),
        thumbnail_path: thumbnail(config, entry.has_thumbnail, Some(entry.id.as_str())),
        popularity: detail.popularity,
        rating: detail.vote_average,
        year: year_from_date(&first_air_date),
        first_air_date,
        release_date: detail.last_air_date.clone(),
        last_air_date: detail.last_air_date,
        tagline: detail.tagline,
        description: detail.overview,
        seasons,
        last_episode_to_air: detail.last_episode_to_air,
        next_episode_to_air: detail.next_episode_to_air,
        cast: detail.credits.cast,
        backdrop_url: detail.backdrop_path,
        poster_url: detail.poster_path,
        genres: detail.genres,
        subtitles: entry.subtitles.clone(),
        external_ids: detail.external_ids,
        category: None,
    }
}

/// Lay a provider episode over a local episode file.
///
/// `assigned_number` is used when the provider episode carries no number of
/// its own.
pub fn episode_record(
    local: &RawEpisode,
    provider: ProviderEpisode,
    assigned_number: u32,
    config: &ReconcileConfig,
) -> EpisodeRecord {
    let provider = provider.strip_internal();

    let mut extra = local.extra.clone();
    extra.extend(provider.extra);

    EpisodeRecord {
        id: local.id.clone(),
        file_name: local.name.clone(),
        modified_time: local.modified_time.clone(),
        video_metadata: local.video_media_metadata.clone(),
        thumbnail_path: thumbnail(config, local.has_thumbnail, local.id.as_deref()),
        subtitles: local.subtitles.clone(),
        name: provider.name,
        episode_number: provider.episode_number.unwrap_or(assigned_number),
        air_date: provider.air_date,
        overview: provider.overview,
        episode_thumbnail: provider.still_path,
        rating: provider.vote_average,
        vote_count: provider.vote_count,
        runtime: provider.runtime,
        extra,
    }
}
