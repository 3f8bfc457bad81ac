//! Series reconciliation and episode alignment.
//!
//! Lookup goes API first, then lenient, then gives up on the entry. There is
//! no deferred second pass like the movie engine has.
//!
//! Every local episode file yields exactly one episode record. Files are
//! matched to the provider's episode list by number. A file without a number
//! is numbered from the end of its season folder: the first of three files
//! becomes episode 3. A number the provider doesn't list gets a placeholder.

use std::collections::BTreeSet;

use drivefin_core::listing::{RawEntry, RawEpisode, season_key_number};
use drivefin_core::types::MediaKind;
use drivefin_scanner::parse_episode;
use tracing::{debug, info, warn};

use crate::catalog::{CatalogDetail, ProviderEpisode, SeasonSummary};
use crate::merge;
use crate::provider::{CatalogProvider, LookupMode};
use crate::reconcile::{self, ReconcileConfig, Reconciled, SkipReason, SkippedEntry};
use crate::record::{EpisodeRecord, SeasonRecord, SeriesRecord};

/// Match each series folder to the catalog and align its episodes.
pub async fn reconcile_series(
    provider: &dyn CatalogProvider,
    entries: &[RawEntry],
    config: &ReconcileConfig,
) -> Reconciled<SeriesRecord> {
    let mut out = Reconciled::default();

    for entry in entries {
        let parsed = reconcile::parse_entry(entry, MediaKind::Series);
        let title = parsed.title.as_str();

        let mut found =
            reconcile::find_id(provider, title, MediaKind::Series, LookupMode::Api).await;
        if found.is_none() {
            found = reconcile::find_id(provider, title, MediaKind::Series, LookupMode::Lenient)
                .await;
        }
        let Some(id) = found else {
            info!(title, "could not find series id, skipping");
            out.skipped
                .push(SkippedEntry::new(entry, &parsed, SkipReason::NotFound));
            continue;
        };
        debug!(title, tmdb_id = %id, "series matched");

        let detail = match provider
            .get_details(id, MediaKind::Series, LookupMode::Api)
            .await
        {
            Ok(detail) => detail,
            Err(e) => {
                warn!(title, tmdb_id = %id, error = %e, "series detail fetch failed, skipping");
                out.skipped.push(SkippedEntry::new(entry, &parsed, e.into()));
                continue;
            }
        };

        let year = (!parsed.year.is_empty()).then_some(parsed.year.as_str());
        let seasons = align_seasons(entry, &detail, year, config);
        out.records
            .push(merge::series_record(entry, id, detail, seasons, config));
    }

    info!(
        matched = out.records.len(),
        skipped = out.skipped.len(),
        "series reconciliation complete"
    );
    out
}

/// Attach local episodes to every season the provider lists, in provider order.
///
/// Numbered season folders the provider doesn't list follow as extra seasons
/// of placeholder episodes. A folder whose key names no season number can't be
/// placed and is only logged.
pub fn align_seasons(
    entry: &RawEntry,
    detail: &CatalogDetail,
    year: Option<&str>,
    config: &ReconcileConfig,
) -> Vec<SeasonRecord> {
    let mut seasons: Vec<SeasonRecord> = detail
        .seasons
        .iter()
        .map(|summary| {
            let local = entry.season_episodes(summary.season_number);
            let catalog = detail.episodes_for(summary.season_number);
            align_season(summary, &local, catalog, year, config)
        })
        .collect();

    let mut unlisted = BTreeSet::new();
    for (key, folder) in &entry.seasons {
        match season_key_number(key) {
            Some(n) if detail.seasons.iter().any(|s| s.season_number == n) => {}
            Some(n) => {
                unlisted.insert(n);
            }
            None => warn!(
                folder = %key,
                files = folder.episodes.len(),
                "season folder has no season number, files not aligned"
            ),
        }
    }

    for season_number in unlisted {
        let local = entry.season_episodes(season_number);
        warn!(
            season = season_number,
            files = local.len(),
            "season not listed by catalog, using placeholder episodes"
        );
        let summary = SeasonSummary {
            season_number,
            ..Default::default()
        };
        let catalog = detail.episodes_for(season_number);
        seasons.push(align_season(&summary, &local, catalog, year, config));
    }

    seasons
}

/// Align one season folder against the provider's episode list.
pub fn align_season(
    summary: &SeasonSummary,
    local: &[&RawEpisode],
    catalog: Option<&[ProviderEpisode]>,
    year: Option<&str>,
    config: &ReconcileConfig,
) -> SeasonRecord {
    let season_number = summary.season_number;
    let count = local.len() as u32;
    debug!(
        season = season_number,
        name = summary.name.as_deref().unwrap_or(""),
        local_episodes = count,
        "aligning season"
    );

    let episodes = local
        .iter()
        .enumerate()
        .map(|(index, file)| {
            let parsed = parse_episode(&file.name);
            if parsed.season != season_number {
                warn!(
                    file = %file.name,
                    parsed = parsed.season,
                    folder = season_number,
                    "season number mismatch, using folder season"
                );
            }

            let number = parsed
                .episode
                .filter(|n| *n > 0)
                .unwrap_or(count - index as u32);

            let provider_episode = catalog
                .and_then(|eps| eps.get(number as usize - 1))
                .cloned()
                .unwrap_or_else(|| {
                    debug!(file = %file.name, episode = number, "no catalog episode, using placeholder");
                    ProviderEpisode::placeholder(number, year)
                });

            merge::episode_record(file, provider_episode, number, config)
        })
        .collect::<Vec<EpisodeRecord>>();

    SeasonRecord {
        summary: summary.clone(),
        episodes,
    }
}
