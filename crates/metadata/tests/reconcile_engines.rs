use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use drivefin_core::listing::{RawEntry, RawEpisode, RawSeason};
use drivefin_core::types::{CatalogId, MediaKind};
use drivefin_metadata::catalog::{ProviderEpisode, SeasonSummary};
use drivefin_metadata::{
    CatalogDetail, CatalogProvider, LookupMode, MetadataError, ReconcileConfig, SkipReason,
    reconcile_movies, reconcile_series,
};

/// In-memory catalog. Titles resolve per lookup mode; every call is recorded.
#[derive(Default)]
struct FakeCatalog {
    api: HashMap<String, u64>,
    lenient: HashMap<String, u64>,
    failing_search: Vec<String>,
    details: HashMap<u64, CatalogDetail>,
    calls: Mutex<Vec<String>>,
}

impl FakeCatalog {
    fn api(mut self, title: &str, id: u64) -> Self {
        self.api.insert(title.into(), id);
        self
    }

    fn lenient(mut self, title: &str, id: u64) -> Self {
        self.lenient.insert(title.into(), id);
        self
    }

    fn failing(mut self, title: &str) -> Self {
        self.failing_search.push(title.into());
        self
    }

    fn detail(mut self, id: u64, detail: CatalogDetail) -> Self {
        self.details.insert(id, detail);
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl CatalogProvider for FakeCatalog {
    fn name(&self) -> &str {
        "fake"
    }

    async fn find_media_id(
        &self,
        title: &str,
        _kind: MediaKind,
        mode: LookupMode,
    ) -> Result<Option<CatalogId>, MetadataError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("find {title} {mode:?}"));
        if self.failing_search.iter().any(|t| t == title) {
            return Err(MetadataError::Network("connection reset".into()));
        }
        let table = match mode {
            LookupMode::Api => &self.api,
            LookupMode::Lenient => &self.lenient,
        };
        Ok(table.get(title).copied().map(CatalogId))
    }

    async fn get_details(
        &self,
        id: CatalogId,
        _kind: MediaKind,
        mode: LookupMode,
    ) -> Result<CatalogDetail, MetadataError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("details {id} {mode:?}"));
        self.details
            .get(&id.0)
            .cloned()
            .ok_or(MetadataError::NotFound)
    }
}

fn file(name: &str) -> RawEntry {
    RawEntry {
        id: format!("id-{name}"),
        name: name.into(),
        ..Default::default()
    }
}

fn movie(id: u64, title: &str) -> CatalogDetail {
    CatalogDetail {
        id: Some(id),
        title: Some(title.into()),
        ..Default::default()
    }
}

fn titles(records: &[drivefin_metadata::MovieRecord]) -> Vec<&str> {
    records
        .iter()
        .map(|r| r.title.as_deref().unwrap_or(""))
        .collect()
}

#[tokio::test]
async fn movies_from_first_pass_come_before_deferred_ones() {
    let catalog = FakeCatalog::default()
        .lenient("Amelie", 194)
        .api("Heat", 949)
        .detail(194, movie(194, "Amélie"))
        .detail(949, movie(949, "Heat"));
    let entries = vec![file("Amelie.mkv"), file("Heat.1995.mkv")];

    let out = reconcile_movies(&catalog, &entries, &ReconcileConfig::default()).await;

    assert_eq!(titles(&out.records), vec!["Heat", "Amélie"]);
    assert!(out.skipped.is_empty());
    assert_eq!(
        catalog.calls(),
        vec![
            "find Amelie Api",
            "find Heat Api",
            "details 949 Api",
            "find Amelie Lenient",
            "details 194 Lenient",
        ]
    );
}

#[tokio::test]
async fn deferred_movie_keeps_its_own_file_facts() {
    let catalog = FakeCatalog::default()
        .lenient("Amelie", 194)
        .api("Heat", 949)
        .detail(194, movie(194, "Amélie"))
        .detail(949, movie(949, "Heat"));
    let entries = vec![file("Amelie.mkv"), file("Heat.1995.mkv")];

    let out = reconcile_movies(&catalog, &entries, &ReconcileConfig::default()).await;

    let amelie = &out.records[1];
    assert_eq!(amelie.file_name, "Amelie.mkv");
    assert_eq!(amelie.id, "id-Amelie.mkv");
    assert_eq!(amelie.tmdb_id, CatalogId(194));
}

#[tokio::test]
async fn movie_not_found_anywhere_is_skipped() {
    let catalog = FakeCatalog::default()
        .api("Heat", 949)
        .detail(949, movie(949, "Heat"));
    let entries = vec![file("Unknown Thing.mkv"), file("Heat.1995.mkv")];

    let out = reconcile_movies(&catalog, &entries, &ReconcileConfig::default()).await;

    assert_eq!(titles(&out.records), vec!["Heat"]);
    assert_eq!(out.skipped.len(), 1);
    assert_eq!(out.skipped[0].name, "Unknown Thing.mkv");
    assert_eq!(out.skipped[0].title, "Unknown Thing");
    assert_eq!(out.skipped[0].reason, SkipReason::NotFound);
}

#[tokio::test]
async fn movie_search_error_falls_back_to_lenient() {
    let catalog = FakeCatalog::default()
        .failing("Heat")
        .detail(949, movie(949, "Heat"));
    let entries = vec![file("Heat.1995.mkv")];

    let out = reconcile_movies(&catalog, &entries, &ReconcileConfig::default()).await;

    assert!(out.records.is_empty());
    assert_eq!(out.skipped[0].reason, SkipReason::NotFound);
    assert_eq!(catalog.calls(), vec!["find Heat Api", "find Heat Lenient"]);
}

#[tokio::test]
async fn movie_detail_failure_is_skipped_and_the_rest_continue() {
    let catalog = FakeCatalog::default()
        .api("Heat", 949)
        .api("Arrival", 329865)
        .detail(329865, movie(329865, "Arrival"));
    let entries = vec![file("Heat.1995.mkv"), file("Arrival.2016.mkv")];

    let out = reconcile_movies(&catalog, &entries, &ReconcileConfig::default()).await;

    assert_eq!(titles(&out.records), vec!["Arrival"]);
    assert_eq!(out.skipped.len(), 1);
    assert_eq!(out.skipped[0].name, "Heat.1995.mkv");
}

#[tokio::test]
async fn same_movie_twice_is_not_deduplicated() {
    let catalog = FakeCatalog::default()
        .api("Heat", 949)
        .detail(949, movie(949, "Heat"));
    let entries = vec![file("Heat.1995.mkv"), file("Heat (1995).mkv")];

    let out = reconcile_movies(&catalog, &entries, &ReconcileConfig::default()).await;

    assert_eq!(out.records.len(), 2);
    assert!(out.records.iter().all(|r| r.tmdb_id == CatalogId(949)));
}

#[tokio::test]
async fn empty_listing_yields_nothing() {
    let catalog = FakeCatalog::default();
    let out = reconcile_movies(&catalog, &[], &ReconcileConfig::default()).await;
    assert!(out.records.is_empty());
    assert!(out.skipped.is_empty());
    assert!(catalog.calls().is_empty());
}

fn series_folder(name: &str, seasons: Vec<(u32, Vec<&str>)>) -> RawEntry {
    let seasons: BTreeMap<String, RawSeason> = seasons
        .into_iter()
        .map(|(n, files)| {
            let episodes = files
                .into_iter()
                .map(|f| RawEpisode {
                    id: Some(format!("id-{f}")),
                    name: f.to_string(),
                    has_thumbnail: true,
                    ..Default::default()
                })
                .collect();
            (n.to_string(), RawSeason { episodes })
        })
        .collect();
    RawEntry {
        id: format!("id-{name}"),
        name: name.into(),
        seasons,
        ..Default::default()
    }
}

fn dark() -> CatalogDetail {
    let mut detail = CatalogDetail {
        id: Some(70523),
        name: Some("Dark".into()),
        first_air_date: Some("2017-12-01".into()),
        last_air_date: Some("2020-06-27".into()),
        seasons: vec![
            SeasonSummary {
                season_number: 1,
                ..Default::default()
            },
            SeasonSummary {
                season_number: 2,
                ..Default::default()
            },
        ],
        ..Default::default()
    };
    let episodes = (1..=3)
        .map(|n| ProviderEpisode {
            name: Some(format!("Episode {n}")),
            episode_number: Some(n),
            still_path: Some(format!("/still{n}.jpg")),
            ..Default::default()
        })
        .collect();
    detail.season_episodes.insert(1, episodes);
    detail
}

#[tokio::test]
async fn series_episodes_are_aligned_and_counted() {
    let catalog = FakeCatalog::default()
        .api("Dark", 70523)
        .detail(70523, dark());
    let entries = vec![series_folder(
        "Dark (2017)",
        vec![(1, vec!["S01E02.mkv", "S01E01.mkv", "S01E07.mkv"])],
    )];

    let out = reconcile_series(&catalog, &entries, &ReconcileConfig::default()).await;

    assert!(out.skipped.is_empty());
    let record = &out.records[0];
    assert_eq!(record.tmdb_id, CatalogId(70523));
    assert_eq!(record.first_air_date, "2017-12-01");
    assert_eq!(record.year, Some(2017));
    assert_eq!(record.seasons.len(), 2);

    let first = &record.seasons[0].episodes;
    assert_eq!(first.len(), 3);
    assert_eq!(first[0].name.as_deref(), Some("Episode 2"));
    assert_eq!(first[1].episode_thumbnail.as_deref(), Some("/still1.jpg"));
    assert_eq!(
        first[1].thumbnail_path.as_deref(),
        Some("/api/v1/assets/thumbnail/id-S01E01.mkv")
    );
    // beyond the catalog's three episodes
    assert_eq!(first[2].episode_number, 7);
    assert_eq!(first[2].air_date.as_deref(), Some("2017-01-01"));

    // season 2 has no folder and no catalog episodes
    assert!(record.seasons[1].episodes.is_empty());
}

#[tokio::test]
async fn series_falls_back_to_lenient_lookup() {
    let catalog = FakeCatalog::default()
        .lenient("Dark", 70523)
        .detail(70523, dark());
    let entries = vec![series_folder("Dark", Vec::new())];

    let out = reconcile_series(&catalog, &entries, &ReconcileConfig::default()).await;

    assert_eq!(out.records.len(), 1);
    assert_eq!(
        catalog.calls(),
        vec!["find Dark Api", "find Dark Lenient", "details 70523 Api"]
    );
}

#[tokio::test]
async fn series_not_found_is_skipped_without_a_second_pass() {
    let catalog = FakeCatalog::default()
        .api("Dark", 70523)
        .detail(70523, dark());
    let entries = vec![series_folder("Nowhere", Vec::new()), series_folder("Dark", Vec::new())];

    let out = reconcile_series(&catalog, &entries, &ReconcileConfig::default()).await;

    assert_eq!(out.records.len(), 1);
    assert_eq!(out.skipped.len(), 1);
    assert_eq!(out.skipped[0].title, "Nowhere");
    assert_eq!(
        catalog.calls(),
        vec![
            "find Nowhere Api",
            "find Nowhere Lenient",
            "find Dark Api",
            "details 70523 Api",
        ]
    );
}

#[tokio::test]
async fn series_without_first_air_date_gets_empty_string() {
    let detail = CatalogDetail {
        id: Some(1),
        name: Some("Untitled".into()),
        ..Default::default()
    };
    let catalog = FakeCatalog::default().api("Untitled", 1).detail(1, detail);
    let entries = vec![series_folder("Untitled", Vec::new())];

    let out = reconcile_series(&catalog, &entries, &ReconcileConfig::default()).await;

    let record = &out.records[0];
    assert_eq!(record.first_air_date, "");
    assert_eq!(record.year, None);
    assert!(record.seasons.is_empty());

    let json = serde_json::to_value(record).unwrap();
    assert_eq!(json["first_air_date"], "");
}

#[tokio::test]
async fn series_detail_failure_is_skipped() {
    let catalog = FakeCatalog::default().api("Dark", 70523);
    let entries = vec![series_folder("Dark", Vec::new())];

    let out = reconcile_series(&catalog, &entries, &ReconcileConfig::default()).await;

    assert!(out.records.is_empty());
    assert_eq!(out.skipped[0].reason, SkipReason::NotFound);
}
