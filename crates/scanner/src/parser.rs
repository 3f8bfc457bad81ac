use drivefin_core::types::MediaKind;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Title and year pulled out of a normalized movie or series name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedName {
    pub title: String,
    /// Four digits, or empty when no rule found a year.
    pub year: String,
    /// Movies only: a trailing `.ext` suffix, dot included.
    pub extension: Option<String>,
}

/// Season and episode numbers pulled out of an episode file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedEpisode {
    pub season: u32,
    pub episode: Option<u32>,
}

impl Default for ParsedEpisode {
    fn default() -> Self {
        Self {
            season: 1,
            episode: None,
        }
    }
}

// Rules are tried in order, first match wins. The last rule of each table
// matches anything.

static SERIES_RULES: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        // (2019) The Mandalorian
        Regex::new(r"(?s)^[\(\[\{](?P<year>\d{4})[\)\]\}]\s(?P<title>[^.]+).*$").unwrap(),
        // The Mandalorian (2019)
        Regex::new(r"(?s)^(?P<title>.*)\s[\(\[\{](?P<year>\d{4})[\)\]\}].*$").unwrap(),
        // The.Mandalorian.2019.1080p.WEBRip
        Regex::new(r"(?s)^(?P<title>.*?)\.(?P<year>\d{4}).*$").unwrap(),
        // The Mandalorian
        Regex::new(r"(?s)^(?P<year>)(?P<title>.*)$").unwrap(),
    ]
});

static MOVIE_RULES: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        // (2008) Iron Man.mkv
        Regex::new(
            r"(?s)^[\(\[\{](?P<year>\d{4})[\)\]\}]\s(?P<title>[^.]+).*?(?P<extension>\.\w+)?$",
        )
        .unwrap(),
        // Iron Man (2008).mkv
        Regex::new(
            r"(?s)^(?P<title>.*)\s[\(\[\{](?P<year>\d{4})[\)\]\}].*?(?P<extension>\.\w+)?$",
        )
        .unwrap(),
        // Iron.Man.2008.1080p.WEBRip.DDP5.1.Atmos.x264.mkv
        Regex::new(r"(?s)^(?P<title>.*?)\.(?P<year>\d{4}).*?(?P<extension>\.\w+)?$").unwrap(),
        // Iron Man
        Regex::new(r"(?s)^(?P<year>)(?P<title>.*)$").unwrap(),
    ]
});

static EPISODE_RULES: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        // S01E05, s1 e5, S01 E05
        Regex::new(r"(?i)s ?(?P<season>\d{1,3}) ?e ?(?P<episode>\d{1,4})").unwrap(),
        // E05S01
        Regex::new(r"(?i)e ?(?P<episode>\d{1,4}) ?s ?(?P<season>\d{1,3})").unwrap(),
        // E05, Episode 5
        Regex::new(r"(?i)e ?(?P<episode>\d{1,4})").unwrap(),
    ]
});

/// Extract title, year and (for movies) extension from a normalized name.
///
/// Always returns a result: the catch-all rule takes the whole string as the
/// title with an empty year.
pub fn parse_name(name: &str, kind: MediaKind) -> ParsedName {
    let rules: &[Regex] = match kind {
        MediaKind::Movies => &*MOVIE_RULES,
        MediaKind::Series => &*SERIES_RULES,
    };

    rules
        .iter()
        .find_map(|re| re.captures(name))
        .map(|caps| name_from_captures(&caps))
        .unwrap_or_else(|| ParsedName {
            title: clean_title(name),
            ..Default::default()
        })
}

fn name_from_captures(caps: &Captures<'_>) -> ParsedName {
    ParsedName {
        title: clean_title(caps.name("title").map_or("", |m| m.as_str())),
        year: caps
            .name("year")
            .map(|m| m.as_str().to_string())
            .unwrap_or_default(),
        extension: caps
            .name("extension")
            .map(|m| m.as_str().to_string())
            .filter(|ext| !ext.is_empty()),
    }
}

/// Trim, then turn dot separators into spaces.
fn clean_title(raw: &str) -> String {
    raw.trim().replace('.', " ")
}

/// Extract season and episode numbers from an episode file name.
///
/// Season defaults to 1 when no rule captured one. Episode is absent when
/// nothing matched or the digits don't fit a `u32`.
pub fn parse_episode(name: &str) -> ParsedEpisode {
    let Some(caps) = EPISODE_RULES.iter().find_map(|re| re.captures(name)) else {
        return ParsedEpisode::default();
    };

    let number = |group: &str| {
        caps.name(group)
            .and_then(|m| m.as_str().parse::<u32>().ok())
    };

    ParsedEpisode {
        season: number("season").unwrap_or(1),
        episode: number("episode"),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
