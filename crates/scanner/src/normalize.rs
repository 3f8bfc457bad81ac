//! Release-noise removal for raw listing names.
//!
//! Removal order:
//! 1. Bracket groups mixing digits with anything else (`[YTS.MX]`, `(x265 10bit)`).
//!    A bare `(2019)` survives.
//! 2. Resolutions (`720p`, `(1080p)`).
//! 3. Container and codec extensions as whole words.
//! 4. `Season N`.
//! 5. Scene tags: season codes, bit depth, streaming services, codecs, uploaders.

use regex::Regex;
use std::sync::LazyLock;

static RE_MIXED_BRACKETS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\((?:\D.+?|.+?\D)\)|\[(?:\D.+?|.+?\D)\]").unwrap()
});

static RE_RESOLUTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\(?(?:240|360|480|720|1080|1440|2160)p?\)?").unwrap()
});

static RE_CONTAINER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:mp4|mkv|wmv|m4v|mov|avi|flv|webm|flac|mka|m4a|aac|ogg)\b").unwrap()
});

static RE_SEASON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)season ?\d+").unwrap());

static RE_SCENE_TAGS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:S\d{1,3}|\d+bit|dsnp|web-dl|ddp\d+\.? ?\d|hevc|-?Vyndros)").unwrap()
});

/// Strip quality, codec and container noise from a raw file or folder name.
///
/// Never fails; a name with no noise comes back trimmed. The output is a
/// fixed point: `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(raw_name: &str) -> String {
    let mut current = strip_once(raw_name);
    // Each pass only deletes characters, so this terminates.
    loop {
        let next = strip_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn strip_once(name: &str) -> String {
    let mut name = name.to_string();
    for re in [
        &*RE_MIXED_BRACKETS,
        &*RE_RESOLUTION,
        &*RE_CONTAINER,
        &*RE_SEASON_WORD,
        &*RE_SCENE_TAGS,
    ] {
        name = re.replace_all(&name, "").into_owned();
    }
    name.trim().trim_end_matches(['.', '-', '_']).to_string()
}
