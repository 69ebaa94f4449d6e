use std::sync::LazyLock;

use regex::Regex;

/// `YYYY.MM.DD` date segments used by daily index rotation.
static DATE_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}\.\d{2}\.\d{2}").expect("valid regex"));

/// Runs of six or more digits (compact dates, epoch stamps, rollover counters).
static LONG_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{6,}").expect("valid regex"));

/// Strip rotation-specific parts of an index name so that all generations of
/// one logical index share a color.
pub fn normalize_index_name(name: &str) -> String {
    let without_dates = DATE_SEGMENT.replace_all(name, "");
    LONG_NUMBER.replace_all(&without_dates, "").into_owned()
}
