use once_cell::sync::Lazy;
use regex::Regex;

// @module: Raw title cleanup and junk filtering

/// Sentinel title marking an entry for exclusion from the track list,
/// e.g. intro/outro segments the author does not want as files
pub const JUNK_SENTINEL: &str = "!junk!";

// @const: Leading ordinal decoration, e.g. "3. ", "4 - " or "12)"
static LEADING_INDEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{1,2}(?:\. | - |\))").unwrap()
});

/// Clean up a raw title extracted from a tracklist.
///
/// Trims surrounding whitespace, optionally removes one leading ordinal
/// decoration, drops a stray leading/trailing hyphen the decoration may
/// have left behind, and replaces path separators so the result is safe
/// as a filename component.
pub fn sanitize_title(raw: &str, kill_index: bool) -> String {
    let mut title = raw.trim().to_string();
    if kill_index {
        // At most one removal, anchored to the start
        title = LEADING_INDEX.replace(&title, "").into_owned();
    }
    let title = title.trim();
    let title = title.strip_prefix('-').unwrap_or(title);
    let title = title.strip_suffix('-').unwrap_or(title);
    title.trim().replace('/', "-")
}

/// Whether a sanitized title is the junk sentinel and its track should be
/// dropped from the output
pub fn is_junk(title: &str) -> bool {
    title == JUNK_SENTINEL
}
