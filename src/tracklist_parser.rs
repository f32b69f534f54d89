use std::fmt;
use std::ops::Range;

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::errors::TracklistError;
use crate::pattern_compiler::CompiledMatcher;
use crate::title_sanitizer;

// @module: Tracklist segmentation and timestamp normalization

// @const: Default timestamp regex - optional hour group, then minutes:seconds
static DEFAULT_TIMESTAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:(\d{1,2}):)?(\d+):(\d{1,2})").unwrap()
});

/// Timestamp components captured from one tracklist entry; components
/// absent from the source default to zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimestampParts {
    /// Hours component
    pub hours: u64,
    /// Minutes component
    pub minutes: u64,
    /// Seconds component
    pub seconds: u64,
}

impl TimestampParts {
    /// Normalize the components to a single millisecond offset.
    ///
    /// Pure and order-preserving: a larger timestamp always yields a
    /// larger offset.
    pub fn to_ms(&self) -> u64 {
        self.hours
            .saturating_mul(3600)
            .saturating_add(self.minutes.saturating_mul(60))
            .saturating_add(self.seconds)
            .saturating_mul(1000)
    }
}

impl fmt::Display for TimestampParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// One track boundary in the source audio
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Start offset in milliseconds
    pub start_ms: u64,

    /// End offset in milliseconds; `None` on the final track, meaning
    /// "extends to the end of the source audio"
    pub end_ms: Option<u64>,

    /// Sanitized title, safe to use as a filename component
    pub title: String,
}

/// Options controlling how a tracklist is segmented
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Structure template per the pattern compiler syntax; `None` selects
    /// the built-in timestamp scanner
    pub structure: Option<String>,

    /// Entry separator used with a structure template
    pub delimiter: String,

    /// Strip one leading ordinal decoration from every title
    pub kill_index: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            structure: None,
            delimiter: "\n".to_string(),
            kill_index: true,
        }
    }
}

// One (timestamp, raw title) pair before normalization and sanitizing
#[derive(Debug, Clone)]
struct RawEntry {
    timestamp: TimestampParts,
    title: String,
}

/// Parse a free-form tracklist into ordered track boundaries.
///
/// With a structure template the text is split on the delimiter and every
/// non-blank entry must match the compiled template. Without one the whole
/// text is scanned for `(hh:)mm:ss`-style timestamps and the text between
/// successive timestamps becomes the raw titles.
///
/// Each track ends where the next one starts; the final track's end is
/// `None`. Entries whose sanitized title is the junk sentinel are dropped
/// after pairing, so the boundaries of surrounding tracks are unaffected.
pub fn parse_tracklist(text: &str, options: &ParseOptions) -> Result<Vec<Track>, TracklistError> {
    if text.trim().is_empty() {
        return Err(TracklistError::EmptyInput);
    }

    let entries = match &options.structure {
        Some(template) => {
            let matcher = CompiledMatcher::compile(template)?;
            segment_with_matcher(text, &options.delimiter, &matcher)?
        }
        None => segment_with_default(text)?,
    };

    debug!("Segmented tracklist into {} raw entries", entries.len());

    Ok(assemble_tracks(&entries, options.kill_index))
}

// Template path: one entry per delimited, non-blank line
fn segment_with_matcher(
    text: &str,
    delimiter: &str,
    matcher: &CompiledMatcher,
) -> Result<Vec<RawEntry>, TracklistError> {
    let mut entries = Vec::new();
    for (index, line) in text.split(delimiter).enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let caps = matcher
            .captures(line)
            .ok_or_else(|| TracklistError::LineMismatch {
                index: index + 1,
                line: line.to_string(),
            })?;
        let timestamp = TimestampParts {
            hours: parse_component(caps.hour.as_deref()),
            minutes: parse_component(caps.minute.as_deref()),
            seconds: parse_component(caps.second.as_deref()),
        };
        entries.push(RawEntry {
            timestamp,
            title: caps.title.unwrap_or_default(),
        });
    }
    Ok(entries)
}

// Default path: scan the whole text for timestamps; the spans between
// them (and before the first one) are the raw titles, paired with the
// timestamps in order of appearance
fn segment_with_default(text: &str) -> Result<Vec<RawEntry>, TracklistError> {
    let mut timestamps: Vec<TimestampParts> = Vec::new();
    let mut spans: Vec<Range<usize>> = Vec::new();

    for caps in DEFAULT_TIMESTAMP.captures_iter(text) {
        let span = match caps.get(0) {
            Some(m) => m.range(),
            None => continue,
        };
        timestamps.push(TimestampParts {
            hours: parse_component(caps.get(1).map(|m| m.as_str())),
            minutes: parse_component(caps.get(2).map(|m| m.as_str())),
            seconds: parse_component(caps.get(3).map(|m| m.as_str())),
        });
        spans.push(span);
    }

    if timestamps.is_empty() {
        return Err(TracklistError::NoTracksFound);
    }

    // Every gap yields one (possibly blank) title so the positional
    // pairing with the timestamps cannot shift; only a zero-length
    // leading or trailing piece is absent rather than blank
    let mut titles = Vec::new();
    let mut cursor = 0;
    for (i, span) in spans.iter().enumerate() {
        let gap = &text[cursor..span.start];
        if i > 0 || !gap.is_empty() {
            titles.push(gap.to_string());
        }
        cursor = span.end;
    }
    let tail = &text[cursor..];
    if !tail.is_empty() {
        titles.push(tail.to_string());
    }
    // A final token with nothing after it is still an entry
    if titles.len() < timestamps.len() {
        titles.push(String::new());
    }

    if titles.len() != timestamps.len() {
        warn!(
            "Found {} timestamps but {} title segments; extra items are dropped",
            timestamps.len(),
            titles.len()
        );
    }

    Ok(timestamps
        .into_iter()
        .zip(titles)
        .map(|(timestamp, title)| RawEntry { timestamp, title })
        .collect())
}

// Capture rules only ever pass digit runs, so the sole way parse can
// fail is a run too long for u64; clamp rather than zero so the bogus
// entry sorts after the real ones instead of in front of them
fn parse_component(digits: Option<&str>) -> u64 {
    let Some(digits) = digits else {
        return 0;
    };
    match digits.parse() {
        Ok(value) => value,
        Err(_) => {
            warn!("Timestamp component '{}' is out of range; clamping", digits);
            u64::MAX
        }
    }
}

fn assemble_tracks(entries: &[RawEntry], kill_index: bool) -> Vec<Track> {
    let starts: Vec<u64> = entries.iter().map(|e| e.timestamp.to_ms()).collect();

    for (i, pair) in starts.windows(2).enumerate() {
        if pair[1] < pair[0] {
            warn!(
                "Non-monotonic timestamps: entry {} at {}ms starts before entry {} at {}ms",
                i + 2,
                pair[1],
                i + 1,
                pair[0]
            );
        }
    }

    let mut tracks: Vec<Track> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| Track {
            start_ms: starts[i],
            end_ms: starts.get(i + 1).copied(),
            title: title_sanitizer::sanitize_title(&entry.title, kill_index),
        })
        .collect();

    // Junk entries are dropped only after pairing, so the neighbors keep
    // the boundaries their own timestamps gave them
    tracks.retain(|track| !title_sanitizer::is_junk(&track.title));
    tracks
}
