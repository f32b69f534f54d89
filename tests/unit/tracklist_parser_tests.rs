/*!
 * Tests for tracklist segmentation and timestamp normalization
 */

use tracksplit::errors::TracklistError;
use tracksplit::tracklist_parser::{parse_tracklist, ParseOptions, TimestampParts};
use crate::common;

/// Test millisecond normalization of timestamp components
#[test]
fn test_to_ms_withHoursMinutesSeconds_shouldSumComponents() {
    let parts = TimestampParts { hours: 1, minutes: 2, seconds: 3 };
    assert_eq!(parts.to_ms(), 3_723_000);
}

/// Test that normalization preserves ordering across unit boundaries
#[test]
fn test_to_ms_withLargerTimestamp_shouldYieldLargerOffset() {
    let just_seconds = TimestampParts { hours: 0, minutes: 0, seconds: 59 };
    let one_minute = TimestampParts { hours: 0, minutes: 1, seconds: 0 };
    let one_hour = TimestampParts { hours: 1, minutes: 0, seconds: 0 };

    assert!(just_seconds.to_ms() < one_minute.to_ms());
    assert!(one_minute.to_ms() < one_hour.to_ms());
    assert_eq!(TimestampParts::default().to_ms(), 0);
}

/// Test the default matcher on a typical pasted tracklist
#[test]
fn test_parse_withDefaultMatcher_shouldProduceOrderedTracks() {
    let tracks = parse_tracklist(common::SIMPLE_TRACKLIST, &ParseOptions::default()).unwrap();

    let titles: Vec<&str> = tracks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Intro", "Song One", "Song Two"]);

    let times: Vec<(u64, Option<u64>)> = tracks.iter().map(|t| (t.start_ms, t.end_ms)).collect();
    assert_eq!(
        times,
        vec![(0, Some(90_000)), (90_000, Some(225_000)), (225_000, None)]
    );
}

/// Test that hour-bearing timestamps are recognized by the default matcher
#[test]
fn test_parse_withHourTimestamps_shouldNormalizeCorrectly() {
    let tracks = parse_tracklist(
        "Opening - 0:00\nFinale - 1:02:03",
        &ParseOptions::default(),
    )
    .unwrap();

    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].end_ms, Some(3_723_000));
    assert_eq!(tracks[1].start_ms, 3_723_000);
    assert_eq!(tracks[1].end_ms, None);
}

/// Test the structure template path end to end
#[test]
fn test_parse_withTemplate_shouldParseEachLine() {
    let options = ParseOptions {
        structure: Some(common::TEMPLATE.to_string()),
        ..ParseOptions::default()
    };
    let tracks = parse_tracklist(common::TEMPLATED_TRACKLIST, &options).unwrap();

    let titles: Vec<&str> = tracks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Intro", "Song One", "Song Two"]);
    assert_eq!(tracks[0].start_ms, 0);
    assert_eq!(tracks[1].start_ms, 90_000);
    assert_eq!(tracks[2].start_ms, 225_000);
    assert_eq!(tracks[2].end_ms, None);
}

/// Test that a non-matching line is reported, not silently skipped
#[test]
fn test_parse_withTemplateMismatch_shouldReportOffendingLine() {
    let options = ParseOptions {
        structure: Some(common::TEMPLATE.to_string()),
        ..ParseOptions::default()
    };
    let result = parse_tracklist("1. 0:00 - Intro\nthis is garbage", &options);

    match result {
        Err(TracklistError::LineMismatch { index, line }) => {
            assert_eq!(index, 2);
            assert_eq!(line, "this is garbage");
        }
        other => panic!("Expected LineMismatch, got {:?}", other),
    }
}

/// Test that blank lines between entries are skipped on the template path
#[test]
fn test_parse_withBlankLines_shouldSkipThem() {
    let options = ParseOptions {
        structure: Some(common::TEMPLATE.to_string()),
        ..ParseOptions::default()
    };
    let tracks = parse_tracklist("1. 0:00 - Intro\n\n2. 1:30 - Song One\n", &options).unwrap();

    assert_eq!(tracks.len(), 2);
}

/// Test a custom entry delimiter with a structure template
#[test]
fn test_parse_withCustomDelimiter_shouldSplitOnIt() {
    let options = ParseOptions {
        structure: Some(r"\t | \m:\s".to_string()),
        delimiter: ";".to_string(),
        kill_index: true,
    };
    let tracks = parse_tracklist("Intro | 0:00;Song One | 1:30", &options).unwrap();

    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].title, "Intro");
    assert_eq!(tracks[1].title, "Song One");
    assert_eq!(tracks[1].start_ms, 90_000);
}

/// Test an ambiguous template surfacing as a compile error from parse
#[test]
fn test_parse_withAmbiguousTemplate_shouldFailCompile() {
    let options = ParseOptions {
        structure: Some(r"\m\s \t".to_string()),
        ..ParseOptions::default()
    };
    let result = parse_tracklist("130 Song", &options);

    assert!(matches!(
        result,
        Err(TracklistError::AmbiguousPlaceholders { .. })
    ));
}

/// Test empty and whitespace-only input
#[test]
fn test_parse_withBlankInput_shouldFailEmptyInput() {
    assert!(matches!(
        parse_tracklist("", &ParseOptions::default()),
        Err(TracklistError::EmptyInput)
    ));
    assert!(matches!(
        parse_tracklist("  \n \n", &ParseOptions::default()),
        Err(TracklistError::EmptyInput)
    ));
}

/// Test text without any timestamp under the default matcher
#[test]
fn test_parse_withNoTimestamps_shouldFailNoTracksFound() {
    let result = parse_tracklist("just some words\nand more words", &ParseOptions::default());
    assert!(matches!(result, Err(TracklistError::NoTracksFound)));
}

/// Test that an entry without title text keeps its own boundary instead
/// of stealing the next entry's title
#[test]
fn test_parse_withUntitledEntry_shouldKeepBoundaryAlignment() {
    let tracks = parse_tracklist("0:00\n1:30 Song B", &ParseOptions::default()).unwrap();

    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].start_ms, 0);
    assert_eq!(tracks[0].end_ms, Some(90_000));
    assert_eq!(tracks[0].title, "");
    assert_eq!(tracks[1].start_ms, 90_000);
    assert_eq!(tracks[1].end_ms, None);
    assert_eq!(tracks[1].title, "Song B");
}

/// Test that a final timestamp with nothing after it still becomes a track
#[test]
fn test_parse_withUntitledFinalEntry_shouldKeepIt() {
    let tracks = parse_tracklist("0:00 Song A\n1:30", &ParseOptions::default()).unwrap();

    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].title, "Song A");
    assert_eq!(tracks[0].end_ms, Some(90_000));
    assert_eq!(tracks[1].start_ms, 90_000);
    assert_eq!(tracks[1].title, "");
    assert_eq!(tracks[1].end_ms, None);
}

/// Test that a minutes run too long for u64 clamps instead of degrading
/// to a plausible-looking zero boundary
#[test]
fn test_parse_withOverflowingMinutes_shouldClampNotZero() {
    let tracks = parse_tracklist(
        "Broken - 99999999999999999999:00",
        &ParseOptions::default(),
    )
    .unwrap();

    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].start_ms, u64::MAX);
    assert_eq!(tracks[0].title, "Broken");
}

/// Test the human-readable timestamp rendering
#[test]
fn test_display_withTimestampParts_shouldFormatComponents() {
    let parts = TimestampParts { hours: 1, minutes: 2, seconds: 3 };
    assert_eq!(format!("{}", parts), "1:02:03");
}

/// Test that junk entries are dropped without shifting neighbor boundaries
#[test]
fn test_parse_withJunkEntry_shouldPreserveNeighborBoundaries() {
    let tracks = parse_tracklist(
        "!junk! - 0:00\n1. Song One - 1:30\n2. Song Two - 3:45",
        &ParseOptions::default(),
    )
    .unwrap();

    let titles: Vec<&str> = tracks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Song One", "Song Two"]);

    // Song One keeps the start its own timestamp gave it, not the junk
    // entry's start
    assert_eq!(tracks[0].start_ms, 90_000);
    assert_eq!(tracks[0].end_ms, Some(225_000));
    assert_eq!(tracks[1].start_ms, 225_000);
    assert_eq!(tracks[1].end_ms, None);
}

/// Test the permissive handling of non-monotonic timestamps
#[test]
fn test_parse_withNonMonotonicTimestamps_shouldStillProduceTracks() {
    let tracks = parse_tracklist("Late - 3:00\nEarly - 1:00", &ParseOptions::default()).unwrap();

    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].start_ms, 180_000);
    assert_eq!(tracks[0].end_ms, Some(60_000));
    assert_eq!(tracks[1].start_ms, 60_000);
}

/// Test that index stripping can be disabled end to end
#[test]
fn test_parse_withKeepIndex_shouldPreserveOrdinals() {
    let options = ParseOptions {
        kill_index: false,
        ..ParseOptions::default()
    };
    let tracks = parse_tracklist(common::SIMPLE_TRACKLIST, &options).unwrap();

    assert_eq!(tracks[0].title, "1. Intro");
    assert_eq!(tracks[1].title, "2. Song One");
}
