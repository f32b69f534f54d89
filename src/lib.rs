/*!
 * # tracksplit
 *
 * A Rust library for turning free-form tracklist text, as pasted under
 * music-compilation videos, into ordered track boundaries and sanitized
 * titles for an external audio splitter.
 *
 * ## Features
 *
 * - Built-in recognition of `(hh:)mm:ss`-style timestamps in free text
 * - User-supplied structure templates (`\h \m \s \t \n` placeholders)
 *   compiled into anchored matchers
 * - Millisecond normalization of captured timestamps
 * - Title cleanup: ordinal stripping, stray-hyphen removal, filename-safe
 *   path separator replacement
 * - `!junk!` sentinel for excluding intro/outro segments without shifting
 *   the boundaries of surrounding tracks
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `pattern_compiler`: structure template compilation into matchers
 * - `tracklist_parser`: segmentation, timestamp normalization and the
 *   track model
 * - `title_sanitizer`: raw title cleanup and junk filtering
 * - `errors`: custom error types for the application
 *
 * Audio decoding, downloading, slicing and tag writing are external
 * collaborators consuming this library's output; they are not part of
 * this crate.
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod errors;
pub mod pattern_compiler;
pub mod title_sanitizer;
pub mod tracklist_parser;

// Re-export main types for easier usage
pub use errors::{AppError, TracklistError};
pub use pattern_compiler::{CompiledMatcher, EntryCaptures, PlaceholderKind};
pub use title_sanitizer::{sanitize_title, JUNK_SENTINEL};
pub use tracklist_parser::{parse_tracklist, ParseOptions, TimestampParts, Track};
