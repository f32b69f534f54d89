/*!
 * Error types for the tracksplit application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur while compiling a structure template or parsing
/// a tracklist
#[derive(Error, Debug)]
pub enum TracklistError {
    /// Two placeholders touch with no literal text between them, so the
    /// captures cannot be bounded
    #[error("ambiguous adjacent placeholders in template '{template}' at bytes {first} and {second}")]
    AmbiguousPlaceholders {
        /// The offending template
        template: String,
        /// Byte offset of the first placeholder token
        first: usize,
        /// Byte offset of the second placeholder token
        second: usize,
    },

    /// The template contains no placeholder tokens at all
    #[error("template '{template}' contains no placeholders")]
    NoPlaceholders {
        /// The offending template
        template: String,
    },

    /// The assembled match expression was rejected by the regex engine
    #[error("failed to compile template '{template}': {source}")]
    BadTemplate {
        /// The offending template
        template: String,
        /// Underlying regex error
        #[source]
        source: regex::Error,
    },

    /// A tracklist line did not match the active structure template
    #[error("line {index} does not match the structure template: '{line}'")]
    LineMismatch {
        /// 1-based line number within the tracklist
        index: usize,
        /// The offending line content
        line: String,
    },

    /// The tracklist text is blank after trimming
    #[error("tracklist is empty")]
    EmptyInput,

    /// No timestamps were recognized anywhere in the tracklist
    #[error("no timestamps found in tracklist")]
    NoTracksFound,
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from tracklist parsing
    #[error("Tracklist error: {0}")]
    Tracklist(#[from] TracklistError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
