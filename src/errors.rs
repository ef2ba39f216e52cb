/*!
 * Error types for the subconv library.
 *
 * This module contains custom error types for the different stages of a
 * conversion, using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors produced by the timecode grammar
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimecodeError {
    /// The text does not match the fixed-width `HH:MM:SS<sep>fff` grammar
    #[error("timecode {text:?} does not match {expected}")]
    BadSyntax {
        /// The offending timecode text
        text: String,
        /// Human-readable description of the expected grammar
        expected: &'static str,
    },

    /// A field parsed numerically but exceeds its allowed range
    #[error("{field} field out of range in timecode {text:?}: {value}")]
    FieldOutOfRange {
        /// The offending timecode text
        text: String,
        /// Which field was out of range ("minutes", "seconds")
        field: &'static str,
        /// The parsed value
        value: u64,
    },
}

/// Errors that can occur during format detection, parsing and rendering
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The content does not belong to the format, or contains no parsable cues
    #[error("not a valid {format} file: {reason}")]
    InvalidFormat {
        /// Name of the format whose provider rejected the content
        format: &'static str,
        /// What was wrong with the content
        reason: String,
    },

    /// A timecode line was found but its text fails the timecode grammar
    #[error("malformed timecode at line {line}: {source}")]
    MalformedTimecode {
        /// 1-based line number in the normalized input
        line: usize,
        /// The underlying grammar failure
        source: TimecodeError,
    },

    /// A caption entry cannot be rendered because its time range is inverted or empty
    #[error("invalid caption entry {index}: end time {end_ms}ms is not after start time {start_ms}ms")]
    InvalidEntry {
        /// 0-based index of the entry in the track
        index: usize,
        /// Entry start in milliseconds
        start_ms: u64,
        /// Entry end in milliseconds
        end_ms: u64,
    },

    /// No registered provider recognized the content
    #[error("no registered format provider recognized the content")]
    NoMatch,

    /// No provider is registered for the requested file extension
    #[error("no format provider registered for extension {extension:?}")]
    NotFound {
        /// The extension that was looked up
        extension: String,
    },
}
