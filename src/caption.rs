use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::ConvertError;

// @module: Format-neutral caption model

/// Canonical in-memory caption text.
///
/// Holds an HTML-subset string carrying `<b>`, `<i>` and `<u>` emphasis and
/// literal newlines for multi-line cues. Providers obtain it through the
/// textnorm conversions; timecode logic treats it as opaque.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyledText(String);

impl StyledText {
    /// Wrap text that is already in the canonical markup
    pub fn from_canonical(text: impl Into<String>) -> Self {
        StyledText(text.into())
    }

    /// The canonical markup string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the text is empty after trimming
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for StyledText {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// @struct: Single caption entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionEntry {
    // @field: Start time in ms
    pub start_ms: u64,

    // @field: End time in ms
    pub end_ms: u64,

    // @field: Caption text in canonical markup
    pub text: StyledText,
}

impl CaptionEntry {
    /// Creates a new caption entry without validating the time range
    pub fn new(start_ms: u64, end_ms: u64, text: StyledText) -> Self {
        CaptionEntry { start_ms, end_ms, text }
    }

    // @checks: Time range is non-empty and non-inverted
    // @returns: InvalidEntry with the entry's track index on failure
    pub fn validate(&self, index: usize) -> Result<(), ConvertError> {
        if self.end_ms <= self.start_ms {
            return Err(ConvertError::InvalidEntry {
                index,
                start_ms: self.start_ms,
                end_ms: self.end_ms,
            });
        }
        Ok(())
    }
}

/// Ordered sequence of caption entries for one file.
///
/// Insertion order is display order: parse appends in scan order and render
/// walks the same order. The track does not re-sort entries and does not
/// enforce that entries are disjoint in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionTrack {
    /// Caption entries in display order
    pub entries: Vec<CaptionEntry>,
}

impl CaptionTrack {
    /// Create an empty track
    pub fn new() -> Self {
        CaptionTrack { entries: Vec::new() }
    }

    /// Number of entries in the track
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the track holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for CaptionTrack {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Caption track")?;
        writeln!(f, "Entries: {}", self.entries.len())?;
        Ok(())
    }
}
