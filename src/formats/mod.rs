/*!
 * Format provider implementations.
 *
 * This module defines the provider contract every subtitle format implements,
 * plus the shared cue-block scanner both providers parse with:
 * - `webvtt`: WebVTT (`.vtt`) provider
 * - `subrip`: SubRip (`.srt`) provider
 */

use std::fmt::Debug;

use crate::caption::CaptionTrack;
use crate::errors::ConvertError;

/// Common trait for all subtitle format providers
///
/// This trait defines the interface that all format implementations must
/// follow, allowing the registry to select them interchangeably by content
/// or by file extension.
pub trait FormatProvider: Debug + Send + Sync {
    /// Short human-readable format name ("WebVTT", "SubRip")
    fn name(&self) -> &'static str;

    /// File extension for the format, without the dot
    fn file_extension(&self) -> &'static str;

    /// Cheap structural sniff for the format's signature
    ///
    /// Total: returns `false` rather than failing on empty input, binary
    /// garbage, or content belonging to another format. Never a full parse.
    fn detect(&self, raw: &[u8]) -> bool;

    /// Parse raw file bytes into a caption track
    ///
    /// Re-validates `detect` on the same content, then scans the format's
    /// cue-block grammar. Returns a fully populated track or an error, never
    /// a partial result.
    fn parse(&self, raw: &[u8]) -> Result<CaptionTrack, ConvertError>;

    /// Render a caption track into the format's on-disk representation
    fn render(&self, track: &CaptionTrack, options: &RenderOptions) -> Result<Vec<u8>, ConvertError>;
}

/// Options applied when rendering a track
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Prepend a UTF-8 byte order mark to the output
    pub add_bom: bool,
}

/// One blank-line-delimited block of the normalized input
#[derive(Debug)]
pub(crate) struct CueBlock<'a> {
    /// 1-based line number of the block's first line
    pub first_line: usize,

    /// The block's non-blank lines, in order
    pub lines: Vec<&'a str>,
}

/// Split CR-normalized text into blank-line-separated blocks.
///
/// A run of one or more blank lines ends a block; end-of-input terminates
/// the final block even without a trailing blank line. Linear in input size.
pub(crate) fn scan_blocks(text: &str) -> Vec<CueBlock<'_>> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_first_line = 0usize;

    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(CueBlock { first_line: current_first_line, lines: current });
                current = Vec::new();
            }
        } else {
            if current.is_empty() {
                current_first_line = idx + 1;
            }
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(CueBlock { first_line: current_first_line, lines: current });
    }

    blocks
}

/// Split a cue timecode line into its start and end timecode texts.
///
/// Anything after the end timecode (WebVTT cue settings) is ignored.
pub(crate) fn split_timecode_line(line: &str) -> Option<(&str, &str)> {
    let (start, rest) = line.split_once("-->")?;
    let end = rest.split_whitespace().next()?;
    Some((start.trim(), end))
}

/// True if the line consists only of ASCII digits (a cue sequence number)
pub(crate) fn is_sequence_line(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit())
}

pub mod subrip;
pub mod webvtt;
