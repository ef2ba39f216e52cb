use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::caption::{CaptionEntry, CaptionTrack};
use crate::errors::ConvertError;
use crate::formats::{self, FormatProvider, RenderOptions};
use crate::textnorm;
use crate::timecode::{self, TimecodeStyle};

// @module: SubRip format provider

/// How many bytes of the input the signature sniff looks at
const SNIFF_WINDOW: usize = 256;

// @const: SubRip timecode range line
static TIMECODE_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{2,}:\d{2}:\d{2},\d{3}\s*-->\s*\d{2,}:\d{2}:\d{2},\d{3}").unwrap()
});

/// SubRip (`.srt`) format provider
///
/// Detection keys on the leading sequence-number line followed by a
/// comma-separated timecode range; there is no file header.
#[derive(Debug, Default)]
pub struct SubRipProvider;

impl SubRipProvider {
    fn parse_block(&self, block: &formats::CueBlock<'_>) -> Result<Option<CaptionEntry>, ConvertError> {
        let mut idx = 0;

        // Sequence-number line; its value is not trusted for ordering
        if block.lines.len() > 1 && formats::is_sequence_line(block.lines[0]) {
            idx = 1;
        }

        let Some(&line) = block.lines.get(idx) else {
            return Ok(None);
        };
        if !line.contains("-->") {
            debug!("Skipping non-cue SubRip block at line {}", block.first_line);
            return Ok(None);
        }

        let line_no = block.first_line + idx;
        let (start_text, end_text) = formats::split_timecode_line(line).ok_or_else(|| {
            ConvertError::InvalidFormat {
                format: "SubRip",
                reason: format!("incomplete timecode range at line {}", line_no),
            }
        })?;

        let start_ms = timecode::parse(start_text, &TimecodeStyle::SUBRIP)
            .map_err(|source| ConvertError::MalformedTimecode { line: line_no, source })?;
        let end_ms = timecode::parse(end_text, &TimecodeStyle::SUBRIP)
            .map_err(|source| ConvertError::MalformedTimecode { line: line_no, source })?;

        let text = block.lines[idx + 1..].join("\n");
        let text = text.trim();
        if text.is_empty() {
            debug!("Skipping SubRip cue without text at line {}", block.first_line);
            return Ok(None);
        }

        Ok(Some(CaptionEntry::new(start_ms, end_ms, textnorm::markup_to_styled(text))))
    }
}

impl FormatProvider for SubRipProvider {
    fn name(&self) -> &'static str {
        "SubRip"
    }

    fn file_extension(&self) -> &'static str {
        "srt"
    }

    fn detect(&self, raw: &[u8]) -> bool {
        let stripped = textnorm::strip_bom(raw);
        let head: String = String::from_utf8_lossy(&stripped[..stripped.len().min(SNIFF_WINDOW)])
            .replace('\r', "");

        let mut lines = head.lines().filter(|line| !line.trim().is_empty());
        let Some(first) = lines.next() else {
            return false;
        };
        if !formats::is_sequence_line(first) {
            return false;
        }
        lines
            .next()
            .is_some_and(|second| TIMECODE_LINE_REGEX.is_match(second.trim()))
    }

    fn parse(&self, raw: &[u8]) -> Result<CaptionTrack, ConvertError> {
        if !self.detect(raw) {
            return Err(ConvertError::InvalidFormat {
                format: self.name(),
                reason: "missing sequence number and timecode signature".to_string(),
            });
        }

        let text = textnorm::to_canonical_text(raw).replace('\r', "");
        let blocks = formats::scan_blocks(&text);

        let mut track = CaptionTrack::new();
        for block in &blocks {
            if let Some(entry) = self.parse_block(block)? {
                track.entries.push(entry);
            }
        }

        if track.is_empty() {
            return Err(ConvertError::InvalidFormat {
                format: self.name(),
                reason: "no parsable cue blocks found".to_string(),
            });
        }

        Ok(track)
    }

    fn render(&self, track: &CaptionTrack, options: &RenderOptions) -> Result<Vec<u8>, ConvertError> {
        let mut out = String::new();

        for (index, entry) in track.entries.iter().enumerate() {
            entry.validate(index)?;

            out.push_str(&format!("{}\n", index + 1));
            out.push_str(&format!(
                "{} --> {}\n",
                timecode::format(entry.start_ms, &TimecodeStyle::SUBRIP),
                timecode::format(entry.end_ms, &TimecodeStyle::SUBRIP)
            ));
            out.push_str(&textnorm::styled_to_markup(&entry.text));
            out.push_str("\n\n");
        }

        let bytes = out.into_bytes();
        Ok(if options.add_bom { textnorm::add_bom(bytes) } else { bytes })
    }
}
