use log::debug;

use crate::caption::{CaptionEntry, CaptionTrack};
use crate::errors::ConvertError;
use crate::formats::{self, FormatProvider, RenderOptions};
use crate::textnorm;
use crate::timecode::{self, TimecodeStyle};

// @module: WebVTT format provider

/// How many bytes of the input the signature sniff looks at
const SNIFF_WINDOW: usize = 16;

/// WebVTT (`.vtt`) format provider
///
/// Detection keys on the literal `WEBVTT` header; cue timecodes use a dot
/// separator with a three-digit millisecond fraction.
#[derive(Debug, Default)]
pub struct WebVttProvider;

impl WebVttProvider {
    fn parse_block(&self, block: &formats::CueBlock<'_>) -> Result<Option<CaptionEntry>, ConvertError> {
        let mut idx = 0;

        // Optional numeric cue id line
        if block.lines.len() > 1 && formats::is_sequence_line(block.lines[0]) {
            idx = 1;
        }

        let Some(&line) = block.lines.get(idx) else {
            return Ok(None);
        };
        if !line.contains("-->") {
            // Not a cue block; NOTE/STYLE/REGION blocks land here too
            debug!("Skipping non-cue WebVTT block at line {}", block.first_line);
            return Ok(None);
        }

        let line_no = block.first_line + idx;
        let (start_text, end_text) = formats::split_timecode_line(line).ok_or_else(|| {
            ConvertError::InvalidFormat {
                format: "WebVTT",
                reason: format!("incomplete timecode range at line {}", line_no),
            }
        })?;

        let start_ms = timecode::parse(start_text, &TimecodeStyle::WEBVTT)
            .map_err(|source| ConvertError::MalformedTimecode { line: line_no, source })?;
        let end_ms = timecode::parse(end_text, &TimecodeStyle::WEBVTT)
            .map_err(|source| ConvertError::MalformedTimecode { line: line_no, source })?;

        let text = block.lines[idx + 1..].join("\n");
        let text = text.trim();
        if text.is_empty() {
            debug!("Skipping WebVTT cue without text at line {}", block.first_line);
            return Ok(None);
        }

        Ok(Some(CaptionEntry::new(start_ms, end_ms, textnorm::markup_to_styled(text))))
    }
}

impl FormatProvider for WebVttProvider {
    fn name(&self) -> &'static str {
        "WebVTT"
    }

    fn file_extension(&self) -> &'static str {
        "vtt"
    }

    fn detect(&self, raw: &[u8]) -> bool {
        let stripped = textnorm::strip_bom(raw);
        let head: String = String::from_utf8_lossy(&stripped[..stripped.len().min(SNIFF_WINDOW)])
            .replace('\r', "");

        match head.strip_prefix("WEBVTT") {
            // Header may stand alone or carry a trailing description
            Some(rest) => rest.is_empty() || rest.starts_with(['\n', ' ', '\t']),
            None => false,
        }
    }

    fn parse(&self, raw: &[u8]) -> Result<CaptionTrack, ConvertError> {
        if !self.detect(raw) {
            return Err(ConvertError::InvalidFormat {
                format: self.name(),
                reason: "missing WEBVTT header".to_string(),
            });
        }

        let text = textnorm::to_canonical_text(raw).replace('\r', "");
        let blocks = formats::scan_blocks(&text);

        let mut track = CaptionTrack::new();
        for block in &blocks {
            // The header block and any metadata attached to it carry no cues
            if block.first_line == 1 {
                continue;
            }
            if let Some(first) = block.lines.first() {
                if first.starts_with("NOTE") || first.starts_with("STYLE") || first.starts_with("REGION") {
                    continue;
                }
            }
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
        let mut out = String::from("WEBVTT\n\n");

        for (index, entry) in track.entries.iter().enumerate() {
            entry.validate(index)?;

            out.push_str(&format!("{}\n", index + 1));
            out.push_str(&format!(
                "{} --> {}\n",
                timecode::format(entry.start_ms, &TimecodeStyle::WEBVTT),
                timecode::format(entry.end_ms, &TimecodeStyle::WEBVTT)
            ));
            out.push_str(&textnorm::styled_to_markup(&entry.text));
            out.push_str("\n\n");
        }

        let bytes = out.into_bytes();
        Ok(if options.add_bom { textnorm::add_bom(bytes) } else { bytes })
    }
}
