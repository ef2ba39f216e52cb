use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::TimecodeError;

// @module: Timecode parsing and formatting

// @const: Timecode field regex, separator-agnostic
static TIMECODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2,}):(\d{2}):(\d{2})([.,])(\d+)$").unwrap()
});

/// Per-format timecode convention: which character separates the seconds
/// field from the fraction, and how many fraction digits the format writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimecodeStyle {
    /// Fraction separator character (`.` for WebVTT, `,` for SubRip)
    pub separator: char,

    /// Fixed width of the fraction field
    pub fraction_digits: u32,
}

impl TimecodeStyle {
    /// WebVTT convention: dot separator, millisecond fraction
    pub const WEBVTT: TimecodeStyle = TimecodeStyle { separator: '.', fraction_digits: 3 };

    /// SubRip convention: comma separator, millisecond fraction
    pub const SUBRIP: TimecodeStyle = TimecodeStyle { separator: ',', fraction_digits: 3 };

    /// Smallest representable step in milliseconds at this fraction width
    fn step_ms(&self) -> u64 {
        10u64.pow(3u32.saturating_sub(self.fraction_digits))
    }
}

/// Parse a fixed-grammar `HH:MM:SS<sep>fff` timecode into milliseconds.
///
/// Hours must be at least two digits, minutes and seconds exactly two, and
/// the fraction exactly `style.fraction_digits` wide. Minutes and seconds
/// of 60 or more are rejected rather than wrapped.
pub fn parse(text: &str, style: &TimecodeStyle) -> Result<u64, TimecodeError> {
    let bad_syntax = || TimecodeError::BadSyntax {
        text: text.to_string(),
        expected: "HH:MM:SS followed by a fixed-width fraction",
    };

    let caps = TIMECODE_REGEX.captures(text.trim()).ok_or_else(bad_syntax)?;

    if caps[4].chars().next() != Some(style.separator) {
        return Err(bad_syntax());
    }

    let fraction_text = caps.get(5).map(|m| m.as_str()).unwrap_or_default();
    if fraction_text.len() != style.fraction_digits as usize {
        return Err(bad_syntax());
    }

    // Captures are all-digit by construction; only width can still be wrong
    let hours: u64 = caps[1].parse().map_err(|_| bad_syntax())?;
    let minutes: u64 = caps[2].parse().map_err(|_| bad_syntax())?;
    let seconds: u64 = caps[3].parse().map_err(|_| bad_syntax())?;
    let fraction: u64 = fraction_text.parse().map_err(|_| bad_syntax())?;

    if minutes >= 60 {
        return Err(TimecodeError::FieldOutOfRange {
            text: text.to_string(),
            field: "minutes",
            value: minutes,
        });
    }
    if seconds >= 60 {
        return Err(TimecodeError::FieldOutOfRange {
            text: text.to_string(),
            field: "seconds",
            value: seconds,
        });
    }

    // Hours are the only unbounded field; minutes, seconds and fraction are
    // range-checked above, so their contribution cannot overflow on its own
    hours
        .checked_mul(3_600_000)
        .and_then(|h| h.checked_add(minutes * 60_000 + seconds * 1_000 + fraction * style.step_ms()))
        .ok_or_else(|| TimecodeError::FieldOutOfRange {
            text: text.to_string(),
            field: "hours",
            value: hours,
        })
}

/// Format a millisecond timestamp as `HH:MM:SS<sep>fff`.
///
/// Exact right inverse of [`parse`] for every value representable at the
/// style's fraction width; sub-units below that width are rounded.
pub fn format(ms: u64, style: &TimecodeStyle) -> String {
    let step = style.step_ms();
    let ms = if step > 1 {
        // Round to the nearest representable step
        (ms + step / 2) / step * step
    } else {
        ms
    };

    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let fraction = (ms % 1_000) / step;

    format!(
        "{:02}:{:02}:{:02}{}{:0width$}",
        hours,
        minutes,
        seconds,
        style.separator,
        fraction,
        width = style.fraction_digits as usize
    )
}
