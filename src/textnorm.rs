/*!
 * Text normalization helpers shared by all format providers.
 *
 * Covers byte-order-mark handling, coercion of raw file bytes to canonical
 * UTF-8 text, and translation between each format's inline markup and the
 * canonical [`StyledText`] representation.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::caption::StyledText;

/// UTF-8 byte order mark
const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

// @const: Inline tag regex; captures closing slash and tag body
static INLINE_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<(/?)([^<>]*)>").unwrap()
});

/// Remove a leading UTF-8 byte order mark, if present
pub fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(&UTF8_BOM).unwrap_or(bytes)
}

/// Prepend a UTF-8 byte order mark
pub fn add_bom(mut bytes: Vec<u8>) -> Vec<u8> {
    let mut out = UTF8_BOM.to_vec();
    out.append(&mut bytes);
    out
}

/// Coerce raw file bytes to canonical UTF-8 text.
///
/// A UTF-16 byte order mark selects a UTF-16 decode; otherwise valid UTF-8 is
/// taken as-is (minus its BOM) and anything else falls back to a Latin-1
/// byte-to-char mapping so that no input is ever rejected at this stage.
pub fn to_canonical_text(bytes: &[u8]) -> String {
    match bytes {
        [0xFF, 0xFE, rest @ ..] => decode_utf16(rest, u16::from_le_bytes),
        [0xFE, 0xFF, rest @ ..] => decode_utf16(rest, u16::from_be_bytes),
        _ => {
            let stripped = strip_bom(bytes);
            match std::str::from_utf8(stripped) {
                Ok(text) => text.to_string(),
                Err(_) => stripped.iter().map(|&b| b as char).collect(),
            }
        }
    }
}

fn decode_utf16(bytes: &[u8], combine: fn([u8; 2]) -> u16) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| combine([pair[0], pair[1]]))
        .collect();
    char::decode_utf16(units.into_iter())
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

/// Translate a format's inline markup into canonical styled text.
///
/// Emphasis tags (`<b>`, `<i>`, `<u>`, any case) are normalized to lowercase;
/// every other tag — WebVTT voice/class spans, karaoke timestamps, SubRip
/// `<font>` — is dropped while its inner text is kept.
pub fn markup_to_styled(text: &str) -> StyledText {
    let normalized = INLINE_TAG_REGEX.replace_all(text, |caps: &regex::Captures| {
        let closing = &caps[1];
        let body = caps[2].trim();
        // Tag name ends at the first attribute, class or annotation delimiter
        let name: String = body
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match name.as_str() {
            "b" | "i" | "u" => format!("<{}{}>", closing, name),
            _ => String::new(),
        }
    });
    StyledText::from_canonical(normalized.into_owned())
}

/// Translate canonical styled text into a format's inline markup.
///
/// Both shipped formats use the HTML-like tag convention the canonical form
/// is stored in, so this is the identity on the canonical string.
pub fn styled_to_markup(text: &StyledText) -> String {
    text.as_str().to_string()
}
