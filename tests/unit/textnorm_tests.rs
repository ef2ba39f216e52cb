/*!
 * Tests for text normalization helpers
 */

use subconv::caption::StyledText;
use subconv::textnorm;

/// Test that a UTF-8 BOM is stripped
#[test]
fn test_strip_bom_withUtf8Bom_shouldRemoveIt() {
    let bytes = [0xEF, 0xBB, 0xBF, b'W', b'E', b'B'];
    assert_eq!(textnorm::strip_bom(&bytes), b"WEB");
}

/// Test that content without a BOM is untouched
#[test]
fn test_strip_bom_withoutBom_shouldReturnInputUnchanged() {
    assert_eq!(textnorm::strip_bom(b"WEBVTT"), b"WEBVTT");
    assert_eq!(textnorm::strip_bom(b""), b"");
}

/// Test that add_bom prepends exactly the UTF-8 BOM
#[test]
fn test_add_bom_withContent_shouldPrependBom() {
    let out = textnorm::add_bom(b"abc".to_vec());
    assert_eq!(out, [0xEF, 0xBB, 0xBF, b'a', b'b', b'c']);
    assert_eq!(textnorm::strip_bom(&out), b"abc");
}

/// Test canonical decoding of plain UTF-8
#[test]
fn test_to_canonical_text_withUtf8_shouldDecode() {
    assert_eq!(textnorm::to_canonical_text("héllo".as_bytes()), "héllo");
}

/// Test canonical decoding strips a UTF-8 BOM
#[test]
fn test_to_canonical_text_withUtf8Bom_shouldStripBom() {
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(b"WEBVTT");
    assert_eq!(textnorm::to_canonical_text(&bytes), "WEBVTT");
}

/// Test Latin-1 fallback for bytes that are not valid UTF-8
#[test]
fn test_to_canonical_text_withLatin1Bytes_shouldFallBack() {
    // "café" in Latin-1: é = 0xE9, invalid as UTF-8
    let bytes = [b'c', b'a', b'f', 0xE9];
    assert_eq!(textnorm::to_canonical_text(&bytes), "café");
}

/// Test UTF-16LE decoding selected by its BOM
#[test]
fn test_to_canonical_text_withUtf16LeBom_shouldDecode() {
    let mut bytes = vec![0xFF, 0xFE];
    for unit in "Hi".encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    assert_eq!(textnorm::to_canonical_text(&bytes), "Hi");
}

/// Test UTF-16BE decoding selected by its BOM
#[test]
fn test_to_canonical_text_withUtf16BeBom_shouldDecode() {
    let mut bytes = vec![0xFE, 0xFF];
    for unit in "Hi".encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    assert_eq!(textnorm::to_canonical_text(&bytes), "Hi");
}

/// Test that emphasis tags are kept and normalized to lowercase
#[test]
fn test_markup_to_styled_withEmphasisTags_shouldNormalize() {
    let styled = textnorm::markup_to_styled("<B>bold</B> and <i>italic</i> and <U>under</U>");
    assert_eq!(styled.as_str(), "<b>bold</b> and <i>italic</i> and <u>under</u>");
}

/// Test that unsupported tags are dropped but their text kept
#[test]
fn test_markup_to_styled_withUnsupportedTags_shouldDropTagsKeepText() {
    let styled = textnorm::markup_to_styled("<font color=\"red\">red</font> <v Speaker>line</v>");
    assert_eq!(styled.as_str(), "red line");
}

/// Test that WebVTT karaoke timestamps inside cue text are dropped
#[test]
fn test_markup_to_styled_withKaraokeTimestamps_shouldDropThem() {
    let styled = textnorm::markup_to_styled("one<00:00:01.000> two");
    assert_eq!(styled.as_str(), "one two");
}

/// Test that plain text with newlines passes through untouched
#[test]
fn test_markup_to_styled_withPlainMultilineText_shouldPassThrough() {
    let styled = textnorm::markup_to_styled("first line\nsecond line");
    assert_eq!(styled.as_str(), "first line\nsecond line");
}

/// Test that styled -> markup is the identity on the canonical form
#[test]
fn test_styled_to_markup_withCanonicalText_shouldRoundTrip() {
    let original = "<i>Hello</i>\n<b>World</b>";
    let styled = textnorm::markup_to_styled(original);
    assert_eq!(textnorm::styled_to_markup(&styled), original);
}

/// Test round-trip through the styled representation for the emphasis subset
#[test]
fn test_markupRoundTrip_withEmphasisSubset_shouldBeLossless() {
    let texts = ["plain", "<b>b</b>", "<i>i</i>", "<u>u</u>", "<b><i>bi</i></b>"];
    for text in texts {
        let styled = textnorm::markup_to_styled(text);
        assert_eq!(textnorm::styled_to_markup(&styled), text);
    }
}

/// Test StyledText blank detection
#[test]
fn test_styled_text_withWhitespaceOnly_shouldBeBlank() {
    assert!(StyledText::from_canonical("  \n ").is_blank());
    assert!(!StyledText::from_canonical("x").is_blank());
}
