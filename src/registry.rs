/*!
 * Provider registry and dispatch.
 *
 * Providers are tried in a fixed priority order when detecting an unknown
 * file, most specific signature first: the literal `WEBVTT` header must win
 * before SubRip's looser sequence-number sniff gets a chance.
 */

use once_cell::sync::Lazy;

use crate::errors::ConvertError;
use crate::formats::subrip::SubRipProvider;
use crate::formats::webvtt::WebVttProvider;
use crate::formats::FormatProvider;

// @const: Registered providers in detection priority order
static PROVIDERS: Lazy<Vec<Box<dyn FormatProvider>>> = Lazy::new(|| {
    vec![
        Box::new(WebVttProvider) as Box<dyn FormatProvider>,
        Box::new(SubRipProvider) as Box<dyn FormatProvider>,
    ]
});

/// All registered providers, in detection priority order
pub fn providers() -> impl Iterator<Item = &'static dyn FormatProvider> {
    PROVIDERS.iter().map(|p| p.as_ref())
}

/// Select the provider whose signature matches the content.
///
/// Tries each registered provider's `detect` in priority order and returns
/// the first match. An exhausted list is the recoverable
/// [`ConvertError::NoMatch`] condition, not a panic.
pub fn detect_provider(raw: &[u8]) -> Result<&'static dyn FormatProvider, ConvertError> {
    providers()
        .find(|provider| provider.detect(raw))
        .ok_or(ConvertError::NoMatch)
}

/// Look up the provider for a file extension, case-insensitive.
///
/// A leading dot is tolerated so both `vtt` and `.vtt` resolve.
pub fn provider_for_extension(extension: &str) -> Result<&'static dyn FormatProvider, ConvertError> {
    let wanted = extension.trim().trim_start_matches('.');
    providers()
        .find(|provider| provider.file_extension().eq_ignore_ascii_case(wanted))
        .ok_or_else(|| ConvertError::NotFound {
            extension: extension.to_string(),
        })
}
