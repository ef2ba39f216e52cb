use anyhow::{Context, Result, anyhow};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::caption::CaptionTrack;
use crate::errors::ConvertError;
use crate::file_utils::FileManager;
use crate::formats::{FormatProvider, RenderOptions};
use crate::registry;

// @module: Conversion pipeline and file orchestration

/// Convert raw subtitle bytes to the target provider's format.
///
/// One conversion: detect the source provider, parse into a track, render
/// with the target provider. The track lives only for this call.
pub fn convert_bytes(
    raw: &[u8],
    target: &dyn FormatProvider,
    options: &RenderOptions,
) -> Result<Vec<u8>, ConvertError> {
    let source = registry::detect_provider(raw)?;
    debug!("Detected source format: {}", source.name());

    let track = source.parse(raw)?;
    debug!("Parsed {} caption entries", track.len());

    target.render(&track, options)
}

/// Parse raw subtitle bytes with whichever provider claims them
pub fn parse_bytes(raw: &[u8]) -> Result<CaptionTrack, ConvertError> {
    let (_, track) = detect_and_parse(raw)?;
    Ok(track)
}

/// Detect the source provider and parse in one pass.
///
/// Returns the provider alongside the track so callers that report the
/// detected format do not need a second detection round.
pub fn detect_and_parse(raw: &[u8]) -> Result<(&'static dyn FormatProvider, CaptionTrack), ConvertError> {
    let source = registry::detect_provider(raw)?;
    let track = source.parse(raw)?;
    Ok((source, track))
}

/// File-level conversion driver used by the CLI
pub struct Converter {
    // @field: Target format provider
    target: &'static dyn FormatProvider,

    // @field: Render options applied to every output
    options: RenderOptions,
}

impl Converter {
    /// Create a converter targeting the provider registered for `extension`
    pub fn for_extension(extension: &str, options: RenderOptions) -> Result<Self> {
        let target = registry::provider_for_extension(extension)
            .with_context(|| format!("Unsupported target format: {}", extension))?;
        Ok(Converter { target, options })
    }

    /// The target format provider
    pub fn target(&self) -> &'static dyn FormatProvider {
        self.target
    }

    /// Convert a single file, writing next to the input unless `output` is given.
    ///
    /// Refuses to overwrite the input file itself (converting `a.vtt` to
    /// `vtt` in place would truncate the file being read).
    pub fn convert_file(&self, input: &Path, output: Option<&Path>) -> Result<PathBuf> {
        let output_path = match output {
            Some(path) => path.to_path_buf(),
            None => FileManager::sibling_with_extension(input, self.target.file_extension()),
        };
        // Canonicalize so dot-relative or symlinked spellings of the input
        // cannot slip past the guard; fall back to a literal comparison when
        // the output does not exist yet
        let same_file = match (std::fs::canonicalize(input), std::fs::canonicalize(&output_path)) {
            (Ok(resolved_input), Ok(resolved_output)) => resolved_input == resolved_output,
            _ => output_path == input,
        };
        if same_file {
            return Err(anyhow!(
                "Output path equals input path: {:?} — refusing to overwrite the source",
                input
            ));
        }

        let raw = FileManager::read_bytes(input)?;
        let rendered = convert_bytes(&raw, self.target, &self.options)
            .with_context(|| format!("Failed to convert {:?}", input))?;
        FileManager::write_bytes(&output_path, &rendered)?;

        info!("Converted {:?} -> {:?}", input, output_path);
        Ok(output_path)
    }

    /// Convert a file or every recognizable subtitle file under a directory.
    ///
    /// Returns the paths written. Directory mode skips files no registered
    /// provider claims and files already in the target format.
    pub fn convert_path(&self, input: &Path, output: Option<&Path>) -> Result<Vec<PathBuf>> {
        if FileManager::file_exists(input) {
            return Ok(vec![self.convert_file(input, output)?]);
        }
        if !FileManager::dir_exists(input) {
            return Err(anyhow!("Input path does not exist: {:?}", input));
        }
        if output.is_some() {
            return Err(anyhow!("--output cannot be used with a directory input"));
        }

        let mut written = Vec::new();
        for entry in WalkDir::new(input).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();

            let Some(extension) = path.extension().map(|e| e.to_string_lossy().to_lowercase())
            else {
                continue;
            };
            if registry::provider_for_extension(&extension).is_err() {
                continue;
            }
            if extension.eq_ignore_ascii_case(self.target.file_extension()) {
                debug!("Skipping {:?}: already in target format", path);
                continue;
            }

            match self.convert_file(path, None) {
                Ok(output_path) => written.push(output_path),
                Err(e) => warn!("Skipping {:?}: {:#}", path, e),
            }
        }

        if written.is_empty() {
            warn!("No convertible subtitle files found under {:?}", input);
        }
        Ok(written)
    }
}
