//! Command implementations.

use anyhow::Context;
use camino::Utf8Path;

use alletaal_lint_core::annotator::{Annotator, CommandAnnotator, UnconfiguredAnnotator};
use alletaal_lint_core::config::Config;
use alletaal_lint_core::frequency::ZipfTable;
use alletaal_lint_core::scoring::Scorer;

pub mod doctor;
pub mod info;
pub mod score;
pub mod sentence;
#[cfg(feature = "mcp")]
pub mod serve;

/// Read a file and validate its size against the configured limit.
///
/// Combines the file-read and size-validation steps that every scoring
/// command needs.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    // Preflight: check file size via metadata before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = metadata.len() as usize;
        if size > max {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    let content = std::fs::read_to_string(path.as_std_path())
        .with_context(|| format!("failed to read {path}"))?;
    Ok(content)
}

/// Load the word-frequency table the configuration points at.
///
/// No configured table is not an error: scoring then treats every word as
/// unknown and uses the fallback frequency.
pub fn load_lexicon(config: &Config) -> anyhow::Result<ZipfTable> {
    match config.frequency_file {
        Some(ref path) => ZipfTable::from_path(path)
            .with_context(|| format!("failed to load frequency table {path}")),
        None => Ok(ZipfTable::new()),
    }
}

/// Build the scoring pipeline from the configuration.
///
/// When no annotator command is configured the scorer is still constructed;
/// the first annotation request fails with a configuration error.
pub fn build_scorer(config: &Config) -> anyhow::Result<Scorer> {
    let annotator: Box<dyn Annotator> = match config.annotator_command {
        Some(ref command) => Box::new(
            CommandAnnotator::new(command.clone()).context("invalid annotator command")?,
        ),
        None => Box::new(UnconfiguredAnnotator),
    };
    let lexicon = load_lexicon(config)?;
    Ok(Scorer::new(annotator, Box::new(lexicon)))
}
