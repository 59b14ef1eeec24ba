//! Word-frequency lookup.
//!
//! LiNT's frequency feature reads from an externally supplied table mapping
//! words to Zipf-scale (log) frequencies. The crate does not ship a corpus;
//! [`ZipfTable`] loads whatever `word<TAB>zipf` file the configuration points
//! at, and an absent table simply reports every word as unknown (the scorer
//! then substitutes its calibrated fallback constant).

use std::collections::HashMap;

use camino::Utf8Path;

use crate::error::{LexiconError, LexiconResult};

/// Language code the scoring pipeline queries frequencies for.
pub const LANGUAGE: &str = "nl";

/// A read-only word-frequency source.
///
/// Returns the Zipf-scale frequency of `word` in the given language, or
/// `0.0` when the word (or the language) is unknown. Implementations are
/// shared across concurrent scoring calls and must be stateless.
pub trait FrequencyLookup: Send + Sync {
    /// Look up the Zipf-scale frequency of `word`, `0.0` when unknown.
    fn zipf(&self, word: &str, lang: &str) -> f64;
}

/// An in-memory frequency table keyed by lowercased word.
#[derive(Debug, Clone)]
pub struct ZipfTable {
    language: String,
    entries: HashMap<String, f64>,
}

impl Default for ZipfTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ZipfTable {
    /// Create an empty table for Dutch. Every lookup reports unknown.
    pub fn new() -> Self {
        Self {
            language: LANGUAGE.to_string(),
            entries: HashMap::new(),
        }
    }

    /// Load a table from a `word<TAB>zipf` file.
    ///
    /// Blank lines and lines starting with `#` are skipped. Lookups are
    /// case-insensitive; duplicate words keep the last value.
    #[tracing::instrument]
    pub fn from_path(path: &Utf8Path) -> LexiconResult<Self> {
        let content = std::fs::read_to_string(path.as_std_path()).map_err(|e| {
            LexiconError::Read {
                path: path.to_path_buf(),
                source: e,
            }
        })?;

        let mut table = Self::new();
        for (number, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((word, value)) = line.split_once('\t') else {
                return Err(LexiconError::Parse {
                    path: path.to_path_buf(),
                    line: number + 1,
                });
            };
            let zipf: f64 = value.trim().parse().map_err(|_| LexiconError::Parse {
                path: path.to_path_buf(),
                line: number + 1,
            })?;
            table.insert(word.trim(), zipf);
        }

        tracing::debug!(entries = table.len(), "frequency table loaded");
        Ok(table)
    }

    /// Insert or replace an entry.
    pub fn insert(&mut self, word: &str, zipf: f64) {
        self.entries.insert(word.to_lowercase(), zipf);
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FrequencyLookup for ZipfTable {
    fn zipf(&self, word: &str, lang: &str) -> f64 {
        if lang != self.language {
            return 0.0;
        }
        self.entries
            .get(&word.to_lowercase())
            .copied()
            .unwrap_or(0.0)
    }
}
