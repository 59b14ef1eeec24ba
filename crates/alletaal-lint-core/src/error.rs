//! Error types for alletaal-lint-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while obtaining annotations from the external parser.
///
/// Feature extraction and scoring never fail for valid annotated input;
/// every error in the pipeline originates here.
#[derive(Error, Debug)]
pub enum AnnotateError {
    /// No annotator command is configured.
    #[error("no annotator command configured; set `annotator_command` in the configuration")]
    NotConfigured,

    /// The annotator command could not be launched.
    #[error("failed to launch annotator `{command}`: {source}")]
    Unavailable {
        /// The command that was attempted.
        command: String,
        /// The underlying launch failure.
        #[source]
        source: std::io::Error,
    },

    /// The annotator ran but exited unsuccessfully.
    #[error("annotator exited with {status}: {stderr}")]
    Failed {
        /// The annotator's exit status.
        status: std::process::ExitStatus,
        /// Captured standard error output.
        stderr: String,
    },

    /// The annotator's output was not valid CoNLL-U.
    #[error("invalid CoNLL-U at line {line}: {message}")]
    Conllu {
        /// One-based line number of the offending line.
        line: usize,
        /// What was wrong with it.
        message: String,
    },
}

/// Result type alias using [`AnnotateError`].
pub type AnnotateResult<T> = Result<T, AnnotateError>;

/// Errors that can occur while loading the word-frequency table.
#[derive(Error, Debug)]
pub enum LexiconError {
    /// The frequency file could not be read.
    #[error("failed to read frequency table {path}: {source}")]
    Read {
        /// Path of the frequency file.
        path: Utf8PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A line in the frequency file was not `word<TAB>zipf`.
    #[error("invalid frequency entry in {path} at line {line}")]
    Parse {
        /// Path of the frequency file.
        path: Utf8PathBuf,
        /// One-based line number of the offending entry.
        line: usize,
    },
}

/// Result type alias using [`LexiconError`].
pub type LexiconResult<T> = Result<T, LexiconError>;
