//! Core library for alletaal-lint.
//!
//! Implements LiNT (Leesbaarheidsinstrument voor Nederlandse Teksten)
//! readability scoring for Dutch text: four linguistic features per sentence
//! fed through a fixed regression, aggregated per document. Annotation
//! (tagging, dependency parsing, sentence segmentation) comes from an
//! external parser behind the [`annotator::Annotator`] trait; word
//! frequencies come from an externally supplied table behind
//! [`frequency::FrequencyLookup`].
//!
//! # Modules
//!
//! - [`token`] / [`conllu`] / [`annotator`] - annotated input and how to get it
//! - [`features`] / [`formula`] / [`scoring`] - the LiNT pipeline
//! - [`frequency`] - word-frequency lookup
//! - [`config`] - configuration loading and management
//! - [`markdown`] - markdown-to-prose stripping
//! - [`error`] - error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use alletaal_lint_core::conllu;
//! use alletaal_lint_core::frequency::ZipfTable;
//! use alletaal_lint_core::scoring::analyze_document;
//!
//! let sentences = conllu::parse(
//!     "1\tJa\tja\tINTJ\tTSW\t_\t0\troot\t_\t_\n",
//! ).expect("valid CoNLL-U");
//! let analysis = analyze_document(&sentences, &ZipfTable::new());
//! assert_eq!(analysis.sentence_count, 1);
//! ```
#![deny(unsafe_code)]

pub mod annotator;
pub mod config;
pub mod conllu;
pub mod error;
pub mod features;
pub mod formula;
pub mod frequency;
pub mod markdown;
pub mod scoring;
pub mod token;

pub use annotator::{Annotator, CommandAnnotator, UnconfiguredAnnotator};
pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use error::{AnnotateError, AnnotateResult, ConfigError, ConfigResult, LexiconError};
pub use features::{SentenceFeatures, WordFeatures, UNKNOWN_WORD_ZIPF};
pub use formula::{Difficulty, difficulty_level, lint_score};
pub use frequency::{FrequencyLookup, ZipfTable};
pub use scoring::{DocumentAnalysis, DocumentScore, ScoredSentence, Scorer, SentenceAnalysis};
pub use token::{AnnotatedSentence, AnnotatedToken, Upos};

/// Default maximum input size in bytes (5 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
