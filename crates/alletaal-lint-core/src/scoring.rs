//! Sentence and document scoring.
//!
//! Pure aggregation over already-annotated sentences lives in the free
//! functions ([`analyze_sentence`], [`analyze_document`], [`document_score`]);
//! [`Scorer`] couples them with an [`Annotator`] and a [`FrequencyLookup`]
//! to score raw text. Per-sentence work is independent, so results always
//! come back in input order and nothing here holds mutable state.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::annotator::Annotator;
use crate::features::{SentenceFeatures, WordFeatures};
use crate::formula::{self, round2};
use crate::frequency::FrequencyLookup;
use crate::error::AnnotateResult;
use crate::token::AnnotatedSentence;

/// A sentence with its LiNT score and difficulty level.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ScoredSentence {
    /// The sentence text.
    pub sentence: String,
    /// LiNT readability score (0–100, higher = easier).
    pub lint_score: f64,
    /// Difficulty level (1–4, 1 = most difficult).
    pub difficulty_level: u8,
}

/// A sentence's score together with the four features behind it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SentenceAnalysis {
    /// The sentence text.
    pub sentence: String,
    /// LiNT readability score (0–100, higher = easier).
    pub lint_score: f64,
    /// Difficulty level (1–4, 1 = most difficult).
    pub difficulty_level: u8,
    /// Average log word frequency.
    pub word_frequency_log: f64,
    /// Maximum dependency length after the long-range adjustment.
    pub max_dependency_length: usize,
    /// Content words per clause.
    pub content_words_proportion: f64,
    /// Proportion of broadly concrete nouns.
    pub concrete_nouns_proportion: f64,
}

impl SentenceAnalysis {
    /// The score/level pair without the feature detail.
    pub fn scored(&self) -> ScoredSentence {
        ScoredSentence {
            sentence: self.sentence.clone(),
            lint_score: self.lint_score,
            difficulty_level: self.difficulty_level,
        }
    }
}

/// Document-level score summary.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DocumentScore {
    /// Average LiNT readability score (0–100, higher = easier).
    pub lint_score: f64,
    /// Overall difficulty level (1–4, 1 = most difficult).
    pub difficulty_level: u8,
}

/// Detailed document analysis with per-sentence breakdown.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DocumentAnalysis {
    /// Average LiNT score over all sentences, rounded to two decimals.
    pub document_score: f64,
    /// Difficulty level of the document score.
    pub document_level: u8,
    /// Number of sentences.
    pub sentence_count: usize,
    /// Average words per sentence (whitespace-delimited).
    pub average_sentence_length: f64,
    /// Per-sentence analyses, in document order.
    pub sentences: Vec<SentenceAnalysis>,
}

/// Score one annotated sentence.
pub fn analyze_sentence(
    sentence: &AnnotatedSentence,
    lexicon: &dyn FrequencyLookup,
) -> SentenceAnalysis {
    let words: Vec<WordFeatures> = sentence
        .tokens
        .iter()
        .map(|token| WordFeatures::extract(token, lexicon))
        .collect();
    let features = SentenceFeatures::aggregate(&words);

    let score = formula::lint_score(
        features.word_frequency_log,
        features.max_dep_length,
        features.content_words_per_clause,
        features.concrete_noun_ratio,
    );

    SentenceAnalysis {
        sentence: sentence.text.clone(),
        lint_score: score,
        difficulty_level: formula::difficulty_level(score).level(),
        word_frequency_log: features.word_frequency_log,
        max_dependency_length: features.max_dep_length,
        content_words_proportion: features.content_words_per_clause,
        concrete_nouns_proportion: features.concrete_noun_ratio,
    }
}

/// Score a sequence of annotated sentences as one document.
///
/// An empty sequence yields a document score of 0.0 rather than an error.
#[tracing::instrument(skip_all, fields(sentences = sentences.len()))]
pub fn analyze_document(
    sentences: &[AnnotatedSentence],
    lexicon: &dyn FrequencyLookup,
) -> DocumentAnalysis {
    let analyses: Vec<SentenceAnalysis> = sentences
        .iter()
        .map(|sentence| analyze_sentence(sentence, lexicon))
        .collect();

    let scores: Vec<f64> = analyses.iter().map(|a| a.lint_score).collect();
    let score = document_score(&scores);

    DocumentAnalysis {
        document_score: score,
        document_level: formula::difficulty_level(score).level(),
        sentence_count: analyses.len(),
        average_sentence_length: average_sentence_length(sentences),
        sentences: analyses,
    }
}

/// Mean of sentence scores, rounded to two decimals; 0.0 for no sentences.
pub fn document_score(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    round2(scores.iter().sum::<f64>() / scores.len() as f64)
}

fn average_sentence_length(sentences: &[AnnotatedSentence]) -> f64 {
    if sentences.is_empty() {
        return 0.0;
    }
    let words: usize = sentences
        .iter()
        .map(|s| s.text.split_whitespace().count())
        .sum();
    words as f64 / sentences.len() as f64
}

/// Text-in, score-out pipeline over injected collaborators.
///
/// Holds the external annotator and the frequency lookup; both are read-only
/// and safely shared, so one `Scorer` serves concurrent callers.
pub struct Scorer {
    annotator: Box<dyn Annotator>,
    lexicon: Box<dyn FrequencyLookup>,
}

impl Scorer {
    /// Couple an annotator with a frequency lookup.
    pub fn new(annotator: Box<dyn Annotator>, lexicon: Box<dyn FrequencyLookup>) -> Self {
        Self { annotator, lexicon }
    }

    /// Analyze `text` as a single sentence, with feature detail.
    ///
    /// All tokens the annotator returns are treated as one unit, whatever
    /// segmentation it reports.
    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    pub fn analyze_sentence(&self, text: &str) -> AnnotateResult<SentenceAnalysis> {
        let sentences = self.annotator.annotate(text)?;
        let tokens = sentences
            .into_iter()
            .flat_map(|sentence| sentence.tokens)
            .collect();
        let pooled = AnnotatedSentence {
            text: text.to_string(),
            tokens,
        };
        Ok(analyze_sentence(&pooled, &*self.lexicon))
    }

    /// Score `text` as a single sentence.
    pub fn score_sentence(&self, text: &str) -> AnnotateResult<ScoredSentence> {
        Ok(self.analyze_sentence(text)?.scored())
    }

    /// Analyze `text` as a document, sentence by sentence.
    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    pub fn analyze_document(&self, text: &str) -> AnnotateResult<DocumentAnalysis> {
        let sentences = self.annotator.annotate(text)?;
        Ok(analyze_document(&sentences, &*self.lexicon))
    }

    /// Score `text` as a document.
    pub fn score_document(&self, text: &str) -> AnnotateResult<DocumentScore> {
        let analysis = self.analyze_document(text)?;
        Ok(DocumentScore {
            lint_score: analysis.document_score,
            difficulty_level: analysis.document_level,
        })
    }
}
