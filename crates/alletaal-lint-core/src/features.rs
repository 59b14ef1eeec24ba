//! Per-word and per-sentence LiNT feature extraction.
//!
//! [`WordFeatures`] derives the word-level signals from one annotated token;
//! [`SentenceFeatures`] aggregates an ordered sequence of word features into
//! the four scalars the regression formula consumes. Both are immutable value
//! objects; neither can fail for valid annotated input.

use crate::frequency::{FrequencyLookup, LANGUAGE};
use crate::token::{AnnotatedToken, Upos};

/// Zipf value substituted when the lookup reports a word as unknown.
///
/// Calibration constant from the reference implementation; not tunable.
pub const UNKNOWN_WORD_ZIPF: f64 = 1.3555;

/// Fine-tag primary segments whose words carry a frequency value.
const FREQUENCY_TAGS: [&str; 4] = ["N", "ADJ", "WW", "BW"];

/// Fine-tag primary segments counting as noun-like (common nouns and the
/// residual SPEC category).
const NOUN_TAGS: [&str; 2] = ["N", "SPEC"];

/// Word-level features for one token.
#[derive(Debug, Clone, Copy)]
pub struct WordFeatures {
    /// Positional distance to the syntactic head; punctuation is fixed at 0.
    pub dep_length: usize,
    /// Whether the token is a content word (adverbs excluded).
    pub is_content_word: bool,
    /// Whether the fine tag marks the token as a common noun or SPEC.
    pub is_noun_or_spec: bool,
    /// Whether the coarse tag is anything but NOUN. Only consulted for
    /// noun-like tokens, where it flags non-prototypical nouns.
    pub is_non_noun_content: bool,
    /// Zipf-scale word frequency; `None` for tag categories that do not
    /// participate in the frequency feature.
    pub zipf: Option<f64>,
}

impl WordFeatures {
    /// Derive the features for one annotated token.
    pub fn extract(token: &AnnotatedToken, lexicon: &dyn FrequencyLookup) -> Self {
        Self {
            dep_length: dependency_distance(token),
            is_content_word: matches!(
                token.pos,
                Upos::Noun | Upos::Propn | Upos::Verb | Upos::Adj | Upos::Num | Upos::Sym
            ),
            is_noun_or_spec: NOUN_TAGS.contains(&token.primary_tag()),
            is_non_noun_content: token.pos != Upos::Noun,
            zipf: word_frequency(token, lexicon),
        }
    }
}

/// Distance between a token and its head, with punctuation pinned to 0.
fn dependency_distance(token: &AnnotatedToken) -> usize {
    if token.dep == "punct" {
        return 0;
    }
    token.head.abs_diff(token.index)
}

/// Zipf frequency for the token, when its category participates.
///
/// Only nouns, adjectives, verbs, and adverbs (by CGN primary tag) carry a
/// frequency; proper-noun forms (`eigen` sub-tag) are excluded. Unknown words
/// get [`UNKNOWN_WORD_ZIPF`].
fn word_frequency(token: &AnnotatedToken, lexicon: &dyn FrequencyLookup) -> Option<f64> {
    if !FREQUENCY_TAGS.contains(&token.primary_tag()) {
        return None;
    }
    if token.sub_tags().next() == Some("eigen") {
        return None;
    }
    let zipf = lexicon.zipf(&token.text, LANGUAGE);
    Some(if zipf > 0.0 { zipf } else { UNKNOWN_WORD_ZIPF })
}

/// The four sentence-level scalars the LiNT formula consumes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceFeatures {
    /// Mean Zipf frequency over the words that carry one; 0 when none do.
    pub word_frequency_log: f64,
    /// Maximum dependency distance, reduced by 2 when it exceeds 3.
    pub max_dep_length: usize,
    /// Content words per clause.
    pub content_words_per_clause: f64,
    /// Among noun-like tokens, the fraction whose coarse tag is not NOUN.
    pub concrete_noun_ratio: f64,
}

impl SentenceFeatures {
    /// Aggregate the word features of one sentence.
    ///
    /// An empty sequence produces all-zero features.
    pub fn aggregate(words: &[WordFeatures]) -> Self {
        Self {
            word_frequency_log: average_frequency(words),
            max_dep_length: max_dependency_length(words),
            content_words_per_clause: content_word_density(words),
            concrete_noun_ratio: concrete_noun_ratio(words),
        }
    }
}

fn average_frequency(words: &[WordFeatures]) -> f64 {
    let frequencies: Vec<f64> = words
        .iter()
        .filter_map(|w| w.zipf)
        .filter(|&f| f > 0.0)
        .collect();
    if frequencies.is_empty() {
        return 0.0;
    }
    frequencies.iter().sum::<f64>() / frequencies.len() as f64
}

fn max_dependency_length(words: &[WordFeatures]) -> usize {
    let max = words.iter().map(|w| w.dep_length).max().unwrap_or(0);

    // T-Scan's correction for the overestimation of long-range dependencies.
    if max > 3 { max - 2 } else { max }
}

fn content_word_density(words: &[WordFeatures]) -> f64 {
    let content = words.iter().filter(|w| w.is_content_word).count();
    content as f64 / clause_count() as f64
}

/// Clause count approximation: one clause per sentence, no sub-clause
/// detection. Inherited from the reference methodology.
const fn clause_count() -> usize {
    1
}

fn concrete_noun_ratio(words: &[WordFeatures]) -> f64 {
    let nouns = words.iter().filter(|w| w.is_noun_or_spec);
    let (total, non_noun) = nouns.fold((0usize, 0usize), |(total, non_noun), w| {
        (total + 1, non_noun + usize::from(w.is_non_noun_content))
    });
    if total == 0 {
        return 0.0;
    }
    non_noun as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::ZipfTable;

    fn token(text: &str, pos: Upos, tag: &str, index: usize, head: usize, dep: &str) -> AnnotatedToken {
        AnnotatedToken {
            text: text.to_string(),
            lemma: text.to_string(),
            pos,
            tag: tag.to_string(),
            gender: None,
            number: None,
            index,
            head,
            dep: dep.to_string(),
        }
    }

    #[test]
    fn punctuation_has_zero_dependency_distance() {
        let dot = token(".", Upos::Punct, "LET", 6, 2, "punct");
        let features = WordFeatures::extract(&dot, &ZipfTable::new());
        assert_eq!(features.dep_length, 0);
    }

    #[test]
    fn dependency_distance_is_absolute() {
        let forward = token("op", Upos::Adp, "VZ|init", 3, 5, "case");
        let backward = token("mat", Upos::Noun, "N|soort|ev", 5, 2, "obl");
        let lexicon = ZipfTable::new();
        assert_eq!(WordFeatures::extract(&forward, &lexicon).dep_length, 2);
        assert_eq!(WordFeatures::extract(&backward, &lexicon).dep_length, 3);
    }

    #[test]
    fn content_words_exclude_adverbs_and_function_words() {
        let lexicon = ZipfTable::new();
        let noun = token("kat", Upos::Noun, "N|soort|ev", 1, 2, "nsubj");
        let adverb = token("snel", Upos::Adv, "BW", 2, 3, "advmod");
        let determiner = token("de", Upos::Det, "LID|bep", 0, 1, "det");
        assert!(WordFeatures::extract(&noun, &lexicon).is_content_word);
        assert!(!WordFeatures::extract(&adverb, &lexicon).is_content_word);
        assert!(!WordFeatures::extract(&determiner, &lexicon).is_content_word);
    }

    #[test]
    fn noun_and_spec_tags_are_noun_like() {
        let lexicon = ZipfTable::new();
        let noun = token("kat", Upos::Noun, "N|soort|ev", 1, 2, "nsubj");
        let spec = token("enz.", Upos::X, "SPEC|afgebr", 4, 2, "dep");
        let verb = token("zit", Upos::Verb, "WW|pv|tgw", 2, 2, "root");
        assert!(WordFeatures::extract(&noun, &lexicon).is_noun_or_spec);
        assert!(WordFeatures::extract(&spec, &lexicon).is_noun_or_spec);
        assert!(!WordFeatures::extract(&verb, &lexicon).is_noun_or_spec);
    }

    #[test]
    fn frequency_only_for_participating_categories() {
        let lexicon = ZipfTable::new();
        let determiner = token("de", Upos::Det, "LID|bep", 0, 1, "det");
        let preposition = token("op", Upos::Adp, "VZ|init", 3, 5, "case");
        assert!(WordFeatures::extract(&determiner, &lexicon).zipf.is_none());
        assert!(WordFeatures::extract(&preposition, &lexicon).zipf.is_none());
    }

    #[test]
    fn proper_nouns_are_excluded_from_frequency() {
        let lexicon = ZipfTable::new();
        let proper = token("Amsterdam", Upos::Propn, "N|eigen|ev|basis", 2, 3, "obl");
        assert!(WordFeatures::extract(&proper, &lexicon).zipf.is_none());

        let common = token("stad", Upos::Noun, "N|soort|ev|basis", 2, 3, "obl");
        assert!(WordFeatures::extract(&common, &lexicon).zipf.is_some());
    }

    #[test]
    fn unknown_word_gets_fallback_constant() {
        let noun = token("fluxcompensator", Upos::Noun, "N|soort|ev", 1, 2, "nsubj");
        let features = WordFeatures::extract(&noun, &ZipfTable::new());
        assert_eq!(features.zipf, Some(UNKNOWN_WORD_ZIPF));
    }

    #[test]
    fn known_word_uses_table_value() {
        let mut lexicon = ZipfTable::new();
        lexicon.insert("kat", 4.6);
        let noun = token("kat", Upos::Noun, "N|soort|ev", 1, 2, "nsubj");
        let features = WordFeatures::extract(&noun, &lexicon);
        assert_eq!(features.zipf, Some(4.6));
    }

    #[test]
    fn untagged_token_has_no_frequency_and_is_not_noun_like() {
        let bare = token("…", Upos::X, "", 0, 0, "dep");
        let features = WordFeatures::extract(&bare, &ZipfTable::new());
        assert!(features.zipf.is_none());
        assert!(!features.is_noun_or_spec);
    }

    #[test]
    fn empty_sentence_aggregates_to_zeroes() {
        let features = SentenceFeatures::aggregate(&[]);
        assert_eq!(features.word_frequency_log, 0.0);
        assert_eq!(features.max_dep_length, 0);
        assert_eq!(features.content_words_per_clause, 0.0);
        assert_eq!(features.concrete_noun_ratio, 0.0);
    }

    #[test]
    fn long_dependency_maximum_is_reduced_by_two() {
        let words = [
            WordFeatures {
                dep_length: 5,
                is_content_word: false,
                is_noun_or_spec: false,
                is_non_noun_content: true,
                zipf: None,
            },
            WordFeatures {
                dep_length: 1,
                is_content_word: false,
                is_noun_or_spec: false,
                is_non_noun_content: true,
                zipf: None,
            },
        ];
        assert_eq!(SentenceFeatures::aggregate(&words).max_dep_length, 3);
    }

    #[test]
    fn short_dependency_maximum_is_unadjusted() {
        let words = [WordFeatures {
            dep_length: 3,
            is_content_word: false,
            is_noun_or_spec: false,
            is_non_noun_content: true,
            zipf: None,
        }];
        assert_eq!(SentenceFeatures::aggregate(&words).max_dep_length, 3);

        let boundary = [WordFeatures {
            dep_length: 4,
            is_content_word: false,
            is_noun_or_spec: false,
            is_non_noun_content: true,
            zipf: None,
        }];
        assert_eq!(SentenceFeatures::aggregate(&boundary).max_dep_length, 2);
    }

    #[test]
    fn average_frequency_ignores_words_without_one() {
        let words = [
            WordFeatures {
                dep_length: 0,
                is_content_word: true,
                is_noun_or_spec: true,
                is_non_noun_content: false,
                zipf: Some(4.0),
            },
            WordFeatures {
                dep_length: 0,
                is_content_word: false,
                is_noun_or_spec: false,
                is_non_noun_content: true,
                zipf: None,
            },
            WordFeatures {
                dep_length: 0,
                is_content_word: true,
                is_noun_or_spec: true,
                is_non_noun_content: false,
                zipf: Some(2.0),
            },
        ];
        let features = SentenceFeatures::aggregate(&words);
        assert!((features.word_frequency_log - 3.0).abs() < 1e-9);
    }

    #[test]
    fn concrete_ratio_zero_without_noun_like_tokens() {
        let words = [WordFeatures {
            dep_length: 1,
            is_content_word: true,
            is_noun_or_spec: false,
            is_non_noun_content: true,
            zipf: Some(4.0),
        }];
        assert_eq!(SentenceFeatures::aggregate(&words).concrete_noun_ratio, 0.0);
    }

    #[test]
    fn concrete_ratio_counts_non_noun_share() {
        let noun_like = |non_noun: bool| WordFeatures {
            dep_length: 0,
            is_content_word: true,
            is_noun_or_spec: true,
            is_non_noun_content: non_noun,
            zipf: None,
        };
        let words = [noun_like(true), noun_like(false), noun_like(false), noun_like(true)];
        let features = SentenceFeatures::aggregate(&words);
        assert!((features.concrete_noun_ratio - 0.5).abs() < 1e-9);
    }

    #[test]
    fn density_counts_content_words_per_clause() {
        let content = WordFeatures {
            dep_length: 1,
            is_content_word: true,
            is_noun_or_spec: false,
            is_non_noun_content: true,
            zipf: None,
        };
        let function = WordFeatures {
            dep_length: 1,
            is_content_word: false,
            is_noun_or_spec: false,
            is_non_noun_content: true,
            zipf: None,
        };
        let words = [content, function, content, content];
        let features = SentenceFeatures::aggregate(&words);
        assert!((features.content_words_per_clause - 3.0).abs() < 1e-9);
    }
}
