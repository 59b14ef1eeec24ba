//! End-to-end pipeline tests over fixed annotations.
//!
//! A live parser would make these tests nondeterministic, so the annotator
//! is a fixture returning hand-checked CoNLL-U and the frequency table is
//! built in memory.

use std::collections::HashMap;

use alletaal_lint_core::annotator::{Annotator, UnconfiguredAnnotator};
use alletaal_lint_core::error::{AnnotateError, AnnotateResult};
use alletaal_lint_core::frequency::ZipfTable;
use alletaal_lint_core::scoring::{Scorer, analyze_document, analyze_sentence};
use alletaal_lint_core::token::AnnotatedSentence;
use alletaal_lint_core::{conllu, UNKNOWN_WORD_ZIPF};

const SIMPLE_TEXT: &str = "De kat zit op de mat.";
const SIMPLE_CONLLU: &str = "\
# text = De kat zit op de mat.
1\tDe\tde\tDET\tLID|bep|stan|rest\tDefinite=Def\t2\tdet\t_\t_
2\tkat\tkat\tNOUN\tN|soort|ev|basis|zijd|stan\tGender=Com|Number=Sing\t3\tnsubj\t_\t_
3\tzit\tzitten\tVERB\tWW|pv|tgw|ev\tNumber=Sing\t0\troot\t_\t_
4\top\top\tADP\tVZ|init\t_\t6\tcase\t_\t_
5\tde\tde\tDET\tLID|bep|stan|rest\tDefinite=Def\t6\tdet\t_\t_
6\tmat\tmat\tNOUN\tN|soort|ev|basis|zijd|stan\tGender=Com|Number=Sing\t3\tobl\t_\tSpaceAfter=No
7\t.\t.\tPUNCT\tLET\t_\t3\tpunct\t_\t_
";

const COMPLEX_TEXT: &str = "De ingewikkelde bureaucratische procedures worden doorlopend ge\u{eb}valueerd door de verantwoordelijke ambtenaren.";
const COMPLEX_CONLLU: &str = "\
# text = De ingewikkelde bureaucratische procedures worden doorlopend ge\u{eb}valueerd door de verantwoordelijke ambtenaren.
1\tDe\tde\tDET\tLID|bep|stan|rest\tDefinite=Def\t4\tdet\t_\t_
2\tingewikkelde\tingewikkeld\tADJ\tADJ|prenom|basis|met-e|stan\tDegree=Pos\t4\tamod\t_\t_
3\tbureaucratische\tbureaucratisch\tADJ\tADJ|prenom|basis|met-e|stan\tDegree=Pos\t4\tamod\t_\t_
4\tprocedures\tprocedure\tNOUN\tN|soort|mv|basis\tNumber=Plur\t7\tnsubj:pass\t_\t_
5\tworden\tworden\tAUX\tWW|pv|tgw|mv\tNumber=Plur\t7\taux:pass\t_\t_
6\tdoorlopend\tdoorlopend\tADV\tBW\t_\t7\tadvmod\t_\t_
7\tge\u{eb}valueerd\tevalueren\tVERB\tWW|vd|vrij|zonder\tVerbForm=Part\t0\troot\t_\t_
8\tdoor\tdoor\tADP\tVZ|init\t_\t11\tcase\t_\t_
9\tde\tde\tDET\tLID|bep|stan|rest\tDefinite=Def\t11\tdet\t_\t_
10\tverantwoordelijke\tverantwoordelijk\tADJ\tADJ|prenom|basis|met-e|stan\tDegree=Pos\t11\tamod\t_\t_
11\tambtenaren\tambtenaar\tNOUN\tN|soort|mv|basis\tNumber=Plur\t7\tobl:agent\t_\tSpaceAfter=No
12\t.\t.\tPUNCT\tLET\t_\t7\tpunct\t_\t_
";

/// Annotator returning canned CoNLL-U per input text; unseen input
/// annotates to nothing, like a parser finding no sentences.
struct FixtureAnnotator {
    fixtures: HashMap<&'static str, &'static str>,
}

impl FixtureAnnotator {
    fn new() -> Self {
        let mut fixtures = HashMap::new();
        fixtures.insert(SIMPLE_TEXT, SIMPLE_CONLLU);
        fixtures.insert(COMPLEX_TEXT, COMPLEX_CONLLU);
        Self { fixtures }
    }
}

impl Annotator for FixtureAnnotator {
    fn annotate(&self, text: &str) -> AnnotateResult<Vec<AnnotatedSentence>> {
        let Some(fixture) = self.fixtures.get(text.trim()) else {
            return Ok(Vec::new());
        };
        conllu::parse(fixture)
    }
}

/// Frequency table covering the administrative vocabulary of the complex
/// fixture; everything else resolves through the unknown-word fallback.
fn lexicon() -> ZipfTable {
    let mut table = ZipfTable::new();
    table.insert("ingewikkelde", 3.5);
    table.insert("bureaucratische", 2.8);
    table.insert("procedures", 3.9);
    table.insert("worden", 6.2);
    table.insert("doorlopend", 3.4);
    table.insert("ge\u{eb}valueerd", 2.9);
    table.insert("verantwoordelijke", 4.0);
    table.insert("ambtenaren", 3.6);
    table
}

fn scorer() -> Scorer {
    Scorer::new(Box::new(FixtureAnnotator::new()), Box::new(lexicon()))
}

#[test]
fn simple_sentence_scores_higher_than_complex() {
    let scorer = scorer();
    let simple = scorer.score_sentence(SIMPLE_TEXT).unwrap();
    let complex = scorer.score_sentence(COMPLEX_TEXT).unwrap();

    assert!((0.0..=100.0).contains(&simple.lint_score));
    assert!((0.0..=100.0).contains(&complex.lint_score));
    assert!((1..=4).contains(&simple.difficulty_level));
    assert!((1..=4).contains(&complex.difficulty_level));
    assert_ne!(simple.lint_score, complex.lint_score);
    assert!(
        simple.lint_score > complex.lint_score,
        "expected {} > {}",
        simple.lint_score,
        complex.lint_score
    );
}

#[test]
fn simple_sentence_features_match_hand_computation() {
    let sentences = conllu::parse(SIMPLE_CONLLU).unwrap();
    let analysis = analyze_sentence(&sentences[0], &lexicon());

    // kat, zit, and mat are absent from the table, so each contributes the
    // fallback constant.
    assert!((analysis.word_frequency_log - UNKNOWN_WORD_ZIPF).abs() < 1e-12);
    // Longest arc is mat -> zit (3 positions); at the adjustment boundary,
    // so it stays as-is.
    assert_eq!(analysis.max_dependency_length, 3);
    assert!((analysis.content_words_proportion - 3.0).abs() < 1e-12);
    assert_eq!(analysis.concrete_nouns_proportion, 0.0);
    assert!((analysis.lint_score - 90.8).abs() < 1e-9);
    assert_eq!(analysis.difficulty_level, 4);
}

#[test]
fn complex_sentence_features_match_hand_computation() {
    let sentences = conllu::parse(COMPLEX_CONLLU).unwrap();
    let analysis = analyze_sentence(&sentences[0], &lexicon());

    // Eight words carry a table frequency, averaging 3.7875.
    assert!((analysis.word_frequency_log - 3.7875).abs() < 1e-9);
    // Longest arc is ambtenaren -> geëvalueerd (4 positions), adjusted to 2.
    assert_eq!(analysis.max_dependency_length, 2);
    assert!((analysis.content_words_proportion - 6.0).abs() < 1e-12);
    assert_eq!(analysis.concrete_nouns_proportion, 0.0);
    assert!((analysis.lint_score - 62.42).abs() < 1e-9);
}

#[test]
fn document_analysis_matches_segmentation() {
    let document = format!("{SIMPLE_CONLLU}\n{COMPLEX_CONLLU}");
    let sentences = conllu::parse(&document).unwrap();
    let analysis = analyze_document(&sentences, &lexicon());

    assert_eq!(analysis.sentence_count, sentences.len());
    assert_eq!(analysis.sentence_count, 2);
    assert_eq!(analysis.sentences[0].sentence, SIMPLE_TEXT);
    assert_eq!(analysis.sentences[1].sentence, COMPLEX_TEXT);

    // Mean of 90.8 and 62.42.
    assert!((analysis.document_score - 76.61).abs() < 1e-9);
    assert_eq!(analysis.document_level, 4);
    // 6 and 11 whitespace-delimited words.
    assert!((analysis.average_sentence_length - 8.5).abs() < 1e-9);
}

#[test]
fn unrecognized_text_degrades_to_empty_document() {
    let scorer = scorer();
    let score = scorer.score_document("Onbekende tekst zonder annotatie.").unwrap();
    assert_eq!(score.lint_score, 0.0);
    assert_eq!(score.difficulty_level, 1);
}

#[test]
fn unconfigured_annotator_error_propagates() {
    let scorer = Scorer::new(Box::new(UnconfiguredAnnotator), Box::new(ZipfTable::new()));
    assert!(matches!(
        scorer.score_document("De kat zit op de mat."),
        Err(AnnotateError::NotConfigured)
    ));
    assert!(matches!(
        scorer.score_sentence("De kat zit op de mat."),
        Err(AnnotateError::NotConfigured)
    ));
}
