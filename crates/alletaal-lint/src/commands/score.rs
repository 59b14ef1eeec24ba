//! Score command — document-level LiNT readability scoring.

use std::time::Duration;

use anyhow::{Context, bail};
use camino::Utf8PathBuf;
use clap::Args;
use indicatif::ProgressBar;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use alletaal_lint_core::config::Config;
use alletaal_lint_core::formula::Difficulty;
use alletaal_lint_core::scoring::DocumentAnalysis;
use alletaal_lint_core::{conllu, markdown, scoring};

use super::{build_scorer, load_lexicon, read_input_file};

/// Output format for scoring results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary.
    #[default]
    Table,
    /// Machine-readable JSON.
    Json,
    /// Comma-separated values.
    Csv,
}

/// Arguments for the `score` subcommand.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// File to analyze. `.conllu` files are read pre-annotated; `.md` files
    /// are stripped to prose before annotation.
    pub file: Option<Utf8PathBuf>,

    /// Text to analyze instead of a file.
    #[arg(short = 't', long, conflicts_with = "file")]
    pub text: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,

    /// Include per-sentence results.
    #[arg(short = 'd', long)]
    pub detailed: bool,

    /// Write results to a file instead of stdout.
    #[arg(short = 'o', long)]
    pub output: Option<Utf8PathBuf>,

    /// Fail when the document scores below this value.
    #[arg(long)]
    pub min_score: Option<f64>,
}

/// Score a document for readability.
#[instrument(name = "cmd_score", skip_all)]
pub fn cmd_score(
    args: ScoreArgs,
    global_json: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = ?args.file, format = ?args.format, detailed = args.detailed, "executing score command");

    let analysis = analyze_input(&args, config, max_input_bytes)?;

    let format = if global_json {
        OutputFormat::Json
    } else {
        args.format
    };

    match format {
        OutputFormat::Json => {
            let rendered = render_json(&analysis, args.detailed)?;
            emit(&rendered, args.output.as_deref())?;
        }
        OutputFormat::Csv => {
            let rendered = render_csv(&analysis, args.detailed);
            emit(&rendered, args.output.as_deref())?;
        }
        OutputFormat::Table => print_table(&analysis, args.detailed),
    }

    // Readability gate
    if let Some(min) = args.min_score.or(config.min_score)
        && analysis.document_score < min
    {
        bail!(
            "document scores {:.2} (minimum: {:.2}). Shorten sentences or use more common words.",
            analysis.document_score,
            min,
        );
    }

    Ok(())
}

/// Resolve the input source and produce the document analysis.
fn analyze_input(
    args: &ScoreArgs,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<DocumentAnalysis> {
    if let Some(ref file) = args.file {
        let content = read_input_file(file, max_input_bytes)?;

        // Pre-annotated input needs no external parser.
        if file.extension() == Some("conllu") {
            let sentences = conllu::parse(&content)
                .with_context(|| format!("failed to parse {file} as CoNLL-U"))?;
            let lexicon = load_lexicon(config)?;
            return Ok(scoring::analyze_document(&sentences, &lexicon));
        }

        let prose = if file.extension() == Some("md") {
            markdown::strip_to_prose(&content)
        } else {
            content
        };
        return annotate_and_analyze(&prose, config);
    }

    if let Some(ref text) = args.text {
        return annotate_and_analyze(text, config);
    }

    bail!("either --text or a file argument must be provided");
}

fn annotate_and_analyze(text: &str, config: &Config) -> anyhow::Result<DocumentAnalysis> {
    let scorer = build_scorer(config)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_message("Analyzing text...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    let analysis = scorer.analyze_document(text);
    spinner.finish_and_clear();

    analysis.context("failed to analyze text")
}

/// Human-readable label for a difficulty level.
pub(crate) fn level_description(level: u8) -> &'static str {
    Difficulty::from_level(level).map_or("Unknown", Difficulty::label)
}

/// Colored `level - label` fragment for terminal output.
pub(crate) fn level_display(level: u8) -> String {
    let text = format!("{} - {}", level, level_description(level));
    match level {
        4 => text.green().to_string(),
        3 => text.yellow().to_string(),
        _ => text.red().to_string(),
    }
}

fn render_json(analysis: &DocumentAnalysis, detailed: bool) -> anyhow::Result<String> {
    let mut output = serde_json::json!({
        "document_score": analysis.document_score,
        "document_level": analysis.document_level,
        "document_level_description": level_description(analysis.document_level),
        "sentence_count": analysis.sentence_count,
        "average_sentence_length": analysis.average_sentence_length,
    });

    if detailed {
        let sentences: Vec<serde_json::Value> = analysis
            .sentences
            .iter()
            .map(|s| {
                serde_json::json!({
                    "text": s.sentence,
                    "score": s.lint_score,
                    "level": s.difficulty_level,
                    "level_description": level_description(s.difficulty_level),
                })
            })
            .collect();
        output["sentences"] = serde_json::Value::Array(sentences);
    }

    Ok(serde_json::to_string_pretty(&output)?)
}

fn render_csv(analysis: &DocumentAnalysis, detailed: bool) -> String {
    let mut out = String::new();
    if detailed {
        out.push_str("sentence,score,level,level_description\n");
        for s in &analysis.sentences {
            out.push_str(&format!(
                "{},{},{},{}\n",
                csv_field(&s.sentence),
                s.lint_score,
                s.difficulty_level,
                level_description(s.difficulty_level),
            ));
        }
    } else {
        out.push_str(
            "document_score,document_level,document_level_description,sentence_count,average_sentence_length\n",
        );
        out.push_str(&format!(
            "{},{},{},{},{}\n",
            analysis.document_score,
            analysis.document_level,
            level_description(analysis.document_level),
            analysis.sentence_count,
            analysis.average_sentence_length,
        ));
    }
    out
}

/// Quote a CSV field when it contains separators or quotes.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn print_table(analysis: &DocumentAnalysis, detailed: bool) {
    println!("{}", "Document Readability Summary".bold());
    println!("  {} {}", "LiNT score:".cyan(), analysis.document_score);
    println!(
        "  {} {}",
        "Difficulty:".cyan(),
        level_display(analysis.document_level)
    );
    println!("  {} {}", "Sentences:".cyan(), analysis.sentence_count);
    println!(
        "  {} {:.1} words",
        "Avg. sentence length:".cyan(),
        analysis.average_sentence_length
    );

    if detailed {
        println!();
        println!("{}", "Sentence Analysis".bold());
        for sentence in &analysis.sentences {
            let display_text = truncate(&sentence.sentence, 60);
            println!(
                "  {:>6.2}  {}  {}",
                sentence.lint_score,
                level_display(sentence.difficulty_level),
                display_text,
            );
        }
    }
}

/// Shorten long sentences for single-line table rows.
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let prefix: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{prefix}...")
}

fn emit(rendered: &str, output: Option<&camino::Utf8Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path.as_std_path(), rendered)
                .with_context(|| format!("failed to write {path}"))?;
            println!("{} Results saved to {path}", "OK:".green());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alletaal_lint_core::scoring::SentenceAnalysis;

    fn analysis() -> DocumentAnalysis {
        DocumentAnalysis {
            document_score: 70.0,
            document_level: 4,
            sentence_count: 2,
            average_sentence_length: 5.5,
            sentences: vec![
                SentenceAnalysis {
                    sentence: "Korte zin.".to_string(),
                    lint_score: 80.0,
                    difficulty_level: 4,
                    word_frequency_log: 4.0,
                    max_dependency_length: 1,
                    content_words_proportion: 2.0,
                    concrete_nouns_proportion: 0.0,
                },
                SentenceAnalysis {
                    sentence: "Nog een zin, met komma.".to_string(),
                    lint_score: 60.0,
                    difficulty_level: 3,
                    word_frequency_log: 3.0,
                    max_dependency_length: 2,
                    content_words_proportion: 3.0,
                    concrete_nouns_proportion: 0.5,
                },
            ],
        }
    }

    #[test]
    fn json_summary_has_document_fields() {
        let rendered = render_json(&analysis(), false).unwrap();
        let json: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(json["document_score"], 70.0);
        assert_eq!(json["document_level"], 4);
        assert_eq!(json["document_level_description"], "Easy");
        assert!(json.get("sentences").is_none());
    }

    #[test]
    fn json_detailed_includes_sentences() {
        let rendered = render_json(&analysis(), true).unwrap();
        let json: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(json["sentences"].as_array().unwrap().len(), 2);
        assert_eq!(json["sentences"][1]["level"], 3);
        assert_eq!(json["sentences"][1]["level_description"], "Moderate");
    }

    #[test]
    fn csv_summary_is_one_record() {
        let rendered = render_csv(&analysis(), false);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("document_score,"));
        assert!(lines[1].starts_with("70,4,Easy,2,"));
    }

    #[test]
    fn csv_detailed_quotes_commas() {
        let rendered = render_csv(&analysis(), true);
        assert!(rendered.contains("\"Nog een zin, met komma.\""));
    }

    #[test]
    fn csv_field_escapes_quotes() {
        assert_eq!(csv_field("simpel"), "simpel");
        assert_eq!(csv_field("zeg \"ja\""), "\"zeg \"\"ja\"\"\"");
    }

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate("kort", 60), "kort");
        let long = "x".repeat(80);
        let shortened = truncate(&long, 60);
        assert_eq!(shortened.chars().count(), 60);
        assert!(shortened.ends_with("..."));
    }

    #[test]
    fn level_descriptions_cover_all_levels() {
        assert_eq!(level_description(1), "Very Difficult");
        assert_eq!(level_description(2), "Difficult");
        assert_eq!(level_description(3), "Moderate");
        assert_eq!(level_description(4), "Easy");
        assert_eq!(level_description(9), "Unknown");
    }
}
