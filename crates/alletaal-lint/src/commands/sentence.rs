//! Sentence command — single-sentence LiNT scoring.

use anyhow::Context;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use alletaal_lint_core::config::Config;

use super::build_scorer;
use super::score::level_display;

/// Arguments for the `sentence` subcommand.
#[derive(Args, Debug)]
pub struct SentenceArgs {
    /// Sentence to analyze.
    pub text: String,

    /// Show the feature values behind the score.
    #[arg(short = 'd', long)]
    pub detailed: bool,
}

/// Score a single sentence for readability.
#[instrument(name = "cmd_sentence", skip_all, fields(text_len = args.text.len()))]
pub fn cmd_sentence(args: SentenceArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!(detailed = args.detailed, "executing sentence command");

    let scorer = build_scorer(config)?;
    let analysis = scorer
        .analyze_sentence(&args.text)
        .context("failed to analyze sentence")?;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    println!("{} {}", "Sentence:".bold(), analysis.sentence);
    println!("{} {}", "LiNT score:".bold(), analysis.lint_score);
    println!(
        "{} {}",
        "Difficulty:".bold(),
        level_display(analysis.difficulty_level)
    );

    if args.detailed {
        println!();
        println!("{}", "Detailed Metrics".bold());
        println!(
            "  {} {:.3}",
            "Word frequency (log):".cyan(),
            analysis.word_frequency_log
        );
        println!(
            "  {} {}",
            "Max dependency length:".cyan(),
            analysis.max_dependency_length
        );
        println!(
            "  {} {:.3}",
            "Content words proportion:".cyan(),
            analysis.content_words_proportion
        );
        println!(
            "  {} {:.3}",
            "Concrete nouns proportion:".cyan(),
            analysis.concrete_nouns_proportion
        );
    }

    Ok(())
}
