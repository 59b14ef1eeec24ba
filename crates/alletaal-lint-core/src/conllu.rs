//! CoNLL-U reader.
//!
//! CoNLL-U is the interchange format dependency parsers emit: one token per
//! line with tab-separated ID, FORM, LEMMA, UPOS, XPOS, FEATS, HEAD, DEPREL,
//! DEPS, and MISC columns, sentences separated by blank lines. This module
//! turns that into [`AnnotatedSentence`]s; it does not write the format.

use crate::error::{AnnotateError, AnnotateResult};
use crate::token::{AnnotatedSentence, AnnotatedToken, Upos};

/// Number of tab-separated columns in a CoNLL-U token line.
const COLUMNS: usize = 10;

/// Parse CoNLL-U text into annotated sentences.
///
/// Comment lines are honored for `# text = …` sentence metadata; multiword
/// token ranges (`1-2`) and empty nodes (`1.1`) are skipped, matching how
/// basic-dependency consumers read the format. When a sentence carries no
/// `# text` comment its text is reconstructed from the token forms and
/// their `SpaceAfter=No` annotations.
#[tracing::instrument(skip_all, fields(input_len = input.len()))]
pub fn parse(input: &str) -> AnnotateResult<Vec<AnnotatedSentence>> {
    let mut sentences = Vec::new();
    let mut builder = SentenceBuilder::default();

    for (number, line) in input.lines().enumerate() {
        let line = line.trim_end();

        if line.is_empty() {
            builder.finish_into(&mut sentences);
            continue;
        }

        if let Some(comment) = line.strip_prefix('#') {
            if let Some(text) = comment.trim_start().strip_prefix("text =") {
                builder.text = Some(text.trim().to_string());
            }
            continue;
        }

        builder.push_token(line, number + 1)?;
    }
    builder.finish_into(&mut sentences);

    tracing::debug!(sentences = sentences.len(), "CoNLL-U parsed");
    Ok(sentences)
}

/// Accumulates one sentence's worth of token lines.
#[derive(Default)]
struct SentenceBuilder {
    text: Option<String>,
    tokens: Vec<AnnotatedToken>,
    space_after: Vec<bool>,
}

impl SentenceBuilder {
    fn push_token(&mut self, line: &str, number: usize) -> AnnotateResult<()> {
        let columns: Vec<&str> = line.split('\t').collect();
        if columns.len() != COLUMNS {
            return Err(AnnotateError::Conllu {
                line: number,
                message: format!("expected {COLUMNS} columns, found {}", columns.len()),
            });
        }

        // Multiword token ranges and empty nodes are not part of the basic
        // dependency tree.
        let id = columns[0];
        if id.contains('-') || id.contains('.') {
            return Ok(());
        }
        let id: usize = id.parse().map_err(|_| AnnotateError::Conllu {
            line: number,
            message: format!("invalid token id `{id}`"),
        })?;
        if id == 0 {
            return Err(AnnotateError::Conllu {
                line: number,
                message: "token ids are one-based".to_string(),
            });
        }

        let head: usize = columns[6].parse().map_err(|_| AnnotateError::Conllu {
            line: number,
            message: format!("invalid head `{}`", columns[6]),
        })?;

        let index = id - 1;
        let (gender, number_feat) = parse_feats(columns[5]);

        self.tokens.push(AnnotatedToken {
            text: columns[1].to_string(),
            lemma: columns[2].to_string(),
            pos: Upos::parse(columns[3]),
            tag: empty_column(columns[4]).to_string(),
            gender,
            number: number_feat,
            index,
            // HEAD 0 marks the root; the root token heads itself.
            head: if head == 0 { index } else { head - 1 },
            dep: columns[7].to_string(),
        });
        self.space_after
            .push(!columns[9].split('|').any(|m| m == "SpaceAfter=No"));
        Ok(())
    }

    fn finish_into(&mut self, sentences: &mut Vec<AnnotatedSentence>) {
        if self.tokens.is_empty() {
            self.text = None;
            return;
        }
        let tokens = std::mem::take(&mut self.tokens);
        let space_after = std::mem::take(&mut self.space_after);
        let text = self
            .text
            .take()
            .unwrap_or_else(|| reconstruct_text(&tokens, &space_after));
        sentences.push(AnnotatedSentence { text, tokens });
    }
}

/// `_` marks an empty column in CoNLL-U.
fn empty_column(value: &str) -> &str {
    if value == "_" { "" } else { value }
}

/// Pull Gender and Number out of a FEATS column (`Gender=Com|Number=Sing`).
///
/// Multi-valued features (`Com,Neut`) keep their first value.
fn parse_feats(feats: &str) -> (Option<String>, Option<String>) {
    let mut gender = None;
    let mut number = None;
    if feats == "_" {
        return (gender, number);
    }
    for pair in feats.split('|') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        let first = value.split(',').next().unwrap_or(value).to_string();
        match key {
            "Gender" => gender = Some(first),
            "Number" => number = Some(first),
            _ => {}
        }
    }
    (gender, number)
}

fn reconstruct_text(tokens: &[AnnotatedToken], space_after: &[bool]) -> String {
    let mut text = String::new();
    for (position, token) in tokens.iter().enumerate() {
        text.push_str(&token.text);
        let last = position + 1 == tokens.len();
        if !last && space_after.get(position).copied().unwrap_or(true) {
            text.push(' ');
        }
    }
    text
}
