//! The external-parser seam.
//!
//! Annotation (tokenization, tagging, dependency parsing, sentence
//! segmentation) is delegated to an external NLP parser behind the
//! [`Annotator`] trait. The shipped implementation, [`CommandAnnotator`],
//! launches a configured command that reads text on stdin and answers in
//! CoNLL-U on stdout — the convention spaCy, Stanza, and Alpino wrappers all
//! speak. Tests substitute fixture implementations instead of a live model.

use std::io::Write;
use std::process::{Command, Stdio};

use crate::conllu;
use crate::error::{AnnotateError, AnnotateResult};
use crate::token::AnnotatedSentence;

/// Produces annotated, sentence-segmented tokens for a piece of text.
///
/// Implementations are read-only after construction and shared across
/// concurrent scoring calls.
pub trait Annotator: Send + Sync {
    /// Annotate `text`, returning its sentences in document order.
    fn annotate(&self, text: &str) -> AnnotateResult<Vec<AnnotatedSentence>>;
}

/// Annotator backed by an external command emitting CoNLL-U.
#[derive(Debug, Clone)]
pub struct CommandAnnotator {
    command: Vec<String>,
}

impl CommandAnnotator {
    /// Create an annotator for the given argv. Errors when `command` is empty.
    pub fn new(command: Vec<String>) -> AnnotateResult<Self> {
        if command.is_empty() {
            return Err(AnnotateError::NotConfigured);
        }
        Ok(Self { command })
    }

    /// The configured argv, for diagnostics.
    pub fn command(&self) -> &[String] {
        &self.command
    }
}

impl Annotator for CommandAnnotator {
    #[tracing::instrument(skip(self, text), fields(command = %self.command[0], text_len = text.len()))]
    fn annotate(&self, text: &str) -> AnnotateResult<Vec<AnnotatedSentence>> {
        let mut child = Command::new(&self.command[0])
            .args(&self.command[1..])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| AnnotateError::Unavailable {
                command: self.command.join(" "),
                source: e,
            })?;

        // Feed stdin from a separate thread so a child that starts writing
        // before it finishes reading cannot deadlock the pipe pair.
        let writer = child.stdin.take().map(|mut stdin| {
            let input = text.to_owned();
            std::thread::spawn(move || {
                let _ = stdin.write_all(input.as_bytes());
            })
        });

        let output = child
            .wait_with_output()
            .map_err(|e| AnnotateError::Unavailable {
                command: self.command.join(" "),
                source: e,
            })?;
        if let Some(handle) = writer {
            let _ = handle.join();
        }

        if !output.status.success() {
            return Err(AnnotateError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        conllu::parse(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Placeholder used when no annotator command is configured.
///
/// Every call fails with [`AnnotateError::NotConfigured`], so the error
/// surfaces per operation rather than at startup.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredAnnotator;

impl Annotator for UnconfiguredAnnotator {
    fn annotate(&self, _text: &str) -> AnnotateResult<Vec<AnnotatedSentence>> {
        Err(AnnotateError::NotConfigured)
    }
}
