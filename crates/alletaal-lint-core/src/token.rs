//! Annotated-token data model.
//!
//! These types mirror what an external dependency parser produces for Dutch
//! text: one [`AnnotatedToken`] per word with part-of-speech tags, morphology,
//! and the token's position in the dependency tree, grouped into
//! [`AnnotatedSentence`]s. The crate never produces these itself — they come
//! from an [`Annotator`](crate::annotator::Annotator) implementation or a
//! CoNLL-U file.

/// Universal Dependencies coarse part-of-speech tag.
///
/// The full UD tag set, with unknown values mapping to [`Upos::X`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Upos {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    X,
}

impl Upos {
    /// Parse a UPOS column value. Unrecognized tags map to [`Upos::X`].
    pub fn parse(value: &str) -> Self {
        match value {
            "ADJ" => Self::Adj,
            "ADP" => Self::Adp,
            "ADV" => Self::Adv,
            "AUX" => Self::Aux,
            "CCONJ" => Self::Cconj,
            "DET" => Self::Det,
            "INTJ" => Self::Intj,
            "NOUN" => Self::Noun,
            "NUM" => Self::Num,
            "PART" => Self::Part,
            "PRON" => Self::Pron,
            "PROPN" => Self::Propn,
            "PUNCT" => Self::Punct,
            "SCONJ" => Self::Sconj,
            "SYM" => Self::Sym,
            "VERB" => Self::Verb,
            _ => Self::X,
        }
    }

    /// The tag as it appears in the UPOS column.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Adj => "ADJ",
            Self::Adp => "ADP",
            Self::Adv => "ADV",
            Self::Aux => "AUX",
            Self::Cconj => "CCONJ",
            Self::Det => "DET",
            Self::Intj => "INTJ",
            Self::Noun => "NOUN",
            Self::Num => "NUM",
            Self::Part => "PART",
            Self::Pron => "PRON",
            Self::Propn => "PROPN",
            Self::Punct => "PUNCT",
            Self::Sconj => "SCONJ",
            Self::Sym => "SYM",
            Self::Verb => "VERB",
            Self::X => "X",
        }
    }
}

impl std::fmt::Display for Upos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One token as produced by the external parser.
#[derive(Debug, Clone)]
pub struct AnnotatedToken {
    /// Surface text of the token.
    pub text: String,
    /// Lemma (dictionary form).
    pub lemma: String,
    /// Coarse part-of-speech tag.
    pub pos: Upos,
    /// Fine-grained tag string, `|`-separated CGN segments
    /// (e.g. `N|soort|ev|basis|zijd|stan`). May be empty.
    pub tag: String,
    /// Grammatical gender from the morphology, when present.
    pub gender: Option<String>,
    /// Grammatical number from the morphology, when present.
    pub number: Option<String>,
    /// Zero-based position of this token within its sentence.
    pub index: usize,
    /// Zero-based position of the syntactic head within the same sentence.
    /// The root token points at itself.
    pub head: usize,
    /// Dependency relation label connecting this token to its head.
    pub dep: String,
}

impl AnnotatedToken {
    /// First segment of the fine-grained tag (`"N"` in `N|soort|ev`).
    ///
    /// Empty tags yield an empty primary segment.
    pub fn primary_tag(&self) -> &str {
        self.tag.split('|').next().unwrap_or("")
    }

    /// The fine-grained tag segments after the first.
    ///
    /// Empty tags yield no sub-segments.
    pub fn sub_tags(&self) -> impl Iterator<Item = &str> {
        self.tag.split('|').skip(1)
    }
}

/// One sentence as segmented and annotated by the external parser.
#[derive(Debug, Clone)]
pub struct AnnotatedSentence {
    /// The sentence's surface text.
    pub text: String,
    /// The ordered tokens of the sentence.
    pub tokens: Vec<AnnotatedToken>,
}
