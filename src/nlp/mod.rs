//! Language oracle: sentence segmentation and token-level annotation.
//!
//! Structure inference and summarization consume text through the
//! [`LanguageOracle`] trait. An oracle is constructed once (see
//! [`load_model`]) and shared read-only between requests; its
//! [`Capability`] decides which branch every heuristic takes.

mod blank;
mod lexicon;
mod rules;
mod segment;

pub use blank::BlankModel;
pub use rules::RuleModel;
pub use segment::{segment_sentences, tokenize, SentenceSpan};

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Whether an oracle supplies part-of-speech, stop-word, and entity signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    /// Full annotation: tags, stop words, entities, noun phrases
    Full,
    /// Sentence boundaries and lexical flags only
    Basic,
}

impl Capability {
    /// True for [`Capability::Full`].
    pub fn is_full(&self) -> bool {
        matches!(self, Capability::Full)
    }
}

/// Coarse universal part-of-speech tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PartOfSpeech {
    Noun,
    Propn,
    Verb,
    Aux,
    Adj,
    Adv,
    Adp,
    Det,
    Pron,
    Cconj,
    Sconj,
    Part,
    Num,
    Punct,
    Sym,
    X,
}

impl PartOfSpeech {
    /// Content-word tags used for keyword selection.
    pub fn is_content(&self) -> bool {
        matches!(
            self,
            PartOfSpeech::Noun | PartOfSpeech::Adj | PartOfSpeech::Verb
        )
    }

    /// Nominal head of a noun phrase.
    pub fn is_nominal(&self) -> bool {
        matches!(self, PartOfSpeech::Noun | PartOfSpeech::Propn)
    }
}

/// A single token with its annotations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Token text
    pub text: String,
    /// Part-of-speech tag, `None` when the oracle is not capable
    pub pos: Option<PartOfSpeech>,
    /// Token is a stop word
    pub is_stop: bool,
    /// Token is in title case ("Word", "I")
    pub is_title: bool,
    /// Token consists only of alphabetic characters
    pub is_alpha: bool,
}

impl Token {
    /// Build a token with lexical flags computed from its text and no tag.
    pub fn lexical(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            is_title: is_title_case(&text),
            is_alpha: is_alpha(&text),
            is_stop: false,
            pos: None,
            text,
        }
    }
}

/// A sentence: trimmed text plus its tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    /// Trimmed sentence text
    pub text: String,
    /// Tokens in order
    pub tokens: Vec<Token>,
}

impl Sentence {
    /// Number of whitespace-separated words.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// At least one alphabetic token is in title case.
    pub fn has_title_token(&self) -> bool {
        self.tokens.iter().any(|t| t.is_alpha && t.is_title)
    }
}

/// A named-entity mention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Surface text
    pub text: String,
    /// Entity label (e.g. "PERSON", "ORG", "DATE")
    pub label: String,
}

/// Everything an oracle knows about one text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parse {
    /// Sentences in document order
    pub sentences: Vec<Sentence>,
    /// Entity mentions in document order (empty without full capability)
    pub entities: Vec<Entity>,
    /// Noun-phrase spans in document order (empty without full capability)
    pub noun_chunks: Vec<String>,
}

impl Parse {
    /// Total token count across all sentences.
    pub fn token_count(&self) -> usize {
        self.sentences.iter().map(|s| s.tokens.len()).sum()
    }

    /// Iterate over every token in document order.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.sentences.iter().flat_map(|s| s.tokens.iter())
    }
}

/// A sentence segmenter and annotator.
///
/// Implementations must be usable concurrently from several threads; they
/// are loaded once and never mutated afterwards.
pub trait LanguageOracle: Send + Sync {
    /// Model name (e.g. `"en_core_rules"`, `"blank:en"`).
    fn name(&self) -> &str;

    /// Which annotations [`LanguageOracle::parse`] fills in.
    fn capability(&self) -> Capability;

    /// Segment and annotate `text`.
    fn parse(&self, text: &str) -> Result<Parse>;
}

/// Language codes a blank model can be created for.
const BLANK_LANGUAGES: &[&str] = &["en"];

/// Load a language model by name with layered fallback.
///
/// A known full-capability model name loads that model. Otherwise the blank
/// model for the name's language (`"blank:en"`, or the prefix before the
/// first `_` such as `en` in `en_core_web_sm`) is used. If no blank model
/// exists for that language, loading fails.
pub fn load_model(name: &str) -> Result<Arc<dyn LanguageOracle>> {
    if RuleModel::is_known_name(name) {
        log::info!("Loaded language model {}", name);
        return Ok(Arc::new(RuleModel::new()));
    }

    let lang = name
        .strip_prefix("blank:")
        .unwrap_or_else(|| name.split('_').next().unwrap_or(name))
        .to_ascii_lowercase();

    if BLANK_LANGUAGES.contains(&lang.as_str()) {
        if !name.starts_with("blank:") {
            log::warn!(
                "Language model {} not found, falling back to blank:{} (basic mode)",
                name,
                lang
            );
        }
        return Ok(Arc::new(BlankModel::new(lang)));
    }

    Err(Error::ModelUnavailable(format!(
        "no model named '{}' and no blank model for language '{}'",
        name, lang
    )))
}

/// Python-style `istitle` for a single word: the first cased character is
/// uppercase and no uppercase character follows a cased one.
pub fn is_title_case(word: &str) -> bool {
    let mut seen_cased = false;
    let mut prev_cased = false;
    for c in word.chars() {
        if c.is_uppercase() {
            if prev_cased {
                return false;
            }
            prev_cased = true;
            seen_cased = true;
        } else if c.is_lowercase() {
            if !prev_cased {
                return false;
            }
            prev_cased = true;
            seen_cased = true;
        } else {
            prev_cased = false;
        }
    }
    seen_cased
}

/// Non-empty and made only of alphabetic characters.
pub fn is_alpha(word: &str) -> bool {
    !word.is_empty() && word.chars().all(char::is_alphabetic)
}
