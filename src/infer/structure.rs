//! Structure classifier: decides which spans are headings and which are
//! body paragraphs.

use super::outcome::{DegradeReason, Outcome};
use crate::model::{Block, StructuredDocument};
use crate::nlp::{Capability, LanguageOracle, Sentence};
use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// A heading is shorter than this many characters.
pub const MAX_HEADING_CHARS: usize = 100;
/// A heading has fewer than this many words.
pub const MAX_HEADING_WORDS: usize = 10;
/// Heading used when nothing better can be derived.
pub const FALLBACK_HEADING: &str = "Document";
/// Title used when no short sentence opens the document.
pub const FALLBACK_TITLE: &str = "Document Title";
/// How many leading characters are searched for a title.
pub const TITLE_WINDOW_CHARS: usize = 500;

static BLANK_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").expect("valid regex"));

/// Full-capability heading rule: short, few words, and at least one
/// alphabetic token in title case.
pub fn is_heading_candidate(sentence: &Sentence) -> bool {
    sentence.char_len() < MAX_HEADING_CHARS
        && sentence.word_count() < MAX_HEADING_WORDS
        && sentence.has_title_token()
}

/// Basic-mode rule for promoting a blank-line separated segment to a heading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingRule {
    /// Shorter than [`MAX_HEADING_CHARS`] and fewer than [`MAX_HEADING_WORDS`] words.
    #[default]
    LengthOnly,
    /// As `LengthOnly`, and the segment must not end in `.`, `!` or `?`.
    Unterminated,
}

impl HeadingRule {
    /// Whether `segment` is a heading under this rule.
    pub fn is_heading(&self, segment: &str) -> bool {
        let short = segment.chars().count() < MAX_HEADING_CHARS
            && segment.split_whitespace().count() < MAX_HEADING_WORDS;
        match self {
            HeadingRule::LengthOnly => short,
            HeadingRule::Unterminated => short && !segment.ends_with(['.', '!', '?']),
        }
    }

    /// Get the rule name.
    pub fn as_str(&self) -> &'static str {
        match self {
            HeadingRule::LengthOnly => "length_only",
            HeadingRule::Unterminated => "unterminated",
        }
    }
}

impl fmt::Display for HeadingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HeadingRule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "length_only" | "length" => Ok(HeadingRule::LengthOnly),
            "unterminated" => Ok(HeadingRule::Unterminated),
            other => Err(Error::Config(format!("unknown heading rule '{}'", other))),
        }
    }
}

/// Classify a sentence stream (full capability) or the raw text (basic)
/// into an ordered block sequence, using the default [`HeadingRule`].
///
/// The result is never empty: a document without headings gets one
/// synthesized from its first paragraph, and a document without any
/// blocks becomes a single paragraph holding the (trimmed) input.
pub fn classify(sentences: &[Sentence], capability: Capability, full_text: &str) -> StructuredDocument {
    classify_with(sentences, capability, full_text, HeadingRule::default())
}

/// [`classify`] with an explicit basic-mode heading rule.
pub fn classify_with(
    sentences: &[Sentence],
    capability: Capability,
    full_text: &str,
    rule: HeadingRule,
) -> StructuredDocument {
    let mut blocks = match capability {
        Capability::Full => classify_sentences(sentences),
        Capability::Basic => classify_segments(full_text, rule),
    };

    if !blocks.iter().any(Block::is_heading) {
        match blocks.first() {
            Some(first) => {
                let heading = synthesize_heading(first.text());
                log::debug!("No headings detected, synthesized '{}'", heading);
                blocks.insert(0, Block::heading(heading));
            }
            None => blocks.push(Block::paragraph(full_text.trim())),
        }
    }

    StructuredDocument::from_blocks(blocks)
}

fn classify_sentences(sentences: &[Sentence]) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut pending: Vec<&str> = Vec::new();

    for sentence in sentences {
        let text = sentence.text.trim();
        if text.is_empty() {
            continue;
        }
        if is_heading_candidate(sentence) {
            if !pending.is_empty() {
                blocks.push(Block::paragraph(pending.join(" ")));
                pending.clear();
            }
            blocks.push(Block::heading(text));
        } else {
            pending.push(text);
        }
    }

    if !pending.is_empty() {
        blocks.push(Block::paragraph(pending.join(" ")));
    }
    blocks
}

fn classify_segments(text: &str, rule: HeadingRule) -> Vec<Block> {
    BLANK_LINE
        .split(text)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if rule.is_heading(segment) {
                Block::heading(segment)
            } else {
                Block::paragraph(segment)
            }
        })
        .collect()
}

fn synthesize_heading(paragraph: &str) -> String {
    let first = paragraph.split('.').next().unwrap_or_default().trim();
    if !first.is_empty() && first.chars().count() < MAX_HEADING_CHARS {
        first.to_string()
    } else {
        FALLBACK_HEADING.to_string()
    }
}

/// The structure used when the oracle fails outright: one synthetic heading
/// followed by the whole input as a single paragraph.
pub fn fallback_structure(text: &str) -> StructuredDocument {
    StructuredDocument::from_blocks(vec![
        Block::heading(FALLBACK_HEADING),
        Block::paragraph(text.trim()),
    ])
}

/// Run the oracle and classify `text`.
pub fn infer_structure(oracle: &dyn LanguageOracle, text: &str) -> Outcome<StructuredDocument> {
    infer_structure_with(oracle, text, HeadingRule::default())
}

/// [`infer_structure`] with an explicit basic-mode heading rule.
pub fn infer_structure_with(
    oracle: &dyn LanguageOracle,
    text: &str,
    rule: HeadingRule,
) -> Outcome<StructuredDocument> {
    if oracle.capability() == Capability::Basic {
        log::debug!("Classifying in basic mode with {} ({})", oracle.name(), rule);
        return Outcome::degraded(
            classify_with(&[], Capability::Basic, text, rule),
            DegradeReason::CapabilityUnavailable,
        );
    }

    match oracle.parse(text) {
        Ok(parse) => Outcome::full(classify(&parse.sentences, Capability::Full, text)),
        Err(e) => {
            log::warn!("Structure inference fell back to a single section: {}", e);
            Outcome::degraded(
                fallback_structure(text),
                DegradeReason::OracleFailed(e.to_string()),
            )
        }
    }
}

/// Headings found by the full-capability rule over every sentence of
/// `text`, at most `limit` of them.
///
/// Only lexical token flags are consulted, so this runs with any oracle.
pub fn detect_headings(oracle: &dyn LanguageOracle, text: &str, limit: usize) -> Outcome<Vec<String>> {
    match oracle.parse(text) {
        Ok(parse) => Outcome::full(
            parse
                .sentences
                .iter()
                .filter(|s| is_heading_candidate(s))
                .map(|s| s.text.trim().to_string())
                .take(limit)
                .collect(),
        ),
        Err(e) => {
            log::warn!("Heading detection failed: {}", e);
            Outcome::degraded(Vec::new(), DegradeReason::OracleFailed(e.to_string()))
        }
    }
}

/// The first non-empty sentence shorter than [`MAX_HEADING_CHARS`] within
/// the leading [`TITLE_WINDOW_CHARS`] characters, or [`FALLBACK_TITLE`].
pub fn detect_title(oracle: &dyn LanguageOracle, text: &str) -> Outcome<String> {
    let window = match text.char_indices().nth(TITLE_WINDOW_CHARS) {
        Some((end, _)) => &text[..end],
        None => text,
    };

    match oracle.parse(window) {
        Ok(parse) => {
            let title = parse
                .sentences
                .iter()
                .map(|s| s.text.trim())
                .find(|t| !t.is_empty() && t.chars().count() < MAX_HEADING_CHARS)
                .unwrap_or(FALLBACK_TITLE);
            Outcome::full(title.to_string())
        }
        Err(e) => Outcome::degraded(
            FALLBACK_TITLE.to_string(),
            DegradeReason::OracleFailed(e.to_string()),
        ),
    }
}
