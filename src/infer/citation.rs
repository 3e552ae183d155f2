//! Citation formatter: per-style rewriting of in-text citation markers and
//! extraction of the reference list.
//!
//! One pattern per style governs both matching and rewriting:
//!
//! | style   | pattern                     | rewrite        |
//! |---------|-----------------------------|----------------|
//! | apa     | `\(([^)]+), (\d{4})[^)]*\)` | `(Author, YYYY)` |
//! | mla     | `\(([^)]+) (\d+)[^)]*\)`    | `(Author NN)`  |
//! | chicago | `\[(\d+)\]`                 | `^N`           |
//! | ieee    | `\((\d+)\)`                 | `[N]`          |

use crate::format::{CitationScope, CitationStyle};
use crate::model::{Block, StructuredDocument};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Marker that introduces a superscript citation number in rewritten text.
pub const SUPERSCRIPT_MARKER: char = '^';

/// Placeholder appended to every reference entry.
const REFERENCE_SUFFIX: &str = " - Reference details";

static APA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^)]+), (\d{4})[^)]*\)").expect("valid regex"));
static MLA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^)]+) (\d+)[^)]*\)").expect("valid regex"));
static CHICAGO: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(\d+)\]").expect("valid regex"));
static IEEE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\((\d+)\)").expect("valid regex"));

fn pattern(style: CitationStyle) -> &'static Regex {
    match style {
        CitationStyle::Apa => &APA,
        CitationStyle::Mla => &MLA,
        CitationStyle::Chicago => &CHICAGO,
        CitationStyle::Ieee => &IEEE,
    }
}

fn replacement(style: CitationStyle) -> &'static str {
    match style {
        CitationStyle::Apa => "(${1}, ${2})",
        CitationStyle::Mla => "(${1} ${2})",
        CitationStyle::Chicago => "^${1}",
        CitationStyle::Ieee => "[${1}]",
    }
}

/// Rewrite every citation marker in `text` according to `style`.
pub fn rewrite_citations(text: &str, style: CitationStyle) -> Cow<'_, str> {
    pattern(style).replace_all(text, replacement(style))
}

/// Rewrite the citations of one paragraph into a block.
///
/// For chicago the byte range of every `^N` marker the rewrite produced is
/// recorded on the block, so carets already present in the source never
/// turn into superscripts.
pub fn rewrite_paragraph(text: &str, style: CitationStyle) -> Block {
    if style != CitationStyle::Chicago {
        return Block::paragraph(rewrite_citations(text, style));
    }

    let mut out = String::with_capacity(text.len());
    let mut marks = Vec::new();
    let mut last = 0;
    for caps in CHICAGO.captures_iter(text) {
        let (Some(whole), Some(number)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        out.push_str(&text[last..whole.start()]);
        let start = out.len();
        out.push(SUPERSCRIPT_MARKER);
        out.push_str(number.as_str());
        marks.push(start..out.len());
        last = whole.end();
    }
    out.push_str(&text[last..]);
    Block::paragraph_with_superscripts(out, marks)
}

/// Distinct citation matches in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceList {
    entries: Vec<String>,
}

impl ReferenceList {
    /// Raw matches in first-seen order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Number of distinct matches.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no citations were found.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check whether a raw match is present.
    pub fn contains(&self, citation: &str) -> bool {
        self.entries.iter().any(|e| e == citation)
    }

    /// Entries as placeholder bibliography lines.
    pub fn rendered(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| format!("{}{}", e, REFERENCE_SUFFIX))
            .collect()
    }
}

impl FromIterator<String> for ReferenceList {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut seen = HashSet::new();
        let entries = iter
            .into_iter()
            .filter(|e| seen.insert(e.clone()))
            .collect();
        Self { entries }
    }
}

/// Collect the citation matches of `style` in the unmodified `text`.
pub fn extract_references(text: &str, style: CitationStyle) -> ReferenceList {
    pattern(style)
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Rewrite citations in the paragraphs of a classified document.
///
/// With [`CitationScope::FirstAfterHeading`] only the paragraph directly
/// following each heading is rewritten; later paragraphs of the same
/// section and any paragraphs before the first heading keep their text.
pub fn apply_citations(
    doc: &StructuredDocument,
    style: CitationStyle,
    scope: CitationScope,
) -> StructuredDocument {
    let mut after_heading = false;
    let blocks = doc
        .blocks
        .iter()
        .map(|block| match block {
            Block::Heading { .. } => {
                after_heading = true;
                block.clone()
            }
            Block::Paragraph { text, .. } => {
                let rewrite = match scope {
                    CitationScope::AllParagraphs => true,
                    CitationScope::FirstAfterHeading => after_heading,
                };
                after_heading = false;
                if rewrite {
                    rewrite_paragraph(text, style)
                } else {
                    block.clone()
                }
            }
        })
        .collect();
    StructuredDocument::from_blocks(blocks)
}
