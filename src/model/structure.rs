//! Classified document structure: the ordered heading/paragraph stream.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A classified unit of document content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    /// A section heading
    Heading {
        /// Heading text, without numbering
        text: String,
    },
    /// A body paragraph
    Paragraph {
        /// Paragraph text
        text: String,
        /// Byte ranges of superscript citation markers (`^N`) in `text`
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        superscripts: Vec<Range<usize>>,
    },
}

impl Block {
    /// Create a heading block.
    pub fn heading(text: impl Into<String>) -> Self {
        Block::Heading { text: text.into() }
    }

    /// Create a paragraph block.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph {
            text: text.into(),
            superscripts: Vec::new(),
        }
    }

    /// Create a paragraph whose `superscripts` ranges mark `^N` citation
    /// markers.
    pub fn paragraph_with_superscripts(
        text: impl Into<String>,
        superscripts: Vec<Range<usize>>,
    ) -> Self {
        Block::Paragraph {
            text: text.into(),
            superscripts,
        }
    }

    /// Block text.
    pub fn text(&self) -> &str {
        match self {
            Block::Heading { text } | Block::Paragraph { text, .. } => text,
        }
    }

    /// Split the text into `(piece, is_superscript)` runs.
    ///
    /// Only marked ranges become superscript, without their marker
    /// character; any other caret in the text is kept as written.
    pub fn runs(&self) -> Vec<(&str, bool)> {
        let (text, marks) = match self {
            Block::Heading { text } => return vec![(text.as_str(), false)],
            Block::Paragraph { text, superscripts } => (text.as_str(), superscripts),
        };

        let mut pieces = Vec::new();
        let mut last = 0;
        for mark in marks {
            let Some(number) = text
                .get(mark.clone())
                .and_then(|marker| marker.strip_prefix('^'))
            else {
                continue;
            };
            if mark.start < last || number.is_empty() {
                continue;
            }
            if mark.start > last {
                pieces.push((&text[last..mark.start], false));
            }
            pieces.push((number, true));
            last = mark.end;
        }
        if last < text.len() || pieces.is_empty() {
            pieces.push((&text[last..], false));
        }
        pieces
    }

    /// Check if this is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, Block::Heading { .. })
    }
}

/// The ordered block sequence produced by structure inference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredDocument {
    /// Blocks in emission order
    pub blocks: Vec<Block>,
}

impl StructuredDocument {
    /// Create an empty structure.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a structure from blocks.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Append a block.
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if there are no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Heading texts in order.
    pub fn headings(&self) -> impl Iterator<Item = &str> {
        self.blocks
            .iter()
            .filter(|b| b.is_heading())
            .map(Block::text)
    }

    /// Paragraph texts in order.
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.blocks
            .iter()
            .filter(|b| !b.is_heading())
            .map(Block::text)
    }

    /// Number of headings.
    pub fn heading_count(&self) -> usize {
        self.headings().count()
    }

    /// Number of paragraphs.
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs().count()
    }

    /// Blocks with headings prefixed by their 1-based running number
    /// (`"1. Introduction"`), in emission order.
    pub fn numbered(&self) -> Vec<Block> {
        let mut number = 0;
        self.blocks
            .iter()
            .map(|block| match block {
                Block::Heading { text } => {
                    number += 1;
                    Block::heading(format!("{}. {}", number, text))
                }
                Block::Paragraph { .. } => block.clone(),
            })
            .collect()
    }

    /// Numbered blocks as text, each followed by a blank line.
    pub fn to_numbered_text(&self) -> String {
        let mut out = String::new();
        for block in self.numbered() {
            out.push_str(block.text());
            out.push_str("\n\n");
        }
        out
    }
}
