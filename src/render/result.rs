//! Rendering result with metadata and statistics.

use crate::model::{BlockRole, Document, Metadata};
use serde::{Deserialize, Serialize};

/// Result of rendering a document, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered content (Markdown, text, etc.)
    pub content: String,

    /// Document metadata (copied from the assembled document)
    pub metadata: Metadata,

    /// Assembly statistics
    pub stats: AssemblyStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, metadata: Metadata, stats: AssemblyStats) -> Self {
        Self {
            content,
            metadata,
            stats,
        }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Counts describing an assembled document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyStats {
    /// Number of numbered section headings
    pub heading_count: u32,

    /// Number of body paragraphs
    pub paragraph_count: u32,

    /// Number of table of contents entries
    pub toc_entry_count: u32,

    /// Number of reference list entries
    pub reference_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl AssemblyStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect statistics from an assembled document.
    pub fn from_document(doc: &Document) -> Self {
        let mut stats = Self {
            heading_count: doc.count_role(BlockRole::Heading) as u32,
            paragraph_count: doc.count_role(BlockRole::Body) as u32,
            toc_entry_count: doc.count_role(BlockRole::TocEntry) as u32,
            reference_count: doc.count_role(BlockRole::Reference) as u32,
            ..Default::default()
        };
        for paragraph in doc.with_role(BlockRole::Heading).chain(doc.with_role(BlockRole::Body)) {
            stats.count_text(&paragraph.plain_text());
        }
        stats
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &AssemblyStats) {
        self.heading_count += other.heading_count;
        self.paragraph_count += other.paragraph_count;
        self.toc_entry_count += other.toc_entry_count;
        self.reference_count += other.reference_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DefaultStyle, PageGeometry, Paragraph, TextRun};

    #[test]
    fn test_count_text() {
        let mut stats = AssemblyStats::new();
        stats.count_text("Hello, world! This is a test.");

        assert_eq!(stats.word_count, 6);
        assert_eq!(stats.char_count, 24);
    }

    #[test]
    fn test_from_document() {
        let mut doc = Document::new(
            PageGeometry::default(),
            DefaultStyle {
                font_family: "Arial".to_string(),
                font_size: 11,
                line_spacing: 1.0,
            },
        );
        doc.add_paragraph(Paragraph::with_run(BlockRole::TocEntry, TextRun::new("1. Intro")));
        doc.add_paragraph(Paragraph::with_run(BlockRole::Heading, TextRun::bold("1. Intro")));
        doc.add_paragraph(Paragraph::with_run(BlockRole::Body, TextRun::new("Two words")));
        doc.add_paragraph(Paragraph::with_run(
            BlockRole::Reference,
            TextRun::new("[1] - Reference details"),
        ));

        let stats = AssemblyStats::from_document(&doc);
        assert_eq!(stats.heading_count, 1);
        assert_eq!(stats.paragraph_count, 1);
        assert_eq!(stats.toc_entry_count, 1);
        assert_eq!(stats.reference_count, 1);
        assert_eq!(stats.word_count, 4);
    }

    #[test]
    fn test_merge() {
        let mut total = AssemblyStats {
            heading_count: 2,
            paragraph_count: 5,
            ..Default::default()
        };
        total.merge(&AssemblyStats {
            heading_count: 1,
            reference_count: 3,
            ..Default::default()
        });

        assert_eq!(total.heading_count, 3);
        assert_eq!(total.paragraph_count, 5);
        assert_eq!(total.reference_count, 3);
    }
}
