//! Paragraph and text-level types of the styled output document.

use serde::{Deserialize, Serialize};

/// The part a paragraph plays in the assembled document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockRole {
    /// Title page title
    Title,
    /// "Table of Contents" label
    TocLabel,
    /// Numbered table of contents entry
    TocEntry,
    /// Numbered section heading
    Heading,
    /// Body paragraph
    #[default]
    Body,
    /// "References" label
    ReferencesHeading,
    /// Reference list entry
    Reference,
    /// Blank separator
    Spacer,
}

/// A paragraph of styled text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Text runs in the paragraph
    pub runs: Vec<TextRun>,

    /// Paragraph style
    pub style: ParagraphStyle,
}

impl Paragraph {
    /// Create an empty paragraph with a role.
    pub fn new(role: BlockRole) -> Self {
        Self {
            runs: Vec::new(),
            style: ParagraphStyle {
                role,
                ..Default::default()
            },
        }
    }

    /// Create a blank separator paragraph.
    pub fn spacer() -> Self {
        Self::new(BlockRole::Spacer)
    }

    /// Create a paragraph holding a single run.
    pub fn with_run(role: BlockRole, run: TextRun) -> Self {
        let mut p = Self::new(role);
        p.add_run(run);
        p
    }

    /// Set the alignment.
    pub fn aligned(mut self, alignment: Alignment) -> Self {
        self.style.alignment = alignment;
        self
    }

    /// Add a styled text run.
    pub fn add_run(&mut self, run: TextRun) {
        self.runs.push(run);
    }

    /// Get plain text content of the paragraph.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Check if the paragraph has no visible text.
    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|r| r.text.trim().is_empty())
    }

    /// Check if this is a numbered section heading.
    pub fn is_heading(&self) -> bool {
        self.style.role == BlockRole::Heading
    }

    /// The paragraph's role.
    pub fn role(&self) -> BlockRole {
        self.style.role
    }
}

/// A run of text with consistent styling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Text styling
    pub style: TextStyle,
}

impl TextRun {
    /// Create a new text run with default style.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
        }
    }

    /// Create a bold text run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self::new(text).with_bold(true)
    }

    /// Set bold.
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.style.bold = bold;
        self
    }

    /// Set superscript.
    pub fn with_superscript(mut self, superscript: bool) -> Self {
        self.style.superscript = superscript;
        self
    }

    /// Set font family and size in points.
    pub fn with_font(mut self, name: impl Into<String>, size: u32) -> Self {
        self.style.font_name = Some(name.into());
        self.style.font_size = Some(size);
        self
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Text styling properties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,

    /// Superscript
    pub superscript: bool,

    /// Font name (document default when absent)
    pub font_name: Option<String>,

    /// Font size in points (document default when absent)
    pub font_size: Option<u32>,
}

impl TextStyle {
    /// Check if any emphasis is applied.
    pub fn has_styling(&self) -> bool {
        self.bold || self.italic || self.superscript
    }
}

/// Paragraph styling properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParagraphStyle {
    /// Role in the document
    pub role: BlockRole,

    /// Heading tier (1 = top level) for named heading styles
    pub heading_level: Option<u8>,

    /// Text alignment
    pub alignment: Alignment,

    /// Line spacing multiplier (1.0 = single, 2.0 = double)
    pub line_spacing: Option<f32>,
}

/// Text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left alignment (default)
    #[default]
    Left,
    /// Center alignment
    Center,
    /// Right alignment
    Right,
    /// Justified alignment
    Justify,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_plain_text() {
        let mut p = Paragraph::new(BlockRole::Body);
        p.add_run(TextRun::new("See ref "));
        p.add_run(TextRun::new("3").with_superscript(true));
        p.add_run(TextRun::new(" for details."));

        assert_eq!(p.plain_text(), "See ref 3 for details.");
        assert!(!p.is_heading());
    }

    #[test]
    fn test_spacer_is_empty() {
        let spacer = Paragraph::spacer();
        assert!(spacer.is_empty());
        assert_eq!(spacer.role(), BlockRole::Spacer);
    }

    #[test]
    fn test_text_style() {
        assert!(!TextStyle::default().has_styling());
        let run = TextRun::bold("Title").with_font("Arial", 16);
        assert!(run.style.has_styling());
        assert_eq!(run.style.font_size, Some(16));
    }
}
