//! Document-level types of the styled output document.

use super::{BlockRole, Paragraph};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Twips (twentieths of a point) per inch.
pub const TWIPS_PER_INCH: f64 = 1440.0;

/// An assembled document, ready to be written or previewed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata
    pub metadata: Metadata,

    /// Page margins
    pub geometry: PageGeometry,

    /// Document-wide body text defaults
    pub defaults: DefaultStyle,

    /// Paragraphs in order
    pub paragraphs: Vec<Paragraph>,

    /// Footer, present when page numbers are requested
    pub footer: Option<Footer>,
}

impl Document {
    /// Create an empty document with the given geometry and defaults.
    pub fn new(geometry: PageGeometry, defaults: DefaultStyle) -> Self {
        Self {
            metadata: Metadata::default(),
            geometry,
            defaults,
            paragraphs: Vec::new(),
            footer: None,
        }
    }

    /// Append a paragraph.
    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.paragraphs.push(paragraph);
    }

    /// Paragraphs with the given role.
    pub fn with_role(&self, role: BlockRole) -> impl Iterator<Item = &Paragraph> {
        self.paragraphs.iter().filter(move |p| p.role() == role)
    }

    /// Number of paragraphs with the given role.
    pub fn count_role(&self, role: BlockRole) -> usize {
        self.with_role(role).count()
    }

    /// Check if the document has no paragraphs.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Uniform page margins in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    /// Top margin
    pub top: f64,
    /// Bottom margin
    pub bottom: f64,
    /// Left margin
    pub left: f64,
    /// Right margin
    pub right: f64,
}

impl PageGeometry {
    /// The same margin on all four sides.
    pub fn uniform(inches: f64) -> Self {
        Self {
            top: inches,
            bottom: inches,
            left: inches,
            right: inches,
        }
    }

    /// Convert inches to twips.
    pub fn to_twips(inches: f64) -> i32 {
        (inches * TWIPS_PER_INCH).round() as i32
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::uniform(1.0)
    }
}

/// Body text defaults applied document-wide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultStyle {
    /// Font family
    pub font_family: String,
    /// Font size in points
    pub font_size: u32,
    /// Line spacing multiplier
    pub line_spacing: f32,
}

/// Page footer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Footer {
    /// Footer alignment
    pub alignment: super::Alignment,
    /// Emit a page-number field
    pub page_number: bool,
    /// Font for the page number
    pub font_name: Option<String>,
}

/// Document metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Detected title
    pub title: Option<String>,

    /// Source file name
    pub source: Option<String>,

    /// Citation style applied
    pub citation_style: Option<String>,

    /// Language model used for inference
    pub model: Option<String>,

    /// Generation time
    pub generated: Option<DateTime<Utc>>,
}

impl Metadata {
    /// Convert metadata to YAML frontmatter format.
    pub fn to_yaml_frontmatter(&self) -> String {
        let mut lines = vec!["---".to_string()];

        if let Some(ref title) = self.title {
            lines.push(format!("title: \"{}\"", escape_yaml(title)));
        }
        if let Some(ref source) = self.source {
            lines.push(format!("source: \"{}\"", escape_yaml(source)));
        }
        if let Some(ref style) = self.citation_style {
            lines.push(format!("citation_style: \"{}\"", escape_yaml(style)));
        }
        if let Some(ref model) = self.model {
            lines.push(format!("model: \"{}\"", escape_yaml(model)));
        }
        if let Some(ref generated) = self.generated {
            lines.push(format!("generated: {}", generated.to_rfc3339()));
        }

        lines.push("---".to_string());
        lines.push(String::new());

        lines.join("\n")
    }
}

/// Escape special characters for YAML strings.
fn escape_yaml(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TextRun;

    fn defaults() -> DefaultStyle {
        DefaultStyle {
            font_family: "Times New Roman".to_string(),
            font_size: 12,
            line_spacing: 2.0,
        }
    }

    #[test]
    fn test_document_new() {
        let mut doc = Document::new(PageGeometry::default(), defaults());
        assert!(doc.is_empty());

        doc.add_paragraph(Paragraph::with_run(BlockRole::Heading, TextRun::bold("1. Intro")));
        doc.add_paragraph(Paragraph::spacer());
        assert_eq!(doc.count_role(BlockRole::Heading), 1);
        assert_eq!(doc.plain_text(), "1. Intro\n");
    }

    #[test]
    fn test_geometry_twips() {
        let geometry = PageGeometry::uniform(1.5);
        assert_eq!(PageGeometry::to_twips(geometry.left), 2160);
        assert_eq!(PageGeometry::to_twips(0.5), 720);
    }

    #[test]
    fn test_metadata_frontmatter() {
        let metadata = Metadata {
            title: Some("A \"Quoted\" Title".to_string()),
            citation_style: Some("apa".to_string()),
            ..Default::default()
        };

        let yaml = metadata.to_yaml_frontmatter();
        assert!(yaml.starts_with("---\n"));
        assert!(yaml.contains("title: \"A \\\"Quoted\\\" Title\""));
        assert!(yaml.contains("citation_style: \"apa\""));
    }
}
