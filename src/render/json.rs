//! JSON rendering for assembled documents.

use crate::error::{Error, Result};
use crate::model::Document;
use serde::Serialize;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document to JSON.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    value_to_json(doc, format)
}

/// Serialize any report (analysis, structure, results) to JSON.
pub fn value_to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BlockRole, DefaultStyle, PageGeometry, Paragraph, TextRun};

    fn doc() -> Document {
        let mut doc = Document::new(
            PageGeometry::uniform(0.5),
            DefaultStyle {
                font_family: "Arial".to_string(),
                font_size: 12,
                line_spacing: 1.5,
            },
        );
        doc.metadata.title = Some("Test".to_string());
        doc.add_paragraph(Paragraph::with_run(BlockRole::Body, TextRun::new("Hello")));
        doc
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&doc(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"title\""));
        assert!(json.contains("\"role\": \"body\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&doc(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
    }
}
