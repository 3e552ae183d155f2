//! Plain text preview of assembled documents.

use crate::error::Result;
use crate::model::{BlockRole, Document};

/// Convert a document to plain text.
///
/// Superscript runs are written with a leading `^`; separators and
/// consecutive list entries collapse to single line breaks.
pub fn to_text(doc: &Document) -> Result<String> {
    let mut output = String::new();

    for paragraph in &doc.paragraphs {
        if paragraph.role() == BlockRole::Spacer {
            continue;
        }
        for run in &paragraph.runs {
            if run.style.superscript {
                output.push('^');
            }
            output.push_str(&run.text);
        }
        match paragraph.role() {
            BlockRole::TocEntry | BlockRole::Reference => output.push('\n'),
            _ => output.push_str("\n\n"),
        }
    }

    Ok(output.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DefaultStyle, PageGeometry, Paragraph, TextRun};

    #[test]
    fn test_to_text() {
        let mut doc = Document::new(
            PageGeometry::default(),
            DefaultStyle {
                font_family: "Arial".to_string(),
                font_size: 12,
                line_spacing: 1.0,
            },
        );
        doc.add_paragraph(Paragraph::with_run(BlockRole::Heading, TextRun::bold("1. Intro")));
        doc.add_paragraph(Paragraph::spacer());
        let mut body = Paragraph::new(BlockRole::Body);
        body.add_run(TextRun::new("See ref "));
        body.add_run(TextRun::new("3").with_superscript(true));
        doc.add_paragraph(body);

        assert_eq!(to_text(&doc).unwrap(), "1. Intro\n\nSee ref ^3");
    }
}
