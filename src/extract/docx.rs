//! Word document extractor.

use docx_rs::{Docx, DocumentChild, ParagraphChild, RunChild};

use super::TextExtractor;
use crate::detect::{detect_format_from_bytes, SourceFormat};
use crate::error::{Error, Result};

/// Extracts paragraph text from Office Open XML documents.
///
/// Legacy binary `.doc` files are recognized and rejected; only the
/// ZIP-based format can be read.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxExtractor;

impl DocxExtractor {
    /// Create a new DOCX extractor.
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for DocxExtractor {
    fn supported_extensions(&self) -> &[&str] {
        &["docx", "doc"]
    }

    fn name(&self) -> &str {
        "docx"
    }

    fn extract_bytes(&self, bytes: &[u8]) -> Result<String> {
        match detect_format_from_bytes(bytes)? {
            SourceFormat::Docx => {}
            SourceFormat::LegacyDoc => {
                return Err(Error::UnsupportedFormat(
                    "legacy binary .doc files cannot be read; save the document as .docx".to_string(),
                ))
            }
            SourceFormat::PlainText => {
                return Err(Error::Extraction(
                    "file has a Word extension but is not a Word document".to_string(),
                ))
            }
        }

        let docx = docx_rs::read_docx(bytes)?;
        let paragraphs = docx_paragraph_texts(&docx);
        log::debug!("Read {} paragraphs from DOCX", paragraphs.len());
        Ok(paragraphs.join("\n"))
    }
}

/// Text of each top-level body paragraph, in document order.
pub(crate) fn docx_paragraph_texts(docx: &Docx) -> Vec<String> {
    docx.document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(p) => {
                let mut text = String::new();
                collect_paragraph_text(&p.children, &mut text);
                Some(text)
            }
            _ => None,
        })
        .collect()
}

fn collect_paragraph_text(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for rc in &run.children {
                    match rc {
                        RunChild::Text(t) => out.push_str(&t.text),
                        RunChild::Tab(_) => out.push('\t'),
                        RunChild::Break(_) => out.push('\n'),
                        _ => {}
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => collect_paragraph_text(&link.children, out),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Paragraph, Run};

    fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
        let mut docx = Docx::new();
        for text in paragraphs {
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)));
        }
        let mut cursor = std::io::Cursor::new(Vec::new());
        docx.build().pack(&mut cursor).unwrap();
        cursor.into_inner()
    }

    #[test]
    fn test_extract_paragraphs() {
        let bytes = docx_bytes(&["Introduction", "", "Body text (Smith, 2020)."]);
        let text = DocxExtractor::new().extract_bytes(&bytes).unwrap();
        assert_eq!(text, "Introduction\n\nBody text (Smith, 2020).");
    }

    #[test]
    fn test_legacy_doc_rejected() {
        let mut bytes = vec![0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
        bytes.extend_from_slice(&[0u8; 64]);
        let result = DocxExtractor::new().extract_bytes(&bytes);
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
    }

    #[test]
    fn test_text_with_doc_extension_rejected() {
        let result = DocxExtractor::new().extract_bytes(b"just text");
        assert!(matches!(result, Err(Error::Extraction(_))));
    }

    #[test]
    fn test_corrupt_zip() {
        let result = DocxExtractor::new().extract_bytes(b"PK\x03\x04garbage");
        assert!(result.unwrap_err().is_extraction_failure());
    }
}
