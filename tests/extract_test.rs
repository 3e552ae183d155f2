//! Integration tests for the extract module.

use std::path::Path;
use std::sync::Arc;

use docfmt::detect::{detect_format_from_path, SourceFormat};
use docfmt::error::{Error, Result};
use docfmt::extract::{CleanupPreset, DocxExtractor, ExtractorRegistry, PlainTextExtractor, TextExtractor};

/// Mock extractor for testing.
struct MockExtractor {
    extensions: Vec<&'static str>,
    name: &'static str,
}

impl TextExtractor for MockExtractor {
    fn supported_extensions(&self) -> &[&str] {
        &self.extensions
    }

    fn name(&self) -> &str {
        self.name
    }

    fn extract_bytes(&self, bytes: &[u8]) -> Result<String> {
        Ok(format!("Extracted {} bytes by {}", bytes.len(), self.name))
    }
}

fn write_docx(path: &Path, paragraphs: &[&str]) {
    let mut docx = docx_rs::Docx::new();
    for text in paragraphs {
        docx = docx.add_paragraph(
            docx_rs::Paragraph::new().add_run(docx_rs::Run::new().add_text(*text)),
        );
    }
    let file = std::fs::File::create(path).unwrap();
    docx.build().pack(file).unwrap();
}

#[test]
fn test_registry_new_is_empty() {
    let registry = ExtractorRegistry::new();
    assert!(!registry.supports("txt"));
    assert!(registry.supported_extensions().is_empty());
}

#[test]
fn test_registry_register_custom() {
    let mut registry = ExtractorRegistry::new().with_allowed_extensions(&["md"]);
    registry.register(Arc::new(MockExtractor {
        extensions: vec!["md"],
        name: "mock",
    }));

    assert!(registry.supports("MD"));
    let text = registry.extract_bytes(b"# hi", "notes.md").unwrap();
    assert_eq!(text, "Extracted 4 bytes by mock");
}

#[test]
fn test_registered_but_not_allowed() {
    let mut registry = ExtractorRegistry::new();
    registry.register(Arc::new(MockExtractor {
        extensions: vec!["md"],
        name: "mock",
    }));
    assert!(!registry.supports("md"));
    assert!(matches!(
        registry.extract_bytes(b"# hi", "notes.md"),
        Err(Error::UnsupportedFormat(_))
    ));
}

#[test]
fn test_extract_text_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("paper.txt");
    std::fs::write(&path, "Introduction\r\n\r\nThis is body text.\r\n").unwrap();

    let text = ExtractorRegistry::with_defaults().extract(&path).unwrap();
    assert_eq!(text, "Introduction\n\nThis is body text.\n");
    assert_eq!(detect_format_from_path(&path).unwrap(), SourceFormat::PlainText);
}

#[test]
fn test_extract_docx_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("paper.docx");
    write_docx(&path, &["Introduction", "", "This is body text (Smith, 2020)."]);

    assert_eq!(detect_format_from_path(&path).unwrap(), SourceFormat::Docx);
    let text = docfmt::extract_text(&path).unwrap();
    assert_eq!(text, "Introduction\n\nThis is body text (Smith, 2020).");
}

#[test]
fn test_docx_with_txt_extension_is_not_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("renamed.txt");
    write_docx(&path, &["Hello"]);

    let result = ExtractorRegistry::with_defaults().extract(&path);
    assert!(result.unwrap_err().is_extraction_failure());
}

#[test]
fn test_legacy_doc_is_unsupported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("old.doc");
    let mut bytes = vec![0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
    bytes.resize(512, 0);
    std::fs::write(&path, &bytes).unwrap();

    let result = ExtractorRegistry::with_defaults().extract(&path);
    assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
}

#[test]
fn test_file_too_large() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("big.txt");
    std::fs::write(&path, "word ".repeat(100)).unwrap();

    let registry = ExtractorRegistry::with_defaults().with_max_content_length(100);
    let err = registry.extract(&path).unwrap_err();
    assert!(matches!(err, Error::FileTooLarge { size: 500, limit: 100 }));
    assert!(err.is_extraction_failure());
}

#[test]
fn test_missing_extension() {
    let result = ExtractorRegistry::with_defaults().extract_bytes(b"text", "README");
    assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
}

#[test]
fn test_empty_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.docx");
    write_docx(&path, &["", "   "]);

    let result = ExtractorRegistry::with_defaults().extract(&path);
    assert!(matches!(result, Err(Error::Extraction(_))));
}

#[test]
fn test_minimal_cleanup_keeps_spacing() {
    let registry = ExtractorRegistry::with_defaults().with_cleanup(CleanupPreset::Minimal);
    let text = registry.extract_bytes(b"A  B\n\n\n\nC", "a.txt").unwrap();
    assert_eq!(text, "A  B\n\n\n\nC");
}

#[test]
fn test_extractor_names() {
    assert_eq!(PlainTextExtractor::new().name(), "text");
    assert!(DocxExtractor::new().supports_extension("DOC"));
    assert!(!PlainTextExtractor::new().supports_extension("docx"));
}
