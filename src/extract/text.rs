//! Plain text extractor.

use super::TextExtractor;
use crate::detect::{detect_format_from_bytes, SourceFormat};
use crate::error::{Error, Result};

const UTF8_BOM: &str = "\u{FEFF}";

/// Extracts text from UTF-8 plain text files.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    /// Create a new plain text extractor.
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for PlainTextExtractor {
    fn supported_extensions(&self) -> &[&str] {
        &["txt"]
    }

    fn name(&self) -> &str {
        "text"
    }

    fn extract_bytes(&self, bytes: &[u8]) -> Result<String> {
        if let Ok(format @ (SourceFormat::Docx | SourceFormat::LegacyDoc)) =
            detect_format_from_bytes(bytes)
        {
            return Err(Error::Extraction(format!(
                "{} content in a plain text file",
                format
            )));
        }

        let text = std::str::from_utf8(bytes)
            .map_err(|e| Error::Extraction(format!("not valid UTF-8 text: {}", e)))?;
        Ok(text.strip_prefix(UTF8_BOM).unwrap_or(text).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_bom() {
        let bytes = "\u{FEFF}Introduction\n\nBody.".as_bytes();
        let text = PlainTextExtractor::new().extract_bytes(bytes).unwrap();
        assert_eq!(text, "Introduction\n\nBody.");
    }

    #[test]
    fn test_invalid_utf8() {
        let result = PlainTextExtractor::new().extract_bytes(&[0x66, 0x6f, 0xff, 0xfe]);
        assert!(matches!(result, Err(Error::Extraction(_))));
    }
}
