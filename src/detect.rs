//! Source document format detection and validation.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Formats the raw text supplier knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// UTF-8 plain text
    PlainText,
    /// Office Open XML word-processing document (ZIP container)
    Docx,
    /// Legacy binary Word document (OLE2 compound file)
    LegacyDoc,
}

impl SourceFormat {
    /// Canonical file extension for the format.
    pub fn extension(&self) -> &'static str {
        match self {
            SourceFormat::PlainText => "txt",
            SourceFormat::Docx => "docx",
            SourceFormat::LegacyDoc => "doc",
        }
    }

    /// Guess the format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "txt" | "text" => Some(SourceFormat::PlainText),
            "docx" => Some(SourceFormat::Docx),
            "doc" => Some(SourceFormat::LegacyDoc),
            _ => None,
        }
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SourceFormat::PlainText => "plain text",
            SourceFormat::Docx => "DOCX",
            SourceFormat::LegacyDoc => "legacy DOC",
        };
        f.write_str(name)
    }
}

/// ZIP local file header: every DOCX starts with it.
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
/// OLE2 compound document header used by legacy .doc files.
const OLE2_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
/// How many leading bytes are inspected for plain-text detection.
const SNIFF_LEN: usize = 4096;

/// Detect the source format from bytes.
///
/// Container formats are recognized by their magic bytes; anything else that
/// decodes as UTF-8 is treated as plain text.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<SourceFormat> {
    if data.starts_with(ZIP_MAGIC) {
        return Ok(SourceFormat::Docx);
    }
    if data.starts_with(OLE2_MAGIC) {
        return Ok(SourceFormat::LegacyDoc);
    }
    if data.is_empty() {
        return Err(Error::Extraction("document is empty".to_string()));
    }

    let head = &data[..data.len().min(SNIFF_LEN)];
    match std::str::from_utf8(head) {
        Ok(_) => Ok(SourceFormat::PlainText),
        // A multi-byte sequence cut at the sniff boundary is still text.
        Err(e) if e.error_len().is_none() => Ok(SourceFormat::PlainText),
        Err(_) => Err(Error::UnsupportedFormat(
            "binary content that is neither DOCX nor text".to_string(),
        )),
    }
}

/// Detect the source format of a file from its leading bytes.
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<SourceFormat> {
    let file = File::open(path)?;
    let mut head = Vec::with_capacity(SNIFF_LEN);
    file.take(SNIFF_LEN as u64).read_to_end(&mut head)?;
    detect_format_from_bytes(&head)
}

/// Check a file name against a set of allowed extensions.
///
/// The name must contain a dot and the part after the last dot must be in
/// `allowed` (compared case-insensitively).
pub fn is_allowed_extension<S: AsRef<str>>(filename: &str, allowed: &[S]) -> bool {
    match filename.rsplit_once('.') {
        Some((_, ext)) => {
            let ext = ext.to_ascii_lowercase();
            allowed
                .iter()
                .any(|a| a.as_ref().eq_ignore_ascii_case(&ext))
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_docx_magic() {
        let data = b"PK\x03\x04\x14\x00\x06\x00";
        assert_eq!(detect_format_from_bytes(data).unwrap(), SourceFormat::Docx);
    }

    #[test]
    fn test_detect_legacy_doc() {
        let mut data = OLE2_MAGIC.to_vec();
        data.extend_from_slice(&[0u8; 8]);
        assert_eq!(
            detect_format_from_bytes(&data).unwrap(),
            SourceFormat::LegacyDoc
        );
    }

    #[test]
    fn test_detect_plain_text() {
        let data = "Introduction\n\nBody text.".as_bytes();
        assert_eq!(
            detect_format_from_bytes(data).unwrap(),
            SourceFormat::PlainText
        );
    }

    #[test]
    fn test_detect_binary_garbage() {
        let data = [0xFF, 0xFE, 0xFD, 0x00, 0x80, 0x81];
        assert!(matches!(
            detect_format_from_bytes(&data),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_detect_empty() {
        assert!(matches!(
            detect_format_from_bytes(b""),
            Err(Error::Extraction(_))
        ));
    }

    #[test]
    fn test_allowed_extension() {
        let allowed = ["doc", "docx", "txt"];
        assert!(is_allowed_extension("paper.docx", &allowed));
        assert!(is_allowed_extension("NOTES.TXT", &allowed));
        assert!(is_allowed_extension("archive.tar.txt", &allowed));
        assert!(!is_allowed_extension("paper.pdf", &allowed));
        assert!(!is_allowed_extension("README", &allowed));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(SourceFormat::from_extension("DOCX"), Some(SourceFormat::Docx));
        assert_eq!(SourceFormat::from_extension("md"), None);
        assert_eq!(SourceFormat::PlainText.extension(), "txt");
    }
}
