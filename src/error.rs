//! Error types for docfmt library.

use std::io;
use thiserror::Error;

/// Result type alias for docfmt operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reading, inferring, and re-formatting documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The source format is not one we can extract text from.
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// The source document exceeds the configured size limit.
    #[error("Document is {size} bytes, limit is {limit} bytes")]
    FileTooLarge {
        /// Actual size in bytes
        size: u64,
        /// Configured limit in bytes
        limit: u64,
    },

    /// No usable text could be obtained from the source document.
    #[error("Text extraction error: {0}")]
    Extraction(String),

    /// No language model could be loaded, not even a blank one.
    #[error("Language model unavailable: {0}")]
    ModelUnavailable(String),

    /// The language model failed to process the text.
    #[error("Language model error: {0}")]
    Oracle(String),

    /// Assembling the output document failed.
    #[error("Formatting error: {0}")]
    Formatting(String),

    /// Serializing the output artifact failed.
    #[error("Write error: {0}")]
    Write(String),

    /// The remote formatting backend failed.
    #[error("Remote backend error: {0}")]
    Remote(String),

    /// Invalid configuration value or file.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error during preview rendering (Markdown, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Whether this error belongs to the extraction class (no text obtained).
    pub fn is_extraction_failure(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedFormat(_) | Error::FileTooLarge { .. } | Error::Extraction(_)
        )
    }
}

impl From<docx_rs::ReaderError> for Error {
    fn from(err: docx_rs::ReaderError) -> Self {
        Error::Extraction(format!("unreadable DOCX: {}", err))
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Extraction("document contains no text".to_string());
        assert_eq!(
            err.to_string(),
            "Text extraction error: document contains no text"
        );

        let err = Error::FileTooLarge {
            size: 20,
            limit: 10,
        };
        assert_eq!(err.to_string(), "Document is 20 bytes, limit is 10 bytes");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_extraction_failure_class() {
        assert!(Error::UnsupportedFormat("pdf".into()).is_extraction_failure());
        assert!(Error::Extraction("empty".into()).is_extraction_failure());
        assert!(!Error::Write("disk full".into()).is_extraction_failure());
    }
}
