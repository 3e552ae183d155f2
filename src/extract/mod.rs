//! Raw text supplier: extractors for each source format and a registry that
//! dispatches on file extension.
//!
//! # Example
//!
//! ```no_run
//! use docfmt::extract::ExtractorRegistry;
//! use std::path::Path;
//!
//! fn main() -> docfmt::Result<()> {
//!     let registry = ExtractorRegistry::with_defaults();
//!     let text = registry.extract(Path::new("paper.docx"))?;
//!     println!("{}", text);
//!     Ok(())
//! }
//! ```

mod cleanup;
mod docx;
mod text;

pub use cleanup::{CleanupOptions, CleanupPipeline, CleanupPreset};
pub use docx::DocxExtractor;
#[cfg(test)]
pub(crate) use docx::docx_paragraph_texts;
pub use text::PlainTextExtractor;

use crate::detect::is_allowed_extension;
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Default set of accepted source extensions.
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &["doc", "docx", "txt"];

/// Default maximum source size (10 MiB).
pub const DEFAULT_MAX_CONTENT_LENGTH: u64 = 10 * 1024 * 1024;

/// Trait for text extractors.
///
/// Implement this trait to add support for a new source format.
pub trait TextExtractor: Send + Sync {
    /// Get the supported file extensions for this extractor.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["txt"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Get the name of this extractor.
    fn name(&self) -> &str;

    /// Extract text from in-memory bytes.
    fn extract_bytes(&self, bytes: &[u8]) -> Result<String>;

    /// Extract text from a file.
    fn extract(&self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path)?;
        self.extract_bytes(&bytes)
    }

    /// Check if this extractor supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Registry for text extractors.
///
/// Maps file extensions to extractors, validates sources against the allowed
/// extensions and size limit, and runs the cleanup pipeline over the result.
pub struct ExtractorRegistry {
    extractors: HashMap<String, Arc<dyn TextExtractor>>,
    by_name: HashMap<String, Arc<dyn TextExtractor>>,
    allowed_extensions: Vec<String>,
    max_content_length: u64,
    cleanup: CleanupPipeline,
}

impl ExtractorRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            extractors: HashMap::new(),
            by_name: HashMap::new(),
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_content_length: DEFAULT_MAX_CONTENT_LENGTH,
            cleanup: CleanupPipeline::default(),
        }
    }

    /// Create a registry with the plain text and DOCX extractors.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(PlainTextExtractor::new()));
        registry.register(Arc::new(DocxExtractor::new()));
        registry
    }

    /// Restrict accepted extensions.
    pub fn with_allowed_extensions<S: AsRef<str>>(mut self, allowed: &[S]) -> Self {
        self.allowed_extensions = allowed
            .iter()
            .map(|s| s.as_ref().to_ascii_lowercase())
            .collect();
        self
    }

    /// Set the maximum source size in bytes.
    pub fn with_max_content_length(mut self, limit: u64) -> Self {
        self.max_content_length = limit;
        self
    }

    /// Set the cleanup preset applied to extracted text.
    pub fn with_cleanup(mut self, preset: CleanupPreset) -> Self {
        self.cleanup = CleanupPipeline::from_preset(preset);
        self
    }

    /// Register an extractor for all its supported extensions.
    pub fn register(&mut self, extractor: Arc<dyn TextExtractor>) {
        for ext in extractor.supported_extensions() {
            self.extractors.insert(ext.to_lowercase(), extractor.clone());
        }
        self.by_name.insert(extractor.name().to_lowercase(), extractor);
    }

    /// Get an extractor by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn TextExtractor>> {
        self.extractors.get(&ext.to_lowercase()).cloned()
    }

    /// Get an extractor by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn TextExtractor>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if an extension is both allowed and has an extractor.
    pub fn supports(&self, ext: &str) -> bool {
        let ext = ext.to_lowercase();
        self.allowed_extensions.contains(&ext) && self.extractors.contains_key(&ext)
    }

    /// Get all extensions that can be extracted.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self
            .extractors
            .keys()
            .map(|s| s.as_str())
            .filter(|e| self.allowed_extensions.iter().any(|a| a == e))
            .collect();
        exts.sort_unstable();
        exts
    }

    /// Extract cleaned text from a file.
    pub fn extract(&self, path: &Path) -> Result<String> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::UnsupportedFormat("file has no name".into()))?;
        let ext = self.check_extension(name)?;

        let size = std::fs::metadata(path)?.len();
        self.check_size(size)?;

        log::debug!("Extracting {} ({} bytes)", path.display(), size);
        let bytes = std::fs::read(path)?;
        self.extract_validated(&bytes, &ext)
    }

    /// Extract cleaned text from bytes, using `filename` to pick the extractor.
    pub fn extract_bytes(&self, bytes: &[u8], filename: &str) -> Result<String> {
        let ext = self.check_extension(filename)?;
        self.check_size(bytes.len() as u64)?;
        self.extract_validated(bytes, &ext)
    }

    fn check_extension(&self, filename: &str) -> Result<String> {
        if !is_allowed_extension(filename, &self.allowed_extensions) {
            return Err(Error::UnsupportedFormat(format!(
                "'{}' is not one of: {}",
                filename,
                self.allowed_extensions.join(", ")
            )));
        }
        // is_allowed_extension guarantees a dot.
        let ext = filename.rsplit_once('.').map(|(_, e)| e).unwrap_or_default();
        Ok(ext.to_ascii_lowercase())
    }

    fn check_size(&self, size: u64) -> Result<()> {
        if size > self.max_content_length {
            return Err(Error::FileTooLarge {
                size,
                limit: self.max_content_length,
            });
        }
        Ok(())
    }

    fn extract_validated(&self, bytes: &[u8], ext: &str) -> Result<String> {
        let extractor = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::UnsupportedFormat(format!("no extractor for .{}", ext)))?;

        let raw = extractor.extract_bytes(bytes)?;
        let text = self.cleanup.process(&raw);
        if text.trim().is_empty() {
            return Err(Error::Extraction("document contains no text".into()));
        }

        log::debug!(
            "Extractor '{}' produced {} characters",
            extractor.name(),
            text.chars().count()
        );
        Ok(text)
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_with_defaults() {
        let registry = ExtractorRegistry::with_defaults();
        assert!(registry.supports("txt"));
        assert!(registry.supports("DOCX"));
        assert!(!registry.supports("pdf"));
        assert_eq!(registry.supported_extensions(), vec!["doc", "docx", "txt"]);
    }

    #[test]
    fn test_registry_get_by_name() {
        let registry = ExtractorRegistry::with_defaults();
        assert_eq!(registry.get_by_name("docx").unwrap().name(), "docx");
        assert_eq!(registry.get_by_extension("doc").unwrap().name(), "docx");
    }

    #[test]
    fn test_disallowed_extension() {
        let registry = ExtractorRegistry::with_defaults().with_allowed_extensions(&["docx"]);
        let result = registry.extract_bytes(b"hello", "notes.txt");
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
    }

    #[test]
    fn test_size_limit() {
        let registry = ExtractorRegistry::with_defaults().with_max_content_length(4);
        let result = registry.extract_bytes(b"hello world", "notes.txt");
        assert!(matches!(
            result,
            Err(Error::FileTooLarge { size: 11, limit: 4 })
        ));
    }

    #[test]
    fn test_empty_text_rejected() {
        let registry = ExtractorRegistry::with_defaults();
        let result = registry.extract_bytes(b"  \n\n ", "blank.txt");
        match result {
            Err(Error::Extraction(msg)) => assert_eq!(msg, "document contains no text"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_cleanup_applied() {
        let registry = ExtractorRegistry::with_defaults();
        let text = registry
            .extract_bytes("Intro\r\n\r\n\r\nBody \u{FB01}ne".as_bytes(), "a.txt")
            .unwrap();
        assert_eq!(text, "Intro\n\nBody fine");
    }
}
