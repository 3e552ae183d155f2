//! # docfmt
//!
//! Academic re-formatting of plain-text and Word documents.
//!
//! The library reads a `.txt` or `.docx` source, infers its structure
//! (title, headings, body paragraphs, citations), and writes a new DOCX with
//! consistent academic formatting: fonts, margins, line spacing, an optional
//! title page, table of contents, page numbers and reference list.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docfmt::{DocFormatter, FormattingOptions, CitationStyle};
//! use std::path::Path;
//!
//! fn main() -> docfmt::Result<()> {
//!     let options = FormattingOptions::new()
//!         .with_citation_style(CitationStyle::Ieee)
//!         .with_all_sections();
//!
//!     let result = DocFormatter::with_default_model()?
//!         .with_options(options)
//!         .format_file(Path::new("paper.txt"), Some(Path::new("out")))?;
//!     println!("Wrote {}", result.path.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Structure inference**: headings vs. paragraphs from a flat text stream,
//!   with a basic-mode fallback when no full language model is loaded
//! - **Citation styles**: APA, MLA, Chicago (superscript), IEEE
//! - **Keyword/entity analysis**: entities, keywords, noun chunks
//! - **Backends**: local heuristics or a remote chat-completions rewrite
//! - **Previews**: Markdown, plain text, JSON
//! - **Parallel batches**: Uses Rayon for multi-file formatting

pub mod config;
pub mod detect;
pub mod error;
pub mod extract;
pub mod format;
pub mod infer;
pub mod model;
pub mod nlp;
pub mod render;

// Re-export commonly used types
pub use config::{BackendKind, FormatterConfig, RemoteSettings};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_allowed_extension, SourceFormat};
pub use error::{Error, Result};
pub use extract::{CleanupPreset, ExtractorRegistry, TextExtractor};
pub use format::{
    Assembler, Assembly, CitationScope, CitationStyle, FormattingBackend, FormattingOptions,
    LineSpacing, LocalBackend, Margin, RemoteBackend,
};
pub use infer::{AnalysisResult, DegradeReason, HeadingRule, Mode, Outcome, ReferenceList};
pub use model::{Block, Document, StructuredDocument};
pub use nlp::{load_model, Capability, LanguageOracle};
pub use render::{AssemblyStats, DocumentWriter, DocxWriter, JsonFormat, RenderOptions};

use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Prefix of every written artifact's file name.
pub const OUTPUT_PREFIX: &str = "formatted_";

/// Preview output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PreviewFormat {
    /// Markdown
    #[default]
    Markdown,
    /// Plain text
    Text,
    /// JSON structure of the assembled document
    Json,
}

/// Result of formatting one document.
#[derive(Debug, Clone, Serialize)]
pub struct FormatResult {
    /// Location of the written artifact
    pub path: PathBuf,
    /// Title placed on the title page, if one was requested
    pub title: Option<String>,
    /// Counts describing the assembled document
    pub stats: AssemblyStats,
    /// How the block structure was obtained
    pub mode: Mode,
    /// Citations found in the source text
    pub references: ReferenceList,
}

/// Builder-style entry point: extraction, assembly and writing with one
/// shared, read-only language oracle.
///
/// # Example
///
/// ```no_run
/// use docfmt::{DocFormatter, FormatterConfig};
///
/// let formatter = DocFormatter::from_config(&FormatterConfig::default())?;
/// let analysis = formatter.analyze_text("Introduction\n\nSome text about Rust.");
/// println!("{} keywords", analysis.value.keywords.len());
/// # Ok::<(), docfmt::Error>(())
/// ```
pub struct DocFormatter {
    oracle: Arc<dyn LanguageOracle>,
    backend: Box<dyn FormattingBackend>,
    writer: Box<dyn DocumentWriter>,
    extractors: ExtractorRegistry,
    options: FormattingOptions,
}

impl DocFormatter {
    /// Create a formatter around an already loaded oracle, with the local
    /// backend, the DOCX writer and the default extractors.
    pub fn new(oracle: Arc<dyn LanguageOracle>) -> Self {
        Self {
            oracle,
            backend: Box::new(LocalBackend::new()),
            writer: Box::new(DocxWriter::new()),
            extractors: ExtractorRegistry::with_defaults(),
            options: FormattingOptions::default(),
        }
    }

    /// Create a formatter with the default language model.
    pub fn with_default_model() -> Result<Self> {
        Ok(Self::new(load_model(config::DEFAULT_MODEL)?))
    }

    /// Create a formatter from a configuration: loads the model, builds the
    /// configured backend and the extractor registry.
    pub fn from_config(config: &FormatterConfig) -> Result<Self> {
        config.validate()?;
        let oracle = load_model(&config.model)?;
        let extractors = ExtractorRegistry::with_defaults()
            .with_allowed_extensions(&config.allowed_extensions)
            .with_max_content_length(config.max_content_length)
            .with_cleanup(config.cleanup);

        Ok(Self {
            oracle,
            backend: backend_from_config(config)?,
            writer: Box::new(DocxWriter::new()),
            extractors,
            options: FormattingOptions::default(),
        })
    }

    /// Set the formatting options.
    pub fn with_options(mut self, options: FormattingOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the formatting backend.
    pub fn with_backend(mut self, backend: impl FormattingBackend + 'static) -> Self {
        self.backend = Box::new(backend);
        self
    }

    /// Replace the document writer.
    pub fn with_writer(mut self, writer: impl DocumentWriter + 'static) -> Self {
        self.writer = Box::new(writer);
        self
    }

    /// Replace the extractor registry.
    pub fn with_extractors(mut self, extractors: ExtractorRegistry) -> Self {
        self.extractors = extractors;
        self
    }

    /// The shared language oracle.
    pub fn oracle(&self) -> &dyn LanguageOracle {
        self.oracle.as_ref()
    }

    /// The formatting options in use.
    pub fn options(&self) -> &FormattingOptions {
        &self.options
    }

    /// Name of the formatting backend.
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Extract cleaned text from a source file.
    pub fn extract(&self, path: &Path) -> Result<String> {
        self.extractors.extract(path)
    }

    /// Assemble a styled document from text without writing it.
    pub fn assemble(&self, text: &str) -> Result<Assembly> {
        Assembler::new(self.oracle.as_ref(), self.backend.as_ref()).assemble(text, &self.options)
    }

    /// Assemble `text` and write the artifact to `path`.
    pub fn format_text_to(&self, text: &str, path: &Path) -> Result<FormatResult> {
        let assembly = self.assemble(text)?;
        let stats = AssemblyStats::from_document(&assembly.document);
        let path = self.writer.write(&assembly.document, path)?;
        log::info!("Saved formatted document to {}", path.display());

        Ok(FormatResult {
            path,
            title: assembly.document.metadata.title.clone(),
            stats,
            mode: assembly.structure.mode,
            references: assembly.references,
        })
    }

    /// Format a source file into `formatted_<stem>.<ext>`.
    ///
    /// With no output directory a fresh temporary directory is created and
    /// kept; the caller owns its lifetime.
    pub fn format_file(&self, input: &Path, out_dir: Option<&Path>) -> Result<FormatResult> {
        let text = self.extract(input)?;

        let dir = match out_dir {
            Some(dir) => dir.to_path_buf(),
            None => tempfile::Builder::new().prefix("docfmt-").tempdir()?.keep(),
        };
        let path = dir.join(self.output_name(input));

        self.format_text_to(&text, &path)
    }

    /// Format several source files into one directory in parallel.
    ///
    /// Results are returned in input order; one failure does not stop the
    /// others.
    pub fn format_files<P: AsRef<Path> + Sync>(
        &self,
        inputs: &[P],
        out_dir: &Path,
    ) -> Vec<Result<FormatResult>> {
        inputs
            .par_iter()
            .map(|input| self.format_file(input.as_ref(), Some(out_dir)))
            .collect()
    }

    /// Analyze a source file.
    pub fn analyze_file(&self, path: &Path) -> Result<Outcome<AnalysisResult>> {
        let text = self.extract(path)?;
        Ok(self.analyze_text(&text))
    }

    /// Analyze text: entities, counts, keywords and noun chunks.
    pub fn analyze_text(&self, text: &str) -> Outcome<AnalysisResult> {
        infer::analyze(self.oracle.as_ref(), text)
    }

    /// Assemble `text` and render a preview instead of writing DOCX.
    pub fn preview(
        &self,
        text: &str,
        format: PreviewFormat,
        options: &RenderOptions,
    ) -> Result<String> {
        let assembly = self.assemble(text)?;
        match format {
            PreviewFormat::Markdown => render::to_markdown(&assembly.document, options),
            PreviewFormat::Text => render::to_text(&assembly.document),
            PreviewFormat::Json => render::to_json(&assembly.document, JsonFormat::Pretty),
        }
    }

    fn output_name(&self, input: &Path) -> String {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        format!("{}{}.{}", OUTPUT_PREFIX, stem, self.writer.extension())
    }
}

fn backend_from_config(config: &FormatterConfig) -> Result<Box<dyn FormattingBackend>> {
    match config.backend {
        BackendKind::Local => Ok(Box::new(
            LocalBackend::new()
                .with_scope(config.citation_scope)
                .with_heading_rule(config.heading_rule),
        )),
        BackendKind::Remote => remote_backend(config),
    }
}

#[cfg(feature = "remote")]
fn remote_backend(config: &FormatterConfig) -> Result<Box<dyn FormattingBackend>> {
    let client = format::HttpCompletionClient::new(&config.remote)?;
    Ok(Box::new(
        RemoteBackend::new(client)
            .with_max_chunk_chars(config.remote.max_chunk_chars)
            .with_scope(config.citation_scope)
            .with_heading_rule(config.heading_rule),
    ))
}

#[cfg(not(feature = "remote"))]
fn remote_backend(_config: &FormatterConfig) -> Result<Box<dyn FormattingBackend>> {
    Err(Error::Config(
        "the remote backend requires the 'remote' feature".to_string(),
    ))
}

/// Extract cleaned text from a `.txt` or `.docx` file.
///
/// # Example
///
/// ```no_run
/// let text = docfmt::extract_text("paper.docx").unwrap();
/// println!("{}", text);
/// ```
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    ExtractorRegistry::with_defaults().extract(path.as_ref())
}

/// Analyze text with the default language model.
pub fn analyze_text(text: &str) -> Result<AnalysisResult> {
    let oracle = load_model(config::DEFAULT_MODEL)?;
    Ok(infer::analyze(oracle.as_ref(), text).into_value())
}

/// Format a source file with the default model and local backend.
///
/// # Example
///
/// ```no_run
/// use docfmt::{format_file, FormattingOptions};
///
/// let result = format_file("paper.txt", "out", &FormattingOptions::default()).unwrap();
/// println!("{}", result.path.display());
/// ```
pub fn format_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    out_dir: Q,
    options: &FormattingOptions,
) -> Result<FormatResult> {
    DocFormatter::with_default_model()?
        .with_options(options.clone())
        .format_file(input.as_ref(), Some(out_dir.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::BlankModel;

    fn formatter() -> DocFormatter {
        DocFormatter::with_default_model().unwrap()
    }

    #[test]
    fn test_output_name() {
        let f = formatter();
        assert_eq!(f.output_name(Path::new("dir/paper.txt")), "formatted_paper.docx");
        assert_eq!(f.output_name(Path::new("notes.v2.docx")), "formatted_notes.v2.docx");
    }

    #[test]
    fn test_from_config_defaults() {
        let f = DocFormatter::from_config(&FormatterConfig::default()).unwrap();
        assert_eq!(f.oracle().name(), "en_core_rules");
        assert_eq!(f.backend_name(), "local");
    }

    #[test]
    fn test_from_config_unknown_model() {
        let config = FormatterConfig {
            model: "xx_unknown".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            DocFormatter::from_config(&config),
            Err(Error::ModelUnavailable(_))
        ));
    }

    #[test]
    fn test_format_text_to() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.docx");
        let result = formatter()
            .with_options(FormattingOptions::new().with_bibliography(true))
            .format_text_to("Introduction\n\nThis is body text about topic X (Smith, 2020).", &path)
            .unwrap();

        assert!(path.exists());
        assert_eq!(result.path, path);
        assert_eq!(result.references.entries(), ["(Smith, 2020)"]);
        assert_eq!(result.stats.reference_count, 1);
    }

    #[test]
    fn test_format_file_into_tempdir() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("essay.txt");
        std::fs::write(&input, "Overview\n\nShort body text for the essay.").unwrap();

        let result = formatter().format_file(&input, None).unwrap();
        assert!(result.path.exists());
        assert_eq!(
            result.path.file_name().unwrap().to_str(),
            Some("formatted_essay.docx")
        );
        if let Some(parent) = result.path.parent() {
            let _ = std::fs::remove_dir_all(parent);
        }
    }

    #[test]
    fn test_basic_mode_reported() {
        let dir = tempfile::tempdir().unwrap();
        let result = DocFormatter::new(Arc::new(BlankModel::new("en")))
            .format_text_to("Introduction\n\nBody text.", &dir.path().join("a.docx"))
            .unwrap();
        assert_eq!(result.mode, Mode::Degraded(DegradeReason::CapabilityUnavailable));
    }

    #[test]
    fn test_preview_formats() {
        let f = formatter();
        let text = "Introduction\n\nBody text here.";
        let md = f.preview(text, PreviewFormat::Markdown, &RenderOptions::default()).unwrap();
        assert!(md.starts_with("## 1. Introduction"));
        let plain = f.preview(text, PreviewFormat::Text, &RenderOptions::default()).unwrap();
        assert!(plain.starts_with("1. Introduction"));
        let json = f.preview(text, PreviewFormat::Json, &RenderOptions::default()).unwrap();
        assert!(json.contains("\"paragraphs\""));
    }
}
