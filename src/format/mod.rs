//! Formatting: options, backends, and document assembly.

mod assemble;
mod backend;
mod options;
pub mod remote;

pub use assemble::{Assembler, Assembly, SECTION_FONT_SIZE, TITLE_FONT_SIZE, TOC_LIMIT};
pub use backend::{FormattingBackend, LocalBackend};
pub use options::{
    parse_or_default, CitationScope, CitationStyle, FormattingOptions, LineSpacing, Margin,
    DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE,
};
pub use remote::{
    chunk_paragraphs, chunk_spans, CompletionClient, MockCompletionClient, RemoteBackend,
    DEFAULT_MAX_CHUNK_CHARS,
};

#[cfg(feature = "remote")]
pub use remote::HttpCompletionClient;
