//! Rendering module: DOCX artifacts and text previews of assembled documents.

mod docx;
mod json;
mod markdown;
mod options;
mod result;
mod text;

pub use docx::{DocumentWriter, DocxWriter};
pub use json::{to_json, value_to_json, JsonFormat};
pub use markdown::{to_markdown, to_markdown_with_stats, MarkdownRenderer};
pub use options::RenderOptions;
pub use result::{AssemblyStats, RenderResult};
pub use text::to_text;
