//! Document model types.
//!
//! Two representations live here: the [`StructuredDocument`] produced by
//! structure inference (an ordered stream of headings and paragraphs), and
//! the styled [`Document`] produced by assembly, which carries page
//! geometry, fonts, and section roles and is what writers and previews
//! consume.

mod document;
mod paragraph;
mod structure;

pub use document::{DefaultStyle, Document, Footer, Metadata, PageGeometry, TWIPS_PER_INCH};
pub use paragraph::{Alignment, BlockRole, Paragraph, ParagraphStyle, TextRun, TextStyle};
pub use structure::{Block, StructuredDocument};
