//! Heuristic inference over extracted text.
//!
//! - [`structure`]: heading/paragraph classification
//! - [`citation`]: per-style citation rewriting and reference extraction
//! - [`summary`]: keyword and entity analysis
//!
//! Every stage takes the language oracle explicitly and reports through an
//! [`Outcome`] whether it ran on the full path or degraded.

pub mod citation;
mod outcome;
pub mod structure;
pub mod summary;

pub use citation::{apply_citations, extract_references, rewrite_citations, rewrite_paragraph, ReferenceList};
pub use outcome::{DegradeReason, Mode, Outcome};
pub use structure::{
    classify, classify_with, detect_headings, detect_title, infer_structure, infer_structure_with,
    is_heading_candidate, HeadingRule,
};
pub use summary::{analyze, AnalysisResult};
