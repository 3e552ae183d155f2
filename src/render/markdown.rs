//! Markdown preview of assembled documents.

use crate::error::Result;
use crate::model::{BlockRole, Document, Paragraph, TextRun, TextStyle};

use super::{AssemblyStats, RenderOptions, RenderResult};

/// Convert a document to Markdown.
pub fn to_markdown(doc: &Document, options: &RenderOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(doc)
}

/// Convert a document to Markdown with statistics.
pub fn to_markdown_with_stats(doc: &Document, options: &RenderOptions) -> Result<RenderResult> {
    let mut options = options.clone();
    options.collect_stats = true;
    let renderer = MarkdownRenderer::new(options);
    renderer.render_with_stats(doc)
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a document to Markdown.
    pub fn render(self, doc: &Document) -> Result<String> {
        Ok(self.render_internal(doc))
    }

    /// Render a document to Markdown with assembly statistics.
    pub fn render_with_stats(self, doc: &Document) -> Result<RenderResult> {
        let content = self.render_internal(doc);
        let stats = AssemblyStats::from_document(doc);
        Ok(RenderResult::new(content, doc.metadata.clone(), stats))
    }

    fn render_internal(&self, doc: &Document) -> String {
        let mut output = String::new();

        if self.options.include_frontmatter {
            output.push_str(&doc.metadata.to_yaml_frontmatter());
        }

        let mut in_list = false;
        for paragraph in &doc.paragraphs {
            let is_list = matches!(paragraph.role(), BlockRole::TocEntry | BlockRole::Reference);
            if in_list && !is_list {
                output.push('\n');
            }
            in_list = is_list;
            self.render_paragraph(&mut output, paragraph);
        }

        output.trim().to_string()
    }

    fn render_paragraph(&self, output: &mut String, para: &Paragraph) {
        match para.role() {
            BlockRole::Spacer => {}
            BlockRole::Title => {
                output.push_str("# ");
                self.render_runs(output, &para.runs, false);
                output.push_str("\n\n");
            }
            BlockRole::TocLabel | BlockRole::ReferencesHeading | BlockRole::Heading => {
                output.push_str("## ");
                self.render_runs(output, &para.runs, false);
                output.push_str("\n\n");
            }
            BlockRole::TocEntry => {
                self.render_runs(output, &para.runs, false);
                output.push('\n');
            }
            BlockRole::Reference => {
                output.push_str("- ");
                self.render_runs(output, &para.runs, true);
                output.push('\n');
            }
            BlockRole::Body => {
                if para.is_empty() {
                    return;
                }
                self.render_runs(output, &para.runs, true);
                output.push_str("\n\n");
            }
        }
    }

    fn render_runs(&self, output: &mut String, runs: &[TextRun], styled: bool) {
        for run in runs {
            let text = if self.options.escape_special_chars {
                escape_markdown(&run.text)
            } else {
                run.text.clone()
            };
            if styled {
                output.push_str(&apply_text_style(&text, &run.style));
            } else {
                output.push_str(&text);
            }
        }
    }
}

fn apply_text_style(text: &str, style: &TextStyle) -> String {
    let mut result = text.to_string();

    if style.italic {
        result = format!("*{}*", result);
    }
    if style.bold {
        result = format!("**{}**", result);
    }
    if style.superscript {
        result = format!("<sup>{}</sup>", result);
    }

    result
}

/// Escape special Markdown characters.
/// Only characters that could be misread as Markdown syntax are escaped.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '|' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}
