//! DOCX serialization of assembled documents.

use std::io::{Seek, Write};
use std::path::{Path, PathBuf};

use docx_rs::{
    AlignmentType, Docx, FieldCharType, Footer as DocxFooter, InstrPAGE, InstrText, LineSpacing,
    PageMargin, Paragraph as DocxParagraph, Run, RunFonts, Style, StyleType, VertAlignType,
};

use crate::error::{Error, Result};
use crate::model::{Alignment, BlockRole, Document, Footer, PageGeometry, Paragraph, TextRun};

const HEADING_STYLE: &str = "Heading1";
const TITLE_STYLE: &str = "Title";

/// Serializes an assembled [`Document`] to a file.
pub trait DocumentWriter: Send + Sync {
    /// File extension produced by this writer (without the dot).
    fn extension(&self) -> &'static str;

    /// Write the document to `path` and return the final location.
    fn write(&self, doc: &Document, path: &Path) -> Result<PathBuf>;
}

/// Writes Office Open XML word-processing files.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxWriter;

impl DocxWriter {
    /// Create a new DOCX writer.
    pub fn new() -> Self {
        Self
    }

    /// Build the docx-rs representation of a document.
    pub fn build(&self, doc: &Document) -> Docx {
        let font = doc.defaults.font_family.as_str();
        let mut docx = Docx::new()
            .page_margin(page_margin(&doc.geometry))
            .default_fonts(run_fonts(font))
            .default_size(half_points(doc.defaults.font_size))
            .add_style(Style::new(TITLE_STYLE, StyleType::Paragraph).name("Title"))
            .add_style(Style::new(HEADING_STYLE, StyleType::Paragraph).name("Heading 1"));

        for paragraph in &doc.paragraphs {
            docx = docx.add_paragraph(build_paragraph(paragraph, doc));
        }

        if let Some(footer) = &doc.footer {
            docx = docx.footer(build_footer(footer));
        }

        docx
    }

    /// Serialize a document into any seekable writer.
    pub fn write_to<W: Write + Seek>(&self, doc: &Document, writer: W) -> Result<()> {
        self.build(doc)
            .build()
            .pack(writer)
            .map_err(|e| Error::Write(e.to_string()))
    }
}

impl DocumentWriter for DocxWriter {
    fn extension(&self) -> &'static str {
        "docx"
    }

    fn write(&self, doc: &Document, path: &Path) -> Result<PathBuf> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        // The artifact only appears at `path` once it is fully written.
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        self.write_to(doc, tmp.as_file_mut())?;
        tmp.as_file_mut().flush()?;
        tmp.persist(path).map_err(|e| Error::Io(e.error))?;

        log::debug!("Wrote {} paragraphs to {}", doc.paragraphs.len(), path.display());
        Ok(path.to_path_buf())
    }
}

fn page_margin(geometry: &PageGeometry) -> PageMargin {
    PageMargin::new()
        .top(PageGeometry::to_twips(geometry.top) as _)
        .bottom(PageGeometry::to_twips(geometry.bottom) as _)
        .left(PageGeometry::to_twips(geometry.left) as _)
        .right(PageGeometry::to_twips(geometry.right) as _)
}

fn run_fonts(name: &str) -> RunFonts {
    RunFonts::new().ascii(name).hi_ansi(name).cs(name)
}

/// Word sizes are expressed in half-points.
fn half_points(points: u32) -> usize {
    points as usize * 2
}

fn alignment_type(alignment: Alignment) -> AlignmentType {
    match alignment {
        Alignment::Left => AlignmentType::Left,
        Alignment::Center => AlignmentType::Center,
        Alignment::Right => AlignmentType::Right,
        Alignment::Justify => AlignmentType::Both,
    }
}

fn build_paragraph(paragraph: &Paragraph, doc: &Document) -> DocxParagraph {
    let mut p = DocxParagraph::new().align(alignment_type(paragraph.style.alignment));

    match paragraph.role() {
        BlockRole::Title => p = p.style(TITLE_STYLE),
        BlockRole::Heading if paragraph.style.heading_level.is_some() => p = p.style(HEADING_STYLE),
        _ => {}
    }

    if let Some(spacing) = paragraph.style.line_spacing {
        let line = (f64::from(spacing) * 240.0).round();
        p = p.line_spacing(LineSpacing::new().line(line as _));
    }

    for run in &paragraph.runs {
        p = p.add_run(build_run(run, doc));
    }
    p
}

fn build_run(run: &TextRun, doc: &Document) -> Run {
    let mut r = Run::new().add_text(run.text.as_str());
    if run.style.bold {
        r = r.bold();
    }
    if run.style.italic {
        r = r.italic();
    }
    if run.style.superscript {
        r.run_property = r.run_property.vert_align(VertAlignType::SuperScript);
    }
    let font = run
        .style
        .font_name
        .as_deref()
        .unwrap_or(doc.defaults.font_family.as_str());
    r = r.fonts(run_fonts(font));
    if let Some(size) = run.style.font_size {
        r = r.size(half_points(size));
    }
    r
}

fn build_footer(footer: &Footer) -> DocxFooter {
    let mut p = DocxParagraph::new().align(alignment_type(footer.alignment));
    if footer.page_number {
        let mut run = Run::new()
            .add_field_char(FieldCharType::Begin, false)
            .add_instr_text(InstrText::PAGE(InstrPAGE::new()))
            .add_field_char(FieldCharType::Separate, false)
            .add_text("1")
            .add_field_char(FieldCharType::End, false);
        if let Some(font) = footer.font_name.as_deref() {
            run = run.fonts(run_fonts(font));
        }
        p = p.add_run(run);
    }
    DocxFooter::new().add_paragraph(p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::docx_paragraph_texts;
    use crate::model::DefaultStyle;

    fn sample() -> Document {
        let mut doc = Document::new(
            PageGeometry::uniform(1.5),
            DefaultStyle {
                font_family: "Arial".to_string(),
                font_size: 12,
                line_spacing: 2.0,
            },
        );
        doc.add_paragraph(
            Paragraph::with_run(BlockRole::Title, TextRun::bold("My Paper").with_font("Arial", 16))
                .aligned(Alignment::Center),
        );
        let mut heading = Paragraph::with_run(BlockRole::Heading, TextRun::bold("1. Introduction"));
        heading.style.heading_level = Some(1);
        doc.add_paragraph(heading);
        let mut body = Paragraph::new(BlockRole::Body);
        body.style.line_spacing = Some(2.0);
        body.add_run(TextRun::new("See ref "));
        body.add_run(TextRun::new("3").with_superscript(true));
        doc.add_paragraph(body);
        doc.footer = Some(Footer {
            alignment: Alignment::Center,
            page_number: true,
            font_name: None,
        });
        doc
    }

    #[test]
    fn test_write_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.docx");

        let written = DocxWriter::new().write(&sample(), &path).unwrap();
        assert_eq!(written, path);

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], b"PK");

        let docx = docx_rs::read_docx(&bytes).unwrap();
        let texts = docx_paragraph_texts(&docx);
        assert_eq!(texts, vec!["My Paper", "1. Introduction", "See ref 3"]);
        assert_eq!(docx.document.section_property.page_margin.left, 2160);
    }

    #[test]
    fn test_write_to_memory() {
        let mut cursor = std::io::Cursor::new(Vec::new());
        DocxWriter::new().write_to(&sample(), &mut cursor).unwrap();
        assert!(cursor.into_inner().starts_with(b"PK"));
    }

    #[test]
    fn test_failed_write_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.docx");

        let result = DocxWriter::new().write(&sample(), &path);
        assert!(result.is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_superscript_run_is_raised() {
        let doc = sample();
        let raised = build_run(&TextRun::new("3").with_superscript(true), &doc);
        assert!(raised.run_property.vert_align.is_some());

        let plain = build_run(&TextRun::new("See ref "), &doc);
        assert!(plain.run_property.vert_align.is_none());
    }

    #[test]
    fn test_half_points() {
        assert_eq!(half_points(12), 24);
        assert_eq!(DocxWriter::new().extension(), "docx");
    }
}
