//! Document assembly engine: projects the classified block stream and the
//! formatting options onto a styled [`Document`].

use super::backend::FormattingBackend;
use super::FormattingOptions;
use crate::error::{Error, Result};
use crate::infer::{detect_headings, detect_title, extract_references, Outcome, ReferenceList};
use crate::model::{
    Alignment, Block, BlockRole, DefaultStyle, Document, Footer, Paragraph, StructuredDocument,
    TextRun,
};
use crate::nlp::LanguageOracle;
use chrono::Utc;

/// Title font size in points.
pub const TITLE_FONT_SIZE: u32 = 16;
/// Section label and heading font size in points.
pub const SECTION_FONT_SIZE: u32 = 14;
/// Maximum number of table of contents entries.
pub const TOC_LIMIT: usize = 10;

const TOC_LABEL: &str = "Table of Contents";
const REFERENCES_LABEL: &str = "References";

/// Everything assembly produced for one text.
#[derive(Debug, Clone)]
pub struct Assembly {
    /// The styled document
    pub document: Document,
    /// The classified structure and how it was obtained
    pub structure: Outcome<StructuredDocument>,
    /// Citations found in the unmodified text
    pub references: ReferenceList,
    /// Table of contents entries (empty unless requested)
    pub toc: Vec<String>,
}

/// Builds styled documents from text.
pub struct Assembler<'a> {
    oracle: &'a dyn LanguageOracle,
    backend: &'a dyn FormattingBackend,
}

impl<'a> Assembler<'a> {
    /// Create an assembler over an oracle and a formatting backend.
    pub fn new(oracle: &'a dyn LanguageOracle, backend: &'a dyn FormattingBackend) -> Self {
        Self { oracle, backend }
    }

    /// Assemble `text` into a styled document.
    pub fn assemble(&self, text: &str, options: &FormattingOptions) -> Result<Assembly> {
        let font = options.effective_font_family().to_string();
        let size = options.effective_font_size();
        log::info!(
            "Assembling with style={} font={} {}pt spacing={} margin={} backend={}",
            options.citation_style,
            font,
            size,
            options.line_spacing,
            options.margin,
            self.backend.name()
        );

        let mut document = Document::new(
            options.margin.geometry(),
            DefaultStyle {
                font_family: font.clone(),
                font_size: size,
                line_spacing: options.line_spacing.multiplier() as f32,
            },
        );
        document.metadata.citation_style = Some(options.citation_style.to_string());
        document.metadata.model = Some(self.oracle.name().to_string());
        document.metadata.generated = Some(Utc::now());

        if options.title_page {
            let title = detect_title(self.oracle, text).into_value();
            document.add_paragraph(
                Paragraph::with_run(
                    BlockRole::Title,
                    TextRun::bold(title.as_str()).with_font(&font, TITLE_FONT_SIZE),
                )
                .aligned(Alignment::Center),
            );
            document.add_paragraph(Paragraph::spacer());
            document.metadata.title = Some(title);
        }

        let mut toc = Vec::new();
        if options.table_of_contents {
            document.add_paragraph(section_label(TOC_LABEL, &font));
            document.add_paragraph(Paragraph::spacer());

            toc = detect_headings(self.oracle, text, TOC_LIMIT).into_value();
            for (i, heading) in toc.iter().enumerate() {
                document.add_paragraph(Paragraph::with_run(
                    BlockRole::TocEntry,
                    TextRun::new(format!("{}. {}", i + 1, heading)).with_font(&font, size),
                ));
            }
            document.add_paragraph(Paragraph::spacer());
        }

        let structure = self.backend.structure(self.oracle, text, options);
        if structure.value.is_empty() {
            return Err(Error::Formatting(format!(
                "backend '{}' produced no blocks",
                self.backend.name()
            )));
        }
        if let Some(reason) = structure.reason() {
            log::info!("Structure inferred in degraded mode: {}", reason);
        }

        for block in structure.value.numbered() {
            match &block {
                Block::Heading { text } => {
                    let mut heading = Paragraph::with_run(
                        BlockRole::Heading,
                        TextRun::bold(text.as_str()).with_font(&font, SECTION_FONT_SIZE),
                    );
                    heading.style.heading_level = Some(1);
                    document.add_paragraph(heading);
                }
                Block::Paragraph { .. } => {
                    let mut body = Paragraph::new(BlockRole::Body);
                    body.style.line_spacing = Some(options.line_spacing.multiplier() as f32);
                    for (piece, superscript) in block.runs() {
                        body.add_run(
                            TextRun::new(piece)
                                .with_font(&font, size)
                                .with_superscript(superscript),
                        );
                    }
                    document.add_paragraph(body);
                }
            }
        }

        if options.page_numbers {
            document.footer = Some(Footer {
                alignment: Alignment::Center,
                page_number: true,
                font_name: Some(font.clone()),
            });
        }

        let references = extract_references(text, options.citation_style);
        if options.bibliography {
            document.add_paragraph(Paragraph::spacer());
            let mut label = section_label(REFERENCES_LABEL, &font);
            label.style.role = BlockRole::ReferencesHeading;
            document.add_paragraph(label);
            for entry in references.rendered() {
                document.add_paragraph(Paragraph::with_run(
                    BlockRole::Reference,
                    TextRun::new(entry).with_font(&font, size),
                ));
            }
        }

        log::debug!(
            "Assembled {} paragraphs ({} headings, {} references)",
            document.paragraphs.len(),
            structure.value.heading_count(),
            references.len()
        );

        Ok(Assembly {
            document,
            structure,
            references,
            toc,
        })
    }
}

fn section_label(text: &str, font: &str) -> Paragraph {
    Paragraph::with_run(
        BlockRole::TocLabel,
        TextRun::bold(text).with_font(font, SECTION_FONT_SIZE),
    )
    .aligned(Alignment::Center)
}
