//! Formatting backends: turn extracted text into a citation-rewritten
//! block stream.

use super::{CitationScope, FormattingOptions};
use crate::infer::{apply_citations, infer_structure_with, HeadingRule, Outcome};
use crate::model::StructuredDocument;
use crate::nlp::LanguageOracle;

/// Produces the classified, citation-rewritten structure of a text.
///
/// Backends never fail: faults inside a backend degrade the returned
/// [`Outcome`] instead.
pub trait FormattingBackend: Send + Sync {
    /// Backend name for logs and reports.
    fn name(&self) -> &str;

    /// Classify `text` and rewrite its citations.
    fn structure(
        &self,
        oracle: &dyn LanguageOracle,
        text: &str,
        options: &FormattingOptions,
    ) -> Outcome<StructuredDocument>;
}

/// Local heuristic backend: structure classifier plus citation formatter.
#[derive(Debug, Clone, Default)]
pub struct LocalBackend {
    scope: CitationScope,
    heading_rule: HeadingRule,
}

impl LocalBackend {
    /// Create a backend rewriting every paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set which paragraphs receive citation rewriting.
    pub fn with_scope(mut self, scope: CitationScope) -> Self {
        self.scope = scope;
        self
    }

    /// Set the basic-mode heading rule.
    pub fn with_heading_rule(mut self, rule: HeadingRule) -> Self {
        self.heading_rule = rule;
        self
    }
}

impl FormattingBackend for LocalBackend {
    fn name(&self) -> &str {
        "local"
    }

    fn structure(
        &self,
        oracle: &dyn LanguageOracle,
        text: &str,
        options: &FormattingOptions,
    ) -> Outcome<StructuredDocument> {
        infer_structure_with(oracle, text, self.heading_rule)
            .map(|doc| apply_citations(&doc, options.citation_style, self.scope))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::CitationStyle;
    use crate::model::Block;
    use crate::nlp::BlankModel;

    #[test]
    fn test_local_backend_chicago() {
        let options = FormattingOptions::new().with_citation_style(CitationStyle::Chicago);
        let outcome = LocalBackend::new().structure(
            &BlankModel::new("en"),
            "Background\n\nSee ref [3] for details on the earlier experiments we ran.",
            &options,
        );

        assert_eq!(
            outcome.value.blocks,
            vec![
                Block::heading("Background"),
                Block::paragraph_with_superscripts(
                    "See ref ^3 for details on the earlier experiments we ran.",
                    vec![8..10]
                )
            ]
        );
    }

    #[test]
    fn test_heading_rule_is_applied() {
        let text = "Background\n\nSee ref (3).";
        let options = FormattingOptions::default();
        let oracle = BlankModel::new("en");

        let default = LocalBackend::new().structure(&oracle, text, &options);
        assert_eq!(default.value.heading_count(), 2);

        let unterminated = LocalBackend::new()
            .with_heading_rule(HeadingRule::Unterminated)
            .structure(&oracle, text, &options);
        assert_eq!(
            unterminated.value.blocks,
            vec![Block::heading("Background"), Block::paragraph("See ref (3).")]
        );
    }
}
