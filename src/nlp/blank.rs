//! Blank language model: sentence boundaries and lexical flags only.

use super::lexicon::STOP_WORDS;
use super::segment::{segment_sentences, tokenize};
use super::{Capability, LanguageOracle, Parse, Sentence, Token};
use crate::error::Result;

/// A model without tagging or entity recognition.
///
/// Sentences and tokens carry only what can be read off the characters
/// themselves, so every heuristic consuming it runs in basic mode.
#[derive(Debug, Clone)]
pub struct BlankModel {
    name: String,
}

impl BlankModel {
    /// Create the blank model for a language code (e.g. `"en"`).
    pub fn new(lang: impl Into<String>) -> Self {
        Self {
            name: format!("blank:{}", lang.into()),
        }
    }
}

impl LanguageOracle for BlankModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn capability(&self) -> Capability {
        Capability::Basic
    }

    fn parse(&self, text: &str) -> Result<Parse> {
        let sentences = segment_sentences(text)
            .into_iter()
            .map(|span| {
                let sentence = span.text(text);
                Sentence {
                    text: sentence.to_string(),
                    tokens: tokenize(sentence)
                        .into_iter()
                        .map(|word| {
                            let mut token = Token::lexical(word);
                            token.is_stop = STOP_WORDS.contains(word.to_lowercase().as_str());
                            token
                        })
                        .collect(),
                }
            })
            .collect();

        Ok(Parse {
            sentences,
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_model_parse() {
        let model = BlankModel::new("en");
        assert_eq!(model.name(), "blank:en");
        assert_eq!(model.capability(), Capability::Basic);

        let parse = model.parse("The Method works. It is simple.").unwrap();
        assert_eq!(parse.sentences.len(), 2);
        assert!(parse.entities.is_empty());
        assert!(parse.noun_chunks.is_empty());

        let first = &parse.sentences[0].tokens;
        assert!(first[0].is_stop);
        assert!(first[1].is_title);
        assert!(first.iter().all(|t| t.pos.is_none()));
    }
}
