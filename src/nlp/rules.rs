//! Rule-based English model with full annotation capability.
//!
//! Part-of-speech tags come from closed-class lexicons and suffix rules;
//! entities are runs of proper nouns (labelled by honorifics and
//! organization suffixes) plus dates and cardinals; noun chunks follow the
//! pattern `DET? ADJ* (NOUN|PROPN)+`.

use super::lexicon::{
    ADPOSITIONS, ADVERBS, AUXILIARIES, BASE_VERBS, COORDINATORS, DETERMINERS, HONORIFICS,
    ORG_SUFFIXES, PARTICLES, PRONOUNS, STOP_WORDS, SUBORDINATORS,
};
use super::segment::{segment_sentences, tokenize};
use super::{is_alpha, is_title_case, Capability, Entity, LanguageOracle, Parse, PartOfSpeech, Sentence, Token};
use crate::error::{Error, Result};

/// Default maximum input length in characters.
pub const DEFAULT_MAX_LENGTH: usize = 1_000_000;

const MODEL_NAME: &str = "en_core_rules";

const ADJ_SUFFIXES: &[&str] = &["ous", "ful", "ive", "able", "ible", "ical", "less", "ish", "ic"];
const VERB_SUFFIXES: &[&str] = &["ize", "ise", "ify", "ed", "ing"];
const SYMBOLS: &[char] = &['$', '%', '&', '+', '=', '<', '>', '#', '@', '§', '€', '£'];

/// Full-capability English model.
#[derive(Debug, Clone)]
pub struct RuleModel {
    max_length: usize,
}

impl Default for RuleModel {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleModel {
    /// Create the model with the default maximum input length.
    pub fn new() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
        }
    }

    /// Override the maximum input length in characters.
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Whether `name` refers to this model.
    pub fn is_known_name(name: &str) -> bool {
        name == MODEL_NAME
    }

    fn annotate(&self, sentence: &str) -> Vec<Token> {
        let words = tokenize(sentence);
        let mut tokens: Vec<Token> = words
            .iter()
            .enumerate()
            .map(|(i, word)| Token {
                text: word.to_string(),
                pos: Some(tag_word(word, i == 0)),
                is_stop: STOP_WORDS.contains(word.to_lowercase().as_str()),
                is_title: is_title_case(word),
                is_alpha: is_alpha(word),
            })
            .collect();

        // A capitalized opener followed by a proper noun is part of the name.
        if tokens.len() > 1
            && tokens[0].is_title
            && tokens[0].pos == Some(PartOfSpeech::Noun)
            && tokens[1].pos == Some(PartOfSpeech::Propn)
        {
            tokens[0].pos = Some(PartOfSpeech::Propn);
        }

        tokens
    }
}

impl LanguageOracle for RuleModel {
    fn name(&self) -> &str {
        MODEL_NAME
    }

    fn capability(&self) -> Capability {
        Capability::Full
    }

    fn parse(&self, text: &str) -> Result<Parse> {
        let length = text.chars().count();
        if length > self.max_length {
            return Err(Error::Oracle(format!(
                "text of {} characters exceeds maximum length of {}",
                length, self.max_length
            )));
        }

        let mut parse = Parse::default();
        for span in segment_sentences(text) {
            let sentence_text = span.text(text);
            let tokens = self.annotate(sentence_text);
            parse.entities.extend(find_entities(&tokens));
            parse.noun_chunks.extend(find_noun_chunks(&tokens));
            parse.sentences.push(Sentence {
                text: sentence_text.to_string(),
                tokens,
            });
        }

        log::debug!(
            "Parsed {} sentences, {} entities, {} noun chunks",
            parse.sentences.len(),
            parse.entities.len(),
            parse.noun_chunks.len()
        );
        Ok(parse)
    }
}

fn tag_word(word: &str, sentence_initial: bool) -> PartOfSpeech {
    if !word.chars().any(char::is_alphanumeric) {
        return if word.chars().all(|c| SYMBOLS.contains(&c)) {
            PartOfSpeech::Sym
        } else {
            PartOfSpeech::Punct
        };
    }
    if word.chars().all(|c| c.is_ascii_digit()) {
        return PartOfSpeech::Num;
    }

    let lower = word.to_lowercase();
    let lower = lower.as_str();
    if AUXILIARIES.contains(lower) {
        return PartOfSpeech::Aux;
    }
    if DETERMINERS.contains(lower) {
        return PartOfSpeech::Det;
    }
    if PRONOUNS.contains(lower) {
        return PartOfSpeech::Pron;
    }
    if COORDINATORS.contains(lower) {
        return PartOfSpeech::Cconj;
    }
    if SUBORDINATORS.contains(lower) {
        return PartOfSpeech::Sconj;
    }
    if ADPOSITIONS.contains(lower) {
        return PartOfSpeech::Adp;
    }
    if PARTICLES.contains(lower) {
        return PartOfSpeech::Part;
    }
    if ADVERBS.contains(lower) {
        return PartOfSpeech::Adv;
    }

    let is_acronym = word.chars().count() >= 2 && word.chars().all(|c| c.is_uppercase());
    if is_acronym || (!sentence_initial && is_title_case(word)) {
        return PartOfSpeech::Propn;
    }
    if BASE_VERBS.contains(lower) {
        return PartOfSpeech::Verb;
    }

    let long = lower.chars().count() > 4;
    if long && lower.ends_with("ly") {
        PartOfSpeech::Adv
    } else if long && ADJ_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
        PartOfSpeech::Adj
    } else if long && VERB_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
        PartOfSpeech::Verb
    } else if word.chars().any(|c| c.is_ascii_digit()) {
        PartOfSpeech::Num
    } else {
        PartOfSpeech::Noun
    }
}

fn is_honorific(token: &Token) -> bool {
    HONORIFICS.contains(token.text.to_lowercase().as_str())
}

fn find_entities(tokens: &[Token]) -> Vec<Entity> {
    let mut entities = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let token = &tokens[i];
        match token.pos {
            Some(PartOfSpeech::Num) if token.text.chars().all(|c| c.is_ascii_digit()) => {
                let label = match token.text.parse::<u32>() {
                    Ok(year) if token.text.len() == 4 && (1000..=2100).contains(&year) => "DATE",
                    _ => "CARDINAL",
                };
                entities.push(Entity {
                    text: token.text.clone(),
                    label: label.to_string(),
                });
                i += 1;
            }
            Some(PartOfSpeech::Propn) if !is_honorific(token) => {
                let start = i;
                let mut end = i + 1;
                // "University of Oxford", "Johnson & Johnson"
                while end < tokens.len() {
                    if tokens[end].pos == Some(PartOfSpeech::Propn) {
                        end += 1;
                    } else if (tokens[end].text == "of" || tokens[end].text == "&")
                        && tokens.get(end + 1).and_then(|t| t.pos) == Some(PartOfSpeech::Propn)
                    {
                        end += 2;
                    } else {
                        break;
                    }
                }

                let run = &tokens[start..end];
                let after_honorific = match start {
                    0 => false,
                    1 => is_honorific(&tokens[0]),
                    _ => {
                        is_honorific(&tokens[start - 1])
                            || (tokens[start - 1].text == "." && is_honorific(&tokens[start - 2]))
                    }
                };
                let has_org_word = run
                    .iter()
                    .any(|t| ORG_SUFFIXES.contains(t.text.to_lowercase().as_str()));
                let is_acronym = run.len() == 1
                    && run[0].text.chars().count() >= 2
                    && run[0].text.chars().all(char::is_uppercase);

                let label = if after_honorific {
                    "PERSON"
                } else if has_org_word || is_acronym {
                    "ORG"
                } else if run.len() >= 2 {
                    "PERSON"
                } else {
                    "PROPN"
                };

                entities.push(Entity {
                    text: run
                        .iter()
                        .map(|t| t.text.as_str())
                        .collect::<Vec<_>>()
                        .join(" "),
                    label: label.to_string(),
                });
                i = end;
            }
            _ => i += 1,
        }
    }

    entities
}

fn find_noun_chunks(tokens: &[Token]) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let start = i;
        if tokens[i].pos == Some(PartOfSpeech::Det) {
            i += 1;
        }
        while i < tokens.len() && tokens[i].pos == Some(PartOfSpeech::Adj) {
            i += 1;
        }
        let head_start = i;
        while i < tokens.len() && tokens[i].pos.is_some_and(|p| p.is_nominal()) {
            i += 1;
        }

        if i > head_start {
            chunks.push(
                tokens[start..i]
                    .iter()
                    .map(|t| t.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" "),
            );
        } else {
            i = start + 1;
        }
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_name() {
        assert!(RuleModel::is_known_name("en_core_rules"));
        assert!(!RuleModel::is_known_name("en_core_web_sm"));
    }

    #[test]
    fn test_tagging() {
        assert_eq!(tag_word("the", false), PartOfSpeech::Det);
        assert_eq!(tag_word("were", false), PartOfSpeech::Aux);
        assert_eq!(tag_word("quickly", false), PartOfSpeech::Adv);
        assert_eq!(tag_word("effective", false), PartOfSpeech::Adj);
        assert_eq!(tag_word("optimized", false), PartOfSpeech::Verb);
        assert_eq!(tag_word("Oxford", false), PartOfSpeech::Propn);
        assert_eq!(tag_word("Results", true), PartOfSpeech::Noun);
        assert_eq!(tag_word("2020", false), PartOfSpeech::Num);
        assert_eq!(tag_word(",", false), PartOfSpeech::Punct);
        assert_eq!(tag_word("%", false), PartOfSpeech::Sym);
    }

    #[test]
    fn test_entities() {
        let model = RuleModel::new();
        let parse = model
            .parse("Dr. Smith joined Stanford University in 2019.")
            .unwrap();

        let found: Vec<(&str, &str)> = parse
            .entities
            .iter()
            .map(|e| (e.text.as_str(), e.label.as_str()))
            .collect();
        assert_eq!(
            found,
            vec![
                ("Smith", "PERSON"),
                ("Stanford University", "ORG"),
                ("2019", "DATE")
            ]
        );
    }

    #[test]
    fn test_noun_chunks() {
        let model = RuleModel::new();
        let parse = model
            .parse("The effective method reduces the overall error.")
            .unwrap();
        assert_eq!(
            parse.noun_chunks,
            vec!["The effective method", "the overall error"]
        );
    }

    #[test]
    fn test_flags() {
        let model = RuleModel::new();
        let parse = model.parse("Related Work").unwrap();
        assert_eq!(parse.sentences.len(), 1);
        assert!(parse.sentences[0].has_title_token());
        assert_eq!(model.capability(), Capability::Full);
    }

    #[test]
    fn test_max_length() {
        let model = RuleModel::new().with_max_length(10);
        assert!(matches!(
            model.parse("this text is too long"),
            Err(Error::Oracle(_))
        ));
    }
}
