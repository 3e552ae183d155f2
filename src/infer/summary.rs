//! Keyword and entity summarizer.

use super::outcome::{DegradeReason, Outcome};
use crate::nlp::{Capability, Entity, LanguageOracle, Parse};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Maximum number of keywords reported.
pub const MAX_KEYWORDS: usize = 50;
/// Maximum number of noun chunks reported.
pub const MAX_NOUN_CHUNKS: usize = 50;
/// Keywords must be longer than this many characters.
pub const MIN_KEYWORD_CHARS: usize = 3;

static SENTENCE_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]+").expect("valid regex"));
static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]").expect("valid regex"));

/// Lightweight analysis of a text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Entity mentions in document order
    pub entities: Vec<Entity>,
    /// Number of sentences
    #[serde(rename = "sentences")]
    pub sentence_count: usize,
    /// Number of tokens
    #[serde(rename = "tokens")]
    pub token_count: usize,
    /// Up to 50 keywords
    pub keywords: Vec<String>,
    /// Up to 50 noun phrases
    pub noun_chunks: Vec<String>,
}

/// Analyze `text` with the oracle, falling back to frequency statistics.
pub fn analyze(oracle: &dyn LanguageOracle, text: &str) -> Outcome<AnalysisResult> {
    if oracle.capability() == Capability::Basic {
        return Outcome::degraded(basic_analysis(text), DegradeReason::CapabilityUnavailable);
    }

    match oracle.parse(text) {
        Ok(parse) => Outcome::full(full_analysis(&parse)),
        Err(e) => {
            log::warn!("Analysis fell back to basic counts: {}", e);
            Outcome::degraded(
                basic_counts(text),
                DegradeReason::OracleFailed(e.to_string()),
            )
        }
    }
}

fn full_analysis(parse: &Parse) -> AnalysisResult {
    let keywords = parse
        .tokens()
        .filter(|t| {
            t.pos.is_some_and(|p| p.is_content())
                && !t.is_stop
                && t.text.chars().count() > MIN_KEYWORD_CHARS
        })
        .map(|t| t.text.clone())
        .take(MAX_KEYWORDS)
        .collect();

    AnalysisResult {
        entities: parse.entities.clone(),
        sentence_count: parse.sentences.len(),
        token_count: parse.token_count(),
        keywords,
        noun_chunks: parse.noun_chunks.iter().take(MAX_NOUN_CHUNKS).cloned().collect(),
    }
}

/// Sentence and token counts only.
fn basic_counts(text: &str) -> AnalysisResult {
    AnalysisResult {
        sentence_count: SENTENCE_END
            .split(text)
            .filter(|s| !s.trim().is_empty())
            .count(),
        token_count: text.split_whitespace().count(),
        ..Default::default()
    }
}

fn basic_analysis(text: &str) -> AnalysisResult {
    AnalysisResult {
        keywords: frequent_words(text, MAX_KEYWORDS),
        ..basic_counts(text)
    }
}

/// The `limit` most frequent normalized words longer than
/// [`MIN_KEYWORD_CHARS`]; ties keep first-seen order.
pub fn frequent_words(text: &str, limit: usize) -> Vec<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for word in text.split_whitespace() {
        let word = NON_WORD.replace_all(&word.to_lowercase(), "").into_owned();
        if word.chars().count() <= MIN_KEYWORD_CHARS {
            continue;
        }
        match index.get(&word) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(word.clone(), counts.len());
                counts.push((word, 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().take(limit).map(|(w, _)| w).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::{BlankModel, RuleModel};

    #[test]
    fn test_basic_analysis() {
        let text = "Graph models help. Graph models scale! Do they? The data says yes, data data.";
        let outcome = analyze(&BlankModel::new("en"), text);
        assert!(outcome.is_degraded());

        let result = outcome.value;
        assert!(result.entities.is_empty());
        assert!(result.noun_chunks.is_empty());
        assert_eq!(result.sentence_count, 4);
        assert_eq!(result.token_count, 14);
        assert_eq!(
            result.keywords,
            vec!["data", "graph", "models", "help", "scale", "they", "says"]
        );
    }

    #[test]
    fn test_keywords_are_long_and_capped() {
        let text = (0..200)
            .map(|i| format!("word{} an of it, x.", i))
            .collect::<Vec<_>>()
            .join(" ");
        let keywords = frequent_words(&text, MAX_KEYWORDS);
        assert_eq!(keywords.len(), MAX_KEYWORDS);
        assert!(keywords.iter().all(|k| k.chars().count() > MIN_KEYWORD_CHARS));
        assert_eq!(keywords[0], "word0");
    }

    #[test]
    fn test_full_analysis() {
        let text = "Dr. Smith joined Stanford University in 2019. The effective method reduces the overall error.";
        let outcome = analyze(&RuleModel::new(), text);
        assert!(!outcome.is_degraded());

        let result = outcome.value;
        assert_eq!(result.sentence_count, 2);
        assert!(result.entities.iter().any(|e| e.label == "ORG"));
        assert!(result.keywords.contains(&"effective".to_string()));
        assert!(result.keywords.contains(&"method".to_string()));
        assert!(!result.keywords.contains(&"the".to_string()));
        assert!(result.noun_chunks.contains(&"The effective method".to_string()));
    }

    #[test]
    fn test_oracle_failure_keeps_counts() {
        let model = RuleModel::new().with_max_length(3);
        let outcome = analyze(&model, "One two. Three four.");
        assert!(matches!(outcome.reason(), Some(DegradeReason::OracleFailed(_))));
        assert_eq!(outcome.value.sentence_count, 2);
        assert_eq!(outcome.value.token_count, 4);
        assert!(outcome.value.keywords.is_empty());
    }

    #[test]
    fn test_json_keys() {
        let json = serde_json::to_value(AnalysisResult::default()).unwrap();
        for key in ["entities", "sentences", "tokens", "keywords", "noun_chunks"] {
            assert!(json.get(key).is_some(), "missing key {}", key);
        }
    }
}
