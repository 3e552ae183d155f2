//! Sentence segmentation and word tokenization.
//!
//! Boundaries fall at every line break and after terminal punctuation
//! (`.`, `!`, `?`, optionally followed by closing quotes or brackets),
//! unless the period belongs to a known abbreviation or an initial, or the
//! next word starts in lowercase.

use super::lexicon::ABBREVIATIONS;
use regex::Regex;
use std::sync::LazyLock;

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S+").expect("valid regex"));

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+(?:[-'’]\w+)*|[^\w\s]").expect("valid regex"));

const CLOSERS: &[char] = &['"', '\'', ')', ']', '}', '”', '’', '»'];
const OPENERS: &[char] = &['"', '\'', '(', '[', '{', '“', '‘', '«'];

/// Byte range of one sentence inside the segmented text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentenceSpan {
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset one past the last character
    pub end: usize,
}

impl SentenceSpan {
    /// The sentence text within `source`, already free of surrounding whitespace.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

/// Split `text` into sentence spans in document order.
pub fn segment_sentences(text: &str) -> Vec<SentenceSpan> {
    let mut spans = Vec::new();
    let mut line_start = 0;

    for line in text.split('\n') {
        let words: Vec<_> = WORD.find_iter(line).collect();
        let mut start: Option<usize> = None;

        for (i, word) in words.iter().enumerate() {
            let sentence_start = *start.get_or_insert(word.start());
            let next = words.get(i + 1).map(|m| m.as_str());
            if ends_sentence(word.as_str(), next) {
                spans.push(SentenceSpan {
                    start: line_start + sentence_start,
                    end: line_start + word.end(),
                });
                start = None;
            }
        }

        if let (Some(sentence_start), Some(last)) = (start, words.last()) {
            spans.push(SentenceSpan {
                start: line_start + sentence_start,
                end: line_start + last.end(),
            });
        }

        line_start += line.len() + 1;
    }

    spans
}

/// Split a sentence into word and punctuation tokens.
///
/// Hyphenated compounds and contractions stay whole.
pub fn tokenize(text: &str) -> Vec<&str> {
    TOKEN.find_iter(text).map(|m| m.as_str()).collect()
}

fn ends_sentence(word: &str, next: Option<&str>) -> bool {
    let core = word.trim_end_matches(CLOSERS);
    let last = match core.chars().last() {
        Some(c) => c,
        None => return false,
    };
    if !matches!(last, '.' | '!' | '?') {
        return false;
    }

    if let Some(next) = next {
        let first = next.trim_start_matches(OPENERS).chars().next();
        if first.is_some_and(char::is_lowercase) {
            return false;
        }
    }

    !(last == '.' && is_abbreviation(core))
}

fn is_abbreviation(word: &str) -> bool {
    let stem = word.trim_start_matches(OPENERS).trim_end_matches('.');
    let lower = stem.to_lowercase();
    if ABBREVIATIONS.contains(lower.as_str()) {
        return true;
    }
    // Single-letter initial such as "J."
    let mut chars = stem.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentences(text: &str) -> Vec<&str> {
        segment_sentences(text)
            .iter()
            .map(|span| span.text(text))
            .collect()
    }

    #[test]
    fn test_split_on_terminal_punctuation() {
        assert_eq!(
            sentences("The study ran for a year. Results were mixed! Why?"),
            vec!["The study ran for a year.", "Results were mixed!", "Why?"]
        );
    }

    #[test]
    fn test_line_breaks_are_boundaries() {
        assert_eq!(
            sentences("Introduction\n\nThis is body text about topic X (Smith, 2020)."),
            vec![
                "Introduction",
                "This is body text about topic X (Smith, 2020)."
            ]
        );
    }

    #[test]
    fn test_abbreviations_do_not_split() {
        assert_eq!(
            sentences("Dr. Smith et al. reported gains, e.g. in recall. J. Doe agreed."),
            vec![
                "Dr. Smith et al. reported gains, e.g. in recall.",
                "J. Doe agreed."
            ]
        );
    }

    #[test]
    fn test_lowercase_continuation() {
        assert_eq!(sentences("It rose 3.5 percent. and kept rising."), vec![
            "It rose 3.5 percent. and kept rising."
        ]);
    }

    #[test]
    fn test_closing_quote_after_period() {
        assert_eq!(
            sentences("He said \"stop.\" Then he left."),
            vec!["He said \"stop.\"", "Then he left."]
        );
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert!(segment_sentences("").is_empty());
        assert!(segment_sentences("  \n\t\n ").is_empty());
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("(Smith, 2020)."),
            vec!["(", "Smith", ",", "2020", ")", "."]
        );
        assert_eq!(
            tokenize("state-of-the-art isn't new"),
            vec!["state-of-the-art", "isn't", "new"]
        );
    }
}
