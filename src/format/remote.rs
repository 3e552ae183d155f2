//! Remote formatting backend: a chat-completions model rewrites the text
//! chunk by chunk before the local classifier runs.

use super::backend::{FormattingBackend, LocalBackend};
use super::{CitationScope, CitationStyle, FormattingOptions};
use crate::error::{Error, Result};
use crate::infer::{DegradeReason, HeadingRule, Mode, Outcome};
use crate::model::StructuredDocument;
use crate::nlp::LanguageOracle;
use regex::Regex;
use std::ops::Range;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::LazyLock;

/// Default chunk size limit in characters.
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 4000;

static BLANK_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").expect("valid regex"));

/// Text completion service.
pub trait CompletionClient: Send + Sync {
    /// Complete `prompt` under the `system` instruction.
    fn complete(&self, system: &str, prompt: &str) -> Result<String>;
}

fn system_prompt(style: CitationStyle) -> String {
    format!(
        "You are an academic editor. Reformat the user's text so that every in-text \
         citation follows the {} style. Keep paragraphs separated by blank lines and \
         keep headings on their own lines. Return only the reformatted text.",
        style.as_str().to_uppercase()
    )
}

/// Byte ranges of `text` to send as chunks of at most `limit` characters.
///
/// Whole paragraphs are packed together up to the limit. A single
/// paragraph longer than `limit` is split on its own, preferably at
/// whitespace. Everything between two ranges (blank lines, or the
/// whitespace where a long paragraph was split) is left out of both.
pub fn chunk_spans(text: &str, limit: usize) -> Vec<Range<usize>> {
    let limit = limit.max(1);
    let mut spans = Vec::new();
    let mut current: Option<Range<usize>> = None;

    for paragraph in paragraph_spans(text) {
        if text[paragraph.clone()].chars().count() > limit {
            spans.extend(current.take());
            spans.extend(split_long(text, paragraph, limit));
            continue;
        }

        current = match current.take() {
            Some(cur) if text[cur.start..paragraph.end].chars().count() <= limit => {
                Some(cur.start..paragraph.end)
            }
            Some(cur) => {
                spans.push(cur);
                Some(paragraph)
            }
            None => Some(paragraph),
        };
    }

    spans.extend(current);
    spans
}

/// The chunk texts of [`chunk_spans`].
pub fn chunk_paragraphs(text: &str, limit: usize) -> Vec<String> {
    chunk_spans(text, limit)
        .into_iter()
        .map(|span| text[span].to_string())
        .collect()
}

/// Trimmed, non-empty paragraph ranges between blank lines.
fn paragraph_spans(text: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut start = 0;
    let ends = BLANK_LINE
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .chain(std::iter::once((text.len(), text.len())));

    for (end, next) in ends {
        let raw = &text[start..end];
        let content = raw.trim();
        if !content.is_empty() {
            let offset = start + (raw.len() - raw.trim_start().len());
            spans.push(offset..offset + content.len());
        }
        start = next;
    }
    spans
}

fn split_long(text: &str, span: Range<usize>, limit: usize) -> Vec<Range<usize>> {
    let mut pieces = Vec::new();
    let mut start = span.start;

    while text[start..span.end].chars().count() > limit {
        let rest = &text[start..span.end];
        let hard_end = rest
            .char_indices()
            .nth(limit)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let end = if rest[hard_end..].starts_with(char::is_whitespace) {
            hard_end
        } else {
            match rest[..hard_end].rfind(char::is_whitespace) {
                Some(i) if i > 0 => i,
                _ => hard_end,
            }
        };
        let piece = rest[..end].trim_end();
        pieces.push(start..start + piece.len());
        let skipped = rest[end..].len() - rest[end..].trim_start().len();
        start += end + skipped;
    }
    if start < span.end {
        pieces.push(start..span.end);
    }
    pieces
}

/// Backend that asks a remote model to rewrite citations, then classifies
/// the rewritten text locally.
///
/// A chunk the remote model fails on is kept unchanged; the failure is
/// logged and recorded in the returned outcome, never raised.
pub struct RemoteBackend<C: CompletionClient> {
    client: C,
    max_chunk_chars: usize,
    local: LocalBackend,
}

impl<C: CompletionClient> RemoteBackend<C> {
    /// Create a backend around a completion client.
    pub fn new(client: C) -> Self {
        Self {
            client,
            max_chunk_chars: DEFAULT_MAX_CHUNK_CHARS,
            local: LocalBackend::new(),
        }
    }

    /// Set the chunk size limit in characters.
    pub fn with_max_chunk_chars(mut self, limit: usize) -> Self {
        self.max_chunk_chars = limit;
        self
    }

    /// Set which paragraphs the local pass rewrites.
    pub fn with_scope(mut self, scope: CitationScope) -> Self {
        self.local = self.local.with_scope(scope);
        self
    }

    /// Set the basic-mode heading rule of the local pass.
    pub fn with_heading_rule(mut self, rule: HeadingRule) -> Self {
        self.local = self.local.with_heading_rule(rule);
        self
    }

    /// Rewrite `text` chunk by chunk, returning the text and the number of
    /// chunks kept unchanged.
    ///
    /// The text between chunks is copied from the source, so a kept chunk
    /// leaves its surroundings byte-for-byte as they were.
    pub fn rewrite(&self, text: &str, style: CitationStyle) -> (String, usize) {
        let system = system_prompt(style);
        let mut out = String::with_capacity(text.len());
        let mut kept = 0;
        let mut last = 0;

        for (i, span) in chunk_spans(text, self.max_chunk_chars).into_iter().enumerate() {
            out.push_str(&text[last..span.start]);
            let chunk = &text[span.clone()];
            match self.client.complete(&system, chunk) {
                Ok(reply) if !reply.trim().is_empty() => out.push_str(reply.trim()),
                Ok(_) => {
                    log::warn!("Remote chunk {} returned no text, keeping original", i);
                    kept += 1;
                    out.push_str(chunk);
                }
                Err(e) => {
                    log::warn!("Remote chunk {} failed, keeping original: {}", i, e);
                    kept += 1;
                    out.push_str(chunk);
                }
            }
            last = span.end;
        }
        out.push_str(&text[last..]);

        (out, kept)
    }
}

impl<C: CompletionClient> FormattingBackend for RemoteBackend<C> {
    fn name(&self) -> &str {
        "remote"
    }

    fn structure(
        &self,
        oracle: &dyn LanguageOracle,
        text: &str,
        options: &FormattingOptions,
    ) -> Outcome<StructuredDocument> {
        let (rewritten, kept) = self.rewrite(text, options.citation_style);
        let outcome = self.local.structure(oracle, &rewritten, options);
        if kept == 0 {
            return outcome;
        }
        outcome.merge_mode(&Mode::Degraded(DegradeReason::InputRecovered(format!(
            "{} remote chunk(s) kept unchanged",
            kept
        ))))
    }
}

/// Canned completion client for tests and offline runs.
///
/// Replies with a fixed text, echoes the prompt, or fails, and counts calls.
pub struct MockCompletionClient {
    reply: MockReply,
    calls: AtomicUsize,
}

enum MockReply {
    Fixed(String),
    Echo,
    Fail(String),
}

impl MockCompletionClient {
    /// Always reply with `text`.
    pub fn fixed(text: impl Into<String>) -> Self {
        Self::with_reply(MockReply::Fixed(text.into()))
    }

    /// Reply with the prompt unchanged.
    pub fn echo() -> Self {
        Self::with_reply(MockReply::Echo)
    }

    /// Always fail with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_reply(MockReply::Fail(message.into()))
    }

    fn with_reply(reply: MockReply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of completions requested so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CompletionClient for MockCompletionClient {
    fn complete(&self, _system: &str, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            MockReply::Fixed(text) => Ok(text.clone()),
            MockReply::Echo => Ok(prompt.to_string()),
            MockReply::Fail(message) => Err(Error::Remote(message.clone())),
        }
    }
}

#[cfg(feature = "remote")]
pub use http::HttpCompletionClient;

#[cfg(feature = "remote")]
mod http {
    use super::CompletionClient;
    use crate::config::RemoteSettings;
    use crate::error::{Error, Result};
    use serde::{Deserialize, Serialize};
    use std::time::Duration;

    /// OpenAI-compatible chat-completions client.
    pub struct HttpCompletionClient {
        endpoint: String,
        model: String,
        api_key: Option<String>,
        client: reqwest::blocking::Client,
        timeout_secs: u64,
    }

    impl HttpCompletionClient {
        /// Build a client from remote settings, reading the API key from the
        /// configured environment variable when it is set.
        pub fn new(settings: &RemoteSettings) -> Result<Self> {
            let client = reqwest::blocking::Client::builder()
                .timeout(Duration::from_secs(settings.timeout_secs))
                .build()
                .map_err(|e| Error::Remote(format!("cannot create HTTP client: {}", e)))?;

            let api_key = settings
                .api_key_env
                .as_deref()
                .and_then(|name| std::env::var(name).ok())
                .filter(|key| !key.is_empty());

            Ok(Self {
                endpoint: settings.endpoint.clone(),
                model: settings.model.clone(),
                api_key,
                client,
                timeout_secs: settings.timeout_secs,
            })
        }
    }

    #[derive(Serialize)]
    struct ChatRequest<'a> {
        model: &'a str,
        messages: [ChatMessage<'a>; 2],
        temperature: f32,
    }

    #[derive(Serialize)]
    struct ChatMessage<'a> {
        role: &'a str,
        content: &'a str,
    }

    #[derive(Deserialize)]
    struct ChatResponse {
        choices: Vec<ChatChoice>,
    }

    #[derive(Deserialize)]
    struct ChatChoice {
        message: ChatReply,
    }

    #[derive(Deserialize)]
    struct ChatReply {
        content: Option<String>,
    }

    impl CompletionClient for HttpCompletionClient {
        fn complete(&self, system: &str, prompt: &str) -> Result<String> {
            let body = ChatRequest {
                model: &self.model,
                messages: [
                    ChatMessage {
                        role: "system",
                        content: system,
                    },
                    ChatMessage {
                        role: "user",
                        content: prompt,
                    },
                ],
                temperature: 0.2,
            };

            let mut request = self.client.post(&self.endpoint).json(&body);
            if let Some(ref key) = self.api_key {
                request = request.bearer_auth(key);
            }

            let response = request.send().map_err(|e| {
                if e.is_connect() {
                    Error::Remote(format!("cannot connect to {}", self.endpoint))
                } else if e.is_timeout() {
                    Error::Remote(format!("request timed out after {}s", self.timeout_secs))
                } else {
                    Error::Remote(e.to_string())
                }
            })?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().unwrap_or_default();
                return Err(Error::Remote(format!("HTTP {}: {}", status.as_u16(), body)));
            }

            let parsed: ChatResponse = response
                .json()
                .map_err(|e| Error::Remote(format!("malformed response: {}", e)))?;

            parsed
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.message.content)
                .ok_or_else(|| Error::Remote("response contains no completion".to_string()))
        }
    }
}
