//! Text cleanup applied to extracted text before structure inference.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

static HYPHENATED_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z])-[ \t]*\n[ \t]*([a-z])").expect("valid regex"));
static SPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]{2,}").expect("valid regex"));
static TRAILING_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)[ \t]+$").expect("valid regex"));
static BLANK_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

const LIGATURES: &[(&str, &str)] = &[
    ("\u{FB00}", "ff"),
    ("\u{FB01}", "fi"),
    ("\u{FB02}", "fl"),
    ("\u{FB03}", "ffi"),
    ("\u{FB04}", "ffl"),
    ("\u{FB05}", "st"),
    ("\u{FB06}", "st"),
];

/// Cleanup preset levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CleanupPreset {
    /// Line endings and Unicode NFC only
    Minimal,
    /// Minimal plus ligature and hyphenation repair, whitespace collapsing
    #[default]
    Standard,
}

impl std::str::FromStr for CleanupPreset {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimal" => Ok(Self::Minimal),
            "standard" => Ok(Self::Standard),
            other => Err(crate::Error::Config(format!("unknown cleanup preset '{}'", other))),
        }
    }
}

/// Options for text cleanup.
#[derive(Debug, Clone)]
pub struct CleanupOptions {
    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Replace typographic ligatures (ﬁ, ﬂ, ...) with plain letters
    pub fix_ligatures: bool,

    /// Join words hyphenated across line breaks
    pub fix_hyphenation: bool,

    /// Remove the Unicode replacement character (U+FFFD)
    pub remove_replacement_char: bool,

    /// Collapse runs of spaces and strip trailing spaces
    pub normalize_whitespace: bool,

    /// Maximum consecutive blank lines (0 = unlimited)
    pub max_blank_lines: u8,
}

impl CleanupOptions {
    /// Create options from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        match preset {
            CleanupPreset::Minimal => Self::minimal(),
            CleanupPreset::Standard => Self::standard(),
        }
    }

    /// Minimal cleanup options.
    pub fn minimal() -> Self {
        Self {
            normalize_unicode: true,
            fix_ligatures: false,
            fix_hyphenation: false,
            remove_replacement_char: false,
            normalize_whitespace: false,
            max_blank_lines: 0,
        }
    }

    /// Standard cleanup options.
    pub fn standard() -> Self {
        Self {
            normalize_unicode: true,
            fix_ligatures: true,
            fix_hyphenation: true,
            remove_replacement_char: true,
            normalize_whitespace: true,
            max_blank_lines: 1,
        }
    }
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self::standard()
    }
}

/// Text cleanup pipeline.
#[derive(Debug, Clone, Default)]
pub struct CleanupPipeline {
    options: CleanupOptions,
}

impl CleanupPipeline {
    /// Create a new cleanup pipeline with the given options.
    pub fn new(options: CleanupOptions) -> Self {
        Self { options }
    }

    /// Create a pipeline from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        Self::new(CleanupOptions::from_preset(preset))
    }

    /// Process text through the cleanup pipeline.
    ///
    /// Line endings are always normalized to `\n`; blank-line boundaries are
    /// kept so that basic-mode paragraph splitting still sees them.
    pub fn process(&self, text: &str) -> String {
        let mut result = text.replace("\r\n", "\n").replace('\r', "\n");

        if self.options.normalize_unicode {
            result = result.nfc().collect();
        }

        if self.options.fix_ligatures {
            for (ligature, replacement) in LIGATURES {
                result = result.replace(ligature, replacement);
            }
        }

        if self.options.remove_replacement_char {
            result = result.replace('\u{FFFD}', "");
        }

        if self.options.fix_hyphenation {
            result = HYPHENATED_BREAK.replace_all(&result, "$1$2").into_owned();
        }

        if self.options.normalize_whitespace {
            result = TRAILING_SPACE.replace_all(&result, "").into_owned();
            result = SPACE_RUN.replace_all(&result, " ").into_owned();
        }

        if self.options.max_blank_lines > 0 {
            result = self.limit_blank_lines(&result);
        }

        result
    }

    fn limit_blank_lines(&self, text: &str) -> String {
        let keep = "\n".repeat(self.options.max_blank_lines as usize + 1);
        if self.options.max_blank_lines == 1 {
            return BLANK_RUN.replace_all(text, keep.as_str()).into_owned();
        }
        let pattern = format!(r"\n{{{},}}", self.options.max_blank_lines as usize + 2);
        match Regex::new(&pattern) {
            Ok(re) => re.replace_all(text, keep.as_str()).into_owned(),
            Err(_) => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_normalizes_line_endings() {
        let pipeline = CleanupPipeline::from_preset(CleanupPreset::Minimal);
        let result = pipeline.process("Intro\r\n\r\nBody   text\r\n");
        assert_eq!(result, "Intro\n\nBody   text\n");
    }

    #[test]
    fn test_nfc() {
        let pipeline = CleanupPipeline::from_preset(CleanupPreset::Minimal);
        let result = pipeline.process("cafe\u{0301}");
        assert_eq!(result, "caf\u{00E9}");
    }

    #[test]
    fn test_ligatures() {
        let pipeline = CleanupPipeline::from_preset(CleanupPreset::Standard);
        assert_eq!(pipeline.process("\u{FB01}nal \u{FB02}ow"), "final flow");
    }

    #[test]
    fn test_hyphenation() {
        let pipeline = CleanupPipeline::from_preset(CleanupPreset::Standard);
        assert_eq!(pipeline.process("infor-\nmation"), "information");
        assert_eq!(pipeline.process("Self-\nAware"), "Self-\nAware");
    }

    #[test]
    fn test_blank_lines_collapse_to_one() {
        let pipeline = CleanupPipeline::from_preset(CleanupPreset::Standard);
        let result = pipeline.process("Intro\n\n\n\nBody  text  \n");
        assert_eq!(result, "Intro\n\nBody text\n");
    }

    #[test]
    fn test_limit_two_blank_lines() {
        let pipeline = CleanupPipeline::new(CleanupOptions {
            max_blank_lines: 2,
            ..CleanupOptions::minimal()
        });
        assert_eq!(pipeline.process("a\n\n\n\n\nb"), "a\n\n\nb");
        assert_eq!(pipeline.process("a\n\n\nb"), "a\n\n\nb");
    }

    #[test]
    fn test_preset_from_str() {
        assert_eq!("Minimal".parse::<CleanupPreset>().unwrap(), CleanupPreset::Minimal);
        assert!("aggressive".parse::<CleanupPreset>().is_err());
    }
}
