//! Formatting options: the per-request configuration of the output document.
//!
//! Every field has a default, so any partial TOML/JSON document or form
//! submission yields a valid set of options.

use crate::error::{Error, Result};
use crate::model::PageGeometry;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Default body font family.
pub const DEFAULT_FONT_FAMILY: &str = "Times New Roman";
/// Default body font size in points.
pub const DEFAULT_FONT_SIZE: u32 = 12;

/// Citation style guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CitationStyle {
    /// `(Author, YYYY)`
    #[default]
    Apa,
    /// `(Author NN)`
    Mla,
    /// `[N]` rendered as a superscript number
    Chicago,
    /// `(N)` rendered as `[N]`
    Ieee,
}

impl CitationStyle {
    /// All styles in a stable order.
    pub const ALL: [CitationStyle; 4] = [
        CitationStyle::Apa,
        CitationStyle::Mla,
        CitationStyle::Chicago,
        CitationStyle::Ieee,
    ];

    /// Lowercase style name.
    pub fn as_str(&self) -> &'static str {
        match self {
            CitationStyle::Apa => "apa",
            CitationStyle::Mla => "mla",
            CitationStyle::Chicago => "chicago",
            CitationStyle::Ieee => "ieee",
        }
    }
}

impl fmt::Display for CitationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CitationStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "apa" => Ok(CitationStyle::Apa),
            "mla" => Ok(CitationStyle::Mla),
            "chicago" => Ok(CitationStyle::Chicago),
            "ieee" => Ok(CitationStyle::Ieee),
            other => Err(Error::Config(format!("unknown citation style '{}'", other))),
        }
    }
}

/// Line spacing multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "SpacingValue", into = "f64")]
pub enum LineSpacing {
    /// 1.0
    Single,
    /// 1.5
    OneAndHalf,
    /// 2.0
    #[default]
    Double,
}

impl LineSpacing {
    /// Spacing as a multiple of the font's line height.
    pub fn multiplier(&self) -> f64 {
        match self {
            LineSpacing::Single => 1.0,
            LineSpacing::OneAndHalf => 1.5,
            LineSpacing::Double => 2.0,
        }
    }

    /// Spacing in 240ths of a line, the unit word processors store.
    pub fn line_units(&self) -> i32 {
        (self.multiplier() * 240.0) as i32
    }

    fn from_multiplier(value: f64) -> Option<Self> {
        if (value - 1.0).abs() < f64::EPSILON {
            Some(LineSpacing::Single)
        } else if (value - 1.5).abs() < f64::EPSILON {
            Some(LineSpacing::OneAndHalf)
        } else if (value - 2.0).abs() < f64::EPSILON {
            Some(LineSpacing::Double)
        } else {
            None
        }
    }
}

impl fmt::Display for LineSpacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.multiplier())
    }
}

impl FromStr for LineSpacing {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "single" => return Ok(LineSpacing::Single),
            "double" => return Ok(LineSpacing::Double),
            _ => {}
        }
        trimmed
            .parse::<f64>()
            .ok()
            .and_then(LineSpacing::from_multiplier)
            .ok_or_else(|| Error::Config(format!("unsupported line spacing '{}'", trimmed)))
    }
}

impl From<LineSpacing> for f64 {
    fn from(spacing: LineSpacing) -> f64 {
        spacing.multiplier()
    }
}

/// Line spacing as it may appear in a config file: `2.0` or `"2.0"`.
#[derive(Deserialize)]
#[serde(untagged)]
enum SpacingValue {
    Number(f64),
    Text(String),
}

impl TryFrom<SpacingValue> for LineSpacing {
    type Error = Error;

    fn try_from(value: SpacingValue) -> Result<Self> {
        match value {
            SpacingValue::Number(n) => LineSpacing::from_multiplier(n)
                .ok_or_else(|| Error::Config(format!("unsupported line spacing {}", n))),
            SpacingValue::Text(s) => s.parse(),
        }
    }
}

/// Page margin preset, applied uniformly to all four sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Margin {
    /// 0.5 inch
    Narrow,
    /// 1 inch
    #[default]
    Normal,
    /// 1.5 inch
    Wide,
}

impl Margin {
    /// Margin width in inches.
    pub fn inches(&self) -> f64 {
        match self {
            Margin::Narrow => 0.5,
            Margin::Normal => 1.0,
            Margin::Wide => 1.5,
        }
    }

    /// Page geometry for this preset.
    pub fn geometry(&self) -> PageGeometry {
        PageGeometry::uniform(self.inches())
    }
}

impl fmt::Display for Margin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Margin::Narrow => "narrow",
            Margin::Normal => "normal",
            Margin::Wide => "wide",
        };
        f.write_str(name)
    }
}

impl FromStr for Margin {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "narrow" => Ok(Margin::Narrow),
            "normal" => Ok(Margin::Normal),
            "wide" => Ok(Margin::Wide),
            other => Err(Error::Config(format!("unknown margin '{}'", other))),
        }
    }
}

/// Which paragraphs receive citation rewriting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CitationScope {
    /// Every paragraph
    #[default]
    AllParagraphs,
    /// Only the first paragraph directly after each heading
    FirstAfterHeading,
}

impl FromStr for CitationScope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "all_paragraphs" | "all" => Ok(CitationScope::AllParagraphs),
            "first_after_heading" | "first" => Ok(CitationScope::FirstAfterHeading),
            other => Err(Error::Config(format!("unknown citation scope '{}'", other))),
        }
    }
}

/// Parse a value, substituting the default when it is absent or invalid.
pub fn parse_or_default<T>(value: Option<&str>) -> T
where
    T: FromStr + Default,
{
    match value {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            log::debug!("Ignoring invalid option value '{}', using default", raw);
            T::default()
        }),
        None => T::default(),
    }
}

/// Typographic and structural options for one output document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormattingOptions {
    /// Citation style guide
    pub citation_style: CitationStyle,

    /// Body font family
    pub font_family: String,

    /// Body font size in points (0 means the default)
    pub font_size: u32,

    /// Body line spacing
    pub line_spacing: LineSpacing,

    /// Page margin preset
    pub margin: Margin,

    /// Emit a title page
    pub title_page: bool,

    /// Emit a table of contents
    pub table_of_contents: bool,

    /// Emit a page number in the footer
    pub page_numbers: bool,

    /// Emit a reference list
    pub bibliography: bool,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            citation_style: CitationStyle::default(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            line_spacing: LineSpacing::default(),
            margin: Margin::default(),
            title_page: false,
            table_of_contents: false,
            page_numbers: false,
            bibliography: false,
        }
    }
}

impl FormattingOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the citation style.
    pub fn with_citation_style(mut self, style: CitationStyle) -> Self {
        self.citation_style = style;
        self
    }

    /// Set the body font family.
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    /// Set the body font size in points.
    pub fn with_font_size(mut self, size: u32) -> Self {
        self.font_size = size;
        self
    }

    /// Set the line spacing.
    pub fn with_line_spacing(mut self, spacing: LineSpacing) -> Self {
        self.line_spacing = spacing;
        self
    }

    /// Set the margin preset.
    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    /// Enable or disable the title page.
    pub fn with_title_page(mut self, enabled: bool) -> Self {
        self.title_page = enabled;
        self
    }

    /// Enable or disable the table of contents.
    pub fn with_table_of_contents(mut self, enabled: bool) -> Self {
        self.table_of_contents = enabled;
        self
    }

    /// Enable or disable footer page numbers.
    pub fn with_page_numbers(mut self, enabled: bool) -> Self {
        self.page_numbers = enabled;
        self
    }

    /// Enable or disable the reference list.
    pub fn with_bibliography(mut self, enabled: bool) -> Self {
        self.bibliography = enabled;
        self
    }

    /// Enable every structural section.
    pub fn with_all_sections(self) -> Self {
        self.with_title_page(true)
            .with_table_of_contents(true)
            .with_page_numbers(true)
            .with_bibliography(true)
    }

    /// Font size with the default substituted for 0.
    pub fn effective_font_size(&self) -> u32 {
        if self.font_size == 0 {
            DEFAULT_FONT_SIZE
        } else {
            self.font_size
        }
    }

    /// Font family with the default substituted for a blank name.
    pub fn effective_font_family(&self) -> &str {
        let family = self.font_family.trim();
        if family.is_empty() {
            DEFAULT_FONT_FAMILY
        } else {
            family
        }
    }

    /// Parse options from a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Load options from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Build options from loose `key=value` pairs, as submitted by a form.
    ///
    /// Unknown keys are ignored and invalid values fall back to the default.
    /// A flag is enabled by `on`, `true`, `yes` or `1`.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut options = Self::default();
        for (key, value) in pairs {
            let value = value.as_ref();
            match key.as_ref() {
                "citation_style" => options.citation_style = parse_or_default(Some(value)),
                "font_family" => options.font_family = value.trim().to_string(),
                "font_size" => options.font_size = value.trim().parse().unwrap_or(DEFAULT_FONT_SIZE),
                "line_spacing" => options.line_spacing = parse_or_default(Some(value)),
                "margin" => options.margin = parse_or_default(Some(value)),
                "title_page" => options.title_page = is_checked(value),
                "table_of_contents" => options.table_of_contents = is_checked(value),
                "page_numbers" => options.page_numbers = is_checked(value),
                "bibliography" => options.bibliography = is_checked(value),
                other => log::debug!("Ignoring unknown formatting option '{}'", other),
            }
        }
        options
    }
}

fn is_checked(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "on" | "true" | "yes" | "1"
    )
}
