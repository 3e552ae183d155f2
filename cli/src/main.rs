//! docfmt CLI - academic document re-formatting tool

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docfmt::render::value_to_json;
use docfmt::{
    detect_format_from_path, BackendKind, CitationScope, CitationStyle, CleanupPreset,
    DocFormatter, FormatResult, FormatterConfig, FormattingOptions, HeadingRule, JsonFormat,
    LineSpacing, Margin, Mode, PreviewFormat, RenderOptions,
};

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "docfmt")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Re-format text and Word documents with academic styles", long_about = None)]
struct Cli {
    /// Input document (.txt, .docx)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Format a document and write formatted_<name>.docx
    Format {
        /// Input document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory (a fresh temporary directory if not specified)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[command(flatten)]
        format: FormatArgs,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Analyze a document: entities, counts, keywords, noun chunks (JSON)
    Analyze {
        /// Input document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Preview the formatted document without writing DOCX
    Preview {
        /// Input document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Preview format
        #[arg(short = 't', long = "to", value_enum, default_value = "markdown")]
        to: PreviewKind,

        /// Include YAML frontmatter (markdown only)
        #[arg(short, long)]
        frontmatter: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        format: FormatArgs,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Format many documents into one directory
    Batch {
        /// Input documents
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: PathBuf,

        #[command(flatten)]
        format: FormatArgs,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Show document information
    Info {
        /// Input document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Show version information
    Version,
}

/// Formatting options. Flags override values from `--options`.
#[derive(Args, Default)]
struct FormatArgs {
    /// Formatting options file (TOML)
    #[arg(long, value_name = "FILE", env = "DOCFMT_OPTIONS")]
    options: Option<PathBuf>,

    /// Citation style: apa, mla, chicago, ieee
    #[arg(short, long, env = "DOCFMT_STYLE")]
    style: Option<CitationStyle>,

    /// Font family
    #[arg(long, value_name = "NAME")]
    font: Option<String>,

    /// Font size in points
    #[arg(long, value_name = "PT")]
    font_size: Option<u32>,

    /// Line spacing: 1.0, 1.5, 2.0
    #[arg(long)]
    spacing: Option<LineSpacing>,

    /// Margins: narrow, normal, wide
    #[arg(long)]
    margin: Option<Margin>,

    /// Add a title page
    #[arg(long)]
    title_page: bool,

    /// Add a table of contents
    #[arg(long)]
    toc: bool,

    /// Add page numbers in the footer
    #[arg(long)]
    page_numbers: bool,

    /// Add a reference list
    #[arg(long)]
    bibliography: bool,

    /// Enable title page, contents, page numbers and references
    #[arg(long)]
    all_sections: bool,
}

/// Engine settings. Flags override values from `--config`.
#[derive(Args, Default)]
struct EngineArgs {
    /// Formatter configuration file (TOML)
    #[arg(long, value_name = "FILE", env = "DOCFMT_CONFIG")]
    config: Option<PathBuf>,

    /// Language model name
    #[arg(long, env = "DOCFMT_MODEL")]
    model: Option<String>,

    /// Formatting backend
    #[arg(long, value_enum, env = "DOCFMT_BACKEND")]
    backend: Option<BackendChoice>,

    /// Citation rewriting scope: all_paragraphs, first_after_heading
    #[arg(long)]
    scope: Option<CitationScope>,

    /// Basic-mode heading rule: length_only, unterminated
    #[arg(long)]
    heading_rule: Option<HeadingRule>,

    /// Text cleanup preset
    #[arg(long, value_enum)]
    cleanup: Option<CleanupLevel>,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CleanupLevel {
    /// Line endings and Unicode normalization only
    Minimal,
    /// Standard cleanup (default)
    Standard,
}

impl From<CleanupLevel> for CleanupPreset {
    fn from(level: CleanupLevel) -> Self {
        match level {
            CleanupLevel::Minimal => CleanupPreset::Minimal,
            CleanupLevel::Standard => CleanupPreset::Standard,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum BackendChoice {
    /// Local heuristics
    Local,
    /// Chat-completions rewrite, then local heuristics
    Remote,
}

impl From<BackendChoice> for BackendKind {
    fn from(choice: BackendChoice) -> Self {
        match choice {
            BackendChoice::Local => BackendKind::Local,
            BackendChoice::Remote => BackendKind::Remote,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum PreviewKind {
    /// Markdown
    Markdown,
    /// Plain text
    Text,
    /// JSON structure
    Json,
}

impl From<PreviewKind> for PreviewFormat {
    fn from(kind: PreviewKind) -> Self {
        match kind {
            PreviewKind::Markdown => PreviewFormat::Markdown,
            PreviewKind::Text => PreviewFormat::Text,
            PreviewKind::Json => PreviewFormat::Json,
        }
    }
}

impl FormatArgs {
    fn build(&self) -> Result<FormattingOptions, docfmt::Error> {
        let mut options = match &self.options {
            Some(path) => FormattingOptions::load(path)?,
            None => FormattingOptions::default(),
        };

        if let Some(style) = self.style {
            options = options.with_citation_style(style);
        }
        if let Some(ref font) = self.font {
            options = options.with_font_family(font.clone());
        }
        if let Some(size) = self.font_size {
            options = options.with_font_size(size);
        }
        if let Some(spacing) = self.spacing {
            options = options.with_line_spacing(spacing);
        }
        if let Some(margin) = self.margin {
            options = options.with_margin(margin);
        }
        if self.all_sections {
            options = options.with_all_sections();
        }
        if self.title_page {
            options = options.with_title_page(true);
        }
        if self.toc {
            options = options.with_table_of_contents(true);
        }
        if self.page_numbers {
            options = options.with_page_numbers(true);
        }
        if self.bibliography {
            options = options.with_bibliography(true);
        }

        Ok(options)
    }
}

impl EngineArgs {
    fn build(&self) -> Result<FormatterConfig, docfmt::Error> {
        let mut config = match &self.config {
            Some(path) => FormatterConfig::load(path)?,
            None => FormatterConfig::default(),
        };

        if let Some(ref model) = self.model {
            config.model = model.clone();
        }
        if let Some(backend) = self.backend {
            config.backend = backend.into();
        }
        if let Some(scope) = self.scope {
            config.citation_scope = scope;
        }
        if let Some(rule) = self.heading_rule {
            config.heading_rule = rule;
        }
        if let Some(level) = self.cleanup {
            config.cleanup = level.into();
        }

        config.validate()?;
        Ok(config)
    }

    fn formatter(&self) -> Result<DocFormatter, docfmt::Error> {
        let config = self.build()?;
        log::debug!(
            "Engine: model={} backend={} scope={:?} heading_rule={} cleanup={:?}",
            config.model,
            config.backend,
            config.citation_scope,
            config.heading_rule,
            config.cleanup
        );
        DocFormatter::from_config(&config)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Format {
            input,
            output,
            format,
            engine,
        }) => cmd_format(&input, output.as_deref(), &format, &engine),
        Some(Commands::Analyze {
            input,
            output,
            compact,
            engine,
        }) => cmd_analyze(&input, output.as_deref(), compact, &engine),
        Some(Commands::Preview {
            input,
            to,
            frontmatter,
            output,
            format,
            engine,
        }) => cmd_preview(&input, to, frontmatter, output.as_deref(), &format, &engine),
        Some(Commands::Batch {
            inputs,
            output,
            format,
            engine,
        }) => cmd_batch(&inputs, &output, &format, &engine),
        Some(Commands::Info { input, engine }) => cmd_info(&input, &engine),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: format if input is provided
            if let Some(input) = cli.input {
                cmd_format(
                    &input,
                    cli.output.as_deref(),
                    &FormatArgs::default(),
                    &EngineArgs::default(),
                )
            } else {
                println!("{}", "Usage: docfmt <FILE> [OUTPUT]".yellow());
                println!("       docfmt --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(message.to_string());
    pb
}

fn print_mode(mode: &Mode) {
    if let Mode::Degraded(reason) = mode {
        println!("  {} {}", "Mode:".yellow(), reason);
    }
}

fn print_result(result: &FormatResult) {
    println!("{} {}", "Saved to".green(), result.path.display());
    if let Some(ref title) = result.title {
        println!("  {} {}", "Title:".bold(), title);
    }
    println!(
        "  {} {} headings, {} paragraphs, {} references, {} words",
        "Content:".bold(),
        result.stats.heading_count,
        result.stats.paragraph_count,
        result.stats.reference_count,
        result.stats.word_count
    );
    print_mode(&result.mode);
}

fn write_or_print(content: &str, output: Option<&Path>) -> CliResult {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_format(
    input: &Path,
    output: Option<&Path>,
    format: &FormatArgs,
    engine: &EngineArgs,
) -> CliResult {
    let options = format.build()?;
    let formatter = engine.formatter()?.with_options(options);

    if let Some(dir) = output {
        fs::create_dir_all(dir)?;
    }

    let pb = spinner(&format!("Formatting {}...", input.display()));
    let result = formatter.format_file(input, output);
    pb.finish_and_clear();

    print_result(&result?);
    Ok(())
}

fn cmd_analyze(input: &Path, output: Option<&Path>, compact: bool, engine: &EngineArgs) -> CliResult {
    let formatter = engine.formatter()?;
    let outcome = formatter.analyze_file(input)?;
    if let Some(reason) = outcome.reason() {
        eprintln!("{} {}", "Note:".yellow(), reason);
    }

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = value_to_json(&outcome.value, format)?;
    write_or_print(&json, output)
}

fn cmd_preview(
    input: &Path,
    to: PreviewKind,
    frontmatter: bool,
    output: Option<&Path>,
    format: &FormatArgs,
    engine: &EngineArgs,
) -> CliResult {
    let options = format.build()?;
    let formatter = engine.formatter()?.with_options(options);

    let text = formatter.extract(input)?;
    let render_options = RenderOptions::new().with_frontmatter(frontmatter);
    let content = formatter.preview(&text, to.into(), &render_options)?;
    write_or_print(&content, output)
}

fn cmd_batch(inputs: &[PathBuf], output: &Path, format: &FormatArgs, engine: &EngineArgs) -> CliResult {
    let options = format.build()?;
    let formatter = engine.formatter()?.with_options(options);
    fs::create_dir_all(output)?;

    let pb = spinner(&format!("Formatting {} documents...", inputs.len()));
    let results = formatter.format_files(inputs, output);
    pb.finish_and_clear();

    let mut failed = 0;
    for (input, result) in inputs.iter().zip(results) {
        match result {
            Ok(result) => {
                println!("{} {}", "✓".green(), input.display());
                println!("  {} {}", "└─".dimmed(), result.path.display());
                print_mode(&result.mode);
            }
            Err(e) => {
                failed += 1;
                println!("{} {}: {}", "✗".red(), input.display(), e);
            }
        }
    }

    println!(
        "\n{} {} formatted, {} failed",
        "Done!".green().bold(),
        inputs.len() - failed,
        failed
    );

    if failed > 0 {
        return Err(format!("{} of {} documents failed", failed, inputs.len()).into());
    }
    Ok(())
}

fn cmd_info(input: &Path, engine: &EngineArgs) -> CliResult {
    let formatter = engine.formatter()?;
    let format = detect_format_from_path(input)?;
    let size = fs::metadata(input)?.len();

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), format);
    println!("{}: {} bytes", "Size".bold(), size);
    println!(
        "{}: {} ({:?})",
        "Model".bold(),
        formatter.oracle().name(),
        formatter.oracle().capability()
    );

    let text = formatter.extract(input)?;
    let analysis = formatter.analyze_text(&text);
    let structure = formatter.assemble(&text)?.structure;

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Words".bold(), text.split_whitespace().count());
    println!("{}: {}", "Characters".bold(), text.chars().count());
    println!("{}: {}", "Sentences".bold(), analysis.value.sentence_count);
    println!("{}: {}", "Headings".bold(), structure.value.heading_count());
    println!("{}: {}", "Paragraphs".bold(), structure.value.paragraph_count());
    println!("{}: {}", "Entities".bold(), analysis.value.entities.len());
    print_mode(&structure.mode);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docfmt".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Academic document re-formatting tool");
    println!();
    println!("Citation styles: {}", style_list().dimmed());
    println!("License: MIT");
}

fn style_list() -> String {
    CitationStyle::ALL
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_args_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("options.toml");
        fs::write(&path, "citation_style = \"mla\"\nfont_size = 11\n").unwrap();

        let args = FormatArgs {
            options: Some(path),
            margin: Some(Margin::Wide),
            toc: true,
            ..Default::default()
        };
        let options = args.build().unwrap();

        assert_eq!(options.citation_style, CitationStyle::Mla);
        assert_eq!(options.font_size, 11);
        assert_eq!(options.margin, Margin::Wide);
        assert!(options.table_of_contents);
        assert!(!options.title_page);
    }

    #[test]
    fn test_engine_args() {
        let args = EngineArgs {
            backend: Some(BackendChoice::Remote),
            scope: Some(CitationScope::FirstAfterHeading),
            heading_rule: Some(HeadingRule::Unterminated),
            ..Default::default()
        };
        let config = args.build().unwrap();
        assert_eq!(config.heading_rule, HeadingRule::Unterminated);
        assert_eq!(config.backend, BackendKind::Remote);
        assert_eq!(config.citation_scope, CitationScope::FirstAfterHeading);
        assert_eq!(config.model, "en_core_rules");
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "docfmt", "format", "paper.txt", "--style", "ieee", "--spacing", "1.5", "--all-sections",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Format { format, .. }) => {
                assert_eq!(format.style, Some(CitationStyle::Ieee));
                assert_eq!(format.spacing, Some(LineSpacing::OneAndHalf));
                assert!(format.all_sections);
            }
            _ => panic!("expected format command"),
        }
    }

    #[test]
    fn test_style_list() {
        assert_eq!(style_list(), "apa, mla, chicago, ieee");
    }
}
