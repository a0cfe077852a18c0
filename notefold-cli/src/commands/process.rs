//! Process command implementation

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::extract::{self, Companion};
use crate::output::{BlockFormatter, JsonFormatter, TextFormatter};
use crate::{edit, input, output, progress};
use anyhow::Context;
use clap::Args;
use notefold_core::{aggregate, parse_heading, AggregateOutcome, Annotation, Proximity};
use std::fs;
use std::path::{Path, PathBuf};

/// Arguments for the process command
#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN")]
    pub input: Vec<String>,

    /// Directory to scan for notebook exports
    #[arg(long, value_name = "DIR")]
    pub in_dir: Option<PathBuf>,

    /// Directory scans keep only file names containing this text
    #[arg(long, value_name = "TEXT")]
    pub name_contains: Option<String>,

    /// Directory scans keep only file names ending with this text
    #[arg(long, value_name = "TEXT")]
    pub name_ends_with: Option<String>,

    /// Output file (single input only; default: derived from the input
    /// name)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Marker appended to derived output file names
    #[arg(long, value_name = "TEXT")]
    pub marker: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Chapter drift beyond this starts a new block
    #[arg(long, value_name = "N")]
    pub chapter_prox: Option<u32>,

    /// Page drift beyond this starts a new block
    #[arg(long, value_name = "N")]
    pub page_prox: Option<u32>,

    /// Location drift beyond this starts a new block
    #[arg(long, value_name = "N")]
    pub location_prox: Option<u32>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// The notebook document itself, condensed in place
    Html,
    /// One merged block per line with its location range
    Text,
    /// JSON array of merged blocks with metadata
    Json,
}

impl OutputFormat {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "html" => Some(OutputFormat::Html),
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

impl ProcessArgs {
    /// Execute the process command
    pub fn execute(&self) -> CliResult<()> {
        self.init_logging();
        log::info!("notefold {}", env!("CARGO_PKG_VERSION"));

        let config = match &self.config {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };

        let proximity = Proximity {
            chapter: self.chapter_prox.unwrap_or(config.proximity.chapter),
            page: self.page_prox.unwrap_or(config.proximity.page),
            location: self.location_prox.unwrap_or(config.proximity.location),
        };
        log::info!(
            "proximities chapter {}, page {}, location {}",
            proximity.chapter,
            proximity.page,
            proximity.location
        );

        let marker = self
            .marker
            .clone()
            .unwrap_or_else(|| config.discovery.marker.clone());
        let format = match &self.format {
            Some(format) => *format,
            None => OutputFormat::from_name(&config.output.default_format).ok_or_else(|| {
                CliError::ConfigError(format!(
                    "unknown default_format \"{}\"",
                    config.output.default_format
                ))
            })?,
        };

        let files = self.discover_files(&config, &marker)?;
        if self.output.is_some() && files.len() > 1 {
            anyhow::bail!("--output requires a single input file, found {}", files.len());
        }

        let bar = progress::file_bar(files.len() as u64, self.quiet);
        for file in &files {
            self.process_file(file, proximity, format, &marker, config.output.pretty_json)
                .with_context(|| format!("while processing {}", file.display()))?;
            progress::file_completed(&bar, &file.display().to_string());
        }
        progress::finish(&bar);
        Ok(())
    }

    fn discover_files(&self, config: &CliConfig, marker: &str) -> CliResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        if !self.input.is_empty() {
            files.extend(input::resolve_patterns(&self.input)?);
        }
        if let Some(dir) = &self.in_dir {
            let contains = self
                .name_contains
                .as_deref()
                .unwrap_or(&config.discovery.name_contains);
            let ends_with = self
                .name_ends_with
                .as_deref()
                .unwrap_or(&config.discovery.name_ends_with);
            files.extend(input::scan_directory(dir, contains, ends_with, marker)?);
        }
        files.sort();
        files.dedup();
        if files.is_empty() {
            anyhow::bail!("no input files; pass --input and/or --in-dir");
        }
        Ok(files)
    }

    fn process_file(
        &self,
        path: &Path,
        proximity: Proximity,
        format: OutputFormat,
        marker: &str,
        pretty_json: bool,
    ) -> CliResult<()> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        if !extract::is_notebook(&raw)? {
            log::warn!(
                "\"{}\" does not appear to be a notebook export, skipping",
                path.display()
            );
            return Ok(());
        }

        let edited = edit::edit_lines(&raw);
        let extraction = extract::extract(&edited)?;

        let mut annotations = Vec::with_capacity(extraction.annotations.len());
        for raw_annotation in &extraction.annotations {
            let location = parse_heading(&raw_annotation.heading)?;
            let annotation = match &raw_annotation.companion {
                Companion::Text(text) => Annotation::new(location, edit::tidy_text(text)),
                Companion::WrongClass(class) => {
                    log::warn!(
                        "expected \"noteText\" class at {location}, found class \"{class}\""
                    );
                    Annotation::without_text(location)
                }
                Companion::Missing => {
                    log::warn!(
                        "heading \"{}\" at {location} has no following note text",
                        raw_annotation.heading
                    );
                    Annotation::without_text(location)
                }
            };
            annotations.push(annotation);
        }

        if annotations.iter().all(|a| a.text.is_none()) {
            log::warn!(
                "\"{}\" has no annotations with text, skipping",
                path.display()
            );
            return Ok(());
        }

        let outcome = aggregate(proximity, annotations)?;
        for block in &outcome.blocks {
            if let Some(label) = &block.chapter_label {
                log::info!("{label}");
            }
        }
        log::info!(
            "merged {} annotations into {} blocks ({} skipped)",
            outcome.elements,
            outcome.blocks.len(),
            outcome.skipped.len()
        );

        self.write_output(path, &edited, &outcome, &extraction, format, marker, pretty_json)
    }

    #[allow(clippy::too_many_arguments)]
    fn write_output(
        &self,
        path: &Path,
        edited: &str,
        outcome: &AggregateOutcome,
        extraction: &extract::Extraction,
        format: OutputFormat,
        marker: &str,
        pretty_json: bool,
    ) -> CliResult<()> {
        match format {
            OutputFormat::Html => {
                let rendered = output::html::render_notebook(edited, outcome, extraction)?;
                let out_path = self
                    .output
                    .clone()
                    .unwrap_or_else(|| derived_output_path(path, marker));
                fs::write(&out_path, rendered)
                    .with_context(|| format!("Failed to write: {}", out_path.display()))?;
                log::info!("wrote {}", out_path.display());
            }
            OutputFormat::Text => match &self.output {
                Some(out_path) => {
                    let file = fs::File::create(out_path)
                        .with_context(|| format!("Failed to write: {}", out_path.display()))?;
                    emit_blocks(TextFormatter::new(file), outcome)?;
                }
                None => emit_blocks(TextFormatter::stdout(), outcome)?,
            },
            OutputFormat::Json => match &self.output {
                Some(out_path) => {
                    let file = fs::File::create(out_path)
                        .with_context(|| format!("Failed to write: {}", out_path.display()))?;
                    emit_blocks(JsonFormatter::new(file, pretty_json), outcome)?;
                }
                None => emit_blocks(JsonFormatter::new(std::io::stdout(), pretty_json), outcome)?,
            },
        }
        Ok(())
    }

    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }
    }
}

fn emit_blocks(mut formatter: impl BlockFormatter, outcome: &AggregateOutcome) -> CliResult<()> {
    for block in &outcome.blocks {
        formatter.format_block(block)?;
    }
    formatter.finish()
}

/// `MyBookNotebook.html` becomes `MyBookNotebookAggregated.html`, next
/// to the input.
fn derived_output_path(input: &Path, marker: &str) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let derived = match name.strip_suffix(".html") {
        Some(stem) => format!("{stem}{marker}.html"),
        None => format!("{name}{marker}.html"),
    };
    input.with_file_name(derived)
}
