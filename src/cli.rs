//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::error::ConvertError;
use crate::domain::exchange::SymbolResolver;
use crate::domain::layout::LayoutChoice;
use crate::domain::merge::merge;
use crate::domain::processor::{process_sections, process_statement};
use crate::domain::section::parse_rows;
use crate::domain::settings::Settings;
use crate::ports::output_port::OutputPort;
use crate::ports::source_port::SourcePort;

#[derive(Parser, Debug)]
#[command(
    name = "ibkr2tv",
    about = "Convert IBKR activity statements into a TradingView portfolio import CSV"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert and merge one or more activity statements
    Convert {
        /// Activity statement CSV files
        #[arg(required = true)]
        statements: Vec<PathBuf>,
        /// Flex query CSV files with Symbol and ListingExchange columns
        #[arg(long, num_args = 1..)]
        flex: Vec<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Statement language: zh, en or auto
        #[arg(long)]
        layout: Option<LayoutChoice>,
    },
    /// Show the sections of a statement and what would be converted
    Inspect {
        statement: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        layout: Option<LayoutChoice>,
    },
}

/// Counts reported for one statement.
#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    pub path: PathBuf,
    pub layout: &'static str,
    pub trade_count: usize,
    pub cash_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConvertReport {
    pub mapped_symbols: usize,
    pub files: Vec<FileReport>,
    pub merged: usize,
}

pub fn run(cli: Cli) -> ExitCode {
    init_logging();
    let result = match cli.command {
        Command::Convert {
            statements,
            flex,
            output,
            config,
            layout,
        } => run_convert(&statements, &flex, output, config.as_ref(), layout),
        Command::Inspect {
            statement,
            config,
            layout,
        } => run_inspect(&statement, config.as_ref(), layout),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the default `warn` level.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn load_settings(config_path: Option<&PathBuf>) -> Result<Settings, ConvertError> {
    let adapter = match config_path {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            FileConfigAdapter::from_file(path).map_err(|e| ConvertError::ConfigParse {
                file: path.display().to_string(),
                reason: e.to_string(),
            })?
        }
        None => FileConfigAdapter::empty(),
    };
    Settings::from_config(&adapter)
}

/// Builds the symbol map from every reference file, in order.
pub fn build_resolver(
    source: &dyn SourcePort,
    flex: &[PathBuf],
    settings: &Settings,
) -> Result<SymbolResolver, ConvertError> {
    let tables = flex
        .iter()
        .map(|path| source.read_table(path))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SymbolResolver::from_reference_tables(
        tables.iter().map(Vec::as_slice),
        &settings.exchanges,
        settings.rules.clone(),
    ))
}

/// Full pipeline: resolve symbols, convert every statement, merge, write.
///
/// Nothing is written unless every input was read and converted.
pub fn convert_pipeline(
    source: &dyn SourcePort,
    output_port: &dyn OutputPort,
    statements: &[PathBuf],
    flex: &[PathBuf],
    settings: &Settings,
    output: &Path,
) -> Result<ConvertReport, ConvertError> {
    let resolver = build_resolver(source, flex, settings)?;
    info!(symbols = resolver.mapped_count(), "built exchange map");

    let mut files = Vec::with_capacity(statements.len());
    let mut all = Vec::new();
    for path in statements {
        let result = process_statement(source, path, &resolver, settings.layout)?;
        files.push(FileReport {
            path: path.clone(),
            layout: result.layout,
            trade_count: result.trade_count,
            cash_count: result.cash_count,
        });
        all.extend(result.records);
    }

    let merged = merge(all);
    output_port.write(&merged, output)?;
    info!(rows = merged.len(), output = %output.display(), "wrote output");

    Ok(ConvertReport {
        mapped_symbols: resolver.mapped_count(),
        files,
        merged: merged.len(),
    })
}

fn run_convert(
    statements: &[PathBuf],
    flex: &[PathBuf],
    output: Option<PathBuf>,
    config_path: Option<&PathBuf>,
    layout: Option<LayoutChoice>,
) -> Result<(), ConvertError> {
    let mut settings = load_settings(config_path)?;
    if let Some(layout) = layout {
        settings.layout = layout;
    }
    let output = output.unwrap_or_else(|| settings.output.clone());

    let adapter = CsvAdapter::new();
    let report = convert_pipeline(&adapter, &adapter, statements, flex, &settings, &output)?;

    eprintln!("Exchange map: {} symbols", report.mapped_symbols);
    for file in &report.files {
        eprintln!(
            "  {}: {} trades + {} cash records ({})",
            file.path.display(),
            file.trade_count,
            file.cash_count,
            file.layout
        );
    }
    eprintln!("\nDone: {} records -> {}", report.merged, output.display());
    Ok(())
}

fn run_inspect(
    statement: &Path,
    config_path: Option<&PathBuf>,
    layout: Option<LayoutChoice>,
) -> Result<(), ConvertError> {
    let settings = load_settings(config_path)?;
    let choice = layout.unwrap_or(settings.layout);

    let sections = parse_rows(CsvAdapter::new().read_rows(statement)?);
    let layout = choice.select(&sections);

    println!("{} ({} sections, layout {})", statement.display(), sections.len(), layout.name);
    for tag in sections.tags() {
        println!("  {:<40} {:>6} rows", tag, sections.get(tag).len());
    }

    let resolver = SymbolResolver::new(Default::default(), settings.rules.clone());
    let result = process_sections(&sections, &resolver, &layout)?;
    println!(
        "Convertible: {} trades + {} cash records",
        result.trade_count, result.cash_count
    );
    Ok(())
}
