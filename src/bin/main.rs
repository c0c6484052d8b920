//! schemalink CLI - Infer relationships between tables in a JSON dataset
//!
//! Usage:
//!   schemalink infer <dataset.json> [--threshold <t>] [--format text|json]
//!   schemalink profile <dataset.json>
//!
//! Examples:
//!   schemalink infer clinic.json --domain medical --top 10
//!   schemalink infer clinic.json --format json > candidates.json
//!   schemalink -v profile clinic.json
//!
//! Both directions of a pair are scored, so a foreign key usually also shows
//! up reversed at lower confidence (`patients.id -> pets.patient_id`). Pass
//! `--dedupe-mirrored` to keep only the stronger direction.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use schemalink::config::{Settings, SettingsError};
use schemalink::inference::{InferenceEngine, InferenceReport, ProfiledSchema};
use schemalink::model::load_dataset;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schemalink")]
#[command(about = "schemalink - Infer undocumented relationships between tables")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a TOML config file (defaults to SCHEMALINK_CONFIG or ./schemalink.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Infer and rank relationship candidates
    Infer {
        /// Path to the dataset JSON file
        dataset: PathBuf,

        /// Minimum confidence (exclusive)
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Distinct values sampled per column
        #[arg(short, long)]
        sample_size: Option<usize>,

        /// Domain vocabulary preset (medical, ecommerce, education, financial)
        #[arg(short, long)]
        domain: Vec<String>,

        /// Keep only the stronger direction of mirrored candidates.
        ///
        /// Without it, a key-to-foreign-key candidate such as
        /// `patients.id -> pets.patient_id` is listed next to the real one.
        #[arg(long)]
        dedupe_mirrored: bool,

        /// Show at most this many candidates
        #[arg(long)]
        top: Option<usize>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show column profiles and detected primary keys
    Profile {
        /// Path to the dataset JSON file
        dataset: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable text
    Text,
    /// Pretty-printed JSON
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = match load_settings(cli.config.as_ref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Infer {
            dataset,
            threshold,
            sample_size,
            domain,
            dedupe_mirrored,
            top,
            format,
        } => {
            let mut settings = settings;
            if let Some(threshold) = threshold {
                settings.inference.min_confidence = threshold;
            }
            if let Some(sample_size) = sample_size {
                settings.inference.sample_size = sample_size;
            }
            settings.inference.domains.extend(domain);
            settings.inference.dedupe_mirrored |= dedupe_mirrored;
            cmd_infer(dataset, &settings, top, format)
        }
        Commands::Profile { dataset, format } => cmd_profile(dataset, &settings, format),
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(path: Option<&PathBuf>) -> Result<Settings, SettingsError> {
    match path {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    }
}

fn build_engine(settings: &Settings) -> Option<InferenceEngine> {
    match settings.to_config() {
        Ok(config) => {
            debug!(?config, "resolved configuration");
            Some(InferenceEngine::new(config))
        }
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            None
        }
    }
}

fn cmd_infer(dataset: PathBuf, settings: &Settings, top: Option<usize>, format: OutputFormat) -> ExitCode {
    let Some(engine) = build_engine(settings) else {
        return ExitCode::FAILURE;
    };

    let tables = match load_dataset(&dataset) {
        Ok(tables) => tables,
        Err(e) => {
            eprintln!("Error loading dataset '{}': {}", dataset.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let mut report = match engine.infer(&tables) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Invalid dataset: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(top) = top {
        report.candidates.truncate(top);
    }

    match format {
        OutputFormat::Text => print_report(&report),
        OutputFormat::Json => return print_json(&report),
    }
    ExitCode::SUCCESS
}

fn cmd_profile(dataset: PathBuf, settings: &Settings, format: OutputFormat) -> ExitCode {
    let Some(engine) = build_engine(settings) else {
        return ExitCode::FAILURE;
    };

    let tables = match load_dataset(&dataset) {
        Ok(tables) => tables,
        Err(e) => {
            eprintln!("Error loading dataset '{}': {}", dataset.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let schema = match engine.profile(&tables) {
        Ok(schema) => schema,
        Err(e) => {
            eprintln!("Invalid dataset: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match format {
        OutputFormat::Text => print_profiles(&schema),
        OutputFormat::Json => return print_json(&schema),
    }
    ExitCode::SUCCESS
}

fn print_json<T: serde::Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to serialize output: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_report(report: &InferenceReport) {
    if !report.primary_keys.is_empty() {
        println!("Primary keys:");
        for pk in &report.primary_keys {
            println!(
                "  - {}.{} ({}, confidence {:.2})",
                pk.table, pk.column, pk.tier, pk.confidence
            );
        }
        println!();
    }

    if !report.skipped.is_empty() {
        println!("Skipped tables:");
        for skipped in &report.skipped {
            println!("  - {}: {}", skipped.table, skipped.reason);
        }
        println!();
    }

    if report.candidates.is_empty() {
        println!("No relationship candidates above the threshold.");
        return;
    }

    println!("Relationship candidates:");
    for candidate in &report.candidates {
        println!("  - {}", candidate);
        println!("      {}", candidate.evidence.summary());
    }
}

fn print_profiles(schema: &ProfiledSchema) {
    for table in &schema.tables {
        println!("{} ({} rows)", table.name, table.row_count);
        for column in &table.columns {
            let pk_marker = if column.is_primary_key { " [primary key]" } else { "" };
            let shape = column
                .dominant_shape
                .map_or_else(|| "-".to_string(), |s| s.to_string());
            println!(
                "  - {}: {}, shape {}, unique {:.2}, null {:.2}, sample {}{}",
                column.name,
                column.type_class,
                shape,
                column.uniqueness_ratio,
                column.null_ratio,
                column.sample.len(),
                pk_marker
            );
        }
        println!();
    }

    for skipped in &schema.skipped {
        println!("Skipped {}: {}", skipped.table, skipped.reason);
    }
}
