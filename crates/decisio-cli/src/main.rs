//! Decisio CLI - Command-line interface
//!
//! Usage:
//!   decisio analyze <file> [--id <id>] [--no-summary]
//!   decisio classify <file> [--rights <json-file>]
//!   decisio rights <file> [--report]
//!   decisio entities <file> [--strategy greedy|max-weight]
//!   decisio batch <dir> [--output <file>] [--concurrency N] [--timeout-secs S]
//!
//! Author: hephaex@gmail.com

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use decisio_core::{AppConfig, LoggingConfig, ResolutionStrategy};
use decisio_extractor::{
    create_rights_report, rights_to_json, EntityResolver, EntitySourceAdapter, EntityStats,
    OutcomeClassifier, WorkerRightAnalyzer,
};
use decisio_pipeline::{
    export_json, AnalysisReport, BatchDocument, BatchFailure, BatchProcessor, DocumentPipeline,
};

#[derive(Parser)]
#[command(name = "decisio")]
#[command(about = "Outcome classification for labor-court rulings")]
#[command(version)]
struct Cli {
    /// TOML configuration file (environment variables still override it)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline on one document
    Analyze {
        /// Path to the ruling text
        file: PathBuf,
        /// Document id (defaults to the file stem)
        #[arg(long)]
        id: Option<String>,
        /// Skip summarization
        #[arg(long)]
        no_summary: bool,
    },
    /// Classify the outcome of a ruling
    Classify {
        file: PathBuf,
        /// JSON array of right outcome records
        #[arg(long)]
        rights: Option<PathBuf>,
    },
    /// Identify worker rights and their outcomes
    Rights {
        file: PathBuf,
        /// Print a text report instead of JSON
        #[arg(long)]
        report: bool,
    },
    /// Extract legal entities
    Entities {
        file: PathBuf,
        /// Overlap resolution: greedy or max-weight
        #[arg(long)]
        strategy: Option<String>,
    },
    /// Analyse every .txt file in a directory
    Batch {
        dir: PathBuf,
        /// Write the JSON export here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long)]
        concurrency: Option<usize>,
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::from_file(path)?.with_env_override()?,
        None => AppConfig::from_env()?,
    };
    Ok(config)
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if logging.json_format {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Read every `.txt` file in `dir`. A file that cannot be read becomes a
/// failure entry instead of stopping the batch.
fn collect_documents(dir: &Path) -> anyhow::Result<(Vec<BatchDocument>, Vec<BatchFailure>)> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("failed to list {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().map(|ext| ext == "txt").unwrap_or(false))
        .collect();
    paths.sort();

    let mut documents = Vec::with_capacity(paths.len());
    let mut failures = Vec::new();
    for path in &paths {
        let id = file_stem(path);
        match read_text(path) {
            Ok(text) => documents.push(BatchDocument::new(id, text)),
            Err(e) => {
                tracing::warn!(document_id = %id, error = %e, "skipping unreadable file");
                failures.push(BatchFailure {
                    document_id: id,
                    error: format!("{e:#}"),
                });
            }
        }
    }
    Ok((documents, failures))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_deref())?;
    init_tracing(&config.logging);

    match cli.command {
        Commands::Analyze { file, id, no_summary } => {
            if no_summary {
                config.pipeline.include_summary = false;
            }
            let text = read_text(&file)?;
            let id = id.unwrap_or_else(|| file_stem(&file));
            let analysis = DocumentPipeline::new(&config).process(&id, &text)?;
            println!("{}", serde_json::to_string_pretty(&analysis)?);
        }
        Commands::Classify { file, rights } => {
            let text = read_text(&file)?;
            let rights_json = rights.as_deref().map(read_text).transpose()?;
            let classification =
                OutcomeClassifier::new(&config.classifier).analyze_json(&text, rights_json.as_deref());
            println!("{}", serde_json::to_string_pretty(&classification)?);
        }
        Commands::Rights { file, report } => {
            let text = read_text(&file)?;
            let rights = WorkerRightAnalyzer::new().analyze(&text);
            if report {
                println!("{}", create_rights_report(&rights));
            } else {
                println!("{}", rights_to_json(&rights)?);
            }
        }
        Commands::Entities { file, strategy } => {
            let text = read_text(&file)?;
            let strategy = match strategy {
                Some(s) => s.parse::<ResolutionStrategy>()?,
                None => config.resolver.strategy,
            };
            let batch = EntitySourceAdapter::new().collect(&text)?;
            let entities = EntityResolver::new(strategy).resolve(batch.entities);
            let output = serde_json::json!({
                "entities": entities,
                "stats": EntityStats::from_entities(&entities),
                "rejected": batch.rejected,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Batch {
            dir,
            output,
            concurrency,
            timeout_secs,
        } => {
            if let Some(concurrency) = concurrency {
                config.batch.concurrency = concurrency;
            }
            if let Some(secs) = timeout_secs {
                config.batch.document_timeout_secs = secs;
            }

            let (documents, unreadable) = collect_documents(&dir)?;
            let pipeline = Arc::new(DocumentPipeline::new(&config));
            let processor = BatchProcessor::new(pipeline, &config.batch);
            let report = processor.run(documents).await.with_failures(unreadable);

            eprintln!("{}", report.summary());
            for failure in &report.failures {
                eprintln!("  {}: {}", failure.document_id, failure.error);
            }
            if let Some(aggregate) = AnalysisReport::from_analyses(&report.analyses) {
                eprintln!("\n{}", aggregate.render());
            }

            let export = export_json(&report.analyses)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, export)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    tracing::info!(path = %path.display(), "export written");
                }
                None => println!("{export}"),
            }
        }
    }

    Ok(())
}
