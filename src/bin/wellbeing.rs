//! Wellbeing CLI - score a JSON dataset from the command line
//!
//! Commands:
//! - personal / professional: single-family mood score
//! - overall: combined score with signed percentage and label
//! - sentiment: journal sentiment tally
//! - report: all of the above for one scope and window
//! - validate: check dataset records against the family and phrase sets

use chrono::{DateTime, Duration, Utc};
use clap::{ArgAction, Args, Parser, Subcommand};
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::Level;
use uuid::Uuid;

use wellbeing_signals::cohort::resolve_window;
use wellbeing_signals::{
    CompanyId, Dataset, EngineConfig, EngineError, InMemoryStore, ReportEncoder, WellbeingEngine,
    ENGINE_VERSION,
};

/// Wellbeing - aggregate mood and journal sentiment into wellbeing scores
#[derive(Parser)]
#[command(name = "wellbeing")]
#[command(version = ENGINE_VERSION)]
#[command(about = "Score workplace wellbeing signals", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Personal mood score
    Personal(ScopeArgs),
    /// Professional mood score
    Professional(ScopeArgs),
    /// Overall score across both mood families
    Overall(ScopeArgs),
    /// Journal sentiment tally
    Sentiment(ScopeArgs),
    /// All scores for one scope and window
    Report(ScopeArgs),
    /// Validate dataset records
    Validate {
        /// Dataset JSON file
        #[arg(short, long)]
        dataset: PathBuf,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct ScopeArgs {
    /// Dataset JSON file (companies, users, mood_events, journal_entries)
    #[arg(short, long)]
    dataset: PathBuf,

    /// Company to score
    #[arg(short, long)]
    company: Uuid,

    /// Window start (RFC 3339); defaults to the configured window length
    #[arg(long)]
    since: Option<DateTime<Utc>>,

    /// Window end (RFC 3339); defaults to now
    #[arg(long)]
    until: Option<DateTime<Utc>>,

    /// Engine config JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pretty-print output (default when stdout is a terminal)
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), WellbeingCliError> {
    match cli.command {
        Commands::Personal(args) => cmd_score(args, ScoreKind::Personal).await,
        Commands::Professional(args) => cmd_score(args, ScoreKind::Professional).await,
        Commands::Overall(args) => cmd_score(args, ScoreKind::Overall).await,
        Commands::Sentiment(args) => cmd_score(args, ScoreKind::Sentiment).await,
        Commands::Report(args) => cmd_score(args, ScoreKind::Report).await,
        Commands::Validate { dataset, json } => cmd_validate(&dataset, json),
    }
}

#[derive(Clone, Copy)]
enum ScoreKind {
    Personal,
    Professional,
    Overall,
    Sentiment,
    Report,
}

impl ScoreKind {
    fn as_str(&self) -> &'static str {
        match self {
            ScoreKind::Personal => "personal_mood",
            ScoreKind::Professional => "professional_mood",
            ScoreKind::Overall => "overall_score",
            ScoreKind::Sentiment => "sentiment_tally",
            ScoreKind::Report => "wellbeing_report",
        }
    }
}

async fn cmd_score(args: ScopeArgs, kind: ScoreKind) -> Result<(), WellbeingCliError> {
    let config = match &args.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };

    let start = args
        .since
        .unwrap_or_else(|| Utc::now() - Duration::days(i64::from(config.default_window_days)));
    let window = resolve_window(start, args.until)?;

    let encoder = match &config.instance_id {
        Some(id) => ReportEncoder::with_instance_id(id.clone()),
        None => ReportEncoder::new(),
    };

    let dataset = Dataset::from_file(&args.dataset)?;
    let engine = WellbeingEngine::from_store(InMemoryStore::new(dataset)).with_config(config);

    let scope = CompanyId(args.company);
    let (start, end) = (window.start, Some(window.end));
    let pretty = args.pretty || atty::is(atty::Stream::Stdout);

    let output = match kind {
        ScoreKind::Personal => {
            let result = engine.aggregate_personal_mood(scope, start, end).await?;
            render(&encoder.encode(kind.as_str(), scope, &window, result), pretty)?
        }
        ScoreKind::Professional => {
            let result = engine.aggregate_professional_mood(scope, start, end).await?;
            render(&encoder.encode(kind.as_str(), scope, &window, result), pretty)?
        }
        ScoreKind::Overall => {
            let result = engine.aggregate_overall_score(scope, start, end).await?;
            render(&encoder.encode(kind.as_str(), scope, &window, result), pretty)?
        }
        ScoreKind::Sentiment => {
            let result = engine.aggregate_sentiment_tally(scope, start, end).await?;
            render(&encoder.encode(kind.as_str(), scope, &window, result), pretty)?
        }
        ScoreKind::Report => {
            let result = engine.full_report(scope, start, end).await?;
            render(&encoder.encode(kind.as_str(), scope, &window, result), pretty)?
        }
    };

    println!("{}", output);
    Ok(())
}

fn render<T: Serialize>(value: &T, pretty: bool) -> Result<String, WellbeingCliError> {
    if pretty {
        Ok(serde_json::to_string_pretty(value)?)
    } else {
        Ok(serde_json::to_string(value)?)
    }
}

fn cmd_validate(dataset_path: &Path, json: bool) -> Result<(), WellbeingCliError> {
    let dataset = Dataset::from_file(dataset_path)?;
    let issues = dataset.validate();

    let report = ValidationReport {
        total_records: dataset.total_records(),
        invalid_records: issues.len(),
        errors: issues
            .iter()
            .map(|issue| ValidationErrorDetail {
                collection: issue.collection.to_string(),
                index: issue.index,
                id: issue.id.to_string(),
                error: issue.error.to_string(),
            })
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Total records:   {}", report.total_records);
        println!("Invalid records: {}", report.invalid_records);

        if !report.errors.is_empty() {
            println!("\nErrors:");
            for err in &report.errors {
                println!(
                    "  - {} {} (index {}): {}",
                    err.collection, err.id, err.index, err.error
                );
            }
        }
    }

    if report.invalid_records > 0 {
        Err(WellbeingCliError::ValidationFailed(report.invalid_records))
    } else {
        Ok(())
    }
}

// Error types

#[derive(Debug)]
enum WellbeingCliError {
    Engine(EngineError),
    Json(serde_json::Error),
    ValidationFailed(usize),
}

impl From<EngineError> for WellbeingCliError {
    fn from(e: EngineError) -> Self {
        WellbeingCliError::Engine(e)
    }
}

impl From<serde_json::Error> for WellbeingCliError {
    fn from(e: serde_json::Error) -> Self {
        WellbeingCliError::Json(e)
    }
}

#[derive(Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<WellbeingCliError> for CliError {
    fn from(e: WellbeingCliError) -> Self {
        match e {
            WellbeingCliError::Engine(e) => {
                let (code, hint) = match &e {
                    EngineError::InvalidWindow { .. } => {
                        ("INVALID_WINDOW", "--until must be after --since")
                    }
                    EngineError::UnknownScope(_) => {
                        ("UNKNOWN_SCOPE", "Check the company id against the dataset")
                    }
                    EngineError::Store(_) => ("STORE_UNAVAILABLE", "Retry once the store is back"),
                    EngineError::JsonError(_) => ("PARSE_ERROR", "Check dataset JSON syntax"),
                    EngineError::Io(_) => ("IO_ERROR", "Check file paths and permissions"),
                    EngineError::Config(_) => ("CONFIG_ERROR", "Fix the config file and retry"),
                };
                CliError {
                    code: code.to_string(),
                    message: e.to_string(),
                    hint: Some(hint.to_string()),
                }
            }
            WellbeingCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: None,
            },
            WellbeingCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{} records failed validation", count),
                hint: Some("Fix validation errors and retry".to_string()),
            },
        }
    }
}

// Report types

#[derive(Serialize)]
struct ValidationReport {
    total_records: usize,
    invalid_records: usize,
    errors: Vec<ValidationErrorDetail>,
}

#[derive(Serialize)]
struct ValidationErrorDetail {
    collection: String,
    index: usize,
    id: String,
    error: String,
}
