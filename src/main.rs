use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use reading_quiz::publish::{self, JsonDirStore, OriginIndex};
use reading_quiz::{PipelineConfig, QuestionBank, UnknownLevelPolicy};

#[derive(Debug, Parser)]
#[command(author, version, about = "Normalize model-generated quiz questions and publish them with their readings")]
struct Cli {
    /// Path to configuration JSON file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Question bank JSON store
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract, decode and normalize fenced JSON fragments into the bank
    Normalize(NormalizeArgs),
    /// Show how each reading pairs with the bank, without writing anything
    Preview(ReadingsArgs),
    /// Write one document per reading into the JSON export directory
    Publish(PublishArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LevelPolicyArg {
    Basic,
    Reject,
}

impl From<LevelPolicyArg> for UnknownLevelPolicy {
    fn from(arg: LevelPolicyArg) -> Self {
        match arg {
            LevelPolicyArg::Basic => UnknownLevelPolicy::Basic,
            LevelPolicyArg::Reject => UnknownLevelPolicy::Reject,
        }
    }
}

#[derive(Debug, Args)]
struct NormalizeArgs {
    /// Text file holding the model's answers
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// What to do with unknown level labels
    #[arg(long, value_enum)]
    unknown_level: Option<LevelPolicyArg>,
}

#[derive(Debug, Args)]
struct ReadingsArgs {
    /// Directory containing the final reading .txt files
    #[arg(short, long)]
    readings: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct PublishArgs {
    #[command(flatten)]
    readings: ReadingsArgs,

    /// Output directory for exported documents
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Collection name
    #[arg(long)]
    collection: Option<String>,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading configuration from: {:?}", path);
            PipelineConfig::load(path)?
        }
        None => PipelineConfig::default(),
    };
    if let Some(store) = cli.store {
        config.store = store;
    }

    match cli.command {
        Commands::Normalize(args) => normalize_command(config, args),
        Commands::Preview(args) => preview_command(config, args),
        Commands::Publish(args) => publish_command(config, args),
    }
}

fn normalize_command(mut config: PipelineConfig, args: NormalizeArgs) -> Result<()> {
    if let Some(input) = args.input {
        config.input = input;
    }
    if let Some(policy) = args.unknown_level {
        config.unknown_level = policy.into();
    }

    let summary = reading_quiz::run(&config).context("Normalization failed")?;
    summary.log();
    info!("Questions saved to {:?}", config.store);
    Ok(())
}

fn load_index(config: &PipelineConfig) -> Result<OriginIndex> {
    if !config.store.exists() {
        anyhow::bail!("Question store not found: {:?}", config.store);
    }
    let bank = QuestionBank::load(&config.store)?;
    let index = OriginIndex::from_bank(&bank);
    info!("Questions loaded for {} readings", index.len());
    Ok(index)
}

fn preview_command(mut config: PipelineConfig, args: ReadingsArgs) -> Result<()> {
    if let Some(dir) = args.readings {
        config.publish.readings_dir = dir;
    }
    config.validate()?;

    let index = load_index(&config)?;
    let readings = publish::load_readings(&config.publish.readings_dir, config.publish.author_scan_lines)?;
    if readings.is_empty() {
        warn!("No .txt files found in {:?}", config.publish.readings_dir);
        return Ok(());
    }

    for p in publish::preview(&readings, &index) {
        info!("Reading: {}", p.name);
        info!("  - Title: {}", p.title);
        info!("  - Author: {}", p.author);
        info!("  - Characters: {}", p.characters);
        info!("  - Questions: {}", p.questions);
        for (difficulty, count) in &p.by_difficulty {
            info!("      {}: {}", difficulty, count);
        }
    }

    info!("Verification complete");
    Ok(())
}

fn publish_command(mut config: PipelineConfig, args: PublishArgs) -> Result<()> {
    if let Some(dir) = args.readings.readings {
        config.publish.readings_dir = dir;
    }
    if let Some(output) = args.output {
        config.publish.export_dir = output;
    }
    if let Some(collection) = args.collection {
        config.publish.collection = collection;
    }
    config.validate()?;

    let index = load_index(&config)?;
    let readings = publish::load_readings(&config.publish.readings_dir, config.publish.author_scan_lines)?;
    info!("Found {} readings", readings.len());

    let mut store = JsonDirStore::new(&config.publish.export_dir);
    let summary = publish::publish(&readings, &index, &mut store, &config.publish.collection);

    info!("Summary:");
    info!("  - Uploaded: {}", summary.uploaded);
    info!("  - Failed: {}", summary.failed);
    info!("Documents written under {:?}", store.root());
    Ok(())
}
