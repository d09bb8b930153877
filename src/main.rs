//! Healthy Meal Analyzer
//!
//! Runs the API server and offers a few maintenance commands that work on
//! the feedback store directly:
//! - Serve the REST API
//! - Print a user's meal history
//! - Analyze a local image file
//! - Print the default config file

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use meal_analyzer::analysis::{MealAnalyzer, VisionClient};
use meal_analyzer::api::{serve, ApiConfig, AppState};
use meal_analyzer::config::{generate_default_config, Config};
use meal_analyzer::meal::{media_type_for_extension, ImagePayload};
use meal_analyzer::storage::{FeedbackRecord, FeedbackStore, DEFAULT_USER_ID};

#[derive(Parser)]
#[command(name = "meal-analyzer")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Analyze meal photos and keep a nutrition feedback history")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search the standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the API server
    Serve {
        /// Override the listen port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show a user's meal history
    History {
        /// User id
        #[arg(default_value = DEFAULT_USER_ID)]
        user: String,
        /// Show at most this many entries
        #[arg(short, long)]
        limit: Option<usize>,
        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Analyze an image file and store the result
    Analyze {
        /// Path to a JPEG, PNG, GIF or WebP image
        image: PathBuf,
        /// User id to store the result under
        #[arg(short, long, default_value = DEFAULT_USER_ID)]
        user: String,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("writing {}", path.display()))?;
                println!("Config written to {}", path.display());
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let config_path = cli.config.clone().or_else(Config::find_default_path);
    let config = Config::load_from(config_path.as_deref())?;
    meal_analyzer::logging::init(&config.logging);

    match &config_path {
        Some(path) => tracing::info!("Loaded config from {}", path.display()),
        None => tracing::info!("Using default config with environment overrides"),
    }

    match cli.command {
        Commands::Serve { port } => run_server(config, port).await,
        Commands::History {
            user,
            limit,
            format,
        } => print_history(&config, &user, limit, &format).await,
        Commands::Analyze { image, user } => analyze_file(&config, &image, &user).await,
        Commands::Config { .. } => Ok(()),
    }
}

async fn run_server(config: Config, port: Option<u16>) -> anyhow::Result<()> {
    tracing::info!("Starting Healthy Meal Analyzer API v{}", env!("CARGO_PKG_VERSION"));

    let mut api_config = ApiConfig::from(&config.api);
    if let Some(port) = port {
        api_config.port = port;
    }

    let store = Arc::new(FeedbackStore::open(&config.storage.data_dir).await?);
    tracing::info!("Data directory: {}", store.root().display());

    let state = if config.analyzer.is_enabled() {
        let client = VisionClient::new(config.analyzer.vision_config())?;
        tracing::info!("Meal analysis enabled with model {}", client.name());
        AppState::with_analyzer(store, api_config.clone(), Arc::new(client))
    } else {
        tracing::warn!("No analyzer API key configured; /analyze-meal will answer 503");
        AppState::new(store, api_config.clone())
    };

    serve(state, &api_config).await?;
    tracing::info!("Healthy Meal Analyzer API stopped");
    Ok(())
}

async fn print_history(
    config: &Config,
    user: &str,
    limit: Option<usize>,
    format: &str,
) -> anyhow::Result<()> {
    let store = FeedbackStore::open(&config.storage.data_dir).await?;
    let mut items = store.history(user).await?;
    if let Some(limit) = limit {
        items.truncate(limit);
    }

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&items)?),
        "table" => {
            if items.is_empty() {
                println!("No meals recorded for {}", user);
            }
            for item in &items {
                let summary = item.feedback.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
                println!("{:<30} {:<36} {}", item.timestamp, item.id, summary.trim());
            }
        }
        other => bail!("unknown format: {}", other),
    }

    Ok(())
}

async fn analyze_file(config: &Config, path: &Path, user: &str) -> anyhow::Result<()> {
    if !config.analyzer.is_enabled() {
        bail!("no analyzer API key configured (set MEAL_ANALYZER_API_KEY)");
    }

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    let media_type = media_type_for_extension(ext)
        .with_context(|| format!("unsupported image type: {}", path.display()))?;

    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    let image = ImagePayload::from_bytes(media_type, &bytes)?;

    let client = VisionClient::new(config.analyzer.vision_config())?;
    let feedback = client.analyze(&image).await?;

    let store = FeedbackStore::open(&config.storage.data_dir).await?;
    let record = FeedbackRecord::new(user, image.data_url(), feedback);
    store.save(&record).await?;

    println!("{}", record.feedback);
    println!();
    println!("Saved as {} for {}", record.image_id, user);
    Ok(())
}
