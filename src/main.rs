use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use snake_duel::game::{AiLevel, Difficulty, GameConfig, MapSize};
use snake_duel::modes::PlayMode;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snake_duel")]
#[command(version, about = "Snake duel: steer your snake against an AI snake")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "play")]
    mode: Mode,

    /// Game speed (overrides the config file)
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// How often the AI takes random turns (overrides the config file)
    #[arg(long)]
    ai_level: Option<AiLevel>,

    /// Grid size preset (overrides the config file)
    #[arg(long)]
    map_size: Option<MapSize>,

    /// JSON file with `difficulty`, `ai_level` and `map_size` keys
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for food placement and AI exploration
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs here (filtered by RUST_LOG); the terminal is taken by the game
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play against the AI with keyboard controls
    Play,
}

fn init_tracing(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(anyhow::Error::msg)
        .context("Failed to install the tracing subscriber")
}

fn load_config(path: &Path) -> Result<GameConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Invalid game config in {}", path.display()))
}

fn resolve_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GameConfig::default(),
    };

    if let Some(difficulty) = cli.difficulty {
        config.difficulty = difficulty;
    }
    if let Some(ai_level) = cli.ai_level {
        config.ai_level = ai_level;
    }
    if let Some(map_size) = cli.map_size {
        config.map_size = map_size;
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_tracing(path)?;
    }

    let config = resolve_config(&cli)?;

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Play => {
            let mut play_mode = PlayMode::new(config, cli.seed);
            play_mode.run().await?;
        }
    }

    Ok(())
}
