use anyhow::Result;
use clap::{Parser, ValueEnum};
use fruit_snake::game::{GameConfig, Variant};
use fruit_snake::logging;
use fruit_snake::modes::HumanMode;
use log::info;
use simplelog::LevelFilter;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fruit_snake")]
#[command(version, about = "Snake in the terminal: eat fruit, speed up, avoid walls")]
struct Cli {
    /// Rule set to play (defaults to classic, or the config file's value)
    #[arg(long)]
    variant: Option<VariantArg>,

    /// Seed for fruit placement
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file with game settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where log records are written
    #[arg(long, default_value = "fruit_snake.log")]
    log_file: PathBuf,

    /// Log verbosity
    #[arg(long, default_value = "info")]
    log_level: LogLevel,
}

#[derive(Clone, Copy, ValueEnum)]
enum VariantArg {
    /// Apples only, poison fins every third apple
    Classic,
    /// Four fruits with different scores, faster speed-up
    Orchard,
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Classic => Variant::Classic,
            VariantArg::Orchard => Variant::Orchard,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(&cli.log_file, cli.log_level.into())?;

    // File settings first, flags override
    let mut config = match &cli.config {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    };
    if let Some(variant) = cli.variant {
        config.variant = variant.into();
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    info!("Starting fruit_snake with {:?}", config);

    let mut human_mode = HumanMode::new(config);
    human_mode.run().await?;

    Ok(())
}
